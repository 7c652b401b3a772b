//! Session operation tests.
//!
//! These tests drive `perform_action` and `render_markup` against a small
//! scoring game built from a board document and a native rules engine.

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

use instance_host::rules::{GameClass, GameClassRef, NativeGameClass, RulesEngine};
use instance_host::{
    Board, BoardState, DocumentBoard, EngineError, EngineResult, GameConfig, Instance,
    PlayerIndex, Players, SessionError,
};
use proptest::prelude::*;

const BOARD: &str = r#"{
    "private_information": true,
    "actions": ["score", "reset"],
    "state": { "round": 1 },
    "markup": "<view seat=\"{player}\" round=\"{round}\" points=\"{own:points}\">{engine}</view>"
}"#;

fn config() -> GameConfig {
    GameConfig {
        game_class: "scoring:Scoring".to_string(),
        board: "board.json".to_string(),
        min_players: 1,
        max_players: 8,
        move_limit: 100,
    }
}

/// A game where each action names the acting user; the engine keeps its own
/// seat table because it only ever sees user ids.
fn scoring_class(seats: &[&str], calls: Arc<AtomicUsize>) -> NativeGameClass {
    let seats: Vec<String> = seats.iter().map(|s| s.to_string()).collect();
    let seat_of = move |user: &str| seats.iter().position(|s| s == user).unwrap_or(0);

    NativeGameClass::new(GameClassRef::new("scoring", "Scoring"))
        .with_action("score", move |state, user| {
            calls.fetch_add(1, Ordering::SeqCst);
            state.modify_player(PlayerIndex(seat_of(user)), "points", 1);
            Ok(())
        })
        .with_action("forfeit", |_, user| {
            Err(EngineError::rejected(format!("{user} cannot forfeit yet")))
        })
        .with_action("buy", |state, _| {
            state.modify("gold", -10);
            state.set("round", 99);
            Err(EngineError::rejected("not enough gold"))
        })
        .with_render(|state, player| {
            Some(format!("<round-hint seat=\"{}\" r=\"{}\"/>", player.index(), state.get("round", 0)))
        })
}

fn session(users: &[&str]) -> (Instance, Arc<AtomicUsize>) {
    let calls = Arc::new(AtomicUsize::new(0));
    let board = DocumentBoard::parse(BOARD, "board.json").unwrap();
    let instance = Instance::from_parts(
        "scoring",
        Players::new(users.iter().map(|s| s.to_string()).collect()),
        config(),
        Box::new(board),
        Arc::new(scoring_class(users, calls.clone())),
    );
    (instance, calls)
}

// =============================================================================
// perform_action
// =============================================================================

/// Test that an action mutates the board and shows up in renderings.
#[test]
fn test_action_updates_rendering() {
    let (instance, calls) = session(&["alice", "bob"]);

    instance.perform_action("bob", "score").unwrap();
    instance.perform_action("bob", "score").unwrap();

    assert_eq!(calls.load(Ordering::SeqCst), 2);
    assert_eq!(instance.board_state().get_player(PlayerIndex(1), "points", 0), 2);
    assert!(instance.render_markup("bob").unwrap().contains("points=\"2\""));
    assert!(instance.render_markup("alice").unwrap().contains("points=\"0\""));
}

/// Test that an unknown user never reaches the engine.
#[test]
fn test_unknown_user_action_skips_engine() {
    let (instance, calls) = session(&["alice", "bob"]);

    let err = instance.perform_action("mallory", "score").unwrap_err();

    assert!(matches!(err, SessionError::Participation(ref u) if u == "mallory"));
    assert_eq!(calls.load(Ordering::SeqCst), 0);
    assert_eq!(instance.board_state().get("round", 0), 1);
}

/// Test that engine errors surface unchanged.
#[test]
fn test_engine_error_passes_through() {
    let (instance, _) = session(&["alice"]);

    let err = instance.perform_action("alice", "forfeit").unwrap_err();
    match err {
        SessionError::Engine(EngineError::Rejected(message)) => {
            assert_eq!(message, "alice cannot forfeit yet");
        }
        other => panic!("expected engine rejection, got {other:?}"),
    }
}

/// Test that an action the engine does not define is reported by the engine.
#[test]
fn test_unknown_action() {
    let (instance, _) = session(&["alice"]);

    let err = instance.perform_action("alice", "teleport").unwrap_err();
    assert!(matches!(
        err,
        SessionError::Engine(EngineError::UnknownAction { ref action, .. }) if action == "teleport"
    ));
}

/// Test that a failing action leaves no partial changes on the board.
#[test]
fn test_failed_action_rolls_back() {
    let (instance, _) = session(&["alice", "bob"]);
    instance.perform_action("alice", "score").unwrap();
    let before = instance.board_state();

    let err = instance.perform_action("alice", "buy").unwrap_err();

    assert!(matches!(err, SessionError::Engine(EngineError::Rejected(_))));
    assert_eq!(instance.board_state(), before);
    assert!(!instance.board_state().contains("gold"));
    assert!(instance.render_markup("alice").unwrap().contains("round=\"1\" points=\"1\""));
}

/// A class whose engine objects can never be created.
#[derive(Debug)]
struct Unconstructible {
    reference: GameClassRef,
}

impl GameClass for Unconstructible {
    fn reference(&self) -> &GameClassRef {
        &self.reference
    }

    fn instantiate<'a>(
        &'a self,
        _state: &'a mut BoardState,
    ) -> EngineResult<Box<dyn RulesEngine + 'a>> {
        Err(EngineError::rejected("engine unavailable"))
    }
}

/// Test that a failure to create the engine is reported and changes nothing.
#[test]
fn test_instantiate_failure_passes_through() {
    let board = DocumentBoard::parse(BOARD, "board.json").unwrap();
    let instance = Instance::from_parts(
        "scoring",
        Players::new(vec!["alice".to_string()]),
        config(),
        Box::new(board),
        Arc::new(Unconstructible {
            reference: GameClassRef::new("scoring", "Scoring"),
        }),
    );
    let before = instance.board_state();

    let err = instance.perform_action("alice", "score").unwrap_err();

    assert_eq!(err.to_string(), "engine unavailable");
    assert_eq!(instance.board_state(), before);
}

/// Test that the session keeps working after failed calls.
#[test]
fn test_errors_do_not_poison_session() {
    let (instance, _) = session(&["alice"]);

    assert!(instance.perform_action("alice", "forfeit").is_err());
    assert!(instance.perform_action("nobody", "score").is_err());
    assert!(instance.render_markup("nobody").is_err());

    instance.perform_action("alice", "score").unwrap();
    assert!(instance.render_markup("alice").unwrap().contains("points=\"1\""));
}

// =============================================================================
// render_markup
// =============================================================================

/// Test that single-user rendering equals the board's rendering for that seat.
#[test]
fn test_render_matches_board() {
    let (instance, calls) = session(&["alice", "bob", "carol"]);
    instance.perform_action("carol", "score").unwrap();

    let mut reference = DocumentBoard::parse(BOARD, "board.json").unwrap();
    reference.state_mut().set_player(PlayerIndex(2), "points", 1);
    let class = scoring_class(&["alice", "bob", "carol"], calls);

    for (user, seat) in [("alice", 0), ("bob", 1), ("carol", 2)] {
        assert_eq!(
            instance.render_markup(user).unwrap(),
            reference.render(&class, PlayerIndex(seat)).unwrap()
        );
    }
}

/// Test the exact markup for one seat, engine fragment included.
#[test]
fn test_render_exact_markup() {
    let (instance, _) = session(&["alice", "bob"]);
    assert_eq!(
        instance.render_markup("bob").unwrap(),
        "<view seat=\"1\" round=\"1\" points=\"0\"><round-hint seat=\"1\" r=\"1\"/></view>"
    );
}

/// Test that rendering for an unknown user fails.
#[test]
fn test_render_unknown_user() {
    let (instance, _) = session(&["alice"]);
    let err = instance.render_markup("eve").unwrap_err();
    assert!(err.is_participation());
    assert_eq!(err.to_string(), "user eve is not participating in the game");
}

/// Test that rendering for everyone matches individual renderings.
#[test]
fn test_render_all_matches_single() {
    let (instance, _) = session(&["alice", "bob", "carol"]);
    instance.perform_action("alice", "score").unwrap();

    let all = instance.render_markup_all().unwrap();

    assert_eq!(all.len(), 3);
    for user in ["alice", "bob", "carol"] {
        assert_eq!(all[user], instance.render_markup(user).unwrap());
    }
}

/// Test duplicate user ids: the later seat wins and renderings follow it.
#[test]
fn test_duplicate_user_last_wins() {
    let (instance, _) = session(&["alice", "bob", "alice"]);

    assert!(instance.players().has_duplicates());
    assert_eq!(instance.player_index("alice"), Some(PlayerIndex(2)));
    assert_eq!(instance.player_count(), 2);
    assert_eq!(instance.descriptor().num_players(), 2);

    let all = instance.render_markup_all().unwrap();
    assert_eq!(all.len(), 2);
    assert!(all["alice"].starts_with("<view seat=\"2\""));
}

/// Test that a duplicated user is rendered only once for everyone.
#[test]
fn test_render_all_renders_duplicates_once() {
    let renders = Arc::new(AtomicUsize::new(0));
    let class = {
        let renders = renders.clone();
        NativeGameClass::new(GameClassRef::new("scoring", "Scoring")).with_render(move |_, _| {
            renders.fetch_add(1, Ordering::SeqCst);
            Some(String::new())
        })
    };
    let instance = Instance::from_parts(
        "scoring",
        Players::new(["alice", "bob", "alice", "alice"].map(String::from).to_vec()),
        config(),
        Box::new(DocumentBoard::parse(BOARD, "board.json").unwrap()),
        Arc::new(class),
    );

    let all = instance.render_markup_all().unwrap();

    assert_eq!(all.len(), 2);
    assert_eq!(renders.load(Ordering::SeqCst), 2);
    assert!(all["alice"].starts_with("<view seat=\"3\""));
}

/// Test a session with no players.
#[test]
fn test_empty_session() {
    let (instance, _) = session(&[]);
    assert!(instance.render_markup_all().unwrap().is_empty());
    assert!(instance.perform_action("anyone", "score").unwrap_err().is_participation());
}

// =============================================================================
// Properties
// =============================================================================

proptest! {
    /// Seats form a bijection onto 0..N matching list position.
    #[test]
    fn prop_player_index_bijection(names in prop::collection::hash_set("[a-z]{1,8}", 0..12)) {
        let users: Vec<String> = names.into_iter().collect();
        let players = Players::new(users.clone());

        prop_assert_eq!(players.count(), users.len());
        let mut seen = vec![false; users.len()];
        for (position, user) in users.iter().enumerate() {
            let index = players.index_of(user).unwrap();
            prop_assert_eq!(index, PlayerIndex(position));
            prop_assert!(!seen[index.index()]);
            seen[index.index()] = true;
        }
        prop_assert!(seen.into_iter().all(|s| s));
    }

    /// Unknown users are always rejected without touching the engine.
    #[test]
    fn prop_unknown_user_rejected(user in "[A-Z]{1,6}") {
        let (instance, calls) = session(&["alice", "bob"]);

        prop_assert!(instance.perform_action(&user, "score").unwrap_err().is_participation());
        prop_assert!(instance.render_markup(&user).unwrap_err().is_participation());
        prop_assert_eq!(calls.load(Ordering::SeqCst), 0);
    }
}
