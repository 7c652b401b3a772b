//! The session object.
//!
//! ## Locking
//!
//! All interaction with the board and rules engine goes through one
//! `RwLock`:
//! - `perform_action` takes the write lock: actions never overlap each other
//!   or any rendering
//! - `render_markup` and `render_markup_all` take the read lock and may run
//!   in parallel
//!
//! Players, configuration and descriptor are immutable and read without
//! locking. Guards are released on every exit path, errors included.

use std::collections::HashMap;
use std::path::Path;
use std::sync::Arc;

use parking_lot::RwLock;
use tracing::{debug, info, warn};

use super::builder::InstanceBuilder;
use crate::board::{Board, BoardState};
use crate::core::{GameConfig, PlayerIndex, Players, SessionError, SessionResult, UserId};
use crate::descriptor::GameDescriptor;
use crate::rules::{GameClass, GameClassLoader, GameClassRef};

/// One live game session.
///
/// `Instance` is `Send + Sync`; share it between request threads with `Arc`.
pub struct Instance {
    instance_type: String,
    players: Players,
    config: GameConfig,
    descriptor: GameDescriptor,
    class: Arc<dyn GameClass>,
    board: RwLock<Box<dyn Board>>,
}

impl Instance {
    /// Start building a session of `instance_type`.
    pub fn builder(instance_type: impl Into<String>) -> InstanceBuilder {
        InstanceBuilder::new(instance_type)
    }

    /// Construct a session from the instance type directory under `root`.
    ///
    /// Shorthand for the builder.
    ///
    /// # Errors
    ///
    /// The first failing construction step's error. Nothing is retained on
    /// failure.
    pub fn new<L>(
        root: impl AsRef<Path>,
        instance_type: &str,
        user_ids: Vec<UserId>,
        loader: &L,
    ) -> SessionResult<Self>
    where
        L: GameClassLoader + ?Sized,
    {
        InstanceBuilder::new(instance_type)
            .root(root.as_ref())
            .users(user_ids)
            .build(loader)
    }

    /// Assemble a session from loaded parts.
    ///
    /// The descriptor is derived here, so sessions built from the same parts
    /// are identical.
    pub fn from_parts(
        instance_type: impl Into<String>,
        players: Players,
        config: GameConfig,
        board: Box<dyn Board>,
        class: Arc<dyn GameClass>,
    ) -> Self {
        let instance_type = instance_type.into();
        let descriptor =
            GameDescriptor::build(&instance_type, &config, board.properties(), players.count());

        if !config.accepts_player_count(players.count()) {
            warn!(
                instance_type = %instance_type,
                players = players.count(),
                min = config.min_players,
                max = config.max_players,
                "player count outside configured bounds"
            );
        }

        info!(
            instance_type = %instance_type,
            game_class = %class.reference(),
            players = players.count(),
            information = ?descriptor.game_type.information,
            actions = descriptor.game_info.num_distinct_actions,
            "instance created"
        );

        Self {
            instance_type,
            players,
            config,
            descriptor,
            class,
            board: RwLock::new(board),
        }
    }

    // === Session operations ===

    /// Apply `action` on behalf of `user_id`.
    ///
    /// Runs under the write lock. A fresh engine object is bound to the board
    /// state and the action is invoked by name with the user id as its only
    /// argument.
    ///
    /// A failed action leaves the board state exactly as it was before the
    /// call, whatever the engine changed before failing.
    ///
    /// # Errors
    ///
    /// `Participation` if the user is not a player (the engine is never
    /// reached), otherwise whatever the engine returns.
    pub fn perform_action(&self, user_id: &str, action: &str) -> SessionResult<()> {
        let player = self.require_player(user_id)?;

        let mut board = self.board.write();
        debug!(
            instance_type = %self.instance_type,
            user_id,
            player = player.index(),
            action,
            "performing action"
        );

        let snapshot = board.state().clone();
        let result = self
            .class
            .instantiate(board.state_mut())
            .and_then(|mut engine| engine.invoke(action, user_id));

        if let Err(e) = result {
            *board.state_mut() = snapshot;
            warn!(
                instance_type = %self.instance_type,
                user_id,
                action,
                error = %e,
                "action failed"
            );
            return Err(SessionError::from(e));
        }
        Ok(())
    }

    /// Render the board for one user.
    ///
    /// # Errors
    ///
    /// `Participation` if the user is not a player.
    pub fn render_markup(&self, user_id: &str) -> SessionResult<String> {
        let player = self.require_player(user_id)?;
        let board = self.board.read();
        Ok(board.render(self.class.as_ref(), player)?)
    }

    /// Render the board for every user from one consistent snapshot.
    ///
    /// The read lock is taken once for the whole map. Each distinct user is
    /// rendered once.
    pub fn render_markup_all(&self) -> SessionResult<HashMap<UserId, String>> {
        let board = self.board.read();
        let mut result = HashMap::with_capacity(self.players.count());
        for (user_id, player) in self.players.seats() {
            let markup = board.render(self.class.as_ref(), player)?;
            result.insert(user_id.clone(), markup);
        }
        Ok(result)
    }

    /// Copy of the current board state, taken under the read lock.
    #[must_use]
    pub fn board_state(&self) -> BoardState {
        self.board.read().state().clone()
    }

    // === Accessors ===

    /// Instance type this session was built from.
    #[must_use]
    pub fn instance_type(&self) -> &str {
        &self.instance_type
    }

    /// User ids in seat order.
    #[must_use]
    pub fn user_ids(&self) -> &[UserId] {
        self.players.user_ids()
    }

    /// Participants.
    #[must_use]
    pub fn players(&self) -> &Players {
        &self.players
    }

    /// Seat of a user.
    #[must_use]
    pub fn player_index(&self, user_id: &str) -> Option<PlayerIndex> {
        self.players.index_of(user_id)
    }

    /// Number of distinct players.
    #[must_use]
    pub fn player_count(&self) -> usize {
        self.players.count()
    }

    /// Configuration record.
    #[must_use]
    pub fn config(&self) -> &GameConfig {
        &self.config
    }

    /// Game descriptor.
    #[must_use]
    pub fn descriptor(&self) -> &GameDescriptor {
        &self.descriptor
    }

    /// Reference of the rules engine class.
    #[must_use]
    pub fn game_class(&self) -> &GameClassRef {
        self.class.reference()
    }

    fn require_player(&self, user_id: &str) -> SessionResult<PlayerIndex> {
        self.players.index_of(user_id).ok_or_else(|| {
            warn!(
                instance_type = %self.instance_type,
                user_id,
                "user is not participating"
            );
            SessionError::Participation(user_id.to_string())
        })
    }
}

impl std::fmt::Debug for Instance {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Instance")
            .field("instance_type", &self.instance_type)
            .field("players", &self.players.user_ids())
            .field("game_class", self.class.reference())
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::board::DocumentBoard;
    use crate::core::EngineError;
    use crate::rules::NativeGameClass;

    fn instance(users: &[&str]) -> Instance {
        let config = GameConfig {
            game_class: "race:Race".to_string(),
            board: "board.json".to_string(),
            min_players: 1,
            max_players: 4,
            move_limit: 10,
        };
        let board = DocumentBoard::parse(
            r#"{"actions": ["step"], "markup": "{player}:{own:pos}"}"#,
            "board.json",
        )
        .unwrap();
        let class = NativeGameClass::new(GameClassRef::new("race", "Race"))
            .with_action("step", |state, user| {
                let seat = if user == "alice" { 0 } else { 1 };
                state.modify_player(PlayerIndex(seat), "pos", 1);
                Ok(())
            })
            .with_action("stumble", |_, _| Err(EngineError::rejected("tripped")));

        Instance::from_parts(
            "race",
            Players::new(users.iter().map(|s| s.to_string()).collect()),
            config,
            Box::new(board),
            Arc::new(class),
        )
    }

    #[test]
    fn test_instance_is_send_sync() {
        fn assert_send_sync<T: Send + Sync>() {}
        assert_send_sync::<Instance>();
    }

    #[test]
    fn test_action_then_render() {
        let inst = instance(&["alice", "bob"]);
        inst.perform_action("alice", "step").unwrap();
        inst.perform_action("alice", "step").unwrap();

        assert_eq!(inst.render_markup("alice").unwrap(), "0:2");
        assert_eq!(inst.render_markup("bob").unwrap(), "1:0");
    }

    #[test]
    fn test_unknown_user() {
        let inst = instance(&["alice"]);
        assert!(inst.perform_action("mallory", "step").unwrap_err().is_participation());
        assert!(inst.render_markup("mallory").unwrap_err().is_participation());
        assert!(inst.board_state().is_empty());
    }

    #[test]
    fn test_engine_error_leaves_session_usable() {
        let inst = instance(&["alice", "bob"]);
        let err = inst.perform_action("bob", "stumble").unwrap_err();
        assert!(matches!(err, SessionError::Engine(EngineError::Rejected(ref m)) if m == "tripped"));

        inst.perform_action("bob", "step").unwrap();
        assert_eq!(inst.render_markup("bob").unwrap(), "1:1");
    }

    #[test]
    fn test_render_all() {
        let inst = instance(&["alice", "bob"]);
        inst.perform_action("bob", "step").unwrap();

        let all = inst.render_markup_all().unwrap();
        assert_eq!(all.len(), 2);
        assert_eq!(all["alice"], "0:0");
        assert_eq!(all["bob"], "1:1");
    }

    #[test]
    fn test_accessors() {
        let inst = instance(&["alice", "bob"]);
        assert_eq!(inst.instance_type(), "race");
        assert_eq!(inst.user_ids(), ["alice".to_string(), "bob".to_string()]);
        assert_eq!(inst.player_index("bob"), Some(PlayerIndex(1)));
        assert_eq!(inst.player_count(), 2);
        assert_eq!(inst.descriptor().num_players(), 2);
        assert_eq!(inst.game_class().to_string(), "race:Race");
        assert_eq!(inst.config().move_limit, 10);
        assert!(format!("{inst:?}").contains("race:Race"));
    }
}
