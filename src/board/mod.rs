//! Board binding.
//!
//! A board is the playable surface of a session. The session only relies on
//! the capabilities of the `Board` trait:
//! - whether the game hides information from some players
//! - how many distinct actions exist
//! - rendering markup for one player
//! - access to the `BoardState` that rules engines mutate
//!
//! `DocumentBoard` builds a board from a JSON board document.

pub mod document;
pub mod state;
pub mod template;

pub use document::DocumentBoard;
pub use state::BoardState;
pub use template::MarkupTemplate;

use serde::{Deserialize, Serialize};

use crate::core::{EngineResult, PlayerIndex};
use crate::rules::GameClass;

/// Playable surface of a session.
///
/// Owned by the session behind its lock; never shared outside it.
pub trait Board: Send + Sync {
    /// Whether some players cannot see all of the state.
    fn has_private_information(&self) -> bool;

    /// Number of distinct actions the game can express.
    fn num_distinct_actions(&self) -> usize;

    /// Current game state.
    fn state(&self) -> &BoardState;

    /// Current game state, for rules engines.
    fn state_mut(&mut self) -> &mut BoardState;

    /// Render the board as seen by `player`.
    ///
    /// `class` may contribute engine-specific markup.
    fn render(&self, class: &dyn GameClass, player: PlayerIndex) -> EngineResult<String>;

    /// Snapshot of the capabilities that shape the game descriptor.
    fn properties(&self) -> BoardProperties {
        BoardProperties {
            private_information: self.has_private_information(),
            num_distinct_actions: self.num_distinct_actions(),
        }
    }
}

/// Board capabilities consumed by the descriptor builder.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct BoardProperties {
    /// Whether the board carries private information.
    pub private_information: bool,
    /// Number of distinct actions.
    pub num_distinct_actions: usize,
}
