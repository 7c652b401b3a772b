//! Rules engine traits.
//!
//! The session never interprets game rules. It only knows three seams:
//!
//! - `GameClassLoader`: resolves a `module:class` reference
//! - `GameClass`: the loaded class; builds a fresh engine per action
//! - `RulesEngine`: one engine object, invoked by action name
//!
//! ## Implementation Notes
//!
//! - `instantiate` is called once per action. Anything an engine must
//!   remember between actions belongs in the `BoardState`.
//! - Engine errors are returned to the caller unchanged.

use std::sync::Arc;

use super::class_ref::GameClassRef;
use crate::board::BoardState;
use crate::core::{EngineResult, PlayerIndex};

/// A rules engine object bound to a board state.
pub trait RulesEngine {
    /// Invoke the named action with the acting user's id as sole argument.
    fn invoke(&mut self, action: &str, user_id: &str) -> EngineResult<()>;
}

/// A loaded rules engine class.
pub trait GameClass: Send + Sync {
    /// The reference this class was loaded from.
    fn reference(&self) -> &GameClassRef;

    /// Create a fresh engine object bound to `state`.
    fn instantiate<'a>(&'a self, state: &'a mut BoardState)
        -> EngineResult<Box<dyn RulesEngine + 'a>>;

    /// Engine-provided markup for a player's view, if any.
    ///
    /// Boards splice this into their rendering. Defaults to nothing.
    fn render_fragment(
        &self,
        _state: &BoardState,
        _player: PlayerIndex,
    ) -> EngineResult<Option<String>> {
        Ok(None)
    }
}

/// Resolves game class references into loaded classes.
pub trait GameClassLoader {
    /// Load the class named by `reference`.
    fn load(&self, reference: &GameClassRef) -> EngineResult<Arc<dyn GameClass>>;
}

impl<L: GameClassLoader + ?Sized> GameClassLoader for &L {
    fn load(&self, reference: &GameClassRef) -> EngineResult<Arc<dyn GameClass>> {
        (**self).load(reference)
    }
}
