//! Board state binding for Python rules engines.

use std::collections::HashMap;

use pyo3::prelude::*;

use crate::board::BoardState;
use crate::core::PlayerIndex;

/// Python view of a board state.
///
/// Python rules engines receive one of these when instantiated. It holds a
/// snapshot of the board; changes are written back once the action returns
/// successfully.
#[pyclass(name = "BoardState")]
#[derive(Clone, Debug, Default)]
pub struct PyBoardState {
    pub(crate) state: BoardState,
}

impl PyBoardState {
    /// Wrap a snapshot of `state`.
    pub fn snapshot(state: &BoardState) -> Self {
        Self {
            state: state.clone(),
        }
    }

    /// The wrapped state.
    pub fn state(&self) -> &BoardState {
        &self.state
    }
}

#[pymethods]
impl PyBoardState {
    /// Create an empty board state.
    #[new]
    fn new() -> Self {
        Self::default()
    }

    /// Get a value (default 0).
    #[pyo3(signature = (key, default = 0))]
    fn get(&self, key: &str, default: i64) -> i64 {
        self.state.get(key, default)
    }

    /// Set a value.
    fn set(&mut self, key: String, value: i64) {
        self.state.set(key, value);
    }

    /// Add `delta` to a value.
    fn modify(&mut self, key: &str, delta: i64) {
        self.state.modify(key, delta);
    }

    /// Get a player-scoped value (default 0).
    #[pyo3(signature = (player, key, default = 0))]
    fn get_player(&self, player: usize, key: &str, default: i64) -> i64 {
        self.state.get_player(PlayerIndex(player), key, default)
    }

    /// Set a player-scoped value.
    fn set_player(&mut self, player: usize, key: &str, value: i64) {
        self.state.set_player(PlayerIndex(player), key, value);
    }

    /// Add `delta` to a player-scoped value.
    fn modify_player(&mut self, player: usize, key: &str, delta: i64) {
        self.state.modify_player(PlayerIndex(player), key, delta);
    }

    /// Copy all values into a dict.
    fn to_dict(&self) -> HashMap<String, i64> {
        self.state.iter().map(|(k, v)| (k.clone(), v)).collect()
    }

    fn __contains__(&self, key: &str) -> bool {
        self.state.contains(key)
    }

    fn __len__(&self) -> usize {
        self.state.len()
    }

    fn __repr__(&self) -> String {
        format!("BoardState(len={})", self.state.len())
    }
}
