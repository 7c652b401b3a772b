//! Rules engines implemented in Python.
//!
//! This is the only place the crate touches the Python runtime. A class
//! reference `module:Class` is resolved by importing `module` and reading
//! its `Class` attribute. For every action:
//!
//! 1. `Class(board)` is called with a `BoardState` snapshot
//! 2. `getattr(obj, action)(user_id)` is called
//! 3. on success the snapshot is written back to the board
//!
//! Python exceptions are returned unchanged as `EngineError::Python`.
//!
//! A class may define `render_fragment(board, player)` as a static or class
//! method; its string result is used as the board's engine fragment.

use std::sync::Arc;

use pyo3::prelude::*;

use super::py_board::PyBoardState;
use crate::board::BoardState;
use crate::core::{EngineResult, PlayerIndex};
use crate::rules::{GameClass, GameClassLoader, GameClassRef, RulesEngine};

/// Name of the optional render hook on a Python class.
const RENDER_HOOK: &str = "render_fragment";

/// Loader that imports Python modules.
#[derive(Clone, Copy, Debug, Default)]
pub struct PyClassLoader;

impl GameClassLoader for PyClassLoader {
    fn load(&self, reference: &GameClassRef) -> EngineResult<Arc<dyn GameClass>> {
        let class = Python::with_gil(|py| -> PyResult<Py<PyAny>> {
            let module = PyModule::import_bound(py, reference.module.as_str())?;
            Ok(module.getattr(reference.class.as_str())?.unbind())
        })?;

        Ok(Arc::new(PyGameClass {
            reference: reference.clone(),
            class,
        }))
    }
}

/// A loaded Python class.
pub struct PyGameClass {
    reference: GameClassRef,
    class: Py<PyAny>,
}

impl std::fmt::Debug for PyGameClass {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PyGameClass")
            .field("reference", &self.reference)
            .finish_non_exhaustive()
    }
}

impl GameClass for PyGameClass {
    fn reference(&self) -> &GameClassRef {
        &self.reference
    }

    fn instantiate<'a>(
        &'a self,
        state: &'a mut BoardState,
    ) -> EngineResult<Box<dyn RulesEngine + 'a>> {
        let (object, board) = Python::with_gil(|py| -> PyResult<_> {
            let board = Bound::new(py, PyBoardState::snapshot(state))?;
            let object = self.class.bind(py).call1((board.clone(),))?;
            Ok((object.unbind(), board.unbind()))
        })?;

        Ok(Box::new(PyEngine {
            object,
            board,
            state,
        }))
    }

    fn render_fragment(
        &self,
        state: &BoardState,
        player: PlayerIndex,
    ) -> EngineResult<Option<String>> {
        let fragment = Python::with_gil(|py| -> PyResult<Option<String>> {
            let class = self.class.bind(py);
            if !class.hasattr(RENDER_HOOK)? {
                return Ok(None);
            }
            let board = PyBoardState::snapshot(state);
            class
                .getattr(RENDER_HOOK)?
                .call1((board, player.index()))?
                .extract()
        })?;
        Ok(fragment)
    }
}

/// One Python engine object plus the board it was bound to.
struct PyEngine<'a> {
    object: Py<PyAny>,
    board: Py<PyBoardState>,
    state: &'a mut BoardState,
}

impl RulesEngine for PyEngine<'_> {
    fn invoke(&mut self, action: &str, user_id: &str) -> EngineResult<()> {
        let updated = Python::with_gil(|py| -> PyResult<BoardState> {
            self.object.bind(py).getattr(action)?.call1((user_id,))?;
            let board = self.board.bind(py).borrow();
            Ok(board.state().clone())
        })?;
        *self.state = updated;
        Ok(())
    }
}
