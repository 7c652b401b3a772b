//! Python bindings for instance-host.
//!
//! Build with the `python` feature to get an extension module that hosts
//! sessions whose rules engines are Python classes.
//!
//! # Quick Start
//!
//! ```python
//! import instance_host
//!
//! # games/tictactoe/config.json names "tictactoe:TicTacToe"
//! game = instance_host.Instance("tictactoe", ["alice", "bob"], root="games")
//!
//! game.perform_action("alice", "place_center")
//! print(game.render_markup("bob"))
//! views = game.render_markup()  # {"alice": ..., "bob": ...}
//! ```
//!
//! A rules engine class receives a `BoardState` in its constructor and
//! exposes one method per action, each taking the acting user id.

use pyo3::prelude::*;

mod py_board;
mod py_instance;
mod py_rules;

pub use py_board::*;
pub use py_instance::*;
pub use py_rules::*;

/// instance_host: multiplayer game sessions with Python rules engines.
#[pymodule]
fn instance_host(m: &Bound<'_, PyModule>) -> PyResult<()> {
    m.add_class::<PyInstance>()?;
    m.add_class::<PyBoardState>()?;

    Ok(())
}
