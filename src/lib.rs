//! # instance-host
//!
//! Hosts live multiplayer turn-based game sessions.
//!
//! An `Instance` binds a board document, an ordered set of users and a
//! dynamically loaded rules engine into one concurrency-safe object with two
//! operations: apply a user's action, and render the board for a user.
//!
//! ## Design Principles
//!
//! 1. **Rules Are External**: The session never interprets game rules. It
//!    dispatches actions by name to a rules engine and renders whatever the
//!    board and engine produce.
//!
//! 2. **All-or-Nothing Construction**: Configuration, board, rules engine and
//!    descriptor are assembled in one pass. Any failure aborts construction.
//!
//! 3. **Single Writer, Many Readers**: Actions are exclusive; renderings are
//!    shared and may run in parallel.
//!
//! ## Layout
//!
//! ```text
//! <root>/<instance_type>/config.json    game class, board, bounds, move limit
//! <root>/<instance_type>/<board>        board document
//! ```
//!
//! ## Modules
//!
//! - `core`: Participants, configuration, errors
//! - `board`: Board trait, board state, board documents
//! - `rules`: Game class references, rules engine traits, native engines
//! - `descriptor`: Game descriptor for the game framework
//! - `session`: The `Instance` session object
//! - `python`: Python rules engines and bindings (feature `python`)

pub mod board;
pub mod core;
pub mod descriptor;
pub mod rules;
pub mod session;

#[cfg(feature = "python")]
pub mod python;

// Re-export commonly used types
pub use crate::core::{
    EngineError, EngineResult, GameConfig, PlayerIndex, Players, SessionError, SessionResult,
    UserId,
};

pub use crate::board::{Board, BoardProperties, BoardState, DocumentBoard, MarkupTemplate};

pub use crate::rules::{
    GameClass, GameClassLoader, GameClassRef, NativeClassRegistry, NativeGameClass, RulesEngine,
};

pub use crate::descriptor::{GameDescriptor, Information};

pub use crate::session::{Instance, InstanceBuilder};
