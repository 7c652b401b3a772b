//! Core session types: participants, configuration, errors.
//!
//! These are shared by every other module and carry no game semantics.

pub mod config;
pub mod error;
pub mod player;

pub use config::{GameConfig, CONFIG_FILE_NAME};
pub use error::{EngineError, EngineResult, SessionError, SessionResult};
pub use player::{PlayerIndex, Players, UserId};
