//! Error types for session construction and operation.
//!
//! Construction errors (`Parse`, `Format`, `Io`, and loader failures) abort
//! construction entirely. Operation errors (`Participation`, `Engine`) leave
//! the session untouched.

use std::path::PathBuf;

use thiserror::Error;

use super::player::UserId;

/// Errors raised by a rules engine.
///
/// These are surfaced to callers unchanged; the session never interprets
/// them.
#[derive(Error, Debug)]
pub enum EngineError {
    /// The loader has no class for the reference.
    #[error("unknown game class: {0}")]
    UnknownClass(String),

    /// The engine has no action with this name.
    #[error("{class} has no action `{action}`")]
    UnknownAction {
        /// Game class reference (`module:class`).
        class: String,
        /// Requested action name.
        action: String,
    },

    /// The engine refused the action.
    #[error("{0}")]
    Rejected(String),

    /// Exception raised inside a Python rules engine.
    #[cfg(feature = "python")]
    #[error(transparent)]
    Python(#[from] pyo3::PyErr),
}

impl EngineError {
    /// Create a rejection with a message.
    pub fn rejected(message: impl Into<String>) -> Self {
        EngineError::Rejected(message.into())
    }
}

/// Errors raised by an [`Instance`](crate::session::Instance).
#[derive(Error, Debug)]
pub enum SessionError {
    /// A configuration record or board document is malformed.
    #[error("failed to parse {}: {message}", path.display())]
    Parse {
        /// Document that failed to parse.
        path: PathBuf,
        /// Parser message.
        message: String,
    },

    /// A game class reference is not of the form `module:class`.
    #[error("invalid game_class `{0}`: expected exactly `module:class`")]
    Format(String),

    /// A configuration record or board document could not be read.
    #[error("failed to read {}: {source}", path.display())]
    Io {
        /// Document that could not be read.
        path: PathBuf,
        /// Underlying IO error.
        #[source]
        source: std::io::Error,
    },

    /// The user is not one of the session's players.
    #[error("user {0} is not participating in the game")]
    Participation(UserId),

    /// The rules engine failed.
    #[error(transparent)]
    Engine(#[from] EngineError),
}

impl SessionError {
    /// Whether this is a participation failure.
    #[must_use]
    pub fn is_participation(&self) -> bool {
        matches!(self, SessionError::Participation(_))
    }
}

/// Result type for session operations.
pub type SessionResult<T> = Result<T, SessionError>;

/// Result type for rules-engine operations.
pub type EngineResult<T> = Result<T, EngineError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_participation_message() {
        let err = SessionError::Participation("mallory".to_string());
        assert_eq!(
            err.to_string(),
            "user mallory is not participating in the game"
        );
        assert!(err.is_participation());
    }

    #[test]
    fn test_engine_error_is_transparent() {
        let err: SessionError = EngineError::rejected("not your turn").into();
        assert_eq!(err.to_string(), "not your turn");
        assert!(!err.is_participation());
    }

    #[test]
    fn test_parse_message_names_path() {
        let err = SessionError::Parse {
            path: PathBuf::from("chess/config.json"),
            message: "missing field `board`".to_string(),
        };
        assert!(err.to_string().contains("chess/config.json"));
        assert!(err.to_string().contains("missing field `board`"));
    }
}
