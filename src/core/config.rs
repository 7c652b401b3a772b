//! Per-instance-type configuration.
//!
//! Every instance type lives in its own directory under a root:
//!
//! ```text
//! <root>/<instance_type>/config.json
//! <root>/<instance_type>/<board document>
//! ```
//!
//! `config.json` names the rules engine class, the board document, the
//! player bounds and the move limit:
//!
//! ```json
//! {
//!   "game_class": "tictactoe:TicTacToe",
//!   "board": "board.json",
//!   "min_players": 2,
//!   "max_players": 2,
//!   "move_limit": 9
//! }
//! ```
//!
//! All five fields are required. Other fields are ignored, so a record may
//! carry settings for other tools. Board documents, which have optional
//! fields, reject unknown keys instead.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use super::error::{SessionError, SessionResult};
use crate::rules::GameClassRef;

/// File name of the configuration record inside an instance type directory.
pub const CONFIG_FILE_NAME: &str = "config.json";

/// Configuration record of an instance type.
///
/// Parsed once at construction and never mutated.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct GameConfig {
    /// Rules engine class reference, `module:class`.
    pub game_class: String,

    /// Board document path, relative to the instance type directory.
    pub board: String,

    /// Fewest players the game supports.
    pub min_players: usize,

    /// Most players the game supports.
    pub max_players: usize,

    /// Maximum game length in moves.
    pub move_limit: usize,
}

impl GameConfig {
    /// Location of the configuration record for an instance type.
    pub fn config_path(root: impl AsRef<Path>, instance_type: &str) -> PathBuf {
        root.as_ref().join(instance_type).join(CONFIG_FILE_NAME)
    }

    /// Read and parse the configuration record for an instance type.
    ///
    /// # Errors
    ///
    /// `Io` if the record cannot be read, `Parse` if it is malformed or
    /// inconsistent, `Format` if `game_class` is not `module:class`.
    pub fn load(root: impl AsRef<Path>, instance_type: &str) -> SessionResult<Self> {
        let path = Self::config_path(root, instance_type);
        let text = std::fs::read_to_string(&path).map_err(|source| SessionError::Io {
            path: path.clone(),
            source,
        })?;
        Self::from_json_str(&text, &path)
    }

    /// Parse a configuration record. `path` is only used for error reports.
    pub fn from_json_str(text: &str, path: impl Into<PathBuf>) -> SessionResult<Self> {
        let path = path.into();
        let config: GameConfig = serde_json::from_str(text).map_err(|e| SessionError::Parse {
            path: path.clone(),
            message: e.to_string(),
        })?;

        if config.min_players > config.max_players {
            return Err(SessionError::Parse {
                path,
                message: format!(
                    "min_players ({}) exceeds max_players ({})",
                    config.min_players, config.max_players
                ),
            });
        }

        config.class_ref()?;
        Ok(config)
    }

    /// The parsed rules engine class reference.
    pub fn class_ref(&self) -> SessionResult<GameClassRef> {
        GameClassRef::parse(&self.game_class)
    }

    /// Whether `player_count` lies within the configured bounds.
    #[must_use]
    pub fn accepts_player_count(&self, player_count: usize) -> bool {
        (self.min_players..=self.max_players).contains(&player_count)
    }
}
