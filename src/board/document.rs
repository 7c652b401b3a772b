//! Boards loaded from JSON board documents.
//!
//! ```json
//! {
//!   "private_information": false,
//!   "actions": ["place", "pass"],
//!   "state": { "turn": 0 },
//!   "markup": "<board turn=\"{turn}\" me=\"{player}\">{engine}</board>"
//! }
//! ```
//!
//! Only `markup` is required. See [`MarkupTemplate`] for placeholder syntax.
//!
//! Unknown fields are rejected, so a misspelled key fails the load instead
//! of silently falling back to its default. Configuration records are
//! looser and ignore fields they do not know (see [`crate::core::config`]).

use std::path::{Path, PathBuf};

use rustc_hash::FxHashSet;
use serde::Deserialize;

use super::state::BoardState;
use super::template::MarkupTemplate;
use super::Board;
use crate::core::{EngineResult, PlayerIndex, SessionError, SessionResult};
use crate::rules::GameClass;

/// On-disk shape of a board document.
#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
struct BoardDocument {
    #[serde(default)]
    private_information: bool,
    #[serde(default)]
    actions: Vec<String>,
    #[serde(default)]
    state: BoardState,
    markup: String,
}

/// A board defined by a board document.
#[derive(Clone, Debug)]
pub struct DocumentBoard {
    private_information: bool,
    distinct_actions: usize,
    template: MarkupTemplate,
    state: BoardState,
}

impl DocumentBoard {
    /// Location of a board document for an instance type.
    pub fn document_path(root: impl AsRef<Path>, instance_type: &str, board_ref: &str) -> PathBuf {
        root.as_ref().join(instance_type).join(board_ref)
    }

    /// Read and parse the board document `<root>/<instance_type>/<board_ref>`.
    ///
    /// # Errors
    ///
    /// `Io` if the document cannot be read, `Parse` if it is malformed.
    pub fn load(root: impl AsRef<Path>, instance_type: &str, board_ref: &str) -> SessionResult<Self> {
        let path = Self::document_path(root, instance_type, board_ref);
        let text = std::fs::read_to_string(&path).map_err(|source| SessionError::Io {
            path: path.clone(),
            source,
        })?;
        Self::parse(&text, &path)
    }

    /// Parse a board document. `path` is only used for error reports.
    pub fn parse(text: &str, path: impl Into<PathBuf>) -> SessionResult<Self> {
        let path = path.into();
        let document: BoardDocument =
            serde_json::from_str(text).map_err(|e| SessionError::Parse {
                path: path.clone(),
                message: e.to_string(),
            })?;

        let template = MarkupTemplate::compile(&document.markup).map_err(|message| {
            SessionError::Parse {
                path: path.clone(),
                message: format!("markup: {message}"),
            }
        })?;

        let distinct_actions = document
            .actions
            .iter()
            .collect::<FxHashSet<_>>()
            .len();

        Ok(Self {
            private_information: document.private_information,
            distinct_actions,
            template,
            state: document.state,
        })
    }
}

impl Board for DocumentBoard {
    fn has_private_information(&self) -> bool {
        self.private_information
    }

    fn num_distinct_actions(&self) -> usize {
        self.distinct_actions
    }

    fn state(&self) -> &BoardState {
        &self.state
    }

    fn state_mut(&mut self) -> &mut BoardState {
        &mut self.state
    }

    fn render(&self, class: &dyn GameClass, player: PlayerIndex) -> EngineResult<String> {
        let fragment = if self.template.uses_engine() {
            class.render_fragment(&self.state, player)?
        } else {
            None
        };
        Ok(self.template.render(&self.state, player, fragment.as_deref()))
    }
}
