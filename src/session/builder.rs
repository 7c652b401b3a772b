//! Session construction.
//!
//! Construction runs in a fixed order and stops at the first failure:
//!
//! 1. Players: reverse index of the user list
//! 2. Configuration: `<root>/<type>/config.json`
//! 3. Board: `<root>/<type>/<board>`
//! 4. Rules engine: parse `game_class`, load it
//! 5. Descriptor: derived from the above
//!
//! No partially built session is ever returned.

use std::path::PathBuf;

use tracing::debug;

use super::instance::Instance;
use crate::board::DocumentBoard;
use crate::core::{GameConfig, Players, SessionResult, UserId};
use crate::rules::GameClassLoader;

/// Builder for an [`Instance`].
#[derive(Clone, Debug)]
pub struct InstanceBuilder {
    instance_type: String,
    root: PathBuf,
    user_ids: Vec<UserId>,
}

impl InstanceBuilder {
    /// Start building a session of `instance_type`, rooted at the current
    /// directory with no users.
    pub fn new(instance_type: impl Into<String>) -> Self {
        Self {
            instance_type: instance_type.into(),
            root: PathBuf::from("."),
            user_ids: Vec::new(),
        }
    }

    /// Directory containing the instance type directories.
    #[must_use]
    pub fn root(mut self, root: impl Into<PathBuf>) -> Self {
        self.root = root.into();
        self
    }

    /// Set the ordered user list, replacing any previous users.
    #[must_use]
    pub fn users<I, S>(mut self, user_ids: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<UserId>,
    {
        self.user_ids = user_ids.into_iter().map(Into::into).collect();
        self
    }

    /// Append one user.
    #[must_use]
    pub fn user(mut self, user_id: impl Into<UserId>) -> Self {
        self.user_ids.push(user_id.into());
        self
    }

    /// Run the construction steps.
    ///
    /// # Errors
    ///
    /// - `Io` if the configuration record or board document is unreadable
    /// - `Parse` if either is malformed
    /// - `Format` if `game_class` is not `module:class`
    /// - `Engine` if the loader cannot resolve the class
    pub fn build<L>(self, loader: &L) -> SessionResult<Instance>
    where
        L: GameClassLoader + ?Sized,
    {
        let players = Players::new(self.user_ids);

        let config = GameConfig::load(&self.root, &self.instance_type)?;
        debug!(instance_type = %self.instance_type, board = %config.board, "configuration loaded");

        let board = DocumentBoard::load(&self.root, &self.instance_type, &config.board)?;

        let class_ref = config.class_ref()?;
        let class = loader.load(&class_ref)?;
        debug!(instance_type = %self.instance_type, game_class = %class_ref, "game class loaded");

        Ok(Instance::from_parts(
            self.instance_type,
            players,
            config,
            Box::new(board),
            class,
        ))
    }
}
