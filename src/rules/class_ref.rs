//! Game class references.

use serde::{Deserialize, Serialize};

use crate::core::{SessionError, SessionResult};

/// Reference to a loadable rules engine class, written `module:class`.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct GameClassRef {
    /// Module that defines the class.
    pub module: String,
    /// Class name inside the module.
    pub class: String,
}

impl GameClassRef {
    /// Create a reference from its parts.
    pub fn new(module: impl Into<String>, class: impl Into<String>) -> Self {
        Self {
            module: module.into(),
            class: class.into(),
        }
    }

    /// Parse `module:class`.
    ///
    /// ```
    /// use instance_host::rules::GameClassRef;
    ///
    /// let r = GameClassRef::parse("moduleA:ClassB").unwrap();
    /// assert_eq!((r.module.as_str(), r.class.as_str()), ("moduleA", "ClassB"));
    /// assert!(GameClassRef::parse("onlyonetoken").is_err());
    /// assert!(GameClassRef::parse("a:b:c").is_err());
    /// ```
    ///
    /// # Errors
    ///
    /// `Format` unless the input splits into exactly two non-empty tokens.
    pub fn parse(s: &str) -> SessionResult<Self> {
        let tokens: Vec<&str> = s.split(':').collect();
        match tokens.as_slice() {
            [module, class] if !module.is_empty() && !class.is_empty() => {
                Ok(Self::new(*module, *class))
            }
            _ => Err(SessionError::Format(s.to_string())),
        }
    }
}

impl std::fmt::Display for GameClassRef {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}:{}", self.module, self.class)
    }
}

impl std::str::FromStr for GameClassRef {
    type Err = SessionError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}
