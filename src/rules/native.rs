//! Rules engines written in Rust.
//!
//! A `NativeGameClass` is a table of named action handlers. Handlers receive
//! the board state and the acting user's id, so a native engine object is
//! nothing more than a borrow of the class plus a borrow of the state.
//!
//! ```
//! use instance_host::rules::{GameClassRef, NativeClassRegistry, NativeGameClass};
//!
//! let counter = NativeGameClass::new(GameClassRef::new("counter", "Counter"))
//!     .with_action("bump", |state, _user| {
//!         let n = state.get("count", 0);
//!         state.set("count", n + 1);
//!         Ok(())
//!     });
//!
//! let registry = NativeClassRegistry::new().with_class(counter);
//! assert!(registry.contains(&GameClassRef::new("counter", "Counter")));
//! ```

use std::sync::Arc;

use rustc_hash::FxHashMap;

use super::class_ref::GameClassRef;
use super::engine::{GameClass, GameClassLoader, RulesEngine};
use crate::board::BoardState;
use crate::core::{EngineError, EngineResult, PlayerIndex};

/// Handler for one named action.
pub type ActionHandler = Arc<dyn Fn(&mut BoardState, &str) -> EngineResult<()> + Send + Sync>;

/// Per-player markup hook.
pub type RenderHook = Arc<dyn Fn(&BoardState, PlayerIndex) -> Option<String> + Send + Sync>;

/// A rules engine class made of Rust closures.
#[derive(Clone)]
pub struct NativeGameClass {
    reference: GameClassRef,
    actions: FxHashMap<String, ActionHandler>,
    render: Option<RenderHook>,
}

impl NativeGameClass {
    /// Create a class with no actions.
    pub fn new(reference: GameClassRef) -> Self {
        Self {
            reference,
            actions: FxHashMap::default(),
            render: None,
        }
    }

    /// Register a named action. Replaces any handler with the same name.
    #[must_use]
    pub fn with_action(
        mut self,
        name: impl Into<String>,
        handler: impl Fn(&mut BoardState, &str) -> EngineResult<()> + Send + Sync + 'static,
    ) -> Self {
        self.actions.insert(name.into(), Arc::new(handler));
        self
    }

    /// Register a render hook.
    #[must_use]
    pub fn with_render(
        mut self,
        hook: impl Fn(&BoardState, PlayerIndex) -> Option<String> + Send + Sync + 'static,
    ) -> Self {
        self.render = Some(Arc::new(hook));
        self
    }

    /// Check whether an action exists.
    #[must_use]
    pub fn has_action(&self, name: &str) -> bool {
        self.actions.contains_key(name)
    }

    /// Registered action names, sorted.
    pub fn action_names(&self) -> Vec<&str> {
        let mut names: Vec<&str> = self.actions.keys().map(String::as_str).collect();
        names.sort_unstable();
        names
    }
}

impl std::fmt::Debug for NativeGameClass {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("NativeGameClass")
            .field("reference", &self.reference)
            .field("actions", &self.action_names())
            .field("render", &self.render.is_some())
            .finish()
    }
}

impl GameClass for NativeGameClass {
    fn reference(&self) -> &GameClassRef {
        &self.reference
    }

    fn instantiate<'a>(
        &'a self,
        state: &'a mut BoardState,
    ) -> EngineResult<Box<dyn RulesEngine + 'a>> {
        Ok(Box::new(NativeEngine { class: self, state }))
    }

    fn render_fragment(
        &self,
        state: &BoardState,
        player: PlayerIndex,
    ) -> EngineResult<Option<String>> {
        Ok(self.render.as_ref().and_then(|hook| hook(state, player)))
    }
}

/// Engine object of a native class.
struct NativeEngine<'a> {
    class: &'a NativeGameClass,
    state: &'a mut BoardState,
}

impl RulesEngine for NativeEngine<'_> {
    fn invoke(&mut self, action: &str, user_id: &str) -> EngineResult<()> {
        let class = self.class;
        let handler = class
            .actions
            .get(action)
            .ok_or_else(|| EngineError::UnknownAction {
                class: class.reference.to_string(),
                action: action.to_string(),
            })?;
        handler(&mut *self.state, user_id)
    }
}

/// Loader over a fixed set of native classes.
#[derive(Clone, Debug, Default)]
pub struct NativeClassRegistry {
    classes: FxHashMap<GameClassRef, Arc<NativeGameClass>>,
}

impl NativeClassRegistry {
    /// Create an empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a class, keyed by its reference.
    #[must_use]
    pub fn with_class(mut self, class: NativeGameClass) -> Self {
        self.register(class);
        self
    }

    /// Add a class, keyed by its reference. Replaces an existing entry.
    pub fn register(&mut self, class: NativeGameClass) {
        self.classes
            .insert(class.reference.clone(), Arc::new(class));
    }

    /// Check whether a reference resolves.
    #[must_use]
    pub fn contains(&self, reference: &GameClassRef) -> bool {
        self.classes.contains_key(reference)
    }

    /// Number of registered classes.
    #[must_use]
    pub fn len(&self) -> usize {
        self.classes.len()
    }

    /// Check if the registry is empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.classes.is_empty()
    }
}

impl GameClassLoader for NativeClassRegistry {
    fn load(&self, reference: &GameClassRef) -> EngineResult<Arc<dyn GameClass>> {
        match self.classes.get(reference) {
            Some(class) => {
                let class: Arc<dyn GameClass> = class.clone();
                Ok(class)
            }
            None => Err(EngineError::UnknownClass(reference.to_string())),
        }
    }
}
