//! Rules engine binding.
//!
//! Games supply their rules as a class referenced by `module:class`:
//! - `GameClassRef` parses the reference
//! - `GameClassLoader` resolves it (native registry, or Python with the
//!   `python` feature)
//! - `GameClass` builds a fresh `RulesEngine` for every action
//!
//! The session calls into these traits but never interprets game-specific
//! concepts directly.

pub mod class_ref;
pub mod engine;
pub mod native;

pub use class_ref::GameClassRef;
pub use engine::{GameClass, GameClassLoader, RulesEngine};
pub use native::{ActionHandler, NativeClassRegistry, NativeGameClass, RenderHook};
