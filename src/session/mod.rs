//! Instance session: the aggregate root.
//!
//! An `Instance` owns the participants, configuration, board, rules engine
//! class and descriptor of one game, and exposes:
//! - `perform_action`: exclusive
//! - `render_markup` / `render_markup_all`: shared

pub mod builder;
pub mod instance;

pub use builder::InstanceBuilder;
pub use instance::Instance;
