//! Terminal presentation layer.
//!
//! Renders the orchestrator's state and turns key presses into commands.
//! It never mutates analysis state directly.

pub mod app;
pub mod events;
pub mod input;
pub mod render;
pub mod runtime;
pub mod terminal_guard;
pub mod theme;

pub use runtime::run;
