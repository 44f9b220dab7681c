//! Terminal front end: turns typed lines into main-view and rate-editor
//! commands.

pub mod commands;
pub mod terminal;

pub use terminal::{Console, Session};
