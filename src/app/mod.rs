//! Toolkit-free state of the converter: the main form and the rate editor.

pub mod format;
pub mod main_view;
pub mod rate_editor;
