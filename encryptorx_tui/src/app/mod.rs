pub mod actions;
pub mod editor;
pub mod file_dialog;
pub mod runtime;
pub mod state;
