pub mod file_dialog;
pub mod main_view;
