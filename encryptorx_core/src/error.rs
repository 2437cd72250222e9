use thiserror::Error;

use crate::results::CardId;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum CoreError {
    #[error("Input field '{field}' is empty")]
    InvalidInput { field: &'static str },

    #[error("Another operation is already in progress")]
    GateBusy,

    #[error("Result #{0} does not exist")]
    CardNotFound(CardId),

    #[error("Result #{0} already has content")]
    CardAlreadyPopulated(CardId),

    #[error("No file dialog is open")]
    NoSaveDialog,

    #[error("The file dialog has already been resolved")]
    SaveDialogResolved,

    #[error("File name is empty")]
    EmptyFileName,

    #[error("File '{file_name}' does not match the filter '{filter}'")]
    RejectedByFilter { file_name: String, filter: String },
}
