pub use config::{Config, LinkSettings, SaveSettings};
pub use controller::{CardActionOutcome, Collaborators, ResultController};
pub use error::CoreError;
pub use fragment::build_log_fragment;
pub use gate::{ControlId, FieldId, GateGuard, InputFields, InteractionGate};
pub use results::{CardAction, CardContent, CardId, CardState, ResultCard, ResultList};
pub use save::{browse_directory, DirectoryEntry, ExtensionFilter, SaveDialog, SaveRequest};

pub mod config;
pub mod controller;
pub mod error;
pub mod fragment;
pub mod gate;
pub mod results;
pub mod save;

pub const APP_NAME: &str = "EncryptorX";
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
