pub mod file_writer;
pub mod hyperlink;
pub mod processor;

pub use file_writer::FsFileWriter;
pub use hyperlink::SystemLinkOpener;
pub use processor::PassthroughProcessor;

use anyhow::Result;
use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::Path;

/// Performs the domain transformation on a submitted `(data, key)` pair.
#[async_trait]
pub trait RequestProcessor: Send + Sync {
    fn name(&self) -> &str;

    async fn handle(&self, data: &str, key: &str) -> Result<()>;
}

/// Performs the actual file write behind a confirmed save.
#[async_trait]
pub trait FileWriter: Send + Sync {
    async fn write_file(
        &self,
        file_name: &str,
        directory: &Path,
        payload: &str,
        mode: WriteMode,
    ) -> Result<()>;
}

/// Opens an external link for a fixed request category.
#[async_trait]
pub trait LinkOpener: Send + Sync {
    async fn open(&self, request: RequestType) -> Result<()>;
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum WriteMode {
    Overwrite,
    Append,
}

impl WriteMode {
    pub fn as_str(self) -> &'static str {
        match self {
            WriteMode::Overwrite => "overwrite",
            WriteMode::Append => "append",
        }
    }
}

impl fmt::Display for WriteMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RequestType {
    BugReport,
}

impl RequestType {
    pub fn display_name(self) -> &'static str {
        match self {
            RequestType::BugReport => "Report bug",
        }
    }
}
