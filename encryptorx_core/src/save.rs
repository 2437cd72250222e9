use anyhow::{Context, Result};
use encryptorx_plugins::WriteMode;
use serde::{Deserialize, Serialize};
use std::cmp::Ordering;
use std::fmt;
use std::path::{Path, PathBuf};

use crate::error::CoreError;

/// Everything the persistence collaborator needs for one write.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SaveRequest {
    pub file_name: String,
    pub directory: PathBuf,
    pub payload: String,
    pub mode: WriteMode,
}

/// File-name filter shown by the file dialog. `.*` accepts every file,
/// anything else is matched as a case-insensitive suffix.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub struct ExtensionFilter(String);

impl Default for ExtensionFilter {
    fn default() -> Self {
        Self::permissive()
    }
}

impl ExtensionFilter {
    pub const ANY: &'static str = ".*";

    pub fn new(pattern: impl Into<String>) -> Self {
        let pattern = pattern.into();
        let trimmed = pattern.trim();
        if trimmed.is_empty() {
            Self::permissive()
        } else {
            Self(trimmed.to_string())
        }
    }

    pub fn permissive() -> Self {
        Self(Self::ANY.to_string())
    }

    pub fn pattern(&self) -> &str {
        &self.0
    }

    pub fn accepts(&self, file_name: &str) -> bool {
        if self.0 == Self::ANY {
            return true;
        }
        file_name
            .to_lowercase()
            .ends_with(&self.0.to_lowercase())
    }
}

impl From<String> for ExtensionFilter {
    fn from(pattern: String) -> Self {
        Self::new(pattern)
    }
}

impl From<ExtensionFilter> for String {
    fn from(filter: ExtensionFilter) -> Self {
        filter.0
    }
}

impl fmt::Display for ExtensionFilter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SaveDialogState {
    AwaitingChoice,
    Completed,
    Cancelled,
}

/// A single file-selection interaction: opened with a payload and a write
/// mode, then resolved exactly once by a confirmation or a cancellation.
#[derive(Debug, Clone)]
pub struct SaveDialog {
    payload: String,
    mode: WriteMode,
    filter: ExtensionFilter,
    state: SaveDialogState,
}

impl SaveDialog {
    pub fn open(payload: impl Into<String>, mode: WriteMode, filter: ExtensionFilter) -> Self {
        Self {
            payload: payload.into(),
            mode,
            filter,
            state: SaveDialogState::AwaitingChoice,
        }
    }

    pub fn state(&self) -> &SaveDialogState {
        &self.state
    }

    pub fn mode(&self) -> WriteMode {
        self.mode
    }

    pub fn payload(&self) -> &str {
        &self.payload
    }

    pub fn filter(&self) -> &ExtensionFilter {
        &self.filter
    }

    pub fn is_awaiting(&self) -> bool {
        self.state == SaveDialogState::AwaitingChoice
    }

    /// Resolves the dialog with the user's choice and builds the request.
    /// A rejected choice leaves the dialog awaiting another decision.
    pub fn confirm(
        &mut self,
        file_name: &str,
        directory: impl Into<PathBuf>,
    ) -> Result<SaveRequest, CoreError> {
        if !self.is_awaiting() {
            return Err(CoreError::SaveDialogResolved);
        }

        let file_name = file_name.trim();
        if file_name.is_empty() {
            return Err(CoreError::EmptyFileName);
        }
        if !self.filter.accepts(file_name) {
            return Err(CoreError::RejectedByFilter {
                file_name: file_name.to_string(),
                filter: self.filter.to_string(),
            });
        }

        self.state = SaveDialogState::Completed;
        Ok(SaveRequest {
            file_name: file_name.to_string(),
            directory: directory.into(),
            payload: std::mem::take(&mut self.payload),
            mode: self.mode,
        })
    }

    pub fn cancel(&mut self) -> Result<(), CoreError> {
        if !self.is_awaiting() {
            return Err(CoreError::SaveDialogResolved);
        }
        self.state = SaveDialogState::Cancelled;
        Ok(())
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DirectoryEntry {
    pub name: String,
    pub is_dir: bool,
}

/// Lists `directory` for the file dialog: directories first, then the files
/// accepted by `filter`, each group sorted by name.
pub async fn browse_directory(
    directory: &Path,
    filter: &ExtensionFilter,
) -> Result<Vec<DirectoryEntry>> {
    let mut reader = tokio::fs::read_dir(directory)
        .await
        .with_context(|| format!("Could not read {}", directory.display()))?;

    let mut entries = Vec::new();
    while let Some(entry) = reader.next_entry().await? {
        let name = entry.file_name().to_string_lossy().to_string();
        let is_dir = entry
            .file_type()
            .await
            .map(|t| t.is_dir())
            .unwrap_or(false);
        if is_dir || filter.accepts(&name) {
            entries.push(DirectoryEntry { name, is_dir });
        }
    }

    entries.sort_by(|a, b| match (a.is_dir, b.is_dir) {
        (true, false) => Ordering::Less,
        (false, true) => Ordering::Greater,
        _ => a.name.to_lowercase().cmp(&b.name.to_lowercase()),
    });
    Ok(entries)
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn permissive_filter_accepts_everything() {
        let filter = ExtensionFilter::default();
        assert!(filter.accepts("out.txt"));
        assert!(filter.accepts("Makefile"));
    }

    #[test]
    fn suffix_filter_is_case_insensitive() {
        let filter = ExtensionFilter::new(".log");
        assert!(filter.accepts("session.LOG"));
        assert!(!filter.accepts("session.txt"));
    }

    #[test]
    fn blank_filter_falls_back_to_permissive() {
        assert_eq!(ExtensionFilter::new("  "), ExtensionFilter::permissive());
    }

    #[test]
    fn confirm_builds_request_once() {
        let mut dialog = SaveDialog::open("X", WriteMode::Append, ExtensionFilter::default());
        let request = dialog.confirm("out.txt", "/tmp").unwrap();
        assert_eq!(
            request,
            SaveRequest {
                file_name: "out.txt".to_string(),
                directory: PathBuf::from("/tmp"),
                payload: "X".to_string(),
                mode: WriteMode::Append,
            }
        );
        assert_eq!(dialog.state(), &SaveDialogState::Completed);
        assert_eq!(
            dialog.confirm("again.txt", "/tmp").unwrap_err(),
            CoreError::SaveDialogResolved
        );
        assert_eq!(dialog.cancel().unwrap_err(), CoreError::SaveDialogResolved);
    }

    #[test]
    fn cancel_resolves_without_request() {
        let mut dialog = SaveDialog::open("X", WriteMode::Overwrite, ExtensionFilter::default());
        dialog.cancel().unwrap();
        assert_eq!(dialog.state(), &SaveDialogState::Cancelled);
        assert_eq!(
            dialog.confirm("out.txt", "/tmp").unwrap_err(),
            CoreError::SaveDialogResolved
        );
    }

    #[test]
    fn rejected_choice_keeps_dialog_open() {
        let mut dialog = SaveDialog::open("X", WriteMode::Append, ExtensionFilter::new(".log"));
        assert!(matches!(
            dialog.confirm("out.txt", "/tmp"),
            Err(CoreError::RejectedByFilter { .. })
        ));
        assert_eq!(dialog.confirm(" ", "/tmp").unwrap_err(), CoreError::EmptyFileName);
        assert!(dialog.is_awaiting());
        assert!(dialog.confirm("out.log", "/tmp").is_ok());
    }

    #[tokio::test]
    async fn browse_lists_directories_first_and_applies_filter() {
        let tmp = tempdir().unwrap();
        tokio::fs::create_dir(tmp.path().join("zeta")).await.unwrap();
        tokio::fs::write(tmp.path().join("b.log"), "").await.unwrap();
        tokio::fs::write(tmp.path().join("a.log"), "").await.unwrap();
        tokio::fs::write(tmp.path().join("c.txt"), "").await.unwrap();

        let entries = browse_directory(tmp.path(), &ExtensionFilter::new(".log"))
            .await
            .unwrap();
        let names: Vec<&str> = entries.iter().map(|e| e.name.as_str()).collect();
        assert_eq!(names, vec!["zeta", "a.log", "b.log"]);
        assert!(entries[0].is_dir);
    }

    #[tokio::test]
    async fn browse_missing_directory_fails() {
        let tmp = tempdir().unwrap();
        assert!(browse_directory(&tmp.path().join("nope"), &ExtensionFilter::default())
            .await
            .is_err());
    }
}
