use encryptorx_core::{browse_directory, DirectoryEntry, ExtensionFilter};
use encryptorx_plugins::WriteMode;
use ratatui::layout::Rect;
use std::path::{Path, PathBuf};

use crate::app::editor::TextField;

pub const PARENT_ENTRY: &str = "..";

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum DialogField {
    Directory,
    Entries,
    FileName,
    Buttons,
}

impl DialogField {
    pub fn next(self) -> Self {
        match self {
            DialogField::Directory => DialogField::Entries,
            DialogField::Entries => DialogField::FileName,
            DialogField::FileName => DialogField::Buttons,
            DialogField::Buttons => DialogField::Directory,
        }
    }

    pub fn previous(self) -> Self {
        match self {
            DialogField::Directory => DialogField::Buttons,
            DialogField::Entries => DialogField::Directory,
            DialogField::FileName => DialogField::Entries,
            DialogField::Buttons => DialogField::FileName,
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum DialogAction {
    Confirm,
    Cancel,
    Entry(usize),
}

#[derive(Clone, Debug)]
pub struct DialogHitbox {
    pub rect: Rect,
    pub action: DialogAction,
}

/// On-screen state of the modal file-selection surface. The pending save
/// itself lives in the controller; this only tracks what the user is editing.
#[derive(Debug, Clone)]
pub struct FileDialogView {
    pub directory: TextField,
    pub file_name: TextField,
    pub entries: Vec<DirectoryEntry>,
    pub selected: usize,
    pub entries_scroll: usize,
    pub field: DialogField,
    pub button_focus: usize,
    pub filter: ExtensionFilter,
    pub mode: WriteMode,
    pub error: Option<String>,
    pub hitboxes: Vec<DialogHitbox>,
    pub directory_rect: Option<Rect>,
    pub file_name_rect: Option<Rect>,
}

impl FileDialogView {
    pub fn new(start_directory: &Path, filter: ExtensionFilter, mode: WriteMode) -> Self {
        Self {
            directory: TextField::single_line().with_text(start_directory.display().to_string()),
            file_name: TextField::single_line(),
            entries: Vec::new(),
            selected: 0,
            entries_scroll: 0,
            field: DialogField::FileName,
            button_focus: 0,
            filter,
            mode,
            error: None,
            hitboxes: Vec::new(),
            directory_rect: None,
            file_name_rect: None,
        }
    }

    pub fn directory_path(&self) -> PathBuf {
        PathBuf::from(self.directory.text.trim())
    }

    /// Re-reads the current directory. A listing failure is kept on screen
    /// rather than closing the dialog.
    pub async fn reload(&mut self) {
        let dir = self.directory_path();
        let mut entries = Vec::new();
        if dir.parent().is_some() {
            entries.push(DirectoryEntry {
                name: PARENT_ENTRY.to_string(),
                is_dir: true,
            });
        }

        match browse_directory(&dir, &self.filter).await {
            Ok(listing) => {
                entries.extend(listing);
                self.error = None;
            }
            Err(e) => {
                tracing::debug!(directory = %dir.display(), "Directory listing failed: {}", e);
                self.error = Some(e.to_string());
            }
        }

        self.entries = entries;
        self.selected = 0;
        self.entries_scroll = 0;
    }

    pub fn move_selection(&mut self, delta: isize) {
        if self.entries.is_empty() {
            self.selected = 0;
            return;
        }
        let last = self.entries.len() - 1;
        self.selected = self.selected.saturating_add_signed(delta).min(last);
    }

    /// Opens a directory entry or copies a file entry into the name field.
    pub async fn activate_entry(&mut self, idx: usize) {
        let Some(entry) = self.entries.get(idx).cloned() else {
            return;
        };
        self.selected = idx;

        if entry.is_dir {
            let current = self.directory_path();
            let next = if entry.name == PARENT_ENTRY {
                current
                    .parent()
                    .map(Path::to_path_buf)
                    .unwrap_or(current)
            } else {
                current.join(&entry.name)
            };
            self.directory.set_text(next.display().to_string());
            self.reload().await;
        } else {
            self.file_name.set_text(entry.name);
            self.field = DialogField::FileName;
        }
    }

    pub fn focused_text_field(&mut self) -> Option<&mut TextField> {
        match self.field {
            DialogField::Directory => Some(&mut self.directory),
            DialogField::FileName => Some(&mut self.file_name),
            DialogField::Entries | DialogField::Buttons => None,
        }
    }

    /// Keeps the selected entry inside a list viewport of `height` rows.
    pub fn clamp_scroll(&mut self, height: usize) {
        if height == 0 {
            return;
        }
        if self.selected < self.entries_scroll {
            self.entries_scroll = self.selected;
        } else if self.selected >= self.entries_scroll + height {
            self.entries_scroll = self.selected + 1 - height;
        }
    }
}
