use anyhow::Result;
use chrono::{Local, NaiveDateTime};
use encryptorx_plugins::{FileWriter, LinkOpener, RequestProcessor, RequestType, WriteMode};
use std::path::PathBuf;
use std::sync::Arc;

use crate::error::CoreError;
use crate::fragment::build_log_fragment;
use crate::gate::{ControlId, ControlStates, FieldId, InputFields, InteractionGate, GATED_CONTROLS};
use crate::results::{CardAction, CardContent, CardId, ResultList};
use crate::save::{ExtensionFilter, SaveDialog, SaveRequest};
use crate::{APP_NAME, VERSION};

/// Collaborators the controller reaches out to.
#[derive(Clone)]
pub struct Collaborators {
    pub processor: Arc<dyn RequestProcessor>,
    pub writer: Arc<dyn FileWriter>,
    pub links: Arc<dyn LinkOpener>,
}

/// Outcome of activating a card button.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CardActionOutcome {
    SaveDialogOpened,
    CopyAcknowledged(CardId),
}

/// Owns the result list, the interaction gate and the open file dialog, and
/// runs every user operation against them.
pub struct ResultController {
    results: ResultList,
    gate: InteractionGate,
    controls: ControlStates,
    save_dialog: Option<SaveDialog>,
    extension_filter: ExtensionFilter,
    collaborators: Collaborators,
    clock: fn() -> NaiveDateTime,
}

fn local_now() -> NaiveDateTime {
    Local::now().naive_local()
}

impl ResultController {
    pub fn new(collaborators: Collaborators, extension_filter: ExtensionFilter) -> Self {
        Self {
            results: ResultList::new(),
            gate: InteractionGate::new(),
            controls: ControlStates::default(),
            save_dialog: None,
            extension_filter,
            collaborators,
            clock: local_now,
        }
    }

    pub fn with_clock(mut self, clock: fn() -> NaiveDateTime) -> Self {
        self.clock = clock;
        self
    }

    pub fn results(&self) -> &ResultList {
        &self.results
    }

    pub fn gate(&self) -> &InteractionGate {
        &self.gate
    }

    pub fn save_dialog(&self) -> Option<&SaveDialog> {
        self.save_dialog.as_ref()
    }

    pub fn extension_filter(&self) -> &ExtensionFilter {
        &self.extension_filter
    }

    pub fn is_enabled(&self, control: ControlId) -> bool {
        self.controls.is_enabled(control)
    }

    /// Recomputes one control's enablement from the gate and its required fields.
    pub fn compute_enablement(
        &mut self,
        required: &[FieldId],
        target: ControlId,
        fields: &InputFields,
    ) -> bool {
        let values: Vec<&str> = required.iter().map(|f| fields.value(*f)).collect();
        let enabled = self.gate.compute_enablement(&values);
        self.controls.set(target, enabled);
        enabled
    }

    /// Runs the enablement check for every gated control. Called once per
    /// main-loop iteration.
    pub fn refresh_enablement(&mut self, fields: &InputFields) {
        for (control, required) in GATED_CONTROLS {
            self.compute_enablement(required, *control, fields);
        }
    }

    /// Adds a card for `(data, key)`, runs the processing collaborator and
    /// populates the card with its display fields and actions.
    pub async fn prepare_result(&mut self, data: &str, key: &str) -> Result<CardId> {
        if data.is_empty() {
            return Err(CoreError::InvalidInput { field: "data" }.into());
        }
        if key.is_empty() {
            return Err(CoreError::InvalidInput { field: "key" }.into());
        }

        let _guard = self.gate.acquire()?;
        let id = self.results.add_result();

        self.collaborators.processor.handle(data, key).await?;
        let (new_data, new_key) = (data.to_string(), key.to_string());

        let created_at = (self.clock)();
        let fragment = build_log_fragment(APP_NAME, VERSION, created_at, &new_data, &new_key);
        self.results.populate(
            id,
            CardContent {
                key: new_key,
                data: new_data,
                created_at,
                save: CardAction::Save {
                    payload: fragment,
                    mode: WriteMode::Append,
                },
                copy: CardAction::Copy,
            },
        )?;

        tracing::info!(card = id, total = self.results.len(), "Result prepared");
        Ok(id)
    }

    pub fn clear_results(&mut self) -> Result<usize> {
        let removed = self.gate.run(|| Ok::<_, CoreError>(self.results.clear()))?;
        tracing::info!(removed, "Results cleared");
        Ok(removed)
    }

    /// Opens the file dialog for `payload`. The chosen path arrives later
    /// through [`confirm_save`](Self::confirm_save) or
    /// [`cancel_save`](Self::cancel_save).
    pub fn request_save(&mut self, payload: impl Into<String>, mode: WriteMode) -> Result<()> {
        let _guard = self.gate.acquire()?;
        if self.save_dialog.as_ref().is_some_and(SaveDialog::is_awaiting) {
            return Err(CoreError::GateBusy.into());
        }

        self.save_dialog = Some(SaveDialog::open(
            payload,
            mode,
            self.extension_filter.clone(),
        ));
        tracing::info!(mode = %mode, "Save dialog opened");
        Ok(())
    }

    /// Save menu entry: empty payload, overwrite.
    pub fn request_menu_save(&mut self) -> Result<()> {
        self.request_save(String::new(), WriteMode::Overwrite)
    }

    /// Completes the open dialog with the user's choice and hands the write to
    /// the persistence collaborator. The dialog closes once the write has been
    /// attempted; a rejected choice keeps it open.
    pub async fn confirm_save(
        &mut self,
        file_name: &str,
        directory: impl Into<PathBuf>,
    ) -> Result<SaveRequest> {
        let dialog = self.save_dialog.as_mut().ok_or(CoreError::NoSaveDialog)?;
        let request = dialog.confirm(file_name, directory)?;
        self.save_dialog = None;

        self.collaborators
            .writer
            .write_file(
                &request.file_name,
                &request.directory,
                &request.payload,
                request.mode,
            )
            .await?;

        tracing::info!(
            file = %request.file_name,
            directory = %request.directory.display(),
            mode = %request.mode,
            "Save request completed"
        );
        Ok(request)
    }

    pub fn cancel_save(&mut self) -> Result<()> {
        let mut dialog = self.save_dialog.take().ok_or(CoreError::NoSaveDialog)?;
        dialog.cancel()?;
        tracing::info!("Save dialog cancelled");
        Ok(())
    }

    /// Dispatches a card's save or copy button.
    pub fn perform_card_action(&mut self, id: CardId, save: bool) -> Result<CardActionOutcome> {
        let card = self.results.get(id).ok_or(CoreError::CardNotFound(id))?;
        let Some(content) = card.content() else {
            return Err(CoreError::CardNotFound(id).into());
        };

        let action = if save {
            content.save.clone()
        } else {
            content.copy.clone()
        };

        match action {
            CardAction::Save { payload, mode } => {
                self.request_save(payload, mode)?;
                Ok(CardActionOutcome::SaveDialogOpened)
            }
            CardAction::Copy => {
                tracing::info!(card = id, "Copy requested");
                Ok(CardActionOutcome::CopyAcknowledged(id))
            }
        }
    }

    pub async fn open_link(&self, request: RequestType) -> Result<()> {
        self.collaborators.links.open(request).await
    }
}
