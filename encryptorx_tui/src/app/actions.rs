use anyhow::Result;
use encryptorx_core::{CardActionOutcome, CoreError};
use encryptorx_plugins::RequestType;

use crate::app::file_dialog::FileDialogView;
use crate::app::state::{App, FocusArea, UiAction};

/// Runs the operation bound to a control. Disabled controls are ignored and
/// operation failures land in the status log so the loop keeps running.
pub async fn perform_action(app: &mut App, action: UiAction) -> Result<()> {
    if !app.is_action_enabled(action) {
        tracing::debug!(action = ?action, "Ignoring disabled control");
        return Ok(());
    }

    match action {
        UiAction::OpenFile => {
            tracing::info!("Open file requested");
            app.push_log("Open file is not available yet.");
        }
        UiAction::SaveMenu => match app.controller.request_menu_save() {
            Ok(()) => open_file_dialog(app).await,
            Err(e) => app.report_error("Save", &e),
        },
        UiAction::ToggleFullScreen => {
            app.full_screen = !app.full_screen;
            app.push_log(format!(
                "Full screen: {}",
                if app.full_screen { "ON" } else { "OFF" }
            ));
        }
        UiAction::ReportBug => match app.controller.open_link(RequestType::BugReport).await {
            Ok(()) => app.push_log(format!("Opened: {}", RequestType::BugReport.display_name())),
            Err(e) => app.report_error(RequestType::BugReport.display_name(), &e),
        },
        UiAction::Process => {
            let fields = app.input_fields();
            match app.controller.prepare_result(&fields.text, &fields.key).await {
                Ok(id) => {
                    app.results_scroll = 0;
                    app.push_log(format!("Result #{} ready", id));
                }
                Err(e) => app.report_error("Process", &e),
            }
        }
        UiAction::ClearAll => match app.controller.clear_results() {
            Ok(removed) => {
                app.results_scroll = 0;
                if app.focus == FocusArea::Results {
                    app.set_focus(FocusArea::Buttons);
                }
                app.push_log(format!("Cleared {} result(s)", removed));
            }
            Err(e) => app.report_error("Clear", &e),
        },
        UiAction::CardSave(id) => match app.controller.perform_card_action(id, true) {
            Ok(_) => open_file_dialog(app).await,
            Err(e) => app.report_error("Save", &e),
        },
        UiAction::CardCopy(id) => match app.controller.perform_card_action(id, false) {
            Ok(CardActionOutcome::CopyAcknowledged(id)) => {
                app.push_log(format!("Copy requested for result #{}", id));
            }
            Ok(CardActionOutcome::SaveDialogOpened) => open_file_dialog(app).await,
            Err(e) => app.report_error("Copy", &e),
        },
    }

    Ok(())
}

/// Shows the file-selection surface for the dialog the controller just opened.
async fn open_file_dialog(app: &mut App) {
    let Some(dialog) = app.controller.save_dialog() else {
        return;
    };
    let mut view = FileDialogView::new(
        &app.config.save.start_directory(),
        dialog.filter().clone(),
        dialog.mode(),
    );
    view.reload().await;
    app.push_log(format!("Choose a file ({})", view.mode));
    app.file_dialog = Some(view);
}

pub async fn confirm_file_dialog(app: &mut App) {
    let Some(view) = app.file_dialog.as_ref() else {
        return;
    };
    let file_name = view.file_name.text.trim().to_string();
    let directory = view.directory_path();

    match app.controller.confirm_save(&file_name, directory).await {
        Ok(request) => {
            app.file_dialog = None;
            app.push_log(format!(
                "Saved to {} ({})",
                request.directory.join(&request.file_name).display(),
                request.mode
            ));
        }
        Err(e) => {
            if app.controller.save_dialog().is_none() {
                app.file_dialog = None;
                app.report_error("Save", &e);
            } else if let Some(view) = app.file_dialog.as_mut() {
                view.error = Some(e.to_string());
            }
        }
    }
}

pub fn cancel_file_dialog(app: &mut App) {
    app.file_dialog = None;
    match app.controller.cancel_save() {
        Ok(()) => app.push_log("Save cancelled"),
        Err(e) if matches!(e.downcast_ref::<CoreError>(), Some(CoreError::NoSaveDialog)) => {}
        Err(e) => app.report_error("Cancel", &e),
    }
}
