use anyhow::Result;
use crossterm::event::{
    self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers, MouseButton, MouseEvent,
    MouseEventKind,
};
use ratatui::backend::CrosstermBackend;
use ratatui::Terminal;
use std::io::Stdout;
use std::time::Duration;

use crate::app::actions::{cancel_file_dialog, confirm_file_dialog, perform_action};
use crate::app::editor::{point_in_rect, TextField};
use crate::app::file_dialog::{DialogAction, DialogField};
use crate::app::state::{App, FocusArea, UiAction};
use crate::ui::main_view::{ui, INPUT_PREFIX_WIDTH};

const POLL_MS: u64 = 200;

/// Main loop: enablement pass, redraw, then at most one input event per tick.
/// Returns when the window is closed.
pub async fn run_app(
    terminal: &mut Terminal<CrosstermBackend<Stdout>>,
    app: &mut App,
) -> Result<()> {
    loop {
        app.tick_count += 1;
        app.refresh_enablement();

        terminal.draw(|f| ui(f, app))?;

        if event::poll(Duration::from_millis(POLL_MS))? {
            handle_runtime_event(app, event::read()?).await?;
        }

        if app.should_quit {
            tracing::info!(results = app.controller.results().len(), "Window closed");
            return Ok(());
        }
    }
}

pub async fn handle_runtime_event(app: &mut App, event: Event) -> Result<()> {
    match event {
        Event::Key(key) if key.kind == KeyEventKind::Press => {
            if app.file_dialog.is_some() {
                handle_dialog_key(app, key).await
            } else {
                handle_key_event(app, key).await
            }
        }
        Event::Paste(text) => {
            handle_paste(app, &text);
            Ok(())
        }
        Event::Mouse(mouse) => {
            if app.file_dialog.is_some() {
                handle_dialog_mouse(app, mouse).await
            } else {
                handle_mouse_event(app, mouse).await
            }
        }
        _ => Ok(()),
    }
}

fn focused_field(app: &mut App) -> Option<&mut TextField> {
    match app.focus {
        FocusArea::Text => Some(&mut app.text),
        FocusArea::Key => Some(&mut app.key),
        _ => None,
    }
}

fn edit_field(field: &mut TextField, key: KeyEvent) -> bool {
    match key.code {
        KeyCode::Char(c) => field.insert(c),
        KeyCode::Backspace => field.backspace(),
        KeyCode::Delete => field.delete(),
        KeyCode::Left => field.move_left(),
        KeyCode::Right => field.move_right(),
        KeyCode::Up => field.move_up(),
        KeyCode::Down => field.move_down(),
        KeyCode::Home => field.move_line_start(),
        KeyCode::End => field.move_line_end(),
        _ => return false,
    }
    true
}

async fn handle_key_event(app: &mut App, key: KeyEvent) -> Result<()> {
    if key.code == KeyCode::Char('c') && key.modifiers.contains(KeyModifiers::CONTROL) {
        app.should_quit = true;
        return Ok(());
    }

    match key.code {
        KeyCode::Esc => {
            app.should_quit = true;
            return Ok(());
        }
        KeyCode::Tab => {
            app.set_focus(app.focus.next());
            return Ok(());
        }
        KeyCode::BackTab => {
            app.set_focus(app.focus.previous());
            return Ok(());
        }
        _ => {}
    }

    match app.focus {
        FocusArea::Text => match key.code {
            KeyCode::Enter => app.text.insert('\n'),
            _ => {
                edit_field(&mut app.text, key);
            }
        },
        FocusArea::Key => match key.code {
            KeyCode::Enter => perform_action(app, UiAction::Process).await?,
            _ => {
                edit_field(&mut app.key, key);
            }
        },
        FocusArea::Menu | FocusArea::Buttons | FocusArea::Results => match key.code {
            KeyCode::Left => app.cycle_button_focus(false),
            KeyCode::Right => app.cycle_button_focus(true),
            KeyCode::Up if app.focus == FocusArea::Results => {
                app.results_scroll = app.results_scroll.saturating_sub(1);
            }
            KeyCode::Down if app.focus == FocusArea::Results => {
                app.results_scroll = app
                    .results_scroll
                    .saturating_add(1)
                    .min(app.results_max_scroll);
            }
            KeyCode::PageUp => {
                app.results_scroll = app.results_scroll.saturating_sub(10);
            }
            KeyCode::PageDown => {
                app.results_scroll = app
                    .results_scroll
                    .saturating_add(10)
                    .min(app.results_max_scroll);
            }
            KeyCode::Enter | KeyCode::Char(' ') => {
                if let Some(action) = app.focused_action() {
                    perform_action(app, action).await?;
                }
            }
            _ => {}
        },
    }

    Ok(())
}

async fn handle_dialog_key(app: &mut App, key: KeyEvent) -> Result<()> {
    if key.code == KeyCode::Esc
        || (key.code == KeyCode::Char('c') && key.modifiers.contains(KeyModifiers::CONTROL))
    {
        cancel_file_dialog(app);
        return Ok(());
    }

    let Some(view) = app.file_dialog.as_mut() else {
        return Ok(());
    };

    match key.code {
        KeyCode::Tab => {
            view.field = view.field.next();
            return Ok(());
        }
        KeyCode::BackTab => {
            view.field = view.field.previous();
            return Ok(());
        }
        _ => {}
    }

    let field = view.field;
    match field {
        DialogField::Directory => match key.code {
            KeyCode::Enter => view.reload().await,
            _ => {
                edit_field(&mut view.directory, key);
            }
        },
        DialogField::Entries => match key.code {
            KeyCode::Up => view.move_selection(-1),
            KeyCode::Down => view.move_selection(1),
            KeyCode::PageUp => view.move_selection(-10),
            KeyCode::PageDown => view.move_selection(10),
            KeyCode::Enter | KeyCode::Char(' ') => {
                let idx = view.selected;
                view.activate_entry(idx).await;
            }
            _ => {}
        },
        DialogField::FileName => match key.code {
            KeyCode::Enter => confirm_file_dialog(app).await,
            _ => {
                edit_field(&mut view.file_name, key);
            }
        },
        DialogField::Buttons => match key.code {
            KeyCode::Left | KeyCode::Right => view.button_focus = 1 - view.button_focus.min(1),
            KeyCode::Enter | KeyCode::Char(' ') => {
                if view.button_focus == 0 {
                    confirm_file_dialog(app).await;
                } else {
                    cancel_file_dialog(app);
                }
            }
            _ => {}
        },
    }

    Ok(())
}

fn handle_paste(app: &mut App, text: &str) {
    if let Some(view) = app.file_dialog.as_mut() {
        if let Some(field) = view.focused_text_field() {
            field.insert_str(text);
        }
        return;
    }
    if let Some(field) = focused_field(app) {
        field.insert_str(text);
    }
}

async fn handle_mouse_event(app: &mut App, mouse: MouseEvent) -> Result<()> {
    match mouse.kind {
        MouseEventKind::ScrollUp => {
            app.results_scroll = app.results_scroll.saturating_sub(3);
        }
        MouseEventKind::ScrollDown => {
            app.results_scroll = app
                .results_scroll
                .saturating_add(3)
                .min(app.results_max_scroll);
        }
        MouseEventKind::Down(MouseButton::Left) => {
            let clicked = app
                .buttons
                .iter()
                .find(|b| point_in_rect(b.rect, mouse.column, mouse.row))
                .map(|b| (b.action, b.enabled));
            if let Some((action, enabled)) = clicked {
                if !enabled {
                    return Ok(());
                }
                app.focus_button(action);
                return perform_action(app, action).await;
            }

            if let Some(area) = app.text_rect {
                if point_in_rect(area, mouse.column, mouse.row) {
                    app.set_focus(FocusArea::Text);
                    let row = mouse.row.saturating_add(app.text_scroll);
                    app.text
                        .set_cursor_from_click(area, mouse.column, row, INPUT_PREFIX_WIDTH);
                    return Ok(());
                }
            }
            if let Some(area) = app.key_rect {
                if point_in_rect(area, mouse.column, mouse.row) {
                    app.set_focus(FocusArea::Key);
                    app.key
                        .set_cursor_from_click(area, mouse.column, mouse.row, INPUT_PREFIX_WIDTH);
                    return Ok(());
                }
            }
            if let Some(area) = app.results_rect {
                if point_in_rect(area, mouse.column, mouse.row) {
                    app.set_focus(FocusArea::Results);
                }
            }
        }
        _ => {}
    }

    Ok(())
}

async fn handle_dialog_mouse(app: &mut App, mouse: MouseEvent) -> Result<()> {
    let Some(view) = app.file_dialog.as_mut() else {
        return Ok(());
    };

    match mouse.kind {
        MouseEventKind::ScrollUp => view.move_selection(-3),
        MouseEventKind::ScrollDown => view.move_selection(3),
        MouseEventKind::Down(MouseButton::Left) => {
            let clicked = view
                .hitboxes
                .iter()
                .find(|h| point_in_rect(h.rect, mouse.column, mouse.row))
                .map(|h| h.action);

            match clicked {
                Some(DialogAction::Confirm) => confirm_file_dialog(app).await,
                Some(DialogAction::Cancel) => cancel_file_dialog(app),
                Some(DialogAction::Entry(idx)) => {
                    view.field = DialogField::Entries;
                    view.activate_entry(idx).await;
                }
                None => {
                    if let Some(area) = view.directory_rect {
                        if point_in_rect(area, mouse.column, mouse.row) {
                            view.field = DialogField::Directory;
                            view.directory
                                .set_cursor_from_click(area, mouse.column, mouse.row, 0);
                        }
                    }
                    if let Some(area) = view.file_name_rect {
                        if point_in_rect(area, mouse.column, mouse.row) {
                            view.field = DialogField::FileName;
                            view.file_name
                                .set_cursor_from_click(area, mouse.column, mouse.row, 0);
                        }
                    }
                }
            }
        }
        _ => {}
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::app::state::tests::test_app;
    use crossterm::event::KeyEventState;

    fn press(code: KeyCode) -> Event {
        Event::Key(KeyEvent {
            code,
            modifiers: KeyModifiers::NONE,
            kind: KeyEventKind::Press,
            state: KeyEventState::NONE,
        })
    }

    fn ctrl(c: char) -> Event {
        Event::Key(KeyEvent {
            code: KeyCode::Char(c),
            modifiers: KeyModifiers::CONTROL,
            kind: KeyEventKind::Press,
            state: KeyEventState::NONE,
        })
    }

    async fn type_str(app: &mut App, text: &str) {
        for c in text.chars() {
            handle_runtime_event(app, press(KeyCode::Char(c))).await.unwrap();
        }
    }

    #[tokio::test]
    async fn typing_then_enter_in_key_field_processes() {
        let mut app = test_app();
        type_str(&mut app, "hello").await;
        handle_runtime_event(&mut app, press(KeyCode::Tab)).await.unwrap();
        assert_eq!(app.focus, FocusArea::Key);
        type_str(&mut app, "k1").await;
        app.refresh_enablement();

        handle_runtime_event(&mut app, press(KeyCode::Enter)).await.unwrap();
        assert_eq!(app.controller.results().len(), 1);
        assert_eq!(app.text.text, "hello");
        assert_eq!(app.key.text, "k1");
    }

    #[tokio::test]
    async fn enter_in_text_field_inserts_newline() {
        let mut app = test_app();
        type_str(&mut app, "a").await;
        handle_runtime_event(&mut app, press(KeyCode::Enter)).await.unwrap();
        type_str(&mut app, "b").await;
        assert_eq!(app.text.text, "a\nb");
        assert!(app.controller.results().is_empty());
    }

    #[tokio::test]
    async fn escape_and_ctrl_c_close_window() {
        let mut app = test_app();
        handle_runtime_event(&mut app, press(KeyCode::Esc)).await.unwrap();
        assert!(app.should_quit);

        let mut app = test_app();
        handle_runtime_event(&mut app, ctrl('c')).await.unwrap();
        assert!(app.should_quit);
    }

    #[tokio::test]
    async fn escape_in_dialog_cancels_instead_of_quitting() {
        let mut app = test_app();
        perform_action(&mut app, UiAction::SaveMenu).await.unwrap();
        assert!(app.file_dialog.is_some());

        handle_runtime_event(&mut app, press(KeyCode::Esc)).await.unwrap();
        assert!(app.file_dialog.is_none());
        assert!(app.controller.save_dialog().is_none());
        assert!(!app.should_quit);
    }

    #[tokio::test]
    async fn paste_goes_to_focused_field() {
        let mut app = test_app();
        app.set_focus(FocusArea::Key);
        handle_runtime_event(&mut app, Event::Paste("pasted\nkey".to_string()))
            .await
            .unwrap();
        assert_eq!(app.key.text, "pastedkey");
        assert!(app.text.text.is_empty());
    }
}
