use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Paragraph},
    Frame,
};

use crate::app::file_dialog::{DialogAction, DialogField, DialogHitbox, FileDialogView};
use crate::app::state::App;
use crate::theme::Theme;
use crate::ui::main_view::render_multiline_prompt;

const CONFIRM_LABEL: &str = "[SAVE]";
const CANCEL_LABEL: &str = "[CANCEL]";

/// Centers a `percent_x` by `percent_y` box in `area`, never smaller than the
/// given minimums (clamped to `area`).
pub fn centered_rect(area: Rect, percent_x: u16, percent_y: u16, min_w: u16, min_h: u16) -> Rect {
    let scale = |len: u16, percent: u16, min: u16| -> u16 {
        let scaled = u32::from(len) * u32::from(percent) / 100;
        u16::try_from(scaled).unwrap_or(u16::MAX).max(min).min(len)
    };
    let width = scale(area.width, percent_x, min_w);
    let height = scale(area.height, percent_y, min_h);
    Rect::new(
        area.x + (area.width - width) / 2,
        area.y + (area.height - height) / 2,
        width,
        height,
    )
}

pub fn render_file_dialog(f: &mut Frame, app: &mut App, area: Rect) {
    let theme = app.theme.clone();
    let tick = app.tick_count;
    let Some(view) = app.file_dialog.as_mut() else {
        return;
    };

    let rect = centered_rect(area, 70, 70, 40, 16);
    f.render_widget(Clear, rect);
    let outer = Block::default()
        .borders(Borders::ALL)
        .border_style(theme.focused_border_style)
        .style(theme.base_style)
        .title(format!(" SAVE ({}) ", view.mode));
    let inner = outer.inner(rect);
    f.render_widget(outer, rect);

    let rows = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3),
            Constraint::Min(3),
            Constraint::Length(3),
            Constraint::Length(1),
            Constraint::Length(1),
        ])
        .split(inner);

    view.hitboxes.clear();
    let blink = (tick / 4) % 2 == 0;

    view.directory_rect = Some(render_field(
        f,
        &theme,
        rows[0],
        " DIRECTORY ",
        &view.directory.text,
        view.directory.cursor,
        view.field == DialogField::Directory,
        blink,
    ));
    render_entries(f, &theme, view, rows[1]);
    view.file_name_rect = Some(render_field(
        f,
        &theme,
        rows[2],
        " FILE NAME ",
        &view.file_name.text,
        view.file_name.cursor,
        view.field == DialogField::FileName,
        blink,
    ));

    let status = match &view.error {
        Some(err) => Line::from(Span::styled(format!(" {}", err), theme.error_style)),
        None => Line::from(vec![
            Span::styled(" FILTER: ", theme.footer_text_style),
            Span::styled(view.filter.to_string(), theme.footer_highlight_style),
        ]),
    };
    f.render_widget(Paragraph::new(status), rows[3]);

    render_dialog_buttons(f, &theme, view, rows[4]);
}

#[allow(clippy::too_many_arguments)]
fn render_field(
    f: &mut Frame,
    theme: &Theme,
    area: Rect,
    title: &'static str,
    text: &str,
    cursor: usize,
    focused: bool,
    blink: bool,
) -> Rect {
    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(if focused {
            theme.focused_border_style
        } else {
            theme.border_style
        })
        .title(title);
    let inner = block.inner(area);
    let lines = render_multiline_prompt(
        text,
        Span::raw(""),
        Span::raw(""),
        theme.input_text_style,
        Some(theme.input_cursor_style),
        focused && blink,
        Some(cursor),
    );
    f.render_widget(Paragraph::new(lines).block(block), area);
    inner
}

fn render_entries(f: &mut Frame, theme: &Theme, view: &mut FileDialogView, area: Rect) {
    let focused = view.field == DialogField::Entries;
    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(if focused {
            theme.focused_border_style
        } else {
            theme.border_style
        })
        .title(" FILES ");
    let inner = block.inner(area);
    f.render_widget(block, area);

    view.clamp_scroll(inner.height as usize);
    let visible = view
        .entries
        .iter()
        .enumerate()
        .skip(view.entries_scroll)
        .take(inner.height as usize);

    for (offset, (idx, entry)) in visible.enumerate() {
        let row = Rect::new(inner.x, inner.y + offset as u16, inner.width, 1);
        let label = if entry.is_dir {
            format!(" {}/", entry.name)
        } else {
            format!(" {}", entry.name)
        };
        let style = if idx == view.selected && focused {
            theme.button_focused_style
        } else if idx == view.selected {
            theme.footer_highlight_style
        } else if entry.is_dir {
            theme.card_id_style
        } else {
            theme.card_value_style
        };
        f.render_widget(Paragraph::new(label).style(style), row);
        view.hitboxes.push(DialogHitbox {
            rect: row,
            action: DialogAction::Entry(idx),
        });
    }
}

fn render_dialog_buttons(f: &mut Frame, theme: &Theme, view: &mut FileDialogView, area: Rect) {
    let focused = view.field == DialogField::Buttons;
    let mut x = area.x + 1;
    for (idx, (label, action)) in [
        (CONFIRM_LABEL, DialogAction::Confirm),
        (CANCEL_LABEL, DialogAction::Cancel),
    ]
    .into_iter()
    .enumerate()
    {
        let width = label.len() as u16;
        if x + width > area.x + area.width {
            break;
        }
        let rect = Rect::new(x, area.y, width, 1);
        let style = if focused && view.button_focus == idx {
            theme.button_focused_style
        } else {
            theme.button_style
        };
        f.render_widget(Paragraph::new(label).style(style), rect);
        view.hitboxes.push(DialogHitbox { rect, action });
        x += width + 1;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn centered_rect_respects_minimums_and_bounds() {
        let area = Rect::new(0, 0, 100, 40);
        let rect = centered_rect(area, 50, 50, 10, 10);
        assert_eq!(rect, Rect::new(25, 10, 50, 20));

        let small = Rect::new(0, 0, 30, 12);
        let rect = centered_rect(small, 70, 70, 40, 16);
        assert_eq!(rect, small);
    }

    #[test]
    fn centered_rect_handles_wide_terminals() {
        let area = Rect::new(0, 0, 1000, 50);
        let rect = centered_rect(area, 70, 70, 40, 16);
        assert_eq!(rect, Rect::new(150, 7, 700, 35));

        let huge = Rect::new(0, 0, u16::MAX, u16::MAX);
        let rect = centered_rect(huge, 100, 100, 0, 0);
        assert_eq!(rect, huge);
    }
}
