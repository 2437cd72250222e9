use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::Style,
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
    Frame,
};

use encryptorx_core::fragment::TIMESTAMP_FORMAT;
use encryptorx_core::{CardId, CardState, ResultList, VERSION};

use crate::app::editor::split_line_at_char;
use crate::app::state::{ActionButton, App, FocusArea, UiAction};
use crate::theme::Theme;
use crate::ui::file_dialog::render_file_dialog;

pub const INPUT_PREFIX_WIDTH: usize = 3;
const CARD_BUTTON_INDENT: u16 = 2;
const SAVE_LABEL: &str = "[SAVE]";
const COPY_LABEL: &str = "[COPY]";

/// Screen regions of the main window. Header and footer are hidden in full
/// screen mode.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MainLayout {
    pub menu: Rect,
    pub header: Option<Rect>,
    pub text: Rect,
    pub key: Rect,
    pub buttons: Rect,
    pub results: Rect,
    pub footer: Option<Rect>,
}

impl MainLayout {
    pub fn compute(area: Rect, full_screen: bool) -> Self {
        let text_height = if area.height < 24 { 4 } else { 6 };
        let mut constraints = vec![Constraint::Length(1)];
        if !full_screen {
            constraints.push(Constraint::Length(3));
        }
        constraints.extend([
            Constraint::Length(text_height),
            Constraint::Length(3),
            Constraint::Length(1),
            Constraint::Min(1),
        ]);
        if !full_screen {
            constraints.push(Constraint::Length(2));
        }

        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints(constraints)
            .split(area);

        if full_screen {
            Self {
                menu: chunks[0],
                header: None,
                text: chunks[1],
                key: chunks[2],
                buttons: chunks[3],
                results: chunks[4],
                footer: None,
            }
        } else {
            Self {
                menu: chunks[0],
                header: Some(chunks[1]),
                text: chunks[2],
                key: chunks[3],
                buttons: chunks[4],
                results: chunks[5],
                footer: Some(chunks[6]),
            }
        }
    }
}

pub fn ui(f: &mut Frame, app: &mut App) {
    let area = f.area();
    f.render_widget(Block::default().style(app.theme.base_style), area);
    let layout = MainLayout::compute(area, app.full_screen);

    let focused = app.focused_action();
    app.buttons.clear();

    render_menu_bar(f, app, layout.menu, focused);
    if let Some(header) = layout.header {
        render_header(f, app, header);
    }
    render_text_input(f, app, layout.text);
    render_key_input(f, app, layout.key);
    render_button_row(f, app, layout.buttons, focused);
    render_results(f, app, layout.results, focused);
    if let Some(footer) = layout.footer {
        render_footer(f, app, footer);
    }

    if app.file_dialog.is_some() {
        render_file_dialog(f, app, area);
    }
}

fn button_style(theme: &Theme, enabled: bool, focused: bool) -> Style {
    if !enabled {
        theme.button_disabled_style
    } else if focused {
        theme.button_focused_style
    } else {
        theme.button_style
    }
}

/// Draws `label` at `x` on `area`'s row and registers its hitbox. Returns the
/// column after the button, or `None` when it no longer fits.
fn place_button(
    f: &mut Frame,
    app: &mut App,
    area: Rect,
    x: u16,
    action: UiAction,
    label: &str,
    focused: Option<UiAction>,
) -> Option<u16> {
    let width = label.chars().count() as u16;
    if x.saturating_add(width) > area.x.saturating_add(area.width) {
        return None;
    }
    let rect = Rect::new(x, area.y, width, 1);
    let enabled = app.is_action_enabled(action);
    let style = button_style(&app.theme, enabled, focused == Some(action));
    f.render_widget(Paragraph::new(label.to_string()).style(style), rect);
    app.buttons.push(ActionButton {
        rect,
        action,
        enabled,
    });
    Some(x + width)
}

fn render_menu_bar(f: &mut Frame, app: &mut App, area: Rect, focused: Option<UiAction>) {
    let menus: [(&str, &[UiAction]); 3] = [
        ("File", &[UiAction::OpenFile, UiAction::SaveMenu]),
        ("Settings", &[UiAction::ToggleFullScreen]),
        ("Help", &[UiAction::ReportBug]),
    ];

    let mut x = area.x;
    for (menu, actions) in menus {
        let title = format!(" {}: ", menu);
        let title_width = title.chars().count() as u16;
        if x.saturating_add(title_width) > area.x.saturating_add(area.width) {
            return;
        }
        f.render_widget(
            Paragraph::new(title).style(app.theme.menu_label_style),
            Rect::new(x, area.y, title_width, 1),
        );
        x += title_width;

        for action in actions {
            let label = match action {
                UiAction::ToggleFullScreen => {
                    let mark = if app.full_screen { 'x' } else { ' ' };
                    format!("[{}] {}", mark, action.label())
                }
                _ => format!("[{}]", action.label()),
            };
            match place_button(f, app, area, x, *action, &label, focused) {
                Some(next) => x = next + 1,
                None => return,
            }
        }
    }
}

fn render_header(f: &mut Frame, app: &App, area: Rect) {
    let title = if area.width < 60 {
        " ENCRYPTORX "
    } else {
        " E N C R Y P T O R X "
    };
    let header = Paragraph::new(Line::from(vec![
        Span::styled(title, app.theme.header_title_style),
        Span::styled(" // RESULT LOG ", app.theme.header_subtitle_style),
    ]))
    .style(app.theme.base_style)
    .block(
        Block::default()
            .borders(Borders::ALL)
            .border_style(app.theme.border_style)
            .title(format!(" RESULTS: {} ", app.controller.results().len())),
    );
    f.render_widget(header, area);
}

fn input_block(theme: &Theme, title: &'static str, focused: bool) -> Block<'static> {
    Block::default()
        .borders(Borders::ALL)
        .border_style(if focused {
            theme.focused_border_style
        } else {
            theme.border_style
        })
        .title(title)
}

fn cursor_visible(app: &App, area: FocusArea) -> bool {
    app.focus == area && (app.tick_count / 4) % 2 == 0
}

fn render_text_input(f: &mut Frame, app: &mut App, area: Rect) {
    let block = input_block(&app.theme, " TEXT ", app.focus == FocusArea::Text);
    let inner = block.inner(area);

    let (cursor_line, _) = cursor_position(&app.text.text, app.text.cursor);
    let visible = inner.height.max(1) as usize;
    app.text_scroll = cursor_line.saturating_sub(visible - 1) as u16;

    let lines = render_multiline_prompt(
        &app.text.text,
        Span::styled(" > ", app.theme.input_prompt_style),
        Span::styled("   ", app.theme.input_prompt_style),
        app.theme.input_text_style,
        Some(app.theme.input_cursor_style),
        cursor_visible(app, FocusArea::Text),
        Some(app.text.cursor),
    );
    let para = Paragraph::new(lines)
        .style(app.theme.base_style)
        .block(block)
        .scroll((app.text_scroll, 0));
    f.render_widget(para, area);
    app.text_rect = Some(inner);
}

fn render_key_input(f: &mut Frame, app: &mut App, area: Rect) {
    let block = input_block(&app.theme, " KEY ", app.focus == FocusArea::Key);
    let inner = block.inner(area);
    let lines = render_multiline_prompt(
        &app.key.text,
        Span::styled(" > ", app.theme.input_prompt_style),
        Span::styled("   ", app.theme.input_prompt_style),
        app.theme.input_text_style,
        Some(app.theme.input_cursor_style),
        cursor_visible(app, FocusArea::Key),
        Some(app.key.cursor),
    );
    let para = Paragraph::new(lines).style(app.theme.base_style).block(block);
    f.render_widget(para, area);
    app.key_rect = Some(inner);
}

fn render_button_row(f: &mut Frame, app: &mut App, area: Rect, focused: Option<UiAction>) {
    if area.width == 0 || area.height == 0 {
        return;
    }
    let version = format!(" v{} ", VERSION);
    let version_width = version.chars().count() as u16;

    let mut x = area.x + 1;
    for action in [UiAction::Process, UiAction::ClearAll] {
        let label = format!(" [{}] ", action.label());
        match place_button(f, app, area, x, action, &label, focused) {
            Some(next) => x = next + 1,
            None => break,
        }
    }

    if area.width > version_width && x + version_width <= area.x + area.width {
        let rect = Rect::new(
            area.x + area.width - version_width,
            area.y,
            version_width,
            1,
        );
        f.render_widget(
            Paragraph::new(version).style(app.theme.version_style),
            rect,
        );
    }
}

/// Row offsets, relative to the top of the results pane content, of each
/// populated card's button line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CardButtonRow {
    pub row: usize,
    pub card: CardId,
}

/// Lines for every card in display order plus the rows carrying their
/// `[SAVE]` / `[COPY]` buttons. A pending card only animates while `busy`;
/// once the gate is idle it never received output.
pub fn build_result_lines<'a>(
    results: &'a ResultList,
    theme: &Theme,
    tick: u64,
    busy: bool,
) -> (Vec<Line<'a>>, Vec<CardButtonRow>) {
    let mut lines = Vec::new();
    let mut rows = Vec::new();

    if results.is_empty() {
        lines.push(Line::from(Span::styled(
            " No results yet. Enter text and a key, then PROCESS.",
            theme.card_pending_style,
        )));
        return (lines, rows);
    }

    for card in results.cards() {
        match card.state() {
            CardState::Pending if busy => {
                let spinner = ["|", "/", "-", "\\"][(tick % 4) as usize];
                lines.push(Line::from(vec![
                    Span::styled(format!(" #{} ", card.id()), theme.card_id_style),
                    Span::styled(format!("{} processing...", spinner), theme.card_pending_style),
                ]));
            }
            CardState::Pending => {
                lines.push(Line::from(vec![
                    Span::styled(format!(" #{} ", card.id()), theme.card_id_style),
                    Span::styled("no output", theme.error_style),
                ]));
            }
            CardState::Populated(content) => {
                lines.push(Line::from(vec![
                    Span::styled(format!(" #{} ", card.id()), theme.card_id_style),
                    Span::styled(
                        content.created_at.format(TIMESTAMP_FORMAT).to_string(),
                        theme.card_label_style,
                    ),
                ]));
                lines.push(Line::from(vec![
                    Span::styled("   key:  ", theme.card_label_style),
                    Span::styled(flatten(&content.key), theme.card_value_style),
                ]));
                lines.push(Line::from(vec![
                    Span::styled("   data: ", theme.card_label_style),
                    Span::styled(flatten(&content.data), theme.card_value_style),
                ]));
                rows.push(CardButtonRow {
                    row: lines.len(),
                    card: card.id(),
                });
                // Buttons are drawn over this row as separate widgets.
                lines.push(Line::from(""));
            }
        }
        lines.push(Line::from(""));
    }

    (lines, rows)
}

fn flatten(value: &str) -> String {
    value.replace('\n', " \u{21b5} ")
}

fn render_results(f: &mut Frame, app: &mut App, area: Rect, focused: Option<UiAction>) {
    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(if app.focus == FocusArea::Results {
            app.theme.focused_border_style
        } else {
            app.theme.border_style
        })
        .title(" RESULTS ");
    let inner = block.inner(area);
    app.results_rect = Some(area);

    let (lines, rows) = build_result_lines(
        app.controller.results(),
        &app.theme,
        app.tick_count,
        app.controller.gate().is_active(),
    );
    app.results_max_scroll = max_scroll(lines.len(), inner.height);
    app.results_scroll = app.results_scroll.min(app.results_max_scroll);

    let para = Paragraph::new(lines)
        .style(app.theme.base_style)
        .block(block)
        .scroll((app.results_scroll, 0));
    f.render_widget(para, area);

    let scroll = app.results_scroll as usize;
    for CardButtonRow { row, card } in rows {
        if row < scroll || row - scroll >= inner.height as usize {
            continue;
        }
        let y = inner.y + (row - scroll) as u16;
        let line = Rect::new(inner.x, y, inner.width, 1);
        let Some(next) = place_button(
            f,
            app,
            line,
            inner.x + CARD_BUTTON_INDENT,
            UiAction::CardSave(card),
            SAVE_LABEL,
            focused,
        ) else {
            continue;
        };
        place_button(
            f,
            app,
            line,
            next + 1,
            UiAction::CardCopy(card),
            COPY_LABEL,
            focused,
        );
    }
}

fn max_scroll(line_count: usize, visible: u16) -> u16 {
    u16::try_from(line_count)
        .unwrap_or(u16::MAX)
        .saturating_sub(visible)
}

fn render_footer(f: &mut Frame, app: &App, area: Rect) {
    let status = app.logs.last().map(String::as_str).unwrap_or("");
    let line1 = Line::from(vec![
        Span::styled(" STATUS: ", app.theme.footer_text_style),
        Span::styled(status, app.theme.footer_highlight_style),
    ]);
    let gate_style = if app.controller.gate().is_active() {
        app.theme.error_style
    } else {
        app.theme.footer_highlight_style
    };
    let line2 = Line::from(vec![
        Span::styled(" GATE: ", app.theme.footer_text_style),
        Span::styled(app.gate_label(), gate_style),
        Span::styled("  FILTER: ", app.theme.footer_text_style),
        Span::styled(
            app.controller.extension_filter().to_string(),
            app.theme.footer_highlight_style,
        ),
        Span::styled(
            "  TAB focus  ENTER select  ESC quit",
            app.theme.footer_text_style,
        ),
    ]);
    f.render_widget(
        Paragraph::new(vec![line1, line2]).style(app.theme.base_style),
        area,
    );
}

fn cursor_position(text: &str, cursor: usize) -> (usize, usize) {
    let mut remaining = cursor;
    for (idx, line) in text.split('\n').enumerate() {
        let len = line.chars().count();
        if remaining <= len {
            return (idx, remaining);
        }
        remaining -= len + 1;
    }
    (0, 0)
}

pub(crate) fn render_multiline_prompt<'a>(
    text: &'a str,
    first_prefix: Span<'a>,
    continuation_prefix: Span<'a>,
    text_style: Style,
    cursor_style: Option<Style>,
    cursor_visible: bool,
    cursor_pos: Option<usize>,
) -> Vec<Line<'a>> {
    let mut out = Vec::new();
    let mut remaining = cursor_pos.unwrap_or(0);
    let mut cursor_pending = cursor_pos.is_some();

    for (idx, line) in text.split('\n').enumerate() {
        let prefix = if idx == 0 {
            first_prefix.clone()
        } else {
            continuation_prefix.clone()
        };

        let line_len = line.chars().count();
        if !(cursor_pending && remaining <= line_len) {
            out.push(Line::from(vec![prefix, Span::styled(line, text_style)]));
            if cursor_pending {
                remaining = remaining.saturating_sub(line_len + 1);
            }
            continue;
        }

        let (before, current, after) = split_line_at_char(line, remaining);
        let cursor = cursor_style.filter(|_| cursor_visible).unwrap_or(text_style);
        let mut spans = vec![prefix];
        if !before.is_empty() {
            spans.push(Span::styled(before, text_style));
        }
        match current {
            Some(ch) => spans.push(Span::styled(ch.to_string(), cursor)),
            None if cursor_visible && cursor_style.is_some() => {
                spans.push(Span::styled(" ", cursor));
            }
            None => {}
        }
        if !after.is_empty() {
            spans.push(Span::styled(after, text_style));
        }
        out.push(Line::from(spans));
        cursor_pending = false;
    }
    out
}
