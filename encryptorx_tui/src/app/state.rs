use encryptorx_core::{
    CardId, Collaborators, Config, ControlId, InputFields, ResultController,
};
use ratatui::layout::Rect;

use crate::app::editor::TextField;
use crate::app::file_dialog::FileDialogView;
use crate::theme::Theme;

const MAX_LOG_LINES: usize = 200;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum FocusArea {
    Menu,
    Text,
    Key,
    Buttons,
    Results,
}

impl FocusArea {
    const ORDER: [FocusArea; 5] = [
        FocusArea::Menu,
        FocusArea::Text,
        FocusArea::Key,
        FocusArea::Buttons,
        FocusArea::Results,
    ];

    pub fn next(self) -> Self {
        let idx = Self::ORDER.iter().position(|f| *f == self).unwrap_or(0);
        Self::ORDER[(idx + 1) % Self::ORDER.len()]
    }

    pub fn previous(self) -> Self {
        let idx = Self::ORDER.iter().position(|f| *f == self).unwrap_or(0);
        Self::ORDER[(idx + Self::ORDER.len() - 1) % Self::ORDER.len()]
    }

    pub fn is_button_group(self) -> bool {
        matches!(self, FocusArea::Menu | FocusArea::Buttons | FocusArea::Results)
    }
}

/// Every clickable control, mapped to the operation it triggers.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum UiAction {
    OpenFile,
    SaveMenu,
    ToggleFullScreen,
    ReportBug,
    Process,
    ClearAll,
    CardSave(CardId),
    CardCopy(CardId),
}

impl UiAction {
    /// The gated control backing this action, if any.
    pub fn gated_control(self) -> Option<ControlId> {
        match self {
            UiAction::Process => Some(ControlId::ProcessButton),
            UiAction::ClearAll => Some(ControlId::ClearButton),
            UiAction::SaveMenu => Some(ControlId::SaveMenuItem),
            UiAction::CardSave(_) => Some(ControlId::CardSaveButton),
            UiAction::OpenFile
            | UiAction::ToggleFullScreen
            | UiAction::ReportBug
            | UiAction::CardCopy(_) => None,
        }
    }

    pub fn group(self) -> FocusArea {
        match self {
            UiAction::OpenFile
            | UiAction::SaveMenu
            | UiAction::ToggleFullScreen
            | UiAction::ReportBug => FocusArea::Menu,
            UiAction::Process | UiAction::ClearAll => FocusArea::Buttons,
            UiAction::CardSave(_) | UiAction::CardCopy(_) => FocusArea::Results,
        }
    }

    pub fn label(self) -> String {
        match self {
            UiAction::OpenFile => "OPEN FILE".to_string(),
            UiAction::SaveMenu => "SAVE".to_string(),
            UiAction::ToggleFullScreen => "FULL SCREEN".to_string(),
            UiAction::ReportBug => "REPORT BUG".to_string(),
            UiAction::Process => "PROCESS".to_string(),
            UiAction::ClearAll => "CLEAR ALL".to_string(),
            UiAction::CardSave(id) => format!("SAVE #{id}"),
            UiAction::CardCopy(id) => format!("COPY #{id}"),
        }
    }
}

#[derive(Clone, Debug)]
pub struct ActionButton {
    pub rect: Rect,
    pub action: UiAction,
    pub enabled: bool,
}

pub struct App {
    pub controller: ResultController,
    pub config: Config,
    pub theme: Theme,
    pub text: TextField,
    pub key: TextField,
    pub focus: FocusArea,
    pub buttons: Vec<ActionButton>,
    pub button_focus: usize,
    pub text_rect: Option<Rect>,
    pub text_scroll: u16,
    pub key_rect: Option<Rect>,
    pub results_rect: Option<Rect>,
    pub results_scroll: u16,
    pub results_max_scroll: u16,
    pub file_dialog: Option<FileDialogView>,
    pub full_screen: bool,
    pub logs: Vec<String>,
    pub tick_count: u64,
    pub should_quit: bool,
}

impl App {
    pub fn new(config: Config, collaborators: Collaborators) -> Self {
        let theme = Theme::from_config(&config.theme);
        let controller =
            ResultController::new(collaborators, config.save.extension_filter.clone());
        let mut app = Self {
            controller,
            config,
            theme,
            text: TextField::multiline(),
            key: TextField::single_line(),
            focus: FocusArea::Text,
            buttons: Vec::new(),
            button_focus: 0,
            text_rect: None,
            text_scroll: 0,
            key_rect: None,
            results_rect: None,
            results_scroll: 0,
            results_max_scroll: 0,
            file_dialog: None,
            full_screen: false,
            logs: Vec::new(),
            tick_count: 0,
            should_quit: false,
        };
        app.push_log("EncryptorX ready. Enter text and a key, then PROCESS.");
        app.refresh_enablement();
        app
    }

    pub fn push_log(&mut self, line: impl Into<String>) {
        self.logs.push(line.into());
        if self.logs.len() > MAX_LOG_LINES {
            let overflow = self.logs.len() - MAX_LOG_LINES;
            self.logs.drain(0..overflow);
        }
    }

    pub fn report_error(&mut self, context: &str, err: &anyhow::Error) {
        tracing::warn!("{} failed: {:#}", context, err);
        self.push_log(format!("{} failed: {}", context, err));
    }

    pub fn input_fields(&self) -> InputFields {
        InputFields::new(self.text.text.clone(), self.key.text.clone())
    }

    /// Per-tick enablement pass over every gated control.
    pub fn refresh_enablement(&mut self) {
        let fields = self.input_fields();
        self.controller.refresh_enablement(&fields);
    }

    pub fn is_action_enabled(&self, action: UiAction) -> bool {
        match action.gated_control() {
            Some(control) => self.controller.is_enabled(control),
            None => true,
        }
    }

    /// Indices into `buttons` for the given focus group, in screen order.
    pub fn group_buttons(&self, group: FocusArea) -> Vec<usize> {
        self.buttons
            .iter()
            .enumerate()
            .filter(|(_, b)| b.action.group() == group)
            .map(|(i, _)| i)
            .collect()
    }

    pub fn focused_action(&self) -> Option<UiAction> {
        if !self.focus.is_button_group() {
            return None;
        }
        let group = self.group_buttons(self.focus);
        group
            .get(self.button_focus)
            .and_then(|idx| self.buttons.get(*idx))
            .map(|b| b.action)
    }

    pub fn cycle_button_focus(&mut self, forward: bool) {
        let len = self.group_buttons(self.focus).len();
        if len == 0 {
            self.button_focus = 0;
            return;
        }
        self.button_focus = if forward {
            (self.button_focus + 1) % len
        } else {
            (self.button_focus + len - 1) % len
        };
    }

    pub fn set_focus(&mut self, focus: FocusArea) {
        if self.focus != focus {
            self.focus = focus;
            self.button_focus = 0;
        }
    }

    pub fn focus_button(&mut self, action: UiAction) {
        let group = action.group();
        self.set_focus(group);
        if let Some(pos) = self
            .group_buttons(group)
            .iter()
            .position(|idx| self.buttons[*idx].action == action)
        {
            self.button_focus = pos;
        }
    }

    pub fn gate_label(&self) -> &'static str {
        if self.controller.gate().is_active() {
            "BUSY"
        } else {
            "IDLE"
        }
    }
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;
    use encryptorx_plugins::{FsFileWriter, PassthroughProcessor, SystemLinkOpener};
    use std::collections::HashMap;
    use std::sync::Arc;

    pub(crate) fn test_app() -> App {
        let mut config = Config::default();
        config.theme = "retro".to_string();
        App::new(
            config,
            Collaborators {
                processor: Arc::new(PassthroughProcessor),
                writer: Arc::new(FsFileWriter),
                links: Arc::new(SystemLinkOpener::new(HashMap::new())),
            },
        )
    }

    fn button(action: UiAction) -> ActionButton {
        ActionButton {
            rect: Rect::new(0, 0, 4, 1),
            action,
            enabled: true,
        }
    }

    #[test]
    fn focus_cycle_visits_every_area() {
        let mut focus = FocusArea::Menu;
        let mut seen = vec![focus];
        for _ in 0..4 {
            focus = focus.next();
            seen.push(focus);
        }
        assert_eq!(focus.next(), FocusArea::Menu);
        assert_eq!(FocusArea::Menu.previous(), FocusArea::Results);
        assert_eq!(seen.len(), 5);
    }

    #[test]
    fn process_enabled_only_with_both_fields() {
        let mut app = test_app();
        assert!(!app.is_action_enabled(UiAction::Process));
        assert!(app.is_action_enabled(UiAction::ClearAll));

        app.text.set_text("hello");
        app.refresh_enablement();
        assert!(!app.is_action_enabled(UiAction::Process));

        app.key.set_text("k1");
        app.refresh_enablement();
        assert!(app.is_action_enabled(UiAction::Process));

        app.text.set_text("");
        app.refresh_enablement();
        assert!(!app.is_action_enabled(UiAction::Process));
    }

    #[test]
    fn ungated_actions_are_always_enabled() {
        let app = test_app();
        let gate = app.controller.gate().clone();
        let _held = gate.acquire().unwrap();
        assert!(app.is_action_enabled(UiAction::ReportBug));
        assert!(app.is_action_enabled(UiAction::CardCopy(0)));
    }

    #[test]
    fn button_focus_wraps_within_group() {
        let mut app = test_app();
        app.buttons = vec![
            button(UiAction::OpenFile),
            button(UiAction::SaveMenu),
            button(UiAction::Process),
            button(UiAction::ClearAll),
        ];
        app.set_focus(FocusArea::Buttons);
        assert_eq!(app.focused_action(), Some(UiAction::Process));
        app.cycle_button_focus(true);
        assert_eq!(app.focused_action(), Some(UiAction::ClearAll));
        app.cycle_button_focus(true);
        assert_eq!(app.focused_action(), Some(UiAction::Process));
        app.cycle_button_focus(false);
        assert_eq!(app.focused_action(), Some(UiAction::ClearAll));

        app.focus_button(UiAction::SaveMenu);
        assert_eq!(app.focus, FocusArea::Menu);
        assert_eq!(app.focused_action(), Some(UiAction::SaveMenu));
    }

    #[test]
    fn log_is_bounded() {
        let mut app = test_app();
        for i in 0..(MAX_LOG_LINES + 25) {
            app.push_log(format!("line {i}"));
        }
        assert_eq!(app.logs.len(), MAX_LOG_LINES);
        assert_eq!(
            app.logs.last().map(String::as_str),
            Some(format!("line {}", MAX_LOG_LINES + 24).as_str())
        );
    }
}
