use ratatui::style::{Color, Modifier, Style};

#[derive(Debug, Clone)]
pub struct Theme {
    // Base
    pub base_style: Style,
    pub border_style: Style,
    pub focused_border_style: Style,
    // Header / menu
    pub header_title_style: Style,
    pub header_subtitle_style: Style,
    pub menu_label_style: Style,
    // Input
    pub input_prompt_style: Style,
    pub input_text_style: Style,
    pub input_cursor_style: Style,
    // Result cards
    pub card_id_style: Style,
    pub card_label_style: Style,
    pub card_value_style: Style,
    pub card_pending_style: Style,
    // Buttons
    pub button_style: Style,
    pub button_focused_style: Style,
    pub button_disabled_style: Style,
    // Footer
    pub footer_text_style: Style,
    pub footer_highlight_style: Style,
    pub version_style: Style,
    // Alerts
    pub error_style: Style,
}

impl Theme {
    pub fn from_config(name: &str) -> Self {
        match name.to_lowercase().as_str() {
            "dark" => Self::dark(),
            "light" => Self::light(),
            "auto" => match dark_light::detect() {
                dark_light::Mode::Dark => Self::dark(),
                dark_light::Mode::Light => Self::light(),
                dark_light::Mode::Default => Self::dark(),
            },
            _ => Self::retro(),
        }
    }

    pub fn retro() -> Self {
        let amber = Color::Rgb(255, 176, 0);
        let amber_dim = Color::Rgb(150, 110, 0);
        let red_alert = Color::Rgb(255, 40, 40);
        let bg = Color::Black;

        Self {
            base_style: Style::default().fg(amber),
            border_style: Style::default().fg(amber_dim),
            focused_border_style: Style::default().fg(amber),

            header_title_style: Style::default().fg(amber).add_modifier(Modifier::BOLD),
            header_subtitle_style: Style::default().fg(amber_dim),
            menu_label_style: Style::default().fg(amber_dim),

            input_prompt_style: Style::default().fg(amber).add_modifier(Modifier::BOLD),
            input_text_style: Style::default().fg(Color::White),
            input_cursor_style: Style::default()
                .bg(amber)
                .fg(bg)
                .add_modifier(Modifier::RAPID_BLINK),

            card_id_style: Style::default().fg(amber).add_modifier(Modifier::BOLD),
            card_label_style: Style::default().fg(amber_dim),
            card_value_style: Style::default().fg(Color::White),
            card_pending_style: Style::default()
                .fg(amber_dim)
                .add_modifier(Modifier::ITALIC),

            button_style: Style::default().fg(bg).bg(amber),
            button_focused_style: Style::default()
                .fg(Color::Blue)
                .bg(Color::Rgb(190, 190, 190))
                .add_modifier(Modifier::BOLD),
            button_disabled_style: Style::default().fg(amber_dim).add_modifier(Modifier::DIM),

            footer_text_style: Style::default().fg(amber_dim),
            footer_highlight_style: Style::default().fg(amber),
            version_style: Style::default().fg(amber).add_modifier(Modifier::BOLD),

            error_style: Style::default().fg(red_alert),
        }
    }

    pub fn light() -> Self {
        let text_main = Color::Black;
        let text_dim = Color::DarkGray;
        let accent = Color::Blue;
        let gold = Color::Rgb(184, 134, 11);

        Self {
            base_style: Style::default().fg(text_main),
            border_style: Style::default().fg(text_dim),
            focused_border_style: Style::default().fg(accent),

            header_title_style: Style::default().fg(accent).add_modifier(Modifier::BOLD),
            header_subtitle_style: Style::default().fg(text_dim),
            menu_label_style: Style::default().fg(text_dim),

            input_prompt_style: Style::default().fg(accent).add_modifier(Modifier::BOLD),
            input_text_style: Style::default().fg(text_main),
            input_cursor_style: Style::default()
                .bg(accent)
                .fg(Color::White)
                .add_modifier(Modifier::RAPID_BLINK),

            card_id_style: Style::default().fg(accent).add_modifier(Modifier::BOLD),
            card_label_style: Style::default().fg(text_dim),
            card_value_style: Style::default().fg(text_main),
            card_pending_style: Style::default()
                .fg(text_dim)
                .add_modifier(Modifier::ITALIC),

            button_style: Style::default().fg(Color::White).bg(accent),
            button_focused_style: Style::default()
                .fg(Color::Blue)
                .bg(Color::Rgb(190, 190, 190))
                .add_modifier(Modifier::BOLD),
            button_disabled_style: Style::default().fg(Color::Gray),

            footer_text_style: Style::default().fg(text_dim),
            footer_highlight_style: Style::default().fg(accent),
            version_style: Style::default().fg(gold).add_modifier(Modifier::BOLD),

            error_style: Style::default().fg(Color::Red),
        }
    }

    pub fn dark() -> Self {
        let amber = Color::Rgb(255, 176, 0);
        let amber_dim = Color::Rgb(150, 110, 0);
        let bg = Color::Rgb(14, 12, 10);
        let gold = Color::Rgb(255, 215, 0);

        Self {
            base_style: Style::default().fg(amber).bg(bg),
            border_style: Style::default().fg(amber_dim),
            focused_border_style: Style::default().fg(amber),

            header_title_style: Style::default().fg(amber).add_modifier(Modifier::BOLD),
            header_subtitle_style: Style::default().fg(amber_dim),
            menu_label_style: Style::default().fg(amber_dim),

            input_prompt_style: Style::default().fg(amber).add_modifier(Modifier::BOLD),
            input_text_style: Style::default().fg(Color::White),
            input_cursor_style: Style::default()
                .bg(amber)
                .fg(bg)
                .add_modifier(Modifier::RAPID_BLINK),

            card_id_style: Style::default().fg(amber).add_modifier(Modifier::BOLD),
            card_label_style: Style::default().fg(amber_dim),
            card_value_style: Style::default().fg(Color::White),
            card_pending_style: Style::default()
                .fg(amber_dim)
                .add_modifier(Modifier::ITALIC),

            button_style: Style::default().fg(bg).bg(amber),
            button_focused_style: Style::default()
                .fg(Color::Blue)
                .bg(Color::Rgb(190, 190, 190))
                .add_modifier(Modifier::BOLD),
            button_disabled_style: Style::default().fg(Color::DarkGray).bg(bg),

            footer_text_style: Style::default().fg(amber_dim),
            footer_highlight_style: Style::default().fg(amber),
            version_style: Style::default().fg(gold),

            error_style: Style::default().fg(Color::Rgb(255, 80, 80)),
        }
    }
}
