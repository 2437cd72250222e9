use anyhow::{anyhow, Result};
use crossterm::{
    event::{
        DisableBracketedPaste, DisableMouseCapture, EnableBracketedPaste, EnableMouseCapture,
        KeyboardEnhancementFlags, PopKeyboardEnhancementFlags, PushKeyboardEnhancementFlags,
    },
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use encryptorx_core::{Collaborators, Config, APP_NAME, VERSION};
use encryptorx_plugins::{FsFileWriter, PassthroughProcessor, SystemLinkOpener};
use ratatui::{backend::CrosstermBackend, Terminal};
use std::io::stdout;
use std::path::PathBuf;
use std::sync::Arc;

mod app;
mod session_log;
mod theme;
mod ui;

use app::runtime::run_app;
use app::state::App;

fn config_path_arg(args: &[String]) -> Result<Option<PathBuf>> {
    match args.iter().position(|a| a == "--config") {
        Some(idx) => args
            .get(idx + 1)
            .map(|p| Some(PathBuf::from(p)))
            .ok_or_else(|| anyhow!("--config requires a path")),
        None => Ok(None),
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    let args: Vec<String> = std::env::args().collect();
    let config_path = config_path_arg(&args)?;

    let log_path = session_log::init().ok();
    tracing::info!(version = VERSION, "{} starting", APP_NAME);

    let config = match &config_path {
        Some(path) => Config::load_from(path).await?,
        None => Config::load().await?,
    };

    let collaborators = Collaborators {
        processor: Arc::new(PassthroughProcessor),
        writer: Arc::new(FsFileWriter),
        links: Arc::new(SystemLinkOpener::new(config.links.as_map())),
    };
    let mut app = App::new(config, collaborators);
    if let Some(path) = &log_path {
        app.push_log(format!("Session log: {}", path.display()));
    }

    // Setup terminal
    enable_raw_mode()?;
    let mut stdout = stdout();
    execute!(stdout, EnterAlternateScreen)?;

    // Kitty keyboard protocol lets Ctrl+Enter through where supported.
    let mut keyboard_enhancement_enabled = false;
    if crossterm::terminal::supports_keyboard_enhancement().unwrap_or(false) {
        let flags = KeyboardEnhancementFlags::DISAMBIGUATE_ESCAPE_CODES;
        if execute!(stdout, PushKeyboardEnhancementFlags(flags)).is_ok() {
            keyboard_enhancement_enabled = true;
        }
    }
    let mouse_capture_enabled = execute!(stdout, EnableMouseCapture).is_ok();
    let paste_enabled = execute!(stdout, EnableBracketedPaste).is_ok();

    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let res = run_app(&mut terminal, &mut app).await;

    // Restore terminal
    disable_raw_mode()?;
    if paste_enabled {
        let _ = execute!(terminal.backend_mut(), DisableBracketedPaste);
    }
    if mouse_capture_enabled {
        let _ = execute!(terminal.backend_mut(), DisableMouseCapture);
    }
    if keyboard_enhancement_enabled {
        let _ = execute!(terminal.backend_mut(), PopKeyboardEnhancementFlags);
    }
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;

    if let Err(err) = res {
        tracing::error!("Main loop failed: {:#}", err);
        println!("{:?}", err);
    }

    Ok(())
}
