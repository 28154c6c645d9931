mod config;
mod debug;
mod game;
mod game_modes;
mod ui;

use std::io;
use std::time::Duration;

use anyhow::Context;
use crossterm::{
    cursor::{Hide, Show},
    event::{KeyboardEnhancementFlags, PopKeyboardEnhancementFlags, PushKeyboardEnhancementFlags},
    execute,
    terminal::{
        disable_raw_mode, enable_raw_mode, supports_keyboard_enhancement, EnterAlternateScreen,
        LeaveAlternateScreen, SetTitle,
    },
};
use ratatui::{backend::CrosstermBackend, Terminal};
use tracing::{info, warn};

use game::{InputHandler, KeyMap};

const WINDOW_TITLE: &str = "Pong (2-Player)";

fn main() -> anyhow::Result<()> {
    // A broken config file is not fatal: report it once logging is up
    let (config, config_error) = match config::load_config() {
        Ok(config) => (config, None),
        Err(e) => (config::Config::default(), Some(e)),
    };

    debug::init(&config.logging)?;
    if let Some(e) = config_error {
        warn!("{:#}; using default configuration", e);
    }
    info!("duopong starting");

    let keys = KeyMap::from_bindings(&config.keybindings);
    let hold_timeout = Duration::from_millis(config.timing.key_hold_timeout_ms);

    // Setup terminal
    enable_raw_mode().context("failed to enable raw mode")?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen, SetTitle(WINDOW_TITLE), Hide)?;

    // Key release events need the kitty keyboard protocol
    let release_events = supports_keyboard_enhancement().unwrap_or(false);
    if release_events {
        execute!(
            stdout,
            PushKeyboardEnhancementFlags(KeyboardEnhancementFlags::REPORT_EVENT_TYPES)
        )?;
    }
    info!("Key release events supported: {}", release_events);

    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;
    let mut input = InputHandler::new(keys, release_events, hold_timeout);

    // Run game
    let result = game_modes::run_game_local(&mut terminal, &config, &mut input);

    // Restore terminal
    if release_events {
        execute!(terminal.backend_mut(), PopKeyboardEnhancementFlags)?;
    }
    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen, Show)?;

    info!("duopong exiting");
    result.context("game loop failed")
}
