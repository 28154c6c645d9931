// duopong configuration types
// Every setting has a default matching the built-in game, so the file is optional

use std::path::PathBuf;

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct Config {
    #[serde(default)]
    pub keybindings: KeyBindings,
    #[serde(default)]
    pub timing: TimingConfig,
    #[serde(default)]
    pub display: DisplayConfig,
    #[serde(default)]
    pub logging: LoggingConfig,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct KeyBindings {
    // Player 1 (left paddle)
    pub left_paddle_up: String,
    pub left_paddle_down: String,

    // Player 2 (right paddle)
    pub right_paddle_up: String,
    pub right_paddle_down: String,

    // Game controls
    pub pause: String,
    pub restart: String,
    pub quit: String,
}

impl Default for KeyBindings {
    fn default() -> Self {
        Self {
            left_paddle_up: "W".to_string(),
            left_paddle_down: "S".to_string(),
            right_paddle_up: "Up".to_string(),
            right_paddle_down: "Down".to_string(),
            pause: "P".to_string(),
            restart: "R".to_string(),
            quit: "Esc".to_string(),
        }
    }
}

#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct TimingConfig {
    // Frames per second; physics advances one step per frame
    pub target_fps: u64,

    // How long the winner announcement blocks before the restart
    pub announce_delay_ms: u64,

    // Terminals without key release events: a paddle stops this long after
    // the last press (or auto-repeat) of its key
    pub key_hold_timeout_ms: u64,
}

impl Default for TimingConfig {
    fn default() -> Self {
        Self {
            target_fps: 60,
            announce_delay_ms: 1800,
            key_hold_timeout_ms: 550,
        }
    }
}

#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct DisplayConfig {
    // RGB values 0-255
    pub background: [u8; 3],
    pub court_fill: [u8; 3],
    pub court_border: [u8; 3],
    pub center_line: [u8; 3],
    pub paddle_color: [u8; 3],
    pub ball_color: [u8; 3],
    pub score_color: [u8; 3],
    pub label_color: [u8; 3],
    pub hint_color: [u8; 3],

    // Winner announcement
    pub win_color: [u8; 3],
    pub tie_color: [u8; 3],
    pub overlay_shade: [u8; 3],
}

impl Default for DisplayConfig {
    fn default() -> Self {
        Self {
            background: [12, 14, 28],
            court_fill: [18, 22, 44],
            court_border: [28, 32, 58],
            center_line: [48, 54, 92],
            paddle_color: [235, 242, 255],
            ball_color: [138, 156, 255],
            score_color: [200, 210, 230],
            label_color: [180, 190, 210],
            hint_color: [160, 170, 200],
            win_color: [120, 255, 160],
            tie_color: [255, 220, 120],
            overlay_shade: [7, 9, 17],
        }
    }
}

#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct LoggingConfig {
    // Logs go to a file; the terminal belongs to the game
    pub enabled: bool,
    pub file: PathBuf,

    // "error", "warn", "info", "debug" or "trace"
    pub level: String,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            enabled: false,
            file: std::env::temp_dir().join("duopong.log"),
            level: "debug".to_string(),
        }
    }
}
