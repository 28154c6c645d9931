// Configuration module for duopong
// Loads optional settings (key bindings, timing, colours, logging) from a TOML file

pub mod keys;
pub mod loader;
pub mod types;

pub use keys::{normalize_key, parse_key};
pub use loader::load_config;
pub use types::{Config, DisplayConfig, KeyBindings, LoggingConfig};
