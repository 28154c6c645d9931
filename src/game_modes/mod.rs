mod common;
mod local;

pub use local::run_game_local;
