pub mod input;
pub mod physics;
pub mod state;
pub mod verdict;

pub use input::{InputAction, InputHandler, KeyMap};
pub use physics::update;
pub use state::{GameState, LoopControl, Phase, Side};
pub use verdict::Verdict;
