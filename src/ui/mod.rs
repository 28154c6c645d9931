pub mod braille;
pub mod overlay;
pub mod render;
pub mod theme;

pub use render::render;
pub use theme::Theme;
