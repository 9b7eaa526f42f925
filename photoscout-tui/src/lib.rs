pub mod app;
pub mod components;
pub mod keymap;
pub mod mouse;
pub mod state;
pub mod theme;

pub use app::{RunOptions, run};
pub use theme::Theme;
