//! GUI panels and application state.

pub mod app;
pub mod components;
pub mod results_window;
pub mod roster_panel;

pub use app::App;
