pub mod config;
pub mod error;
pub mod export;
pub mod logging;
pub mod models;
pub mod roster;
pub mod ui;

pub use error::{AppError, Result};
