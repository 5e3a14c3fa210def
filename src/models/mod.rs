//! Data models for the bus roster.

pub mod bus;

pub use bus::{BusRecord, BusStatus, COLUMNS};
