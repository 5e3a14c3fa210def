//! Roster storage: file I/O, upserts, and date-threshold queries.

pub mod dates;
pub mod file;
pub mod store;


pub use dates::parse_roster_date;
pub use file::{LoadSource, RosterFormat, load_roster, save_roster};
pub use store::{RosterStore, UpsertOutcome};
