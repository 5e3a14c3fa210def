//! In-memory roster backed by a file that is rewritten on every change.

use std::path::{Path, PathBuf};

use chrono::NaiveDateTime;

use super::dates::parse_roster_date;
use super::file::{LoadSource, load_roster, save_roster};
use crate::error::{AppError, Result};
use crate::models::BusRecord;

/// Result of a successful upsert.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UpsertOutcome {
    Inserted,
    Updated,
}

/// Ordered bus records keyed by Bus ID, flushed to disk after each upsert.
#[derive(Debug)]
pub struct RosterStore {
    path: PathBuf,
    records: Vec<BusRecord>,
    unsaved: bool,
}

impl RosterStore {
    /// Open the roster at `path`, creating an empty file if none exists.
    pub fn open(path: impl Into<PathBuf>) -> Result<(Self, LoadSource)> {
        let mut store = Self {
            path: path.into(),
            records: Vec::new(),
            unsaved: false,
        };
        let source = store.reload()?;
        Ok((store, source))
    }

    /// Replace the in-memory records with the current file contents.
    ///
    /// Rows repeating an earlier Bus ID overwrite that row's fields.
    pub fn reload(&mut self) -> Result<LoadSource> {
        let (rows, source) = load_roster(&self.path)?;

        let mut records: Vec<BusRecord> = Vec::with_capacity(rows.len());
        for row in rows {
            if let Some(existing) = records.iter_mut().find(|r| r.bus_id == row.bus_id) {
                tracing::warn!("Duplicate Bus ID {:?} in {:?}, keeping last row", row.bus_id, self.path);
                *existing = row;
            } else {
                records.push(row);
            }
        }

        tracing::info!("Loaded {} buses from {:?}", records.len(), self.path);
        self.records = records;
        self.unsaved = false;
        Ok(source)
    }

    /// Write every record to the backing file.
    ///
    /// On failure the in-memory records are left as they are and stay
    /// marked as unsaved.
    pub fn save(&mut self) -> Result<()> {
        match save_roster(&self.path, &self.records) {
            Ok(()) => {
                self.unsaved = false;
                tracing::info!("Saved {} buses to {:?}", self.records.len(), self.path);
                Ok(())
            }
            Err(e) => {
                self.unsaved = true;
                tracing::error!("{}", e);
                Err(e)
            }
        }
    }

    /// Insert a new bus or replace the details of an existing one, then save.
    ///
    /// Every text field must be non-blank; values are stored trimmed. An
    /// existing bus keeps its position. If saving fails the change is kept
    /// in memory and the save error is returned.
    pub fn upsert(&mut self, record: BusRecord) -> Result<UpsertOutcome> {
        if let Some(field) = record.first_blank_field() {
            tracing::warn!("Rejected bus update: {} is empty", field);
            return Err(AppError::validation(format!("{field} must be filled")));
        }
        let record = record.trimmed();

        let outcome = match self.records.iter_mut().find(|r| r.bus_id == record.bus_id) {
            Some(existing) => {
                existing.route = record.route;
                existing.driver = record.driver;
                existing.insurance_expiry = record.insurance_expiry;
                existing.maintenance_due = record.maintenance_due;
                existing.status = record.status;
                UpsertOutcome::Updated
            }
            None => {
                self.records.push(record);
                UpsertOutcome::Inserted
            }
        };
        self.unsaved = true;
        tracing::info!("Bus upsert: {:?}", outcome);

        self.save()?;
        Ok(outcome)
    }

    /// Buses whose insurance expired strictly before `now`.
    pub fn filter_expired_insurance(&self, now: NaiveDateTime) -> Vec<BusRecord> {
        self.filter_by_date(|r| r.insurance_expiry.as_str(), |date| date < now)
    }

    /// Buses whose maintenance is due at or before `now`.
    pub fn filter_maintenance_due(&self, now: NaiveDateTime) -> Vec<BusRecord> {
        self.filter_by_date(|r| r.maintenance_due.as_str(), |date| date <= now)
    }

    fn filter_by_date<F, P>(&self, field: F, matches: P) -> Vec<BusRecord>
    where
        F: Fn(&BusRecord) -> &str,
        P: Fn(NaiveDateTime) -> bool,
    {
        self.records
            .iter()
            .filter(|&record| match parse_roster_date(field(record)) {
                Some(date) => matches(date),
                None => {
                    tracing::debug!("Skipping bus {:?}: unparseable date {:?}", record.bus_id, field(record));
                    false
                }
            })
            .cloned()
            .collect()
    }

    /// All records in roster order.
    pub fn records(&self) -> &[BusRecord] {
        &self.records
    }

    /// Look up a bus by ID.
    pub fn get(&self, bus_id: &str) -> Option<&BusRecord> {
        self.records.iter().find(|r| r.bus_id == bus_id)
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Backing file path.
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Whether in-memory changes have not reached the file.
    pub fn has_unsaved_changes(&self) -> bool {
        self.unsaved
    }
}
