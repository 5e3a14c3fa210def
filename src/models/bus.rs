//! Bus record and status types.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Canonical roster header, in file column order.
pub const COLUMNS: [&str; 6] = [
    "Bus ID",
    "Route",
    "Driver",
    "Insurance Expiry",
    "Maintenance Due",
    "Status",
];

/// Operating status of a bus.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum BusStatus {
    #[default]
    Active,
    #[serde(rename = "Under Maintenance")]
    UnderMaintenance,
}

impl BusStatus {
    /// All statuses in the order the status picker lists them.
    pub const ALL: [BusStatus; 2] = [BusStatus::Active, BusStatus::UnderMaintenance];

    /// Label as stored in the roster file.
    pub fn label(&self) -> &'static str {
        match self {
            BusStatus::Active => "Active",
            BusStatus::UnderMaintenance => "Under Maintenance",
        }
    }

    /// Parse a stored label, ignoring surrounding whitespace.
    pub fn from_label(label: &str) -> Option<Self> {
        let label = label.trim();
        Self::ALL.into_iter().find(|status| status.label() == label)
    }
}

impl fmt::Display for BusStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// One roster row, keyed by `bus_id`.
///
/// Dates are kept as the free-form text the user typed; they are only
/// interpreted when a threshold query runs.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BusRecord {
    #[serde(rename = "Bus ID")]
    pub bus_id: String,
    #[serde(rename = "Route")]
    pub route: String,
    #[serde(rename = "Driver")]
    pub driver: String,
    #[serde(rename = "Insurance Expiry")]
    pub insurance_expiry: String,
    #[serde(rename = "Maintenance Due")]
    pub maintenance_due: String,
    #[serde(rename = "Status")]
    pub status: BusStatus,
}

impl BusRecord {
    pub fn new(
        bus_id: impl Into<String>,
        route: impl Into<String>,
        driver: impl Into<String>,
        insurance_expiry: impl Into<String>,
        maintenance_due: impl Into<String>,
        status: BusStatus,
    ) -> Self {
        Self {
            bus_id: bus_id.into(),
            route: route.into(),
            driver: driver.into(),
            insurance_expiry: insurance_expiry.into(),
            maintenance_due: maintenance_due.into(),
            status,
        }
    }

    /// Name of the first text column that is blank, if any.
    pub fn first_blank_field(&self) -> Option<&'static str> {
        let text_fields = [
            &self.bus_id,
            &self.route,
            &self.driver,
            &self.insurance_expiry,
            &self.maintenance_due,
        ];
        text_fields
            .iter()
            .zip(COLUMNS)
            .find(|(value, _)| value.trim().is_empty())
            .map(|(_, name)| name)
    }

    /// Copy with surrounding whitespace removed from every text field.
    pub fn trimmed(&self) -> Self {
        Self {
            bus_id: self.bus_id.trim().to_string(),
            route: self.route.trim().to_string(),
            driver: self.driver.trim().to_string(),
            insurance_expiry: self.insurance_expiry.trim().to_string(),
            maintenance_due: self.maintenance_due.trim().to_string(),
            status: self.status,
        }
    }

    /// Cell values in [`COLUMNS`] order.
    pub fn cells(&self) -> [&str; 6] {
        [
            &self.bus_id,
            &self.route,
            &self.driver,
            &self.insurance_expiry,
            &self.maintenance_due,
            self.status.label(),
        ]
    }

    /// Case-insensitive match against Bus ID, route, or driver.
    pub fn matches_search(&self, query: &str) -> bool {
        let query = query.trim().to_lowercase();
        query.is_empty()
            || self.bus_id.to_lowercase().contains(&query)
            || self.route.to_lowercase().contains(&query)
            || self.driver.to_lowercase().contains(&query)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> BusRecord {
        BusRecord::new("B1", "R1", "Alice", "2025-01-01", "2025-06-01", BusStatus::Active)
    }

    #[test]
    fn test_first_blank_field() {
        assert_eq!(sample().first_blank_field(), None);

        let mut record = sample();
        record.driver = "   ".to_string();
        assert_eq!(record.first_blank_field(), Some("Driver"));

        record.bus_id = String::new();
        assert_eq!(record.first_blank_field(), Some("Bus ID"));
    }

    #[test]
    fn test_cells_follow_column_order() {
        let mut record = sample();
        record.status = BusStatus::UnderMaintenance;
        assert_eq!(
            record.cells(),
            ["B1", "R1", "Alice", "2025-01-01", "2025-06-01", "Under Maintenance"]
        );
    }

    #[test]
    fn test_status_from_label() {
        assert_eq!(BusStatus::from_label("Active"), Some(BusStatus::Active));
        assert_eq!(
            BusStatus::from_label(" Under Maintenance "),
            Some(BusStatus::UnderMaintenance)
        );
        assert_eq!(BusStatus::from_label("active"), None);
        assert_eq!(BusStatus::from_label("Retired"), None);
    }

    #[test]
    fn test_matches_search() {
        let record = sample();
        assert!(record.matches_search(""));
        assert!(record.matches_search("alice"));
        assert!(record.matches_search(" b1 "));
        assert!(!record.matches_search("bob"));
    }

    #[test]
    fn test_trimmed() {
        let record = BusRecord::new(" B1 ", "R1\t", "Alice", " 2025-01-01", "2025-06-01 ", BusStatus::Active);
        assert_eq!(record.trimmed(), sample());
    }
}
