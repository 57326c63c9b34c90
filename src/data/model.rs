use std::fmt;

use chrono::{NaiveDateTime, Timelike};

// ---------------------------------------------------------------------------
// InjuryCategory – affected-party type selectable in the UI
// ---------------------------------------------------------------------------

/// Affected-party category used by the "top dangerous streets" ranking.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InjuryCategory {
    Pedestrians,
    Cyclists,
    Motorists,
}

impl InjuryCategory {
    /// All categories, in UI order.
    pub const ALL: [InjuryCategory; 3] = [
        InjuryCategory::Pedestrians,
        InjuryCategory::Cyclists,
        InjuryCategory::Motorists,
    ];

    /// The injury count of this category for a given record.
    pub fn count(&self, record: &CollisionRecord) -> u32 {
        match self {
            InjuryCategory::Pedestrians => record.pedestrians_injured,
            InjuryCategory::Cyclists => record.cyclists_injured,
            InjuryCategory::Motorists => record.motorists_injured,
        }
    }

    /// Source column this category ranks by (shown as a table header).
    pub fn column_label(&self) -> &'static str {
        match self {
            InjuryCategory::Pedestrians => "number of pedestrians injured",
            InjuryCategory::Cyclists => "number of cyclist injured",
            InjuryCategory::Motorists => "number of motorist injured",
        }
    }
}

impl fmt::Display for InjuryCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            InjuryCategory::Pedestrians => "Pedestrians",
            InjuryCategory::Cyclists => "Cyclists",
            InjuryCategory::Motorists => "Motorists",
        };
        write!(f, "{name}")
    }
}

// ---------------------------------------------------------------------------
// CollisionRecord – one row of the dataset
// ---------------------------------------------------------------------------

/// A single collision (one row of the source table).
///
/// Invariant: `latitude` and `longitude` are finite. Rows without usable
/// coordinates are dropped at load time and never reach this type.
#[derive(Debug, Clone, PartialEq)]
pub struct CollisionRecord {
    /// Crash date and time, combined from the source's two columns.
    pub datetime: NaiveDateTime,
    pub latitude: f64,
    pub longitude: f64,
    pub persons_injured: u32,
    pub pedestrians_injured: u32,
    pub cyclists_injured: u32,
    pub motorists_injured: u32,
    /// `None` when the source cell is blank.
    pub street: Option<String>,
}

impl CollisionRecord {
    /// Hour of day, 0..=23.
    pub fn hour(&self) -> u32 {
        self.datetime.hour()
    }

    /// Minute within the hour, 0..=59.
    pub fn minute(&self) -> u32 {
        self.datetime.minute()
    }
}

// ---------------------------------------------------------------------------
// CollisionDataset – the complete loaded dataset
// ---------------------------------------------------------------------------

/// The full parsed dataset with pre-computed bounds.
#[derive(Debug, Clone, Default)]
pub struct CollisionDataset {
    /// All collisions (rows), in file order.
    pub records: Vec<CollisionRecord>,
    /// Largest persons-injured count in the dataset; upper bound of the
    /// threshold slider.
    pub max_persons_injured: u32,
}

impl CollisionDataset {
    /// Build dataset bounds from the loaded records.
    pub fn from_records(records: Vec<CollisionRecord>) -> Self {
        let max_persons_injured = records
            .iter()
            .map(|r| r.persons_injured)
            .max()
            .unwrap_or(0);
        CollisionDataset {
            records,
            max_persons_injured,
        }
    }

    /// Number of collisions.
    pub fn len(&self) -> usize {
        self.records.len()
    }

    /// Whether the dataset is empty.
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn record(persons: u32, pedestrians: u32, cyclists: u32, motorists: u32) -> CollisionRecord {
        CollisionRecord {
            datetime: NaiveDate::from_ymd_opt(2021, 6, 15)
                .unwrap()
                .and_hms_opt(8, 30, 0)
                .unwrap(),
            latitude: 40.71,
            longitude: -74.0,
            persons_injured: persons,
            pedestrians_injured: pedestrians,
            cyclists_injured: cyclists,
            motorists_injured: motorists,
            street: Some("BROADWAY".to_string()),
        }
    }

    #[test]
    fn computes_max_persons_injured() {
        let ds = CollisionDataset::from_records(vec![record(1, 0, 0, 1), record(4, 2, 0, 2)]);
        assert_eq!(ds.max_persons_injured, 4);
        assert_eq!(ds.len(), 2);
    }

    #[test]
    fn empty_dataset_has_zero_bound() {
        let ds = CollisionDataset::from_records(Vec::new());
        assert!(ds.is_empty());
        assert_eq!(ds.max_persons_injured, 0);
    }

    #[test]
    fn category_accessors_read_matching_column() {
        let r = record(3, 1, 2, 0);
        assert_eq!(InjuryCategory::Pedestrians.count(&r), 1);
        assert_eq!(InjuryCategory::Cyclists.count(&r), 2);
        assert_eq!(InjuryCategory::Motorists.count(&r), 0);
    }
}
