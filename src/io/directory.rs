//! Vehicle → flat directory loaded from a two-column table
//!
//! The table is a plain CSV: first two columns are used regardless of
//! their header names, the first line is treated as a header and skipped.
//! Both columns are normalized on load so runtime lookups compare
//! canonical forms. The directory is a read-only snapshot for the
//! process lifetime.

use crate::services::normalizer::{normalize_flat, normalize_vehicle};
use anyhow::Context;
use std::collections::HashMap;
use std::path::Path;
use tracing::{debug, info};

pub struct Directory {
    /// Normalized table rows in load order, duplicates included
    rows: Vec<(String, String)>,
    /// Forward lookup keys; duplicates keep the last-seen mapping
    pairs: HashMap<String, String>,
}

impl Directory {
    /// Load the directory table from a file.
    ///
    /// A missing or unreadable table is fatal: the caller is expected to
    /// halt rather than run with an empty directory.
    pub fn load<P: AsRef<Path>>(path: P) -> anyhow::Result<Self> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read directory table {}", path.display()))?;

        let directory = Self::from_table(&content);
        info!(
            path = %path.display(),
            entries = directory.len(),
            "directory_loaded"
        );
        Ok(directory)
    }

    /// Build a directory from raw table content.
    ///
    /// The first line is a header and is skipped. Rows with fewer than
    /// two columns are ignored. Duplicate vehicle keys keep the
    /// last-seen mapping.
    pub fn from_table(content: &str) -> Self {
        let mut rows = Vec::new();
        let mut pairs = HashMap::new();

        for line in content.lines().skip(1) {
            let mut columns = line.split(',');
            let (Some(vehicle), Some(flat)) = (columns.next(), columns.next()) else {
                continue;
            };

            let vehicle = normalize_vehicle(vehicle);
            let flat = normalize_flat(flat);
            if vehicle.is_empty() {
                continue;
            }

            if let Some(previous) = pairs.insert(vehicle.clone(), flat.clone()) {
                debug!(vehicle = %vehicle, previous = %previous, "directory_duplicate_key");
            }
            rows.push((vehicle, flat));
        }

        Self { rows, pairs }
    }

    /// Look up the flat for an already-normalized vehicle number
    pub fn lookup(&self, vehicle_id: &str) -> Option<&str> {
        self.pairs.get(vehicle_id).map(String::as_str)
    }

    /// Reverse lookup: first vehicle registered for a normalized flat.
    /// Rows are scanned in table order, so the result is stable across
    /// loads even when several vehicles share a flat.
    pub fn lookup_vehicle(&self, flat_id: &str) -> Option<&str> {
        self.rows
            .iter()
            .find(|(_, flat)| flat.as_str() == flat_id)
            .map(|(vehicle, _)| vehicle.as_str())
    }

    pub fn len(&self) -> usize {
        self.pairs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.pairs.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const TABLE: &str = "Vehicle,FlatNumber\n\
                         mh01 ao 1234,101\n\
                         KA05MN4455,B-702\n\
                         dl 3c aa 0001,f1203\n";

    #[test]
    fn test_load_normalizes_both_columns() {
        let dir = Directory::from_table(TABLE);
        assert_eq!(dir.len(), 3);
        assert_eq!(dir.lookup("MH01A01234"), Some("F101"));
        assert_eq!(dir.lookup("KA05MN4455"), Some("B-702"));
        assert_eq!(dir.lookup("DL3CAA0001"), Some("F1203"));
    }

    #[test]
    fn test_lookup_after_input_normalization() {
        let dir = Directory::from_table(TABLE);
        let key = normalize_vehicle("mh01 ao 1234");
        assert_eq!(dir.lookup(&key), Some("F101"));
    }

    #[test]
    fn test_lookup_unknown_vehicle() {
        let dir = Directory::from_table(TABLE);
        assert_eq!(dir.lookup("UP32ZZ9999"), None);
    }

    #[test]
    fn test_duplicate_key_last_wins() {
        let table = "Vehicle,Flat\nMH01AB1111,101\nMH01AB1111,202\n";
        let dir = Directory::from_table(table);
        assert_eq!(dir.len(), 1);
        assert_eq!(dir.lookup("MH01AB1111"), Some("F202"));
    }

    #[test]
    fn test_header_row_skipped() {
        let table = "Vehicle,FlatNumber\nMH01AB1111,101\n";
        let dir = Directory::from_table(table);
        assert_eq!(dir.lookup("VEHICLE"), None);
        assert_eq!(dir.len(), 1);
    }

    #[test]
    fn test_short_rows_ignored() {
        let table = "Vehicle,Flat\nMH01AB1111,101\njust-one-column\n\n";
        let dir = Directory::from_table(table);
        assert_eq!(dir.len(), 1);
    }

    #[test]
    fn test_extra_columns_ignored() {
        let table = "Vehicle,Flat,Owner\nMH01AB1111,101,Sharma\n";
        let dir = Directory::from_table(table);
        assert_eq!(dir.lookup("MH01AB1111"), Some("F101"));
    }

    #[test]
    fn test_reverse_lookup() {
        let dir = Directory::from_table(TABLE);
        assert_eq!(dir.lookup_vehicle("B-702"), Some("KA05MN4455"));
        assert_eq!(dir.lookup_vehicle("F999"), None);
    }

    #[test]
    fn test_reverse_lookup_shared_flat_returns_first_row() {
        // A household with several vehicles: the first table row wins,
        // consistently across loads
        let table = "Vehicle,Flat\n\
                     MH01AB0000,101\n\
                     MH01AB0001,101\n\
                     MH01AB0002,101\n";
        for _ in 0..32 {
            let dir = Directory::from_table(table);
            assert_eq!(dir.lookup_vehicle("F101"), Some("MH01AB0000"));
        }
    }

    #[test]
    fn test_load_missing_file_is_error() {
        assert!(Directory::load("/nonexistent/pairs.csv").is_err());
    }
}
