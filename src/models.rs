//! Core data structures for WERA totals conversion.
//!
//! Defines the parsed file model, the grid definition shared by the mesh and
//! the assembler, and batch statistics.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::PathBuf;

/// Physical layout of a WERA ASCII file
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Dialect {
    /// Header lines found by scanning for marker tokens
    Standard,
    /// SKIO variant with a fixed-length preamble
    Fixed,
}

impl fmt::Display for Dialect {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Dialect::Standard => write!(f, "standard"),
            Dialect::Fixed => write!(f, "fixed (SKIO)"),
        }
    }
}

/// Grid origin, spacing and dimensions from the metadata row
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct GridDefinition {
    /// Longitude of cell (0,0) in degrees
    pub origin_x: f64,
    /// Latitude of cell (0,0) in degrees
    pub origin_y: f64,
    /// Distance between adjacent cells in meters
    pub grid_spacing: f64,
    pub size_x: usize,
    pub size_y: usize,
}

impl GridDefinition {
    pub fn cell_count(&self) -> usize {
        self.size_x * self.size_y
    }

    pub fn contains(&self, ix: usize, iy: usize) -> bool {
        ix < self.size_x && iy < self.size_y
    }
}

/// Scalar metadata of a non-empty totals file
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TotalsMetadata {
    pub origin_time: DateTime<Utc>,
    pub grid: GridDefinition,
    pub dialect: Dialect,
}

/// One row of the station-report table
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct TotalsReport {
    pub ix: usize,
    pub iy: usize,
    /// Eastward velocity (m/s)
    pub u: f64,
    /// Northward velocity (m/s)
    pub v: f64,
    pub u_accuracy: f64,
    pub v_accuracy: f64,
}

/// In-memory result of parsing one WERA totals file
///
/// Built once per file and consumed by export. A file declaring zero
/// reporting stations yields `metadata == None`; a file whose table has no
/// rows keeps its metadata but is still invalid for export.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ParsedTotals {
    /// Station count declared on the first line
    pub declared_stations: i64,
    pub metadata: Option<TotalsMetadata>,
    pub reports: Vec<TotalsReport>,
}

impl ParsedTotals {
    /// Result for a file that declares no reporting stations
    pub fn empty(declared_stations: i64) -> Self {
        Self {
            declared_stations,
            metadata: None,
            reports: Vec::new(),
        }
    }

    pub fn is_valid(&self) -> bool {
        self.declared_stations != 0 && self.metadata.is_some() && !self.reports.is_empty()
    }

    pub fn grid(&self) -> Option<&GridDefinition> {
        self.metadata.as_ref().map(|m| &m.grid)
    }

    /// One-line description used by logging and the `inspect` command
    pub fn summary(&self) -> String {
        match &self.metadata {
            Some(meta) => format!(
                "{} dialect, {} UTC, origin ({}, {}), {}x{} cells at {} m, {} reports from {} stations",
                meta.dialect,
                meta.origin_time.format("%Y-%m-%d %H:%M:%S"),
                meta.grid.origin_x,
                meta.grid.origin_y,
                meta.grid.size_x,
                meta.grid.size_y,
                meta.grid.grid_spacing,
                self.reports.len(),
                self.declared_stations
            ),
            None => format!("empty ({} stations reporting)", self.declared_stations),
        }
    }
}

/// Batch conversion statistics
#[derive(Debug, Default)]
pub struct ConversionStats {
    pub files_converted: usize,
    pub files_skipped: usize,
    pub files_failed: usize,
    pub total_reports: usize,
    pub failures: Vec<(PathBuf, String)>,
    pub processing_time_ms: u128,
}

impl ConversionStats {
    pub fn files_seen(&self) -> usize {
        self.files_converted + self.files_skipped + self.files_failed
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn sample_metadata() -> TotalsMetadata {
        TotalsMetadata {
            origin_time: Utc.with_ymd_and_hms(2012, 2, 9, 23, 0, 0).unwrap(),
            grid: GridDefinition {
                origin_x: -84.41666,
                origin_y: 28.58333,
                grid_spacing: 1500.0,
                size_x: 130,
                size_y: 210,
            },
            dialect: Dialect::Standard,
        }
    }

    #[test]
    fn test_empty_totals_are_invalid() {
        let totals = ParsedTotals::empty(0);
        assert!(!totals.is_valid());
        assert!(totals.grid().is_none());
        assert!(totals.summary().contains("empty"));
    }

    #[test]
    fn test_metadata_without_reports_is_invalid() {
        let totals = ParsedTotals {
            declared_stations: 2,
            metadata: Some(sample_metadata()),
            reports: Vec::new(),
        };
        assert!(!totals.is_valid());
    }

    #[test]
    fn test_valid_totals_summary() {
        let totals = ParsedTotals {
            declared_stations: 2,
            metadata: Some(sample_metadata()),
            reports: vec![TotalsReport {
                ix: 1,
                iy: 2,
                u: 0.1,
                v: 0.2,
                u_accuracy: 0.01,
                v_accuracy: 0.02,
            }],
        };
        assert!(totals.is_valid());
        let summary = totals.summary();
        assert!(summary.contains("130x210"));
        assert!(summary.contains("1500 m"));
    }

    #[test]
    fn test_grid_contains() {
        let grid = sample_metadata().grid;
        assert!(grid.contains(0, 0));
        assert!(grid.contains(129, 209));
        assert!(!grid.contains(130, 0));
        assert!(!grid.contains(0, 210));
        assert_eq!(grid.cell_count(), 27_300);
    }
}
