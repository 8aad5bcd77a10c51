//! WERA ASCII totals parser
//!
//! Turns the raw text of a WERA (or SKIO) totals file into a
//! [`ParsedTotals`]. The work is split into:
//! - [`column_mapping`] - name-based lookup of whitespace-delimited columns
//! - [`field_parsers`] - typed field extraction with line context
//! - [`metadata`] - the origin metadata row (origin, spacing, dimensions)
//! - [`time_record`] - the two-line positional time record
//! - [`reports`] - the sparse station-report table
//!
//! ## Usage
//!
//! ```no_run
//! use wera2netcdf::config::DialectChoice;
//! use wera2netcdf::parser::TotalsParser;
//!
//! # fn example() -> wera2netcdf::error::Result<()> {
//! let parser = TotalsParser::new(DialectChoice::Auto);
//! let totals = parser.parse_file(std::path::Path::new("totals.txt"))?;
//! println!("{}", totals.summary());
//! # Ok(())
//! # }
//! ```

pub mod column_mapping;
pub mod field_parsers;
pub mod metadata;
pub mod reports;
pub mod time_record;

#[cfg(test)]
mod tests;

pub use column_mapping::ColumnMapping;
pub use time_record::TimeRecord;

use crate::config::DialectChoice;
use crate::error::{Result, WeraError};
use crate::header::{HeaderScan, scan_headers};
use crate::models::{ParsedTotals, TotalsMetadata};
use std::path::Path;
use tracing::{debug, warn};

/// Parser for WERA totals files
#[derive(Debug, Clone, Copy, Default)]
pub struct TotalsParser {
    dialect: DialectChoice,
}

impl TotalsParser {
    pub fn new(dialect: DialectChoice) -> Self {
        Self { dialect }
    }

    /// Read and parse a totals file
    pub fn parse_file(&self, path: &Path) -> Result<ParsedTotals> {
        if !path.exists() {
            return Err(WeraError::FileNotFound {
                path: path.to_path_buf(),
            });
        }

        let content = std::fs::read_to_string(path)?;
        self.parse_str(&content, path)
    }

    /// Parse file content; `path` is only used for error context
    pub fn parse_str(&self, content: &str, path: &Path) -> Result<ParsedTotals> {
        let lines: Vec<&str> = content.lines().collect();

        let (declared_stations, layout) = match scan_headers(&lines, self.dialect, path)? {
            HeaderScan::NoStations => {
                warn!(
                    "WERA file {} is not valid: no stations reporting",
                    path.display()
                );
                return Ok(ParsedTotals::empty(0));
            }
            HeaderScan::Located {
                declared_stations,
                layout,
            } => (declared_stations, layout),
        };

        let grid = metadata::parse_origin_metadata(&lines, &layout, path)?;
        let origin_time = time_record::parse_time_record(&lines, path)?;
        let reports = reports::parse_reports(&lines, &layout, &grid, path)?;

        if reports.is_empty() {
            warn!(
                "WERA file {} declares {} stations but has no report rows",
                path.display(),
                declared_stations
            );
        }

        debug!(
            "Parsed {}: {} reports on a {}x{} grid",
            path.display(),
            reports.len(),
            grid.size_x,
            grid.size_y
        );

        Ok(ParsedTotals {
            declared_stations,
            metadata: Some(TotalsMetadata {
                origin_time,
                grid,
                dialect: layout.dialect,
            }),
            reports,
        })
    }
}

/// Parse a file, sniffing its dialect
pub fn parse_file(path: &Path) -> Result<ParsedTotals> {
    TotalsParser::default().parse_file(path)
}
