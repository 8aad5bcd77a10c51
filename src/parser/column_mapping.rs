//! Column mapping for whitespace-delimited WERA tables
//!
//! Both the origin metadata block and the station-report table carry a header
//! line naming their columns. Field positions are always looked up by name so
//! the column order in a file does not matter.

use crate::error::{Result, WeraError};
use std::collections::HashMap;
use std::path::Path;

/// Column name to index mapping for one header line
#[derive(Debug, Clone)]
pub struct ColumnMapping {
    /// Column name to index mapping
    pub name_to_index: HashMap<String, usize>,

    /// Line number (1-based) the header was read from
    pub header_line: usize,
}

impl ColumnMapping {
    /// Build a mapping from a header line, splitting on runs of whitespace
    pub fn from_header_line(line: &str, header_line: usize) -> Self {
        let name_to_index = line
            .split_whitespace()
            .enumerate()
            .map(|(index, name)| (name.to_string(), index))
            .collect();

        Self {
            name_to_index,
            header_line,
        }
    }

    /// Get the index for a given column name
    pub fn get_index(&self, column_name: &str) -> Option<usize> {
        self.name_to_index.get(column_name).copied()
    }

    pub fn has_column(&self, column_name: &str) -> bool {
        self.name_to_index.contains_key(column_name)
    }

    pub fn column_count(&self) -> usize {
        self.name_to_index.len()
    }

    /// Check that every required column is present
    pub fn require(&self, required: &[&str], path: &Path) -> Result<()> {
        match required.iter().find(|name| !self.has_column(name)) {
            Some(missing) => Err(WeraError::MissingColumn {
                path: path.to_path_buf(),
                line: self.header_line,
                column: missing.to_string(),
            }),
            None => Ok(()),
        }
    }
}
