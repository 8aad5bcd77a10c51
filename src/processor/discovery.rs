//! Input discovery for batch conversion
//!
//! Finds WERA totals files under a directory by matching file names against
//! a glob pattern.

use crate::error::{Result, WeraError};
use glob::Pattern;
use std::path::{Path, PathBuf};
use tracing::debug;
use walkdir::WalkDir;

/// Finds input files under a directory
#[derive(Debug, Clone)]
pub struct InputDiscovery {
    pattern: Pattern,
    recursive: bool,
}

impl InputDiscovery {
    /// Create a discovery for file names matching `pattern`
    pub fn new(pattern: &str, recursive: bool) -> Result<Self> {
        let pattern = Pattern::new(pattern).map_err(|e| {
            WeraError::configuration(format!("invalid file pattern '{}': {}", pattern, e))
        })?;
        Ok(Self { pattern, recursive })
    }

    pub fn matches(&self, path: &Path) -> bool {
        path.file_name()
            .and_then(|name| name.to_str())
            .is_some_and(|name| self.pattern.matches(name))
    }

    /// Matching files under `dir`, sorted by path
    pub fn discover(&self, dir: &Path) -> Result<Vec<PathBuf>> {
        if !dir.is_dir() {
            return Err(WeraError::FileNotFound {
                path: dir.to_path_buf(),
            });
        }

        let max_depth = if self.recursive { usize::MAX } else { 1 };
        let mut files: Vec<PathBuf> = WalkDir::new(dir)
            .max_depth(max_depth)
            .follow_links(false)
            .into_iter()
            .filter_map(|e| e.ok())
            .filter(|entry| entry.file_type().is_file() && self.matches(entry.path()))
            .map(|entry| entry.into_path())
            .collect();

        files.sort();
        debug!(
            "Found {} files matching '{}' in {}",
            files.len(),
            self.pattern,
            dir.display()
        );

        Ok(files)
    }
}
