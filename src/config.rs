//! Configuration management and validation.
//!
//! Provides the conversion settings shared by the parser, the NetCDF
//! writer and the batch runner, with defaults matching the CF output the
//! converter has always produced.

use crate::constants::{
    DEFAULT_DEFLATE_LEVEL, DEFAULT_FILL_VALUE, DEFAULT_METADATA_CONVENTIONS,
    DEFAULT_OUTPUT_EXTENSION,
};
use crate::error::{Result, WeraError};
use crate::models::Dialect;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use tracing::debug;

/// How the header layout of an input file is chosen
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, clap::ValueEnum)]
pub enum DialectChoice {
    /// Sniff the file content
    #[default]
    Auto,
    /// Scan for marker tokens
    Standard,
    /// Use the fixed SKIO line offsets
    Fixed,
}

impl DialectChoice {
    /// The dialect forced by this choice, if any
    pub fn forced(&self) -> Option<Dialect> {
        match self {
            DialectChoice::Auto => None,
            DialectChoice::Standard => Some(Dialect::Standard),
            DialectChoice::Fixed => Some(Dialect::Fixed),
        }
    }
}

/// Settings for one conversion or a batch of conversions
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ConversionConfig {
    pub dialect: DialectChoice,

    /// Fill value written for cells without a report
    pub fill_value: f64,

    /// Deflate level for data and 2D coordinate variables (0 = off)
    pub deflate_level: i32,

    pub shuffle: bool,

    /// Remove an existing output file before writing
    pub overwrite: bool,

    /// Value of the `Metadata_conventions` global attribute
    pub metadata_conventions: String,

    /// Extension given to derived output paths
    pub output_extension: String,

    /// Concurrent conversions in batch mode, one per CPU by default
    pub workers: usize,
}

impl Default for ConversionConfig {
    fn default() -> Self {
        Self {
            dialect: DialectChoice::Auto,
            fill_value: DEFAULT_FILL_VALUE,
            deflate_level: DEFAULT_DEFLATE_LEVEL,
            shuffle: true,
            overwrite: true,
            metadata_conventions: DEFAULT_METADATA_CONVENTIONS.to_string(),
            output_extension: DEFAULT_OUTPUT_EXTENSION.to_string(),
            workers: num_cpus::get(),
        }
    }
}

impl ConversionConfig {
    pub fn with_dialect(mut self, dialect: DialectChoice) -> Self {
        self.dialect = dialect;
        self
    }

    pub fn with_deflate_level(mut self, level: i32) -> Self {
        self.deflate_level = level;
        self
    }

    pub fn with_workers(mut self, workers: usize) -> Self {
        self.workers = workers;
        self
    }

    pub fn with_overwrite(mut self, overwrite: bool) -> Self {
        self.overwrite = overwrite;
        self
    }

    /// Validate configuration values
    pub fn validate(&self) -> Result<()> {
        if !(0..=9).contains(&self.deflate_level) {
            return Err(WeraError::configuration(format!(
                "deflate_level must be between 0 and 9, got {}",
                self.deflate_level
            )));
        }

        if !self.fill_value.is_finite() {
            return Err(WeraError::configuration("fill_value must be finite"));
        }

        if self.workers == 0 {
            return Err(WeraError::configuration("workers must be at least 1"));
        }

        if self.output_extension.is_empty() || self.output_extension.contains('/') {
            return Err(WeraError::configuration(format!(
                "invalid output extension '{}'",
                self.output_extension
            )));
        }

        debug!("Configuration validated: {:?}", self);
        Ok(())
    }

    /// Output path for an input file when none is given explicitly
    pub fn default_output_path(&self, input: &Path, output_dir: Option<&Path>) -> PathBuf {
        let file_name = input.with_extension(&self.output_extension);
        match (output_dir, file_name.file_name()) {
            (Some(dir), Some(name)) => dir.join(name),
            _ => file_name,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config_is_valid() {
        let config = ConversionConfig::default();
        assert!(config.validate().is_ok());
        assert_eq!(config.fill_value, -999.9);
        assert_eq!(config.dialect, DialectChoice::Auto);
        assert_eq!(config.workers, num_cpus::get());
    }

    #[test]
    fn test_invalid_deflate_level() {
        let config = ConversionConfig::default().with_deflate_level(12);
        assert!(matches!(
            config.validate(),
            Err(WeraError::Configuration { .. })
        ));
    }

    #[test]
    fn test_zero_workers_rejected() {
        let config = ConversionConfig::default().with_workers(0);
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_dialect_choice_forced() {
        assert_eq!(DialectChoice::Auto.forced(), None);
        assert_eq!(DialectChoice::Standard.forced(), Some(Dialect::Standard));
        assert_eq!(DialectChoice::Fixed.forced(), Some(Dialect::Fixed));
    }

    #[test]
    fn test_default_output_path() {
        let config = ConversionConfig::default();
        assert_eq!(
            config.default_output_path(Path::new("/data/20152881653_pri.cur_asc"), None),
            PathBuf::from("/data/20152881653_pri.nc")
        );
        assert_eq!(
            config.default_output_path(Path::new("/data/totals.txt"), Some(Path::new("/out"))),
            PathBuf::from("/out/totals.nc")
        );
    }
}
