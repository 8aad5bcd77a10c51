//! Error handling for WERA totals conversion.
//!
//! Provides error types with file context for header location, tabular
//! parsing, grid assembly and NetCDF export failures.

use std::path::PathBuf;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum WeraError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("NetCDF error: {0}")]
    NetCdf(#[from] netcdf::Error),

    #[error("Input file not found: {path}")]
    FileNotFound { path: PathBuf },

    #[error("Malformed WERA file: {path} - {reason}")]
    MalformedFile { path: PathBuf, reason: String },

    #[error("Marker '{marker}' not found in file: {path}")]
    MissingMarker { path: PathBuf, marker: &'static str },

    #[error("Required column '{column}' missing from header on line {line} of {path}")]
    MissingColumn {
        path: PathBuf,
        line: usize,
        column: String,
    },

    #[error("Invalid value '{value}' for column '{column}' on line {line} of {path}")]
    InvalidValue {
        path: PathBuf,
        line: usize,
        column: String,
        value: String,
    },

    #[error("Could not parse timestamp '{value}' in {path}: {reason}")]
    InvalidTimestamp {
        path: PathBuf,
        value: String,
        reason: String,
    },

    #[error("Report index ({ix}, {iy}) is outside the {size_x}x{size_y} grid")]
    IndexOutOfRange {
        ix: usize,
        iy: usize,
        size_x: usize,
        size_y: usize,
    },

    #[error(
        "Grid file {path} defines {found} distinct {axis} values, expected {expected}"
    )]
    GridMismatch {
        path: PathBuf,
        axis: &'static str,
        expected: usize,
        found: usize,
    },

    #[error("Could not export WERA data, the input file was invalid: {reason}")]
    EmptyInput { reason: String },

    #[error("Configuration error: {message}")]
    Configuration { message: String },
}

impl WeraError {
    pub fn malformed(path: impl Into<PathBuf>, reason: impl Into<String>) -> Self {
        Self::MalformedFile {
            path: path.into(),
            reason: reason.into(),
        }
    }

    pub fn configuration(message: impl Into<String>) -> Self {
        Self::Configuration {
            message: message.into(),
        }
    }

    /// True for every error that means the input file itself is broken.
    pub fn is_malformed(&self) -> bool {
        matches!(
            self,
            Self::MalformedFile { .. }
                | Self::MissingMarker { .. }
                | Self::MissingColumn { .. }
                | Self::InvalidValue { .. }
                | Self::InvalidTimestamp { .. }
                | Self::IndexOutOfRange { .. }
        )
    }

    pub fn is_empty_input(&self) -> bool {
        matches!(self, Self::EmptyInput { .. })
    }
}

pub type Result<T> = std::result::Result<T, WeraError>;
