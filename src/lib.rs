//! WERA totals to NetCDF
//!
//! A Rust library for converting WERA HF-radar total surface current ASCII
//! files into CF-1.6 NetCDF grids.
//!
//! This library provides tools for:
//! - Locating the header blocks of standard and SKIO (fixed) WERA files
//! - Parsing origin metadata, the time record and the station-report table
//! - Assembling sparse reports into dense masked grids
//! - Computing coordinate meshes along WGS84 geodesics
//! - Writing CF NetCDF datasets

pub mod config;
pub mod constants;
pub mod error;
pub mod grid;
pub mod header;
pub mod models;
pub mod parser;
pub mod processor;

// CLI modules
pub mod cli {
    pub mod args;
    pub mod commands;
}

// Re-export commonly used types
pub use config::{ConversionConfig, DialectChoice};
pub use error::{Result, WeraError};
pub use grid::{CoordinateMesh, DenseGrid, GridSource};
pub use models::{Dialect, GridDefinition, ParsedTotals, TotalsReport};
pub use parser::{TotalsParser, parse_file};
pub use processor::{ExportSummary, TotalsConverter};
