//! Command-line argument definitions for the WERA converter
//!
//! Defines the CLI interface using the clap derive API.

use crate::config::{ConversionConfig, DialectChoice};
use crate::constants::{DEFAULT_BATCH_PATTERN, DEFAULT_DEFLATE_LEVEL};
use crate::grid::GridSource;
use clap::{Args as ClapArgs, Parser, Subcommand};
use std::path::PathBuf;

/// CLI arguments for the WERA totals converter
///
/// Converts WERA HF-radar total current ASCII files into CF-1.6 NetCDF
/// grids of surface current velocity and accuracy.
#[derive(Debug, Clone, Parser)]
#[command(
    name = "wera2netcdf",
    version,
    about = "Convert WERA HF-radar totals ASCII files to CF NetCDF",
    long_about = "Parses WERA (and SKIO) total surface current ASCII files and writes \
                  CF-1.6 NetCDF grids of eastward/northward velocity and accuracy. \
                  Coordinates are computed along WGS84 geodesics from the grid origin \
                  or read from a grid-definition file."
)]
pub struct Args {
    #[command(subcommand)]
    pub command: Commands,

    /// Increase logging verbosity
    #[arg(
        short = 'v',
        long = "verbose",
        global = true,
        action = clap::ArgAction::Count,
        help = "Increase logging verbosity (-v: debug, -vv: trace)"
    )]
    pub verbose: u8,

    /// Only show warnings and errors
    #[arg(
        short = 'q',
        long = "quiet",
        global = true,
        conflicts_with = "verbose",
        help = "Suppress output except warnings and errors"
    )]
    pub quiet: bool,
}

/// Available subcommands
#[derive(Debug, Clone, Subcommand)]
pub enum Commands {
    /// Convert a single totals file
    Convert(ConvertArgs),
    /// Convert every matching totals file in a directory
    Batch(BatchArgs),
    /// Parse a totals file and print its metadata without writing
    Inspect(InspectArgs),
}

/// Options shared by `convert` and `batch`
#[derive(Debug, Clone, ClapArgs)]
pub struct OutputOptions {
    /// Header layout of the input files
    #[arg(long, value_enum, default_value_t = DialectChoice::Auto)]
    pub dialect: DialectChoice,

    /// Grid-definition file giving rectilinear lat/lon axes
    ///
    /// Without it the coordinates are computed along WGS84 geodesics from
    /// the grid origin.
    #[arg(long = "grid", value_name = "FILE")]
    pub grid_file: Option<PathBuf>,

    /// Deflate level for data variables (0 disables compression)
    #[arg(long, default_value_t = DEFAULT_DEFLATE_LEVEL, value_name = "LEVEL")]
    pub deflate: i32,

    /// Refuse to replace existing output files
    #[arg(long = "no-overwrite")]
    pub no_overwrite: bool,
}

impl OutputOptions {
    pub fn grid_source(&self) -> GridSource {
        match &self.grid_file {
            Some(path) => GridSource::File(path.clone()),
            None => GridSource::Geodesic,
        }
    }

    pub fn to_config(&self) -> ConversionConfig {
        ConversionConfig::default()
            .with_dialect(self.dialect)
            .with_deflate_level(self.deflate)
            .with_overwrite(!self.no_overwrite)
    }
}

/// Arguments for the convert command
#[derive(Debug, Clone, Parser)]
pub struct ConvertArgs {
    /// WERA totals file to convert
    #[arg(value_name = "INPUT")]
    pub input: PathBuf,

    /// Output NetCDF path (defaults to INPUT with a .nc extension)
    #[arg(short = 'o', long = "output", value_name = "PATH")]
    pub output: Option<PathBuf>,

    #[command(flatten)]
    pub options: OutputOptions,
}

/// Arguments for the batch command
#[derive(Debug, Clone, Parser)]
pub struct BatchArgs {
    /// Directory holding WERA totals files
    #[arg(value_name = "DIR")]
    pub input_dir: PathBuf,

    /// Directory for NetCDF output (defaults to next to each input)
    #[arg(short = 'o', long = "output-dir", value_name = "DIR")]
    pub output_dir: Option<PathBuf>,

    /// File name pattern selecting input files
    #[arg(long, default_value = DEFAULT_BATCH_PATTERN, value_name = "GLOB")]
    pub pattern: String,

    /// Descend into subdirectories
    #[arg(short = 'r', long)]
    pub recursive: bool,

    /// Number of files converted concurrently [default: number of CPUs]
    #[arg(short = 'w', long, value_name = "N")]
    pub workers: Option<usize>,

    #[command(flatten)]
    pub options: OutputOptions,
}

impl BatchArgs {
    pub fn to_config(&self) -> ConversionConfig {
        let config = self.options.to_config();
        match self.workers {
            Some(workers) => config.with_workers(workers),
            None => config,
        }
    }
}

/// Arguments for the inspect command
#[derive(Debug, Clone, Parser)]
pub struct InspectArgs {
    /// WERA totals file to inspect
    #[arg(value_name = "INPUT")]
    pub input: PathBuf,

    #[arg(long, value_enum, default_value_t = DialectChoice::Auto)]
    pub dialect: DialectChoice,

    /// Print the parsed metadata as JSON
    #[arg(long)]
    pub json: bool,
}

impl Args {
    /// Log level implied by the verbosity flags
    pub fn get_log_level(&self) -> &'static str {
        if self.quiet {
            "warn"
        } else {
            match self.verbose {
                0 => "info",
                1 => "debug",
                _ => "trace",
            }
        }
    }

    pub fn show_progress(&self) -> bool {
        !self.quiet
    }
}
