//! Conversion engine.
//!
//! Orchestrates one WERA totals file into one NetCDF dataset: parsing,
//! coordinate mesh construction, grid assembly and export. Batch discovery
//! lives in [`discovery`], the NetCDF adapter in [`writer`].

pub mod discovery;
pub mod writer;

#[cfg(test)]
mod tests;

use self::writer::{ExportDataset, NetCdfWriter};

use crate::config::ConversionConfig;
use crate::error::{Result, WeraError};
use crate::grid::{CoordinateMesh, DenseGrid, GridSource};
use crate::models::ParsedTotals;
use crate::parser::TotalsParser;

use serde::Serialize;
use std::path::{Path, PathBuf};
use std::time::Instant;
use tracing::{debug, info, info_span};

/// Outcome of one successful conversion
#[derive(Debug, Clone, Serialize)]
pub struct ExportSummary {
    pub output: PathBuf,
    pub reports: usize,
    /// Cells holding a value after duplicate reports are resolved
    pub reported_cells: usize,
    pub size_x: usize,
    pub size_y: usize,
    pub rectilinear: bool,
    pub processing_time_ms: u128,
}

/// Converter for WERA totals files
#[derive(Debug, Clone)]
pub struct TotalsConverter {
    config: ConversionConfig,
    parser: TotalsParser,
    writer: NetCdfWriter,
}

impl TotalsConverter {
    /// Create a converter, validating the configuration
    pub fn new(config: ConversionConfig) -> Result<Self> {
        config.validate()?;
        Ok(Self {
            parser: TotalsParser::new(config.dialect),
            writer: NetCdfWriter::new(&config),
            config,
        })
    }

    pub fn config(&self) -> &ConversionConfig {
        &self.config
    }

    /// Parse an input file without exporting it
    pub fn inspect(&self, input: &Path) -> Result<ParsedTotals> {
        self.parser.parse_file(input)
    }

    /// Parse `input` and write it to `output`
    pub fn convert(&self, input: &Path, output: &Path, grid: &GridSource) -> Result<ExportSummary> {
        let span = info_span!("convert", input = %input.display());
        let _guard = span.enter();

        let totals = self.parser.parse_file(input)?;
        debug!("{}", totals.summary());
        self.export(totals, output, grid)
    }

    /// Write parsed totals to `output`
    ///
    /// Fails with [`WeraError::EmptyInput`] without touching the filesystem
    /// when the totals are not valid for export. Validity is checked before
    /// the overwrite setting.
    pub fn export(
        &self,
        totals: ParsedTotals,
        output: &Path,
        grid: &GridSource,
    ) -> Result<ExportSummary> {
        let start = Instant::now();
        let reports = totals.reports.len();

        let dataset = prepare_export(totals, grid)?;

        if !self.config.overwrite && output.exists() {
            return Err(WeraError::configuration(format!(
                "output {} already exists and overwrite is disabled",
                output.display()
            )));
        }
        self.writer.write(&dataset, output)?;

        let (size_x, size_y) = dataset.data.shape();
        let summary = ExportSummary {
            output: output.to_path_buf(),
            reports,
            reported_cells: dataset.data.u.reported_count(),
            size_x,
            size_y,
            rectilinear: dataset.mesh.is_rectilinear(),
            processing_time_ms: start.elapsed().as_millis(),
        };

        info!(
            "Wrote {} ({} reports, {} of {} cells)",
            output.display(),
            summary.reports,
            summary.reported_cells,
            size_x * size_y
        );

        Ok(summary)
    }
}

/// Build the mesh and dense grids for a parsed file
pub fn prepare_export(totals: ParsedTotals, grid: &GridSource) -> Result<ExportDataset> {
    let metadata = match (&totals.metadata, totals.is_valid()) {
        (Some(metadata), true) => metadata,
        (None, _) => {
            return Err(WeraError::EmptyInput {
                reason: format!("{} stations reporting", totals.declared_stations),
            });
        }
        (Some(_), false) => {
            return Err(WeraError::EmptyInput {
                reason: "no station reports".to_string(),
            });
        }
    };

    let mesh = CoordinateMesh::build(grid, &metadata.grid)?;
    let data = DenseGrid::assemble(metadata.grid.size_x, metadata.grid.size_y, &totals.reports)?;

    Ok(ExportDataset {
        origin_time: metadata.origin_time,
        data,
        mesh,
    })
}
