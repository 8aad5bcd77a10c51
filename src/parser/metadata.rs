//! Origin metadata row parsing
//!
//! The metadata block is a header line naming `LAT(1,1)`, `LON(1,1)`,
//! `DGT[km]`, `NX` and `NY` (among others), a units line, and a single data
//! row.

use super::column_mapping::ColumnMapping;
use super::field_parsers::{RowContext, parse_required_f64, parse_required_usize};
use crate::constants::columns;
use crate::error::{Result, WeraError};
use crate::header::HeaderLayout;
use crate::models::GridDefinition;
use std::path::Path;

const METERS_PER_KILOMETER: f64 = 1000.0;

/// Parse the origin metadata row into a grid definition
pub fn parse_origin_metadata(
    lines: &[&str],
    layout: &HeaderLayout,
    path: &Path,
) -> Result<GridDefinition> {
    let header = lines.get(layout.metadata_header).ok_or_else(|| {
        WeraError::malformed(path, "file ends before the origin metadata header")
    })?;
    let mapping = ColumnMapping::from_header_line(header, layout.metadata_header + 1);
    mapping.require(columns::REQUIRED_METADATA, path)?;

    let data_line = layout.metadata_data_line();
    let row = lines
        .get(data_line)
        .filter(|l| !l.trim().is_empty())
        .ok_or_else(|| {
            WeraError::malformed(
                path,
                format!("no origin metadata row on line {}", data_line + 1),
            )
        })?;

    let fields: Vec<&str> = row.split_whitespace().collect();
    let ctx = RowContext {
        path,
        line: data_line + 1,
    };

    let origin_x = parse_required_f64(&fields, &mapping, columns::ORIGIN_LON, ctx)?;
    let origin_y = parse_required_f64(&fields, &mapping, columns::ORIGIN_LAT, ctx)?;
    let spacing_km = parse_required_f64(&fields, &mapping, columns::GRID_SPACING_KM, ctx)?;
    let size_x = parse_required_usize(&fields, &mapping, columns::SIZE_X, ctx)?;
    let size_y = parse_required_usize(&fields, &mapping, columns::SIZE_Y, ctx)?;

    if spacing_km <= 0.0 {
        return Err(WeraError::malformed(
            path,
            format!("grid spacing must be positive, got {} km", spacing_km),
        ));
    }
    if size_x == 0 || size_y == 0 {
        return Err(WeraError::malformed(
            path,
            format!("grid dimensions must be positive, got {}x{}", size_x, size_y),
        ));
    }

    Ok(GridDefinition {
        origin_x,
        origin_y,
        grid_spacing: spacing_km * METERS_PER_KILOMETER,
        size_x,
        size_y,
    })
}
