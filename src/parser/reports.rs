//! Station-report table parsing
//!
//! Every non-blank line below the table header (after the units line) is one
//! report. Columns are found by name in the header line, so extra columns and
//! reordered columns are handled.

use super::column_mapping::ColumnMapping;
use super::field_parsers::{RowContext, parse_required_f64, parse_required_usize};
use crate::constants::columns;
use crate::error::{Result, WeraError};
use crate::header::HeaderLayout;
use crate::models::{GridDefinition, TotalsReport};
use std::path::Path;

/// Parse all report rows, checking indices against the grid
pub fn parse_reports(
    lines: &[&str],
    layout: &HeaderLayout,
    grid: &GridDefinition,
    path: &Path,
) -> Result<Vec<TotalsReport>> {
    let header = lines
        .get(layout.table_header)
        .ok_or_else(|| WeraError::malformed(path, "file ends before the station table header"))?;
    let mapping = ColumnMapping::from_header_line(header, layout.table_header + 1);
    mapping.require(columns::REQUIRED_REPORT, path)?;

    let mut reports = Vec::new();
    for (index, line) in lines.iter().enumerate().skip(layout.table_data_line()) {
        let fields: Vec<&str> = line.split_whitespace().collect();
        if fields.is_empty() {
            continue;
        }

        let ctx = RowContext {
            path,
            line: index + 1,
        };
        let report = parse_report_row(&fields, &mapping, ctx)?;

        if !grid.contains(report.ix, report.iy) {
            let out_of_range = WeraError::IndexOutOfRange {
                ix: report.ix,
                iy: report.iy,
                size_x: grid.size_x,
                size_y: grid.size_y,
            };
            return Err(WeraError::malformed(
                path,
                format!("line {}: {}", index + 1, out_of_range),
            ));
        }

        reports.push(report);
    }

    Ok(reports)
}

fn parse_report_row(
    fields: &[&str],
    mapping: &ColumnMapping,
    ctx: RowContext<'_>,
) -> Result<TotalsReport> {
    Ok(TotalsReport {
        ix: parse_required_usize(fields, mapping, columns::IX, ctx)?,
        iy: parse_required_usize(fields, mapping, columns::IY, ctx)?,
        u: parse_required_f64(fields, mapping, columns::U, ctx)?,
        v: parse_required_f64(fields, mapping, columns::V, ctx)?,
        u_accuracy: parse_required_f64(fields, mapping, columns::U_ACCURACY, ctx)?,
        v_accuracy: parse_required_f64(fields, mapping, columns::V_ACCURACY, ctx)?,
    })
}
