//! Field parsing utilities for WERA table rows
//!
//! Helpers that pull a named column out of a whitespace-split row and convert
//! it, producing errors that carry the file, line and column.

use super::column_mapping::ColumnMapping;
use crate::error::{Result, WeraError};
use std::path::Path;
use std::str::FromStr;

/// Position of a row inside its file, for error context
#[derive(Debug, Clone, Copy)]
pub struct RowContext<'a> {
    pub path: &'a Path,
    /// 1-based line number
    pub line: usize,
}

/// Get a required field value from a split row
pub fn get_required_field<'a>(
    fields: &[&'a str],
    mapping: &ColumnMapping,
    column: &str,
    ctx: RowContext<'_>,
) -> Result<&'a str> {
    let index = mapping
        .get_index(column)
        .ok_or_else(|| WeraError::MissingColumn {
            path: ctx.path.to_path_buf(),
            line: mapping.header_line,
            column: column.to_string(),
        })?;

    fields.get(index).copied().ok_or_else(|| {
        WeraError::malformed(
            ctx.path,
            format!(
                "line {} has {} fields, no value for column '{}'",
                ctx.line,
                fields.len(),
                column
            ),
        )
    })
}

/// Parse a required field into any `FromStr` type
pub fn parse_required<T: FromStr>(
    fields: &[&str],
    mapping: &ColumnMapping,
    column: &str,
    ctx: RowContext<'_>,
) -> Result<T> {
    let value = get_required_field(fields, mapping, column, ctx)?;
    value.parse::<T>().map_err(|_| WeraError::InvalidValue {
        path: ctx.path.to_path_buf(),
        line: ctx.line,
        column: column.to_string(),
        value: value.to_string(),
    })
}

/// Parse a required floating-point field, rejecting NaN and infinities
pub fn parse_required_f64(
    fields: &[&str],
    mapping: &ColumnMapping,
    column: &str,
    ctx: RowContext<'_>,
) -> Result<f64> {
    let value: f64 = parse_required(fields, mapping, column, ctx)?;
    if value.is_finite() {
        Ok(value)
    } else {
        Err(WeraError::InvalidValue {
            path: ctx.path.to_path_buf(),
            line: ctx.line,
            column: column.to_string(),
            value: value.to_string(),
        })
    }
}

/// Parse a required non-negative integer field
pub fn parse_required_usize(
    fields: &[&str],
    mapping: &ColumnMapping,
    column: &str,
    ctx: RowContext<'_>,
) -> Result<usize> {
    parse_required(fields, mapping, column, ctx)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ctx() -> RowContext<'static> {
        RowContext {
            path: Path::new("totals.txt"),
            line: 42,
        }
    }

    #[test]
    fn test_parse_required_f64() {
        let mapping = ColumnMapping::from_header_line("IX IY U[m/s]", 40);
        let fields = vec!["3", "4", "-0.043"];
        let u = parse_required_f64(&fields, &mapping, "U[m/s]", ctx()).unwrap();
        assert_eq!(u, -0.043);
    }

    #[test]
    fn test_non_numeric_value() {
        let mapping = ColumnMapping::from_header_line("IX IY U[m/s]", 40);
        let fields = vec!["3", "4", "n/a"];
        let err = parse_required_f64(&fields, &mapping, "U[m/s]", ctx()).unwrap_err();
        match err {
            WeraError::InvalidValue {
                line,
                column,
                value,
                ..
            } => {
                assert_eq!(line, 42);
                assert_eq!(column, "U[m/s]");
                assert_eq!(value, "n/a");
            }
            other => panic!("Expected InvalidValue, got {other:?}"),
        }
    }

    #[test]
    fn test_nan_rejected() {
        let mapping = ColumnMapping::from_header_line("U[m/s]", 1);
        let err = parse_required_f64(&["NaN"], &mapping, "U[m/s]", ctx()).unwrap_err();
        assert!(err.is_malformed());
    }

    #[test]
    fn test_negative_index_rejected() {
        let mapping = ColumnMapping::from_header_line("IX IY", 1);
        let err = parse_required_usize(&["-1", "2"], &mapping, "IX", ctx()).unwrap_err();
        assert!(matches!(err, WeraError::InvalidValue { .. }));
    }

    #[test]
    fn test_short_row() {
        let mapping = ColumnMapping::from_header_line("IX IY U[m/s]", 1);
        let err = parse_required_f64(&["1", "2"], &mapping, "U[m/s]", ctx()).unwrap_err();
        assert!(matches!(err, WeraError::MalformedFile { .. }));
    }
}
