//! WERA header location.
//!
//! Reads the declared station count from the first line and finds the two
//! header lines that precede the fixed-format sections: the origin metadata
//! header (`LAT(1,1)`) and the station table header (`IX  IY`). Data rows
//! always start two lines below their header.

use crate::config::DialectChoice;
use crate::constants::{HEADER_TO_DATA_OFFSET, METADATA_MARKER, TABLE_MARKER, fixed_dialect};
use crate::error::{Result, WeraError};
use crate::models::Dialect;
use std::path::Path;
use tracing::{debug, warn};

/// Line indices of the two header lines in a file
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct HeaderLayout {
    pub dialect: Dialect,
    pub metadata_header: usize,
    pub table_header: usize,
}

impl HeaderLayout {
    /// Layout of the SKIO dialect, which never moves
    pub const FIXED: HeaderLayout = HeaderLayout {
        dialect: Dialect::Fixed,
        metadata_header: fixed_dialect::METADATA_HEADER_LINE,
        table_header: fixed_dialect::TABLE_HEADER_LINE,
    };

    pub fn metadata_data_line(&self) -> usize {
        self.metadata_header + HEADER_TO_DATA_OFFSET
    }

    pub fn table_data_line(&self) -> usize {
        self.table_header + HEADER_TO_DATA_OFFSET
    }
}

/// Outcome of scanning a file's header area
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum HeaderScan {
    /// The file declares zero reporting stations, or its first line is not
    /// a count; nothing else was read
    NoStations,
    Located {
        declared_stations: i64,
        layout: HeaderLayout,
    },
}

/// Read the declared number of reporting stations from line 1
///
/// A missing or non-integer first line declares no stations. Only zero
/// means empty; a negative count is passed through.
pub fn parse_station_count(lines: &[&str], path: &Path) -> i64 {
    let first = lines.first().map(|l| l.trim()).unwrap_or_default();
    match first.parse::<i64>() {
        Ok(count) => count,
        Err(_) => {
            warn!(
                "{}: first line '{}' is not a station count, treating as 0",
                path.display(),
                first
            );
            0
        }
    }
}

/// Pick the dialect from file content
///
/// A file is treated as SKIO only when both marker tokens sit exactly on the
/// fixed header lines; everything else is scanned as the standard dialect.
pub fn detect_dialect(lines: &[&str]) -> Dialect {
    let fixed_metadata = lines
        .get(fixed_dialect::METADATA_HEADER_LINE)
        .is_some_and(|l| l.contains(METADATA_MARKER));
    let fixed_table = lines
        .get(fixed_dialect::TABLE_HEADER_LINE)
        .is_some_and(|l| l.contains(TABLE_MARKER));

    if fixed_metadata && fixed_table {
        Dialect::Fixed
    } else {
        Dialect::Standard
    }
}

/// Find both header lines by scanning for the marker tokens
///
/// The metadata marker must precede the table marker; scanning stops at the
/// first table marker.
pub fn scan_for_markers(lines: &[&str], path: &Path) -> Result<HeaderLayout> {
    let mut metadata_header = None;
    let mut table_header = None;

    for (index, line) in lines.iter().enumerate().skip(1) {
        if line.contains(METADATA_MARKER) {
            metadata_header = Some(index);
        } else if line.contains(TABLE_MARKER) {
            table_header = Some(index);
            break;
        }
    }

    let metadata_header = metadata_header.ok_or_else(|| WeraError::MissingMarker {
        path: path.to_path_buf(),
        marker: METADATA_MARKER,
    })?;
    let table_header = table_header.ok_or_else(|| WeraError::MissingMarker {
        path: path.to_path_buf(),
        marker: TABLE_MARKER,
    })?;

    Ok(HeaderLayout {
        dialect: Dialect::Standard,
        metadata_header,
        table_header,
    })
}

/// Locate the header lines for a given dialect
pub fn locate_headers(lines: &[&str], dialect: Dialect, path: &Path) -> Result<HeaderLayout> {
    match dialect {
        Dialect::Standard => scan_for_markers(lines, path),
        Dialect::Fixed => {
            let layout = HeaderLayout::FIXED;
            if lines.len() <= layout.table_header {
                return Err(WeraError::malformed(
                    path,
                    format!(
                        "SKIO file has {} lines, table header expected on line {}",
                        lines.len(),
                        layout.table_header + 1
                    ),
                ));
            }
            if !lines[layout.table_header].contains(TABLE_MARKER) {
                warn!(
                    "{}: line {} does not carry the '{}' marker",
                    path.display(),
                    layout.table_header + 1,
                    TABLE_MARKER
                );
            }
            Ok(layout)
        }
    }
}

/// Read the station count and, unless it is zero, locate the headers
pub fn scan_headers(lines: &[&str], choice: DialectChoice, path: &Path) -> Result<HeaderScan> {
    let declared_stations = parse_station_count(lines, path);
    if declared_stations == 0 {
        debug!("{}: no stations reporting", path.display());
        return Ok(HeaderScan::NoStations);
    }

    let dialect = choice.forced().unwrap_or_else(|| detect_dialect(lines));
    let layout = locate_headers(lines, dialect, path)?;

    debug!(
        "Located headers for {}: dialect={}, metadata_header={}, table_header={}",
        path.display(),
        layout.dialect,
        layout.metadata_header,
        layout.table_header
    );

    Ok(HeaderScan::Located {
        declared_stations,
        layout,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    const STANDARD: &str = "  2
 2012-02-09 23:00 UTC WERA 28.5833 N 84.4167 W TOTAL at 2 stations
 site list follows
 info line one
 info line two
  LAT(1,1)  LON(1,1)  DGT[km]  NX  NY
 [deg] [deg] [km]
  28.58333  -84.41666  1.500  130  210
 comment
   IX  IY  U[m/s]  V[m/s]  Acc_U[m/s]  Acc_V[m/s]
 units
   91 100 -0.043 -0.047 0.012 0.015
";

    fn lines(text: &str) -> Vec<&str> {
        text.lines().collect()
    }

    #[test]
    fn test_parse_station_count() {
        let path = Path::new("test.txt");
        assert_eq!(parse_station_count(&["  17 "], path), 17);
        assert_eq!(parse_station_count(&["0"], path), 0);
        assert_eq!(parse_station_count(&["-1"], path), -1);
        assert_eq!(parse_station_count(&["abc"], path), 0);
        assert_eq!(parse_station_count(&[], path), 0);
    }

    #[test]
    fn test_non_integer_count_stops_scan() {
        let text = "WERA totals\n LAT(1,1)\n IX  IY\n";
        let scan = scan_headers(&lines(text), DialectChoice::Auto, Path::new("t")).unwrap();
        assert_eq!(scan, HeaderScan::NoStations);
    }

    #[test]
    fn test_negative_count_still_locates_headers() {
        let text = STANDARD.replacen("  2", " -1", 1);
        let scan = scan_headers(&lines(&text), DialectChoice::Auto, Path::new("t")).unwrap();
        assert!(matches!(
            scan,
            HeaderScan::Located {
                declared_stations: -1,
                ..
            }
        ));
    }

    #[test]
    fn test_scan_for_markers() {
        let layout = scan_for_markers(&lines(STANDARD), Path::new("t")).unwrap();
        assert_eq!(layout.metadata_header, 5);
        assert_eq!(layout.table_header, 9);
        assert_eq!(layout.metadata_data_line(), 7);
        assert_eq!(layout.table_data_line(), 11);
        assert_eq!(layout.dialect, Dialect::Standard);
    }

    #[test]
    fn test_missing_table_marker() {
        let text = "1\nline\n LAT(1,1) LON(1,1)\n\n1 2\n";
        let err = scan_for_markers(&lines(text), Path::new("t")).unwrap_err();
        assert!(matches!(
            err,
            WeraError::MissingMarker {
                marker: TABLE_MARKER,
                ..
            }
        ));
    }

    #[test]
    fn test_metadata_marker_after_table_is_missing() {
        let text = "1\nline\n IX  IY U\n\n LAT(1,1)\n";
        let err = scan_for_markers(&lines(text), Path::new("t")).unwrap_err();
        assert!(matches!(
            err,
            WeraError::MissingMarker {
                marker: METADATA_MARKER,
                ..
            }
        ));
    }

    #[test]
    fn test_zero_stations_stops_scan() {
        // No markers at all: the scan must not run
        let text = "   0\nno markers here\n";
        let scan = scan_headers(&lines(text), DialectChoice::Auto, Path::new("t")).unwrap();
        assert_eq!(scan, HeaderScan::NoStations);
    }

    #[test]
    fn test_detect_dialect() {
        assert_eq!(detect_dialect(&lines(STANDARD)), Dialect::Standard);

        let mut fixed = vec!["3", "time", "more", "info"];
        fixed.push(" LAT(1,1) LON(1,1) DGT[km] NX NY");
        fixed.extend(["units", "33.0 -81.5 3.0 100 170", "c", "c"]);
        fixed.push(" IX  IY U[m/s]");
        assert_eq!(detect_dialect(&fixed), Dialect::Fixed);
    }

    #[test]
    fn test_fixed_layout_requires_enough_lines() {
        let short = vec!["3", "a", "b"];
        let err = locate_headers(&short, Dialect::Fixed, Path::new("t")).unwrap_err();
        assert!(err.is_malformed());
    }

    #[test]
    fn test_forced_dialect_overrides_detection() {
        let scan = scan_headers(&lines(STANDARD), DialectChoice::Standard, Path::new("t")).unwrap();
        match scan {
            HeaderScan::Located {
                declared_stations,
                layout,
            } => {
                assert_eq!(declared_stations, 2);
                assert_eq!(layout.dialect, Dialect::Standard);
            }
            HeaderScan::NoStations => panic!("Expected located headers"),
        }
    }
}
