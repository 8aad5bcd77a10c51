//! Application constants for the WERA converter
//!
//! Marker tokens, column names, fixed SKIO offsets, ellipsoid parameters
//! and CF attribute values used throughout the crate.

// =============================================================================
// Header Markers
// =============================================================================

/// Token identifying the origin metadata header line
pub const METADATA_MARKER: &str = "LAT(1,1)";

/// Token identifying the station-report table header line
pub const TABLE_MARKER: &str = "IX  IY";

/// Data rows start this many lines below a header line (one units line skipped)
pub const HEADER_TO_DATA_OFFSET: usize = 2;

/// Fixed line offsets for the SKIO dialect
///
/// The SKIO preamble is always the same length, so its headers never move:
/// lines 0-3 and 5 are skipped around the metadata header, lines 0-8 and 10
/// around the table header.
pub mod fixed_dialect {
    pub const METADATA_HEADER_LINE: usize = 4;
    pub const TABLE_HEADER_LINE: usize = 9;
}

// =============================================================================
// Column Names
// =============================================================================

pub mod columns {
    pub const ORIGIN_LON: &str = "LON(1,1)";
    pub const ORIGIN_LAT: &str = "LAT(1,1)";
    pub const GRID_SPACING_KM: &str = "DGT[km]";
    pub const SIZE_X: &str = "NX";
    pub const SIZE_Y: &str = "NY";

    pub const IX: &str = "IX";
    pub const IY: &str = "IY";
    pub const U: &str = "U[m/s]";
    pub const V: &str = "V[m/s]";
    pub const U_ACCURACY: &str = "Acc_U[m/s]";
    pub const V_ACCURACY: &str = "Acc_V[m/s]";

    pub const GRID_LAT: &str = "LAT_GRD(IX,IY)";
    pub const GRID_LON: &str = "LON_GRD(IX,IY)";

    pub const REQUIRED_METADATA: &[&str] =
        &[ORIGIN_LON, ORIGIN_LAT, GRID_SPACING_KM, SIZE_X, SIZE_Y];
    pub const REQUIRED_REPORT: &[&str] = &[IX, IY, U, V, U_ACCURACY, V_ACCURACY];
}

/// Positional field names of the two-line time record
pub const TIME_RECORD_FIELDS: &[&str] = &[
    "date", "time", "timezone", "loc", "lat", "lat_dir", "lon", "lon_dir", "type", "at", "num",
    "unit",
];

// =============================================================================
// Geodesy
// =============================================================================

/// WGS84 semi-major axis (m)
pub const WGS84_SEMI_MAJOR_AXIS: f64 = 6_378_137.0;

/// WGS84 inverse flattening
pub const WGS84_INVERSE_FLATTENING: f64 = 298.257_223_563;

pub const AZIMUTH_EAST: f64 = 90.0;
pub const AZIMUTH_SOUTH: f64 = 180.0;

// =============================================================================
// NetCDF / CF Output
// =============================================================================

/// Fill value for the velocity and accuracy variables
pub const DEFAULT_FILL_VALUE: f64 = -999.9;

/// Fill value for the integer `time` and `z` variables
pub const INTEGER_FILL_VALUE: i32 = -999;

pub const DEFAULT_DEFLATE_LEVEL: i32 = 4;

pub const CF_CONVENTIONS: &str = "CF-1.6";
pub const DEFAULT_METADATA_CONVENTIONS: &str = "Unidata Dataset Discovery v1.0";
pub const CDM_DATA_TYPE: &str = "Grid";

pub const TIME_UNITS: &str = "seconds since 1970-01-01 00:00:00";
pub const TIME_CALENDAR: &str = "gregorian";

/// Format used for `time_coverage_*` and `date_created`
pub const COVERAGE_TIME_FORMAT: &str = "%Y-%m-%dT%H:%M:00Z";

pub const EPSG_4326_URL: &str = "http://www.opengis.net/def/crs/EPSG/0/4326";
pub const EPSG_4326_CODE: &str = "EPSG:4326";

// =============================================================================
// CLI Defaults
// =============================================================================

pub const DEFAULT_OUTPUT_EXTENSION: &str = "nc";
pub const DEFAULT_BATCH_PATTERN: &str = "*.cur_asc";
