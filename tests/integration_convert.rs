//! Integration tests for WERA totals conversion
//!
//! Drive the public API end to end with the sample files in `tests/data`
//! and check the written NetCDF datasets.

use netcdf::AttributeValue;
use std::path::{Path, PathBuf};
use tempfile::TempDir;
use wera2netcdf::{ConversionConfig, DialectChoice, GridSource, TotalsConverter, WeraError};

fn sample_path(name: &str) -> PathBuf {
    Path::new(env!("CARGO_MANIFEST_DIR"))
        .join("tests")
        .join("data")
        .join(name)
}

fn string_attribute(file: &netcdf::File, name: &str) -> String {
    match file.attribute(name).unwrap().value().unwrap() {
        AttributeValue::Str(s) => s,
        other => panic!("Expected string attribute {name}, got {other:?}"),
    }
}

fn variable_string_attribute(file: &netcdf::File, var: &str, name: &str) -> String {
    let variable = file.variable(var).unwrap();
    match variable.attribute(name).unwrap().value().unwrap() {
        AttributeValue::Str(s) => s,
        other => panic!("Expected string attribute {var}:{name}, got {other:?}"),
    }
}

/// Converting the standard sample produces a CF dataset with the expected
/// metadata and masked cells
#[test]
fn test_standard_file_to_cf_netcdf() {
    let temp_dir = TempDir::new().unwrap();
    let output = temp_dir.path().join("totals.nc");
    let converter = TotalsConverter::new(ConversionConfig::default()).unwrap();

    converter
        .convert(&sample_path("totals.txt"), &output, &GridSource::Geodesic)
        .unwrap();

    let file = netcdf::open(&output).unwrap();

    assert_eq!(string_attribute(&file, "Conventions"), "CF-1.6");
    assert_eq!(
        string_attribute(&file, "Metadata_conventions"),
        "Unidata Dataset Discovery v1.0"
    );
    assert_eq!(
        string_attribute(&file, "time_coverage_start"),
        "2012-02-09T23:00:00Z"
    );
    assert_eq!(
        string_attribute(&file, "time_coverage_end"),
        "2012-02-09T23:00:00Z"
    );
    assert_eq!(string_attribute(&file, "geospatial_vertical_positive"), "down");

    assert_eq!(
        variable_string_attribute(&file, "u", "standard_name"),
        "eastward_sea_water_velocity"
    );
    assert_eq!(
        variable_string_attribute(&file, "vacc", "standard_name"),
        "northward_sea_water_velocity_accuracy"
    );
    assert_eq!(
        variable_string_attribute(&file, "u", "coordinates"),
        "time lon lat"
    );
    assert_eq!(
        variable_string_attribute(&file, "time", "units"),
        "seconds since 1970-01-01 00:00:00"
    );
    assert_eq!(
        variable_string_attribute(&file, "crs", "epsg_code"),
        "EPSG:4326"
    );

    let u = file.variable("u").unwrap();
    assert_eq!(u.dimensions().len(), 3);
    let values: Vec<f64> = u.get_values(..).unwrap();
    assert_eq!(values[91 * 210 + 100], -0.043);

    // Reported zeros stay zero, unreported cells take the fill value
    assert_eq!(values.len(), 130 * 210);
    assert_eq!(values[0], 0.0);
    assert_eq!(values[1], -999.9);
}

#[test]
fn test_skio_file_is_detected_by_content() {
    let temp_dir = TempDir::new().unwrap();
    let input = temp_dir.path().join("renamed_totals.txt");
    std::fs::copy(sample_path("20152881653_pri.cur_asc"), &input).unwrap();

    let totals = TotalsConverter::new(ConversionConfig::default())
        .unwrap()
        .inspect(&input)
        .unwrap();
    let meta = totals.metadata.unwrap();
    assert_eq!(meta.dialect, wera2netcdf::Dialect::Fixed);
    assert_eq!(meta.grid.grid_spacing, 3000.0);
}

#[test]
fn test_forcing_fixed_dialect_on_standard_file_fails() {
    let err = TotalsConverter::new(ConversionConfig::default().with_dialect(DialectChoice::Fixed))
        .unwrap()
        .inspect(&sample_path("totals.txt"))
        .unwrap_err();
    assert!(err.is_malformed());
}

#[test]
fn test_empty_file_is_reported_not_written() {
    let temp_dir = TempDir::new().unwrap();
    let output = temp_dir.path().join("none.nc");

    let err = TotalsConverter::new(ConversionConfig::default())
        .unwrap()
        .convert(&sample_path("no_stations.txt"), &output, &GridSource::Geodesic)
        .unwrap_err();

    assert!(matches!(err, WeraError::EmptyInput { .. }));
    assert!(
        err.to_string()
            .starts_with("Could not export WERA data, the input file was invalid")
    );
    assert!(!output.exists());
}
