//! End-to-end conversion of the sample files

use super::sample_path;
use crate::config::{ConversionConfig, DialectChoice};
use crate::grid::GridSource;
use crate::processor::TotalsConverter;
use netcdf::AttributeValue;
use tempfile::TempDir;

fn converter() -> TotalsConverter {
    TotalsConverter::new(ConversionConfig::default()).unwrap()
}

fn f64_attribute(file: &netcdf::File, name: &str) -> f64 {
    match file.attribute(name).unwrap().value().unwrap() {
        AttributeValue::Double(v) => v,
        other => panic!("Expected double attribute {name}, got {other:?}"),
    }
}

#[test]
fn test_convert_standard_sample() {
    let temp_dir = TempDir::new().unwrap();
    let output = temp_dir.path().join("totals.nc");

    let summary = converter()
        .convert(&sample_path("totals.txt"), &output, &GridSource::Geodesic)
        .unwrap();

    assert_eq!(summary.reports, 51);
    assert_eq!(summary.reported_cells, 51);
    assert_eq!((summary.size_x, summary.size_y), (130, 210));
    assert!(!summary.rectilinear);

    let file = netcdf::open(&output).unwrap();
    let u: Vec<f64> = file.variable("u").unwrap().get_values(..).unwrap();
    let v: Vec<f64> = file.variable("v").unwrap().get_values(..).unwrap();
    assert_eq!(u.len(), 130 * 210);

    let cell = 91 * 210 + 100;
    assert_eq!(u[cell], -0.043);
    assert_eq!(v[cell], -0.047);

    // (1, 1) has no report
    assert_eq!(u[211], -999.9);
    assert_eq!(u.iter().filter(|&&x| x != -999.9).count(), 51);

    let time: Vec<i32> = file.variable("time").unwrap().get_values(..).unwrap();
    assert_eq!(time, vec![1_328_828_400]);

    let lat: Vec<f64> = file.variable("lat").unwrap().get_values(..).unwrap();
    let lon: Vec<f64> = file.variable("lon").unwrap().get_values(..).unwrap();
    assert_eq!(lat[0], 28.58333);
    assert_eq!(lon[0], -84.41666);
    assert!(f64_attribute(&file, "geospatial_lat_max") >= 28.58333 - 1e-9);
    assert!(f64_attribute(&file, "geospatial_lat_min") < 28.58333);
}

#[test]
fn test_convert_skio_sample() {
    let temp_dir = TempDir::new().unwrap();
    let output = temp_dir.path().join("skio.nc");

    let summary = converter()
        .convert(
            &sample_path("20152881653_pri.cur_asc"),
            &output,
            &GridSource::Geodesic,
        )
        .unwrap();

    assert_eq!(summary.reports, 24);
    assert_eq!((summary.size_x, summary.size_y), (100, 170));

    let file = netcdf::open(&output).unwrap();
    assert_eq!(file.dimension("x").unwrap().len(), 100);
    assert_eq!(file.dimension("y").unwrap().len(), 170);
    let time: Vec<i32> = file.variable("time").unwrap().get_values(..).unwrap();
    assert_eq!(time, vec![1_444_927_980]);
}

#[test]
fn test_convert_with_grid_file() {
    let temp_dir = TempDir::new().unwrap();
    let output = temp_dir.path().join("rect.nc");
    let grid = GridSource::File(sample_path("single_reporter_grid.txt"));

    let summary = converter()
        .convert(&sample_path("single_reporter.txt"), &output, &grid)
        .unwrap();
    assert!(summary.rectilinear);
    assert_eq!(summary.reported_cells, 2);

    let file = netcdf::open(&output).unwrap();
    let lat = file.variable("lat").unwrap();
    assert_eq!(lat.dimensions().len(), 1);
    let lat_values: Vec<f64> = lat.get_values(..).unwrap();
    assert_eq!(lat_values.len(), 4);
    assert_eq!(lat_values[0], 32.0);

    let u: Vec<f64> = file.variable("u").unwrap().get_values(..).unwrap();
    assert_eq!(u[2 * 4 + 1], 0.125);
    assert_eq!(u[5 * 4 + 3], 0.0);
    assert_eq!(u[0], -999.9);
}

#[test]
fn test_single_reporter_on_geodesic_mesh() {
    let temp_dir = TempDir::new().unwrap();
    let output = temp_dir.path().join("single.nc");

    let summary = converter()
        .convert(
            &sample_path("single_reporter.txt"),
            &output,
            &GridSource::Geodesic,
        )
        .unwrap();
    assert!(!summary.rectilinear);

    let file = netcdf::open(&output).unwrap();
    let u: Vec<f64> = file.variable("u").unwrap().get_values(..).unwrap();
    let v: Vec<f64> = file.variable("v").unwrap().get_values(..).unwrap();
    assert_eq!(u.len(), 24);

    let reported: Vec<usize> = (0..u.len()).filter(|&i| u[i] != -999.9).collect();
    assert_eq!(reported, vec![2 * 4 + 1, 5 * 4 + 3]);
    assert_eq!(u[2 * 4 + 1], 0.125);
    assert_eq!(v[2 * 4 + 1], -0.375);
    assert_eq!(u[5 * 4 + 3], 0.0);
    assert_eq!(v.iter().filter(|&&x| x != -999.9).count(), 2);
}

#[test]
fn test_forced_fixed_dialect_matches_auto() {
    let temp_dir = TempDir::new().unwrap();
    let auto_out = temp_dir.path().join("auto.nc");
    let fixed_out = temp_dir.path().join("fixed.nc");
    let input = sample_path("20152881653_pri.cur_asc");

    converter()
        .convert(&input, &auto_out, &GridSource::Geodesic)
        .unwrap();
    TotalsConverter::new(ConversionConfig::default().with_dialect(DialectChoice::Fixed))
        .unwrap()
        .convert(&input, &fixed_out, &GridSource::Geodesic)
        .unwrap();

    let read_u = |path: &std::path::PathBuf| -> Vec<f64> {
        netcdf::open(path)
            .unwrap()
            .variable("u")
            .unwrap()
            .get_values(..)
            .unwrap()
    };
    assert_eq!(read_u(&auto_out), read_u(&fixed_out));
}

#[test]
fn test_inspect_does_not_write() {
    let totals = converter().inspect(&sample_path("totals.txt")).unwrap();
    assert!(totals.is_valid());
    assert_eq!(totals.reports.len(), 51);
}
