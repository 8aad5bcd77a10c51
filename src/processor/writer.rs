//! NetCDF export adapter
//!
//! Writes one assembled totals grid as a NetCDF-4 (classic model) dataset
//! following CF-1.6. Dimensions are `time(1)`, `z(1)`, `x(size_x)` and
//! `y(size_y)`; the four data variables are `(time, x, y)`.

use crate::config::ConversionConfig;
use crate::constants::{
    CDM_DATA_TYPE, CF_CONVENTIONS, COVERAGE_TIME_FORMAT, EPSG_4326_CODE, EPSG_4326_URL,
    INTEGER_FILL_VALUE, TIME_CALENDAR, TIME_UNITS, WGS84_INVERSE_FLATTENING,
    WGS84_SEMI_MAJOR_AXIS,
};
use crate::error::{Result, WeraError};
use crate::grid::{CoordinateMesh, DenseGrid, MaskedGrid};

use chrono::{DateTime, Utc};
use netcdf::{FileMut, Options};
use std::path::Path;
use tracing::debug;

/// Everything needed to write one output dataset
#[derive(Debug, Clone)]
pub struct ExportDataset {
    pub origin_time: DateTime<Utc>,
    pub data: DenseGrid,
    pub mesh: CoordinateMesh,
}

/// Data variable name, long name and standard name
struct DataVariable {
    name: &'static str,
    long_name: &'static str,
    standard_name: &'static str,
}

const U_VARIABLE: DataVariable = DataVariable {
    name: "u",
    long_name: "Eastward Surface Current (m/s)",
    standard_name: "eastward_sea_water_velocity",
};

const U_ACCURACY_VARIABLE: DataVariable = DataVariable {
    name: "uacc",
    long_name: "Eastward Surface Current Accuracy (m/s)",
    standard_name: "eastward_sea_water_velocity_accuracy",
};

const V_VARIABLE: DataVariable = DataVariable {
    name: "v",
    long_name: "Northward Surface Current (m/s)",
    standard_name: "northward_sea_water_velocity",
};

const V_ACCURACY_VARIABLE: DataVariable = DataVariable {
    name: "vacc",
    long_name: "Northward Surface Current Accuracy (m/s)",
    standard_name: "northward_sea_water_velocity_accuracy",
};

struct AxisAttributes {
    name: &'static str,
    units: &'static str,
    axis: &'static str,
}

const LATITUDE_AXIS: AxisAttributes = AxisAttributes {
    name: "latitude",
    units: "degrees_north",
    axis: "Y",
};

const LONGITUDE_AXIS: AxisAttributes = AxisAttributes {
    name: "longitude",
    units: "degrees_east",
    axis: "X",
};

/// CF NetCDF writer
#[derive(Debug, Clone)]
pub struct NetCdfWriter {
    fill_value: f64,
    deflate_level: i32,
    shuffle: bool,
    metadata_conventions: String,
}

impl NetCdfWriter {
    pub fn new(config: &ConversionConfig) -> Self {
        Self {
            fill_value: config.fill_value,
            deflate_level: config.deflate_level,
            shuffle: config.shuffle,
            metadata_conventions: config.metadata_conventions.clone(),
        }
    }

    /// Write `dataset` to `path`, replacing any existing file
    pub fn write(&self, dataset: &ExportDataset, path: &Path) -> Result<()> {
        let (size_x, size_y) = dataset.data.shape();
        let timestamp = i32::try_from(dataset.origin_time.timestamp()).map_err(|_| {
            WeraError::configuration(format!(
                "origin time {} does not fit a 32-bit time variable",
                dataset.origin_time
            ))
        })?;

        if path.exists() {
            debug!("Removing existing output {}", path.display());
            std::fs::remove_file(path)?;
        }

        let mut file = netcdf::create_with(path, Options::NETCDF4 | Options::CLASSIC)?;

        file.add_dimension("time", 1)?;
        file.add_dimension("z", 1)?;
        file.add_dimension("x", size_x)?;
        file.add_dimension("y", size_y)?;

        self.write_coordinates(&mut file, &dataset.mesh)?;
        write_time(&mut file, timestamp)?;
        write_depth(&mut file)?;

        self.write_data_variable(&mut file, &U_VARIABLE, &dataset.data.u)?;
        self.write_data_variable(&mut file, &U_ACCURACY_VARIABLE, &dataset.data.u_accuracy)?;
        self.write_data_variable(&mut file, &V_VARIABLE, &dataset.data.v)?;
        self.write_data_variable(&mut file, &V_ACCURACY_VARIABLE, &dataset.data.v_accuracy)?;

        write_crs(&mut file)?;
        self.write_global_attributes(&mut file, dataset)?;

        debug!(
            "Wrote {}x{} grid with {} reported cells to {}",
            size_x,
            size_y,
            dataset.data.u.reported_count(),
            path.display()
        );

        Ok(())
    }

    fn write_coordinates(&self, file: &mut FileMut, mesh: &CoordinateMesh) -> Result<()> {
        let (lat_dims, lon_dims): (&[&str], &[&str]) = if mesh.is_rectilinear() {
            (&["y"], &["x"])
        } else {
            (&["x", "y"], &["x", "y"])
        };
        let compress = !mesh.is_rectilinear();

        self.write_axis(file, "lat", lat_dims, compress, &LATITUDE_AXIS, mesh.lat())?;
        self.write_axis(file, "lon", lon_dims, compress, &LONGITUDE_AXIS, mesh.lon())?;
        Ok(())
    }

    fn write_axis(
        &self,
        file: &mut FileMut,
        name: &str,
        dims: &[&str],
        compress: bool,
        axis: &AxisAttributes,
        values: &[f64],
    ) -> Result<()> {
        let mut var = file.add_variable::<f64>(name, dims)?;
        if compress {
            var.set_compression(self.deflate_level, self.shuffle)?;
        }
        var.put_attribute("units", axis.units)?;
        var.put_attribute("standard_name", axis.name)?;
        var.put_attribute("long_name", axis.name)?;
        var.put_attribute("axis", axis.axis)?;
        var.put_values(values, ..)?;
        Ok(())
    }

    fn write_data_variable(
        &self,
        file: &mut FileMut,
        variable: &DataVariable,
        values: &MaskedGrid,
    ) -> Result<()> {
        let mut var = file.add_variable::<f64>(variable.name, &["time", "x", "y"])?;
        var.set_fill_value(self.fill_value)?;
        var.set_compression(self.deflate_level, self.shuffle)?;
        var.put_attribute("long_name", variable.long_name)?;
        var.put_attribute("standard_name", variable.standard_name)?;
        var.put_attribute("coordinates", "time lon lat")?;
        var.put_attribute("units", "m/s")?;
        var.put_values(&values.to_filled(self.fill_value), ..)?;
        Ok(())
    }

    fn write_global_attributes(&self, file: &mut FileMut, dataset: &ExportDataset) -> Result<()> {
        let coverage = dataset
            .origin_time
            .format(COVERAGE_TIME_FORMAT)
            .to_string();
        let created = Utc::now().format(COVERAGE_TIME_FORMAT).to_string();

        file.add_attribute("time_coverage_start", coverage.as_str())?;
        file.add_attribute("time_coverage_end", coverage.as_str())?;
        file.add_attribute("date_created", created.as_str())?;
        file.add_attribute("Conventions", CF_CONVENTIONS)?;
        file.add_attribute("Metadata_conventions", self.metadata_conventions.as_str())?;
        file.add_attribute("cdm_data_type", CDM_DATA_TYPE)?;
        file.add_attribute("geospatial_vertical_min", 0i32)?;
        file.add_attribute("geospatial_vertical_max", 0i32)?;
        file.add_attribute("geospatial_vertical_positive", "down")?;

        if let Some((lat_min, lat_max)) = dataset.mesh.lat_range() {
            file.add_attribute("geospatial_lat_min", lat_min)?;
            file.add_attribute("geospatial_lat_max", lat_max)?;
        }
        if let Some((lon_min, lon_max)) = dataset.mesh.lon_range() {
            file.add_attribute("geospatial_lon_min", lon_min)?;
            file.add_attribute("geospatial_lon_max", lon_max)?;
        }

        Ok(())
    }
}

fn write_time(file: &mut FileMut, timestamp: i32) -> Result<()> {
    let mut time = file.add_variable::<i32>("time", &["time"])?;
    time.set_fill_value(INTEGER_FILL_VALUE)?;
    time.put_attribute("units", TIME_UNITS)?;
    time.put_attribute("standard_name", "time")?;
    time.put_attribute("long_name", "time")?;
    time.put_attribute("calendar", TIME_CALENDAR)?;
    time.put_values(&[timestamp], ..)?;
    Ok(())
}

fn write_depth(file: &mut FileMut) -> Result<()> {
    let mut z = file.add_variable::<i32>("z", &["z"])?;
    z.set_fill_value(INTEGER_FILL_VALUE)?;
    z.put_attribute("units", "m")?;
    z.put_attribute("standard_name", "depth")?;
    z.put_attribute("long_name", "depth")?;
    z.put_attribute("positive", "down")?;
    z.put_attribute("axis", "Z")?;
    z.put_values(&[0i32], ..)?;
    Ok(())
}

fn write_crs(file: &mut FileMut) -> Result<()> {
    let mut crs = file.add_variable::<i32>("crs", &[])?;
    crs.put_attribute("long_name", EPSG_4326_URL)?;
    crs.put_attribute("grid_mapping_name", "latitude_longitude")?;
    crs.put_attribute("epsg_code", EPSG_4326_CODE)?;
    crs.put_attribute("semi_major_axis", WGS84_SEMI_MAJOR_AXIS)?;
    crs.put_attribute("inverse_flattening", WGS84_INVERSE_FLATTENING)?;
    Ok(())
}
