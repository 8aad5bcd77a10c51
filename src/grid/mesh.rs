//! Coordinate meshes for the exported grid
//!
//! Two strategies are supported:
//! - [`GridSource::Geodesic`] projects every cell from the origin along WGS84
//!   geodesics, giving 2D (curvilinear) latitude and longitude arrays.
//! - [`GridSource::File`] reads an auxiliary grid-definition table and keeps
//!   its distinct latitudes and longitudes as 1D (rectilinear) axes.

use super::geodesic::{Ellipsoid, LonLat};
use crate::constants::{AZIMUTH_EAST, AZIMUTH_SOUTH, columns};
use crate::error::{Result, WeraError};
use crate::models::GridDefinition;
use crate::parser::ColumnMapping;
use crate::parser::field_parsers::{RowContext, parse_required_f64};
use std::path::{Path, PathBuf};
use tracing::debug;

/// Where the output coordinates come from
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum GridSource {
    /// Compute a curvilinear mesh from origin, spacing and dimensions
    #[default]
    Geodesic,
    /// Read rectilinear axes from a grid-definition file
    File(PathBuf),
}

/// Longitude/latitude coordinates for every grid cell
#[derive(Debug, Clone, PartialEq)]
pub enum CoordinateMesh {
    /// Row-major `(size_x, size_y)` arrays; `[i * size_y + j]` is point `j`
    /// of column `i`
    Curvilinear {
        size_x: usize,
        size_y: usize,
        lon: Vec<f64>,
        lat: Vec<f64>,
    },
    /// `lon` has `size_x` ascending values, `lat` has `size_y` descending values
    Rectilinear { lon: Vec<f64>, lat: Vec<f64> },
}

impl CoordinateMesh {
    /// Build the mesh for `grid` using the chosen strategy
    pub fn build(source: &GridSource, grid: &GridDefinition) -> Result<Self> {
        match source {
            GridSource::Geodesic => Ok(geodesic_mesh(grid)),
            GridSource::File(path) => rectilinear_from_file(path, grid),
        }
    }

    pub fn is_rectilinear(&self) -> bool {
        matches!(self, CoordinateMesh::Rectilinear { .. })
    }

    pub fn lon(&self) -> &[f64] {
        match self {
            CoordinateMesh::Curvilinear { lon, .. } | CoordinateMesh::Rectilinear { lon, .. } => {
                lon
            }
        }
    }

    pub fn lat(&self) -> &[f64] {
        match self {
            CoordinateMesh::Curvilinear { lat, .. } | CoordinateMesh::Rectilinear { lat, .. } => {
                lat
            }
        }
    }

    /// Coordinates of cell `(ix, iy)`
    #[cfg(test)]
    pub fn point(&self, ix: usize, iy: usize) -> Option<LonLat> {
        match self {
            CoordinateMesh::Curvilinear {
                size_x,
                size_y,
                lon,
                lat,
            } => {
                if ix >= *size_x || iy >= *size_y {
                    return None;
                }
                let i = ix * size_y + iy;
                Some(LonLat::new(lon[i], lat[i]))
            }
            CoordinateMesh::Rectilinear { lon, lat } => {
                Some(LonLat::new(*lon.get(ix)?, *lat.get(iy)?))
            }
        }
    }

    /// `(min, max)` latitude
    pub fn lat_range(&self) -> Option<(f64, f64)> {
        min_max(self.lat())
    }

    /// `(min, max)` longitude
    pub fn lon_range(&self) -> Option<(f64, f64)> {
        min_max(self.lon())
    }
}

fn min_max(values: &[f64]) -> Option<(f64, f64)> {
    values.iter().fold(None, |acc, &v| match acc {
        None => Some((v, v)),
        Some((lo, hi)) => Some((lo.min(v), hi.max(v))),
    })
}

/// Project the grid from its origin along WGS84 geodesics
///
/// The upper row runs east of the origin at multiples of the spacing; each
/// column then runs south of its upper-row point.
pub fn geodesic_mesh(grid: &GridDefinition) -> CoordinateMesh {
    let ellipsoid = Ellipsoid::WGS84;
    let origin = LonLat::new(grid.origin_x, grid.origin_y);

    let mut lon = Vec::with_capacity(grid.cell_count());
    let mut lat = Vec::with_capacity(grid.cell_count());

    for i in 0..grid.size_x {
        let top = ellipsoid.direct(origin, AZIMUTH_EAST, i as f64 * grid.grid_spacing);
        for j in 0..grid.size_y {
            let point = ellipsoid.direct(top, AZIMUTH_SOUTH, j as f64 * grid.grid_spacing);
            lon.push(point.lon);
            lat.push(point.lat);
        }
    }

    debug!(
        "Computed geodesic mesh of {}x{} points at {} m",
        grid.size_x, grid.size_y, grid.grid_spacing
    );

    CoordinateMesh::Curvilinear {
        size_x: grid.size_x,
        size_y: grid.size_y,
        lon,
        lat,
    }
}

/// Read rectilinear axes from a grid-definition file
///
/// The first line names the columns; `LAT_GRD(IX,IY)` and `LON_GRD(IX,IY)`
/// are required. Every following non-blank line is one cell.
pub fn rectilinear_from_file(path: &Path, grid: &GridDefinition) -> Result<CoordinateMesh> {
    if !path.exists() {
        return Err(WeraError::FileNotFound {
            path: path.to_path_buf(),
        });
    }
    let content = std::fs::read_to_string(path)?;
    rectilinear_from_str(&content, path, grid)
}

/// Parse grid-definition content; `path` is only used for error context
pub fn rectilinear_from_str(
    content: &str,
    path: &Path,
    grid: &GridDefinition,
) -> Result<CoordinateMesh> {
    let mut lines = content.lines().enumerate();
    let header = lines
        .by_ref()
        .find(|(_, line)| !line.trim().is_empty())
        .ok_or_else(|| WeraError::malformed(path, "grid file is empty"))?;

    let mapping = ColumnMapping::from_header_line(header.1, header.0 + 1);
    mapping.require(&[columns::GRID_LAT, columns::GRID_LON], path)?;

    let mut lats = Vec::new();
    let mut lons = Vec::new();
    for (index, line) in lines {
        let fields: Vec<&str> = line.split_whitespace().collect();
        if fields.is_empty() {
            continue;
        }
        let ctx = RowContext {
            path,
            line: index + 1,
        };
        lats.push(parse_required_f64(&fields, &mapping, columns::GRID_LAT, ctx)?);
        lons.push(parse_required_f64(&fields, &mapping, columns::GRID_LON, ctx)?);
    }

    let mut lat = sorted_unique(lats);
    lat.reverse();
    let lon = sorted_unique(lons);

    if lat.len() != grid.size_y {
        return Err(WeraError::GridMismatch {
            path: path.to_path_buf(),
            axis: "latitude",
            expected: grid.size_y,
            found: lat.len(),
        });
    }
    if lon.len() != grid.size_x {
        return Err(WeraError::GridMismatch {
            path: path.to_path_buf(),
            axis: "longitude",
            expected: grid.size_x,
            found: lon.len(),
        });
    }

    debug!(
        "Read rectilinear grid from {}: {} longitudes, {} latitudes",
        path.display(),
        lon.len(),
        lat.len()
    );

    Ok(CoordinateMesh::Rectilinear { lon, lat })
}

fn sorted_unique(mut values: Vec<f64>) -> Vec<f64> {
    values.sort_by(f64::total_cmp);
    values.dedup();
    values
}
