//! Grid geometry and assembly
//!
//! - [`geodesic`] - WGS84 direct and inverse geodesics
//! - [`mesh`] - coordinate meshes (geodesic or read from a grid file)
//! - [`assembler`] - sparse reports to dense masked arrays

pub mod assembler;
pub mod geodesic;
pub mod mesh;

pub use assembler::{DenseGrid, MaskedGrid};
pub use geodesic::{Ellipsoid, LonLat};
pub use mesh::{CoordinateMesh, GridSource};
