//! Conversion tests for the processor module
//!
//! Run the complete parse, assemble and export pipeline against the sample
//! files in `tests/data`.

pub mod basic_conversion;

use std::path::PathBuf;

pub fn sample_path(name: &str) -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR"))
        .join("tests")
        .join("data")
        .join(name)
}
