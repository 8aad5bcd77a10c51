//! Parser tests against the sample files in `tests/data`
//!
//! The samples cover the standard dialect, the SKIO fixed dialect, a file
//! with a single reporting site and a file with no reporting stations.

use std::path::PathBuf;


/// Path of a file in the shared test data directory
pub fn sample_path(name: &str) -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR"))
        .join("tests")
        .join("data")
        .join(name)
}

/// Minimal standard-dialect file with the given table rows
pub fn standard_file_with_rows(rows: &[&str]) -> String {
    let mut content = String::from(
        "  2
 2013-07-01 06:00 UTC  TEST  28.0 N  84.0 W  TOTAL at 2 sites
 comment
  LAT(1,1)  LON(1,1)  DGT[km]  NX  NY
 [deg] [deg] [km]
  28.0  -84.0  1.0  5  4

   IX  IY  U[m/s]  V[m/s]  Acc_U[m/s]  Acc_V[m/s]

",
    );
    for row in rows {
        content.push_str(row);
        content.push('\n');
    }
    content
}
