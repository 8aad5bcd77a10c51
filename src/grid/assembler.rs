//! Dense grid assembly from sparse station reports.
//!
//! Every cell starts out missing. Reports are applied in file order, so a
//! later report at the same `(ix, iy)` replaces an earlier one.

use crate::error::{Result, WeraError};
use crate::models::TotalsReport;

/// A row-major `(size_x, size_y)` array whose cells may be missing
#[derive(Debug, Clone, PartialEq)]
pub struct MaskedGrid {
    size_x: usize,
    size_y: usize,
    cells: Vec<Option<f64>>,
}

impl MaskedGrid {
    /// A grid with every cell missing
    pub fn missing(size_x: usize, size_y: usize) -> Self {
        Self {
            size_x,
            size_y,
            cells: vec![None; size_x * size_y],
        }
    }

    pub fn shape(&self) -> (usize, usize) {
        (self.size_x, self.size_y)
    }

    fn offset(&self, ix: usize, iy: usize) -> Result<usize> {
        if ix < self.size_x && iy < self.size_y {
            Ok(ix * self.size_y + iy)
        } else {
            Err(WeraError::IndexOutOfRange {
                ix,
                iy,
                size_x: self.size_x,
                size_y: self.size_y,
            })
        }
    }

    /// Value at `(ix, iy)`; `None` when unreported or out of range
    pub fn get(&self, ix: usize, iy: usize) -> Option<f64> {
        self.offset(ix, iy).ok().and_then(|i| self.cells[i])
    }

    pub fn set(&mut self, ix: usize, iy: usize, value: f64) -> Result<()> {
        let i = self.offset(ix, iy)?;
        self.cells[i] = Some(value);
        Ok(())
    }

    #[cfg(test)]
    pub fn is_missing(&self, ix: usize, iy: usize) -> bool {
        self.get(ix, iy).is_none()
    }

    /// Number of cells holding a value
    pub fn reported_count(&self) -> usize {
        self.cells.iter().filter(|c| c.is_some()).count()
    }

    /// Row-major values with missing cells replaced by `fill_value`
    pub fn to_filled(&self, fill_value: f64) -> Vec<f64> {
        self.cells.iter().map(|c| c.unwrap_or(fill_value)).collect()
    }
}

/// The four assembled quantities of a totals file
#[derive(Debug, Clone, PartialEq)]
pub struct DenseGrid {
    pub u: MaskedGrid,
    pub v: MaskedGrid,
    pub u_accuracy: MaskedGrid,
    pub v_accuracy: MaskedGrid,
}

impl DenseGrid {
    /// Scatter reports into four `(size_x, size_y)` grids
    pub fn assemble(size_x: usize, size_y: usize, reports: &[TotalsReport]) -> Result<Self> {
        let mut grid = Self {
            u: MaskedGrid::missing(size_x, size_y),
            v: MaskedGrid::missing(size_x, size_y),
            u_accuracy: MaskedGrid::missing(size_x, size_y),
            v_accuracy: MaskedGrid::missing(size_x, size_y),
        };

        for report in reports {
            grid.u.set(report.ix, report.iy, report.u)?;
            grid.v.set(report.ix, report.iy, report.v)?;
            grid.u_accuracy.set(report.ix, report.iy, report.u_accuracy)?;
            grid.v_accuracy.set(report.ix, report.iy, report.v_accuracy)?;
        }

        Ok(grid)
    }

    pub fn shape(&self) -> (usize, usize) {
        self.u.shape()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn report(ix: usize, iy: usize, u: f64) -> TotalsReport {
        TotalsReport {
            ix,
            iy,
            u,
            v: -u,
            u_accuracy: u / 10.0,
            v_accuracy: u / 20.0,
        }
    }

    #[test]
    fn test_reported_cells_are_set() {
        let grid = DenseGrid::assemble(4, 3, &[report(1, 2, 0.5), report(3, 0, -0.25)]).unwrap();
        assert_eq!(grid.shape(), (4, 3));
        assert_eq!(grid.u.get(1, 2), Some(0.5));
        assert_eq!(grid.v.get(1, 2), Some(-0.5));
        assert_eq!(grid.u_accuracy.get(1, 2), Some(0.05));
        assert_eq!(grid.v_accuracy.get(3, 0), Some(-0.0125));
        assert_eq!(grid.u.reported_count(), 2);
    }

    #[test]
    fn test_unreported_cells_are_missing_not_zero() {
        let grid = DenseGrid::assemble(2, 2, &[report(0, 0, 0.0)]).unwrap();
        assert_eq!(grid.u.get(0, 0), Some(0.0));
        assert!(!grid.u.is_missing(0, 0));
        assert!(grid.u.is_missing(0, 1));
        assert!(grid.u.is_missing(1, 0));
        assert!(grid.u.is_missing(1, 1));
    }

    #[test]
    fn test_last_report_wins() {
        let grid =
            DenseGrid::assemble(3, 3, &[report(2, 2, 0.1), report(0, 1, 0.7), report(2, 2, 0.3)])
                .unwrap();
        assert_eq!(grid.u.get(2, 2), Some(0.3));
        assert_eq!(grid.v.get(2, 2), Some(-0.3));
        assert_eq!(grid.u.reported_count(), 2);
    }

    #[test]
    fn test_out_of_range_report() {
        let err = DenseGrid::assemble(2, 2, &[report(2, 0, 0.1)]).unwrap_err();
        assert!(matches!(
            err,
            WeraError::IndexOutOfRange {
                ix: 2,
                iy: 0,
                size_x: 2,
                size_y: 2
            }
        ));
    }

    #[test]
    fn test_to_filled_is_row_major() {
        let grid = DenseGrid::assemble(2, 3, &[report(1, 0, 1.0)]).unwrap();
        let filled = grid.u.to_filled(-999.9);
        assert_eq!(filled, vec![-999.9, -999.9, -999.9, 1.0, -999.9, -999.9]);
    }

    #[test]
    fn test_reported_fill_value_stays_reported() {
        let grid = DenseGrid::assemble(1, 2, &[report(0, 1, -999.9)]).unwrap();
        assert!(!grid.u.is_missing(0, 1));
        assert!(grid.u.is_missing(0, 0));
    }
}
