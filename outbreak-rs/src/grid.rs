use crate::error::{OutbreakError, Result};

/// Gridded population counts, row-major.
///
/// The first axis is indexed by the x coordinate and the second by y when a window
/// is aggregated; the heatmap draws columns horizontally.
#[derive(Debug, Clone, PartialEq)]
pub struct PopulationGrid {
    rows: usize,
    cols: usize,
    cells: Vec<f64>,
}

impl PopulationGrid {
    pub fn from_rows(rows: Vec<Vec<f64>>) -> Result<Self> {
        let cols = rows.first().map(Vec::len).unwrap_or(0);
        let n_rows = rows.len();
        let mut cells = Vec::with_capacity(n_rows * cols);
        for (row, values) in rows.into_iter().enumerate() {
            if values.len() != cols {
                return Err(OutbreakError::RaggedGrid {
                    row,
                    expected: cols,
                    found: values.len(),
                });
            }
            cells.extend(values);
        }
        if cols == 0 {
            return Ok(PopulationGrid::uniform(0, 0, 0.0));
        }
        Ok(PopulationGrid {
            rows: n_rows,
            cols,
            cells,
        })
    }

    pub fn uniform(rows: usize, cols: usize, value: f64) -> Self {
        PopulationGrid {
            rows,
            cols,
            cells: vec![value; rows * cols],
        }
    }

    pub fn rows(&self) -> usize {
        self.rows
    }

    pub fn cols(&self) -> usize {
        self.cols
    }

    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }

    pub fn get(&self, row: usize, col: usize) -> f64 {
        self.cells[row * self.cols + col]
    }

    pub fn set(&mut self, row: usize, col: usize, value: f64) {
        self.cells[row * self.cols + col] = value;
    }

    pub fn total(&self) -> f64 {
        self.cells.iter().sum()
    }

    /// Iterates `(row, col, value)` in row-major order.
    pub fn iter(&self) -> impl Iterator<Item = (usize, usize, f64)> + '_ {
        self.cells
            .iter()
            .enumerate()
            .map(|(k, &value)| (k / self.cols, k % self.cols, value))
    }

    pub fn min_max(&self) -> Option<(f64, f64)> {
        self.cells.iter().fold(None, |acc, &v| match acc {
            None => Some((v, v)),
            Some((lo, hi)) => Some((lo.min(v), hi.max(v))),
        })
    }
}
