use std::ops::Range;

use log::debug;
use serde::{Deserialize, Serialize};

use crate::grid::PopulationGrid;
use crate::locator::OutbreakCentre;

/// Shape of the area counted as affected around the outbreak centre.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum WindowShape {
    /// Every cell of the bounding box whose half-width is the maximum case distance.
    #[default]
    Square,
    /// Only cells of that box whose centre lies within the maximum case distance.
    Circle,
}

impl std::fmt::Display for WindowShape {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            WindowShape::Square => write!(f, "square"),
            WindowShape::Circle => write!(f, "circle"),
        }
    }
}

/// Grid index ranges, half-open, clamped to the grid.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CellWindow {
    pub rows: Range<usize>,
    pub cols: Range<usize>,
}

impl CellWindow {
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty() || self.cols.is_empty()
    }

    pub fn cell_count(&self) -> usize {
        self.rows.len() * self.cols.len()
    }
}

pub struct PopulationAggregator {
    cell_size: f64,
    shape: WindowShape,
}

impl PopulationAggregator {
    pub fn new(cell_size: f64, shape: WindowShape) -> Self {
        PopulationAggregator { cell_size, shape }
    }

    pub fn cell_size(&self) -> f64 {
        self.cell_size
    }

    pub fn shape(&self) -> WindowShape {
        self.shape
    }

    /// Bounding box of grid cells within `max_distance` of `centre` along each axis.
    ///
    /// The centre stays continuous in cell units while the range is truncated to whole
    /// cells; both bounds are then truncated toward zero, so the box is not always
    /// symmetric around the centre cell.
    pub fn window(
        &self,
        grid: &PopulationGrid,
        centre: OutbreakCentre,
        max_distance: f64,
    ) -> CellWindow {
        let range = (max_distance / self.cell_size) as i64 as f64;
        let window = CellWindow {
            rows: axis_bounds(centre.x / self.cell_size, range, grid.rows()),
            cols: axis_bounds(centre.y / self.cell_size, range, grid.cols()),
        };
        debug!(
            "aggregation window rows {:?} cols {:?} (range {} cells)",
            window.rows, window.cols, range
        );
        window
    }

    pub fn affected_population(
        &self,
        grid: &PopulationGrid,
        centre: OutbreakCentre,
        max_distance: f64,
    ) -> f64 {
        let window = self.window(grid, centre, max_distance);
        if window.is_empty() {
            return 0.0;
        }
        let mut affected = 0.0;
        for row in window.rows.clone() {
            for col in window.cols.clone() {
                if self.shape == WindowShape::Circle
                    && !self.within_radius(row, col, centre, max_distance)
                {
                    continue;
                }
                affected += grid.get(row, col);
            }
        }
        affected
    }

    fn within_radius(&self, row: usize, col: usize, centre: OutbreakCentre, radius: f64) -> bool {
        let centre_row = (centre.x / self.cell_size) as i64;
        let centre_col = (centre.y / self.cell_size) as i64;
        if row as i64 == centre_row && col as i64 == centre_col {
            return true;
        }
        let dx = (row as f64 + 0.5) * self.cell_size - centre.x;
        let dy = (col as f64 + 0.5) * self.cell_size - centre.y;
        (dx * dx + dy * dy).sqrt() <= radius
    }
}

fn axis_bounds(centre_cells: f64, range: f64, dim: usize) -> Range<usize> {
    let start = ((centre_cells - range) as i64).max(0);
    let end = ((centre_cells + range + 1.0) as i64).min(dim as i64);
    if end <= start {
        0..0
    } else {
        start as usize..end as usize
    }
}
