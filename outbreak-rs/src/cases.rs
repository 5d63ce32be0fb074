use serde::{Deserialize, Serialize};

/// A reported case: its line-list identifier and planar location in meters.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Case {
    pub id: f64,
    pub x: f64,
    pub y: f64,
}

impl Case {
    pub fn new(id: f64, x: f64, y: f64) -> Self {
        Case { id, x, y }
    }

    pub fn location(&self) -> (f64, f64) {
        (self.x, self.y)
    }

    /// Euclidean distance on the plane; coordinates are not projected.
    pub fn distance_to(&self, other: &Case) -> f64 {
        let dx = self.x - other.x;
        let dy = self.y - other.y;
        (dx * dx + dy * dy).sqrt()
    }
}
