use std::fmt;

use serde::Serialize;

use crate::cases::Case;
use crate::distance::DistanceMatrix;
use crate::error::{OutbreakError, Result};

/// Location designated as the outbreak's epicentre. Always one of the case locations.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct OutbreakCentre {
    pub x: f64,
    pub y: f64,
}

impl From<&Case> for OutbreakCentre {
    fn from(case: &Case) -> Self {
        OutbreakCentre {
            x: case.x,
            y: case.y,
        }
    }
}

impl fmt::Display for OutbreakCentre {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.x, self.y)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct OutbreakLocation {
    pub centre: OutbreakCentre,
    /// Case chosen as the centre (row of the maximal entry).
    pub case_index: usize,
    /// Other endpoint of the maximal pair.
    pub partner_index: usize,
    pub max_distance: f64,
}

/// Picks the row endpoint of the largest pairwise distance as the outbreak centre.
///
/// `distances` must have been computed from `cases`. A single case yields itself
/// with a maximum distance of zero.
pub fn locate_outbreak(cases: &[Case], distances: &DistanceMatrix) -> Result<OutbreakLocation> {
    debug_assert_eq!(cases.len(), distances.len());
    let (case_index, partner_index) = distances.argmax().ok_or(OutbreakError::NoCases)?;
    Ok(OutbreakLocation {
        centre: OutbreakCentre::from(&cases[case_index]),
        case_index,
        partner_index,
        max_distance: distances.get(case_index, partner_index),
    })
}
