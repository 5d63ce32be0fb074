//! Outbreak centre detection and affected-population estimation.
//!
//! Cases are planar points in meters. The outbreak centre is the case at one end of
//! the longest case-to-case distance, and the population counted as affected is the
//! sum of grid cells within that distance of the centre.

pub mod aggregate;
pub mod cases;
pub mod config;
pub mod distance;
pub mod error;
pub mod grid;
pub mod loader;
pub mod locator;
pub mod pipeline;
pub mod plot;
pub mod report;

/// Side of one population grid cell, in meters.
pub const DEFAULT_CELL_SIZE: f64 = 100.0;

pub use aggregate::{PopulationAggregator, WindowShape};
pub use cases::Case;
pub use config::{AnalysisConfig, OutputConfig};
pub use distance::DistanceMatrix;
pub use error::{OutbreakError, Result};
pub use grid::PopulationGrid;
pub use locator::{OutbreakCentre, OutbreakLocation};
pub use pipeline::{OutbreakAnalysis, Pipeline, PipelineRun};
pub use report::OutbreakReport;
