use std::path::Path;

use log::{info, warn};

use crate::aggregate::{PopulationAggregator, WindowShape};
use crate::cases::Case;
use crate::config::{AnalysisConfig, OutputConfig};
use crate::distance::DistanceMatrix;
use crate::error::Result;
use crate::grid::PopulationGrid;
use crate::loader;
use crate::locator::{OutbreakLocation, locate_outbreak};
use crate::plot;
use crate::report::{OutbreakReport, percentage_affected};

/// Result of analysing one case list against one population grid.
#[derive(Debug, Clone)]
pub struct OutbreakAnalysis {
    pub distances: DistanceMatrix,
    pub location: OutbreakLocation,
    pub report: OutbreakReport,
}

/// Inputs read from disk together with their analysis.
#[derive(Debug, Clone)]
pub struct PipelineRun {
    pub cases: Vec<Case>,
    pub grid: PopulationGrid,
    pub analysis: OutbreakAnalysis,
}

/// Load, locate, aggregate; then render on request.
pub struct Pipeline {
    aggregator: PopulationAggregator,
}

impl Pipeline {
    pub fn new(cell_size: f64, window: WindowShape) -> Self {
        Pipeline {
            aggregator: PopulationAggregator::new(cell_size, window),
        }
    }

    pub fn from_config(config: &AnalysisConfig) -> Result<Self> {
        config.validate()?;
        Ok(Self::new(config.cell_size, config.window))
    }

    pub fn cell_size(&self) -> f64 {
        self.aggregator.cell_size()
    }

    pub fn run_files(
        &self,
        case_path: impl AsRef<Path>,
        population_path: impl AsRef<Path>,
    ) -> Result<PipelineRun> {
        let cases = loader::load_cases(case_path)?;
        let grid = loader::load_population(population_path)?;
        let analysis = self.analyse(&cases, &grid)?;
        Ok(PipelineRun {
            cases,
            grid,
            analysis,
        })
    }

    /// Runs every stage on data already in memory. Touches no files.
    pub fn analyse(&self, cases: &[Case], grid: &PopulationGrid) -> Result<OutbreakAnalysis> {
        let distances = DistanceMatrix::from_cases(cases);
        let location = locate_outbreak(cases, &distances)?;
        info!(
            "Outbreak centre {} (case {}), max case distance {:.1} m",
            location.centre, location.case_index, location.max_distance
        );

        let total_population = grid.total();
        let affected_population =
            self.aggregator
                .affected_population(grid, location.centre, location.max_distance);
        let percentage = percentage_affected(affected_population, total_population);
        if percentage.is_none() {
            warn!("Population grid sums to zero; percentage affected is undefined");
        }
        info!(
            "Affected population {:.1} of {:.1} ({} window)",
            affected_population,
            total_population,
            self.aggregator.shape()
        );

        let report = OutbreakReport {
            centre: location.centre,
            case_count: cases.len(),
            max_distance: location.max_distance,
            grid_rows: grid.rows(),
            grid_cols: grid.cols(),
            window: self.aggregator.shape(),
            total_population,
            affected_population,
            percentage_affected: percentage,
        };
        Ok(OutbreakAnalysis {
            distances,
            location,
            report,
        })
    }

    /// PNG heatmap of `grid` with the analysed centre marked.
    pub fn render(
        &self,
        grid: &PopulationGrid,
        analysis: &OutbreakAnalysis,
        output: &OutputConfig,
    ) -> Result<Vec<u8>> {
        plot::render_heatmap(grid, analysis.location.centre, self.cell_size(), output)
    }
}
