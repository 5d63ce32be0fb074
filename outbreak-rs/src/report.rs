use std::fmt;

use serde::Serialize;

use crate::aggregate::WindowShape;
use crate::locator::OutbreakCentre;

/// Summary of one outbreak analysis.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct OutbreakReport {
    pub centre: OutbreakCentre,
    pub case_count: usize,
    pub max_distance: f64,
    pub grid_rows: usize,
    pub grid_cols: usize,
    pub window: WindowShape,
    pub total_population: f64,
    pub affected_population: f64,
    /// `None` when the grid holds no population.
    pub percentage_affected: Option<f64>,
}

pub fn percentage_affected(affected: f64, total: f64) -> Option<f64> {
    (total != 0.0).then(|| affected / total * 100.0)
}

impl fmt::Display for OutbreakReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Outbreak Centre: {}", self.centre)?;
        writeln!(f, "Total Population: ~ {:.0}", self.total_population.round())?;
        writeln!(f, "Affected Population: ~ {:.0}", self.affected_population.round())?;
        match self.percentage_affected {
            Some(pct) => write!(f, "Percentage Affected: {:.2}%", pct),
            None => write!(f, "Percentage Affected: n/a (total population is zero)"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn report(total: f64, affected: f64) -> OutbreakReport {
        OutbreakReport {
            centre: OutbreakCentre { x: 300.0, y: 0.0 },
            case_count: 3,
            max_distance: 500.0,
            grid_rows: 10,
            grid_cols: 10,
            window: WindowShape::Square,
            total_population: total,
            affected_population: affected,
            percentage_affected: percentage_affected(affected, total),
        }
    }

    #[test]
    fn test_percentage() {
        assert_eq!(percentage_affected(25.0, 100.0), Some(25.0));
        assert_eq!(percentage_affected(100.0, 100.0), Some(100.0));
        assert_eq!(percentage_affected(0.0, 0.0), None);
    }

    #[test]
    fn test_console_lines() {
        let text = report(10_234.6, 812.2).to_string();
        let lines: Vec<&str> = text.lines().collect();
        assert_eq!(
            lines,
            vec![
                "Outbreak Centre: (300, 0)",
                "Total Population: ~ 10235",
                "Affected Population: ~ 812",
                "Percentage Affected: 7.94%",
            ]
        );
    }

    #[test]
    fn test_zero_population_line() {
        let text = report(0.0, 0.0).to_string();
        assert_eq!(
            text.lines().last(),
            Some("Percentage Affected: n/a (total population is zero)")
        );
    }
}
