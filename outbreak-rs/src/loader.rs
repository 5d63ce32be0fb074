//! CSV input loading.
//!
//! Every field must parse as a number; rows must all have the width of the first.

use std::fs::File;
use std::path::Path;

use log::info;

use crate::cases::Case;
use crate::error::{OutbreakError, Result};
use crate::grid::PopulationGrid;

struct NumericRow {
    line: u64,
    values: Vec<f64>,
}

fn read_rows(path: &Path, has_header: bool) -> Result<Vec<NumericRow>> {
    let file = File::open(path).map_err(|source| OutbreakError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    let mut rdr = csv::ReaderBuilder::new()
        .has_headers(has_header)
        .flexible(true)
        .trim(csv::Trim::All)
        .from_reader(file);

    let mut rows: Vec<NumericRow> = Vec::new();
    for result in rdr.records() {
        let record = result.map_err(|source| OutbreakError::Csv {
            path: path.to_path_buf(),
            source,
        })?;
        let line = record.position().map(|p| p.line()).unwrap_or(0);
        let values = record
            .iter()
            .enumerate()
            .map(|(column, field)| {
                field.parse::<f64>().map_err(|_| OutbreakError::Parse {
                    path: path.to_path_buf(),
                    line,
                    column: column + 1,
                    value: field.to_string(),
                })
            })
            .collect::<Result<Vec<f64>>>()?;
        if let Some(first) = rows.first() {
            if values.len() != first.values.len() {
                return Err(OutbreakError::RaggedRow {
                    path: path.to_path_buf(),
                    line,
                    expected: first.values.len(),
                    found: values.len(),
                });
            }
        }
        rows.push(NumericRow { line, values });
    }
    Ok(rows)
}

/// Load a comma-delimited numeric table, optionally skipping a header row.
pub fn load_matrix(path: impl AsRef<Path>, has_header: bool) -> Result<Vec<Vec<f64>>> {
    let rows = read_rows(path.as_ref(), has_header)?;
    Ok(rows.into_iter().map(|row| row.values).collect())
}

/// Load a case line list: a header row, then `id,x,y[,...]` rows.
pub fn load_cases(path: impl AsRef<Path>) -> Result<Vec<Case>> {
    let path = path.as_ref();
    let cases = read_rows(path, true)?
        .into_iter()
        .map(|row| match row.values[..] {
            [id, x, y, ..] => Ok(Case::new(id, x, y)),
            _ => Err(OutbreakError::MissingColumns {
                path: path.to_path_buf(),
                line: row.line,
                found: row.values.len(),
            }),
        })
        .collect::<Result<Vec<Case>>>()?;
    info!("Loaded {} cases from {}", cases.len(), path.display());
    Ok(cases)
}

/// Load a headerless population grid.
pub fn load_population(path: impl AsRef<Path>) -> Result<PopulationGrid> {
    let path = path.as_ref();
    let grid = PopulationGrid::from_rows(load_matrix(path, false)?)?;
    info!(
        "Loaded {}x{} population grid from {}",
        grid.rows(),
        grid.cols(),
        path.display()
    );
    Ok(grid)
}
