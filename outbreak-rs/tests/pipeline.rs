use std::fs;
use std::path::Path;

use outbreak::{AnalysisConfig, OutbreakCentre, OutbreakError, Pipeline, WindowShape};

fn write_inputs(dir: &Path, cases: &str, population: &str) {
    fs::create_dir_all(dir).unwrap();
    fs::write(dir.join("case_locations.csv"), cases).unwrap();
    fs::write(dir.join("population.csv"), population).unwrap();
}

fn population_csv(rows: usize, cols: usize, value: impl Fn(usize, usize) -> f64) -> String {
    (0..rows)
        .map(|r| {
            (0..cols)
                .map(|c| value(r, c).to_string())
                .collect::<Vec<_>>()
                .join(",")
        })
        .collect::<Vec<_>>()
        .join("\n")
}

#[test]
fn analyses_files_and_writes_plot() {
    let root = tempfile::tempdir().unwrap();
    let data_dir = root.path().join("data");
    write_inputs(
        &data_dir,
        "case_id,x,y\n1,1050,1050\n2,1350,1050\n3,1050,1450\n",
        &population_csv(30, 30, |r, c| if (r + c) % 7 == 0 { 0.0 } else { 10.0 }),
    );

    let config = AnalysisConfig::from_toml_str(&format!(
        "data_dir = {:?}\n[output]\ndir = {:?}\nwidth = 400\nheight = 300\n",
        data_dir.to_string_lossy(),
        root.path().join("output").to_string_lossy()
    ))
    .unwrap();
    let pipeline = Pipeline::from_config(&config).unwrap();
    let run = pipeline
        .run_files(config.case_path(), config.population_path())
        .unwrap();

    let report = &run.analysis.report;
    assert_eq!(run.cases.len(), 3);
    assert_eq!(report.case_count, 3);
    assert_eq!(report.max_distance, 500.0);
    assert_eq!(report.centre, OutbreakCentre { x: 1350.0, y: 1050.0 });
    assert_eq!((report.grid_rows, report.grid_cols), (30, 30));
    assert!(report.affected_population > 0.0);
    assert!(report.affected_population <= report.total_population);

    let png = pipeline.render(&run.grid, &run.analysis, &config.output).unwrap();
    let written = config.write(&config.output.figure, &png).unwrap().unwrap();
    assert_eq!(written, root.path().join("output").join("outbreak_plot.png"));
    let bytes = fs::read(written).unwrap();
    assert!(bytes.starts_with(b"\x89PNG\r\n\x1a\n"));
}

#[test]
fn circle_window_counts_no_more_than_square() {
    let root = tempfile::tempdir().unwrap();
    write_inputs(
        root.path(),
        "id,x,y\n1,2000,2000\n2,2000,2800\n",
        &population_csv(40, 40, |r, c| (r * 40 + c) as f64),
    );
    let cases = root.path().join("case_locations.csv");
    let population = root.path().join("population.csv");

    let square = Pipeline::new(100.0, WindowShape::Square)
        .run_files(&cases, &population)
        .unwrap();
    let circle = Pipeline::new(100.0, WindowShape::Circle)
        .run_files(&cases, &population)
        .unwrap();
    assert_eq!(square.analysis.report.centre, circle.analysis.report.centre);
    assert!(circle.analysis.report.affected_population < square.analysis.report.affected_population);
    assert!(circle.analysis.report.affected_population > 0.0);
}

#[test]
fn malformed_population_aborts() {
    let root = tempfile::tempdir().unwrap();
    write_inputs(root.path(), "id,x,y\n1,0,0\n", "1,2,3\n4,oops,6\n");
    let err = Pipeline::new(100.0, WindowShape::Square)
        .run_files(
            root.path().join("case_locations.csv"),
            root.path().join("population.csv"),
        )
        .unwrap_err();
    assert!(matches!(err, OutbreakError::Parse { line: 2, column: 2, .. }));
}

#[test]
fn missing_case_file_aborts() {
    let root = tempfile::tempdir().unwrap();
    let err = Pipeline::new(100.0, WindowShape::Square)
        .run_files(
            root.path().join("case_locations.csv"),
            root.path().join("population.csv"),
        )
        .unwrap_err();
    assert!(matches!(err, OutbreakError::Io { .. }));
}
