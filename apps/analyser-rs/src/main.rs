use std::path::Path;

use anyhow::Context;
use log::info;
use outbreak::{AnalysisConfig, Pipeline};

const CONFIG_FILE: &str = "outbreak.toml";

fn main() -> anyhow::Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let config = AnalysisConfig::load_or_default(Path::new(CONFIG_FILE))
        .with_context(|| format!("failed to load {CONFIG_FILE}"))?;
    let pipeline = Pipeline::from_config(&config)?;

    let run = pipeline
        .run_files(config.case_path(), config.population_path())
        .context("outbreak analysis failed")?;

    // With no output directory the figure goes to stdout, so keep the report off it.
    let report = &run.analysis.report;
    if config.output_dir().is_some() {
        println!("{report}");
    } else {
        eprintln!("{report}");
    }

    let png = pipeline
        .render(&run.grid, &run.analysis, &config.output)
        .context("failed to render outbreak plot")?;
    match config
        .write(&config.output.figure, &png)
        .context("failed to write outbreak plot")?
    {
        Some(path) => info!("Saved plot to {}", path.display()),
        None => info!("Wrote plot to stdout"),
    }
    Ok(())
}
