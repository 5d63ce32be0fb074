use std::fs;
use std::io::{self, Write};
use std::path::{Path, PathBuf};

use log::debug;
use serde::{Deserialize, Serialize};

use crate::DEFAULT_CELL_SIZE;
use crate::aggregate::WindowShape;
use crate::error::{OutbreakError, Result};

/// Run configuration. Every field has a default, so an absent or partial file is fine.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct AnalysisConfig {
    pub data_dir: PathBuf,
    pub case_file: String,
    pub population_file: String,
    /// Side of one population cell, in meters.
    pub cell_size: f64,
    pub window: WindowShape,
    pub output: OutputConfig,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct OutputConfig {
    /// Directory for the figure; `None` or empty streams it to stdout.
    pub dir: Option<PathBuf>,
    pub figure: String,
    /// TrueType font used for figure text.
    pub font: Option<PathBuf>,
    pub width: u32,
    pub height: u32,
}

impl Default for AnalysisConfig {
    fn default() -> Self {
        AnalysisConfig {
            data_dir: PathBuf::from("data"),
            case_file: "case_locations.csv".to_string(),
            population_file: "population.csv".to_string(),
            cell_size: DEFAULT_CELL_SIZE,
            window: WindowShape::Square,
            output: OutputConfig::default(),
        }
    }
}

impl Default for OutputConfig {
    fn default() -> Self {
        OutputConfig {
            dir: Some(PathBuf::from("output")),
            figure: "outbreak_plot.png".to_string(),
            font: None,
            width: 1000,
            height: 800,
        }
    }
}

impl AnalysisConfig {
    pub fn from_toml_str(content: &str) -> Result<Self> {
        let config: AnalysisConfig = toml::from_str(content)?;
        config.validate()?;
        Ok(config)
    }

    pub fn from_json_str(content: &str) -> Result<Self> {
        let config: AnalysisConfig = serde_json::from_str(content)?;
        config.validate()?;
        Ok(config)
    }

    /// Reads a `.json` file as JSON and anything else as TOML.
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let content = fs::read_to_string(path).map_err(|source| OutbreakError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        if path.extension().is_some_and(|ext| ext == "json") {
            Self::from_json_str(&content)
        } else {
            Self::from_toml_str(&content)
        }
    }

    pub fn load_or_default(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        if path.exists() {
            debug!("Reading configuration from {}", path.display());
            Self::from_file(path)
        } else {
            debug!("No {} found, using defaults", path.display());
            Ok(Self::default())
        }
    }

    pub fn validate(&self) -> Result<()> {
        if !(self.cell_size.is_finite() && self.cell_size > 0.0) {
            return Err(OutbreakError::InvalidConfig(format!(
                "cell_size must be a positive number, got {}",
                self.cell_size
            )));
        }
        if self.output.width == 0 || self.output.height == 0 {
            return Err(OutbreakError::InvalidConfig(
                "figure width and height must be non-zero".to_string(),
            ));
        }
        if self.output.figure.is_empty() {
            return Err(OutbreakError::InvalidConfig(
                "figure file name is empty".to_string(),
            ));
        }
        Ok(())
    }

    pub fn case_path(&self) -> PathBuf {
        self.data_dir.join(&self.case_file)
    }

    pub fn population_path(&self) -> PathBuf {
        self.data_dir.join(&self.population_file)
    }

    pub fn output_dir(&self) -> Option<PathBuf> {
        self.output
            .dir
            .as_ref()
            .filter(|dir| !dir.as_os_str().is_empty())
            .cloned()
    }

    /// Writes `data` into the output directory, creating it, or to stdout when no
    /// directory is configured. Returns the written path.
    pub fn write(&self, filename: &str, data: &[u8]) -> Result<Option<PathBuf>> {
        if let Some(dir) = self.output_dir() {
            fs::create_dir_all(&dir).map_err(|source| OutbreakError::Write {
                path: dir.clone(),
                source,
            })?;
            let path = dir.join(filename);
            fs::write(&path, data).map_err(|source| OutbreakError::Write {
                path: path.clone(),
                source,
            })?;
            Ok(Some(path))
        } else {
            let mut stdout = io::stdout().lock();
            stdout
                .write_all(data)
                .and_then(|_| stdout.flush())
                .map_err(|source| OutbreakError::Write {
                    path: PathBuf::from("<stdout>"),
                    source,
                })?;
            Ok(None)
        }
    }
}
