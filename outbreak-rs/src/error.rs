use std::path::PathBuf;

use thiserror::Error;

/// Errors raised while loading inputs, analysing an outbreak or writing its figure.
#[derive(Error, Debug)]
pub enum OutbreakError {
    #[error("failed to open {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to read CSV {}: {source}", path.display())]
    Csv {
        path: PathBuf,
        #[source]
        source: csv::Error,
    },

    #[error("{}:{line}: column {column}: cannot parse {value:?} as a number", path.display())]
    Parse {
        path: PathBuf,
        line: u64,
        column: usize,
        value: String,
    },

    #[error("{}:{line}: expected {expected} columns, found {found}", path.display())]
    RaggedRow {
        path: PathBuf,
        line: u64,
        expected: usize,
        found: usize,
    },

    #[error("{}:{line}: case rows need an id, x and y column, found {found} columns", path.display())]
    MissingColumns {
        path: PathBuf,
        line: u64,
        found: usize,
    },

    #[error("population grid row {row} has {found} cells, expected {expected}")]
    RaggedGrid {
        row: usize,
        expected: usize,
        found: usize,
    },

    #[error("no cases to locate an outbreak centre from")]
    NoCases,

    #[error("invalid TOML configuration: {0}")]
    Toml(#[from] toml::de::Error),

    #[error("invalid JSON configuration: {0}")]
    Json(#[from] serde_json::Error),

    #[error("invalid configuration: {0}")]
    InvalidConfig(String),

    #[error("failed to write {}: {source}", path.display())]
    Write {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("plotting failed: {0}")]
    Plot(String),

    #[error("PNG encoding failed: {0}")]
    Image(#[from] image::ImageError),
}

pub type Result<T> = std::result::Result<T, OutbreakError>;
