use std::path::PathBuf;
use thiserror::Error;

/// All errors produced by the sales dashboard.
#[derive(Error, Debug)]
pub enum DashboardError {
    /// A file could not be opened or read from disk.
    #[error("Failed to read file {path}: {source}")]
    FileRead {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// A file could not be created or written to disk.
    #[error("Failed to write file {path}: {source}")]
    FileWrite {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The input table lacks one or more required columns. Fatal to the
    /// load attempt; no partial dataset is returned.
    #[error("Missing required column(s): {}", .0.join(", "))]
    MissingColumns(Vec<String>),

    /// The CSV structure itself could not be parsed.
    #[error("Failed to parse CSV: {0}")]
    Csv(#[from] csv::Error),

    /// The given data path does not exist.
    #[error("Data path not found: {0}")]
    DataPathNotFound(PathBuf),

    /// No CSV files were found under the given directory.
    #[error("No CSV files found in {0}")]
    NoDataFiles(PathBuf),

    /// Pass-through for any raw I/O error that does not carry a path.
    #[error(transparent)]
    Io(#[from] std::io::Error),

    /// Catch-all for errors from third-party crates via `anyhow`.
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

/// Convenience alias used throughout the dashboard crates.
pub type Result<T> = std::result::Result<T, DashboardError>;
