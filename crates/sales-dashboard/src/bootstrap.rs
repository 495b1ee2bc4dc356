use std::path::{Path, PathBuf};
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

// ── Logging bootstrap ──────────────────────────────────────────────────────────

/// Initialise the global `tracing` subscriber from the CLI log level.
///
/// Falls back to `"info"` if the level string is not recognised.
pub fn setup_logging(log_level: &str) -> anyhow::Result<()> {
    let directive = match log_level.to_uppercase().as_str() {
        "DEBUG" => "debug",
        "INFO" => "info",
        "WARNING" => "warn",
        "ERROR" => "error",
        other => other,
    }
    .to_lowercase();

    let filter = EnvFilter::try_new(directive).unwrap_or_else(|_| EnvFilter::new("info"));

    let subscriber = fmt::layer().with_target(false).with_thread_ids(false);

    tracing_subscriber::registry()
        .with(filter)
        .with(subscriber)
        .init();

    Ok(())
}

// ── Data-path resolution ───────────────────────────────────────────────────────

/// Default dataset locations probed when no `--data` flag is given,
/// relative to the working directory.
const DEFAULT_CANDIDATES: &[&str] = &["sales_data.csv", "data/sales_data.csv"];

/// Resolve the dataset path: the explicit flag when given, otherwise the
/// first default candidate that exists.
///
/// Returns `None` when nothing is found.
pub fn resolve_data_path(explicit: Option<&Path>) -> Option<PathBuf> {
    if let Some(path) = explicit {
        return Some(path.to_path_buf());
    }
    DEFAULT_CANDIDATES
        .iter()
        .map(PathBuf::from)
        .find(|p| p.exists())
}

// ── Tests ──────────────────────────────────────────────────────────────────────
