use std::path::Path;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

// ── Logging bootstrap ──────────────────────────────────────────────────────────

/// Initialise the global `tracing` subscriber.
///
/// `log_level` is mapped to a [`tracing_subscriber::EnvFilter`] directive.
/// Falls back to `"info"` if the level string is not recognised.
pub fn setup_logging(log_level: &str) -> anyhow::Result<()> {
    let upper = log_level.to_uppercase();
    let normalised = match upper.as_str() {
        "DEBUG" => "debug",
        "INFO" => "info",
        "WARNING" => "warn",
        "ERROR" => "error",
        other => other,
    };

    let filter = EnvFilter::try_new(normalised).unwrap_or_else(|_| EnvFilter::new("info"));

    let subscriber = fmt::layer().with_target(false).with_thread_ids(false);

    tracing_subscriber::registry()
        .with(filter)
        .with(subscriber)
        .init();

    Ok(())
}

// ── Output directory bootstrap ─────────────────────────────────────────────────

/// Ensure the output directory exists before the pipeline starts writing.
pub fn ensure_output_dir(dir: &Path) -> lens_core::Result<()> {
    std::fs::create_dir_all(dir).map_err(|e| lens_core::LensError::Write {
        path: dir.to_path_buf(),
        source: e,
    })?;
    Ok(())
}

// ── Tests ──────────────────────────────────────────────────────────────────────
