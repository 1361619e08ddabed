use clap::Parser;
use std::path::PathBuf;

// ── Settings (CLI) ─────────────────────────────────────────────────────────────

/// Pre-aggregate the merged prediction-market ledger into JSON datasets
#[derive(Parser, Debug, Clone)]
#[command(
    name = "market-lens",
    about = "Pre-aggregate the merged prediction-market ledger into JSON datasets",
    version
)]
pub struct Settings {
    /// Path to the merged ledger CSV
    #[arg(long, default_value = "kalshi_polymarket_merged.csv")]
    pub input: PathBuf,

    /// Directory the JSON datasets are written to (created if absent)
    #[arg(long, default_value = "data")]
    pub output_dir: PathBuf,

    /// Logging level
    #[arg(long, default_value = "INFO", value_parser = ["DEBUG", "INFO", "WARNING", "ERROR"])]
    pub log_level: String,
}
