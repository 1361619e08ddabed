use std::path::PathBuf;
use thiserror::Error;

/// All errors produced by the market-lens pipeline.
#[derive(Error, Debug)]
pub enum LensError {
    /// The ledger file could not be opened or read from disk.
    #[error("Failed to read ledger {path}: {source}")]
    FileRead {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The ledger header row lacks a required field.
    #[error("Ledger header is missing required column: {0}")]
    MissingColumn(String),

    /// A structural CSV failure while iterating rows.
    #[error("Failed to parse ledger: {0}")]
    Csv(#[from] csv::Error),

    /// An output file or directory could not be written.
    #[error("Failed to write output {path}: {source}")]
    Write {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// A dataset could not be serialized to JSON.
    #[error("Failed to serialize dataset: {0}")]
    Json(#[from] serde_json::Error),

    /// Pass-through for any raw I/O error that does not carry a path.
    #[error(transparent)]
    Io(#[from] std::io::Error),

    /// Catch-all for errors from third-party crates via `anyhow`.
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

/// Convenience alias used throughout the lens crates.
pub type Result<T> = std::result::Result<T, LensError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display_file_read() {
        let io_err = std::io::Error::new(std::io::ErrorKind::NotFound, "no such file");
        let err = LensError::FileRead {
            path: PathBuf::from("/some/ledger.csv"),
            source: io_err,
        };
        let msg = err.to_string();
        assert!(msg.contains("Failed to read ledger"));
        assert!(msg.contains("/some/ledger.csv"));
        assert!(msg.contains("no such file"));
    }

    #[test]
    fn test_error_display_missing_column() {
        let err = LensError::MissingColumn("timestamp".to_string());
        assert_eq!(
            err.to_string(),
            "Ledger header is missing required column: timestamp"
        );
    }

    #[test]
    fn test_error_display_write() {
        let io_err = std::io::Error::new(std::io::ErrorKind::PermissionDenied, "denied");
        let err = LensError::Write {
            path: PathBuf::from("/out/platform_war.json"),
            source: io_err,
        };
        let msg = err.to_string();
        assert!(msg.contains("Failed to write output"));
        assert!(msg.contains("denied"));
    }

    #[test]
    fn test_error_from_io() {
        let io_err = std::io::Error::new(std::io::ErrorKind::Other, "boom");
        let err: LensError = io_err.into();
        assert!(err.to_string().contains("boom"));
    }

    #[test]
    fn test_error_from_serde_json() {
        let json_err = serde_json::from_str::<serde_json::Value>("{invalid}").unwrap_err();
        let err: LensError = json_err.into();
        assert!(err.to_string().contains("Failed to serialize dataset"));
    }
}
