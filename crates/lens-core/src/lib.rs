//! Core domain types for the market-lens pipeline.
//!
//! Holds the ledger record model, the shared excluded-category constant,
//! numeric rounding helpers, the error taxonomy and the CLI settings.

pub mod calculations;
pub mod error;
pub mod models;
pub mod settings;

pub use error::{LensError, Result};
