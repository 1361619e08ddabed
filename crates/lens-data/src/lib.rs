//! Data layer for market-lens.
//!
//! Responsible for loading the merged prediction-market ledger CSV, running
//! the six independent aggregation passes over the in-memory record set, and
//! writing each resulting dataset as a JSON document.

pub mod arbitrage;
pub mod concentration;
pub mod election;
pub mod loader;
pub mod platform_war;
pub mod timelapse;
pub mod wash_trading;
pub mod writer;

pub use lens_core as core;
