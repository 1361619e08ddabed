mod bootstrap;

use anyhow::Result;
use clap::Parser;
use lens_core::settings::Settings;
use lens_data::{
    arbitrage, concentration, election, loader, platform_war, timelapse, wash_trading, writer,
};

fn main() -> Result<()> {
    let settings = Settings::parse();

    bootstrap::setup_logging(&settings.log_level)?;
    tracing::info!("market-lens v{} starting", env!("CARGO_PKG_VERSION"));

    bootstrap::ensure_output_dir(&settings.output_dir)?;

    println!("Reading ledger...");
    let records = loader::load_records(&settings.input)?;
    println!("  {} rows loaded", records.len());

    let out = &settings.output_dir;

    println!("Generating page 1: Platform War...");
    writer::write_dataset(out, platform_war::FILE_NAME, &platform_war::build(&records))?;

    println!("Generating page 2: Arbitrage Map...");
    writer::write_dataset(out, arbitrage::FILE_NAME, &arbitrage::build(&records))?;

    println!("Generating page 3: Wash Trading...");
    writer::write_dataset(out, wash_trading::FILE_NAME, &wash_trading::build(&records))?;

    println!("Generating page 4: Election Impact...");
    writer::write_dataset(out, election::FILE_NAME, &election::build(&records))?;

    println!("Generating page 5: Concentration...");
    writer::write_dataset(out, concentration::FILE_NAME, &concentration::build(&records))?;

    println!("Generating page 6: Time Lapse...");
    let matrix = timelapse::build(&records);
    writer::write_dataset(out, timelapse::FILE_NAME, &matrix)?;
    println!(
        "  {} subcategories, {} days",
        matrix.subcategories.len(),
        matrix.dates.len()
    );

    println!("Done! JSON files written to {}", out.display());

    Ok(())
}
