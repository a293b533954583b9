//! Sovcurve CLI - Command-line interface for sovereign yield curves.
//!
//! # Usage
//!
//! ```bash
//! # List countries in the snapshot
//! sovcurve --data bonds.csv countries
//!
//! # Benchmark bond nearest 10 years
//! sovcurve reference --country Germany --date 2025-11-28
//!
//! # Fit a curve and evaluate it at 7 years as well
//! sovcurve fit --country Germany --date 2025-11-28 --maturity 7
//!
//! # Both, as JSON
//! sovcurve --format json report --country Germany --date 2025-11-28
//! ```

use std::sync::Arc;

use anyhow::Result;
use clap::Parser;

use sovcurve_engine::{CurveService, EngineConfig};
use sovcurve_ext_file::CsvInstrumentSource;

mod cli;
mod commands;
mod error;
mod output;

use cli::{Cli, Commands};
use error::CliError;

fn main() -> Result<()> {
    let cli = Cli::parse();

    // Set up output format
    let format = cli.format;

    // Load the bond snapshot
    let source = CsvInstrumentSource::from_path(&cli.data).map_err(|source| CliError::Data {
        path: cli.data.clone(),
        source,
    })?;
    let service = CurveService::new(Arc::new(source), EngineConfig::default());

    // Execute command
    match cli.command {
        Commands::Countries(args) => commands::countries::execute(args, &service, format)?,
        Commands::Reference(args) => commands::reference::execute(args, &service, format)?,
        Commands::Fit(args) => commands::fit::execute(args, &service, format)?,
        Commands::Report(args) => commands::report::execute(args, &service, format)?,
    }

    Ok(())
}
