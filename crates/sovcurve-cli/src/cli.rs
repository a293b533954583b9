//! CLI argument definitions.

use std::path::PathBuf;

use clap::{Parser, Subcommand, ValueEnum};

use crate::commands::{CountriesArgs, FitArgs, ReferenceArgs, ReportArgs};

/// Sovcurve - Sovereign yield curve fitting CLI
#[derive(Parser)]
#[command(name = "sovcurve")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Bond snapshot CSV
    #[arg(
        short,
        long,
        env = "SOVCURVE_DATA",
        default_value = "data/sovereign_bonds.csv",
        global = true
    )]
    pub data: PathBuf,

    /// Output format
    #[arg(short, long, value_enum, default_value = "table", global = true)]
    pub format: OutputFormat,

    #[command(subcommand)]
    pub command: Commands,
}

/// Available commands
#[derive(Subcommand)]
pub enum Commands {
    /// List the countries in the snapshot
    Countries(CountriesArgs),

    /// Find the benchmark bond nearest a target tenor
    Reference(ReferenceArgs),

    /// Fit a Svensson curve and evaluate it on the standard grid
    Fit(FitArgs),

    /// Benchmark bond and fitted curve together
    Report(ReportArgs),
}

/// Output format options
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum)]
pub enum OutputFormat {
    /// Human-readable table format
    #[default]
    Table,
    /// JSON format
    Json,
    /// CSV format
    Csv,
    /// Minimal output (just the values)
    Minimal,
}
