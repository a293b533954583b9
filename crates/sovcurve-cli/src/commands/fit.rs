//! Fit command implementation.
//!
//! Fits a Svensson curve to one country's bonds and evaluates it on the
//! standard tenor grid.

use anyhow::Result;
use clap::Args;
use serde::Serialize;
use tabled::{settings::Style, Table, Tabled};

use sovcurve_curves::display::PARAMETER_DISPLAY_DP;
use sovcurve_engine::{CurveOutput, CurveRequest, CurveService};

use crate::cli::OutputFormat;
use crate::error::CliError;
use crate::output::{print_csv, print_header, print_json, KeyValue};

/// Arguments for the fit command.
#[derive(Args, Debug)]
pub struct FitArgs {
    /// Country as spelled in the snapshot
    #[arg(short, long)]
    pub country: String,

    /// As-of date (YYYY-MM-DD). Defaults to today.
    #[arg(long)]
    pub date: Option<String>,

    /// Additional maturity to evaluate, in years (e.g. "7" or "2.5")
    #[arg(short, long)]
    pub maturity: Option<String>,
}

impl From<&FitArgs> for CurveRequest {
    fn from(args: &FitArgs) -> Self {
        CurveRequest {
            country: Some(args.country.clone()),
            date: args.date.clone(),
            specific_maturity: args.maturity.clone(),
            target_years: None,
        }
    }
}

/// Grid row for table and CSV output.
#[derive(Debug, Serialize, Tabled)]
struct GridRow {
    #[tabled(rename = "Tenor")]
    tenor: String,
    #[tabled(rename = "Yield (%)")]
    #[serde(rename = "yield")]
    yield_percent: String,
}

/// Execute the fit command.
pub fn execute(args: FitArgs, service: &CurveService, format: OutputFormat) -> Result<()> {
    let output = service
        .fit_curve(&CurveRequest::from(&args))
        .map_err(CliError::from)?;
    print_curve(&for_display(output), format)
}

/// Parameters are shown at display precision in every format.
pub(crate) fn for_display(mut output: CurveOutput) -> CurveOutput {
    output.parameters = output.parameters.rounded(PARAMETER_DISPLAY_DP);
    output
}

/// Prints a fitted curve in the requested format.
pub(crate) fn print_curve(output: &CurveOutput, format: OutputFormat) -> Result<()> {
    match format {
        OutputFormat::Table => {
            print_header("Svensson Curve");
            println!("Country: {}", output.country);
            println!("As-of Date: {}", output.date);
            println!("Instruments: {}", output.diagnostics.instruments);
            println!(
                "Iterations: {} ({} evaluations)",
                output.diagnostics.iterations, output.diagnostics.function_evaluations
            );
            println!(
                "RMS Error: {:.2} bps (max {:.2} bps)",
                output.diagnostics.rms_error_bps, output.diagnostics.max_error_bps
            );
            println!();

            let params: Vec<KeyValue> = output
                .parameters
                .named()
                .iter()
                .map(|(name, value)| KeyValue::from_f64(*name, *value, PARAMETER_DISPLAY_DP as usize))
                .collect();
            println!("{}", Table::new(&params).with(Style::rounded()));

            print_header("Yields");
            println!("{}", Table::new(grid_rows(output)).with(Style::rounded()));

            if let Some(specific) = &output.specific_maturity {
                println!();
                println!(
                    "Yield at {}Y: {:.3}%",
                    specific.maturity, specific.yield_percent
                );
            }
        }
        OutputFormat::Json => print_json(output)?,
        OutputFormat::Csv => {
            let mut rows = grid_rows(output);
            if let Some(specific) = &output.specific_maturity {
                rows.push(GridRow {
                    tenor: format!("{}Y", specific.maturity),
                    yield_percent: format!("{:.3}", specific.yield_percent),
                });
            }
            print_csv(&rows)?;
        }
        OutputFormat::Minimal => match &output.specific_maturity {
            Some(specific) => println!("{:.3}", specific.yield_percent),
            None => {
                let values: Vec<String> = output
                    .parameters
                    .named()
                    .iter()
                    .map(|(_, value)| format!("{:.4}", value))
                    .collect();
                println!("{}", values.join(" "));
            }
        },
    }
    Ok(())
}

fn grid_rows(output: &CurveOutput) -> Vec<GridRow> {
    output
        .grid
        .iter()
        .map(|point| GridRow {
            tenor: point.tenor.to_string(),
            yield_percent: format!("{:.3}", point.yield_percent),
        })
        .collect()
}
