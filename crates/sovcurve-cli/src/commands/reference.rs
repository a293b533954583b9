//! Reference command implementation.
//!
//! Selects the benchmark bond whose remaining life is closest to the target
//! tenor.

use anyhow::Result;
use clap::Args;

use sovcurve_engine::{CurveRequest, CurveService, ReferencePointOutput};

use crate::cli::OutputFormat;
use crate::error::CliError;
use crate::output::{print_csv, print_header, print_json, print_output, KeyValue};

/// Arguments for the reference command.
#[derive(Args, Debug)]
pub struct ReferenceArgs {
    /// Country as spelled in the snapshot
    #[arg(short, long)]
    pub country: String,

    /// As-of date (YYYY-MM-DD)
    #[arg(long)]
    pub date: String,

    /// Target tenor in years. Defaults to 10.
    #[arg(short, long)]
    pub target: Option<f64>,
}

impl From<&ReferenceArgs> for CurveRequest {
    fn from(args: &ReferenceArgs) -> Self {
        let request = CurveRequest::for_country(args.country.clone()).on(args.date.clone());
        match args.target {
            Some(years) => request.with_target(years),
            None => request,
        }
    }
}

/// Execute the reference command.
pub fn execute(args: ReferenceArgs, service: &CurveService, format: OutputFormat) -> Result<()> {
    let output = service
        .reference_point(&CurveRequest::from(&args))
        .map_err(CliError::from)?;
    print_reference(&output, format)
}

/// Prints a reference point in the requested format.
pub(crate) fn print_reference(output: &ReferencePointOutput, format: OutputFormat) -> Result<()> {
    match format {
        OutputFormat::Table => {
            print_header("Reference Point");
            print_output(&reference_rows(output), format)?;
        }
        OutputFormat::Json => print_json(output)?,
        OutputFormat::Csv => print_csv(std::slice::from_ref(output))?,
        OutputFormat::Minimal => println!("{:.4}", output.yield_percent),
    }
    Ok(())
}

fn reference_rows(output: &ReferencePointOutput) -> Vec<KeyValue> {
    vec![
        KeyValue::new("Country", output.country.clone()),
        KeyValue::new("As-of Date", output.date.to_string()),
        KeyValue::new("Bond", output.bond_name.clone()),
        KeyValue::new("ISIN", output.isin.clone()),
        KeyValue::new("Maturity", output.maturity.to_string()),
        KeyValue::from_f64("Years to Maturity", output.year_fraction, 2),
        KeyValue::from_percent("Yield", output.yield_percent, 4),
    ]
}
