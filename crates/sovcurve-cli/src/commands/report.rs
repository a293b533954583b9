//! Report command implementation.
//!
//! Runs benchmark selection and the curve fit on the same filtered set and
//! shows whichever succeeded.

use anyhow::Result;
use clap::Args;

use sovcurve_engine::{CurveRequest, CurveService};

use crate::cli::OutputFormat;
use crate::commands::fit::{for_display, print_curve};
use crate::commands::reference::print_reference;
use crate::error::CliError;
use crate::output::{print_json, print_warning};

/// Arguments for the report command.
#[derive(Args, Debug)]
pub struct ReportArgs {
    /// Country as spelled in the snapshot
    #[arg(short, long)]
    pub country: String,

    /// As-of date (YYYY-MM-DD). Defaults to today.
    #[arg(long)]
    pub date: Option<String>,

    /// Additional maturity to evaluate, in years
    #[arg(short, long)]
    pub maturity: Option<String>,
}

/// Execute the report command.
pub fn execute(args: ReportArgs, service: &CurveService, format: OutputFormat) -> Result<()> {
    let request = CurveRequest {
        country: Some(args.country),
        date: args.date,
        specific_maturity: args.maturity,
        target_years: None,
    };
    let mut report = service.report(&request).map_err(CliError::from)?;
    report.curve = report.curve.map(for_display);

    if format == OutputFormat::Json {
        return print_json(&report);
    }

    match (&report.reference, &report.reference_error) {
        (Some(reference), _) => print_reference(reference, format)?,
        (None, Some(err)) => print_warning(&format!("No reference point: {}", err.error)),
        (None, None) => {}
    }
    match (&report.curve, &report.curve_error) {
        (Some(curve), _) => print_curve(curve, format)?,
        (None, Some(err)) => print_warning(&format!("No curve: {}", err.error)),
        (None, None) => {}
    }
    Ok(())
}
