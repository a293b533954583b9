//! Countries command implementation.

use anyhow::Result;
use clap::Args;
use serde::Serialize;
use tabled::Tabled;

use sovcurve_engine::CurveService;

use crate::cli::OutputFormat;
use crate::output::{print_header, print_json, print_output};

/// Arguments for the countries command.
#[derive(Args, Debug)]
pub struct CountriesArgs {}

#[derive(Debug, Serialize, Tabled)]
struct CountryRow {
    #[tabled(rename = "Country")]
    country: String,
}

/// Execute the countries command.
pub fn execute(_args: CountriesArgs, service: &CurveService, format: OutputFormat) -> Result<()> {
    let countries = service.countries();

    match format {
        OutputFormat::Table => {
            print_header("Countries");
            let rows: Vec<CountryRow> = countries
                .into_iter()
                .map(|country| CountryRow { country })
                .collect();
            print_output(&rows, format)?;
        }
        OutputFormat::Json => {
            let total = countries.len();
            print_json(&serde_json::json!({
                "countries": countries,
                "total": total
            }))?;
        }
        OutputFormat::Csv => {
            let rows: Vec<CountryRow> = countries
                .into_iter()
                .map(|country| CountryRow { country })
                .collect();
            print_output(&rows, format)?;
        }
        OutputFormat::Minimal => {
            for country in countries {
                println!("{}", country);
            }
        }
    }
    Ok(())
}
