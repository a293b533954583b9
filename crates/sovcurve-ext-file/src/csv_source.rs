//! CSV bond quote snapshot.

use std::io::Read;
use std::path::{Path, PathBuf};

use serde::Deserialize;

use sovcurve_core::traits::InstrumentSource;
use sovcurve_core::types::{Date, Instrument};

use crate::error::FileError;

// =============================================================================
// CSV INSTRUMENT SOURCE
// =============================================================================

/// One snapshot row. Columns beyond these are ignored.
#[derive(Debug, Deserialize)]
struct SnapshotRecord {
    #[serde(rename = "Country_Name")]
    country: String,
    #[serde(rename = "Maturity", default)]
    maturity: String,
    #[serde(rename = "Issue", default)]
    issue: String,
    #[serde(rename = "ISIN", default)]
    isin: String,
    /// Holds a fraction despite the header.
    #[serde(rename = "Indicative yield, %", default)]
    yield_text: String,
}

impl From<SnapshotRecord> for Instrument {
    fn from(record: SnapshotRecord) -> Self {
        let maturity = Date::parse_lenient(&record.maturity);
        let yield_value = record
            .yield_text
            .trim()
            .parse::<f64>()
            .ok()
            .filter(|y| !y.is_nan());
        Instrument::new(record.isin, record.issue, record.country, maturity, yield_value)
    }
}

/// Snapshot of sovereign bond quotes loaded from CSV.
///
/// Expected header: `Country_Name`, `Maturity`, `Issue`, `ISIN`,
/// `Indicative yield, %`. Only `Country_Name` is mandatory. Unparseable
/// maturities and yields load as absent rather than failing the file; a
/// row with the wrong number of fields fails the whole load.
#[derive(Debug, Clone)]
pub struct CsvInstrumentSource {
    file_path: Option<PathBuf>,
    instruments: Vec<Instrument>,
}

impl CsvInstrumentSource {
    /// Loads a snapshot from a file.
    pub fn from_path(file_path: impl AsRef<Path>) -> Result<Self, FileError> {
        let path = file_path.as_ref();
        let reader = csv::ReaderBuilder::new()
            .trim(csv::Trim::All)
            .from_path(path)
            .map_err(|e| FileError::IoError(format!("{}: {e}", path.display())))?;

        Ok(Self {
            file_path: Some(path.to_path_buf()),
            instruments: Self::read_all(reader)?,
        })
    }

    /// Loads a snapshot from any reader.
    pub fn from_reader<R: Read>(rdr: R) -> Result<Self, FileError> {
        let reader = csv::ReaderBuilder::new()
            .trim(csv::Trim::All)
            .from_reader(rdr);

        Ok(Self {
            file_path: None,
            instruments: Self::read_all(reader)?,
        })
    }

    /// Path the snapshot was loaded from, if any.
    pub fn file_path(&self) -> Option<&Path> {
        self.file_path.as_deref()
    }

    fn read_all<R: Read>(mut reader: csv::Reader<R>) -> Result<Vec<Instrument>, FileError> {
        reader
            .deserialize::<SnapshotRecord>()
            .map(|row| row.map(Instrument::from).map_err(|e| FileError::from_csv(&e)))
            .collect()
    }
}

impl InstrumentSource for CsvInstrumentSource {
    fn instruments(&self) -> &[Instrument] {
        &self.instruments
    }
}
