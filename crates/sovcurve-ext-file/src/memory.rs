//! In-memory instrument source.

use sovcurve_core::traits::InstrumentSource;
use sovcurve_core::types::Instrument;

/// Instrument source over an owned list, for tests and embedding.
#[derive(Debug, Clone, Default)]
pub struct InMemoryInstrumentSource {
    instruments: Vec<Instrument>,
}

impl InMemoryInstrumentSource {
    /// Creates a source over the given instruments.
    pub fn new(instruments: Vec<Instrument>) -> Self {
        Self { instruments }
    }
}

impl From<Vec<Instrument>> for InMemoryInstrumentSource {
    fn from(instruments: Vec<Instrument>) -> Self {
        Self::new(instruments)
    }
}

impl FromIterator<Instrument> for InMemoryInstrumentSource {
    fn from_iter<I: IntoIterator<Item = Instrument>>(iter: I) -> Self {
        Self::new(iter.into_iter().collect())
    }
}

impl InstrumentSource for InMemoryInstrumentSource {
    fn instruments(&self) -> &[Instrument] {
        &self.instruments
    }
}
