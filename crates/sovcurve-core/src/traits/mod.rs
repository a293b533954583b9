//! Core abstractions consumed by the curve fitting layer.

use std::collections::BTreeSet;

use crate::types::Instrument;

/// A read-only snapshot of observed bond quotes.
///
/// Sources are loaded once, before the first request, and never mutated
/// afterwards. They are shared across request handlers behind an `Arc`,
/// hence the `Send + Sync` bound.
pub trait InstrumentSource: Send + Sync {
    /// Returns every record in the snapshot, in load order.
    fn instruments(&self) -> &[Instrument];

    /// Returns the distinct, non-empty country keys in sorted order.
    fn countries(&self) -> Vec<String> {
        self.instruments()
            .iter()
            .map(|i| i.country.as_str())
            .filter(|c| !c.trim().is_empty())
            .collect::<BTreeSet<_>>()
            .into_iter()
            .map(str::to_string)
            .collect()
    }

    /// Number of records in the snapshot.
    fn len(&self) -> usize {
        self.instruments().len()
    }

    /// Returns true when the snapshot holds no records.
    fn is_empty(&self) -> bool {
        self.instruments().is_empty()
    }
}
