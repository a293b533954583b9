//! CLI error types.

use std::path::PathBuf;

use thiserror::Error;

use sovcurve_engine::EngineError;
use sovcurve_ext_file::FileError;

/// CLI error type.
#[derive(Debug, Error)]
pub enum CliError {
    /// The bond snapshot could not be loaded.
    #[error("Failed to load bond data from {}: {source}", path.display())]
    Data {
        /// Snapshot path.
        path: PathBuf,
        /// Loader error.
        source: FileError,
    },

    /// The curve request failed.
    #[error("{} ({})", .0, .0.kind().as_str())]
    Request(#[from] EngineError),
}
