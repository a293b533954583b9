//! CLI command implementations.

pub mod countries;
pub mod fit;
pub mod reference;
pub mod report;

// Re-export submodules for convenience
pub use countries::CountriesArgs;
pub use fit::FitArgs;
pub use reference::ReferenceArgs;
pub use report::ReportArgs;
