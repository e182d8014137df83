pub mod config;
pub mod error;
pub mod import;
pub mod rights;
pub mod telemetry;

pub use import::{ImportedRecord, RecordImportError, RightsRecordImporter};
pub use rights::{RightsAnalysisEngine, RightsAssessment};
