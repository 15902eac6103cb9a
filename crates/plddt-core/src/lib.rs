//! plddt-core
//!
//! - locate pickled structure-prediction results below a directory
//! - decode them into typed [`PredictionRecord`]s
//! - collect confidence sequences for overlapped plots
//!
mod aggregate;
mod artifact;
mod bands;
mod error;
mod numpy;
mod record;

pub use aggregate::{Aggregate, Series};
pub use artifact::{collection_label, discover_artifacts, PredictionArtifact, ARTIFACT_EXTENSION};
pub use bands::{BandSummary, ConfidenceBand};
pub use error::{ParseError, RecordError};
pub use record::{mean, PredictionRecord, CONFIDENCE_KEY};
