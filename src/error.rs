use std::path::PathBuf;
use thiserror::Error;

use crate::grapheme::GraphemeFamily;
use crate::ir::{LinkDirection, ObjectId};
use crate::validation::ValidationReport;

/// The main error type for staffseq operations.
#[derive(Debug, Error)]
pub enum StaffSeqError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Failed to parse MUSCIMA++ XML from {path}: {message}")]
    MuscimaXmlParse { path: PathBuf, message: String },

    #[error("Failed to parse universe JSON from {path}: {source}")]
    UniverseJsonParse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("Failed to write universe JSON to {path}: {source}")]
    UniverseJsonWrite {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("Failed to write feature CSV: {0}")]
    FeatureCsvWrite(#[from] csv::Error),

    /// A category was routed to a known family but its leaf table has no entry for it.
    #[error("Object {object}: category '{class_name}' has no {family} grapheme mapping")]
    UnclassifiedCategory {
        family: GraphemeFamily,
        class_name: String,
        object: ObjectId,
    },

    #[error("Object {from}: {direction} link to object {to} cannot be resolved")]
    UnresolvableLink {
        from: ObjectId,
        to: ObjectId,
        direction: LinkDirection,
    },

    #[error("Staff {staff} has degenerate height {height} (must be positive and finite)")]
    DegenerateStaff { staff: ObjectId, height: f64 },

    #[error("Staff {0} not found in the object universe")]
    StaffNotFound(ObjectId),

    #[error("Validation failed with {error_count} error(s) and {warning_count} warning(s)")]
    ValidationFailed {
        error_count: usize,
        warning_count: usize,
        report: ValidationReport,
    },

    #[error("Unsupported format: {0}")]
    UnsupportedFormat(String),
}
