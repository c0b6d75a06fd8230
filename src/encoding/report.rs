//! Encoding report types.
//!
//! Summarizes a batch encoding run: how many staves were seen, encoded and
//! skipped, which graphemes were produced, and why staves failed.

use serde::Serialize;
use std::collections::BTreeMap;
use std::fmt;

use crate::grapheme::GraphemeType;
use crate::ir::ObjectId;

/// A report generated while encoding one or more documents.
#[derive(Clone, Debug, Default, Serialize)]
pub struct EncodeReport {
    /// Number of documents processed.
    pub documents: usize,
    /// Staves considered for encoding.
    pub staves_seen: usize,
    /// Staves encoded successfully.
    pub staves_encoded: usize,
    /// Total placement steps over all encoded staves.
    pub steps: usize,
    /// Steps per grapheme type.
    pub grapheme_counts: BTreeMap<GraphemeType, usize>,
    /// Staves that failed and were skipped.
    pub failures: Vec<StaffFailure>,
}

/// A staff whose encoding failed.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct StaffFailure {
    /// Document the staff belongs to, when known.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub document: Option<String>,
    pub staff: ObjectId,
    pub message: String,
}

impl EncodeReport {
    /// Create a new empty report.
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a successfully encoded staff.
    pub fn record_encoded(&mut self, grapheme_types: impl IntoIterator<Item = GraphemeType>) {
        self.staves_seen += 1;
        self.staves_encoded += 1;
        for grapheme_type in grapheme_types {
            self.steps += 1;
            *self.grapheme_counts.entry(grapheme_type).or_default() += 1;
        }
    }

    /// Record a staff that failed and was skipped.
    pub fn record_failure(&mut self, failure: StaffFailure) {
        self.staves_seen += 1;
        self.failures.push(failure);
    }

    /// Number of skipped staves.
    pub fn skipped_count(&self) -> usize {
        self.failures.len()
    }

    /// Returns true if every staff seen was encoded.
    pub fn is_complete(&self) -> bool {
        self.failures.is_empty()
    }

    /// Fold another report (e.g. of another document) into this one.
    pub fn merge(&mut self, other: EncodeReport) {
        self.documents += other.documents;
        self.staves_seen += other.staves_seen;
        self.staves_encoded += other.staves_encoded;
        self.steps += other.steps;
        for (grapheme_type, count) in other.grapheme_counts {
            *self.grapheme_counts.entry(grapheme_type).or_default() += count;
        }
        self.failures.extend(other.failures);
    }
}

impl fmt::Display for EncodeReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(
            f,
            "Encoded {} of {} staves from {} document(s): {} steps",
            self.staves_encoded, self.staves_seen, self.documents, self.steps
        )?;

        if !self.grapheme_counts.is_empty() {
            writeln!(f)?;
            writeln!(f, "Graphemes:")?;
            for (grapheme_type, count) in &self.grapheme_counts {
                writeln!(f, "  {:<16} {}", grapheme_type.as_str(), count)?;
            }
        }

        if !self.failures.is_empty() {
            writeln!(f)?;
            writeln!(f, "Skipped staves ({}):", self.failures.len())?;
            for failure in &self.failures {
                match &failure.document {
                    Some(document) => writeln!(
                        f,
                        "  - {} staff {}: {}",
                        document, failure.staff, failure.message
                    )?,
                    None => writeln!(f, "  - staff {}: {}", failure.staff, failure.message)?,
                }
            }
        }

        Ok(())
    }
}
