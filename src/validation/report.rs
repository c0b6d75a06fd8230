//! Findings about a universe that would break or skew its staff encodings.
//!
//! Every finding names the object it concerns, so a failing staff can be
//! traced back to the annotation that needs fixing.

use serde::Serialize;
use std::fmt;

/// Everything found wrong with one universe, in check order.
#[derive(Clone, Debug, Default, Serialize)]
pub struct ValidationReport {
    pub issues: Vec<ValidationIssue>,
}

impl ValidationReport {
    pub fn new() -> Self {
        Self { issues: Vec::new() }
    }

    pub fn add(&mut self, issue: ValidationIssue) {
        self.issues.push(issue);
    }

    /// Returns the number of errors in the report.
    pub fn error_count(&self) -> usize {
        self.issues
            .iter()
            .filter(|i| i.severity == Severity::Error)
            .count()
    }

    /// Returns the number of warnings in the report.
    pub fn warning_count(&self) -> usize {
        self.issues
            .iter()
            .filter(|i| i.severity == Severity::Warning)
            .count()
    }

    /// True when every staff can be encoded.
    pub fn is_ok(&self) -> bool {
        self.error_count() == 0
    }

    /// True when nothing at all was flagged.
    pub fn is_clean(&self) -> bool {
        self.issues.is_empty()
    }

    /// Returns true if any issue carries the given code.
    pub fn has_code(&self, code: IssueCode) -> bool {
        self.issues.iter().any(|i| i.code == code)
    }
}

impl fmt::Display for ValidationReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.issues.is_empty() {
            return writeln!(f, "Validation passed: no issues found");
        }

        writeln!(
            f,
            "Validation completed with {} error(s) and {} warning(s):",
            self.error_count(),
            self.warning_count()
        )?;
        writeln!(f)?;

        for issue in &self.issues {
            writeln!(f, "  {}", issue)?;
        }

        Ok(())
    }
}

/// One finding about an object, or about the universe as a whole.
#[derive(Clone, Debug, Serialize)]
pub struct ValidationIssue {
    pub severity: Severity,

    /// Stable across releases, for filtering JSON reports.
    pub code: IssueCode,

    pub message: String,

    /// The object the finding is about.
    pub context: IssueContext,
}

impl ValidationIssue {
    pub fn new(
        severity: Severity,
        code: IssueCode,
        message: impl Into<String>,
        context: IssueContext,
    ) -> Self {
        Self {
            severity,
            code,
            message: message.into(),
            context,
        }
    }

    pub fn error(code: IssueCode, message: impl Into<String>, context: IssueContext) -> Self {
        Self::new(Severity::Error, code, message, context)
    }

    pub fn warning(code: IssueCode, message: impl Into<String>, context: IssueContext) -> Self {
        Self::new(Severity::Warning, code, message, context)
    }
}

impl fmt::Display for ValidationIssue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let severity = match self.severity {
            Severity::Error => "ERROR",
            Severity::Warning => "WARN ",
        };
        write!(
            f,
            "[{}] {:?} in {}: {}",
            severity, self.code, self.context, self.message
        )
    }
}

/// Whether a finding blocks encoding.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
pub enum Severity {
    /// Encoding still succeeds, but the sequence may not reflect the page.
    Warning,
    /// An error that makes at least one staff fail to encode.
    Error,
}

/// What kind of annotation problem was found.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize)]
pub enum IssueCode {
    /// Multiple objects have the same ID.
    DuplicateObjectId,

    /// A link points to an object missing from the universe.
    DanglingLink,
    /// A link has no matching link in the opposite direction.
    AsymmetricLink,
    /// A link list names the same object more than once.
    DuplicateLink,

    /// An object has an empty category label.
    EmptyClassName,
    /// A staff-attached label belongs to a known family but has no grapheme mapping.
    UnmappedCategory,

    /// A bounding box has non-finite coordinates (NaN or Infinity).
    BBoxNotFinite,
    /// A bounding box has incorrect ordering (left > right or top > bottom).
    InvalidBBoxOrdering,
    /// A bounding box has zero area.
    InvalidBBoxArea,

    /// A staff has zero or negative height and cannot define a frame.
    DegenerateStaff,
    /// The universe contains no staff at all.
    NoStaves,
}

/// Where in the universe a finding applies.
#[derive(Clone, Debug, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum IssueContext {
    Universe,
    Object { id: u64 },
}

impl fmt::Display for IssueContext {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            IssueContext::Universe => write!(f, "universe"),
            IssueContext::Object { id } => write!(f, "object {}", id),
        }
    }
}
