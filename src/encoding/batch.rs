//! Encoding every staff of a universe.
//!
//! Staves are independent: each needs only read access to the universe, and
//! a failure in one staff never yields partial output for it. What happens
//! to the rest of the batch is decided by [`StaffErrorPolicy`].

use std::fmt;
use std::str::FromStr;

use super::encode::{encode_staff, StaffEncoding};
use super::report::{EncodeReport, StaffFailure};
use crate::error::StaffSeqError;
use crate::ir::{AnnotatedObject, ObjectId, ObjectUniverse};

/// What to do when a staff fails to encode.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum StaffErrorPolicy {
    /// Record the failure in the report and continue with the next staff.
    #[default]
    Skip,
    /// Stop and return the error.
    Abort,
}

impl FromStr for StaffErrorPolicy {
    type Err = StaffSeqError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "skip" => Ok(StaffErrorPolicy::Skip),
            "abort" => Ok(StaffErrorPolicy::Abort),
            other => Err(StaffSeqError::UnsupportedFormat(format!(
                "error policy '{}' (supported: skip, abort)",
                other
            ))),
        }
    }
}

impl fmt::Display for StaffErrorPolicy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            StaffErrorPolicy::Skip => write!(f, "skip"),
            StaffErrorPolicy::Abort => write!(f, "abort"),
        }
    }
}

/// Options for batch encoding.
#[derive(Clone, Debug, Default)]
pub struct EncodeOptions {
    /// Per-staff failure handling.
    pub on_error: StaffErrorPolicy,
    /// Encode only this staff instead of all of them.
    pub staff: Option<ObjectId>,
    /// Label used for this universe in failure reports.
    pub document: Option<String>,
}

/// The result of encoding a universe.
#[derive(Clone, Debug)]
pub struct UniverseEncoding<'u> {
    pub encodings: Vec<StaffEncoding<'u>>,
    pub report: EncodeReport,
}

/// Encodes the staves of a universe, in document order.
///
/// A selected staff goes through the same failure policy as a full pass.
///
/// # Errors
/// With [`StaffErrorPolicy::Abort`], returns the first staff error. A
/// requested staff that does not exist is always an error.
pub fn encode_universe<'u>(
    universe: &'u ObjectUniverse,
    opts: &EncodeOptions,
) -> Result<UniverseEncoding<'u>, StaffSeqError> {
    let staves: Vec<&AnnotatedObject> = match opts.staff {
        Some(id) => vec![universe
            .get(id)
            .filter(|object| object.is_staff())
            .ok_or(StaffSeqError::StaffNotFound(id))?],
        None => universe.staves().collect(),
    };

    let mut report = EncodeReport::new();
    report.documents = 1;
    let mut encodings = Vec::with_capacity(staves.len());

    for staff in staves {
        match encode_staff(staff, universe) {
            Ok(encoding) => {
                report.record_encoded(encoding.intents.iter().map(|intent| intent.grapheme));
                encodings.push(encoding);
            }
            Err(err) if opts.on_error == StaffErrorPolicy::Skip => {
                log::warn!("skipping staff {}: {}", staff.id, err);
                report.record_failure(StaffFailure {
                    document: opts.document.clone(),
                    staff: staff.id,
                    message: err.to_string(),
                });
            }
            Err(err) => return Err(err),
        }
    }

    Ok(UniverseEncoding { encodings, report })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ir::{connect, AnnotatedObject, BBox};

    /// Two staves: staff 0 holds a clef, staff 10 holds an unmapped rest.
    fn two_staff_universe() -> ObjectUniverse {
        let mut objects = vec![
            AnnotatedObject::new(0u64, "staff", BBox::from_ltrb(0.0, 100.0, 800.0, 140.0)),
            AnnotatedObject::new(1u64, "f-clef", BBox::from_ltrb(10.0, 100.0, 30.0, 130.0)),
            AnnotatedObject::new(10u64, "staff", BBox::from_ltrb(0.0, 300.0, 800.0, 340.0)),
            AnnotatedObject::new(11u64, "64th_rest", BBox::from_ltrb(50.0, 305.0, 60.0, 335.0)),
        ];
        connect(&mut objects, ObjectId(1), ObjectId(0));
        connect(&mut objects, ObjectId(11), ObjectId(10));
        ObjectUniverse::new(objects)
    }

    #[test]
    fn skip_policy_records_failures_and_continues() {
        let universe = two_staff_universe();
        let opts = EncodeOptions {
            document: Some("page.xml".into()),
            ..Default::default()
        };

        let result = encode_universe(&universe, &opts).expect("encode");
        assert_eq!(result.encodings.len(), 1);
        assert_eq!(result.encodings[0].staff, ObjectId(0));
        assert_eq!(result.report.staves_seen, 2);
        assert_eq!(result.report.skipped_count(), 1);
        assert_eq!(result.report.failures[0].staff, ObjectId(10));
        assert_eq!(result.report.failures[0].document.as_deref(), Some("page.xml"));
        assert!(result.report.failures[0].message.contains("64th_rest"));
    }

    #[test]
    fn abort_policy_returns_first_error() {
        let universe = two_staff_universe();
        let opts = EncodeOptions {
            on_error: StaffErrorPolicy::Abort,
            ..Default::default()
        };

        assert!(matches!(
            encode_universe(&universe, &opts),
            Err(StaffSeqError::UnclassifiedCategory { .. })
        ));
    }

    #[test]
    fn single_staff_selection() {
        let universe = two_staff_universe();
        let opts = EncodeOptions {
            staff: Some(ObjectId(0)),
            ..Default::default()
        };

        let result = encode_universe(&universe, &opts).expect("encode");
        assert_eq!(result.encodings.len(), 1);
        assert_eq!(result.report.staves_seen, 1);
        assert_eq!(result.report.steps, 1);
    }

    #[test]
    fn failing_selected_staff_follows_policy() {
        let universe = two_staff_universe();
        let skip = EncodeOptions {
            staff: Some(ObjectId(10)),
            ..Default::default()
        };

        let result = encode_universe(&universe, &skip).expect("skip records the failure");
        assert!(result.encodings.is_empty());
        assert_eq!(result.report.staves_seen, 1);
        assert_eq!(result.report.failures[0].staff, ObjectId(10));

        let abort = EncodeOptions {
            on_error: StaffErrorPolicy::Abort,
            ..skip
        };
        assert!(matches!(
            encode_universe(&universe, &abort),
            Err(StaffSeqError::UnclassifiedCategory { .. })
        ));
    }

    #[test]
    fn missing_selected_staff_is_an_error() {
        let universe = two_staff_universe();
        let opts = EncodeOptions {
            staff: Some(ObjectId(99)),
            ..Default::default()
        };
        assert!(matches!(
            encode_universe(&universe, &opts),
            Err(StaffSeqError::StaffNotFound(ObjectId(99)))
        ));
    }

    #[test]
    fn policy_parses_from_str() {
        assert_eq!("skip".parse::<StaffErrorPolicy>().ok(), Some(StaffErrorPolicy::Skip));
        assert_eq!("abort".parse::<StaffErrorPolicy>().ok(), Some(StaffErrorPolicy::Abort));
        assert!("retry".parse::<StaffErrorPolicy>().is_err());
    }
}
