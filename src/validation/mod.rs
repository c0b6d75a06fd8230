//! Object universe validation for staffseq.
//!
//! This module checks a universe before encoding, for:
//! - Structural integrity (unique IDs, resolvable, symmetric and non-repeated links)
//! - Label coverage (known families whose leaf tables miss a label)
//! - Geometric validity (finite, ordered boxes and usable staves)

mod report;

pub use report::{IssueCode, IssueContext, Severity, ValidationIssue, ValidationReport};

use std::collections::{HashMap, HashSet};

use crate::grapheme::classify::{classify_family, lookup};
use crate::grapheme::{CategoryFamily, GraphemeFamily};
use crate::ir::{AnnotatedObject, LinkDirection, ObjectId, ObjectUniverse};

/// Options for validation behavior.
#[derive(Clone, Debug, Default)]
pub struct ValidateOptions {
    /// If true, treat warnings as errors.
    pub strict: bool,
}

/// Validates a universe and returns a report of all issues found.
pub fn validate_universe(universe: &ObjectUniverse, _opts: &ValidateOptions) -> ValidationReport {
    let mut report = ValidationReport::new();

    validate_ids(universe, &mut report);
    validate_labels(universe, &mut report);
    validate_links(universe, &mut report);
    validate_boxes(universe, &mut report);
    validate_staves(universe, &mut report);

    report
}

fn validate_ids(universe: &ObjectUniverse, report: &mut ValidationReport) {
    let mut seen_ids: HashMap<ObjectId, usize> = HashMap::new();

    for (idx, object) in universe.iter().enumerate() {
        if let Some(first_idx) = seen_ids.get(&object.id) {
            report.add(ValidationIssue::error(
                IssueCode::DuplicateObjectId,
                format!(
                    "Duplicate object ID {} (first seen at index {})",
                    object.id, first_idx
                ),
                context(object),
            ));
        } else {
            seen_ids.insert(object.id, idx);
        }
    }
}

fn validate_labels(universe: &ObjectUniverse, report: &mut ValidationReport) {
    for object in universe.iter() {
        if object.class_name.is_empty() {
            report.add(ValidationIssue::warning(
                IssueCode::EmptyClassName,
                "Empty category label",
                context(object),
            ));
        }
    }

    // The linearizer walks each staff's incoming links, so those are the
    // objects whose rest or clef label must be in its table.
    let mut reported = HashSet::new();
    for staff in universe.staves() {
        for object in staff.inlinks.iter().filter_map(|&id| universe.get(id)) {
            // Accidentals are only looked up after an exact match, so only
            // staff-level rests and clefs can miss their table.
            let family = match classify_family(&object.class_name) {
                Some(CategoryFamily::Rest) => GraphemeFamily::Rest,
                Some(CategoryFamily::Clef) => GraphemeFamily::Clef,
                _ => continue,
            };
            if lookup(family, &object.class_name).is_none() && reported.insert(object.id) {
                report.add(ValidationIssue::error(
                    IssueCode::UnmappedCategory,
                    format!(
                        "Category '{}' on staff {} looks like a {} but has no grapheme mapping",
                        object.class_name, staff.id, family
                    ),
                    context(object),
                ));
            }
        }
    }
}

fn validate_links(universe: &ObjectUniverse, report: &mut ValidationReport) {
    for object in universe.iter() {
        check_repeated_links(object, &object.outlinks, LinkDirection::Outgoing, report);
        check_repeated_links(object, &object.inlinks, LinkDirection::Incoming, report);

        for &target_id in &object.outlinks {
            match universe.get(target_id) {
                None => report.add(ValidationIssue::error(
                    IssueCode::DanglingLink,
                    format!("Outgoing link to non-existent object {}", target_id),
                    context(object),
                )),
                Some(target) if !target.inlinks.contains(&object.id) => {
                    report.add(ValidationIssue::warning(
                        IssueCode::AsymmetricLink,
                        format!(
                            "Outgoing link to object {} has no matching incoming link",
                            target_id
                        ),
                        context(object),
                    ))
                }
                Some(_) => {}
            }
        }

        for &source_id in &object.inlinks {
            match universe.get(source_id) {
                None => report.add(ValidationIssue::error(
                    IssueCode::DanglingLink,
                    format!("Incoming link from non-existent object {}", source_id),
                    context(object),
                )),
                Some(source) if !source.outlinks.contains(&object.id) => {
                    report.add(ValidationIssue::warning(
                        IssueCode::AsymmetricLink,
                        format!(
                            "Incoming link from object {} has no matching outgoing link",
                            source_id
                        ),
                        context(object),
                    ))
                }
                Some(_) => {}
            }
        }
    }
}

fn check_repeated_links(
    object: &AnnotatedObject,
    links: &[ObjectId],
    direction: LinkDirection,
    report: &mut ValidationReport,
) {
    let mut seen = HashSet::with_capacity(links.len());
    let mut repeated = HashSet::new();
    for &id in links {
        if !seen.insert(id) && repeated.insert(id) {
            report.add(ValidationIssue::warning(
                IssueCode::DuplicateLink,
                format!("Object {} is listed more than once in {} links", id, direction),
                context(object),
            ));
        }
    }
}

fn validate_boxes(universe: &ObjectUniverse, report: &mut ValidationReport) {
    for object in universe.iter() {
        let bbox = &object.bbox;

        if !bbox.is_finite() {
            report.add(ValidationIssue::error(
                IssueCode::BBoxNotFinite,
                format!(
                    "Non-finite coordinates ({}, {}, {}, {})",
                    bbox.left, bbox.top, bbox.right, bbox.bottom
                ),
                context(object),
            ));
            continue;
        }

        if !bbox.is_ordered() {
            report.add(ValidationIssue::error(
                IssueCode::InvalidBBoxOrdering,
                format!(
                    "Invalid ordering: left/top ({}, {}) should be <= right/bottom ({}, {})",
                    bbox.left, bbox.top, bbox.right, bbox.bottom
                ),
                context(object),
            ));
        } else if bbox.area() == 0.0 {
            report.add(ValidationIssue::warning(
                IssueCode::InvalidBBoxArea,
                "Zero area",
                context(object),
            ));
        }
    }
}

fn validate_staves(universe: &ObjectUniverse, report: &mut ValidationReport) {
    let mut staff_count = 0;

    for staff in universe.staves() {
        staff_count += 1;
        let height = staff.bbox.height();
        if !(height.is_finite() && height > 0.0) {
            report.add(ValidationIssue::error(
                IssueCode::DegenerateStaff,
                format!("Staff height {} must be positive", height),
                context(staff),
            ));
        }
    }

    if staff_count == 0 {
        report.add(ValidationIssue::warning(
            IssueCode::NoStaves,
            "No staff objects found; nothing will be encoded",
            IssueContext::Universe,
        ));
    }
}

fn context(object: &AnnotatedObject) -> IssueContext {
    IssueContext::Object {
        id: object.id.as_u64(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ir::{connect, BBox};

    fn valid_objects() -> Vec<AnnotatedObject> {
        let mut objects = vec![
            AnnotatedObject::new(1u64, "staff", BBox::from_ltrb(0.0, 100.0, 500.0, 140.0)),
            AnnotatedObject::new(2u64, "notehead-full", BBox::from_ltrb(50.0, 110.0, 60.0, 120.0)),
            AnnotatedObject::new(3u64, "flat", BBox::from_ltrb(40.0, 102.0, 46.0, 122.0)),
        ];
        connect(&mut objects, ObjectId(2), ObjectId(1));
        connect(&mut objects, ObjectId(2), ObjectId(3));
        objects
    }

    fn validate(objects: Vec<AnnotatedObject>) -> ValidationReport {
        validate_universe(&ObjectUniverse::new(objects), &ValidateOptions::default())
    }

    #[test]
    fn test_valid_universe() {
        let report = validate(valid_objects());
        assert!(
            report.is_clean(),
            "Expected no issues, got: {:?}",
            report.issues
        );
    }

    #[test]
    fn test_duplicate_object_id() {
        let mut objects = valid_objects();
        objects.push(AnnotatedObject::new(3u64, "sharp", BBox::from_ltrb(0.0, 0.0, 1.0, 1.0)));

        let report = validate(objects);
        assert_eq!(report.error_count(), 1);
        assert!(report.has_code(IssueCode::DuplicateObjectId));
    }

    #[test]
    fn test_dangling_links() {
        let mut objects = valid_objects();
        objects[1].outlinks.push(ObjectId(42));
        objects[0].inlinks.push(ObjectId(43));

        let report = validate(objects);
        assert_eq!(report.error_count(), 2);
        assert!(report.has_code(IssueCode::DanglingLink));
    }

    #[test]
    fn test_asymmetric_link() {
        let mut objects = valid_objects();
        objects[0].inlinks.clear();

        let report = validate(objects);
        assert_eq!(report.warning_count(), 1);
        assert!(report.has_code(IssueCode::AsymmetricLink));
    }

    #[test]
    fn test_unmapped_rest_attached_to_staff() {
        let mut objects = valid_objects();
        objects.push(AnnotatedObject::new(
            4u64,
            "64th_rest",
            BBox::from_ltrb(80.0, 105.0, 90.0, 135.0),
        ));
        connect(&mut objects, ObjectId(4), ObjectId(1));

        let report = validate(objects);
        assert!(report.has_code(IssueCode::UnmappedCategory));
    }

    #[test]
    fn test_unmapped_rest_listed_only_by_staff() {
        let mut objects = valid_objects();
        objects[0].inlinks.push(ObjectId(4));
        objects.push(AnnotatedObject::new(
            4u64,
            "64th_rest",
            BBox::from_ltrb(80.0, 105.0, 90.0, 135.0),
        ));

        let report = validate(objects);
        assert_eq!(report.error_count(), 1);
        assert!(report.has_code(IssueCode::UnmappedCategory));
        assert!(report.has_code(IssueCode::AsymmetricLink));
    }

    #[test]
    fn test_incoming_link_without_outgoing_link() {
        let mut objects = valid_objects();
        objects[1].outlinks.retain(|&id| id != ObjectId(3));

        let report = validate(objects);
        assert_eq!(report.error_count(), 0);
        assert_eq!(report.warning_count(), 1);
        assert!(report.issues[0].message.contains("Incoming link from object 2"));
    }

    #[test]
    fn test_repeated_link_is_a_warning() {
        let mut objects = valid_objects();
        objects[0].inlinks.push(ObjectId(2));
        objects[0].inlinks.push(ObjectId(2));

        let report = validate(objects);
        assert_eq!(report.error_count(), 0);
        assert_eq!(report.warning_count(), 1);
        assert!(report.has_code(IssueCode::DuplicateLink));
    }

    #[test]
    fn test_unattached_unmapped_rest_is_ignored() {
        let mut objects = valid_objects();
        objects.push(AnnotatedObject::new(
            4u64,
            "64th_rest",
            BBox::from_ltrb(80.0, 105.0, 90.0, 135.0),
        ));

        let report = validate(objects);
        assert!(!report.has_code(IssueCode::UnmappedCategory));
    }

    #[test]
    fn test_degenerate_staff() {
        let mut objects = valid_objects();
        objects[0].bbox = BBox::from_ltrb(0.0, 100.0, 500.0, 100.0);

        let report = validate(objects);
        assert!(report.has_code(IssueCode::DegenerateStaff));
        assert!(report.has_code(IssueCode::InvalidBBoxArea));
    }

    #[test]
    fn test_bbox_invalid_ordering() {
        let mut objects = valid_objects();
        objects[2].bbox = BBox::from_ltrb(46.0, 102.0, 40.0, 122.0);

        let report = validate(objects);
        assert!(report.has_code(IssueCode::InvalidBBoxOrdering));
    }

    #[test]
    fn test_bbox_not_finite() {
        let mut objects = valid_objects();
        objects[2].bbox = BBox::from_ltrb(f64::NAN, 102.0, 46.0, 122.0);

        let report = validate(objects);
        assert!(report.has_code(IssueCode::BBoxNotFinite));
    }

    #[test]
    fn test_no_staves_warning() {
        let report = validate(vec![AnnotatedObject::new(
            1u64,
            "flat",
            BBox::from_ltrb(0.0, 0.0, 5.0, 5.0),
        )]);
        assert_eq!(report.warning_count(), 1);
        assert!(report.has_code(IssueCode::NoStaves));
    }

    #[test]
    fn test_empty_class_name() {
        let mut objects = valid_objects();
        objects[2].class_name = String::new();

        let report = validate(objects);
        assert!(report.has_code(IssueCode::EmptyClassName));
    }
}
