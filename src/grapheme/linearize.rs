//! Staff linearization.
//!
//! Walks every object attached to a staff in left-to-right order and turns
//! it into zero or more graphemes. The left edge of the bounding box is the
//! only ordering signal, applied independently at each decomposition level.

use super::classify::{classify, classify_family, CategoryFamily, GraphemeFamily};
use super::decompose::{decompose_key_signature, decompose_notehead, sort_left_to_right};
use super::vocabulary::{Grapheme, GraphemeType};
use crate::error::StaffSeqError;
use crate::ir::{AnnotatedObject, ObjectUniverse};

/// Linearizes one staff into a flat sequence of graphemes.
///
/// The staff's attached objects are its incoming links. Objects whose
/// category is not modeled are skipped.
///
/// # Errors
/// Fails if a link cannot be resolved or a rest, clef or accidental label
/// is missing from its table. No partial sequence is returned.
pub fn linearize_staff<'u>(
    staff: &'u AnnotatedObject,
    universe: &'u ObjectUniverse,
) -> Result<Vec<Grapheme<'u>>, StaffSeqError> {
    let mut attached = universe.inlink_objects(staff)?;
    sort_left_to_right(&mut attached, universe);

    let mut graphemes = Vec::with_capacity(attached.len());
    for object in attached {
        let Some(family) = classify_family(&object.class_name) else {
            log::debug!(
                "staff {}: skipping object {} with unmodeled category '{}'",
                staff.id,
                object.id,
                object.class_name
            );
            continue;
        };

        match family {
            CategoryFamily::Notehead => graphemes.extend(decompose_notehead(object, universe)?),
            CategoryFamily::Rest => {
                let grapheme_type = classify(GraphemeFamily::Rest, object)?;
                graphemes.push(Grapheme::primary(object, grapheme_type));
            }
            CategoryFamily::Clef => {
                let grapheme_type = classify(GraphemeFamily::Clef, object)?;
                graphemes.push(Grapheme::primary(object, grapheme_type));
            }
            CategoryFamily::KeySignature => {
                graphemes.extend(decompose_key_signature(object, universe)?)
            }
            CategoryFamily::Barline => {
                graphemes.push(Grapheme::primary(object, GraphemeType::Barline))
            }
        }
    }

    Ok(graphemes)
}
