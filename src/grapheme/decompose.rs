//! Decomposition of composite objects into primitive graphemes.

use std::cmp::Ordering;

use super::classify::{classify, is_accidental, GraphemeFamily, LEDGER_LINE_CLASS};
use super::vocabulary::{Grapheme, GraphemeType};
use crate::error::StaffSeqError;
use crate::ir::{AnnotatedObject, ObjectUniverse};

/// Sorts objects by ascending left edge.
///
/// Ties keep document order, so the result does not depend on the order in
/// which links were declared.
pub(crate) fn sort_left_to_right(objects: &mut [&AnnotatedObject], universe: &ObjectUniverse) {
    objects.sort_by(|a, b| {
        a.bbox
            .left
            .total_cmp(&b.bbox.left)
            .then_with(|| document_order(a, b, universe))
    });
}

fn document_order(a: &AnnotatedObject, b: &AnnotatedObject, universe: &ObjectUniverse) -> Ordering {
    universe.position(a.id).cmp(&universe.position(b.id))
}

/// Children of a composite object, left to right.
fn sorted_children<'u>(
    object: &AnnotatedObject,
    universe: &'u ObjectUniverse,
) -> Result<Vec<&'u AnnotatedObject>, StaffSeqError> {
    let mut children = universe.outlink_objects(object)?;
    sort_left_to_right(&mut children, universe);
    Ok(children)
}

/// Decomposes a notehead into the graphemes drawn for it.
///
/// Emits prefix accidentals first, then ledger lines, then the notehead
/// itself, each group left to right. Stems, dots and articulations linked
/// from the notehead are not emitted.
///
/// The notehead grapheme is always [`GraphemeType::NoteheadEmpty`], whether
/// the source label is full or empty. Fill state is not distinguished.
pub fn decompose_notehead<'u>(
    notehead: &'u AnnotatedObject,
    universe: &'u ObjectUniverse,
) -> Result<Vec<Grapheme<'u>>, StaffSeqError> {
    let children = sorted_children(notehead, universe)?;
    let mut graphemes = Vec::with_capacity(children.len() + 1);

    for &child in children.iter().filter(|c| is_accidental(&c.class_name)) {
        let grapheme_type = classify(GraphemeFamily::Accidental, child)?;
        graphemes.push(Grapheme::primary(child, grapheme_type));
    }

    for &child in children.iter().filter(|c| c.class_name == LEDGER_LINE_CLASS) {
        graphemes.push(Grapheme::primary(child, GraphemeType::LedgerLine));
    }

    graphemes.push(Grapheme::primary(notehead, GraphemeType::NoteheadEmpty));

    Ok(graphemes)
}

/// Decomposes a key signature into its sharps and flats, left to right.
///
/// Naturals and any other children are ignored.
pub fn decompose_key_signature<'u>(
    key_signature: &'u AnnotatedObject,
    universe: &'u ObjectUniverse,
) -> Result<Vec<Grapheme<'u>>, StaffSeqError> {
    let children = sorted_children(key_signature, universe)?;

    Ok(children
        .into_iter()
        .filter_map(|child| match child.class_name.as_str() {
            "sharp" => Some(Grapheme::primary(child, GraphemeType::Sharp)),
            "flat" => Some(Grapheme::primary(child, GraphemeType::Flat)),
            _ => None,
        })
        .collect())
}
