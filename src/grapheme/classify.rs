//! Category label classification.
//!
//! Two steps: [`classify_family`] routes a raw corpus label to the family
//! the linearizer dispatches on, and the leaf tables map a label of a known
//! family to its [`GraphemeType`]. A label that reaches a leaf table but is
//! missing from it is an error: the corpus holds a notation type the
//! vocabulary does not model yet.

use serde::Serialize;
use std::fmt;

use super::vocabulary::GraphemeType;
use crate::error::StaffSeqError;
use crate::ir::AnnotatedObject;

pub const REST_GRAPHEME_MAP: &[(&str, GraphemeType)] = &[
    ("whole_rest", GraphemeType::RestWhole),
    ("half_rest", GraphemeType::RestHalf),
    ("quarter_rest", GraphemeType::RestQuarter),
    ("8th_rest", GraphemeType::RestEighth),
    ("16th_rest", GraphemeType::Rest16th),
    // Spelled this way in the corpus.
    ("32th_rest", GraphemeType::Rest32nd),
];

pub const CLEF_GRAPHEME_MAP: &[(&str, GraphemeType)] = &[
    ("g-clef", GraphemeType::ClefG),
    ("f-clef", GraphemeType::ClefF),
    ("c-clef", GraphemeType::ClefC),
];

// TODO: double_sharp and double_flat once the vocabulary has graphemes for them.
pub const ACCIDENTAL_GRAPHEME_MAP: &[(&str, GraphemeType)] = &[
    ("sharp", GraphemeType::Sharp),
    ("flat", GraphemeType::Flat),
    ("natural", GraphemeType::Natural),
];

pub const NOTEHEAD_CLASSES: &[&str] = &[
    "notehead-full",
    "notehead-empty",
    "grace-notehead-full",
    "grace-notehead-empty",
];

pub const BARLINE_CLASSES: &[&str] = &[
    "thin_barline",
    "thick_barline",
    "measure_separator",
    "repeat",
    "repeat-dot",
    "dotted_barline",
];

pub const KEY_SIGNATURE_CLASS: &str = "key_signature";
pub const LEDGER_LINE_CLASS: &str = "ledger_line";

const REST_SUFFIX: &str = "_rest";
const CLEF_SUFFIX: &str = "-clef";

/// Leaf table a category label is looked up in.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum GraphemeFamily {
    Rest,
    Clef,
    Accidental,
}

impl GraphemeFamily {
    fn table(self) -> &'static [(&'static str, GraphemeType)] {
        match self {
            GraphemeFamily::Rest => REST_GRAPHEME_MAP,
            GraphemeFamily::Clef => CLEF_GRAPHEME_MAP,
            GraphemeFamily::Accidental => ACCIDENTAL_GRAPHEME_MAP,
        }
    }
}

impl fmt::Display for GraphemeFamily {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            GraphemeFamily::Rest => write!(f, "rest"),
            GraphemeFamily::Clef => write!(f, "clef"),
            GraphemeFamily::Accidental => write!(f, "accidental"),
        }
    }
}

/// How an object attached to a staff is linearized.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum CategoryFamily {
    Notehead,
    Rest,
    Clef,
    KeySignature,
    Barline,
}

/// Routes a category label to its dispatch family.
///
/// Returns `None` for categories that are not modeled (time signatures,
/// stems, slurs, ...); those are skipped rather than treated as errors.
pub fn classify_family(class_name: &str) -> Option<CategoryFamily> {
    if NOTEHEAD_CLASSES.contains(&class_name) {
        Some(CategoryFamily::Notehead)
    } else if class_name.ends_with(REST_SUFFIX) {
        Some(CategoryFamily::Rest)
    } else if class_name.ends_with(CLEF_SUFFIX) {
        Some(CategoryFamily::Clef)
    } else if class_name == KEY_SIGNATURE_CLASS {
        Some(CategoryFamily::KeySignature)
    } else if BARLINE_CLASSES.contains(&class_name) {
        Some(CategoryFamily::Barline)
    } else {
        None
    }
}

/// Looks up a label in one family's table.
pub fn lookup(family: GraphemeFamily, class_name: &str) -> Option<GraphemeType> {
    family
        .table()
        .iter()
        .find(|(name, _)| *name == class_name)
        .map(|&(_, grapheme_type)| grapheme_type)
}

/// Classifies an object already known to belong to `family`.
///
/// # Errors
/// Returns [`StaffSeqError::UnclassifiedCategory`] when the family's table
/// has no entry for the object's label.
pub fn classify(
    family: GraphemeFamily,
    object: &AnnotatedObject,
) -> Result<GraphemeType, StaffSeqError> {
    lookup(family, &object.class_name).ok_or_else(|| StaffSeqError::UnclassifiedCategory {
        family,
        class_name: object.class_name.clone(),
        object: object.id,
    })
}

/// Returns true for labels in the accidental table.
pub fn is_accidental(class_name: &str) -> bool {
    lookup(GraphemeFamily::Accidental, class_name).is_some()
}
