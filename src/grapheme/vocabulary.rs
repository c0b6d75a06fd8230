//! The closed grapheme vocabulary.

use serde::ser::SerializeStruct;
use serde::{Deserialize, Serialize};
use std::fmt;

use crate::ir::AnnotatedObject;

/// Primitive visual symbol kinds that can be placed on a staff.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum GraphemeType {
    LedgerLine,
    ClefG,
    ClefF,
    ClefC,
    NoteheadFull,
    NoteheadEmpty,
    Stem,
    RestWhole,
    RestHalf,
    RestQuarter,
    RestEighth,
    #[serde(rename = "rest_16th")]
    Rest16th,
    #[serde(rename = "rest_32nd")]
    Rest32nd,
    Beam,
    Dot,
    Barline,
    Sharp,
    Flat,
    Natural,
}

impl GraphemeType {
    /// Every grapheme type, in the order used for one-hot encoding.
    pub const ALL: [GraphemeType; 19] = [
        GraphemeType::LedgerLine,
        GraphemeType::ClefG,
        GraphemeType::ClefF,
        GraphemeType::ClefC,
        GraphemeType::NoteheadFull,
        GraphemeType::NoteheadEmpty,
        GraphemeType::Stem,
        GraphemeType::RestWhole,
        GraphemeType::RestHalf,
        GraphemeType::RestQuarter,
        GraphemeType::RestEighth,
        GraphemeType::Rest16th,
        GraphemeType::Rest32nd,
        GraphemeType::Beam,
        GraphemeType::Dot,
        GraphemeType::Barline,
        GraphemeType::Sharp,
        GraphemeType::Flat,
        GraphemeType::Natural,
    ];

    /// Position of this type in [`GraphemeType::ALL`].
    pub fn index(self) -> usize {
        match self {
            GraphemeType::LedgerLine => 0,
            GraphemeType::ClefG => 1,
            GraphemeType::ClefF => 2,
            GraphemeType::ClefC => 3,
            GraphemeType::NoteheadFull => 4,
            GraphemeType::NoteheadEmpty => 5,
            GraphemeType::Stem => 6,
            GraphemeType::RestWhole => 7,
            GraphemeType::RestHalf => 8,
            GraphemeType::RestQuarter => 9,
            GraphemeType::RestEighth => 10,
            GraphemeType::Rest16th => 11,
            GraphemeType::Rest32nd => 12,
            GraphemeType::Beam => 13,
            GraphemeType::Dot => 14,
            GraphemeType::Barline => 15,
            GraphemeType::Sharp => 16,
            GraphemeType::Flat => 17,
            GraphemeType::Natural => 18,
        }
    }

    /// Stable name used in reports and serialized output.
    pub fn as_str(self) -> &'static str {
        match self {
            GraphemeType::LedgerLine => "ledger_line",
            GraphemeType::ClefG => "clef_g",
            GraphemeType::ClefF => "clef_f",
            GraphemeType::ClefC => "clef_c",
            GraphemeType::NoteheadFull => "notehead_full",
            GraphemeType::NoteheadEmpty => "notehead_empty",
            GraphemeType::Stem => "stem",
            GraphemeType::RestWhole => "rest_whole",
            GraphemeType::RestHalf => "rest_half",
            GraphemeType::RestQuarter => "rest_quarter",
            GraphemeType::RestEighth => "rest_eighth",
            GraphemeType::Rest16th => "rest_16th",
            GraphemeType::Rest32nd => "rest_32nd",
            GraphemeType::Beam => "beam",
            GraphemeType::Dot => "dot",
            GraphemeType::Barline => "barline",
            GraphemeType::Sharp => "sharp",
            GraphemeType::Flat => "flat",
            GraphemeType::Natural => "natural",
        }
    }
}

impl fmt::Display for GraphemeType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.pad(self.as_str())
    }
}

/// Named reference points of a grapheme.
///
/// Every grapheme exposes its primary anchor (the geometric center).
/// Secondary anchors, such as the far end of a barline, are reserved.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum GraphemeAnchorType {
    Primary,
    Secondary,
}

impl GraphemeAnchorType {
    /// Every anchor type, in the order used for one-hot encoding.
    pub const ALL: [GraphemeAnchorType; 2] =
        [GraphemeAnchorType::Primary, GraphemeAnchorType::Secondary];

    /// Position of this anchor type in [`GraphemeAnchorType::ALL`].
    pub fn index(self) -> usize {
        match self {
            GraphemeAnchorType::Primary => 0,
            GraphemeAnchorType::Secondary => 1,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            GraphemeAnchorType::Primary => "primary",
            GraphemeAnchorType::Secondary => "secondary",
        }
    }
}

impl fmt::Display for GraphemeAnchorType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.pad(self.as_str())
    }
}

/// A primitive placement unit: one grapheme of one source object.
///
/// Graphemes borrow their source from the universe and live no longer than
/// one encoding pass.
#[derive(Clone, Debug, PartialEq)]
pub struct Grapheme<'u> {
    source: &'u AnnotatedObject,
    grapheme_type: GraphemeType,
    anchors: Vec<GraphemeAnchorType>,
}

impl<'u> Grapheme<'u> {
    /// Creates a grapheme exposing only its primary anchor.
    pub fn primary(source: &'u AnnotatedObject, grapheme_type: GraphemeType) -> Self {
        Self {
            source,
            grapheme_type,
            anchors: vec![GraphemeAnchorType::Primary],
        }
    }

    /// The annotated object this grapheme was taken from.
    pub fn source(&self) -> &'u AnnotatedObject {
        self.source
    }

    pub fn grapheme_type(&self) -> GraphemeType {
        self.grapheme_type
    }

    /// Anchors in placement order; never empty.
    pub fn anchors(&self) -> &[GraphemeAnchorType] {
        &self.anchors
    }

    /// The anchor placed first.
    pub fn first_anchor(&self) -> GraphemeAnchorType {
        self.anchors[0]
    }
}

impl Serialize for Grapheme<'_> {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut state = serializer.serialize_struct("Grapheme", 4)?;
        state.serialize_field("object", &self.source.id)?;
        state.serialize_field("class_name", &self.source.class_name)?;
        state.serialize_field("grapheme", &self.grapheme_type)?;
        state.serialize_field("anchors", &self.anchors)?;
        state.end()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ir::BBox;

    #[test]
    fn test_index_matches_all_order() {
        for (position, grapheme_type) in GraphemeType::ALL.iter().enumerate() {
            assert_eq!(grapheme_type.index(), position);
        }
        for (position, anchor) in GraphemeAnchorType::ALL.iter().enumerate() {
            assert_eq!(anchor.index(), position);
        }
    }

    #[test]
    fn test_serde_names_match_as_str() {
        for grapheme_type in GraphemeType::ALL {
            let json = serde_json::to_string(&grapheme_type).expect("serialize");
            assert_eq!(json, format!("\"{}\"", grapheme_type.as_str()));
        }
    }

    #[test]
    fn test_primary_grapheme_has_single_anchor() {
        let object = crate::ir::AnnotatedObject::new(3u64, "flat", BBox::default());
        let grapheme = Grapheme::primary(&object, GraphemeType::Flat);
        assert_eq!(grapheme.anchors(), &[GraphemeAnchorType::Primary]);
        assert_eq!(grapheme.first_anchor(), GraphemeAnchorType::Primary);
        assert_eq!(grapheme.source().id.as_u64(), 3);
    }
}
