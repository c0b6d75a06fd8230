//! The Situation / Intent / Action triple.
//!
//! A sequence model writing a staff observes a [`Situation`], declares an
//! [`Intent`] (what to place next) and performs an [`Action`] (the jump that
//! realizes it). All vectors are in staff units.

use serde::Serialize;

use crate::grapheme::{GraphemeAnchorType, GraphemeType};
use crate::ir::{Staff, Vector2};

/// Where the cursor stands, and what was just placed.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct Situation {
    /// Cursor position relative to the measure start.
    pub position_in_measure: Vector2<Staff>,

    /// Offset from the last placed notehead. Not tracked yet, always `None`.
    pub position_from_last_notehead: Option<Vector2<Staff>>,

    /// Type of the grapheme just placed.
    pub this_grapheme: Option<GraphemeType>,

    /// Anchor of the grapheme just placed.
    pub this_anchor_type: Option<GraphemeAnchorType>,

    /// Width of the grapheme just placed.
    pub this_grapheme_width: f64,
}

impl Situation {
    /// The state before anything is placed.
    pub fn initial() -> Self {
        Self {
            position_in_measure: Vector2::zero(),
            position_from_last_notehead: None,
            this_grapheme: None,
            this_anchor_type: None,
            this_grapheme_width: 0.0,
        }
    }
}

impl Default for Situation {
    fn default() -> Self {
        Self::initial()
    }
}

/// The grapheme and anchor to place next.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
pub struct Intent {
    pub grapheme: GraphemeType,
    pub anchor_type: GraphemeAnchorType,
}

/// The geometric consequence of realizing an intent.
#[derive(Clone, Copy, Debug, PartialEq, Serialize)]
pub struct Action {
    /// Target anchor position minus the current position in measure.
    pub position_jump: Vector2<Staff>,
}
