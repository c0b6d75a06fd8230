//! The sequence encoder.
//!
//! Encoding is a single left fold over the linearized graphemes of a staff.
//! The accumulator is the running [`Situation`]; each step appends the
//! situation before placement, the intent and the action.

use serde::Serialize;

use super::model::{Action, Intent, Situation};
use super::normalize::StaffFrame;
use crate::error::StaffSeqError;
use crate::grapheme::{linearize_staff, Grapheme};
use crate::ir::{AnnotatedObject, ObjectId, ObjectUniverse, Staff, Vector2};

/// The encoded form of one staff.
///
/// `situations[i]` is the state before placing `graphemes[i]`, `intents[i]`
/// declares it and `actions[i]` performs it. All four sequences have the
/// same length.
#[derive(Clone, Debug, Serialize)]
pub struct StaffEncoding<'u> {
    pub staff: ObjectId,
    pub situations: Vec<Situation>,
    pub intents: Vec<Intent>,
    pub actions: Vec<Action>,
    pub graphemes: Vec<Grapheme<'u>>,
    /// Situation after the last placement.
    #[serde(skip)]
    final_situation: Situation,
}

impl<'u> StaffEncoding<'u> {
    /// Number of placement steps.
    pub fn len(&self) -> usize {
        self.graphemes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.graphemes.is_empty()
    }

    /// The state after every grapheme has been placed.
    pub fn final_situation(&self) -> &Situation {
        &self.final_situation
    }

    /// Absolute staff positions reached by chaining the jumps from the origin.
    ///
    /// Renderers map these back onto the page with
    /// [`StaffFrame::to_pixel_coords`].
    pub fn replay(&self) -> Vec<Vector2<Staff>> {
        self.actions
            .iter()
            .scan(Vector2::zero(), |position, action| {
                *position = *position + action.position_jump;
                Some(*position)
            })
            .collect()
    }
}

/// Encodes one staff into parallel situation, intent and action sequences.
///
/// # Errors
/// Fails if the staff box is degenerate, a link cannot be resolved, or a
/// category is missing from its grapheme table.
pub fn encode_staff<'u>(
    staff: &'u AnnotatedObject,
    universe: &'u ObjectUniverse,
) -> Result<StaffEncoding<'u>, StaffSeqError> {
    let frame = StaffFrame::from_staff(staff)?;
    let graphemes = linearize_staff(staff, universe)?;

    let mut situations = Vec::with_capacity(graphemes.len());
    let mut intents = Vec::with_capacity(graphemes.len());
    let mut actions = Vec::with_capacity(graphemes.len());

    let final_situation = graphemes
        .iter()
        .fold(Situation::initial(), |situation, grapheme| {
            let (intent, action, next) = step(&frame, &situation, grapheme);
            situations.push(situation);
            intents.push(intent);
            actions.push(action);
            next
        });

    log::debug!(
        "staff {}: encoded {} grapheme(s)",
        staff.id,
        graphemes.len()
    );

    Ok(StaffEncoding {
        staff: staff.id,
        situations,
        intents,
        actions,
        graphemes,
        final_situation,
    })
}

/// Encodes the staff with the given ID.
pub fn encode_staff_by_id(
    staff: ObjectId,
    universe: &ObjectUniverse,
) -> Result<StaffEncoding<'_>, StaffSeqError> {
    let staff = universe
        .get(staff)
        .filter(|object| object.is_staff())
        .ok_or(StaffSeqError::StaffNotFound(staff))?;
    encode_staff(staff, universe)
}

fn step(
    frame: &StaffFrame,
    situation: &Situation,
    grapheme: &Grapheme<'_>,
) -> (Intent, Action, Situation) {
    // Only the first anchor is targeted.
    let anchor_type = grapheme.first_anchor();
    let intent = Intent {
        grapheme: grapheme.grapheme_type(),
        anchor_type,
    };

    let source = grapheme.source();
    let target = frame.to_staff_coords(source.bbox.center());
    let action = Action {
        position_jump: target - situation.position_in_measure,
    };

    // Position is not reset at barlines.
    let next = Situation {
        position_in_measure: target,
        position_from_last_notehead: None,
        this_grapheme: Some(grapheme.grapheme_type()),
        this_anchor_type: Some(anchor_type),
        this_grapheme_width: frame.to_staff_size(source.bbox.width()),
    };

    (intent, action, next)
}
