//! Fixed-width numeric feature rows.
//!
//! Enum fields are one-hot encoded over their `ALL` order, with an unset
//! optional enum encoded as all zeros. Optional vectors take three columns:
//! a presence flag followed by x and y.

use std::io::Write;

use super::encode::StaffEncoding;
use super::model::{Action, Intent, Situation};
use crate::error::StaffSeqError;
use crate::grapheme::{GraphemeAnchorType, GraphemeType};
use crate::ir::{Staff, Vector2};

const GRAPHEME_COLUMNS: usize = GraphemeType::ALL.len();
const ANCHOR_COLUMNS: usize = GraphemeAnchorType::ALL.len();

/// Width of a situation row.
pub const SITUATION_FEATURES: usize = 2 + 3 + GRAPHEME_COLUMNS + ANCHOR_COLUMNS + 1;
/// Width of an intent row.
pub const INTENT_FEATURES: usize = GRAPHEME_COLUMNS + ANCHOR_COLUMNS;
/// Width of an action row.
pub const ACTION_FEATURES: usize = 2;

pub fn situation_features(situation: &Situation) -> Vec<f64> {
    let mut row = Vec::with_capacity(SITUATION_FEATURES);
    push_vector(&mut row, situation.position_in_measure);
    push_optional_vector(&mut row, situation.position_from_last_notehead);
    push_one_hot(&mut row, GRAPHEME_COLUMNS, situation.this_grapheme.map(GraphemeType::index));
    push_one_hot(
        &mut row,
        ANCHOR_COLUMNS,
        situation.this_anchor_type.map(GraphemeAnchorType::index),
    );
    row.push(situation.this_grapheme_width);
    row
}

pub fn intent_features(intent: &Intent) -> Vec<f64> {
    let mut row = Vec::with_capacity(INTENT_FEATURES);
    push_one_hot(&mut row, GRAPHEME_COLUMNS, Some(intent.grapheme.index()));
    push_one_hot(&mut row, ANCHOR_COLUMNS, Some(intent.anchor_type.index()));
    row
}

pub fn action_features(action: &Action) -> Vec<f64> {
    let mut row = Vec::with_capacity(ACTION_FEATURES);
    push_vector(&mut row, action.position_jump);
    row
}

/// Column names of a full feature row, matching [`write_feature_csv`].
pub fn feature_header() -> Vec<String> {
    let mut header = vec!["document".to_string(), "staff".to_string(), "step".to_string()];
    header.extend(["situation.x", "situation.y"].map(String::from));
    header.extend(
        ["from_notehead.present", "from_notehead.x", "from_notehead.y"].map(String::from),
    );
    header.extend(
        GraphemeType::ALL
            .iter()
            .map(|g| format!("situation.grapheme.{}", g.as_str())),
    );
    header.extend(
        GraphemeAnchorType::ALL
            .iter()
            .map(|a| format!("situation.anchor.{}", a.as_str())),
    );
    header.push("situation.width".to_string());
    header.extend(
        GraphemeType::ALL
            .iter()
            .map(|g| format!("intent.grapheme.{}", g.as_str())),
    );
    header.extend(
        GraphemeAnchorType::ALL
            .iter()
            .map(|a| format!("intent.anchor.{}", a.as_str())),
    );
    header.extend(["action.dx", "action.dy"].map(String::from));
    header
}

/// Writes one CSV row per placement step of each encoding, with a header.
pub fn write_feature_csv<W: Write>(
    writer: W,
    encodings: &[(&str, &StaffEncoding<'_>)],
) -> Result<(), StaffSeqError> {
    let mut csv_writer = csv::Writer::from_writer(writer);
    csv_writer.write_record(feature_header())?;

    for (document, encoding) in encodings {
        let steps = encoding
            .situations
            .iter()
            .zip(&encoding.intents)
            .zip(&encoding.actions);
        for (step, ((situation, intent), action)) in steps.enumerate() {
            let mut record = vec![
                document.to_string(),
                encoding.staff.to_string(),
                step.to_string(),
            ];
            record.extend(
                situation_features(situation)
                    .into_iter()
                    .chain(intent_features(intent))
                    .chain(action_features(action))
                    .map(|value| value.to_string()),
            );
            csv_writer.write_record(&record)?;
        }
    }

    csv_writer.flush().map_err(StaffSeqError::Io)
}

fn push_vector(row: &mut Vec<f64>, v: Vector2<Staff>) {
    row.extend(v);
}

fn push_optional_vector(row: &mut Vec<f64>, v: Option<Vector2<Staff>>) {
    match v {
        Some(v) => {
            row.push(1.0);
            push_vector(row, v);
        }
        None => row.extend([0.0, 0.0, 0.0]),
    }
}

fn push_one_hot(row: &mut Vec<f64>, width: usize, hot: Option<usize>) {
    row.extend((0..width).map(|i| if Some(i) == hot { 1.0 } else { 0.0 }));
}
