//! JSON serialization for object universes.
//!
//! A universe is stored as a plain JSON array of annotated objects. This is
//! handy for hand-written fixtures and for exchanging already-parsed corpus
//! documents without re-reading the XML.

use std::fs::File;
use std::io::{BufReader, BufWriter};
use std::path::Path;

use super::model::ObjectUniverse;
use crate::error::StaffSeqError;

/// Reads a universe from a JSON file.
///
/// # Errors
/// Returns an error if the file cannot be read or parsed.
pub fn read_universe_json(path: &Path) -> Result<ObjectUniverse, StaffSeqError> {
    let file = File::open(path).map_err(StaffSeqError::Io)?;
    let reader = BufReader::new(file);

    serde_json::from_reader(reader).map_err(|source| StaffSeqError::UniverseJsonParse {
        path: path.to_path_buf(),
        source,
    })
}

/// Writes a universe to a JSON file.
///
/// # Errors
/// Returns an error if the file cannot be written.
pub fn write_universe_json(path: &Path, universe: &ObjectUniverse) -> Result<(), StaffSeqError> {
    let file = File::create(path).map_err(StaffSeqError::Io)?;
    let writer = BufWriter::new(file);

    serde_json::to_writer_pretty(writer, universe).map_err(|source| {
        StaffSeqError::UniverseJsonWrite {
            path: path.to_path_buf(),
            source,
        }
    })
}

/// Reads a universe from a JSON string.
pub fn from_json_str(json: &str) -> Result<ObjectUniverse, serde_json::Error> {
    serde_json::from_str(json)
}

/// Writes a universe to a JSON string.
pub fn to_json_string(universe: &ObjectUniverse) -> Result<String, serde_json::Error> {
    serde_json::to_string_pretty(universe)
}
