//! Encoding linearized staves as placement sequences.
//!
//! - [`normalize`]: the staff-relative [`StaffFrame`]
//! - [`model`]: [`Situation`], [`Intent`] and [`Action`]
//! - [`encode`]: the per-staff encoder
//! - [`batch`]: encoding every staff of a universe with a failure policy
//! - [`features`]: fixed-width numeric rows for sequence models

pub mod batch;
pub mod encode;
pub mod features;
mod model;
pub mod normalize;
mod report;

pub use batch::{encode_universe, EncodeOptions, StaffErrorPolicy, UniverseEncoding};
pub use encode::{encode_staff, encode_staff_by_id, StaffEncoding};
pub use model::{Action, Intent, Situation};
pub use normalize::StaffFrame;
pub use report::{EncodeReport, StaffFailure};
