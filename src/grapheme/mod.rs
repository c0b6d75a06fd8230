//! Graphemes: the primitive symbols a score is drawn from.
//!
//! - `vocabulary`: the closed [`GraphemeType`] and [`GraphemeAnchorType`]
//!   enumerations and the [`Grapheme`] placement unit
//! - [`classify`]: category label routing and the fixed lookup tables
//! - [`decompose`]: splitting noteheads and key signatures into graphemes
//! - [`linearize`]: ordering everything attached to one staff

pub mod classify;
pub mod decompose;
pub mod linearize;
mod vocabulary;

pub use classify::{CategoryFamily, GraphemeFamily};
pub use decompose::{decompose_key_signature, decompose_notehead};
pub use linearize::linearize_staff;
pub use vocabulary::{Grapheme, GraphemeAnchorType, GraphemeType};
