//! Coordinate space marker types.
//!
//! These are zero-sized types (ZSTs) used as type parameters to distinguish
//! between pixel positions in a scanned page and positions measured in
//! staff-relative units.

use std::fmt;

/// Marker type for pixel coordinates (absolute values).
///
/// Pixel coordinates locate objects on the scanned page, where (0, 0) is
/// the top-left corner and y grows downwards.
#[derive(Clone, Copy, PartialEq, Eq, Hash)]
pub enum Pixel {}

/// Marker type for staff-relative coordinates.
///
/// The origin sits at the staff's left edge on its vertical center, and one
/// unit equals the staff's height. Values are independent of scan resolution.
#[derive(Clone, Copy, PartialEq, Eq, Hash)]
pub enum Staff {}

impl fmt::Debug for Pixel {
    fn fmt(&self, _: &mut fmt::Formatter<'_>) -> fmt::Result {
        match *self {}
    }
}

impl fmt::Debug for Staff {
    fn fmt(&self, _: &mut fmt::Formatter<'_>) -> fmt::Result {
        match *self {}
    }
}
