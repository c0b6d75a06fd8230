//! Pixel-space bounding boxes of annotated objects.

use serde::{Deserialize, Serialize};

use super::space::Pixel;
use super::vector::Vector2;

/// An axis-aligned bounding box in page pixels (left, top, right, bottom).
///
/// Note: This type does NOT enforce that left <= right or top <= bottom,
/// allowing malformed boxes to exist in the IR. Validation reports them
/// instead of the reader rejecting the whole document.
#[derive(Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct BBox {
    pub left: f64,
    pub top: f64,
    pub right: f64,
    pub bottom: f64,
}

impl BBox {
    /// Creates a bounding box from its four edges.
    #[inline]
    pub fn from_ltrb(left: f64, top: f64, right: f64, bottom: f64) -> Self {
        Self {
            left,
            top,
            right,
            bottom,
        }
    }

    /// Creates a bounding box from the corpus layout: top-left corner plus size.
    #[inline]
    pub fn from_top_left_size(top: f64, left: f64, height: f64, width: f64) -> Self {
        Self::from_ltrb(left, top, left + width, top + height)
    }

    /// Returns the width of the bounding box.
    ///
    /// May be negative if the box is malformed (right < left).
    #[inline]
    pub fn width(&self) -> f64 {
        self.right - self.left
    }

    /// Returns the height of the bounding box.
    ///
    /// May be negative if the box is malformed (bottom < top).
    #[inline]
    pub fn height(&self) -> f64 {
        self.bottom - self.top
    }

    /// Returns the area of the bounding box.
    #[inline]
    pub fn area(&self) -> f64 {
        self.width() * self.height()
    }

    /// Returns the vertical center line of the box.
    #[inline]
    pub fn vertical_center(&self) -> f64 {
        (self.top + self.bottom) / 2.0
    }

    /// Returns the center of the box as an `(x, y)` vector.
    ///
    /// The corpus reports centers in (row, column) order; this is already
    /// swapped into horizontal-first order.
    #[inline]
    pub fn center(&self) -> Vector2<Pixel> {
        Vector2::new((self.left + self.right) / 2.0, self.vertical_center())
    }

    /// Returns the box with every edge multiplied by `factor`.
    pub fn scaled(&self, factor: f64) -> Self {
        Self::from_ltrb(
            self.left * factor,
            self.top * factor,
            self.right * factor,
            self.bottom * factor,
        )
    }

    /// Returns true if all edges are finite (not NaN or infinite).
    #[inline]
    pub fn is_finite(&self) -> bool {
        self.left.is_finite()
            && self.top.is_finite()
            && self.right.is_finite()
            && self.bottom.is_finite()
    }

    /// Returns true if the box is properly ordered on both axes.
    #[inline]
    pub fn is_ordered(&self) -> bool {
        self.left <= self.right && self.top <= self.bottom
    }
}

impl std::fmt::Debug for BBox {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("BBox")
            .field("left", &self.left)
            .field("top", &self.top)
            .field("right", &self.right)
            .field("bottom", &self.bottom)
            .finish()
    }
}

impl Default for BBox {
    fn default() -> Self {
        Self::from_ltrb(0.0, 0.0, 0.0, 0.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_bbox_from_top_left_size() {
        let bbox = BBox::from_top_left_size(20.0, 10.0, 60.0, 90.0);
        assert_eq!(bbox.left, 10.0);
        assert_eq!(bbox.top, 20.0);
        assert_eq!(bbox.right, 100.0);
        assert_eq!(bbox.bottom, 80.0);
    }

    #[test]
    fn test_bbox_dimensions() {
        let bbox = BBox::from_ltrb(10.0, 20.0, 100.0, 80.0);
        assert_eq!(bbox.width(), 90.0);
        assert_eq!(bbox.height(), 60.0);
        assert_eq!(bbox.area(), 5400.0);
    }

    #[test]
    fn test_bbox_center_is_horizontal_first() {
        let bbox = BBox::from_ltrb(10.0, 100.0, 30.0, 140.0);
        let center = bbox.center();
        assert_eq!(center.x, 20.0);
        assert_eq!(center.y, 120.0);
    }

    #[test]
    fn test_bbox_ordering() {
        let ordered = BBox::from_ltrb(10.0, 20.0, 100.0, 80.0);
        assert!(ordered.is_ordered());

        let unordered = BBox::from_ltrb(100.0, 80.0, 10.0, 20.0);
        assert!(!unordered.is_ordered());
    }

    #[test]
    fn test_bbox_scaled() {
        let bbox = BBox::from_ltrb(1.0, 2.0, 3.0, 4.0).scaled(2.5);
        assert_eq!(bbox, BBox::from_ltrb(2.5, 5.0, 7.5, 10.0));
    }
}
