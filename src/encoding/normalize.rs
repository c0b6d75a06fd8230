//! Staff-relative coordinate normalization.

use crate::error::StaffSeqError;
use crate::ir::{AnnotatedObject, ObjectId, Pixel, Staff, Vector2};

/// The coordinate frame of one staff.
///
/// The origin is the staff's left edge on its vertical center, and one unit
/// is the staff's height. Encodings expressed in this frame do not depend on
/// scan resolution or on where the staff sits on the page.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct StaffFrame {
    staff: ObjectId,
    origin: Vector2<Pixel>,
    scale: f64,
}

impl StaffFrame {
    /// Builds the frame of a staff object.
    ///
    /// # Errors
    /// Returns [`StaffSeqError::DegenerateStaff`] if the staff height is not a
    /// positive finite number.
    pub fn from_staff(staff: &AnnotatedObject) -> Result<Self, StaffSeqError> {
        let scale = staff.bbox.height();
        if !(scale.is_finite() && scale > 0.0) || !staff.bbox.left.is_finite() {
            return Err(StaffSeqError::DegenerateStaff {
                staff: staff.id,
                height: scale,
            });
        }

        Ok(Self {
            staff: staff.id,
            origin: Vector2::new(staff.bbox.left, staff.bbox.vertical_center()),
            scale,
        })
    }

    /// ID of the staff this frame belongs to.
    pub fn staff(&self) -> ObjectId {
        self.staff
    }

    /// Frame origin in page pixels.
    pub fn origin(&self) -> Vector2<Pixel> {
        self.origin
    }

    /// Pixels per staff unit.
    pub fn scale(&self) -> f64 {
        self.scale
    }

    /// Maps a page position into the staff frame.
    pub fn to_staff_coords(&self, position: Vector2<Pixel>) -> Vector2<Staff> {
        let relative = (position - self.origin) * (1.0 / self.scale);
        Vector2::new(relative.x, relative.y)
    }

    /// Maps a pixel length into staff units.
    pub fn to_staff_size(&self, size: f64) -> f64 {
        size / self.scale
    }

    /// Maps a staff-frame position back onto the page.
    pub fn to_pixel_coords(&self, position: Vector2<Staff>) -> Vector2<Pixel> {
        Vector2::new(position.x, position.y) * self.scale + self.origin
    }

    /// Maps a staff-unit length back into pixels.
    pub fn to_pixel_size(&self, size: f64) -> f64 {
        size * self.scale
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ir::BBox;

    fn staff(bbox: BBox) -> AnnotatedObject {
        AnnotatedObject::new(9u64, "staff", bbox)
    }

    #[test]
    fn origin_and_scale_follow_staff_box() {
        let frame = StaffFrame::from_staff(&staff(BBox::from_ltrb(100.0, 200.0, 900.0, 240.0)))
            .expect("frame");
        assert_eq!(frame.origin(), Vector2::new(100.0, 220.0));
        assert_eq!(frame.scale(), 40.0);
        assert_eq!(frame.staff(), ObjectId(9));
    }

    #[test]
    fn positions_and_sizes_are_divided_by_staff_height() {
        let frame = StaffFrame::from_staff(&staff(BBox::from_ltrb(100.0, 200.0, 900.0, 240.0)))
            .expect("frame");

        let mapped = frame.to_staff_coords(Vector2::new(180.0, 210.0));
        assert!(mapped.approx_eq(&Vector2::new(2.0, -0.25), 1e-12));
        assert_eq!(frame.to_staff_size(10.0), 0.25);
    }

    #[test]
    fn pixel_mapping_inverts_staff_mapping() {
        let frame = StaffFrame::from_staff(&staff(BBox::from_ltrb(13.0, 57.0, 613.0, 94.0)))
            .expect("frame");
        let page: Vector2<Pixel> = Vector2::new(321.5, 80.25);

        let restored = frame.to_pixel_coords(frame.to_staff_coords(page));
        assert!(restored.approx_eq(&page, 1e-9));
        assert!((frame.to_pixel_size(frame.to_staff_size(17.0)) - 17.0).abs() < 1e-9);
    }

    #[test]
    fn zero_height_staff_is_rejected() {
        let err = StaffFrame::from_staff(&staff(BBox::from_ltrb(0.0, 50.0, 100.0, 50.0)))
            .unwrap_err();
        assert!(matches!(
            err,
            StaffSeqError::DegenerateStaff { height, .. } if height == 0.0
        ));
    }

    #[test]
    fn inverted_staff_is_rejected() {
        assert!(StaffFrame::from_staff(&staff(BBox::from_ltrb(0.0, 60.0, 100.0, 50.0))).is_err());
    }
}
