//! Typed 2D vectors using PhantomData for compile-time safety.

use serde::{Deserialize, Serialize};
use std::marker::PhantomData;
use std::ops::{Add, Div, Mul, Sub};

/// A 2D vector with a type-level marker for the coordinate space.
///
/// The `TSpace` parameter should be either [`Pixel`](super::Pixel) or
/// [`Staff`](super::Staff), so that page positions and staff-relative
/// positions cannot be accidentally mixed.
#[derive(Clone, Copy, PartialEq)]
pub struct Vector2<TSpace> {
    pub x: f64,
    pub y: f64,
    _space: PhantomData<TSpace>,
}

impl<TSpace> Vector2<TSpace> {
    /// Creates a new vector with the given x and y values.
    #[inline]
    pub fn new(x: f64, y: f64) -> Self {
        Self {
            x,
            y,
            _space: PhantomData,
        }
    }

    /// The zero vector.
    #[inline]
    pub fn zero() -> Self {
        Self::new(0.0, 0.0)
    }

    /// Decomposes the vector into an `(x, y)` pair.
    #[inline]
    pub fn into_tuple(self) -> (f64, f64) {
        (self.x, self.y)
    }

    /// Returns true if both components are finite (not NaN or infinite).
    #[inline]
    pub fn is_finite(&self) -> bool {
        self.x.is_finite() && self.y.is_finite()
    }

    /// Returns true if both components differ by at most `eps`.
    pub fn approx_eq(&self, other: &Self, eps: f64) -> bool {
        (self.x - other.x).abs() <= eps && (self.y - other.y).abs() <= eps
    }
}

impl<TSpace> Add for Vector2<TSpace> {
    type Output = Self;

    #[inline]
    fn add(self, rhs: Self) -> Self {
        Self::new(self.x + rhs.x, self.y + rhs.y)
    }
}

impl<TSpace> Sub for Vector2<TSpace> {
    type Output = Self;

    #[inline]
    fn sub(self, rhs: Self) -> Self {
        Self::new(self.x - rhs.x, self.y - rhs.y)
    }
}

impl<TSpace> Mul<f64> for Vector2<TSpace> {
    type Output = Self;

    #[inline]
    fn mul(self, factor: f64) -> Self {
        Self::new(self.x * factor, self.y * factor)
    }
}

impl<TSpace> Div<f64> for Vector2<TSpace> {
    type Output = Self;

    #[inline]
    fn div(self, divisor: f64) -> Self {
        Self::new(self.x / divisor, self.y / divisor)
    }
}

/// Iterates the components in `x`, `y` order.
impl<TSpace> IntoIterator for Vector2<TSpace> {
    type Item = f64;
    type IntoIter = std::array::IntoIter<f64, 2>;

    fn into_iter(self) -> Self::IntoIter {
        [self.x, self.y].into_iter()
    }
}

impl<TSpace> From<Vector2<TSpace>> for (f64, f64) {
    fn from(v: Vector2<TSpace>) -> Self {
        v.into_tuple()
    }
}

impl<TSpace> std::fmt::Debug for Vector2<TSpace> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Vector2")
            .field("x", &self.x)
            .field("y", &self.y)
            .finish()
    }
}

impl<TSpace> Default for Vector2<TSpace> {
    fn default() -> Self {
        Self::zero()
    }
}

// Custom serde implementation to avoid TSpace: Serialize/Deserialize bounds
impl<TSpace> Serialize for Vector2<TSpace> {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        use serde::ser::SerializeStruct;
        let mut state = serializer.serialize_struct("Vector2", 2)?;
        state.serialize_field("x", &self.x)?;
        state.serialize_field("y", &self.y)?;
        state.end()
    }
}

impl<'de, TSpace> Deserialize<'de> for Vector2<TSpace> {
    fn deserialize<D: serde::Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        #[derive(Deserialize)]
        struct VectorData {
            x: f64,
            y: f64,
        }
        let data = VectorData::deserialize(deserializer)?;
        Ok(Vector2::new(data.x, data.y))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ir::{Pixel, Staff};

    #[test]
    fn test_vector_arithmetic() {
        let a: Vector2<Pixel> = Vector2::new(10.0, 20.0);
        let b: Vector2<Pixel> = Vector2::new(1.5, -2.0);

        assert_eq!(a + b, Vector2::new(11.5, 18.0));
        assert_eq!(a - b, Vector2::new(8.5, 22.0));
        assert_eq!(a * 0.5, Vector2::new(5.0, 10.0));
        assert_eq!(a / 4.0, Vector2::new(2.5, 5.0));
    }

    #[test]
    fn test_vector_decomposition_order() {
        let v: Vector2<Staff> = Vector2::new(3.0, 4.0);
        let (x, y) = v.into_tuple();
        assert_eq!((x, y), (3.0, 4.0));

        let components: Vec<f64> = v.into_iter().collect();
        assert_eq!(components, vec![3.0, 4.0]);
    }

    #[test]
    fn test_vector_is_finite() {
        let finite: Vector2<Pixel> = Vector2::new(10.0, 20.0);
        assert!(finite.is_finite());

        let nan: Vector2<Pixel> = Vector2::new(f64::NAN, 20.0);
        assert!(!nan.is_finite());

        let inf: Vector2<Pixel> = Vector2::new(10.0, f64::INFINITY);
        assert!(!inf.is_finite());
    }

    #[test]
    fn test_vector_serializes_as_xy_object() {
        let v: Vector2<Staff> = Vector2::new(0.25, -1.0);
        let json = serde_json::to_string(&v).expect("serialize vector");
        assert_eq!(json, r#"{"x":0.25,"y":-1.0}"#);
    }
}
