//! 2D vector type used by all physics code.
//!
//! `NVec2` is nalgebra's `Vector2<f64>`, so addition, subtraction, scaling and
//! `magnitude`/`magnitude_squared` come from nalgebra directly. [`VectorExt`]
//! adds the operations that must not produce NaN on degenerate input.

use nalgebra::Vector2;

pub type NVec2 = Vector2<f64>;

/// Degenerate-safe helpers on top of nalgebra's vector arithmetic
pub trait VectorExt: Sized {
    /// Divide by `scalar`, returning the zero vector when `scalar == 0.0`
    fn divide(&self, scalar: f64) -> Self;

    /// Unit vector in the same direction, or the zero vector when the
    /// magnitude is zero (coincident points)
    fn normalize_or_zero(&self) -> Self;

    fn distance_to(&self, other: &Self) -> f64;

    fn distance_squared_to(&self, other: &Self) -> f64;

    fn to_tuple(&self) -> (f64, f64);
}

impl VectorExt for NVec2 {
    fn divide(&self, scalar: f64) -> Self {
        if scalar == 0.0 {
            return NVec2::zeros();
        }
        self / scalar
    }

    fn normalize_or_zero(&self) -> Self {
        let mag = self.magnitude();
        if mag == 0.0 {
            return NVec2::zeros();
        }
        self / mag
    }

    fn distance_to(&self, other: &Self) -> f64 {
        (self - other).magnitude()
    }

    fn distance_squared_to(&self, other: &Self) -> f64 {
        (self - other).magnitude_squared()
    }

    fn to_tuple(&self) -> (f64, f64) {
        (self.x, self.y)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn arithmetic_matches_components() {
        let a = NVec2::new(1.0, 2.0);
        let b = NVec2::new(3.0, -4.0);

        assert_eq!(a + b, NVec2::new(4.0, -2.0));
        assert_eq!(b - a, NVec2::new(2.0, -6.0));
        assert_eq!(a * 2.0, NVec2::new(2.0, 4.0));
        assert_eq!(b.magnitude_squared(), 25.0);
        assert_relative_eq!(b.magnitude(), 5.0);
        assert_relative_eq!(a.distance_to(&b), 40.0_f64.sqrt());
        assert_relative_eq!(a.distance_squared_to(&b), 40.0);
        assert_eq!(a.to_tuple(), (1.0, 2.0));
    }

    #[test]
    fn divide_by_zero_is_zero_vector() {
        let a = NVec2::new(3.0, 6.0);
        assert_eq!(a.divide(3.0), NVec2::new(1.0, 2.0));
        assert_eq!(a.divide(0.0), NVec2::zeros());
    }

    #[test]
    fn normalize_zero_vector_is_zero() {
        assert_eq!(NVec2::zeros().normalize_or_zero(), NVec2::zeros());

        let n = NVec2::new(0.0, -7.0).normalize_or_zero();
        assert_relative_eq!(n.magnitude(), 1.0);
        assert_relative_eq!(n.y, -1.0);
    }
}
