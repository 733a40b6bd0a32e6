use std::fmt;
use std::ops::{Add, Div, Mul, Neg, Sub};

use crate::{common::equal, Point, Tuple};

/// A displacement in 3D space.
#[derive(Debug, Clone, Copy, Default)]
pub struct Vector {
    tuple: Tuple<3>,
}

impl Vector {
    pub fn new(x: f64, y: f64, z: f64) -> Self {
        Self {
            tuple: Tuple::new([x, y, z]),
        }
    }

    pub fn zero() -> Self {
        Self::default()
    }

    /// The vector pointing from origin to target.
    pub fn from_points(origin: Point, target: Point) -> Self {
        target - origin
    }

    pub fn x(&self) -> f64 {
        self.tuple.x()
    }

    pub fn y(&self) -> f64 {
        self.tuple.y()
    }

    pub fn z(&self) -> f64 {
        self.tuple.z()
    }

    pub fn as_tuple(&self) -> Tuple<3> {
        self.tuple
    }

    pub fn magnitude(&self) -> f64 {
        self.dot(self).sqrt()
    }

    /// Scales the vector to unit length.
    /// The zero vector has no direction, and normalizing it yields NaN components.
    pub fn normalize(&self) -> Self {
        *self / self.magnitude()
    }

    pub fn dot(&self, other: &Self) -> f64 {
        self.x() * other.x() + self.y() * other.y() + self.z() * other.z()
    }

    pub fn cross(&self, other: &Self) -> Self {
        Self::new(
            self.y() * other.z() - self.z() * other.y(),
            self.z() * other.x() - self.x() * other.z(),
            self.x() * other.y() - self.y() * other.x(),
        )
    }

    /// Reflects the vector around the given normal.
    pub fn reflect(&self, normal: &Self) -> Self {
        *self - *normal * 2. * self.dot(normal)
    }
}

impl From<Tuple<3>> for Vector {
    fn from(tuple: Tuple<3>) -> Self {
        Self { tuple }
    }
}

impl PartialEq for Vector {
    fn eq(&self, other: &Self) -> bool {
        equal(self.x(), other.x()) && equal(self.y(), other.y()) && equal(self.z(), other.z())
    }
}

impl fmt::Display for Vector {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(&self.tuple, f)
    }
}

impl Add for Vector {
    type Output = Self;

    fn add(self, other: Self) -> Self {
        Self::from(self.tuple + other.tuple)
    }
}

impl Sub for Vector {
    type Output = Self;

    fn sub(self, other: Self) -> Self {
        Self::from(self.tuple - other.tuple)
    }
}

impl Neg for Vector {
    type Output = Self;

    fn neg(self) -> Self {
        Self::from(-self.tuple)
    }
}

impl Mul<f64> for Vector {
    type Output = Self;

    fn mul(self, rhs: f64) -> Self::Output {
        Self::from(self.tuple * rhs)
    }
}

impl Div<f64> for Vector {
    type Output = Self;

    fn div(self, rhs: f64) -> Self::Output {
        Self::from(self.tuple / rhs)
    }
}

#[cfg(test)]
mod tests {

    use super::*;

    #[test]
    fn two_vectors_equal() {
        let a = Vector::new(1.0, 2.0, -3.0);
        let b = Vector::new(1.0, 2.0, -3.0);
        assert_eq!(a, b);
        assert_ne!(a, Vector::new(1.0, 2.0, 3.0));
    }

    #[test]
    fn vector_sub() {
        let v1 = Vector::new(3.0, 2.0, 1.0);
        let v2 = Vector::new(5.0, 6.0, 7.0);
        assert_eq!(v1 - v2, Vector::new(-2.0, -4.0, -6.0));
    }

    #[test]
    fn subtract_from_zero_vector_negates_vector() {
        let v = Vector::new(1.0, -2.0, 3.0);
        assert_eq!(Vector::zero() - v, Vector::new(-1.0, 2.0, -3.0));
        assert_eq!(-v, Vector::new(-1.0, 2.0, -3.0));
    }

    #[test]
    fn vector_from_points() {
        let origin = Point::new(3.0, 2.0, 1.0);
        let target = Point::new(5.0, 6.0, 7.0);
        assert_eq!(
            Vector::from_points(origin, target),
            Vector::new(2.0, 4.0, 6.0)
        );
    }

    #[test]
    fn unit_vector_magnitude() {
        assert_eq!(Vector::new(1.0, 0.0, 0.0).magnitude(), 1.0);
        assert_eq!(Vector::new(0.0, 1.0, 0.0).magnitude(), 1.0);
        assert_eq!(Vector::new(0.0, 0.0, 1.0).magnitude(), 1.0);
    }

    #[test]
    fn non_unit_vector_magnitude() {
        let v = Vector::new(1.0, 2.0, 3.0);
        assert!(equal(v.magnitude(), 14.0_f64.sqrt()));

        let v = Vector::new(-1.0, -2.0, -3.0);
        assert!(equal(v.magnitude(), 14.0_f64.sqrt()));
    }

    #[test]
    fn normalize_vector() {
        let v = Vector::new(4.0, 0.0, 0.0);
        assert_eq!(v.normalize(), Vector::new(1.0, 0.0, 0.0));

        let v = Vector::new(1.0, 2.0, 3.0);
        assert_eq!(v.normalize(), Vector::new(0.26726, 0.53452, 0.80178));
    }

    #[test]
    fn normalized_vectors_have_unit_magnitude() {
        let vectors = [
            Vector::new(1.0, 2.0, 3.0),
            Vector::new(-0.001, 0.0, 0.002),
            Vector::new(1e6, -2e6, 3.5e5),
        ];
        for v in vectors {
            assert!(equal(v.normalize().magnitude(), 1.0));
        }
    }

    #[test]
    fn normalizing_zero_vector_is_undefined() {
        let normalized = Vector::zero().normalize();
        assert!(normalized.x().is_nan());
    }

    #[test]
    fn dot_product() {
        let a = Vector::new(1.0, 2.0, 3.0);
        let b = Vector::new(2.0, 3.0, 4.0);
        assert_eq!(a.dot(&b), 20.0);
    }

    #[test]
    fn cross_product() {
        let a = Vector::new(1.0, 2.0, 3.0);
        let b = Vector::new(2.0, 3.0, 4.0);
        assert_eq!(a.cross(&b), Vector::new(-1.0, 2.0, -1.0));
        assert_eq!(b.cross(&a), Vector::new(1.0, -2.0, 1.0));
    }

    #[test]
    fn reflecting_vector_approaching_at_45_degrees() {
        let vector = Vector::new(1., -1., 0.);
        let normal = Vector::new(0., 1., 0.);
        assert_eq!(vector.reflect(&normal), Vector::new(1., 1., 0.));
    }

    #[test]
    fn reflecting_vector_off_slanted_surface() {
        let vector = Vector::new(0., -1., 0.);
        let val = 2.0_f64.sqrt() / 2.;
        let normal = Vector::new(val, val, 0.);
        assert_eq!(vector.reflect(&normal), Vector::new(1., 0., 0.));
    }
}
