use std::fmt;
use std::ops::{Add, Sub};

use crate::{common::equal, Tuple, Vector};

/// A location in 3D space.
///
/// Points can be moved by vectors, and subtracting two points gives the
/// vector between them. Adding two points is meaningless and not provided.
#[derive(Debug, Clone, Copy, Default)]
pub struct Point {
    tuple: Tuple<3>,
}

impl Point {
    pub fn new(x: f64, y: f64, z: f64) -> Self {
        Self {
            tuple: Tuple::new([x, y, z]),
        }
    }

    pub fn origin() -> Self {
        Self::default()
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

    pub fn translate(&self, vector: Vector) -> Self {
        *self + vector
    }
}

impl From<Tuple<3>> for Point {
    fn from(tuple: Tuple<3>) -> Self {
        Self { tuple }
    }
}

impl PartialEq for Point {
    fn eq(&self, other: &Self) -> bool {
        equal(self.x(), other.x()) && equal(self.y(), other.y()) && equal(self.z(), other.z())
    }
}

impl fmt::Display for Point {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(&self.tuple, f)
    }
}

impl Add<Vector> for Point {
    type Output = Self;

    fn add(self, vector: Vector) -> Self {
        Self::from(self.tuple + vector.as_tuple())
    }
}

impl Sub<Vector> for Point {
    type Output = Self;

    fn sub(self, vector: Vector) -> Self {
        Self::from(self.tuple - vector.as_tuple())
    }
}

impl Sub for Point {
    type Output = Vector;

    fn sub(self, other: Self) -> Vector {
        Vector::from(self.tuple - other.tuple)
    }
}
