use std::array;
use std::fmt;
use std::ops::{Add, Div, Index, Mul, Neg, Sub};

/// A fixed-length sequence of floats.
///
/// The length is part of the type, so it can never change after construction.
/// Equality is exact and component-wise; the geometric wrappers built on top
/// of it ([`crate::Vector`], [`crate::Point`]) are the ones that compare within
/// a tolerance.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Tuple<const N: usize> {
    values: [f64; N],
}

impl<const N: usize> Tuple<N> {
    pub fn new(values: [f64; N]) -> Self {
        Self { values }
    }

    /// Alias for Tuple::new.
    pub fn from_array(values: [f64; N]) -> Self {
        Self::new(values)
    }

    /// Returns None if the slice doesn't hold exactly N values.
    pub fn from_slice(values: &[f64]) -> Option<Self> {
        let values: [f64; N] = values.try_into().ok()?;
        Some(Self { values })
    }

    /// Panics if index is outside the tuple.
    pub fn at(&self, index: usize) -> f64 {
        self.values[index]
    }

    pub fn get(&self, index: usize) -> Option<f64> {
        self.values.get(index).copied()
    }

    pub fn to_array(&self) -> [f64; N] {
        self.values
    }

    pub fn iter(&self) -> impl Iterator<Item = &f64> {
        self.values.iter()
    }

    fn zip_with(self, other: Self, f: impl Fn(f64, f64) -> f64) -> Self {
        Self::new(array::from_fn(|i| f(self.values[i], other.values[i])))
    }

    fn map(self, f: impl Fn(f64) -> f64) -> Self {
        Self::new(self.values.map(f))
    }
}

impl Tuple<3> {
    pub fn x(&self) -> f64 {
        self.values[0]
    }

    pub fn y(&self) -> f64 {
        self.values[1]
    }

    pub fn z(&self) -> f64 {
        self.values[2]
    }

    /// Lifts the tuple into homogeneous coordinates with the given trailing w.
    pub fn extend(self, w: f64) -> Tuple<4> {
        let [x, y, z] = self.values;
        Tuple::new([x, y, z, w])
    }
}

impl Tuple<4> {
    /// Drops the homogeneous w component.
    pub fn truncate(self) -> Tuple<3> {
        let [x, y, z, _] = self.values;
        Tuple::new([x, y, z])
    }
}

impl<const N: usize> Default for Tuple<N> {
    fn default() -> Self {
        Self::new([0.; N])
    }
}

impl<const N: usize> From<[f64; N]> for Tuple<N> {
    fn from(values: [f64; N]) -> Self {
        Self::new(values)
    }
}

impl<const N: usize> Index<usize> for Tuple<N> {
    type Output = f64;

    fn index(&self, index: usize) -> &Self::Output {
        &self.values[index]
    }
}

impl<const N: usize> fmt::Display for Tuple<N> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "(")?;
        for (i, value) in self.values.iter().enumerate() {
            if i > 0 {
                write!(f, ", ")?;
            }
            write!(f, "{value}")?;
        }
        write!(f, ")")
    }
}

impl<const N: usize> Add for Tuple<N> {
    type Output = Self;

    fn add(self, other: Self) -> Self {
        self.zip_with(other, |a, b| a + b)
    }
}

impl<const N: usize> Sub for Tuple<N> {
    type Output = Self;

    fn sub(self, other: Self) -> Self {
        self.zip_with(other, |a, b| a - b)
    }
}

impl<const N: usize> Neg for Tuple<N> {
    type Output = Self;

    fn neg(self) -> Self {
        self.map(|a| -a)
    }
}

impl<const N: usize> Mul<f64> for Tuple<N> {
    type Output = Self;

    fn mul(self, rhs: f64) -> Self::Output {
        self.map(|a| a * rhs)
    }
}

impl<const N: usize> Div<f64> for Tuple<N> {
    type Output = Self;

    fn div(self, rhs: f64) -> Self::Output {
        self.map(|a| a / rhs)
    }
}
