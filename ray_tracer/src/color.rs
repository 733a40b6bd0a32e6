use std::ops::{Add, Mul, Sub};

use crate::{equal, Tuple};

/// An RGB color with unbounded float channels.
/// Values outside of [0, 1] are only clamped when the canvas is exported.
#[derive(Debug, Default, Clone, Copy)]
pub struct Color {
    tuple: Tuple<3>,
}

impl Color {
    pub fn new(red: f64, green: f64, blue: f64) -> Self {
        Self {
            tuple: Tuple::new([red, green, blue]),
        }
    }

    pub fn white() -> Self {
        Self::new(1., 1., 1.)
    }

    /// Alias for Color::default().
    pub fn black() -> Self {
        Self::default()
    }

    pub fn from_rgb(red: u8, green: u8, blue: u8) -> Self {
        Self::new(
            red as f64 / 255.,
            green as f64 / 255.,
            blue as f64 / 255.,
        )
    }

    pub fn red(&self) -> f64 {
        self.tuple.x()
    }

    pub fn green(&self) -> f64 {
        self.tuple.y()
    }

    pub fn blue(&self) -> f64 {
        self.tuple.z()
    }

    /// Component-wise product, used to filter one color through another.
    pub fn hadamard(&self, other: &Self) -> Self {
        Self::new(
            self.red() * other.red(),
            self.green() * other.green(),
            self.blue() * other.blue(),
        )
    }
}

impl PartialEq for Color {
    fn eq(&self, other: &Self) -> bool {
        equal(self.red(), other.red())
            && equal(self.green(), other.green())
            && equal(self.blue(), other.blue())
    }
}

impl Add for Color {
    type Output = Self;

    fn add(self, other: Self) -> Self {
        Self {
            tuple: self.tuple + other.tuple,
        }
    }
}

impl Sub for Color {
    type Output = Self;

    fn sub(self, other: Self) -> Self {
        Self {
            tuple: self.tuple - other.tuple,
        }
    }
}

impl Mul<f64> for Color {
    type Output = Self;

    fn mul(self, rhs: f64) -> Self::Output {
        Self {
            tuple: self.tuple * rhs,
        }
    }
}

impl Mul<Self> for Color {
    type Output = Self;

    fn mul(self, other: Self) -> Self {
        self.hadamard(&other)
    }
}
