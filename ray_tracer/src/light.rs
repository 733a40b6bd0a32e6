use crate::{Color, Point};

/// A light source with no size, radiating from a single point.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PointLight {
    pub position: Point,
    pub intensity: Color,
}

impl PointLight {
    pub fn new(position: Point, intensity: Color) -> Self {
        Self {
            position,
            intensity,
        }
    }

    /// A white light at the given position.
    pub fn white_at(position: Point) -> Self {
        Self::new(position, Color::white())
    }
}

impl Default for PointLight {
    fn default() -> Self {
        Self::white_at(Point::origin())
    }
}
