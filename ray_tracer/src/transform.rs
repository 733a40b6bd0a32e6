use std::fmt;

use crate::{error::RayTracerError, Matrix, Point, Result, Tuple, Vector};

/// An affine transformation stored as a 4x4 homogeneous matrix.
///
/// Points are transformed with a trailing w of 1 and vectors with a trailing
/// w of 0, so translations move points and leave vectors unchanged.
#[derive(Clone, Debug, PartialEq)]
pub struct Transform {
    matrix: Matrix,
}

impl Transform {
    fn from_rows(rows: [[f64; 4]; 4]) -> Self {
        Self {
            matrix: Matrix::new(&rows),
        }
    }

    pub fn identity() -> Self {
        Self {
            matrix: Matrix::identity(4),
        }
    }

    /// Fails unless the matrix is 4x4.
    pub fn from_matrix(matrix: Matrix) -> Result<Self> {
        let (rows, columns) = matrix.dimensions();
        if rows != 4 || columns != 4 {
            return Err(RayTracerError::NotHomogeneous { rows, columns });
        }
        Ok(Self { matrix })
    }

    pub fn translation(x: f64, y: f64, z: f64) -> Self {
        Self::from_rows([
            [1., 0., 0., x],
            [0., 1., 0., y],
            [0., 0., 1., z],
            [0., 0., 0., 1.],
        ])
    }

    pub fn scaling(x: f64, y: f64, z: f64) -> Self {
        Self::from_rows([
            [x, 0., 0., 0.],
            [0., y, 0., 0.],
            [0., 0., z, 0.],
            [0., 0., 0., 1.],
        ])
    }

    /// Rotates around the x axis by the given number of radians.
    pub fn rotation_x(radians: f64) -> Self {
        let (sin, cos) = radians.sin_cos();
        Self::from_rows([
            [1., 0., 0., 0.],
            [0., cos, -sin, 0.],
            [0., sin, cos, 0.],
            [0., 0., 0., 1.],
        ])
    }

    pub fn rotation_y(radians: f64) -> Self {
        let (sin, cos) = radians.sin_cos();
        Self::from_rows([
            [cos, 0., sin, 0.],
            [0., 1., 0., 0.],
            [-sin, 0., cos, 0.],
            [0., 0., 0., 1.],
        ])
    }

    pub fn rotation_z(radians: f64) -> Self {
        let (sin, cos) = radians.sin_cos();
        Self::from_rows([
            [cos, -sin, 0., 0.],
            [sin, cos, 0., 0.],
            [0., 0., 1., 0.],
            [0., 0., 0., 1.],
        ])
    }

    /// Each component moves in proportion to the other two,
    /// e.g. `xy` moves x in proportion to y.
    pub fn shearing(xy: f64, xz: f64, yx: f64, yz: f64, zx: f64, zy: f64) -> Self {
        Self::from_rows([
            [1., xy, xz, 0.],
            [yx, 1., yz, 0.],
            [zx, zy, 1., 0.],
            [0., 0., 0., 1.],
        ])
    }

    /// Mirrors across the plane perpendicular to the x axis.
    pub fn reflection_x() -> Self {
        Self::scaling(-1., 1., 1.)
    }

    pub fn reflection_y() -> Self {
        Self::scaling(1., -1., 1.)
    }

    pub fn reflection_z() -> Self {
        Self::scaling(1., 1., -1.)
    }

    /// Point reflection through the origin.
    pub fn reflection_origin() -> Self {
        Self::scaling(-1., -1., -1.)
    }

    pub fn matrix(&self) -> &Matrix {
        &self.matrix
    }

    pub fn inverse(&self) -> Result<Self> {
        Ok(Self {
            matrix: self.matrix.inverse()?,
        })
    }

    /// Composes two transforms so that `self` is applied first and `next` second.
    pub fn then(&self, next: &Transform) -> Self {
        Self {
            matrix: &next.matrix * &self.matrix,
        }
    }

    fn apply(&self, tuple: Tuple<4>) -> Tuple<4> {
        // every constructor guarantees a 4x4 matrix
        self.matrix
            .multiply_tuple(&tuple)
            .unwrap_or_else(|err| unreachable!("{err}"))
    }

    pub fn transform_point(&self, point: &Point) -> Point {
        Point::from(self.apply(point.as_tuple().extend(1.)).truncate())
    }

    pub fn transform_vector(&self, vector: &Vector) -> Vector {
        Vector::from(self.apply(vector.as_tuple().extend(0.)).truncate())
    }
}

impl Default for Transform {
    fn default() -> Self {
        Self::identity()
    }
}

impl fmt::Display for Transform {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(&self.matrix, f)
    }
}

/// Orients the world relative to an eye at `from` looking toward `to`.
///
/// The eye is first moved to the origin, then the scene is rotated so that
/// the eye looks down the negative z axis with `up` roughly along positive y.
pub fn view_transform(from: Point, to: Point, up: Vector) -> Transform {
    let forward = Vector::from_points(from, to).normalize();
    let left = forward.cross(&up.normalize());
    let true_up = left.cross(&forward);
    let orientation = Transform::from_rows([
        [left.x(), left.y(), left.z(), 0.],
        [true_up.x(), true_up.y(), true_up.z(), 0.],
        [-forward.x(), -forward.y(), -forward.z(), 0.],
        [0., 0., 0., 1.],
    ]);
    Transform::translation(-from.x(), -from.y(), -from.z()).then(&orientation)
}
