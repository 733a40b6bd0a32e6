use std::fmt;
use std::ops::{Index, Mul};
use std::str::FromStr;

use crate::{common::equal, error::RayTracerError, Result, Tuple};

/// A dense grid of floats, stored row by row.
///
/// Every operation returns a new matrix; nothing mutates in place.
/// Shape-dependent operations (multiplication, determinant, inverse)
/// return an error instead of producing a meaningless result.
#[derive(Clone, Debug)]
pub struct Matrix {
    rows: usize,
    columns: usize,
    data: Vec<Vec<f64>>,
}

impl Matrix {
    /// Builds a matrix from fixed-width rows.
    /// Panics if there are no rows or the rows are empty.
    pub fn new<const C: usize>(rows: &[[f64; C]]) -> Self {
        assert!(
            !rows.is_empty() && C > 0,
            "A matrix needs at least one row and one column"
        );
        let data = rows.iter().map(|row| row.to_vec()).collect::<Vec<_>>();
        Self {
            rows: data.len(),
            columns: C,
            data,
        }
    }

    /// Builds a matrix from rows of possibly differing length,
    /// failing if they are ragged or empty.
    pub fn from_rows(data: Vec<Vec<f64>>) -> Result<Self> {
        let columns = data.first().map(|row| row.len()).unwrap_or(0);
        if columns == 0 || data.iter().any(|row| row.len() != columns) {
            return Err(RayTracerError::RaggedMatrix);
        }
        Ok(Self {
            rows: data.len(),
            columns,
            data,
        })
    }

    /// A 1xN matrix.
    pub fn row_vector(values: &[f64]) -> Result<Self> {
        Self::from_rows(vec![values.to_vec()])
    }

    /// An Nx1 matrix.
    pub fn column_vector(values: &[f64]) -> Result<Self> {
        Self::from_rows(values.iter().map(|value| vec![*value]).collect())
    }

    /// Panics if size is 0, as there is no empty matrix.
    pub fn identity(size: usize) -> Self {
        assert!(size > 0, "A matrix needs at least one row and one column");
        let mut matrix = Self::zeros(size, size);
        for i in 0..size {
            matrix.data[i][i] = 1.;
        }
        matrix
    }

    fn zeros(rows: usize, columns: usize) -> Self {
        Self {
            rows,
            columns,
            data: vec![vec![0.; columns]; rows],
        }
    }

    /// (rows, columns)
    pub fn dimensions(&self) -> (usize, usize) {
        (self.rows, self.columns)
    }

    pub fn is_square(&self) -> bool {
        self.rows == self.columns
    }

    /// Panics if row or column are outside the matrix.
    pub fn at(&self, row: usize, column: usize) -> f64 {
        self.data[row][column]
    }

    pub fn row(&self, index: usize) -> &[f64] {
        &self.data[index]
    }

    pub fn column(&self, index: usize) -> Vec<f64> {
        self.data.iter().map(|row| row[index]).collect()
    }

    pub fn rows(&self) -> &[Vec<f64>] {
        &self.data
    }

    pub fn columns(&self) -> Vec<Vec<f64>> {
        (0..self.columns).map(|j| self.column(j)).collect()
    }

    pub fn diagonal(&self) -> Vec<f64> {
        (0..self.rows.min(self.columns))
            .map(|i| self.data[i][i])
            .collect()
    }

    pub fn transpose(&self) -> Self {
        let mut transposed = Matrix::zeros(self.columns, self.rows);

        for (i, row) in self.data.iter().enumerate() {
            for (j, item) in row.iter().enumerate() {
                transposed.data[j][i] = *item;
            }
        }

        transposed
    }

    pub fn multiply(&self, other: &Self) -> Result<Self> {
        if self.columns != other.rows {
            return Err(RayTracerError::DimensionMismatch {
                left: self.dimensions(),
                right: other.dimensions(),
            });
        }

        let mut product = Matrix::zeros(self.rows, other.columns);
        for row in 0..self.rows {
            for column in 0..other.columns {
                product.data[row][column] = (0..self.columns)
                    .map(|k| self.data[row][k] * other.data[k][column])
                    .sum();
            }
        }
        Ok(product)
    }

    /// Multiplies a square NxN matrix by an N-tuple treated as a column.
    pub fn multiply_tuple<const N: usize>(&self, tuple: &Tuple<N>) -> Result<Tuple<N>> {
        if self.rows != N || self.columns != N {
            return Err(RayTracerError::DimensionMismatch {
                left: self.dimensions(),
                right: (N, 1),
            });
        }

        let mut values = [0.; N];
        for (value, row) in values.iter_mut().zip(&self.data) {
            *value = row.iter().zip(tuple.iter()).map(|(a, b)| a * b).sum();
        }
        Ok(Tuple::new(values))
    }

    /// Removes the given row and column.
    /// Panics if either index is outside the matrix, or the matrix is 1xN or Nx1.
    pub fn submatrix(&self, row_index: usize, column_index: usize) -> Self {
        assert!(row_index < self.rows && column_index < self.columns);
        assert!(
            self.rows > 1 && self.columns > 1,
            "A {}x{} matrix has no submatrix",
            self.rows,
            self.columns
        );
        let data = self
            .data
            .iter()
            .enumerate()
            .filter(|(i, _)| *i != row_index)
            .map(|(_, row)| {
                row.iter()
                    .enumerate()
                    .filter(|(j, _)| *j != column_index)
                    .map(|(_, val)| *val)
                    .collect::<Vec<_>>()
            })
            .collect::<Vec<_>>();
        Self {
            rows: self.rows - 1,
            columns: self.columns - 1,
            data,
        }
    }

    fn ensure_square(&self) -> Result<()> {
        if self.rows == 0 || self.columns == 0 {
            Err(RayTracerError::RaggedMatrix)
        } else if self.is_square() {
            Ok(())
        } else {
            Err(RayTracerError::NotSquare {
                rows: self.rows,
                columns: self.columns,
            })
        }
    }

    pub fn determinant(&self) -> Result<f64> {
        self.ensure_square()?;
        Ok(self.square_determinant())
    }

    fn square_determinant(&self) -> f64 {
        match self.rows {
            1 => self.data[0][0],
            2 => {
                let a = self.data[0][0];
                let b = self.data[0][1];
                let c = self.data[1][0];
                let d = self.data[1][1];
                a * d - b * c
            }
            _ => self.data[0]
                .iter()
                .enumerate()
                .map(|(j, val)| val * self.square_cofactor(0, j))
                .sum(),
        }
    }

    pub fn minor(&self, row_index: usize, column_index: usize) -> Result<f64> {
        self.ensure_square()?;
        Ok(self.square_minor(row_index, column_index))
    }

    pub fn cofactor(&self, row_index: usize, column_index: usize) -> Result<f64> {
        self.ensure_square()?;
        Ok(self.square_cofactor(row_index, column_index))
    }

    /// Panics if either index is outside the matrix.
    fn square_minor(&self, row_index: usize, column_index: usize) -> f64 {
        if self.rows == 1 {
            assert!(row_index == 0 && column_index == 0);
            // removing the only row and column leaves the empty matrix, whose determinant is 1
            return 1.;
        }
        self.submatrix(row_index, column_index).square_determinant()
    }

    fn square_cofactor(&self, row_index: usize, column_index: usize) -> f64 {
        let minor = self.square_minor(row_index, column_index);
        // if row + column is odd, then we negate the minor
        if (row_index + column_index) % 2 == 0 {
            minor
        } else {
            -minor
        }
    }

    pub fn is_invertible(&self) -> bool {
        matches!(self.determinant(), Ok(det) if det != 0.)
    }

    /// The transposed cofactor matrix divided by the determinant.
    pub fn inverse(&self) -> Result<Self> {
        let det = self.determinant()?;
        if det == 0. {
            return Err(RayTracerError::NonInvertible);
        }

        let mut inverse = Matrix::zeros(self.rows, self.columns);
        for row in 0..self.rows {
            for column in 0..self.columns {
                // writing to [column][row] transposes as we go
                inverse.data[column][row] = self.square_cofactor(row, column) / det;
            }
        }

        Ok(inverse)
    }
}

impl Index<usize> for Matrix {
    type Output = [f64];

    fn index(&self, index: usize) -> &Self::Output {
        &self.data[index]
    }
}

impl PartialEq for Matrix {
    fn eq(&self, other: &Self) -> bool {
        self.dimensions() == other.dimensions()
            && self
                .data
                .iter()
                .flatten()
                .zip(other.data.iter().flatten())
                .all(|(a, b)| equal(*a, *b))
    }
}

impl Mul for &Matrix {
    type Output = Matrix;

    /// Panics if the dimensions are incompatible.
    /// Use Matrix::multiply for a checked product.
    fn mul(self, other: Self) -> Matrix {
        match self.multiply(other) {
            Ok(product) => product,
            Err(err) => panic!("{err}"),
        }
    }
}

impl FromStr for Matrix {
    type Err = RayTracerError;

    /// Parses rows separated by newlines, with values separated by whitespace.
    fn from_str(s: &str) -> Result<Self> {
        let data = s
            .lines()
            .map(str::trim)
            .filter(|line| !line.is_empty())
            .map(|line| {
                line.split_whitespace()
                    .map(|token| {
                        token
                            .parse::<f64>()
                            .map_err(|_| RayTracerError::MatrixParse(token.to_string()))
                    })
                    .collect::<Result<Vec<f64>>>()
            })
            .collect::<Result<Vec<_>>>()?;
        Self::from_rows(data)
    }
}

impl fmt::Display for Matrix {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, row) in self.data.iter().enumerate() {
            if i > 0 {
                writeln!(f)?;
            }
            let row = row.iter().map(|v| v.to_string()).collect::<Vec<_>>();
            write!(f, "{}", row.join(" "))?;
        }
        Ok(())
    }
}
