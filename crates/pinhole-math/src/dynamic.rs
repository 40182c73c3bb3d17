//! Dynamically sized vectors and matrices with checked shapes.
//!
//! The renderer works on the fixed-size [`Vec3`]/[`Matrix4`] aliases, where
//! shapes are enforced by the type system. These types cover inputs whose
//! shape is only known at runtime (scene files, user-supplied matrices):
//! every operation that could mix shapes returns a [`MathError::Dimension`]
//! instead of panicking.

use nalgebra::{DMatrix, DVector};

use crate::error::{MathError, Result};
use crate::{Matrix4, Vec3, SINGULAR_EPSILON};

/// A vector of runtime length.
#[derive(Debug, Clone, PartialEq)]
pub struct VectorN(DVector<f64>);

impl VectorN {
    /// Build a vector from its components.
    pub fn new(data: Vec<f64>) -> Self {
        Self(DVector::from_vec(data))
    }

    /// A zero vector of length `len`.
    pub fn zeros(len: usize) -> Self {
        Self(DVector::zeros(len))
    }

    /// Number of components.
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// True if the vector has no components.
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Component `i`.
    pub fn get(&self, i: usize) -> Result<f64> {
        self.0
            .get(i)
            .copied()
            .ok_or_else(|| MathError::dimension(format!("index < {}", self.len()), i))
    }

    /// Set component `i`.
    pub fn set(&mut self, i: usize, value: f64) -> Result<()> {
        let len = self.len();
        let slot = self
            .0
            .get_mut(i)
            .ok_or_else(|| MathError::dimension(format!("index < {len}"), i))?;
        *slot = value;
        Ok(())
    }

    fn check_same_len(&self, other: &Self) -> Result<()> {
        if self.len() != other.len() {
            return Err(MathError::dimension(
                format!("length {}", self.len()),
                format!("length {}", other.len()),
            ));
        }
        Ok(())
    }

    /// Component-wise sum.
    pub fn add(&self, other: &Self) -> Result<Self> {
        self.check_same_len(other)?;
        Ok(Self(&self.0 + &other.0))
    }

    /// Component-wise difference.
    pub fn sub(&self, other: &Self) -> Result<Self> {
        self.check_same_len(other)?;
        Ok(Self(&self.0 - &other.0))
    }

    /// Multiply every component by `s`.
    pub fn scale(&self, s: f64) -> Self {
        Self(&self.0 * s)
    }

    /// Dot product.
    pub fn dot(&self, other: &Self) -> Result<f64> {
        self.check_same_len(other)?;
        Ok(self.0.dot(&other.0))
    }

    /// Cross product; both operands must have length 3.
    pub fn cross(&self, other: &Self) -> Result<Self> {
        let a = self.to_vec3()?;
        let b = other.to_vec3()?;
        Ok(a.cross(&b).into())
    }

    /// Euclidean length.
    pub fn norm(&self) -> f64 {
        self.0.norm()
    }

    /// A unit-length copy of this vector.
    pub fn normalized(&self) -> Result<Self> {
        self.0
            .try_normalize(0.0)
            .map(Self)
            .ok_or(MathError::ZeroLength)
    }

    /// Normalize in place.
    pub fn normalize(&mut self) -> Result<()> {
        *self = self.normalized()?;
        Ok(())
    }

    /// Convert to a fixed-size 3-vector.
    pub fn to_vec3(&self) -> Result<Vec3> {
        if self.len() != 3 {
            return Err(MathError::dimension("length 3", format!("length {}", self.len())));
        }
        Ok(Vec3::new(self.0[0], self.0[1], self.0[2]))
    }

    /// Components as a slice.
    pub fn as_slice(&self) -> &[f64] {
        self.0.as_slice()
    }
}

impl From<Vec3> for VectorN {
    fn from(v: Vec3) -> Self {
        Self::new(vec![v.x, v.y, v.z])
    }
}

/// A matrix of runtime shape.
#[derive(Debug, Clone, PartialEq)]
pub struct MatrixN(DMatrix<f64>);

impl MatrixN {
    /// A zero matrix with the given shape.
    pub fn zeros(rows: usize, cols: usize) -> Self {
        Self(DMatrix::zeros(rows, cols))
    }

    /// The `n`x`n` identity.
    pub fn identity(n: usize) -> Self {
        Self(DMatrix::identity(n, n))
    }

    /// Build from row-major data; `data.len()` must equal `rows * cols`.
    pub fn from_row_slice(rows: usize, cols: usize, data: &[f64]) -> Result<Self> {
        if data.len() != rows * cols {
            return Err(MathError::dimension(
                format!("{} elements", rows * cols),
                format!("{} elements", data.len()),
            ));
        }
        Ok(Self(DMatrix::from_row_slice(rows, cols, data)))
    }

    /// Number of rows.
    pub fn rows(&self) -> usize {
        self.0.nrows()
    }

    /// Number of columns.
    pub fn cols(&self) -> usize {
        self.0.ncols()
    }

    fn shape(&self) -> String {
        format!("{}x{}", self.rows(), self.cols())
    }

    /// Element at `(row, col)`.
    pub fn get(&self, row: usize, col: usize) -> Result<f64> {
        self.0.get((row, col)).copied().ok_or_else(|| {
            MathError::dimension(
                format!("index within {}", self.shape()),
                format!("({row}, {col})"),
            )
        })
    }

    /// Set the element at `(row, col)`.
    pub fn set(&mut self, row: usize, col: usize, value: f64) -> Result<()> {
        let shape = self.shape();
        let slot = self.0.get_mut((row, col)).ok_or_else(|| {
            MathError::dimension(format!("index within {shape}"), format!("({row}, {col})"))
        })?;
        *slot = value;
        Ok(())
    }

    /// Matrix product `self * other`.
    pub fn mul(&self, other: &Self) -> Result<Self> {
        if self.cols() != other.rows() {
            return Err(MathError::dimension(
                format!("{} rows", self.cols()),
                other.shape(),
            ));
        }
        Ok(Self(&self.0 * &other.0))
    }

    /// Matrix-vector product `self * v`.
    pub fn mul_vector(&self, v: &VectorN) -> Result<VectorN> {
        if self.cols() != v.len() {
            return Err(MathError::dimension(
                format!("length {}", self.cols()),
                format!("length {}", v.len()),
            ));
        }
        Ok(VectorN(&self.0 * &v.0))
    }

    /// Chained product `m[0] * m[1] * ... * m[n-1]`, evaluated left to right.
    pub fn product(matrices: &[&MatrixN]) -> Result<Self> {
        let (first, rest) = matrices
            .split_first()
            .ok_or_else(|| MathError::dimension("at least one matrix", "none"))?;
        rest.iter().try_fold((*first).clone(), |acc, m| acc.mul(m))
    }

    /// Inverse by Gauss-Jordan elimination with partial pivoting.
    ///
    /// A pivot counts as zero when it is below [`SINGULAR_EPSILON`] times the
    /// largest entry of the matrix, so uniformly tiny matrices still invert.
    pub fn inverse(&self) -> Result<Self> {
        let n = self.rows();
        if n != self.cols() {
            return Err(MathError::dimension("square matrix", self.shape()));
        }

        let tolerance = SINGULAR_EPSILON * self.0.amax();
        let mut a = self.0.clone();
        let mut inv = DMatrix::<f64>::identity(n, n);
        let mut determinant = 1.0;

        for col in 0..n {
            let pivot_row = (col..n)
                .max_by(|&i, &j| a[(i, col)].abs().total_cmp(&a[(j, col)].abs()))
                .unwrap_or(col);
            let pivot = a[(pivot_row, col)];
            if !pivot.is_finite() || pivot.abs() <= tolerance {
                return Err(MathError::Singular {
                    determinant: determinant * pivot,
                });
            }
            if pivot_row != col {
                a.swap_rows(pivot_row, col);
                inv.swap_rows(pivot_row, col);
                determinant = -determinant;
            }
            determinant *= pivot;

            for j in 0..n {
                a[(col, j)] /= pivot;
                inv[(col, j)] /= pivot;
            }

            for row in 0..n {
                if row == col {
                    continue;
                }
                let factor = a[(row, col)];
                if factor == 0.0 {
                    continue;
                }
                for j in 0..n {
                    a[(row, j)] -= factor * a[(col, j)];
                    inv[(row, j)] -= factor * inv[(col, j)];
                }
            }
        }

        Ok(Self(inv))
    }

    /// Convert to a fixed-size 4x4 matrix.
    pub fn to_matrix4(&self) -> Result<Matrix4> {
        if self.rows() != 4 || self.cols() != 4 {
            return Err(MathError::dimension("4x4", self.shape()));
        }
        Ok(Matrix4::from_fn(|r, c| self.0[(r, c)]))
    }
}

impl From<Matrix4> for MatrixN {
    fn from(m: Matrix4) -> Self {
        Self(DMatrix::from_fn(4, 4, |r, c| m[(r, c)]))
    }
}
