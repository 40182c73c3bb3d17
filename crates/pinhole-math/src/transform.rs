//! Affine transform with a cached inverse.

use std::fmt;

use crate::error::TransformError;
use crate::{invert, Matrix4, MatrixN, Point3, Ray, Vec3, Vec4, EPSILON};

/// Which of the two cached matrices to apply.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    /// Local (canonical) space to world space.
    Forward,
    /// World space to local (canonical) space.
    Backward,
}

/// A forward (local to world) matrix and its inverse.
///
/// Both matrices are always set together, and every constructor either
/// computes `backward` from `forward` or checks it against `forward`.
#[derive(Debug, Clone, PartialEq)]
pub struct AffineTransform {
    forward: Matrix4,
    backward: Matrix4,
}

impl AffineTransform {
    /// Identity transform.
    pub fn identity() -> Self {
        Self {
            forward: Matrix4::identity(),
            backward: Matrix4::identity(),
        }
    }

    /// Build a transform from translation, XYZ rotation (radians) and scale.
    pub fn from_components(
        translation: Vec3,
        rotation: Vec3,
        scale: Vec3,
    ) -> Result<Self, TransformError> {
        let mut t = Self::identity();
        t.configure(translation, rotation, scale)?;
        Ok(t)
    }

    /// Build from an explicit forward matrix, computing its inverse.
    pub fn from_forward(forward: Matrix4) -> Result<Self, TransformError> {
        let backward = invert(&forward).map_err(TransformError::InvalidTransform)?;
        Ok(Self { forward, backward })
    }

    /// Build from runtime-shaped forward/backward matrices.
    ///
    /// Both must be 4x4, and `forward * backward` must be the identity
    /// within [`EPSILON`].
    pub fn from_matrices(forward: &MatrixN, backward: &MatrixN) -> Result<Self, TransformError> {
        let forward = forward.to_matrix4()?;
        let backward = backward.to_matrix4()?;
        let deviation = (forward * backward - Matrix4::identity()).amax();
        if !deviation.is_finite() || deviation > EPSILON {
            return Err(TransformError::NotInverse { deviation });
        }
        Ok(Self { forward, backward })
    }

    /// Recompute both matrices as `T * S * Rx * Ry * Rz`.
    ///
    /// On error the transform is left unchanged.
    pub fn configure(
        &mut self,
        translation: Vec3,
        rotation: Vec3,
        scale: Vec3,
    ) -> Result<(), TransformError> {
        let forward = translation_matrix(&translation)
            * scale_matrix(&scale)
            * rotation_x(rotation.x)
            * rotation_y(rotation.y)
            * rotation_z(rotation.z);
        *self = Self::from_forward(forward)?;
        Ok(())
    }

    /// The local to world matrix.
    pub fn forward(&self) -> &Matrix4 {
        &self.forward
    }

    /// The world to local matrix.
    pub fn backward(&self) -> &Matrix4 {
        &self.backward
    }

    /// The matrix selected by `direction`.
    pub fn matrix(&self, direction: Direction) -> &Matrix4 {
        match direction {
            Direction::Forward => &self.forward,
            Direction::Backward => &self.backward,
        }
    }

    /// Transform a point (w = 1).
    pub fn apply_point(&self, p: &Point3, direction: Direction) -> Point3 {
        let v = self.matrix(direction) * Vec4::new(p.x, p.y, p.z, 1.0);
        Point3::new(v.x, v.y, v.z)
    }

    /// Transform both ray endpoints.
    ///
    /// The resulting direction generally has a different length.
    pub fn apply_ray(&self, ray: &Ray, direction: Direction) -> Ray {
        Ray::new(
            self.apply_point(&ray.origin, direction),
            self.apply_point(&ray.target, direction),
        )
    }

    /// Transform a vector through rotation and scale only.
    ///
    /// Equivalent to mapping the point `v` and subtracting the mapped origin.
    pub fn apply_vector(&self, v: &Vec3, direction: Direction) -> Vec3 {
        self.apply_point(&Point3::from(*v), direction)
            - self.apply_point(&Point3::origin(), direction)
    }

    /// Chain two transforms: the result applies `b` first, then `a`.
    pub fn compose(a: &Self, b: &Self) -> Result<Self, TransformError> {
        Self::from_forward(a.forward * b.forward)
    }

    /// Printable form of one of the two matrices.
    ///
    /// `Display` on the transform itself prints the forward matrix.
    pub fn display(&self, direction: Direction) -> MatrixDisplay<'_> {
        MatrixDisplay(self.matrix(direction))
    }
}

/// A 4x4 matrix printed one row per line, three decimals per entry.
#[derive(Debug, Clone, Copy)]
pub struct MatrixDisplay<'a>(&'a Matrix4);

impl fmt::Display for MatrixDisplay<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for r in 0..4 {
            for c in 0..4 {
                if c > 0 {
                    write!(f, " ")?;
                }
                write!(f, "{:.3}", self.0[(r, c)])?;
            }
            writeln!(f)?;
        }
        Ok(())
    }
}

impl Default for AffineTransform {
    fn default() -> Self {
        Self::identity()
    }
}

impl fmt::Display for AffineTransform {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.display(Direction::Forward).fmt(f)
    }
}

fn translation_matrix(t: &Vec3) -> Matrix4 {
    let mut m = Matrix4::identity();
    m[(0, 3)] = t.x;
    m[(1, 3)] = t.y;
    m[(2, 3)] = t.z;
    m
}

fn scale_matrix(s: &Vec3) -> Matrix4 {
    let mut m = Matrix4::identity();
    m[(0, 0)] = s.x;
    m[(1, 1)] = s.y;
    m[(2, 2)] = s.z;
    m
}

fn rotation_x(angle: f64) -> Matrix4 {
    let (s, c) = angle.sin_cos();
    let mut m = Matrix4::identity();
    m[(1, 1)] = c;
    m[(1, 2)] = -s;
    m[(2, 1)] = s;
    m[(2, 2)] = c;
    m
}

fn rotation_y(angle: f64) -> Matrix4 {
    let (s, c) = angle.sin_cos();
    let mut m = Matrix4::identity();
    m[(0, 0)] = c;
    m[(0, 2)] = s;
    m[(2, 0)] = -s;
    m[(2, 2)] = c;
    m
}

fn rotation_z(angle: f64) -> Matrix4 {
    let (s, c) = angle.sin_cos();
    let mut m = Matrix4::identity();
    m[(0, 0)] = c;
    m[(0, 1)] = -s;
    m[(1, 0)] = s;
    m[(1, 1)] = c;
    m
}
