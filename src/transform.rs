use crate::error::InterpolationError;
use nalgebra::{DMatrix, Matrix3, Matrix4, SMatrix, Vector3};

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

pub type Matrix3x4 = SMatrix<f64, 3, 4>;

/// Storage convention of a [`RigidTransform`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum Shape {
    Affine3x4,
    Homogeneous4x4,
}

/// A rotation and translation stored either as a 3x4 block `[R | T]` or as a 4x4
/// homogeneous matrix `[[R, T], [0, 0, 0, w]]`.
///
/// The weight `w` of a homogeneous transform may differ from one; see
/// [`RigidTransform::normalized`]. Orthonormality of `R` is not checked.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum RigidTransform {
    Affine3x4(Matrix3x4),
    Homogeneous4x4(Matrix4<f64>),
}

impl RigidTransform {
    pub fn identity(shape: Shape) -> Self {
        Self::from_parts(shape, &Matrix3::identity(), &Vector3::zeros())
    }

    /// Assemble a unit-homogeneous transform from a rotation and a translation.
    pub fn from_parts(shape: Shape, rotation: &Matrix3<f64>, translation: &Vector3<f64>) -> Self {
        match shape {
            Shape::Affine3x4 => {
                let mut m = Matrix3x4::zeros();
                m.fixed_view_mut::<3, 3>(0, 0).copy_from(rotation);
                m.fixed_view_mut::<3, 1>(0, 3).copy_from(translation);
                RigidTransform::Affine3x4(m)
            }
            Shape::Homogeneous4x4 => {
                let mut m = Matrix4::<f64>::zeros();
                m[(3, 3)] = 1.0;
                m.fixed_view_mut::<3, 3>(0, 0).copy_from(rotation);
                m.fixed_view_mut::<3, 1>(0, 3).copy_from(translation);
                RigidTransform::Homogeneous4x4(m)
            }
        }
    }

    /// Build a transform from `rows * cols` entries given in row-major order.
    pub fn from_row_slice(
        rows: usize,
        cols: usize,
        data: &[f64],
    ) -> Result<Self, InterpolationError> {
        match (rows, cols) {
            (3, 4) if data.len() == 12 => Ok(RigidTransform::Affine3x4(
                Matrix3x4::from_row_slice(data),
            )),
            (4, 4) if data.len() == 16 => Ok(RigidTransform::Homogeneous4x4(
                Matrix4::from_row_slice(data),
            )),
            _ => Err(InterpolationError::Shape { rows, cols }),
        }
    }

    pub fn shape(&self) -> Shape {
        match self {
            RigidTransform::Affine3x4(_) => Shape::Affine3x4,
            RigidTransform::Homogeneous4x4(_) => Shape::Homogeneous4x4,
        }
    }

    /// Bottom-right entry of a 4x4 transform, `1.0` for a 3x4 block.
    pub fn homogeneous_scale(&self) -> f64 {
        match self {
            RigidTransform::Affine3x4(_) => 1.0,
            RigidTransform::Homogeneous4x4(m) => m[(3, 3)],
        }
    }

    /// Top-left 3x3 block, as stored.
    pub fn rotation(&self) -> Matrix3<f64> {
        match self {
            RigidTransform::Affine3x4(m) => m.fixed_view::<3, 3>(0, 0).into(),
            RigidTransform::Homogeneous4x4(m) => m.fixed_view::<3, 3>(0, 0).into(),
        }
    }

    /// Top-right 3x1 block, as stored.
    pub fn translation(&self) -> Vector3<f64> {
        match self {
            RigidTransform::Affine3x4(m) => m.fixed_view::<3, 1>(0, 3).into(),
            RigidTransform::Homogeneous4x4(m) => m.fixed_view::<3, 1>(0, 3).into(),
        }
    }

    /// Divide every entry of a 4x4 transform by its homogeneous scale.
    ///
    /// 3x4 blocks and 4x4 matrices whose scale is exactly `1.0` are returned
    /// unchanged. A zero or non-finite scale is rejected.
    pub fn normalized(&self) -> Result<Self, InterpolationError> {
        match self {
            RigidTransform::Affine3x4(_) => Ok(*self),
            RigidTransform::Homogeneous4x4(m) => {
                let w = m[(3, 3)];
                if w == 1.0 {
                    return Ok(*self);
                }
                if w == 0.0 || !w.is_finite() {
                    return Err(InterpolationError::DegenerateHomogeneousScale(w));
                }
                log::debug!("normalizing homogeneous transform with scale {w}");
                Ok(RigidTransform::Homogeneous4x4(m / w))
            }
        }
    }

    /// 4x4 form of the transform. A 3x4 block gets the row `[0, 0, 0, 1]` appended;
    /// a 4x4 matrix is returned as stored.
    pub fn to_homogeneous(&self) -> Matrix4<f64> {
        match self {
            RigidTransform::Affine3x4(m) => {
                let mut h = Matrix4::<f64>::identity();
                h.fixed_view_mut::<3, 4>(0, 0).copy_from(m);
                h
            }
            RigidTransform::Homogeneous4x4(m) => *m,
        }
    }
}

impl From<Matrix3x4> for RigidTransform {
    fn from(m: Matrix3x4) -> Self {
        RigidTransform::Affine3x4(m)
    }
}

impl From<Matrix4<f64>> for RigidTransform {
    fn from(m: Matrix4<f64>) -> Self {
        RigidTransform::Homogeneous4x4(m)
    }
}

impl TryFrom<DMatrix<f64>> for RigidTransform {
    type Error = InterpolationError;

    fn try_from(m: DMatrix<f64>) -> Result<Self, Self::Error> {
        match m.shape() {
            (3, 4) => Ok(RigidTransform::Affine3x4(m.fixed_view::<3, 4>(0, 0).into())),
            (4, 4) => Ok(RigidTransform::Homogeneous4x4(
                m.fixed_view::<4, 4>(0, 0).into(),
            )),
            (rows, cols) => Err(InterpolationError::Shape { rows, cols }),
        }
    }
}
