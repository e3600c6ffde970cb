use crate::error::InterpolationError;
use crate::transform::RigidTransform;
use crate::{exp_so3, log_so3};
use nalgebra::Vector3;

/// Affine blend `(1 - t) * v0 + t * v1`.
pub fn lerp(v0: &Vector3<f64>, v1: &Vector3<f64>, t: f64) -> Vector3<f64> {
    (1. - t) * v0 + t * v1
}

/// Position of `t` relative to the interval `[t0, t1]`, `0` at `t0` and `1` at `t1`.
pub fn fraction(t0: f64, t1: f64, t: f64) -> Result<f64, InterpolationError> {
    if t1 == t0 {
        return Err(InterpolationError::DegenerateTimeInterval(t0));
    }
    Ok((t - t0) / (t1 - t0))
}

/// Interpolate between the pose `transform1` at `t = 0` and `transform2` at `t = 1`,
/// assuming the body rotates at constant angular velocity.
///
/// Both inputs are first divided through by their homogeneous scale. With
/// `R1`, `R2` the rotation blocks and `T1`, `T2` the translations, the result is
///
/// ```text
/// R_t = exp(t * log(R2 * R1^T)) * R1
/// T_t = (1 - t) * T1 + t * T2
/// ```
///
/// stored in the shape of `transform1`, with a `[0, 0, 0, 1]` bottom row for 4x4
/// output. `t` is not clamped; values outside `[0, 1]` extrapolate.
///
/// ```
/// use nalgebra::Vector3;
/// use pose_interpolation::{exp_so3, interpolate, RigidTransform, Shape};
///
/// let start = RigidTransform::identity(Shape::Homogeneous4x4);
/// let end = RigidTransform::from_parts(
///     Shape::Homogeneous4x4,
///     &exp_so3(&Vector3::new(0., 0., std::f64::consts::FRAC_PI_2)),
///     &Vector3::new(1., 0., 0.),
/// );
///
/// let mid = interpolate(&start, &end, 0.5).unwrap();
/// let expected = exp_so3(&Vector3::new(0., 0., std::f64::consts::FRAC_PI_4));
/// assert!((mid.rotation() - expected).norm() < 1e-12);
/// assert!((mid.translation() - Vector3::new(0.5, 0., 0.)).norm() < 1e-12);
/// ```
pub fn interpolate(
    transform1: &RigidTransform,
    transform2: &RigidTransform,
    t: f64,
) -> Result<RigidTransform, InterpolationError> {
    if !(0. ..=1.).contains(&t) {
        log::debug!("fraction {t} is outside [0, 1], extrapolating");
    }

    let f1 = transform1.normalized()?;
    let f2 = transform2.normalized()?;

    let r1 = f1.rotation();
    let r2 = f2.rotation();
    let rd = log_so3(&(r2 * r1.transpose()));
    let rt = exp_so3(&(t * rd)) * r1;

    let tt = lerp(&f1.translation(), &f2.translation(), t);

    Ok(RigidTransform::from_parts(transform1.shape(), &rt, &tt))
}

/// [`interpolate`] with the reference poses stamped at `t0` and `t1` instead of 0 and 1.
pub fn interpolate_at(
    t0: f64,
    transform0: &RigidTransform,
    t1: f64,
    transform1: &RigidTransform,
    t: f64,
) -> Result<RigidTransform, InterpolationError> {
    let s = fraction(t0, t1, t)?;
    interpolate(transform0, transform1, s)
}
