//! Rigid-body pose interpolation under a constant angular velocity assumption.
//!
//! Two poses given as 3x4 `[R | T]` blocks or 4x4 homogeneous matrices are
//! blended by scaling the axis-angle vector of their relative rotation and
//! linearly mixing their translations. See [`interpolate`].

mod error;
mod generator;
mod interpolation;
mod transform;

pub use error::InterpolationError;
pub use generator::PoseGenerator;
pub use interpolation::{fraction, interpolate, interpolate_at, lerp};
pub use transform::{Matrix3x4, RigidTransform, Shape};

use nalgebra::{Matrix3, SMatrix, Vector3};

const EPSILON: f64 = 1e-6;

// Distance from pi below which the rotation axis is read from the symmetric part.
const NEAR_PI: f64 = 1e-3;

pub fn identity<const D: usize>() -> SMatrix<f64, D, D> {
    SMatrix::<f64, D, D>::identity()
}

/// Skew-symmetric matrix `[v]x` such that `[v]x * w == v.cross(w)`.
pub fn wedge_so3(v: &Vector3<f64>) -> Matrix3<f64> {
    #[rustfmt::skip]
    let wedge = Matrix3::<f64>::new(
        0., -v[2], v[1],
        v[2], 0., -v[0],
        -v[1], v[0], 0.
    );
    wedge
}

/// Inverse of [`wedge_so3`]. Reads `m[(2, 1)]`, `m[(0, 2)]` and `m[(1, 0)]`;
/// `m` is assumed skew-symmetric.
pub fn vee_so3(m: &Matrix3<f64>) -> Vector3<f64> {
    Vector3::new(m[(2, 1)], m[(0, 2)], m[(1, 0)])
}

/// Exponential map from an axis-angle vector to a rotation matrix.
pub fn exp_so3(rotvec: &Vector3<f64>) -> Matrix3<f64> {
    let norm = rotvec.norm();

    let identity3 = identity::<3>();
    if norm < EPSILON {
        let wedge = wedge_so3(rotvec);
        return identity3 + wedge + 0.5 * wedge * wedge;
    }
    let wedge = wedge_so3(&(rotvec / norm));
    identity3 + f64::sin(norm) * wedge + (1. - f64::cos(norm)) * wedge * wedge
}

/// Logarithm map from a rotation matrix to its axis-angle vector.
///
/// The returned angle lies in `[0, pi]`. The identity maps to the zero vector.
/// At exactly pi the axis sign is arbitrary, as both signs describe the same rotation.
pub fn log_so3(rot: &Matrix3<f64>) -> Vector3<f64> {
    // (R - R^T) / 2 = sin(theta) [a]x
    let skew = 0.5 * vee_so3(&(rot - rot.transpose()));
    let cos = 0.5 * (rot.trace() - 1.);
    let sin = skew.norm();
    let theta = f64::atan2(sin, cos);

    if theta < EPSILON {
        log::trace!("rotation angle {theta} below {EPSILON}, using first order log");
        return skew;
    }

    if std::f64::consts::PI - theta < NEAR_PI {
        log::trace!("rotation angle {theta} close to pi, reading axis from symmetric part");
        return theta * axis_near_pi(rot, &skew, cos);
    }

    (theta / sin) * skew
}

fn axis_near_pi(rot: &Matrix3<f64>, skew: &Vector3<f64>, cos: f64) -> Vector3<f64> {
    // (R + R^T) / 2 = cos(theta) I + (1 - cos(theta)) a a^T
    let sym = 0.5 * (rot + rot.transpose());
    let outer = (sym - cos * identity::<3>()) / (1. - cos);

    let k = outer.diagonal().imax();
    let axis = (outer.column(k) / f64::sqrt(outer[(k, k)])).normalize();
    if axis.dot(skew) < 0. {
        -axis
    } else {
        axis
    }
}

/// Rotation angle of `rot` in radians, in `[0, pi]`.
pub fn rotation_angle(rot: &Matrix3<f64>) -> f64 {
    log_so3(rot).norm()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::f64::consts::PI;

    fn closest(rotvec: &Vector3<f64>, expected: &Vector3<f64>) -> f64 {
        f64::min(
            (rotvec - expected).norm(),
            (rotvec + expected).norm(),
        )
    }

    #[test]
    fn test_wedge_so3() {
        let mat = wedge_so3(&Vector3::new(0.3, 0.5, 0.7));

        #[rustfmt::skip]
        let expected = Matrix3::<f64>::new(
            0.0, -0.7, 0.5,
            0.7, 0.0, -0.3,
            -0.5, 0.3, 0.0
        );
        assert_eq!(mat, expected);
        assert_eq!(vee_so3(&mat), Vector3::new(0.3, 0.5, 0.7));
    }

    #[test]
    fn test_vee_so3_entries() {
        #[rustfmt::skip]
        let m = Matrix3::<f64>::new(
            10., 20., 30.,
            40., 50., 60.,
            70., 80., 90.,
        );
        assert_eq!(vee_so3(&m), Vector3::new(80., 30., 40.));
    }

    #[test]
    fn test_wedge_is_cross_product() {
        let v = Vector3::new(0.3, -0.5, 0.7);
        let w = Vector3::new(-1.1, 0.2, 0.4);
        assert!((wedge_so3(&v) * w - v.cross(&w)).norm() < 1e-15);
    }

    #[test]
    fn test_exp_so3_z_rotation() {
        let rot = exp_so3(&Vector3::new(0., 0., PI / 2.));

        #[rustfmt::skip]
        let expected = Matrix3::<f64>::new(
            0., -1., 0.,
            1., 0., 0.,
            0., 0., 1.,
        );
        assert!((rot - expected).norm() < 1e-15);
    }

    #[test]
    fn test_exp_so3_zero() {
        assert_eq!(exp_so3(&Vector3::zeros()), identity::<3>());
    }

    #[test]
    fn test_exp_so3_is_rotation() {
        let vectors = [
            Vector3::new(0.1, 0.2, 0.3),
            Vector3::new(1e-8, -2e-8, 3e-8),
            Vector3::new(-2.0, 1.0, 0.5),
        ];
        for v in vectors.iter() {
            let rot = exp_so3(v);
            assert!((rot.transpose() * rot - identity::<3>()).norm() < 1e-12);
            assert!((rot.determinant() - 1.).abs() < 1e-12);
        }
    }

    #[test]
    fn test_log_so3_identity() {
        let rotvec = log_so3(&identity::<3>());
        assert_eq!(rotvec, Vector3::zeros());
    }

    #[test]
    fn test_log_so3() {
        let vectors = [
            Vector3::new(0.1, 0.2, 0.3),
            Vector3::new(-1.2, 0.4, 0.9),
            Vector3::new(0., 0., 3.0),
            Vector3::new(2e-7, -1e-7, 3e-7),
        ];
        for v in vectors.iter() {
            let rotvec = log_so3(&exp_so3(v));
            assert!((rotvec - v).norm() < 1e-12, "{rotvec} != {v}");
        }
    }

    #[test]
    fn test_log_so3_near_pi() {
        let axis = Vector3::new(1., 2., 3.).normalize();
        let theta = PI - 1e-4;
        let rotvec = log_so3(&exp_so3(&(theta * axis)));
        assert!((rotvec - theta * axis).norm() < 1e-9);
    }

    #[test]
    fn test_log_so3_pi() {
        let axis = Vector3::new(1., 2., 3.).normalize();
        let rot = exp_so3(&(PI * axis));
        let rotvec = log_so3(&rot);
        assert!(closest(&rotvec, &(PI * axis)) < 1e-9);
        assert!((exp_so3(&rotvec) - rot).norm() < 1e-9);

        #[rustfmt::skip]
        let half_turn_x = Matrix3::<f64>::new(
            1., 0., 0.,
            0., -1., 0.,
            0., 0., -1.,
        );
        let rotvec = log_so3(&half_turn_x);
        assert!(closest(&rotvec, &Vector3::new(PI, 0., 0.)) < 1e-12);
    }

    #[test]
    fn test_rotation_angle() {
        let rot = exp_so3(&Vector3::new(0.3, -0.4, 0.));
        assert!((rotation_angle(&rot) - 0.5).abs() < 1e-12);
        assert_eq!(rotation_angle(&identity::<3>()), 0.);
    }
}
