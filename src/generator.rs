use crate::error::InterpolationError;
use crate::exp_so3;
use crate::transform::{RigidTransform, Shape};
use nalgebra::{Matrix3, Vector3};

/// Rigid motion with constant angular and linear velocity, both expressed in the
/// world frame.
///
/// At time `t` the pose is `R(t) = exp(w t) * R0`, `T(t) = T0 + v t`. This is the
/// motion [`interpolate`](crate::interpolate) assumes between its two endpoints.
///
/// ```
/// use nalgebra::Vector3;
/// use pose_interpolation::{PoseGenerator, RigidTransform, Shape};
///
/// let start = RigidTransform::identity(Shape::Homogeneous4x4);
/// let generator = PoseGenerator::new(
///     &start,
///     &Vector3::new(0., 0., 0.5),
///     &Vector3::new(1., 0., 0.),
/// )
/// .unwrap();
///
/// let pose = generator.pose(2., Shape::Affine3x4);
/// assert_eq!(pose.shape(), Shape::Affine3x4);
/// assert!((pose.translation() - Vector3::new(2., 0., 0.)).norm() < 1e-15);
/// ```
#[derive(Debug, Clone, Copy)]
pub struct PoseGenerator {
    rotation: Matrix3<f64>,
    translation: Vector3<f64>,
    angular_velocity: Vector3<f64>,
    linear_velocity: Vector3<f64>,
}

impl PoseGenerator {
    /// Start the motion at `start`, which is normalized first. Fails if `start` is a
    /// 4x4 transform with a zero or non-finite homogeneous scale.
    pub fn new(
        start: &RigidTransform,
        angular_velocity: &Vector3<f64>,
        linear_velocity: &Vector3<f64>,
    ) -> Result<Self, InterpolationError> {
        let start = start.normalized()?;
        Ok(PoseGenerator {
            rotation: start.rotation(),
            translation: start.translation(),
            angular_velocity: *angular_velocity,
            linear_velocity: *linear_velocity,
        })
    }

    /// Rotation block at time `t`.
    pub fn rotation(&self, t: f64) -> Matrix3<f64> {
        exp_so3(&(self.angular_velocity * t)) * self.rotation
    }

    /// Translation at time `t`.
    pub fn translation(&self, t: f64) -> Vector3<f64> {
        self.translation + self.linear_velocity * t
    }

    /// Unit-homogeneous pose at time `t`, stored in `shape`.
    pub fn pose(&self, t: f64, shape: Shape) -> RigidTransform {
        RigidTransform::from_parts(shape, &self.rotation(t), &self.translation(t))
    }
}
