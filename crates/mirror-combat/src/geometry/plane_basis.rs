use crate::geometry::{NEARLY_ZERO, WORLD_RIGHT, WORLD_UP};
use bevy::math::{Mat3, Quat, Vec3};

/// An orthonormal frame of a hit plane: `x` is the plane normal, `y` the in-plane
/// travel axis and `z = x × y`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PlaneBasis {
    pub x: Vec3,
    pub y: Vec3,
    pub z: Vec3,
}

fn try_normalize(v: Vec3) -> Option<Vec3> {
    if v.length_squared() > NEARLY_ZERO * NEARLY_ZERO {
        Some(v.normalize())
    } else {
        None
    }
}

impl PlaneBasis {
    /// Build the plane seen edge-on from the camera and containing `axis`.
    ///
    /// The normal is `camera_forward × axis`. When the two are parallel, `up × axis` is tried,
    /// then the world right axis. The result is always orthonormal and right handed.
    pub fn from_camera_and_axis(camera_forward: Vec3, axis: Vec3) -> Self {
        let x = try_normalize(camera_forward.cross(axis))
            .or_else(|| try_normalize(WORLD_UP.cross(axis)))
            .unwrap_or(WORLD_RIGHT);

        let y = try_normalize(axis - axis.dot(x) * x)
            .or_else(|| try_normalize(camera_forward - camera_forward.dot(x) * x))
            .unwrap_or_else(|| x.any_orthonormal_vector());

        let z = x.cross(y).normalize();
        Self { x, y, z }
    }

    pub fn from_rotation(rotation: Quat) -> Self {
        Self {
            x: rotation * Vec3::X,
            y: rotation * Vec3::Y,
            z: rotation * Vec3::Z,
        }
    }

    /// The rotation taking the world axes onto this frame.
    pub fn rotation(&self) -> Quat {
        Quat::from_mat3(&Mat3::from_cols(self.x, self.y, self.z)).normalize()
    }

    pub fn is_orthonormal(&self, epsilon: f32) -> bool {
        (self.x.length() - 1.0).abs() < epsilon
            && (self.y.length() - 1.0).abs() < epsilon
            && (self.z.length() - 1.0).abs() < epsilon
            && self.x.dot(self.y).abs() < epsilon
            && self.y.dot(self.z).abs() < epsilon
            && self.z.dot(self.x).abs() < epsilon
    }
}
