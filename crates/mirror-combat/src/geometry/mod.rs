mod owner_transform;
mod plane_basis;
mod pose_mapping;

pub use self::owner_transform::*;
pub use self::plane_basis::*;
pub use self::pose_mapping::*;

use bevy::math::Vec3;

/// World axes: X points forward (away from the camera), Y to the right and Z up.
pub const WORLD_FORWARD: Vec3 = Vec3::X;
pub const WORLD_RIGHT: Vec3 = Vec3::Y;
pub const WORLD_UP: Vec3 = Vec3::Z;

/// Vectors shorter than this are treated as zero when normalizing.
pub const NEARLY_ZERO: f32 = 1e-4;
