use crate::geometry::OwnerTransform;
use bevy::math::{Vec2, Vec3};
use serde::{Deserialize, Serialize};

/// Bridge from image space to the owner's local space.
///
/// A joint is placed relative to the pelvis: image x becomes local Y, image y becomes local Z
/// (flipped when `invert_y` is set, as image y grows downward) and local X is a constant depth.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct PoseMapping {
    pub pixel_to_uu: f32,
    pub invert_y: bool,
    pub depth_offset_x: f32,
}

impl Default for PoseMapping {
    fn default() -> Self {
        Self {
            pixel_to_uu: 1.0,
            invert_y: true,
            depth_offset_x: 0.0,
        }
    }
}

impl PoseMapping {
    pub fn to_local(&self, pelvis: Vec2, joint: Vec2) -> Vec3 {
        let rel = joint - pelvis;
        let vertical = if self.invert_y { -rel.y } else { rel.y };
        Vec3::new(self.depth_offset_x, rel.x * self.pixel_to_uu, vertical * self.pixel_to_uu)
    }

    pub fn to_world(&self, pelvis: Vec2, joint: Vec2, owner: &OwnerTransform) -> Vec3 {
        owner.transform_point(self.to_local(pelvis, joint))
    }

    /// Map an image space direction onto the owner's Y/Z plane in world space.
    pub fn direction_to_world(&self, direction: Vec2, owner: &OwnerTransform) -> Vec3 {
        let vertical = if self.invert_y { -direction.y } else { direction.y };
        owner
            .transform_direction(Vec3::new(0.0, direction.x, vertical))
            .normalize_or_zero()
    }
}

/// Map a joint to world space relative to the pelvis.
pub fn to_world(
    pelvis: Vec2,
    joint: Vec2,
    owner: &OwnerTransform,
    pixel_to_uu: f32,
    invert_y: bool,
    depth_offset_x: f32,
) -> Vec3 {
    let mapping = PoseMapping {
        pixel_to_uu,
        invert_y,
        depth_offset_x,
    };
    mapping.to_world(pelvis, joint, owner)
}
