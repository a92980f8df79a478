use bevy::math::{Quat, Vec3};
use serde::{Deserialize, Serialize};

/// World transform of the entity owning a classifier.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct OwnerTransform {
    pub translation: Vec3,
    pub rotation: Quat,
    pub scale: Vec3,
}

impl Default for OwnerTransform {
    fn default() -> Self {
        Self::IDENTITY
    }
}

impl OwnerTransform {
    pub const IDENTITY: Self = Self {
        translation: Vec3::ZERO,
        rotation: Quat::IDENTITY,
        scale: Vec3::ONE,
    };

    pub fn from_translation(translation: Vec3) -> Self {
        Self {
            translation,
            ..Self::IDENTITY
        }
    }

    pub fn with_rotation(mut self, rotation: Quat) -> Self {
        self.rotation = rotation;
        self
    }

    pub fn transform_point(&self, local: Vec3) -> Vec3 {
        self.translation + self.rotation * (self.scale * local)
    }

    /// Rotate a direction into world space, ignoring translation and scale.
    pub fn transform_direction(&self, local: Vec3) -> Vec3 {
        self.rotation * local
    }
}
