use bevy::math::{Quat, Vec3};
use serde::{Deserialize, Serialize};

/// Opaque handle of an actor in the host world.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct ActorId(pub u64);

/// Collision channel an overlap query runs against.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum CollisionChannel {
    #[default]
    Pawn,
    WorldDynamic,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CameraView {
    pub position: Vec3,
    /// Unit view direction.
    pub forward: Vec3,
}

/// An oriented box used as hit volume.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct OrientedBox {
    pub center: Vec3,
    pub rotation: Quat,
    pub half_extents: Vec3,
}

impl OrientedBox {
    /// Closest point of the box to `point`.
    pub fn closest_point(&self, point: Vec3) -> Vec3 {
        let local = self.rotation.inverse() * (point - self.center);
        let clamped = local.clamp(-self.half_extents, self.half_extents);
        self.center + self.rotation * clamped
    }

    pub fn intersects_sphere(&self, center: Vec3, radius: f32) -> bool {
        self.closest_point(center).distance_squared(center) <= radius * radius
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct ProjectileSpawn {
    pub class: String,
    pub position: Vec3,
    pub rotation: Quat,
    pub velocity: Vec3,
    pub lifespan_s: f32,
}

/// Provides the viewpoint the player sees the world from.
pub trait CameraProvider {
    fn camera_view(&self) -> Option<CameraView>;
}

/// Hit test primitive of the host world.
pub trait OverlapQuery {
    fn overlap_box(&self, shape: &OrientedBox, channel: CollisionChannel) -> Vec<ActorId>;
}

/// Receives the damage dealt by a gesture.
pub trait DamageSink {
    fn apply_damage(&mut self, target: ActorId, amount: f32, instigator: ActorId, causer: ActorId);
}

pub trait ProjectileSpawner {
    fn spawn_projectile(&mut self, spawn: ProjectileSpawn);
}

/// Everything a gesture needs from the host world.
pub trait CombatWorld: CameraProvider + OverlapQuery + DamageSink + ProjectileSpawner {}

impl<T> CombatWorld for T where T: CameraProvider + OverlapQuery + DamageSink + ProjectileSpawner {}
