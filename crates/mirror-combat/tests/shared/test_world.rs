#![allow(dead_code)]

use bevy::math::Vec3;
use mirror_combat::combat::{
    ActorId, CameraProvider, CameraView, CollisionChannel, DamageSink, OrientedBox, OverlapQuery, ProjectileSpawn,
    ProjectileSpawner,
};

pub const PLAYER: ActorId = ActorId(1);

/// Sphere shaped actors and a recording of everything done to them.
pub struct TestWorld {
    pub camera: Option<CameraView>,
    pub actors: Vec<(ActorId, Vec3, f32)>,
    pub damage: Vec<(ActorId, f32, ActorId, ActorId)>,
    pub projectiles: Vec<ProjectileSpawn>,
}

impl TestWorld {
    /// Camera behind the player looking forward.
    pub fn new() -> Self {
        Self {
            camera: Some(CameraView {
                position: Vec3::new(-500.0, 0.0, 100.0),
                forward: Vec3::X,
            }),
            actors: vec![(PLAYER, Vec3::ZERO, 50.0)],
            damage: Vec::new(),
            projectiles: Vec::new(),
        }
    }

    pub fn without_camera() -> Self {
        Self {
            camera: None,
            ..Self::new()
        }
    }

    pub fn with_actor(mut self, id: u64, position: Vec3, radius: f32) -> Self {
        self.actors.push((ActorId(id), position, radius));
        self
    }

    pub fn damage_of(&self, actor: ActorId) -> f32 {
        self.damage.iter().filter(|d| d.0 == actor).map(|d| d.1).sum()
    }
}

impl CameraProvider for TestWorld {
    fn camera_view(&self) -> Option<CameraView> {
        self.camera
    }
}

impl OverlapQuery for TestWorld {
    fn overlap_box(&self, shape: &OrientedBox, _channel: CollisionChannel) -> Vec<ActorId> {
        self.actors
            .iter()
            .filter(|(_, center, radius)| shape.intersects_sphere(*center, *radius))
            .map(|(id, _, _)| *id)
            .collect()
    }
}

impl DamageSink for TestWorld {
    fn apply_damage(&mut self, target: ActorId, amount: f32, instigator: ActorId, causer: ActorId) {
        self.damage.push((target, amount, instigator, causer));
    }
}

impl ProjectileSpawner for TestWorld {
    fn spawn_projectile(&mut self, spawn: ProjectileSpawn) {
        self.projectiles.push(spawn);
    }
}
