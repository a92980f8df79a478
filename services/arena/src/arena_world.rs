use crate::app_config::{ArenaConfig, DummyConfig};
use bevy::math::Vec3;
use mirror_combat::combat::{
    ActorId, CameraProvider, CameraView, CollisionChannel, DamageSink, OrientedBox, OverlapQuery, ProjectileSpawn,
    ProjectileSpawner,
};

/// Id of the player pawn, dummies are numbered after it.
pub const PLAYER_ID: ActorId = ActorId(1);

#[derive(Debug, Clone, PartialEq)]
pub struct Dummy {
    pub id: ActorId,
    pub position: Vec3,
    pub radius: f32,
    pub health: f32,
}

impl Dummy {
    pub fn is_alive(&self) -> bool {
        self.health > 0.0
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Projectile {
    pub spawn: ProjectileSpawn,
    pub age_s: f32,
}

impl Projectile {
    pub fn position(&self) -> Vec3 {
        self.spawn.position + self.spawn.velocity * self.age_s
    }
}

/// Training ground of sphere shaped dummies.
///
/// Projectiles only fly, they do not collide, the sweep already did the damage.
#[derive(Debug)]
pub struct ArenaWorld {
    camera: CameraView,
    dummies: Vec<Dummy>,
    projectiles: Vec<Projectile>,
    kills: usize,
}

impl ArenaWorld {
    pub fn new(camera: CameraView, dummies: &[DummyConfig]) -> Self {
        let dummies = dummies
            .iter()
            .zip(PLAYER_ID.0 + 1..)
            .map(|(cfg, id)| Dummy {
                id: ActorId(id),
                position: cfg.position,
                radius: cfg.radius,
                health: cfg.health,
            })
            .collect();

        Self {
            camera,
            dummies,
            projectiles: Vec::new(),
            kills: 0,
        }
    }

    pub fn from_config(config: &ArenaConfig) -> Self {
        Self::new(config.camera.view(), &config.dummies)
    }

    pub fn dummies(&self) -> &[Dummy] {
        &self.dummies
    }

    pub fn dummy(&self, id: ActorId) -> Option<&Dummy> {
        self.dummies.iter().find(|d| d.id == id)
    }

    pub fn projectiles(&self) -> &[Projectile] {
        &self.projectiles
    }

    pub fn kills(&self) -> usize {
        self.kills
    }

    /// Fly the projectiles and drop the expired ones.
    pub fn advance(&mut self, dt_s: f32) {
        for projectile in &mut self.projectiles {
            projectile.age_s += dt_s;
        }
        self.projectiles.retain(|p| {
            let alive = p.age_s < p.spawn.lifespan_s;
            if !alive {
                log::debug!("{} expired at {:?}", p.spawn.class, p.position());
            }
            alive
        });
    }
}

impl CameraProvider for ArenaWorld {
    fn camera_view(&self) -> Option<CameraView> {
        Some(self.camera)
    }
}

impl OverlapQuery for ArenaWorld {
    fn overlap_box(&self, shape: &OrientedBox, _channel: CollisionChannel) -> Vec<ActorId> {
        self.dummies
            .iter()
            .filter(|d| d.is_alive() && shape.intersects_sphere(d.position, d.radius))
            .map(|d| d.id)
            .collect()
    }
}

impl DamageSink for ArenaWorld {
    fn apply_damage(&mut self, target: ActorId, amount: f32, instigator: ActorId, causer: ActorId) {
        let Some(dummy) = self.dummies.iter_mut().find(|d| d.id == target) else {
            log::warn!("Damage to unknown actor {target:?} by {instigator:?}");
            return;
        };
        if !dummy.is_alive() {
            return;
        }

        dummy.health = (dummy.health - amount).max(0.0);
        log::info!(
            "Dummy {} took {amount} damage from {:?} (via {:?}), health: {}",
            target.0,
            instigator,
            causer,
            dummy.health
        );
        if !dummy.is_alive() {
            self.kills += 1;
            log::info!("Dummy {} destroyed", target.0);
        }
    }
}

impl ProjectileSpawner for ArenaWorld {
    fn spawn_projectile(&mut self, spawn: ProjectileSpawn) {
        log::debug!("Spawning {} at {:?} with velocity {:?}", spawn.class, spawn.position, spawn.velocity);
        self.projectiles.push(Projectile { spawn, age_s: 0.0 });
    }
}
