use crate::combat::CollisionChannel;
use bevy::math::{Vec2, Vec3};
use serde::{Deserialize, Serialize};

/// Shape of a single hit plane.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct HitBoxConfig {
    /// Half thickness along the plane normal.
    pub half_thickness: f32,
    /// Half size along the in-plane travel axis (x) and the third axis (y).
    pub half_size: Vec2,
    pub channel: CollisionChannel,
}

impl Default for HitBoxConfig {
    fn default() -> Self {
        Self {
            half_thickness: 20.0,
            half_size: Vec2::new(5000.0, 1000.0),
            channel: CollisionChannel::Pawn,
        }
    }
}

impl HitBoxConfig {
    pub fn half_extents(&self) -> Vec3 {
        Vec3::new(self.half_thickness, self.half_size.x, self.half_size.y)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum ProjectileMode {
    /// One projectile from every swept plane.
    PerPlane,
    /// A single projectile along the average travel axis after the sweep.
    #[default]
    OnceAtEnd,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ProjectileConfig {
    pub class: String,
    pub speed: f32,
    pub lifespan_s: f32,
    pub spawn_forward_offset: f32,
    pub mode: ProjectileMode,
}

impl Default for ProjectileConfig {
    fn default() -> Self {
        Self::sword_wave()
    }
}

impl ProjectileConfig {
    pub fn sword_wave() -> Self {
        Self {
            class: "SwordWave".into(),
            speed: 3000.0,
            lifespan_s: 2.0,
            spawn_forward_offset: 20.0,
            mode: ProjectileMode::OnceAtEnd,
        }
    }

    pub fn arrow() -> Self {
        Self {
            class: "Arrow".into(),
            speed: 3000.0,
            lifespan_s: 2.0,
            spawn_forward_offset: 20.0,
            mode: ProjectileMode::OnceAtEnd,
        }
    }

    pub fn amulet_orb() -> Self {
        Self {
            class: "AmuletOrb".into(),
            speed: 1000.0,
            lifespan_s: 3.0,
            spawn_forward_offset: 0.0,
            mode: ProjectileMode::OnceAtEnd,
        }
    }
}

/// How a detector turns its strike into hit volumes and damage.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct SweepConfig {
    pub hit_box: HitBoxConfig,
    pub min_planes: usize,
    pub max_planes: usize,
    /// Angular step between planes of a rotating sweep.
    pub degrees_per_plane: f32,
    pub damage: f32,
    pub projectile: Option<ProjectileConfig>,
}

impl Default for SweepConfig {
    fn default() -> Self {
        Self::swing()
    }
}

impl SweepConfig {
    pub fn swing() -> Self {
        Self {
            hit_box: HitBoxConfig::default(),
            min_planes: 2,
            max_planes: 24,
            degrees_per_plane: 12.0,
            damage: 2.0,
            projectile: None,
        }
    }

    pub fn arrow() -> Self {
        Self {
            min_planes: 1,
            max_planes: 1,
            ..Self::swing()
        }
    }

    pub fn single_swing() -> Self {
        Self {
            min_planes: 3,
            ..Self::swing()
        }
    }

    /// Plane count of a rotating sweep covering `angle_deg`.
    pub fn angular_plane_count(&self, angle_deg: f32) -> usize {
        let step = self.degrees_per_plane.max(1e-3);
        let wanted = (angle_deg.max(0.0) / step).ceil() as usize + 1;
        self.clamp_planes(wanted, 2)
    }

    /// Plane count of a translating sweep.
    pub fn fixed_plane_count(&self) -> usize {
        self.clamp_planes(self.min_planes.max(3), 1)
    }

    fn clamp_planes(&self, wanted: usize, floor: usize) -> usize {
        let lo = self.min_planes.max(floor);
        let hi = self.max_planes.max(lo);
        wanted.clamp(lo, hi)
    }
}
