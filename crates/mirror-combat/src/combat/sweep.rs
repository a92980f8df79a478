use crate::{
    combat::{ActorId, CombatWorld, OrientedBox, ProjectileMode, ProjectileSpawn, SweepConfig},
    geometry::PlaneBasis,
};
use bevy::math::{Quat, Vec3};
use std::collections::BTreeSet;

/// One end of a rotating sweep.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SweepPose {
    pub anchor: Vec3,
    pub basis: PlaneBasis,
    /// Direction projectiles leave in, the plane travel axis is used when zero.
    pub fire_direction: Vec3,
}

/// A single hit plane of a sweep.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SweepPlane {
    pub anchor: Vec3,
    pub center: Vec3,
    pub rotation: Quat,
    pub fire_direction: Vec3,
}

impl SweepPlane {
    /// A plane hanging off the anchor along its travel axis by `reach`.
    pub fn new(anchor: Vec3, basis: &PlaneBasis, reach: f32, fire_direction: Vec3) -> Self {
        let fire_direction = fire_direction.try_normalize().unwrap_or(basis.y);
        Self {
            anchor,
            center: anchor + basis.y * reach,
            rotation: basis.rotation(),
            fire_direction,
        }
    }

    pub fn travel_axis(&self) -> Vec3 {
        self.rotation * Vec3::Y
    }

    pub fn normal(&self) -> Vec3 {
        self.rotation * Vec3::X
    }
}

/// Planes of a sweep rotating from `start` to `end`, spaced by the configured angular step.
pub fn rotating_sweep(start: &SweepPose, end: &SweepPose, config: &SweepConfig) -> Vec<SweepPlane> {
    let rot0 = start.basis.rotation();
    let rot1 = end.basis.rotation();
    let count = config.angular_plane_count(rot0.angle_between(rot1).to_degrees());
    let reach = config.hit_box.half_size.x;

    (0..count)
        .map(|k| {
            let t = if count == 1 { 0.0 } else { k as f32 / (count - 1) as f32 };
            let basis = PlaneBasis::from_rotation(rot0.slerp(rot1, t).normalize());
            let anchor = start.anchor.lerp(end.anchor, t);
            let fire = start.fire_direction.lerp(end.fire_direction, t);
            SweepPlane::new(anchor, &basis, reach, fire)
        })
        .collect()
}

/// Planes of a sweep translating a fixed orientation from `start` to `end`.
pub fn translating_sweep(start: Vec3, end: Vec3, basis: &PlaneBasis, config: &SweepConfig) -> Vec<SweepPlane> {
    let count = config.fixed_plane_count();
    let reach = config.hit_box.half_size.x;

    (0..count)
        .map(|k| {
            let t = if count == 1 { 0.0 } else { k as f32 / (count - 1) as f32 };
            SweepPlane::new(start.lerp(end, t), basis, reach, basis.y)
        })
        .collect()
}

/// What a sweep did in the world.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct SweepOutcome {
    pub planes: usize,
    /// Every actor hit, each damaged exactly once.
    pub hits: Vec<ActorId>,
    pub projectiles: usize,
}

/// Run the overlap test of every plane, union the hit actors and damage each of them once.
pub fn sweep_and_damage<W>(world: &mut W, owner: ActorId, planes: &[SweepPlane], config: &SweepConfig) -> SweepOutcome
where
    W: CombatWorld + ?Sized,
{
    let half_extents = config.hit_box.half_extents();
    let mut hits = BTreeSet::new();
    let mut projectiles = 0;

    for plane in planes {
        // the box sits in front of the plane, not centered on it
        let shape = OrientedBox {
            center: plane.center + plane.normal() * config.hit_box.half_thickness,
            rotation: plane.rotation,
            half_extents,
        };
        hits.extend(
            world
                .overlap_box(&shape, config.hit_box.channel)
                .into_iter()
                .filter(|&actor| actor != owner),
        );

        if let Some(projectile) = config.projectile.as_ref().filter(|p| p.mode == ProjectileMode::PerPlane) {
            world.spawn_projectile(ProjectileSpawn {
                class: projectile.class.clone(),
                position: plane.anchor + plane.fire_direction * projectile.spawn_forward_offset,
                rotation: Quat::from_rotation_arc(Vec3::X, plane.fire_direction),
                velocity: plane.fire_direction * projectile.speed,
                lifespan_s: projectile.lifespan_s,
            });
            projectiles += 1;
        }
    }

    if let Some(projectile) = config.projectile.as_ref().filter(|p| p.mode == ProjectileMode::OnceAtEnd) {
        if let Some(last) = planes.last() {
            let n = planes.len() as f32;
            let direction = (planes.iter().map(|p| p.travel_axis()).sum::<Vec3>() / n)
                .try_normalize()
                .unwrap_or(last.travel_axis());
            let origin = planes.iter().map(|p| p.anchor).sum::<Vec3>() / n;
            world.spawn_projectile(ProjectileSpawn {
                class: projectile.class.clone(),
                position: origin + direction * projectile.spawn_forward_offset,
                rotation: Quat::from_rotation_arc(Vec3::X, direction),
                velocity: direction * projectile.speed,
                lifespan_s: projectile.lifespan_s,
            });
            projectiles += 1;
        }
    }

    for &target in &hits {
        world.apply_damage(target, config.damage, owner, owner);
    }
    if !hits.is_empty() {
        log::debug!("Sweep of {} planes hit {} actors", planes.len(), hits.len());
    }

    SweepOutcome {
        planes: planes.len(),
        hits: hits.into_iter().collect(),
        projectiles,
    }
}
