use bevy::math::Vec3;
use mirror_combat::{
    combat::{
        rotating_sweep, sweep_and_damage, translating_sweep, ActorId, ProjectileConfig, ProjectileMode, SweepConfig,
        SweepPose,
    },
    geometry::PlaneBasis,
};
use mirror_test::test;

#[path = "shared/test_world.rs"]
mod test_world;
pub use test_world::*;

fn flat_basis() -> PlaneBasis {
    // normal up, travelling right
    PlaneBasis::from_camera_and_axis(Vec3::X, Vec3::Y)
}

#[test]
fn actors_are_damaged_once_and_owner_is_spared() {
    let mut world = TestWorld::new()
        .with_actor(10, Vec3::new(0.0, 300.0, 20.0), 10.0)
        .with_actor(11, Vec3::new(0.0, 300.0, 500.0), 10.0)
        .with_actor(12, Vec3::new(0.0, -300.0, 20.0), 10.0)
        .with_actor(13, Vec3::new(0.0, 300.0, 65.0), 5.0);

    let config = SweepConfig::single_swing();
    let planes = translating_sweep(Vec3::ZERO, Vec3::new(0.0, 0.0, 30.0), &flat_basis(), &config);
    assert_eq!(planes.len(), 3);

    let outcome = sweep_and_damage(&mut world, PLAYER, &planes, &config);
    assert_eq!(outcome.planes, 3);
    assert_eq!(outcome.hits, vec![ActorId(10), ActorId(13)]);
    assert_eq!(outcome.projectiles, 0);

    assert_eq!(world.damage.len(), 2);
    assert_eq!(world.damage_of(ActorId(10)), config.damage);
    assert_eq!(world.damage_of(ActorId(13)), config.damage);
    assert_eq!(world.damage_of(PLAYER), 0.0);
    assert!(world.damage.iter().all(|&(_, _, instigator, causer)| instigator == PLAYER && causer == PLAYER));
}

#[test]
fn projectile_policy() {
    let basis = flat_basis();
    let mut config = SweepConfig {
        projectile: Some(ProjectileConfig {
            mode: ProjectileMode::PerPlane,
            ..ProjectileConfig::amulet_orb()
        }),
        ..SweepConfig::single_swing()
    };
    let planes = translating_sweep(Vec3::ZERO, Vec3::new(0.0, 0.0, 30.0), &basis, &config);

    let mut world = TestWorld::new();
    let outcome = sweep_and_damage(&mut world, PLAYER, &planes, &config);
    assert_eq!(outcome.projectiles, 3);
    assert_eq!(world.projectiles.len(), 3);

    config.projectile = Some(ProjectileConfig::amulet_orb());
    let mut world = TestWorld::new();
    let outcome = sweep_and_damage(&mut world, PLAYER, &planes, &config);
    assert_eq!(outcome.projectiles, 1);

    let projectile = &world.projectiles[0];
    let expected = ProjectileConfig::amulet_orb();
    assert_eq!(projectile.class, expected.class);
    assert_eq!(projectile.lifespan_s, expected.lifespan_s);
    assert!(projectile.velocity.distance(Vec3::Y * expected.speed) < 1e-2);
}

#[test]
fn rotating_sweep_follows_the_angle() {
    let start = SweepPose {
        anchor: Vec3::ZERO,
        basis: PlaneBasis::from_camera_and_axis(Vec3::X, Vec3::Y),
        fire_direction: Vec3::Y,
    };
    let end = SweepPose {
        anchor: Vec3::new(0.0, 0.0, 100.0),
        basis: PlaneBasis::from_camera_and_axis(Vec3::X, Vec3::Z),
        fire_direction: Vec3::Z,
    };

    let config = SweepConfig::swing();
    let planes = rotating_sweep(&start, &end, &config);
    // 90 degrees in 12 degree steps
    assert_eq!(planes.len(), 9);

    let first = planes[0];
    let last = planes[planes.len() - 1];
    assert!(first.travel_axis().distance(Vec3::Y) < 1e-4);
    assert!(last.travel_axis().distance(Vec3::Z) < 1e-4);
    assert!(last.anchor.distance(end.anchor) < 1e-4);
    assert!(planes.iter().all(|p| (p.normal().length() - 1.0).abs() < 1e-4));

    let same = rotating_sweep(&start, &start, &config);
    assert_eq!(same.len(), config.min_planes.max(2));
}
