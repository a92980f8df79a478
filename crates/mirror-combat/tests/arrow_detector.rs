use mirror_combat::{
    combat::ProjectileConfig,
    geometry::{OwnerTransform, PoseMapping},
    gesture::{ArrowConfig, ArrowDetector, Criterion, GestureKind, GestureRejection, StrikeContext},
    pose::{Side, TimedPoseSnapshot},
    window::PoseWindow,
};
use mirror_test::test;

#[path = "shared/poses.rs"]
mod poses;
pub use poses::*;

#[path = "shared/test_world.rs"]
mod test_world;
pub use test_world::*;

fn fire(
    detector: &mut ArrowDetector,
    window: &mut PoseWindow,
    frames: Vec<TimedPoseSnapshot>,
    world: &mut TestWorld,
) -> Result<mirror_combat::gesture::GestureResult, GestureRejection> {
    for frame in frames {
        window.ingest(frame);
    }
    window.prune_old(window.now());

    let owner = OwnerTransform::IDENTITY;
    let mapping = PoseMapping::default();
    let mut ctx = StrikeContext {
        world,
        owner: PLAYER,
        owner_transform: &owner,
        mapping: &mapping,
    };
    let result = detector.detect(window, &mut ctx);
    if result.is_ok() {
        window.reset();
    }
    result
}

#[test]
fn arrow_pull_is_accepted() {
    let mut window = PoseWindow::new(1.0);
    for frame in arrow_pull(1_000, 200.0) {
        window.ingest(frame);
    }
    let detector = ArrowDetector::new(ArrowConfig::default());
    let candidate = detector.evaluate(&window).unwrap();
    let metrics = &candidate.metrics;
    assert!(metrics.min_stretch < 0.2, "{metrics:?}");
    assert!(metrics.max_stretch > 1.8, "{metrics:?}");
    assert!(metrics.speed > 1.0, "{metrics:?}");
    assert!(candidate.enter_index < candidate.exit_index);
}

#[test]
fn strike_follows_the_extended_arm() {
    let mut detector = ArrowDetector::new(ArrowConfig::default());
    let mut window = PoseWindow::new(1.0);
    let mut world = TestWorld::new();

    let result = fire(&mut detector, &mut window, arrow_pull(1_000, 200.0), &mut world).unwrap();
    assert_eq!(result.kind, GestureKind::Arrow);
    assert_eq!(result.hand, Some(Side::Right));

    let strike = result.strike.unwrap();
    assert_eq!(strike.sweep.planes, 1);
    assert_eq!(strike.sweep.projectiles, 1);
    // the right wrist is pulled out to the image right, the world right
    assert!(strike.direction.y > 0.9, "{strike:?}");
    assert_eq!(world.projectiles[0].class, ProjectileConfig::arrow().class);
}

#[test]
fn second_pull_within_cooldown_is_suppressed() {
    let mut detector = ArrowDetector::new(ArrowConfig::default());
    let mut window = PoseWindow::new(1.0);
    let mut world = TestWorld::new();

    let first = fire(&mut detector, &mut window, arrow_pull(1_000, 200.0), &mut world).unwrap();
    let fired_at = first.timestamp_ms;

    // a valid pull right after the first one
    let second = fire(&mut detector, &mut window, arrow_pull(fired_at + FRAME_MS, 200.0), &mut world);
    assert!(matches!(second, Err(GestureRejection::CoolingDown { .. })), "{second:?}");

    // once the cooldown passed the same pull fires again
    let third = fire(&mut detector, &mut window, arrow_pull(fired_at + 2_000, 200.0), &mut world).unwrap();
    assert!(third.timestamp_ms >= fired_at + 2_000);
    assert_eq!(world.projectiles.len(), 2);
}

#[test]
fn hands_never_close() {
    let mut window = PoseWindow::new(1.0);
    for frame in outward_swing(1_000, 200.0) {
        window.ingest(frame);
    }
    let detector = ArrowDetector::new(ArrowConfig::default());
    assert_eq!(detector.evaluate(&window).err(), Some(GestureRejection::NeverClose));
}

#[test]
fn short_pull_is_not_far_enough() {
    // a pull to one shoulder width only
    let mut window = PoseWindow::new(1.0);
    for frame in arrow_pull(1_000, 400.0).into_iter().map(|mut f| {
        for p in &mut f.persons {
            let sw = p.shoulder_width().unwrap_or(1.0);
            let left = p.keypoints[mirror_combat::pose::coco::LEFT_WRIST];
            let right = &mut p.keypoints[mirror_combat::pose::coco::RIGHT_WRIST];
            right.x = left.x + (right.x - left.x).min(sw);
        }
        f
    }) {
        window.ingest(frame);
    }
    let detector = ArrowDetector::new(ArrowConfig::default());
    assert!(matches!(
        detector.evaluate(&window),
        Err(GestureRejection::BelowThreshold {
            criterion: Criterion::Stretch,
            ..
        })
    ));
}
