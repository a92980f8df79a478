use bevy::math::Vec2;
use mirror_combat::{
    combat::ProjectileConfig,
    geometry::{OwnerTransform, PoseMapping},
    gesture::{Criterion, GestureKind, GestureRejection, StrikeContext, SwingConfig, SwingDetector},
    signal::SignalConfig,
    window::PoseWindow,
};
use mirror_test::test;

#[path = "shared/poses.rs"]
mod poses;
pub use poses::*;

#[path = "shared/test_world.rs"]
mod test_world;
pub use test_world::*;

fn window_of(frames: Vec<mirror_combat::pose::TimedPoseSnapshot>) -> PoseWindow {
    let mut window = PoseWindow::new(1.0);
    for frame in frames {
        window.ingest(frame);
    }
    window
}

#[test]
fn downward_swing_with_hands_together_is_accepted() {
    let window = window_of(downward_swing(1_000, 200.0, 40.0));
    let mut detector = SwingDetector::new(SwingConfig::default());

    let candidate = detector.evaluate(&window).unwrap();
    let metrics = &candidate.metrics;
    assert!(metrics.close_coverage > 0.99, "{metrics:?}");
    assert!(metrics.down_coverage > 0.9, "{metrics:?}");
    assert!(metrics.down_delta > 1.3 && metrics.down_delta < 1.5, "{metrics:?}");
    assert_eq!(metrics.vertical_reversals, 0);
    assert!(candidate.enter_index <= candidate.exit_index);

    let mut world = TestWorld::new();
    let owner = OwnerTransform::IDENTITY;
    let mapping = PoseMapping::default();
    let mut ctx = StrikeContext {
        world: &mut world,
        owner: PLAYER,
        owner_transform: &owner,
        mapping: &mapping,
    };
    let result = detector.detect(&window, &mut ctx).unwrap();
    assert_eq!(result.kind, GestureKind::Swing);
    assert_eq!(result.timestamp_ms, window.now());
    assert!(result.enter_timestamp_ms <= result.exit_timestamp_ms);

    let strike = result.strike.unwrap();
    assert!(strike.basis.is_orthonormal(1e-4));
    assert!((strike.direction.length() - 1.0).abs() < 1e-4);
    // the wrists come down
    assert!(strike.direction.z < 0.0, "{strike:?}");
    assert_eq!(strike.sweep.projectiles, 1);
    assert_eq!(world.projectiles[0].class, ProjectileConfig::sword_wave().class);

    // the cooldown is on the sender clock
    assert!(matches!(
        detector.evaluate(&window),
        Err(GestureRejection::CoolingDown { .. })
    ));
}

#[test]
fn narrow_shoulders_break_the_close_coverage() {
    let window = window_of(downward_swing(1_000, 50.0, 40.0));
    let detector = SwingDetector::new(SwingConfig::default());

    match detector.evaluate(&window) {
        Err(GestureRejection::BelowThreshold { criterion, value, .. }) => {
            assert_eq!(criterion, Criterion::CloseCoverage);
            assert_eq!(value, 0.0);
        }
        other => panic!("unexpected {:?}", other.map(|c| c.metrics)),
    }
}

#[test]
fn upward_motion_is_rejected() {
    let mut frames = downward_swing(1_000, 200.0, 40.0);
    let ts: Vec<u64> = frames.iter().map(|f| f.timestamp_ms).collect();
    frames.reverse();
    for (frame, ts) in frames.iter_mut().zip(ts) {
        frame.timestamp_ms = ts;
    }

    let detector = SwingDetector::new(SwingConfig::default());
    assert!(matches!(
        detector.evaluate(&window_of(frames)),
        Err(GestureRejection::BelowThreshold {
            criterion: Criterion::DownCoverage,
            ..
        })
    ));
}

#[test]
fn too_few_frames() {
    let frames = downward_swing(1_000, 200.0, 40.0).into_iter().take(2).collect();
    let detector = SwingDetector::new(SwingConfig::default());
    assert!(matches!(
        detector.evaluate(&window_of(frames)),
        Err(GestureRejection::NotEnoughSamples { found: 2 })
    ));
    assert_eq!(
        detector.evaluate(&PoseWindow::new(1.0)).err(),
        Some(GestureRejection::EmptyWindow)
    );
}

#[test]
fn missing_camera_still_reports_the_gesture() {
    let window = window_of(downward_swing(1_000, 200.0, 40.0));
    let mut detector = SwingDetector::new(SwingConfig::default());

    let mut world = TestWorld::without_camera();
    let owner = OwnerTransform::IDENTITY;
    let mapping = PoseMapping::default();
    let mut ctx = StrikeContext {
        world: &mut world,
        owner: PLAYER,
        owner_transform: &owner,
        mapping: &mapping,
    };
    let result = detector.detect(&window, &mut ctx).unwrap();
    assert_eq!(result.strike, Err(mirror_combat::combat::StrikeError::NoCameraView));
    assert!(world.damage.is_empty());
}

/// Sample on the frame grid without smoothing so every step of the input reaches the detector.
fn frame_grid() -> SignalConfig {
    SignalConfig {
        resample_hz: 1000.0 / FRAME_MS as f64,
        ema_alpha: 1.0,
        ..SignalConfig::conservative()
    }
}

#[test]
fn chopping_hands_are_rejected_for_reversals() {
    // mostly downward with two short pulls back up
    let steps = [(7, 40.0), (3, -30.0), (7, 40.0), (3, -30.0), (9, 40.0)];
    let mut mid = Vec2::new(CENTER_X, 200.0);
    let mut mids = vec![mid];
    for (count, dy) in steps {
        for _ in 0..count {
            mid.y += dy;
            mids.push(mid);
        }
    }
    assert_eq!(mids.len(), 30);
    let half = Vec2::new(20.0, 0.0);
    let frames = motion(1_000, 200.0, mids.into_iter().map(|m| (m - half, m + half)));

    let detector = SwingDetector::new(SwingConfig {
        signal: frame_grid(),
        ..Default::default()
    });
    match detector.evaluate(&window_of(frames.clone())) {
        Err(GestureRejection::TooManyReversals { count, max }) => {
            assert_eq!(count, 4);
            assert_eq!(max, 1);
        }
        Err(err) => panic!("unexpected rejection: {err:?}"),
        Ok(candidate) => panic!("accepted: {:?}", candidate.metrics),
    }

    let tolerant = SwingDetector::new(SwingConfig {
        signal: frame_grid(),
        max_vertical_reversals: 4,
        ..Default::default()
    });
    let window = window_of(frames);
    let candidate = tolerant.evaluate(&window).unwrap();
    assert_eq!(candidate.metrics.vertical_reversals, 4);
    assert!(candidate.metrics.down_delta > 3.6, "{:?}", candidate.metrics);
}
