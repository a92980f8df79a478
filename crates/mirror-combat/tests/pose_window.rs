use mirror_combat::window::{IngestOutcome, PoseWindow};
use mirror_test::test;
use rand::{rngs::StdRng, Rng, SeedableRng};

#[path = "shared/poses.rs"]
mod poses;
pub use poses::*;

fn empty_frame(ts: u64) -> mirror_combat::pose::TimedPoseSnapshot {
    frame(ts, vec![])
}

#[test]
fn duplicates_and_missing_timestamps_are_skipped() {
    let mut window = PoseWindow::new(1.0);
    assert_eq!(window.ingest(empty_frame(0)), IngestOutcome::NoTimestamp);
    assert_eq!(window.ingest(empty_frame(100)), IngestOutcome::Appended);
    assert_eq!(window.ingest(empty_frame(100)), IngestOutcome::Duplicate);
    assert_eq!(window.len(), 1);
    assert_eq!(window.now(), 100);
}

#[test]
fn reordered_and_restarted_sender() {
    let mut window = PoseWindow::new(1.0);
    window.ingest(empty_frame(5_000));
    window.ingest(empty_frame(5_100));

    assert_eq!(window.ingest(empty_frame(5_050)), IngestOutcome::OutOfOrder);
    assert_eq!(window.len(), 2);
    assert_eq!(window.now(), 5_100);

    assert_eq!(window.ingest(empty_frame(40)), IngestOutcome::SenderRestarted);
    assert_eq!(window.len(), 1);
    assert_eq!(window.now(), 40);
}

#[test]
fn prune_keeps_the_recent_suffix() {
    let mut rng = StdRng::seed_from_u64(7);

    for _ in 0..50 {
        let mut window = PoseWindow::new(rng.random_range(0.1..2.0));
        let mut ts = rng.random_range(1..1_000u64);
        let mut ingested = Vec::new();
        for _ in 0..rng.random_range(1..80) {
            ts += rng.random_range(1..120u64);
            window.ingest(empty_frame(ts));
            ingested.push(ts);
        }

        let now = window.now();
        window.prune_old(now);

        let cutoff = now.saturating_sub(window.span_ms());
        let expected: Vec<u64> = ingested.iter().copied().filter(|&t| t >= cutoff).collect();
        let kept: Vec<u64> = window.iter().map(|s| s.timestamp_ms).collect();
        assert_eq!(kept, expected);
        assert!(kept.windows(2).all(|w| w[0] <= w[1]));
    }
}

#[test]
fn zero_window_clears_everything() {
    let mut window = PoseWindow::new(0.0);
    window.ingest(empty_frame(10));
    window.ingest(empty_frame(20));
    window.prune_old(20);
    assert!(window.is_empty());
}

#[test]
fn reset_keeps_deduplication() {
    let mut window = PoseWindow::new(1.0);
    window.ingest(empty_frame(10));
    window.reset();
    assert!(window.is_empty());
    assert_eq!(window.ingest(empty_frame(10)), IngestOutcome::Duplicate);
    assert_eq!(window.ingest(empty_frame(11)), IngestOutcome::Appended);
}

#[test]
fn recent_skips_empty_frames() {
    let mut window = PoseWindow::new(1.0);
    for s in downward_swing(1_000, 200.0, 40.0) {
        window.ingest(s);
    }
    window.ingest(empty_frame(window.now() + FRAME_MS));

    assert_eq!(window.recent(1.0).len(), 30);
    assert_eq!(window.recent(0.1).len(), 3);
    assert_eq!(window.total_persons(), 30);
    assert_eq!(window.dominant_person_id(), Some(1));
}
