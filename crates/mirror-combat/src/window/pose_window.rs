use crate::pose::{PersonPose, TimedPoseSnapshot};
use bevy::math::Vec2;
use itertools::Itertools;
use std::collections::VecDeque;

/// Outcome of offering a snapshot to the window.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum IngestOutcome {
    Appended,
    /// Same timestamp as the previously ingested snapshot.
    Duplicate,
    /// A zero timestamp, the sender has no clock yet.
    NoTimestamp,
    /// Older than the previously ingested snapshot.
    OutOfOrder,
    /// The sender clock jumped back by more than the window span, the window was restarted.
    SenderRestarted,
}

impl IngestOutcome {
    pub fn is_appended(self) -> bool {
        matches!(self, IngestOutcome::Appended | IngestOutcome::SenderRestarted)
    }
}

/// A time bounded FIFO of snapshots measured on the sender clock.
///
/// Timestamps in the window are non-decreasing and the window never holds two snapshots
/// with the timestamp of the last ingested one.
#[derive(Debug, Clone)]
pub struct PoseWindow {
    window_seconds: f32,
    snapshots: VecDeque<TimedPoseSnapshot>,
    last_ingested_ms: u64,
}

impl PoseWindow {
    pub fn new(window_seconds: f32) -> Self {
        Self {
            window_seconds,
            snapshots: VecDeque::new(),
            last_ingested_ms: 0,
        }
    }

    pub fn window_seconds(&self) -> f32 {
        self.window_seconds
    }

    /// Window span in milliseconds, 0 if the window keeps nothing.
    pub fn span_ms(&self) -> u64 {
        seconds_to_ms(self.window_seconds)
    }

    pub fn ingest(&mut self, snapshot: TimedPoseSnapshot) -> IngestOutcome {
        let ts = snapshot.timestamp_ms;
        if ts == 0 {
            return IngestOutcome::NoTimestamp;
        }
        if ts == self.last_ingested_ms {
            return IngestOutcome::Duplicate;
        }

        let mut outcome = IngestOutcome::Appended;
        if ts < self.last_ingested_ms {
            if self.last_ingested_ms - ts <= self.span_ms() {
                log::debug!("Dropping reordered snapshot {ts}ms, latest is {}ms", self.last_ingested_ms);
                return IngestOutcome::OutOfOrder;
            }
            log::info!("Sender clock restarted ({}ms -> {ts}ms), clearing window", self.last_ingested_ms);
            self.snapshots.clear();
            outcome = IngestOutcome::SenderRestarted;
        }

        self.last_ingested_ms = ts;
        self.snapshots.push_back(snapshot);
        outcome
    }

    /// Drop the snapshots older than the window span measured back from `now_ms`.
    pub fn prune_old(&mut self, now_ms: u64) {
        if self.window_seconds <= 0.0 {
            self.snapshots.clear();
            return;
        }

        let cutoff = now_ms.saturating_sub(self.span_ms());
        while self.snapshots.front().is_some_and(|s| s.timestamp_ms < cutoff) {
            self.snapshots.pop_front();
        }
    }

    /// Drop every snapshot, the deduplication state is kept.
    pub fn reset(&mut self) {
        self.snapshots.clear();
    }

    /// The current time of the window: the timestamp of the last ingested snapshot, 0 before any.
    pub fn now(&self) -> u64 {
        self.last_ingested_ms
    }

    pub fn len(&self) -> usize {
        self.snapshots.len()
    }

    pub fn is_empty(&self) -> bool {
        self.snapshots.is_empty()
    }

    pub fn iter(&self) -> impl DoubleEndedIterator<Item = &TimedPoseSnapshot> + ExactSizeIterator + '_ {
        self.snapshots.iter()
    }

    pub fn latest(&self) -> Option<&TimedPoseSnapshot> {
        self.snapshots.back()
    }

    /// Snapshots with at least one person within `seconds` of [`Self::now`].
    pub fn recent(&self, seconds: f32) -> Vec<&TimedPoseSnapshot> {
        let oldest = self.now().saturating_sub(seconds_to_ms(seconds));
        self.snapshots
            .iter()
            .filter(|s| s.timestamp_ms >= oldest && !s.persons.is_empty())
            .collect()
    }

    /// Total number of person records in the window.
    pub fn total_persons(&self) -> usize {
        self.snapshots.iter().map(|s| s.persons.len()).sum()
    }

    /// A joint of the first person of the newest snapshot.
    pub fn latest_joint(&self, index: usize) -> Option<Vec2> {
        self.latest()?.persons.first()?.joint(index)
    }

    /// The person id seen most often in the window, the smaller id wins a tie.
    pub fn dominant_person_id(&self) -> Option<u16> {
        self.snapshots
            .iter()
            .flat_map(|s| s.persons.iter().map(|p: &PersonPose| p.id))
            .counts()
            .into_iter()
            .max_by(|a, b| a.1.cmp(&b.1).then(b.0.cmp(&a.0)))
            .map(|(id, _)| id)
    }
}

impl Default for PoseWindow {
    fn default() -> Self {
        Self::new(1.0)
    }
}

/// Convert a duration to whole milliseconds, non-positive durations become 0.
pub fn seconds_to_ms(seconds: f32) -> u64 {
    if seconds > 0.0 {
        (seconds as f64 * 1000.0).round() as u64
    } else {
        0
    }
}
