use crate::{
    combat::{ActorId, CameraView, CombatWorld, StrikeError},
    geometry::{OwnerTransform, PoseMapping, WORLD_FORWARD},
    gesture::{Cooldown, GestureRejection},
    pose::TimedPoseSnapshot,
    signal::{nearest_time_index, RunBounds},
    window::PoseWindow,
};
use bevy::math::{Vec2, Vec3};

/// Access to the host world while a recognized gesture is turned into a strike.
pub struct StrikeContext<'a, W>
where
    W: CombatWorld + ?Sized,
{
    pub world: &'a mut W,
    pub owner: ActorId,
    pub owner_transform: &'a OwnerTransform,
    pub mapping: &'a PoseMapping,
}

impl<W> StrikeContext<'_, W>
where
    W: CombatWorld + ?Sized,
{
    pub fn camera(&self) -> Result<CameraView, StrikeError> {
        let view = self.world.camera_view().ok_or(StrikeError::NoCameraView)?;
        Ok(CameraView {
            position: view.position,
            forward: view.forward.try_normalize().unwrap_or(WORLD_FORWARD),
        })
    }

    pub fn to_world(&self, pelvis: Vec2, joint: Vec2) -> Vec3 {
        self.mapping.to_world(pelvis, joint, self.owner_transform)
    }
}

/// Common entry guard: the window has data and the cooldown has elapsed. Returns the window time.
pub(crate) fn check_ready(window: &PoseWindow, cooldown: &Cooldown) -> Result<u64, GestureRejection> {
    let now = window.now();
    if window.is_empty() || now == 0 {
        return Err(GestureRejection::EmptyWindow);
    }
    let remaining_ms = cooldown.remaining_ms(now);
    if remaining_ms > 0 {
        return Err(GestureRejection::CoolingDown { remaining_ms });
    }
    Ok(now)
}

/// The evaluated span, at least 0.2s and at most the window.
pub(crate) fn recent_span(requested_s: f32, window: &PoseWindow) -> f32 {
    requested_s.max(0.2).min(window.window_seconds())
}

/// Mean body scale of a series, `None` if it is degenerate.
pub(crate) fn mean_scale(scales: impl ExactSizeIterator<Item = f32>) -> Option<f32> {
    let n = scales.len();
    if n == 0 {
        return None;
    }
    let mean = scales.map(|s| s.max(f32::EPSILON)).sum::<f32>() / n as f32;
    (mean > 1e-4).then_some(mean)
}

/// Snapshots a detector produced samples from, in time order.
pub(crate) struct SourceFrames<'a> {
    pub frames: Vec<&'a TimedPoseSnapshot>,
    times: Vec<f64>,
}

impl<'a> SourceFrames<'a> {
    pub fn new(frames: Vec<&'a TimedPoseSnapshot>) -> Self {
        let times = frames.iter().map(|s| s.time_s()).collect();
        Self { frames, times }
    }

    /// Map a resampled run onto the frames nearest in time.
    pub fn map_bounds(&self, sample_times: &[f64], bounds: RunBounds) -> Option<(usize, usize)> {
        let mut cursor = 0;
        let enter = nearest_time_index(&self.times, *sample_times.get(bounds.enter)?, &mut cursor)?;
        let exit = nearest_time_index(&self.times, *sample_times.get(bounds.exit)?, &mut cursor)?;
        Some((enter, exit.max(enter)))
    }

    /// Index of the frame nearest to a sample time.
    pub fn nearest(&self, t: f64) -> Option<usize> {
        let mut cursor = 0;
        nearest_time_index(&self.times, t, &mut cursor)
    }

    pub fn timestamp_ms(&self, index: usize) -> u64 {
        self.frames.get(index).map(|s| s.timestamp_ms).unwrap_or(0)
    }
}
