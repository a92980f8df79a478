use crate::{
    combat::{sweep_and_damage, CombatWorld, StrikeError, SweepPlane},
    geometry::PlaneBasis,
    gesture::{
        check_ready, mean_scale, ArrowConfig, Cooldown, Criterion, GestureKind, GestureRejection, GestureResult,
        SourceFrames, Strike, StrikeContext, MIN_SAMPLES,
    },
    pose::Side,
    signal::{Interpolate, TrackSample},
    window::{select_player, PoseWindow},
};

#[derive(Debug, Clone, PartialEq)]
struct SpanSample {
    t: f64,
    wrist_distance: f32,
    shoulder_width: f32,
    close: bool,
}

impl TrackSample for SpanSample {
    fn time(&self) -> f64 {
        self.t
    }

    fn flag(&self) -> bool {
        self.close
    }

    fn lerp(&self, other: &Self, t: f32) -> Self {
        Self {
            wrist_distance: self.wrist_distance.interpolate(other.wrist_distance, t),
            shoulder_width: self.shoulder_width.interpolate(other.shoulder_width, t),
            ..self.clone()
        }
    }

    fn with_time_and_flag(self, t: f64, close: bool) -> Self {
        Self { t, close, ..self }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct ArrowMetrics {
    /// Smallest and largest wrist distance, in shoulder widths.
    pub min_stretch: f32,
    pub max_stretch: f32,
    /// Growth rate from the smallest to the largest stretch.
    pub speed: f32,
}

pub struct ArrowCandidate<'a> {
    pub now_ms: u64,
    pub metrics: ArrowMetrics,
    /// Frames of the least and the most stretched pose.
    pub enter_index: usize,
    pub exit_index: usize,
    frames: SourceFrames<'a>,
}

/// Detects the hands starting together and pulling apart quickly, like drawing a bow.
#[derive(Debug, Clone)]
pub struct ArrowDetector {
    config: ArrowConfig,
    cooldown: Cooldown,
}

impl ArrowDetector {
    pub fn new(config: ArrowConfig) -> Self {
        let cooldown = Cooldown::new(config.cooldown_seconds);
        Self { config, cooldown }
    }

    pub fn config(&self) -> &ArrowConfig {
        &self.config
    }

    /// Evaluate the whole window.
    pub fn evaluate<'a>(&self, window: &'a PoseWindow) -> Result<ArrowCandidate<'a>, GestureRejection> {
        let cfg = &self.config;
        let now_ms = check_ready(window, &self.cooldown)?;

        let mut frames = Vec::new();
        let mut samples = Vec::new();
        for snapshot in window.recent(window.window_seconds()) {
            let Some((_, span)) = select_player(&snapshot.persons) else {
                continue;
            };
            samples.push(SpanSample {
                t: snapshot.time_s(),
                wrist_distance: span.wrist_distance,
                shoulder_width: span.shoulder_width,
                close: span.is_close(cfg.hands_close_ratio),
            });
            frames.push(snapshot);
        }
        if samples.len() < MIN_SAMPLES {
            return Err(GestureRejection::NotEnoughSamples { found: samples.len() });
        }
        // a single close frame is enough, check before resampling may step over it
        if !samples.iter().any(|s| s.close) {
            return Err(GestureRejection::NeverClose);
        }

        let u = cfg.signal.process(&samples);
        if u.len() < MIN_SAMPLES {
            return Err(GestureRejection::NotEnoughSamples { found: u.len() });
        }
        let scale = mean_scale(u.iter().map(|s| s.shoulder_width)).ok_or(GestureRejection::DegenerateScale)?;

        let (mut lo, mut hi) = (0, 0);
        for (i, s) in u.iter().enumerate() {
            if s.wrist_distance < u[lo].wrist_distance {
                lo = i;
            }
            if s.wrist_distance > u[hi].wrist_distance {
                hi = i;
            }
        }

        let min_stretch = u[lo].wrist_distance / scale;
        let max_stretch = u[hi].wrist_distance / scale;
        let delta = max_stretch - min_stretch;
        let elapsed = (u[hi].t - u[lo].t) as f32;
        let speed = if elapsed > 0.0 { delta / elapsed } else { 0.0 };
        let metrics = ArrowMetrics {
            min_stretch,
            max_stretch,
            speed,
        };
        log::trace!("arrow metrics: {metrics:?}");

        if max_stretch < cfg.far_ratio {
            return Err(GestureRejection::below(Criterion::Stretch, max_stretch, cfg.far_ratio));
        }
        if delta < cfg.min_delta {
            return Err(GestureRejection::below(Criterion::StretchDelta, delta, cfg.min_delta));
        }
        if speed < cfg.min_speed {
            return Err(GestureRejection::TooSlow { avg: speed, peak: speed });
        }

        let frames = SourceFrames::new(frames);
        let enter_index = frames.nearest(u[lo].t).unwrap_or(0);
        let exit_index = frames.nearest(u[hi].t).unwrap_or(enter_index);

        Ok(ArrowCandidate {
            now_ms,
            metrics,
            enter_index,
            exit_index,
            frames,
        })
    }

    /// A single plane centered on the shoulder of the more extended arm in the newest frame.
    pub fn strike<W>(&self, window: &PoseWindow, ctx: &mut StrikeContext<'_, W>) -> Result<(Side, Strike), StrikeError>
    where
        W: CombatWorld + ?Sized,
    {
        let camera = ctx.camera()?;
        let latest = window.latest().ok_or(StrikeError::MissingJoints)?;
        let (person, _) = select_player(&latest.persons).ok_or(StrikeError::MissingJoints)?;

        let reach = |side: Side| -> Option<f32> { Some(person.shoulder(side)?.distance(person.wrist(side)?)) };
        let side = match (reach(Side::Left), reach(Side::Right)) {
            (Some(l), Some(r)) if l > r => Side::Left,
            (Some(_), Some(_)) => Side::Right,
            _ => return Err(StrikeError::MissingJoints),
        };

        let pelvis = person.pelvis().ok_or(StrikeError::MissingJoints)?;
        let shoulder = person.shoulder(side).ok_or(StrikeError::MissingJoints)?;
        let wrist = person.wrist(side).ok_or(StrikeError::MissingJoints)?;
        let shoulder = ctx.to_world(pelvis, shoulder);
        let wrist = ctx.to_world(pelvis, wrist);

        let direction = (wrist - shoulder).try_normalize().unwrap_or(camera.forward);
        let basis = PlaneBasis::from_camera_and_axis(camera.forward, direction);
        let plane = SweepPlane::new(shoulder, &basis, 0.0, direction);
        let sweep = sweep_and_damage(&mut *ctx.world, ctx.owner, &[plane], &self.config.sweep);

        Ok((
            side,
            Strike {
                anchor: shoulder,
                direction,
                basis,
                sweep,
            },
        ))
    }

    pub fn detect<W>(&mut self, window: &PoseWindow, ctx: &mut StrikeContext<'_, W>) -> Result<GestureResult, GestureRejection>
    where
        W: CombatWorld + ?Sized,
    {
        let candidate = self.evaluate(window)?;
        self.cooldown.stamp(candidate.now_ms);
        log::info!(
            "Arrow at {}ms: stretch {:.2} -> {:.2} at {:.2}/s",
            candidate.now_ms,
            candidate.metrics.min_stretch,
            candidate.metrics.max_stretch,
            candidate.metrics.speed
        );

        let (hand, strike) = match self.strike(window, ctx) {
            Ok((side, strike)) => (Some(side), Ok(strike)),
            Err(err) => {
                log::warn!("Arrow recognized without a strike: {err}");
                (None, Err(err))
            }
        };

        Ok(GestureResult {
            kind: GestureKind::Arrow,
            timestamp_ms: candidate.now_ms,
            enter_index: candidate.enter_index,
            exit_index: candidate.exit_index,
            enter_timestamp_ms: candidate.frames.timestamp_ms(candidate.enter_index),
            exit_timestamp_ms: candidate.frames.timestamp_ms(candidate.exit_index),
            hand,
            strike,
        })
    }
}
