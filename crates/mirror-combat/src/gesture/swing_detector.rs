use crate::{
    combat::{rotating_sweep, sweep_and_damage, CameraView, CombatWorld, StrikeError, SweepPose},
    geometry::PlaneBasis,
    gesture::{
        check_ready, mean_scale, recent_span, Cooldown, Criterion, GestureKind, GestureRejection, GestureResult,
        SourceFrames, Strike, StrikeContext, SwingConfig, MIN_SAMPLES,
    },
    pose::{Side, TimedPoseSnapshot},
    signal::{enter_exit, Interpolate, ReversalCounter, TrackSample},
    window::{select_player, PoseWindow},
};
use bevy::math::{Vec2, Vec3};

#[derive(Debug, Clone, PartialEq)]
struct SwingSample {
    t: f64,
    /// Midpoint of the wrists.
    mid: Vec2,
    shoulder_width: f32,
    close: bool,
}

impl TrackSample for SwingSample {
    fn time(&self) -> f64 {
        self.t
    }

    fn flag(&self) -> bool {
        self.close
    }

    fn lerp(&self, other: &Self, t: f32) -> Self {
        Self {
            mid: self.mid.interpolate(other.mid, t),
            shoulder_width: self.shoulder_width.interpolate(other.shoulder_width, t),
            ..self.clone()
        }
    }

    fn with_time_and_flag(self, t: f64, close: bool) -> Self {
        Self { t, close, ..self }
    }
}

/// Measured features of a swing candidate.
#[derive(Debug, Clone, PartialEq)]
pub struct SwingMetrics {
    pub close_coverage: f32,
    pub down_coverage: f32,
    pub down_delta: f32,
    pub avg_down_speed: f32,
    pub peak_down_speed: f32,
    pub vertical_reversals: u32,
}

/// A swing that passed every test and waits to be turned into a strike.
pub struct SwingCandidate<'a> {
    pub now_ms: u64,
    pub metrics: SwingMetrics,
    pub enter_index: usize,
    pub exit_index: usize,
    frames: SourceFrames<'a>,
}

/// Detects a two-handed downward swing performed with the hands held together.
#[derive(Debug, Clone)]
pub struct SwingDetector {
    config: SwingConfig,
    cooldown: Cooldown,
}

impl SwingDetector {
    pub fn new(config: SwingConfig) -> Self {
        let cooldown = Cooldown::new(config.cooldown_seconds);
        Self { config, cooldown }
    }

    pub fn config(&self) -> &SwingConfig {
        &self.config
    }

    pub fn evaluate<'a>(&self, window: &'a PoseWindow) -> Result<SwingCandidate<'a>, GestureRejection> {
        let cfg = &self.config;
        let now_ms = check_ready(window, &self.cooldown)?;

        let recent = window.recent(recent_span(cfg.recent_seconds, window));
        if recent.len() < MIN_SAMPLES {
            return Err(GestureRejection::NotEnoughSamples { found: recent.len() });
        }

        let mut frames = Vec::with_capacity(recent.len());
        let mut samples = Vec::with_capacity(recent.len());
        for snapshot in recent {
            let Some((person, span)) = select_player(&snapshot.persons) else {
                continue;
            };
            let (Some(lw), Some(rw)) = (person.wrist(Side::Left), person.wrist(Side::Right)) else {
                continue;
            };
            samples.push(SwingSample {
                t: snapshot.time_s(),
                mid: (lw + rw) * 0.5,
                shoulder_width: span.shoulder_width,
                close: span.is_close(cfg.hands_close_ratio),
            });
            frames.push(snapshot);
        }
        if samples.len() < MIN_SAMPLES {
            return Err(GestureRejection::NotEnoughSamples { found: samples.len() });
        }

        let u = cfg.signal.process(&samples);
        if u.len() < MIN_SAMPLES {
            return Err(GestureRejection::NotEnoughSamples { found: u.len() });
        }
        let n = u.len() as f32;
        let dt = cfg.signal.dt();

        let close_coverage = u.iter().filter(|s| s.close).count() as f32 / n;
        if close_coverage < cfg.min_close_coverage {
            return Err(GestureRejection::below(Criterion::CloseCoverage, close_coverage, cfg.min_close_coverage));
        }

        let scale = mean_scale(u.iter().map(|s| s.shoulder_width)).ok_or(GestureRejection::DegenerateScale)?;

        let mut down_path = 0.0;
        let mut peak_down_speed = 0.0f32;
        let mut down_count = 0;
        let mut reversals = ReversalCounter::new(cfg.reversal_dead_band, cfg.reversal_hold_seconds);
        let mut speeds = vec![0.0; u.len()];
        for i in 1..u.len() {
            let d = u[i].mid - u[i - 1].mid;
            // image y grows downward
            let vy = d.y / dt / scale;
            if vy > 0.0 {
                down_path += d.y / scale;
                peak_down_speed = peak_down_speed.max(vy);
            }
            if vy > cfg.down_speed_threshold {
                down_count += 1;
            }
            reversals.push(vy, dt);
            speeds[i] = d.length() / dt / scale;
        }

        let total_time = (u[u.len() - 1].t - u[0].t) as f32;
        if total_time <= 0.0 {
            return Err(GestureRejection::NotEnoughSamples { found: u.len() });
        }

        let metrics = SwingMetrics {
            close_coverage,
            down_coverage: down_count as f32 / n,
            down_delta: (u[u.len() - 1].mid.y - u[0].mid.y) / scale,
            avg_down_speed: down_path / total_time,
            peak_down_speed,
            vertical_reversals: reversals.reversals(),
        };
        log::trace!("swing metrics: {metrics:?}");

        if metrics.down_coverage < cfg.min_down_coverage {
            return Err(GestureRejection::below(Criterion::DownCoverage, metrics.down_coverage, cfg.min_down_coverage));
        }
        if metrics.down_delta < cfg.min_down_delta {
            return Err(GestureRejection::below(Criterion::DownDelta, metrics.down_delta, cfg.min_down_delta));
        }
        if metrics.avg_down_speed < cfg.min_down_avg_speed && metrics.peak_down_speed < cfg.min_down_peak_speed {
            return Err(GestureRejection::TooSlow {
                avg: metrics.avg_down_speed,
                peak: metrics.peak_down_speed,
            });
        }
        if metrics.vertical_reversals > cfg.max_vertical_reversals {
            return Err(GestureRejection::TooManyReversals {
                count: metrics.vertical_reversals,
                max: cfg.max_vertical_reversals,
            });
        }

        let frames = SourceFrames::new(frames);
        let times: Vec<f64> = u.iter().map(|s| s.t).collect();
        let (enter_index, exit_index) = enter_exit(&speeds, dt, &cfg.hysteresis)
            .and_then(|bounds| frames.map_bounds(&times, bounds))
            .unwrap_or((0, frames.frames.len() - 1));

        Ok(SwingCandidate {
            now_ms,
            metrics,
            enter_index,
            exit_index,
            frames,
        })
    }

    /// Sweep a rotating plane from the arm pose at the start of the swing to the pose at its end.
    pub fn strike<W>(&self, candidate: &SwingCandidate<'_>, ctx: &mut StrikeContext<'_, W>) -> Result<Strike, StrikeError>
    where
        W: CombatWorld + ?Sized,
    {
        let camera = ctx.camera()?;
        let frames = &candidate.frames.frames[candidate.enter_index..=candidate.exit_index];

        // the bounding frames may lack an elbow or a hip, take the nearest usable one inward
        let view: &StrikeContext<'_, W> = ctx;
        let start = frames
            .iter()
            .find_map(|s| self.arm_pose(s, &camera, view).ok())
            .ok_or(StrikeError::MissingJoints)?;
        let end = frames
            .iter()
            .rev()
            .find_map(|s| self.arm_pose(s, &camera, view).ok())
            .ok_or(StrikeError::MissingJoints)?;

        let planes = rotating_sweep(&start, &end, &self.config.sweep);
        let sweep = sweep_and_damage(&mut *ctx.world, ctx.owner, &planes, &self.config.sweep);

        Ok(Strike {
            anchor: start.anchor,
            direction: (end.anchor - start.anchor).try_normalize().unwrap_or(end.fire_direction),
            basis: start.basis,
            sweep,
        })
    }

    /// Plane pose of the extended arm in a frame.
    fn arm_pose<W>(&self, snapshot: &TimedPoseSnapshot, camera: &CameraView, ctx: &StrikeContext<'_, W>) -> Result<SweepPose, StrikeError>
    where
        W: CombatWorld + ?Sized,
    {
        let (person, _) = select_player(&snapshot.persons).ok_or(StrikeError::MissingJoints)?;
        let pelvis = person.pelvis().ok_or(StrikeError::MissingJoints)?;
        let joint = |index: usize| -> Result<Vec3, StrikeError> {
            let p = person.joint(index).ok_or(StrikeError::MissingJoints)?;
            Ok(ctx.to_world(pelvis, p))
        };

        let (ls, rs) = (joint(Side::Left.shoulder())?, joint(Side::Right.shoulder())?);
        let (lw, rw) = (joint(Side::Left.wrist())?, joint(Side::Right.wrist())?);
        let (le, re) = (joint(Side::Left.elbow())?, joint(Side::Right.elbow())?);

        let side = self.config.arm.forced().unwrap_or(if lw.distance(ls) >= rw.distance(rs) {
            Side::Left
        } else {
            Side::Right
        });
        let (shoulder, wrist) = match side {
            Side::Left => (ls, lw),
            Side::Right => (rs, rw),
        };
        let direction = (wrist - shoulder).try_normalize().ok_or(StrikeError::DegenerateDirection)?;

        // anchor on the wrist best aligned with the arm direction as seen from the shoulder middle
        let start = (ls + rs) * 0.5;
        let alignment = |w: Vec3| (w - start).normalize_or_zero().dot(direction);
        let (wrist, elbow) = if alignment(lw) >= alignment(rw) { (lw, le) } else { (rw, re) };

        Ok(SweepPose {
            anchor: wrist + (wrist - elbow) * self.config.forearm_extension,
            basis: PlaneBasis::from_camera_and_axis(camera.forward, direction),
            fire_direction: direction,
        })
    }

    pub fn detect<W>(&mut self, window: &PoseWindow, ctx: &mut StrikeContext<'_, W>) -> Result<GestureResult, GestureRejection>
    where
        W: CombatWorld + ?Sized,
    {
        let candidate = self.evaluate(window)?;
        self.cooldown.stamp(candidate.now_ms);
        log::info!(
            "Swing at {}ms: down delta {:.2}, avg {:.2}, peak {:.2}",
            candidate.now_ms,
            candidate.metrics.down_delta,
            candidate.metrics.avg_down_speed,
            candidate.metrics.peak_down_speed
        );

        let strike = self.strike(&candidate, ctx);
        if let Err(err) = &strike {
            log::warn!("Swing recognized without a strike: {err}");
        }

        Ok(GestureResult {
            kind: GestureKind::Swing,
            timestamp_ms: candidate.now_ms,
            enter_index: candidate.enter_index,
            exit_index: candidate.exit_index,
            enter_timestamp_ms: candidate.frames.timestamp_ms(candidate.enter_index),
            exit_timestamp_ms: candidate.frames.timestamp_ms(candidate.exit_index),
            hand: None,
            strike,
        })
    }
}
