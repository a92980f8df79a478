use crate::{
    combat::{sweep_and_damage, translating_sweep, CombatWorld, StrikeError},
    geometry::{PlaneBasis, NEARLY_ZERO},
    gesture::{
        check_ready, mean_scale, recent_span, Cooldown, Criterion, GestureKind, GestureRejection, GestureResult,
        SingleSwingConfig, SourceFrames, Strike, StrikeContext, MIN_SAMPLES,
    },
    pose::{find_hand_center, Side},
    signal::{enter_exit, Interpolate, ReversalCounter, RunBounds, TrackSample},
    window::{select_player, PoseWindow},
};
use bevy::math::Vec2;

#[derive(Debug, Clone, PartialEq)]
struct ArmsSample {
    t: f64,
    left: Vec2,
    right: Vec2,
    /// Shoulder midpoint.
    center: Vec2,
    shoulder_width: f32,
    open: bool,
}

impl ArmsSample {
    fn wrist(&self, side: Side) -> Vec2 {
        match side {
            Side::Left => self.left,
            Side::Right => self.right,
        }
    }

    /// Distance of a wrist from the body center, unnormalized.
    fn radius(&self, side: Side) -> f32 {
        self.wrist(side).distance(self.center)
    }
}

impl TrackSample for ArmsSample {
    fn time(&self) -> f64 {
        self.t
    }

    fn flag(&self) -> bool {
        self.open
    }

    fn lerp(&self, other: &Self, t: f32) -> Self {
        Self {
            left: self.left.interpolate(other.left, t),
            right: self.right.interpolate(other.right, t),
            center: self.center.interpolate(other.center, t),
            shoulder_width: self.shoulder_width.interpolate(other.shoulder_width, t),
            ..self.clone()
        }
    }

    fn with_time_and_flag(self, t: f64, open: bool) -> Self {
        Self { t, open, ..self }
    }
}

/// Kinematics of one hand over the evaluated span.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct HandMetrics {
    /// Peak and average speed measured while the hands are open.
    pub peak_speed: f32,
    pub avg_speed: f32,
    pub displacement: f32,
    pub net_radial: f32,
    /// Sum of the radial growth, shrinking does not count.
    pub outward_path: f32,
    pub radial_reversals: u32,
}

impl HandMetrics {
    fn measure(u: &[ArmsSample], side: Side, scale: f32, dt: f32, dead_band: f32, hold_s: f32) -> (Self, Vec<f32>) {
        let mut speeds = vec![0.0; u.len()];
        let mut metrics = HandMetrics::default();
        let mut open_speed_sum = 0.0;
        let mut open_count = 0;
        let mut reversals = ReversalCounter::new(dead_band, hold_s);

        for i in 1..u.len() {
            let speed = u[i].wrist(side).distance(u[i - 1].wrist(side)) / dt / scale;
            speeds[i] = speed;
            if u[i].open {
                metrics.peak_speed = metrics.peak_speed.max(speed);
                open_speed_sum += speed;
                open_count += 1;
            }

            let dr = (u[i].radius(side) - u[i - 1].radius(side)) / scale;
            if dr > 0.0 {
                metrics.outward_path += dr;
            }
            reversals.push(dr / dt, dt);
        }

        let (first, last) = (&u[0], &u[u.len() - 1]);
        if open_count > 0 {
            metrics.avg_speed = open_speed_sum / open_count as f32;
        }
        metrics.displacement = last.wrist(side).distance(first.wrist(side)) / scale;
        metrics.net_radial = (last.radius(side) - first.radius(side)) / scale;
        metrics.radial_reversals = reversals.reversals();
        (metrics, speeds)
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct SingleSwingMetrics {
    pub open_coverage: f32,
    pub left: HandMetrics,
    pub right: HandMetrics,
}

pub struct SingleSwingCandidate<'a> {
    pub now_ms: u64,
    pub metrics: SingleSwingMetrics,
    pub hand: Side,
    /// Image space movement of the hand between the enter and exit frames.
    pub image_direction: Vec2,
    pub enter_index: usize,
    pub exit_index: usize,
    frames: SourceFrames<'a>,
}

/// Detects one hand swinging away from the body while the hands are held apart.
#[derive(Debug, Clone)]
pub struct SingleSwingDetector {
    config: SingleSwingConfig,
    cooldown: Cooldown,
}

impl SingleSwingDetector {
    pub fn new(config: SingleSwingConfig) -> Self {
        let cooldown = Cooldown::new(config.cooldown_seconds);
        Self { config, cooldown }
    }

    pub fn config(&self) -> &SingleSwingConfig {
        &self.config
    }

    /// Pick the hand: the forced one, else the faster one, ties go to the better average.
    fn pick_hand(&self, left: &HandMetrics, right: &HandMetrics) -> Side {
        if let Some(side) = self.config.hand.forced() {
            return side;
        }
        let peak_diff = left.peak_speed - right.peak_speed;
        if peak_diff.abs() > 1e-3 {
            if peak_diff > 0.0 {
                Side::Left
            } else {
                Side::Right
            }
        } else if left.avg_speed >= right.avg_speed {
            Side::Left
        } else {
            Side::Right
        }
    }

    pub fn evaluate<'a>(&self, window: &'a PoseWindow) -> Result<SingleSwingCandidate<'a>, GestureRejection> {
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
            let (Some(left), Some(right), Some(center)) =
                (person.wrist(Side::Left), person.wrist(Side::Right), person.shoulder_mid())
            else {
                continue;
            };

            // the detected hand centers stand in for the wrists when available
            let (mut left, mut right) = (left, right);
            if cfg.use_hand_centers && !snapshot.hands.is_empty() {
                left = find_hand_center(&snapshot.hands, person, Side::Left).unwrap_or(left);
                right = find_hand_center(&snapshot.hands, person, Side::Right).unwrap_or(right);
            }
            let close = left.distance(right) / span.shoulder_width <= cfg.hands_close_ratio;

            samples.push(ArmsSample {
                t: snapshot.time_s(),
                left,
                right,
                center,
                shoulder_width: span.shoulder_width,
                open: !close,
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
        let dt = cfg.signal.dt();

        let open_coverage = u.iter().filter(|s| s.open).count() as f32 / u.len() as f32;
        if open_coverage < cfg.min_open_coverage {
            return Err(GestureRejection::below(Criterion::OpenCoverage, open_coverage, cfg.min_open_coverage));
        }

        let scale = mean_scale(u.iter().map(|s| s.shoulder_width)).ok_or(GestureRejection::DegenerateScale)?;
        let measure = |side| HandMetrics::measure(&u, side, scale, dt, cfg.reversal_dead_band, cfg.reversal_hold_seconds);
        let (left, left_speeds) = measure(Side::Left);
        let (right, right_speeds) = measure(Side::Right);

        let hand = self.pick_hand(&left, &right);
        let (chosen, speeds) = match hand {
            Side::Left => (&left, left_speeds),
            Side::Right => (&right, right_speeds),
        };
        log::trace!("single swing {hand:?} metrics: {chosen:?}");

        if chosen.displacement < cfg.min_displacement {
            return Err(GestureRejection::below(Criterion::Displacement, chosen.displacement, cfg.min_displacement));
        }
        if chosen.avg_speed < cfg.min_avg_speed && chosen.peak_speed < cfg.min_peak_speed {
            return Err(GestureRejection::TooSlow {
                avg: chosen.avg_speed,
                peak: chosen.peak_speed,
            });
        }
        if chosen.net_radial < cfg.min_net_radial {
            return Err(GestureRejection::below(Criterion::NetRadial, chosen.net_radial, cfg.min_net_radial));
        }
        if chosen.outward_path < cfg.min_outward_path {
            return Err(GestureRejection::below(Criterion::OutwardPath, chosen.outward_path, cfg.min_outward_path));
        }
        if chosen.radial_reversals > cfg.max_radial_reversals {
            return Err(GestureRejection::TooManyReversals {
                count: chosen.radial_reversals,
                max: cfg.max_radial_reversals,
            });
        }

        let bounds = enter_exit(&speeds, dt, &cfg.hysteresis).unwrap_or(RunBounds {
            enter: 0,
            exit: u.len() - 1,
        });
        let (enter, exit) = (&u[bounds.enter], &u[bounds.exit]);
        let movement = exit.wrist(hand) - enter.wrist(hand);
        if !Self::moves_outward(enter, exit, hand, scale, cfg.min_outward_gain) {
            return Err(GestureRejection::NotOutward);
        }

        let metrics = SingleSwingMetrics {
            open_coverage,
            left,
            right,
        };
        let frames = SourceFrames::new(frames);
        let times: Vec<f64> = u.iter().map(|s| s.t).collect();
        let (enter_index, exit_index) = frames
            .map_bounds(&times, bounds)
            .unwrap_or((0, frames.frames.len() - 1));

        Ok(SingleSwingCandidate {
            now_ms,
            metrics,
            hand,
            image_direction: movement,
            enter_index,
            exit_index,
            frames,
        })
    }

    /// The hand ends further out than it started and its movement points away from the body.
    fn moves_outward(enter: &ArmsSample, exit: &ArmsSample, side: Side, scale: f32, min_gain: f32) -> bool {
        let gain = (exit.radius(side) - enter.radius(side)) / scale;
        if gain < min_gain {
            return false;
        }

        let out_enter = enter.wrist(side) - enter.center;
        let out_exit = exit.wrist(side) - exit.center;
        let outward = ((out_enter + out_exit) * 0.5)
            .try_normalize()
            .or_else(|| out_exit.try_normalize());
        let movement = exit.wrist(side) - enter.wrist(side);
        outward.is_some_and(|o| movement.dot(o) > 0.0)
    }

    /// Translate a plane aligned with the movement from the enter to the exit position of the hand.
    pub fn strike<W>(
        &self,
        candidate: &SingleSwingCandidate<'_>,
        ctx: &mut StrikeContext<'_, W>,
    ) -> Result<Strike, StrikeError>
    where
        W: CombatWorld + ?Sized,
    {
        let camera = ctx.camera()?;
        let side = candidate.hand;
        let frames = &candidate.frames.frames;
        let enter = frames.get(candidate.enter_index).ok_or(StrikeError::MissingJoints)?;
        let exit = frames.get(candidate.exit_index).ok_or(StrikeError::MissingJoints)?;
        let (enter_person, _) = select_player(&enter.persons).ok_or(StrikeError::MissingJoints)?;
        let (exit_person, _) = select_player(&exit.persons).ok_or(StrikeError::MissingJoints)?;

        let enter_wrist = enter_person.wrist(side).ok_or(StrikeError::MissingJoints)?;
        let exit_wrist = exit_person.wrist(side).ok_or(StrikeError::MissingJoints)?;
        let image_direction = exit_wrist - enter_wrist;
        let image_direction = if image_direction.length() > NEARLY_ZERO {
            image_direction
        } else {
            candidate.image_direction
        };
        let direction = ctx.mapping.direction_to_world(image_direction, ctx.owner_transform);
        if direction.length_squared() < NEARLY_ZERO {
            return Err(StrikeError::DegenerateDirection);
        }

        let enter_pelvis = enter_person.pelvis().ok_or(StrikeError::MissingJoints)?;
        let exit_pelvis = exit_person.pelvis().ok_or(StrikeError::MissingJoints)?;
        let exit_elbow = exit_person.elbow(side).ok_or(StrikeError::MissingJoints)?;
        let start = ctx.to_world(enter_pelvis, enter_wrist);
        let end = ctx.to_world(exit_pelvis, exit_wrist);
        let offset = (end - ctx.to_world(exit_pelvis, exit_elbow)) * self.config.forearm_extension;

        let basis = PlaneBasis::from_camera_and_axis(camera.forward, direction);
        let planes = translating_sweep(start + offset, end + offset, &basis, &self.config.sweep);
        let sweep = sweep_and_damage(&mut *ctx.world, ctx.owner, &planes, &self.config.sweep);

        Ok(Strike {
            anchor: start + offset,
            direction,
            basis,
            sweep,
        })
    }

    pub fn detect<W>(&mut self, window: &PoseWindow, ctx: &mut StrikeContext<'_, W>) -> Result<GestureResult, GestureRejection>
    where
        W: CombatWorld + ?Sized,
    {
        let candidate = self.evaluate(window)?;
        self.cooldown.stamp(candidate.now_ms);
        log::info!(
            "Single swing of the {:?} hand at {}ms, open coverage {:.2}",
            candidate.hand,
            candidate.now_ms,
            candidate.metrics.open_coverage
        );

        let strike = self.strike(&candidate, ctx);
        if let Err(err) = &strike {
            log::warn!("Single swing recognized without a strike: {err}");
        }

        Ok(GestureResult {
            kind: GestureKind::SingleSwing,
            timestamp_ms: candidate.now_ms,
            enter_index: candidate.enter_index,
            exit_index: candidate.exit_index,
            enter_timestamp_ms: candidate.frames.timestamp_ms(candidate.enter_index),
            exit_timestamp_ms: candidate.frames.timestamp_ms(candidate.exit_index),
            hand: Some(candidate.hand),
            strike,
        })
    }
}
