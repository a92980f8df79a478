use serde::{Deserialize, Serialize};

/// Speed thresholds bounding the fast part of a motion.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct HysteresisConfig {
    /// Normalized speed that starts the motion.
    pub enter_speed: f32,
    /// Normalized speed that ends the motion.
    pub exit_speed: f32,
    /// Time the speed has to stay above `enter_speed`.
    pub hold_fast_s: f32,
    /// Time the speed has to stay below `exit_speed`.
    pub hold_still_s: f32,
}

impl Default for HysteresisConfig {
    fn default() -> Self {
        Self {
            enter_speed: 0.8,
            exit_speed: 0.4,
            hold_fast_s: 0.06,
            hold_still_s: 0.06,
        }
    }
}

/// Index of the sample where the condition has held for `hold_s`, searching from `start`.
///
/// `above` selects the condition `value >= threshold`, otherwise `value <= threshold`.
pub fn find_run(values: &[f32], start: usize, threshold: f32, hold_s: f32, dt: f32, above: bool) -> Option<usize> {
    let mut held = 0.0;
    for (i, &v) in values.iter().enumerate().skip(start) {
        let pass = if above { v >= threshold } else { v <= threshold };
        if pass {
            if i > 0 {
                held += dt;
            }
            if held >= hold_s {
                return Some(i);
            }
        } else {
            held = 0.0;
        }
    }
    None
}

/// Sample indices bounding a motion, see [`enter_exit`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RunBounds {
    pub enter: usize,
    pub exit: usize,
}

/// Find where the speed sustainably rises above the enter threshold and later sustainably
/// falls below the exit threshold.
///
/// Without an enter run the motion starts at the first sample, without an exit run it lasts
/// until the last one. The returned indices point one sample past the detected transitions.
pub fn enter_exit(speeds: &[f32], dt: f32, config: &HysteresisConfig) -> Option<RunBounds> {
    if speeds.is_empty() {
        return None;
    }
    let last = speeds.len() - 1;

    let enter = find_run(speeds, 1, config.enter_speed, config.hold_fast_s, dt, true).unwrap_or(0);
    let exit = find_run(speeds, (enter + 1).max(1), config.exit_speed, config.hold_still_s, dt, false).unwrap_or(last);

    Some(RunBounds {
        enter: (enter + 1).min(last),
        exit: (exit + 1).min(last),
    })
}

/// Map a time to the index of the nearest entry of the sorted `times`, advancing a cursor.
///
/// Calls with non-decreasing times walk the slice once.
pub fn nearest_time_index(times: &[f64], t: f64, cursor: &mut usize) -> Option<usize> {
    if times.is_empty() {
        return None;
    }
    let last = times.len() - 1;
    *cursor = (*cursor).min(last);
    while *cursor < last && times[*cursor + 1] <= t {
        *cursor += 1;
    }
    let a = *cursor;
    let b = (a + 1).min(last);
    if (times[b] - t).abs() < (times[a] - t).abs() {
        Some(b)
    } else {
        Some(a)
    }
}
