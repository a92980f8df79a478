use serde::{Deserialize, Serialize};

/// How the boolean state of a sample survives resampling and smoothing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum FlagPolicy {
    /// Between two samples both must hold. Smoothing requires the previous raw sample to hold as well.
    #[default]
    Conservative,
    /// Take the nearer sample. Smoothing leaves the flag untouched.
    Nearest,
}

impl FlagPolicy {
    /// Flag of a point at `a` in [0,1] between two samples.
    pub fn blend(self, from: bool, to: bool, a: f32) -> bool {
        match self {
            FlagPolicy::Conservative if a <= 0.0 => from,
            FlagPolicy::Conservative if a >= 1.0 => to,
            FlagPolicy::Conservative => from && to,
            FlagPolicy::Nearest => {
                if a < 0.5 {
                    from
                } else {
                    to
                }
            }
        }
    }

    /// Smoothed flag given the previous and the current raw flag.
    pub fn smooth(self, previous: bool, current: bool) -> bool {
        match self {
            FlagPolicy::Conservative => previous && current,
            FlagPolicy::Nearest => current,
        }
    }
}

/// A timed feature sample: continuous channels (positions, body scale) plus one boolean state.
pub trait TrackSample: Clone {
    /// Sample time in seconds.
    fn time(&self) -> f64;

    fn flag(&self) -> bool;

    /// Blend the continuous channels. Time and flag are taken from `self`.
    fn lerp(&self, other: &Self, t: f32) -> Self;

    fn with_time_and_flag(self, time: f64, flag: bool) -> Self;
}
