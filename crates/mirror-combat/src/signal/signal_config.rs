use crate::signal::{resample, smooth_ema, FlagPolicy, TrackSample};
use serde::{Deserialize, Serialize};

/// Resampling and smoothing applied to a detector's feature samples.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct SignalConfig {
    pub resample_hz: f64,
    pub ema_alpha: f32,
    pub flag_policy: FlagPolicy,
}

impl Default for SignalConfig {
    fn default() -> Self {
        Self::conservative()
    }
}

impl SignalConfig {
    pub fn conservative() -> Self {
        Self {
            resample_hz: 30.0,
            ema_alpha: 0.35,
            flag_policy: FlagPolicy::Conservative,
        }
    }

    pub fn nearest() -> Self {
        Self {
            flag_policy: FlagPolicy::Nearest,
            ..Self::conservative()
        }
    }

    pub fn dt(&self) -> f32 {
        (1.0 / self.resample_hz) as f32
    }

    /// Resample and smooth a series in one go.
    pub fn process<S: TrackSample>(&self, samples: &[S]) -> Vec<S> {
        let mut fixed = resample(samples, self.resample_hz, self.flag_policy);
        smooth_ema(&mut fixed, self.ema_alpha, self.flag_policy);
        fixed
    }
}
