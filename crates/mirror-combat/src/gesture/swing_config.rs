use crate::{
    combat::{ProjectileConfig, SweepConfig},
    pose::HandSource,
    signal::{HysteresisConfig, SignalConfig},
};
use serde::{Deserialize, Serialize};

/// Tuning of the two-handed downward swing. Speeds and distances are in shoulder widths.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct SwingConfig {
    pub recent_seconds: f32,
    pub cooldown_seconds: f32,
    pub hands_close_ratio: f32,
    pub signal: SignalConfig,

    pub min_close_coverage: f32,
    /// Downward speed a sample needs to count as moving down.
    pub down_speed_threshold: f32,
    pub min_down_coverage: f32,
    pub min_down_avg_speed: f32,
    pub min_down_peak_speed: f32,
    pub min_down_delta: f32,

    pub max_vertical_reversals: u32,
    pub reversal_dead_band: f32,
    pub reversal_hold_seconds: f32,

    pub hysteresis: HysteresisConfig,

    /// Arm the sweep follows, `Auto` takes the arm reaching further.
    pub arm: HandSource,
    /// The sweep anchor lies this fraction of the forearm beyond the wrist.
    pub forearm_extension: f32,
    pub sweep: SweepConfig,
}

impl Default for SwingConfig {
    fn default() -> Self {
        Self {
            recent_seconds: 1.0,
            cooldown_seconds: 0.2,
            hands_close_ratio: 0.6,
            signal: SignalConfig::conservative(),

            min_close_coverage: 0.2,
            down_speed_threshold: 0.4,
            min_down_coverage: 0.45,
            min_down_avg_speed: 0.55,
            min_down_peak_speed: 1.0,
            min_down_delta: 0.7,

            max_vertical_reversals: 1,
            reversal_dead_band: 0.2,
            reversal_hold_seconds: 0.06,

            hysteresis: HysteresisConfig::default(),

            arm: HandSource::Auto,
            forearm_extension: 0.25,
            sweep: SweepConfig {
                projectile: Some(ProjectileConfig::sword_wave()),
                ..SweepConfig::swing()
            },
        }
    }
}
