use crate::{
    combat::{ProjectileConfig, SweepConfig},
    signal::SignalConfig,
};
use serde::{Deserialize, Serialize};

/// Tuning of the bow style pull. Distances are in shoulder widths.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ArrowConfig {
    pub cooldown_seconds: f32,
    pub hands_close_ratio: f32,
    pub signal: SignalConfig,

    /// Wrist distance the pull has to reach.
    pub far_ratio: f32,
    /// Growth of the wrist distance from its minimum to its maximum.
    pub min_delta: f32,
    /// Growth rate of the wrist distance, per second.
    pub min_speed: f32,

    pub sweep: SweepConfig,
}

impl Default for ArrowConfig {
    fn default() -> Self {
        Self {
            cooldown_seconds: 1.0,
            hands_close_ratio: 0.6,
            signal: SignalConfig::nearest(),
            far_ratio: 1.8,
            min_delta: 0.5,
            min_speed: 1.0,
            sweep: SweepConfig {
                projectile: Some(ProjectileConfig::arrow()),
                ..SweepConfig::arrow()
            },
        }
    }
}
