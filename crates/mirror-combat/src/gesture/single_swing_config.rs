use crate::{
    combat::{ProjectileConfig, SweepConfig},
    pose::HandSource,
    signal::{HysteresisConfig, SignalConfig},
};
use serde::{Deserialize, Serialize};

/// Tuning of the single-hand outward swing. Speeds and distances are in shoulder widths.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct SingleSwingConfig {
    pub recent_seconds: f32,
    pub cooldown_seconds: f32,
    /// Hands closer than this are not open.
    pub hands_close_ratio: f32,
    pub signal: SignalConfig,

    /// Hand performing the swing, `Auto` takes the faster one.
    pub hand: HandSource,
    /// Track the detected hand centers instead of the wrists when available.
    pub use_hand_centers: bool,

    pub min_open_coverage: f32,
    pub min_peak_speed: f32,
    pub min_avg_speed: f32,
    pub min_displacement: f32,
    pub min_net_radial: f32,
    pub min_outward_path: f32,
    /// Radial growth required between the enter and the exit sample.
    pub min_outward_gain: f32,

    pub max_radial_reversals: u32,
    pub reversal_dead_band: f32,
    pub reversal_hold_seconds: f32,

    pub hysteresis: HysteresisConfig,

    pub forearm_extension: f32,
    pub sweep: SweepConfig,
}

impl Default for SingleSwingConfig {
    fn default() -> Self {
        Self {
            recent_seconds: 1.0,
            cooldown_seconds: 0.2,
            hands_close_ratio: 0.6,
            signal: SignalConfig::nearest(),

            hand: HandSource::Auto,
            use_hand_centers: true,

            min_open_coverage: 0.55,
            min_peak_speed: 1.5,
            min_avg_speed: 0.8,
            min_displacement: 0.6,
            min_net_radial: 0.3,
            min_outward_path: 0.5,
            min_outward_gain: 0.05,

            max_radial_reversals: 3,
            reversal_dead_band: 0.12,
            reversal_hold_seconds: 0.05,

            hysteresis: HysteresisConfig::default(),

            forearm_extension: 0.25,
            sweep: SweepConfig {
                projectile: Some(ProjectileConfig::amulet_orb()),
                ..SweepConfig::single_swing()
            },
        }
    }
}
