use crate::{
    classifier::ConfigError,
    combat::SweepConfig,
    geometry::PoseMapping,
    gesture::{ArrowConfig, SingleSwingConfig, SwingConfig},
    signal::SignalConfig,
    weapon::WeaponConfig,
};
use serde::{Deserialize, Serialize};

/// Complete tuning of a pose classifier.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct CombatConfig {
    pub window_seconds: f32,
    pub mapping: PoseMapping,
    pub weapon: WeaponConfig,
    pub swing: SwingConfig,
    pub arrow: ArrowConfig,
    pub single_swing: SingleSwingConfig,
}

impl Default for CombatConfig {
    fn default() -> Self {
        Self {
            window_seconds: 1.0,
            mapping: PoseMapping::default(),
            weapon: WeaponConfig::default(),
            swing: SwingConfig::default(),
            arrow: ArrowConfig::default(),
            single_swing: SingleSwingConfig::default(),
        }
    }
}

fn validate_signal(prefix: &'static str, signal: &SignalConfig) -> Result<(), ConfigError> {
    ConfigError::positive(prefix, signal.resample_hz)?;
    ConfigError::in_range(prefix, signal.ema_alpha, 0.0, 1.0)
}

fn validate_sweep(field: &'static str, sweep: &SweepConfig) -> Result<(), ConfigError> {
    if sweep.min_planes > sweep.max_planes {
        return Err(ConfigError::PlaneCount {
            field,
            min: sweep.min_planes,
            max: sweep.max_planes,
        });
    }
    ConfigError::positive(field, sweep.degrees_per_plane)
}

impl CombatConfig {
    /// Check the values the algorithms cannot work with.
    pub fn validate(&self) -> Result<(), ConfigError> {
        ConfigError::positive("windowSeconds", self.window_seconds)?;
        ConfigError::positive("mapping.pixelToUu", self.mapping.pixel_to_uu)?;
        ConfigError::positive("weapon.swordHandDistanceRatio", self.weapon.sword_hand_distance_ratio)?;

        let swing = &self.swing;
        ConfigError::positive("swing.recentSeconds", swing.recent_seconds)?;
        ConfigError::positive("swing.handsCloseRatio", swing.hands_close_ratio)?;
        ConfigError::in_range("swing.minCloseCoverage", swing.min_close_coverage, 0.0, 1.0)?;
        ConfigError::in_range("swing.minDownCoverage", swing.min_down_coverage, 0.0, 1.0)?;
        validate_signal("swing.signal", &swing.signal)?;
        validate_sweep("swing.sweep", &swing.sweep)?;

        let arrow = &self.arrow;
        ConfigError::positive("arrow.handsCloseRatio", arrow.hands_close_ratio)?;
        ConfigError::positive("arrow.farRatio", arrow.far_ratio)?;
        validate_signal("arrow.signal", &arrow.signal)?;
        validate_sweep("arrow.sweep", &arrow.sweep)?;

        let single = &self.single_swing;
        ConfigError::positive("singleSwing.recentSeconds", single.recent_seconds)?;
        ConfigError::positive("singleSwing.handsCloseRatio", single.hands_close_ratio)?;
        ConfigError::in_range("singleSwing.minOpenCoverage", single.min_open_coverage, 0.0, 1.0)?;
        validate_signal("singleSwing.signal", &single.signal)?;
        validate_sweep("singleSwing.sweep", &single.sweep)?;

        Ok(())
    }
}
