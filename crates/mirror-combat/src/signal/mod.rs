mod hysteresis;
mod interpolate;
mod resample;
mod reversal_counter;
mod signal_config;
mod track_sample;

pub use self::hysteresis::*;
pub use self::interpolate::*;
pub use self::resample::*;
pub use self::reversal_counter::*;
pub use self::signal_config::*;
pub use self::track_sample::*;
