mod arrow_config;
mod arrow_detector;
mod cooldown;
mod gesture_detector;
mod gesture_result;
mod single_swing_config;
mod single_swing_detector;
mod strike_context;
mod swing_config;
mod swing_detector;

pub use self::arrow_config::*;
pub use self::arrow_detector::*;
pub use self::cooldown::*;
pub use self::gesture_detector::*;
pub use self::gesture_result::*;
pub use self::single_swing_config::*;
pub use self::single_swing_detector::*;
pub use self::strike_context::*;
pub use self::swing_config::*;
pub use self::swing_detector::*;

/// Minimum number of usable samples a detector needs.
pub const MIN_SAMPLES: usize = 3;
