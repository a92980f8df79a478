mod classifier_event;
mod combat_config;
mod config_error;
mod pose_classifier;

pub use self::classifier_event::*;
pub use self::combat_config::*;
pub use self::config_error::*;
pub use self::pose_classifier::*;
