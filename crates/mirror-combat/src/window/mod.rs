mod person_selector;
mod pose_window;

pub use self::person_selector::*;
pub use self::pose_window::*;
