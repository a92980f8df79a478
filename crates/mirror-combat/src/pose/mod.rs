mod hand_pose;
mod keypoints;
mod person_pose;
mod pose_snapshot;

pub use self::hand_pose::*;
pub use self::keypoints::*;
pub use self::person_pose::*;
pub use self::pose_snapshot::*;
