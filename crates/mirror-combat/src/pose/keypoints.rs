use serde::{Deserialize, Serialize};

/// Number of body keypoints in a person record (COCO layout).
pub const BODY_KEYPOINT_COUNT: usize = 17;
/// Number of keypoints in a hand record.
pub const HAND_KEYPOINT_COUNT: usize = 21;

/// Body keypoint indices in the COCO ordering.
pub mod coco {
    pub const NOSE: usize = 0;
    pub const LEFT_EYE: usize = 1;
    pub const RIGHT_EYE: usize = 2;
    pub const LEFT_EAR: usize = 3;
    pub const RIGHT_EAR: usize = 4;
    pub const LEFT_SHOULDER: usize = 5;
    pub const RIGHT_SHOULDER: usize = 6;
    pub const LEFT_ELBOW: usize = 7;
    pub const RIGHT_ELBOW: usize = 8;
    pub const LEFT_WRIST: usize = 9;
    pub const RIGHT_WRIST: usize = 10;
    pub const LEFT_HIP: usize = 11;
    pub const RIGHT_HIP: usize = 12;
    pub const LEFT_KNEE: usize = 13;
    pub const RIGHT_KNEE: usize = 14;
    pub const LEFT_ANKLE: usize = 15;
    pub const RIGHT_ANKLE: usize = 16;
}

/// Body side of a limb, as labelled by the pose estimator.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum Side {
    Left,
    Right,
}

impl Side {
    pub fn opposite(self) -> Self {
        match self {
            Side::Left => Side::Right,
            Side::Right => Side::Left,
        }
    }

    pub fn shoulder(self) -> usize {
        match self {
            Side::Left => coco::LEFT_SHOULDER,
            Side::Right => coco::RIGHT_SHOULDER,
        }
    }

    pub fn elbow(self) -> usize {
        match self {
            Side::Left => coco::LEFT_ELBOW,
            Side::Right => coco::RIGHT_ELBOW,
        }
    }

    pub fn wrist(self) -> usize {
        match self {
            Side::Left => coco::LEFT_WRIST,
            Side::Right => coco::RIGHT_WRIST,
        }
    }
}

/// Which arm a detector should follow.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum HandSource {
    /// Let the detector pick the arm from the motion itself.
    #[default]
    Auto,
    Left,
    Right,
}

impl HandSource {
    pub fn forced(self) -> Option<Side> {
        match self {
            HandSource::Auto => None,
            HandSource::Left => Some(Side::Left),
            HandSource::Right => Some(Side::Right),
        }
    }
}
