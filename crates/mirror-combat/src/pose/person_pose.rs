use crate::pose::{coco, Side, BODY_KEYPOINT_COUNT};
use bevy::math::Vec2;

/// Below this shoulder width (in pixels) a person is treated as degenerate.
pub const MIN_SHOULDER_WIDTH: f32 = 1e-4;

/// One detected person in one frame, in image (pixel) space.
///
/// Keypoints are either absent (empty) or exactly [`BODY_KEYPOINT_COUNT`] long.
/// A non-finite coordinate marks a missing joint.
#[derive(Debug, Clone, PartialEq)]
pub struct PersonPose {
    pub id: u16,
    pub keypoints: Vec<Vec2>,
    pub confidences: Vec<f32>,
}

impl PersonPose {
    pub fn new(id: u16, keypoints: Vec<Vec2>, confidences: Vec<f32>) -> Self {
        Self { id, keypoints, confidences }
    }

    /// A person record without any keypoints.
    pub fn absent(id: u16) -> Self {
        Self {
            id,
            keypoints: Vec::new(),
            confidences: Vec::new(),
        }
    }

    pub fn is_complete(&self) -> bool {
        self.keypoints.len() == BODY_KEYPOINT_COUNT
    }

    /// Return the joint position if present and finite.
    pub fn joint(&self, index: usize) -> Option<Vec2> {
        self.keypoints.get(index).copied().filter(|p| p.is_finite())
    }

    pub fn confidence(&self, index: usize) -> f32 {
        self.confidences.get(index).copied().filter(|c| c.is_finite()).unwrap_or(0.0)
    }

    pub fn shoulder(&self, side: Side) -> Option<Vec2> {
        self.joint(side.shoulder())
    }

    pub fn elbow(&self, side: Side) -> Option<Vec2> {
        self.joint(side.elbow())
    }

    pub fn wrist(&self, side: Side) -> Option<Vec2> {
        self.joint(side.wrist())
    }

    /// Midpoint of the two hips.
    pub fn pelvis(&self) -> Option<Vec2> {
        let l = self.joint(coco::LEFT_HIP)?;
        let r = self.joint(coco::RIGHT_HIP)?;
        Some((l + r) * 0.5)
    }

    /// Midpoint of the two shoulders.
    pub fn shoulder_mid(&self) -> Option<Vec2> {
        let l = self.shoulder(Side::Left)?;
        let r = self.shoulder(Side::Right)?;
        Some((l + r) * 0.5)
    }

    /// Horizontal shoulder distance in pixels, the body scale used for normalization.
    pub fn shoulder_width(&self) -> Option<f32> {
        let l = self.shoulder(Side::Left)?;
        let r = self.shoulder(Side::Right)?;
        Some((r.x - l.x).abs())
    }

    /// Pixel distance between the two wrists.
    pub fn wrist_distance(&self) -> Option<f32> {
        let l = self.wrist(Side::Left)?;
        let r = self.wrist(Side::Right)?;
        Some(l.distance(r))
    }

    /// Sum of the confidences of both shoulders and both wrists.
    pub fn upper_body_confidence(&self) -> f32 {
        [
            coco::LEFT_SHOULDER,
            coco::RIGHT_SHOULDER,
            coco::LEFT_WRIST,
            coco::RIGHT_WRIST,
        ]
        .iter()
        .map(|&i| self.confidence(i))
        .sum()
    }

    /// Return the pose mirrored around the vertical line `x = axis_x` with left and right labels swapped.
    pub fn mirrored(&self, axis_x: f32) -> Self {
        let mut keypoints = self.keypoints.clone();
        let mut confidences = self.confidences.clone();
        for p in keypoints.iter_mut() {
            p.x = 2.0 * axis_x - p.x;
        }
        if self.is_complete() {
            // left/right pairs follow the nose, eyes are (1,2), ears (3,4) and so on
            for left in (1..BODY_KEYPOINT_COUNT).step_by(2) {
                keypoints.swap(left, left + 1);
                if confidences.len() == BODY_KEYPOINT_COUNT {
                    confidences.swap(left, left + 1);
                }
            }
        }
        Self {
            id: self.id,
            keypoints,
            confidences,
        }
    }
}
