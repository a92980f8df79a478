#![allow(dead_code)]

use bevy::math::Vec2;
use mirror_combat::pose::{coco, PersonPose, TimedPoseSnapshot, BODY_KEYPOINT_COUNT};

pub const CENTER_X: f32 = 640.0;
pub const SHOULDER_Y: f32 = 150.0;
pub const FRAME_MS: u64 = 33;

/// An upright person facing the camera with every joint present.
pub fn person(id: u16, shoulder_width: f32, left_wrist: Vec2, right_wrist: Vec2) -> PersonPose {
    let half = shoulder_width / 2.0;
    let left_shoulder = Vec2::new(CENTER_X - half, SHOULDER_Y);
    let right_shoulder = Vec2::new(CENTER_X + half, SHOULDER_Y);

    let mut keypoints = vec![Vec2::ZERO; BODY_KEYPOINT_COUNT];
    keypoints[coco::NOSE] = Vec2::new(CENTER_X, SHOULDER_Y - 80.0);
    keypoints[coco::LEFT_EYE] = Vec2::new(CENTER_X - 15.0, SHOULDER_Y - 95.0);
    keypoints[coco::RIGHT_EYE] = Vec2::new(CENTER_X + 15.0, SHOULDER_Y - 95.0);
    keypoints[coco::LEFT_EAR] = Vec2::new(CENTER_X - 30.0, SHOULDER_Y - 85.0);
    keypoints[coco::RIGHT_EAR] = Vec2::new(CENTER_X + 30.0, SHOULDER_Y - 85.0);
    keypoints[coco::LEFT_SHOULDER] = left_shoulder;
    keypoints[coco::RIGHT_SHOULDER] = right_shoulder;
    keypoints[coco::LEFT_ELBOW] = (left_shoulder + left_wrist) * 0.5 - Vec2::new(10.0, 0.0);
    keypoints[coco::RIGHT_ELBOW] = (right_shoulder + right_wrist) * 0.5 + Vec2::new(10.0, 0.0);
    keypoints[coco::LEFT_WRIST] = left_wrist;
    keypoints[coco::RIGHT_WRIST] = right_wrist;
    keypoints[coco::LEFT_HIP] = Vec2::new(CENTER_X - half * 0.8, SHOULDER_Y + 250.0);
    keypoints[coco::RIGHT_HIP] = Vec2::new(CENTER_X + half * 0.8, SHOULDER_Y + 250.0);
    keypoints[coco::LEFT_KNEE] = Vec2::new(CENTER_X - half * 0.8, SHOULDER_Y + 450.0);
    keypoints[coco::RIGHT_KNEE] = Vec2::new(CENTER_X + half * 0.8, SHOULDER_Y + 450.0);
    keypoints[coco::LEFT_ANKLE] = Vec2::new(CENTER_X - half * 0.8, SHOULDER_Y + 650.0);
    keypoints[coco::RIGHT_ANKLE] = Vec2::new(CENTER_X + half * 0.8, SHOULDER_Y + 650.0);

    PersonPose::new(id, keypoints, vec![0.9; BODY_KEYPOINT_COUNT])
}

pub fn frame(timestamp_ms: u64, persons: Vec<PersonPose>) -> TimedPoseSnapshot {
    TimedPoseSnapshot::new(timestamp_ms, persons)
}

/// Frames `FRAME_MS` apart with the wrists given for each step.
pub fn motion(start_ms: u64, shoulder_width: f32, wrists: impl IntoIterator<Item = (Vec2, Vec2)>) -> Vec<TimedPoseSnapshot> {
    wrists
        .into_iter()
        .enumerate()
        .map(|(i, (l, r))| frame(start_ms + i as u64 * FRAME_MS, vec![person(1, shoulder_width, l, r)]))
        .collect()
}

/// 30 frames moving the wrist midpoint from (640, 200) down to (640, 500) with the wrists `wrist_gap` apart.
pub fn downward_swing(start_ms: u64, shoulder_width: f32, wrist_gap: f32) -> Vec<TimedPoseSnapshot> {
    let wrists = (0..30).map(|i| {
        let mid = Vec2::new(CENTER_X, 200.0 + 300.0 * i as f32 / 29.0);
        let half = Vec2::new(wrist_gap / 2.0, 0.0);
        (mid - half, mid + half)
    });
    motion(start_ms, shoulder_width, wrists)
}

/// Hands together for 5 frames, the right one pulled out to two shoulder widths in 10 frames, then held for 5.
pub fn arrow_pull(start_ms: u64, shoulder_width: f32) -> Vec<TimedPoseSnapshot> {
    let left = Vec2::new(CENTER_X - 10.0, 250.0);
    let wrists = (0..20).map(|i| {
        let t = (i as f32 - 4.0).clamp(0.0, 10.0) / 10.0;
        let gap = 20.0 + (2.0 * shoulder_width - 20.0) * t;
        (left, left + Vec2::new(gap, 0.0))
    });
    motion(start_ms, shoulder_width, wrists)
}

/// The right hand swings out and up from the belly while the left one rests at the hip.
pub fn outward_swing(start_ms: u64, shoulder_width: f32) -> Vec<TimedPoseSnapshot> {
    let left = Vec2::new(CENTER_X - 100.0, 350.0);
    let from = Vec2::new(CENTER_X + 60.0, 300.0);
    let to = Vec2::new(CENTER_X + 360.0, 150.0);
    let wrists = (0..23).map(|i| {
        let t = (i as f32 - 4.0).clamp(0.0, 10.0) / 10.0;
        (left, from.lerp(to, t))
    });
    motion(start_ms, shoulder_width, wrists)
}

/// Mirror every frame around the vertical center line of the image.
pub fn mirrored(frames: &[TimedPoseSnapshot]) -> Vec<TimedPoseSnapshot> {
    frames
        .iter()
        .map(|s| frame(s.timestamp_ms, s.persons.iter().map(|p| p.mirrored(CENTER_X)).collect()))
        .collect()
}
