use crate::pose::{PersonPose, Side};
use bevy::math::Vec2;

/// Handedness tag carried by a hand record.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Handedness {
    Right,
    Left,
    Unknown,
}

impl Handedness {
    pub fn from_wire(value: u8) -> Self {
        match value {
            0 => Handedness::Right,
            1 => Handedness::Left,
            _ => Handedness::Unknown,
        }
    }

    pub fn to_wire(self) -> u8 {
        match self {
            Handedness::Right => 0,
            Handedness::Left => 1,
            Handedness::Unknown => 2,
        }
    }

    pub fn side(self) -> Option<Side> {
        match self {
            Handedness::Right => Some(Side::Right),
            Handedness::Left => Some(Side::Left),
            Handedness::Unknown => None,
        }
    }
}

/// One detected hand in one frame.
#[derive(Debug, Clone, PartialEq)]
pub struct HandPose {
    pub hand_id: u16,
    /// The person this hand belongs to, if the producer could associate it.
    pub person_id: Option<u16>,
    pub handedness: Handedness,
    pub score: f32,
    /// Mean of the finite keypoints, non-finite if there is none.
    pub center: Vec2,
    pub keypoints: Vec<Vec2>,
    pub confidences: Vec<f32>,
}

impl HandPose {
    pub fn new(hand_id: u16, handedness: Handedness, score: f32, keypoints: Vec<Vec2>, confidences: Vec<f32>) -> Self {
        let center = Self::center_of(&keypoints);
        Self {
            hand_id,
            person_id: None,
            handedness,
            score,
            center,
            keypoints,
            confidences,
        }
    }

    pub fn with_person(mut self, person_id: u16) -> Self {
        self.person_id = Some(person_id);
        self
    }

    fn center_of(keypoints: &[Vec2]) -> Vec2 {
        let (sum, count) = keypoints
            .iter()
            .filter(|p| p.is_finite())
            .fold((Vec2::ZERO, 0usize), |(sum, count), p| (sum + *p, count + 1));
        if count == 0 {
            Vec2::NAN
        } else {
            sum / count as f32
        }
    }

    pub fn finite_center(&self) -> Option<Vec2> {
        Some(self.center).filter(|c| c.is_finite())
    }
}

/// Find the hand record best describing the given wrist of a person.
///
/// Preference order: same person and side, then same person nearest to the wrist,
/// then any hand nearest to the wrist.
pub fn find_hand_center(hands: &[HandPose], person: &PersonPose, side: Side) -> Option<Vec2> {
    let wrist = person.wrist(side)?;

    let exact = hands
        .iter()
        .filter(|h| h.person_id == Some(person.id) && h.handedness.side() == Some(side))
        .find_map(HandPose::finite_center);
    if exact.is_some() {
        return exact;
    }

    nearest_center(hands.iter().filter(|h| h.person_id == Some(person.id)), wrist)
        .or_else(|| nearest_center(hands.iter(), wrist))
}

fn nearest_center<'a>(candidates: impl Iterator<Item = &'a HandPose>, to: Vec2) -> Option<Vec2> {
    candidates
        .filter_map(HandPose::finite_center)
        .min_by(|a, b| a.distance_squared(to).total_cmp(&b.distance_squared(to)))
}
