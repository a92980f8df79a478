use crate::pose::{PersonPose, Side, MIN_SHOULDER_WIDTH};

/// Wrist separation of a person relative to their shoulder width.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct HandsSpan {
    pub shoulder_width: f32,
    pub wrist_distance: f32,
}

impl HandsSpan {
    /// Measure a person, requiring both wrists, both shoulders and a non-degenerate shoulder width.
    pub fn measure(person: &PersonPose) -> Option<Self> {
        if !person.is_complete() {
            return None;
        }
        let lw = person.wrist(Side::Left)?;
        let rw = person.wrist(Side::Right)?;
        let shoulder_width = person.shoulder_width()?;
        if shoulder_width <= MIN_SHOULDER_WIDTH {
            return None;
        }
        Some(Self {
            shoulder_width,
            wrist_distance: lw.distance(rw),
        })
    }

    /// Wrist distance in shoulder widths.
    pub fn normalized(&self) -> f32 {
        self.wrist_distance / self.shoulder_width
    }

    pub fn is_close(&self, hands_close_ratio: f32) -> bool {
        self.wrist_distance <= hands_close_ratio * self.shoulder_width
    }
}

/// Pick the person most likely to be the player: the one with the closest wrists.
///
/// There is no identity tracking, in a crowded frame the choice may change from frame to frame.
pub fn pick_best_person(persons: &[PersonPose]) -> Option<usize> {
    persons
        .iter()
        .enumerate()
        .filter_map(|(i, p)| HandsSpan::measure(p).map(|span| (i, span.wrist_distance)))
        .min_by(|a, b| a.1.total_cmp(&b.1))
        .map(|(i, _)| i)
}

/// Pick the best person and return it with its measurement.
pub fn select_player(persons: &[PersonPose]) -> Option<(&PersonPose, HandsSpan)> {
    let person = &persons[pick_best_person(persons)?];
    HandsSpan::measure(person).map(|span| (person, span))
}
