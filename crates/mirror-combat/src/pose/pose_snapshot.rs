use crate::pose::{HandPose, PersonPose};

/// One received frame stamped with the sender clock.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct TimedPoseSnapshot {
    /// Sender-side timestamp in milliseconds, monotonic per sender.
    pub timestamp_ms: u64,
    pub persons: Vec<PersonPose>,
    pub hands: Vec<HandPose>,
}

impl TimedPoseSnapshot {
    pub fn new(timestamp_ms: u64, persons: Vec<PersonPose>) -> Self {
        Self {
            timestamp_ms,
            persons,
            hands: Vec::new(),
        }
    }

    pub fn with_hands(mut self, hands: Vec<HandPose>) -> Self {
        self.hands = hands;
        self
    }

    /// Sender time in seconds.
    pub fn time_s(&self) -> f64 {
        self.timestamp_ms as f64 * 0.001
    }
}
