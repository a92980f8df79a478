use crate::window::seconds_to_ms;

/// Minimum re-issue interval of a detector, measured on the sender clock.
#[derive(Debug, Clone)]
pub struct Cooldown {
    duration_ms: u64,
    last_fired_ms: Option<u64>,
}

impl Cooldown {
    pub fn new(seconds: f32) -> Self {
        Self {
            duration_ms: seconds_to_ms(seconds),
            last_fired_ms: None,
        }
    }

    /// Time left before the detector may fire again. A sender clock running behind the last
    /// firing means the sender restarted and the cooldown is considered elapsed.
    pub fn remaining_ms(&self, now_ms: u64) -> u64 {
        match self.last_fired_ms {
            Some(last) if now_ms >= last => self.duration_ms.saturating_sub(now_ms - last),
            _ => 0,
        }
    }

    pub fn is_ready(&self, now_ms: u64) -> bool {
        self.remaining_ms(now_ms) == 0
    }

    pub fn stamp(&mut self, now_ms: u64) {
        self.last_fired_ms = Some(now_ms);
    }

    pub fn clear(&mut self) {
        self.last_fired_ms = None;
    }
}
