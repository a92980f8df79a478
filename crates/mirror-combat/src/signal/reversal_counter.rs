/// Counts direction reversals of a velocity signal with a dwell-time debounce.
///
/// A velocity inside the dead band resets the dwell. A sign change only counts once the
/// previous sign was held for at least `hold_s`, shorter flips are ignored as jitter.
#[derive(Debug, Clone)]
pub struct ReversalCounter {
    dead_band: f32,
    hold_s: f32,
    sign: i8,
    held_s: f32,
    reversals: u32,
}

impl ReversalCounter {
    pub fn new(dead_band: f32, hold_s: f32) -> Self {
        Self {
            dead_band: dead_band.abs(),
            hold_s,
            sign: 0,
            held_s: 0.0,
            reversals: 0,
        }
    }

    pub fn push(&mut self, velocity: f32, dt: f32) {
        let sign = if velocity > self.dead_band {
            1
        } else if velocity < -self.dead_band {
            -1
        } else {
            0
        };

        if sign == 0 {
            self.held_s = 0.0;
        } else if self.sign == 0 || sign == self.sign {
            self.held_s += dt;
            self.sign = sign;
        } else if self.held_s >= self.hold_s {
            self.reversals += 1;
            self.sign = sign;
            self.held_s = 0.0;
        }
    }

    pub fn reversals(&self) -> u32 {
        self.reversals
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use mirror_test::test;

    const DT: f32 = 1.0 / 30.0;

    fn count(velocities: &[f32]) -> u32 {
        let mut counter = ReversalCounter::new(0.2, 0.06);
        for v in velocities {
            counter.push(*v, DT);
        }
        counter.reversals()
    }

    #[test]
    fn monotonic_motion_has_no_reversal() {
        assert_eq!(count(&[1.0; 20]), 0);
        assert_eq!(count(&[0.1, -0.1, 0.15, -0.05]), 0);
    }

    #[test]
    fn held_direction_change_counts() {
        assert_eq!(count(&[1.0, 1.0, 1.0, -1.0, -1.0, -1.0]), 1);
        assert_eq!(count(&[1.0, 1.0, 1.0, -1.0, -1.0, -1.0, 1.0, 1.0]), 2);
    }

    #[test]
    fn jitter_is_ignored() {
        // a single frame in one direction is shorter than the dwell time
        assert_eq!(count(&[1.0, -1.0, -1.0, -1.0]), 0);
        // the dead band resets the dwell
        assert_eq!(count(&[1.0, 1.0, 0.0, -1.0, -1.0]), 0);
    }
}
