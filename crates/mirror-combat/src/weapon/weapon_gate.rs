use crate::{
    pose::{PersonPose, Side, TimedPoseSnapshot, MIN_SHOULDER_WIDTH},
    weapon::{WeaponConfig, WeaponKind},
};

/// Tracks the held weapon from the most confident person of each snapshot.
#[derive(Debug, Clone)]
pub struct WeaponGate {
    config: WeaponConfig,
    weapon: WeaponKind,
}

impl WeaponGate {
    pub fn new(config: WeaponConfig) -> Self {
        Self {
            config,
            weapon: WeaponKind::default(),
        }
    }

    pub fn config(&self) -> &WeaponConfig {
        &self.config
    }

    pub fn weapon(&self) -> WeaponKind {
        self.weapon
    }

    /// Force a weapon, for hosts overriding the pose based choice.
    pub fn set_weapon(&mut self, weapon: WeaponKind) {
        self.weapon = weapon;
    }

    /// Wrist distance over the shoulder distance of a person.
    pub fn hand_ratio(person: &PersonPose) -> Option<f32> {
        let shoulders = person.shoulder(Side::Left)?.distance(person.shoulder(Side::Right)?);
        if shoulders <= MIN_SHOULDER_WIDTH {
            return None;
        }
        Some(person.wrist_distance()? / shoulders)
    }

    /// Update from a snapshot, returning the new weapon when it changed.
    ///
    /// A snapshot without a measurable person keeps the current weapon.
    pub fn update(&mut self, snapshot: &TimedPoseSnapshot) -> Option<WeaponKind> {
        let person = snapshot
            .persons
            .iter()
            .filter(|p| p.is_complete())
            .max_by(|a, b| a.upper_body_confidence().total_cmp(&b.upper_body_confidence()))?;
        let ratio = Self::hand_ratio(person)?;

        let weapon = if ratio < self.config.sword_hand_distance_ratio {
            WeaponKind::Sword
        } else {
            WeaponKind::Amulet
        };
        if weapon == self.weapon {
            return None;
        }
        log::debug!("Weapon {:?} -> {:?} (hand ratio {ratio:.2})", self.weapon, weapon);
        self.weapon = weapon;
        Some(weapon)
    }
}
