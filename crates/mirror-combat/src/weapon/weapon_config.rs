use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct WeaponConfig {
    /// Wrist distance, in shoulder widths, below which the sword is held.
    pub sword_hand_distance_ratio: f32,
}

impl Default for WeaponConfig {
    fn default() -> Self {
        Self {
            sword_hand_distance_ratio: 0.6,
        }
    }
}
