use serde::{Deserialize, Serialize};

/// Weapon the player holds, decided by the hand pose.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum WeaponKind {
    /// Both hands together on the hilt.
    Sword,
    /// Hands apart.
    #[default]
    Amulet,
}
