use crate::{gesture::GestureResult, weapon::WeaponKind};

/// Notifications of a classifier in the order they happened.
#[derive(Debug, Clone, PartialEq)]
pub enum ClassifierEvent {
    /// A snapshot was appended to the window.
    WindowUpdated { timestamp_ms: u64, len: usize },
    WeaponChanged { from: WeaponKind, to: WeaponKind },
    GestureDetected(GestureResult),
}
