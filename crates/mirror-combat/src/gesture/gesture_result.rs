use crate::{
    combat::{StrikeError, SweepOutcome},
    geometry::PlaneBasis,
    pose::Side,
    weapon::WeaponKind,
};
use bevy::math::Vec3;
use serde::{Deserialize, Serialize};
use thiserror::Error as ThisError;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum GestureKind {
    /// Two-handed downward sword swing.
    Swing,
    /// Bow style pull of the hands apart.
    Arrow,
    /// Single-hand outward amulet swing.
    SingleSwing,
}

impl GestureKind {
    /// If the gesture can be performed with the given weapon in hand.
    pub fn is_live(self, weapon: WeaponKind) -> bool {
        match self {
            GestureKind::Swing => weapon == WeaponKind::Sword,
            GestureKind::Arrow => true,
            GestureKind::SingleSwing => weapon == WeaponKind::Amulet,
        }
    }
}

/// Which feature test turned a candidate down.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Criterion {
    CloseCoverage,
    OpenCoverage,
    DownCoverage,
    DownDelta,
    Displacement,
    NetRadial,
    OutwardPath,
    Stretch,
    StretchDelta,
}

/// Why a detector did not report a gesture on this tick.
#[derive(Debug, Clone, PartialEq, ThisError)]
pub enum GestureRejection {
    #[error("The pose window is empty")]
    EmptyWindow,
    #[error("Cooling down for {remaining_ms}ms")]
    CoolingDown { remaining_ms: u64 },
    #[error("Only {found} usable samples")]
    NotEnoughSamples { found: usize },
    #[error("Shoulder width is degenerate")]
    DegenerateScale,
    #[error("{criterion:?} is {value:.3}, required {required:.3}")]
    BelowThreshold { criterion: Criterion, value: f32, required: f32 },
    #[error("Too slow: average {avg:.3}, peak {peak:.3}")]
    TooSlow { avg: f32, peak: f32 },
    #[error("Hands never came close")]
    NeverClose,
    #[error("{count} direction reversals, at most {max} allowed")]
    TooManyReversals { count: u32, max: u32 },
    #[error("The hand did not move away from the body")]
    NotOutward,
}

impl GestureRejection {
    pub fn below(criterion: Criterion, value: f32, required: f32) -> Self {
        GestureRejection::BelowThreshold {
            criterion,
            value,
            required,
        }
    }
}

/// The world side of a recognized gesture.
#[derive(Debug, Clone, PartialEq)]
pub struct Strike {
    pub anchor: Vec3,
    /// Unit movement direction in world space.
    pub direction: Vec3,
    /// Orientation of the (first) hit plane, `x` is its normal.
    pub basis: PlaneBasis,
    pub sweep: SweepOutcome,
}

/// A recognized gesture.
#[derive(Debug, Clone, PartialEq)]
pub struct GestureResult {
    pub kind: GestureKind,
    /// Sender time the gesture was recognized at.
    pub timestamp_ms: u64,
    /// Index of the snapshot the motion entered at, counted in the evaluated snapshots.
    pub enter_index: usize,
    pub exit_index: usize,
    pub enter_timestamp_ms: u64,
    pub exit_timestamp_ms: u64,
    pub hand: Option<Side>,
    pub strike: Result<Strike, StrikeError>,
}
