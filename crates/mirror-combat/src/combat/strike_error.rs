use thiserror::Error as ThisError;

/// Reasons a recognized gesture could not be turned into a strike in the world.
#[derive(Debug, Clone, PartialEq, Eq, ThisError)]
pub enum StrikeError {
    #[error("No camera view is available")]
    NoCameraView,
    #[error("Joints required for the strike are missing")]
    MissingJoints,
    #[error("The strike direction is degenerate")]
    DegenerateDirection,
}
