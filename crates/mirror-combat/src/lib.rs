pub mod classifier;
pub mod combat;
pub mod geometry;
pub mod gesture;
pub mod pose;
pub mod protocol;
pub mod signal;
pub mod weapon;
pub mod window;
