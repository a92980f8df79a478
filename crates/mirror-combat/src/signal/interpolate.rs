use bevy::math::{Vec2, Vec3};

/// (Linear) interpolation trait for the channels of a tracked sample.
pub trait Interpolate: Copy {
    /// return interpolated value between `self` and `other` at `t`.
    /// For t = 0.0, returns `self`, for t = 1.0, returns `other`.
    fn interpolate(self, other: Self, t: f32) -> Self;
}

impl Interpolate for f32 {
    fn interpolate(self, other: Self, t: f32) -> Self {
        self * (1.0 - t) + other * t
    }
}

impl Interpolate for Vec2 {
    fn interpolate(self, other: Self, t: f32) -> Self {
        Vec2::lerp(self, other, t)
    }
}

impl Interpolate for Vec3 {
    fn interpolate(self, other: Self, t: f32) -> Self {
        Vec3::lerp(self, other, t)
    }
}
