use std::ops::{Add, Div, Mul};

use glam::{Vec2, Vec4};
use serde::{Deserialize, Serialize};

/// Values that can be blended between two keyframes.
pub trait Interpolatable: Copy + Clone + Sized {
    fn interpolate_linear(start: Self, end: Self, t: f32) -> Self;
}

/// Values that a per-path aggregator can sum and normalise.
///
/// The accumulator is kept separate from `Self` so that non-additive types
/// (`bool`) can still take part in weighted aggregation.
pub trait Blendable: Copy + Default {
    type Accumulator: Copy;

    fn zero_accumulator() -> Self::Accumulator;

    /// Adds `value * scale` to the running sum.
    fn accumulate(acc: Self::Accumulator, value: Self, scale: f32) -> Self::Accumulator;

    /// Turns the running sum back into a value by dividing by `weight_sum`.
    fn resolve(acc: Self::Accumulator, weight_sum: f32) -> Self;
}

/// Axis-aligned rectangle, e.g. a layout frame or a sprite's texture source.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Rect {
    pub min: Vec2,
    pub max: Vec2,
}

impl Rect {
    #[must_use]
    pub const fn new(min: Vec2, max: Vec2) -> Self {
        Self { min, max }
    }

    #[must_use]
    pub fn from_ltrb(left: f32, top: f32, right: f32, bottom: f32) -> Self {
        Self {
            min: Vec2::new(left, top),
            max: Vec2::new(right, bottom),
        }
    }

    #[must_use]
    pub fn size(&self) -> Vec2 {
        self.max - self.min
    }
}

impl Add for Rect {
    type Output = Self;

    fn add(self, rhs: Self) -> Self {
        Self::new(self.min + rhs.min, self.max + rhs.max)
    }
}

impl Mul<f32> for Rect {
    type Output = Self;

    fn mul(self, rhs: f32) -> Self {
        Self::new(self.min * rhs, self.max * rhs)
    }
}

impl Div<f32> for Rect {
    type Output = Self;

    fn div(self, rhs: f32) -> Self {
        Self::new(self.min / rhs, self.max / rhs)
    }
}

impl Interpolatable for f32 {
    fn interpolate_linear(start: Self, end: Self, t: f32) -> Self {
        start + (end - start) * t
    }
}

impl Interpolatable for Vec2 {
    fn interpolate_linear(start: Self, end: Self, t: f32) -> Self {
        start.lerp(end, t)
    }
}

impl Interpolatable for Vec4 {
    fn interpolate_linear(start: Self, end: Self, t: f32) -> Self {
        start.lerp(end, t)
    }
}

impl Interpolatable for Rect {
    fn interpolate_linear(start: Self, end: Self, t: f32) -> Self {
        Self::new(start.min.lerp(end.min, t), start.max.lerp(end.max, t))
    }
}

impl Interpolatable for bool {
    // Switches only once the next key is fully reached.
    fn interpolate_linear(start: Self, end: Self, t: f32) -> Self {
        if t >= 1.0 { end } else { start }
    }
}

macro_rules! impl_additive_blendable {
    ($($ty:ty),* $(,)?) => {
        $(
            impl Blendable for $ty {
                type Accumulator = $ty;

                fn zero_accumulator() -> Self::Accumulator {
                    <$ty>::default()
                }

                fn accumulate(acc: Self::Accumulator, value: Self, scale: f32) -> Self::Accumulator {
                    acc + value * scale
                }

                fn resolve(acc: Self::Accumulator, weight_sum: f32) -> Self {
                    acc / weight_sum
                }
            }
        )*
    };
}

impl_additive_blendable!(f32, Vec2, Vec4, Rect);

impl Blendable for bool {
    type Accumulator = f32;

    fn zero_accumulator() -> Self::Accumulator {
        0.0
    }

    fn accumulate(acc: Self::Accumulator, value: Self, scale: f32) -> Self::Accumulator {
        if value { acc + scale } else { acc }
    }

    fn resolve(acc: Self::Accumulator, weight_sum: f32) -> Self {
        acc / weight_sum >= 0.5
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn bool_switches_at_segment_end() {
        assert!(!bool::interpolate_linear(false, true, 0.99));
        assert!(bool::interpolate_linear(false, true, 1.0));
    }

    #[test]
    fn bool_resolves_by_majority() {
        let acc = bool::accumulate(bool::zero_accumulator(), true, 1.0);
        let acc = bool::accumulate(acc, false, 1.0);
        assert!(bool::resolve(acc, 2.0));

        let acc = bool::accumulate(bool::zero_accumulator(), true, 0.2);
        let acc = bool::accumulate(acc, false, 0.8);
        assert!(!bool::resolve(acc, 1.0));
    }

    #[test]
    fn rect_lerp_moves_both_corners() {
        let a = Rect::from_ltrb(0.0, 0.0, 10.0, 10.0);
        let b = Rect::from_ltrb(10.0, 10.0, 30.0, 50.0);
        let mid = Rect::interpolate_linear(a, b, 0.5);
        assert_eq!(mid, Rect::from_ltrb(5.0, 5.0, 20.0, 30.0));
        assert_eq!(mid.size(), Vec2::new(15.0, 25.0));
    }
}
