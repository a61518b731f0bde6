//! Bezier segment approximation.
//!
//! Every segment between two neighbouring keys is described by a cubic bezier
//! in a normalised unit square: `(0, 0)` is the segment's start key and
//! `(1, 1)` its end key. Instead of solving the cubic for `x` at evaluation
//! time, the curve is sampled once into a fixed table of points and the
//! evaluator interpolates linearly between the two samples that bracket `x`.

use glam::Vec2;

/// Number of samples stored per segment.
pub const APPROXIMATION_SAMPLES: usize = 20;

const DEGENERATE_SPAN: f32 = 1e-6;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SegmentApproximation {
    points: [Vec2; APPROXIMATION_SAMPLES],
    discrete: bool,
}

impl Default for SegmentApproximation {
    fn default() -> Self {
        Self::linear()
    }
}

impl SegmentApproximation {
    /// Straight line from `(0, 0)` to `(1, 1)`.
    #[must_use]
    pub fn linear() -> Self {
        Self::from_handles(Vec2::ZERO, Vec2::ONE)
    }

    /// Segment that holds its start value until the next key is reached.
    #[must_use]
    pub fn discrete() -> Self {
        Self {
            discrete: true,
            ..Self::linear()
        }
    }

    /// Samples the bezier `(0,0) -> out_handle -> in_handle -> (1,1)`.
    ///
    /// Handle `x` coordinates are clamped into `[0, 1]`, which keeps the curve
    /// a function of `x`; the sampled `x` column is additionally forced to be
    /// non-decreasing to absorb rounding.
    #[must_use]
    pub fn from_handles(out_handle: Vec2, in_handle: Vec2) -> Self {
        let p1 = Vec2::new(out_handle.x.clamp(0.0, 1.0), out_handle.y);
        let p2 = Vec2::new(in_handle.x.clamp(0.0, 1.0), in_handle.y);

        let mut points = [Vec2::ZERO; APPROXIMATION_SAMPLES];
        let last = APPROXIMATION_SAMPLES - 1;
        let mut prev_x = 0.0_f32;

        for (i, point) in points.iter_mut().enumerate() {
            let t = i as f32 / last as f32;
            let mut p = cubic_bezier(Vec2::ZERO, p1, p2, Vec2::ONE, t);
            p.x = p.x.max(prev_x);
            prev_x = p.x;
            *point = p;
        }

        points[0] = Vec2::ZERO;
        points[last] = Vec2::ONE;

        Self {
            points,
            discrete: false,
        }
    }

    #[must_use]
    pub fn points(&self) -> &[Vec2; APPROXIMATION_SAMPLES] {
        &self.points
    }

    #[must_use]
    pub fn is_discrete(&self) -> bool {
        self.discrete
    }

    /// Returns the normalised value coefficient at normalised position `x`.
    #[must_use]
    pub fn sample(&self, x: f32) -> f32 {
        if self.discrete {
            return if x >= 1.0 { 1.0 } else { 0.0 };
        }
        if x <= 0.0 {
            return self.points[0].y;
        }
        if x >= 1.0 {
            return self.points[APPROXIMATION_SAMPLES - 1].y;
        }

        // Fine bracket: first sample at or past `x`.
        let mut i = 1;
        while i < APPROXIMATION_SAMPLES - 1 && self.points[i].x < x {
            i += 1;
        }

        let a = self.points[i - 1];
        let b = self.points[i];
        let span = b.x - a.x;
        if span <= DEGENERATE_SPAN {
            return b.y;
        }

        a.y + (b.y - a.y) * ((x - a.x) / span)
    }
}

fn cubic_bezier(p0: Vec2, p1: Vec2, p2: Vec2, p3: Vec2, t: f32) -> Vec2 {
    let u = 1.0 - t;
    p0 * (u * u * u) + p1 * (3.0 * u * u * t) + p2 * (3.0 * u * t * t) + p3 * (t * t * t)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn linear_segment_is_identity() {
        let seg = SegmentApproximation::linear();
        for i in 0..=10 {
            let x = i as f32 / 10.0;
            assert!((seg.sample(x) - x).abs() < 1e-5, "x={x}");
        }
    }

    #[test]
    fn samples_are_monotonic_in_x() {
        let seg = SegmentApproximation::from_handles(Vec2::new(1.0, 0.0), Vec2::new(0.0, 1.0));
        let points = seg.points();
        assert!(points.windows(2).all(|w| w[0].x <= w[1].x));
        assert_eq!(points[0], Vec2::ZERO);
        assert_eq!(points[APPROXIMATION_SAMPLES - 1], Vec2::ONE);
    }

    #[test]
    fn ease_in_out_has_no_overshoot() {
        let seg = SegmentApproximation::from_handles(Vec2::new(0.4, 0.0), Vec2::new(0.6, 1.0));
        let mut prev = 0.0;
        for i in 0..=100 {
            let y = seg.sample(i as f32 / 100.0);
            assert!((0.0..=1.0).contains(&y));
            assert!(y >= prev - 1e-6);
            prev = y;
        }
        assert!(seg.sample(0.25) < 0.25);
        assert!(seg.sample(0.75) > 0.75);
    }

    #[test]
    fn discrete_holds_until_end() {
        let seg = SegmentApproximation::discrete();
        assert_eq!(seg.sample(0.0), 0.0);
        assert_eq!(seg.sample(0.999), 0.0);
        assert_eq!(seg.sample(1.0), 1.0);
    }
}
