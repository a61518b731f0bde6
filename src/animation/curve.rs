//! Scalar bezier curve.
//!
//! A [`Curve`] is an ordered list of [`CurveKey`]s. Each key carries two
//! support handles (bezier control points) expressed in value/position units
//! relative to the key. The curve is evaluated through the cached segment
//! tables of [`KeyList`], so evaluation never solves the cubic directly.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use crate::animation::approximation::SegmentApproximation;
use crate::animation::keys::{KEY_POSITION_EPSILON, KeyList, KeyLocation, Keyframe, SmoothingFrame, SupportHandles};
use crate::animation::values::Interpolatable;
use crate::errors::Result;

/// Handle length used by the easing presets, as a fraction of the segment.
const EASE_HANDLE_RATIO: f32 = 0.4;

const FLAT_SEGMENT_EPSILON: f32 = 1e-6;

/// How editing one support handle of a key affects the other.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum SupportType {
    /// Handles stay exactly opposite each other; `smooth_key` recomputes them.
    #[default]
    Smooth,
    /// Both handles are horizontal.
    Flat,
    /// Handles stay collinear but keep independent lengths.
    Free,
    /// Handles are independent.
    Broken,
    /// The value jumps at the next key instead of interpolating.
    Discrete,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CurveKey {
    pub position: f32,
    pub value: f32,
    /// Value offset of the incoming handle.
    pub left_offset: f32,
    /// Position offset of the incoming handle, `<= 0`.
    pub left_offset_position: f32,
    /// Value offset of the outgoing handle.
    pub right_offset: f32,
    /// Position offset of the outgoing handle, `>= 0`.
    pub right_offset_position: f32,
    pub support: SupportType,
}

impl CurveKey {
    /// A key with collapsed handles; neighbouring collapsed keys interpolate linearly.
    #[must_use]
    pub fn new(position: f32, value: f32) -> Self {
        Self {
            position,
            value,
            left_offset: 0.0,
            left_offset_position: 0.0,
            right_offset: 0.0,
            right_offset_position: 0.0,
            support: SupportType::Smooth,
        }
    }

    #[must_use]
    pub fn with_support(mut self, support: SupportType) -> Self {
        self.support = support;
        self
    }

    /// Sets both handles verbatim, without support-type propagation.
    #[must_use]
    pub fn with_handles(mut self, left: Vec2, right: Vec2) -> Self {
        self.left_offset_position = left.x.min(0.0);
        self.left_offset = left.y;
        self.right_offset_position = right.x.max(0.0);
        self.right_offset = right.y;
        self
    }

    #[must_use]
    pub fn left_handle(&self) -> Vec2 {
        Vec2::new(self.left_offset_position, self.left_offset)
    }

    #[must_use]
    pub fn right_handle(&self) -> Vec2 {
        Vec2::new(self.right_offset_position, self.right_offset)
    }

    /// Moves the incoming handle and propagates to the outgoing one per
    /// [`SupportType`].
    pub fn set_left_support(&mut self, offset_position: f32, offset: f32) {
        self.edit_left_handle(Vec2::new(offset_position, offset));
    }

    /// Moves the outgoing handle and propagates to the incoming one per
    /// [`SupportType`].
    pub fn set_right_support(&mut self, offset_position: f32, offset: f32) {
        self.edit_right_handle(Vec2::new(offset_position, offset));
    }
}

impl SupportHandles for CurveKey {
    fn support(&self) -> SupportType {
        self.support
    }

    fn handles(&self) -> (Vec2, Vec2) {
        (self.left_handle(), self.right_handle())
    }

    fn store_handles(&mut self, left: Vec2, right: Vec2) {
        self.left_offset_position = left.x.min(0.0);
        self.left_offset = left.y;
        self.right_offset_position = right.x.max(0.0);
        self.right_offset = right.y;
    }

    // Value units: the slope between the neighbours.
    fn smoothing_frame(&self, prev: Option<&Self>, next: Option<&Self>) -> SmoothingFrame {
        let slope = match (prev, next) {
            (Some(p), Some(n)) => (n.value - p.value) / (n.position - p.position),
            (None, Some(n)) => (n.value - self.value) / (n.position - self.position),
            (Some(p), None) => (self.value - p.value) / (self.position - p.position),
            (None, None) => 0.0,
        };
        SmoothingFrame {
            left_span: prev.map_or(0.0, |p| self.position - p.position),
            right_span: next.map_or(0.0, |n| n.position - self.position),
            slope,
        }
    }
}

impl Keyframe for CurveKey {
    fn position(&self) -> f32 {
        self.position
    }

    fn segment_to(&self, next: &Self) -> SegmentApproximation {
        if self.support == SupportType::Discrete {
            return SegmentApproximation::discrete();
        }

        let span = next.position - self.position;
        if span <= KEY_POSITION_EPSILON {
            return SegmentApproximation::linear();
        }

        let out_x = self.right_offset_position / span;
        let in_x = 1.0 + next.left_offset_position / span;

        let delta = next.value - self.value;
        // A flat segment blends between equal values; any y works, keep it linear.
        let (out_y, in_y) = if delta.abs() <= FLAT_SEGMENT_EPSILON {
            (out_x, in_x)
        } else {
            (self.right_offset / delta, 1.0 + next.left_offset / delta)
        };

        SegmentApproximation::from_handles(Vec2::new(out_x, out_y), Vec2::new(in_x, in_y))
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(from = "Vec<CurveKey>", into = "Vec<CurveKey>")]
pub struct Curve {
    keys: KeyList<CurveKey>,
}

impl From<Vec<CurveKey>> for Curve {
    fn from(keys: Vec<CurveKey>) -> Self {
        Self::from_keys(keys)
    }
}

impl From<Curve> for Vec<CurveKey> {
    fn from(curve: Curve) -> Self {
        curve.keys.keys().to_vec()
    }
}

impl Curve {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn from_keys(keys: Vec<CurveKey>) -> Self {
        Self {
            keys: KeyList::from_keys(keys),
        }
    }

    /// Straight line from `begin` to `end` over `duration`.
    #[must_use]
    pub fn linear(begin: f32, end: f32, duration: f32) -> Self {
        Self::from_keys(vec![CurveKey::new(0.0, begin), CurveKey::new(duration, end)])
    }

    /// Starts slowly and arrives at full speed.
    #[must_use]
    pub fn ease_in(begin: f32, end: f32, duration: f32) -> Self {
        Self::eased(begin, end, duration, EASE_HANDLE_RATIO, 0.0)
    }

    /// Starts at full speed and settles into `end`.
    #[must_use]
    pub fn ease_out(begin: f32, end: f32, duration: f32) -> Self {
        Self::eased(begin, end, duration, 0.0, EASE_HANDLE_RATIO)
    }

    #[must_use]
    pub fn ease_in_out(begin: f32, end: f32, duration: f32) -> Self {
        Self::eased(begin, end, duration, EASE_HANDLE_RATIO, EASE_HANDLE_RATIO)
    }

    fn eased(begin: f32, end: f32, duration: f32, out_ratio: f32, in_ratio: f32) -> Self {
        let first = CurveKey::new(0.0, begin)
            .with_support(SupportType::Free)
            .with_handles(Vec2::ZERO, Vec2::new(duration * out_ratio, 0.0));
        let last = CurveKey::new(duration, end)
            .with_support(SupportType::Free)
            .with_handles(Vec2::new(-duration * in_ratio, 0.0), Vec2::ZERO);
        Self::from_keys(vec![first, last])
    }

    #[must_use]
    pub fn keys(&self) -> &[CurveKey] {
        self.keys.keys()
    }

    pub fn set_keys(&mut self, keys: Vec<CurveKey>) {
        self.keys.set_keys(keys);
    }

    #[must_use]
    pub fn key(&self, index: usize) -> Option<&CurveKey> {
        self.keys.get(index)
    }

    #[must_use]
    pub fn key_index_at(&self, position: f32) -> Option<usize> {
        self.keys.index_of(position)
    }

    #[must_use]
    pub fn contains_key(&self, position: f32) -> bool {
        self.keys.index_of(position).is_some()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.keys.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.keys.is_empty()
    }

    /// Position of the last key.
    #[must_use]
    pub fn length(&self) -> f32 {
        self.keys.length()
    }

    pub fn insert_key(&mut self, key: CurveKey) -> Result<usize> {
        self.keys.insert(key)
    }

    /// Adds a key `offset` after the current last key.
    pub fn append_key(&mut self, offset: f32, value: f32) -> Result<usize> {
        let position = self.length() + offset.max(0.0);
        self.keys.insert(CurveKey::new(position, value))
    }

    pub fn remove_key(&mut self, position: f32) -> bool {
        let removed = self.keys.remove(position);
        if !removed {
            log::warn!("Curve has no key at position {position}");
        }
        removed
    }

    pub fn remove_key_at(&mut self, index: usize) -> bool {
        let removed = self.keys.remove_at(index);
        if !removed {
            log::warn!("Curve key index {index} out of range (len {})", self.keys.len());
        }
        removed
    }

    pub fn set_key(&mut self, key: CurveKey, index: usize) -> Result<usize> {
        self.keys.set(key, index)
    }

    /// Edits the incoming handle of the key at `index`.
    pub fn set_key_left_support(&mut self, index: usize, offset_position: f32, offset: f32) -> bool {
        self.keys
            .edit_left_handle(index, Vec2::new(offset_position, offset))
    }

    /// Edits the outgoing handle of the key at `index`.
    pub fn set_key_right_support(&mut self, index: usize, offset_position: f32, offset: f32) -> bool {
        self.keys
            .edit_right_handle(index, Vec2::new(offset_position, offset))
    }

    /// Smooths the key at `position`. See [`Curve::smooth_key_at`].
    pub fn smooth_key(&mut self, position: f32, coef: f32) -> bool {
        match self.keys.index_of(position) {
            Some(index) => self.smooth_key_at(index, coef),
            None => {
                log::warn!("Curve has no key at position {position} to smooth");
                false
            }
        }
    }

    /// Points both handles of a [`SupportType::Smooth`] key along the slope
    /// between its neighbours, giving a C1-continuous curve through the key.
    /// `coef` scales the handle length (1.0 = a third of each adjacent segment).
    pub fn smooth_key_at(&mut self, index: usize, coef: f32) -> bool {
        self.keys.smooth_at(index, coef)
    }

    /// Smooths every smooth-type key.
    pub fn smooth_all(&mut self, coef: f32) {
        self.keys.smooth_all(coef);
    }

    /// Value at `position`; clamps outside the key range, `0.0` when empty.
    #[must_use]
    pub fn evaluate(&self, position: f32) -> f32 {
        let keys = self.keys.keys();
        match self.keys.locate(position) {
            KeyLocation::Empty => 0.0,
            KeyLocation::Key(index) => keys[index].value,
            KeyLocation::Between { from, coef } => {
                f32::interpolate_linear(keys[from].value, keys[from + 1].value, coef)
            }
        }
    }

    /// Approximation samples in absolute `(position, value)` coordinates,
    /// segment after segment. Intended for drawing the curve.
    #[must_use]
    pub fn approximated_points(&self) -> Vec<Vec2> {
        let keys = self.keys.keys();
        let segments = self.keys.segments();
        let mut points = Vec::with_capacity(segments.len() * segments.first().map_or(0, |s| s.points().len()));

        for (i, segment) in segments.iter().enumerate() {
            let a = keys[i];
            let b = keys[i + 1];

            if segment.is_discrete() {
                points.push(Vec2::new(a.position, a.value));
                points.push(Vec2::new(b.position, a.value));
                points.push(Vec2::new(b.position, b.value));
                continue;
            }

            let origin = Vec2::new(a.position, a.value);
            let scale = Vec2::new(b.position - a.position, b.value - a.value);
            points.extend(segment.points().iter().map(|p| origin + *p * scale));
        }

        points
    }

    /// Smallest and largest value the curve reaches, including overshoot.
    #[must_use]
    pub fn value_range(&self) -> Option<(f32, f32)> {
        let first = self.keys.get(0)?.value;
        let range = self
            .approximated_points()
            .into_iter()
            .fold((first, first), |(lo, hi), p| (lo.min(p.y), hi.max(p.y)));
        Some(range)
    }
}
