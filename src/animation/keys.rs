//! Ordered key storage shared by [`Curve`](super::Curve) and
//! [`KeyframeTrack`](super::KeyframeTrack).
//!
//! Keys are kept sorted ascending by position with no two keys sharing a
//! position. One [`SegmentApproximation`] is cached per pair of neighbouring
//! keys; edits only rebuild the segments touching the edited key.

use glam::Vec2;

use crate::animation::approximation::SegmentApproximation;
use crate::animation::curve::SupportType;
use crate::errors::{AnimationError, Result};

/// Two key positions closer than this are treated as the same position.
pub const KEY_POSITION_EPSILON: f32 = 1e-5;

/// Handle length used by smoothing at `coef == 1`, as a fraction of the segment.
const SMOOTH_HANDLE_RATIO: f32 = 1.0 / 3.0;

pub trait Keyframe: Clone {
    fn position(&self) -> f32;

    /// Builds the approximation table of the segment from `self` to `next`.
    fn segment_to(&self, next: &Self) -> SegmentApproximation;
}

/// Spans and slope a key is smoothed against, in the key's handle units.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SmoothingFrame {
    /// Length of the incoming segment, zero for the first key.
    pub left_span: f32,
    /// Length of the outgoing segment, zero for the last key.
    pub right_span: f32,
    pub slope: f32,
}

/// Keys carrying two support handles whose edits propagate per [`SupportType`].
///
/// Handles are `(position offset, value offset)` pairs relative to the key;
/// the left one has a non-positive position offset, the right one a
/// non-negative one.
pub trait SupportHandles: Keyframe {
    fn support(&self) -> SupportType;

    fn handles(&self) -> (Vec2, Vec2);

    /// Stores both handles. Implementors clamp to their own handle range.
    fn store_handles(&mut self, left: Vec2, right: Vec2);

    fn smoothing_frame(&self, prev: Option<&Self>, next: Option<&Self>) -> SmoothingFrame;

    /// Moves the incoming handle and propagates to the outgoing one.
    fn edit_left_handle(&mut self, handle: Vec2) {
        let left = Vec2::new(handle.x.min(0.0), handle.y);
        let (_, right) = self.handles();
        let (left, right) = propagate(self.support(), left, right);
        self.store_handles(left, right);
    }

    /// Moves the outgoing handle and propagates to the incoming one.
    fn edit_right_handle(&mut self, handle: Vec2) {
        let right = Vec2::new(handle.x.max(0.0), handle.y);
        let (left, _) = self.handles();
        let (right, left) = propagate(self.support(), right, left);
        self.store_handles(left, right);
    }
}

/// Returns the edited handle and the opposite handle after an edit.
fn propagate(support: SupportType, edited: Vec2, opposite: Vec2) -> (Vec2, Vec2) {
    match support {
        SupportType::Smooth => (edited, -edited),
        SupportType::Free => {
            let direction = -edited.normalize_or_zero();
            if direction == Vec2::ZERO {
                (edited, opposite)
            } else {
                (edited, direction * opposite.length())
            }
        }
        SupportType::Flat => (Vec2::new(edited.x, 0.0), Vec2::new(opposite.x, 0.0)),
        SupportType::Broken | SupportType::Discrete => (edited, opposite),
    }
}

/// Where a query position lands relative to the keys.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum KeyLocation {
    Empty,
    /// Exactly on, or clamped to, a single key.
    Key(usize),
    /// Inside the segment starting at `from`; `coef` is the eased blend factor.
    Between { from: usize, coef: f32 },
}

#[derive(Debug, Clone)]
pub struct KeyList<K> {
    keys: Vec<K>,
    // segments[i] spans keys[i] -> keys[i + 1]
    segments: Vec<SegmentApproximation>,
}

impl<K> Default for KeyList<K> {
    fn default() -> Self {
        Self {
            keys: Vec::new(),
            segments: Vec::new(),
        }
    }
}

impl<K: Keyframe> KeyList<K> {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Builds a list from unordered keys. Non-finite positions are dropped and
    /// later keys win over earlier ones at the same position.
    #[must_use]
    pub fn from_keys(keys: Vec<K>) -> Self {
        let mut list = Self::new();
        list.set_keys(keys);
        list
    }

    #[must_use]
    pub fn keys(&self) -> &[K] {
        &self.keys
    }

    #[must_use]
    pub fn segments(&self) -> &[SegmentApproximation] {
        &self.segments
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.keys.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.keys.is_empty()
    }

    #[must_use]
    pub fn get(&self, index: usize) -> Option<&K> {
        self.keys.get(index)
    }

    /// Position of the last key, or zero when empty.
    #[must_use]
    pub fn length(&self) -> f32 {
        self.keys.last().map_or(0.0, Keyframe::position)
    }

    /// Index of the key at `position`, if any.
    #[must_use]
    pub fn index_of(&self, position: f32) -> Option<usize> {
        let idx = self.keys.partition_point(|k| k.position() < position - KEY_POSITION_EPSILON);
        self.keys
            .get(idx)
            .filter(|k| (k.position() - position).abs() <= KEY_POSITION_EPSILON)
            .map(|_| idx)
    }

    pub fn set_keys(&mut self, keys: Vec<K>) {
        let mut keys: Vec<K> = keys
            .into_iter()
            .filter(|k| {
                let finite = k.position().is_finite();
                if !finite {
                    log::warn!("Dropping key with non-finite position {}", k.position());
                }
                finite
            })
            .collect();

        keys.sort_by(|a, b| a.position().total_cmp(&b.position()));

        // Keep the last of any run of coincident keys.
        let mut deduped: Vec<K> = Vec::with_capacity(keys.len());
        for key in keys {
            if let Some(last) = deduped.last_mut()
                && (last.position() - key.position()).abs() <= KEY_POSITION_EPSILON
            {
                *last = key;
                continue;
            }
            deduped.push(key);
        }

        self.keys = deduped;
        self.rebuild_all();
    }

    /// Inserts `key` in position order and returns its final index.
    /// A key already at the same position is replaced.
    pub fn insert(&mut self, key: K) -> Result<usize> {
        let position = key.position();
        if !position.is_finite() {
            return Err(AnimationError::NonFinitePosition(position));
        }

        if let Some(existing) = self.index_of(position) {
            self.keys[existing] = key;
            self.rebuild_around(existing);
            return Ok(existing);
        }

        let index = self.keys.partition_point(|k| k.position() < position);
        self.keys.insert(index, key);

        let len = self.keys.len();
        if len >= 2 {
            self.segments.insert(index.min(len - 2), SegmentApproximation::default());
        }
        self.rebuild_around(index);

        Ok(index)
    }

    /// Removes the key at `position`. Returns `false` when no key sits there.
    pub fn remove(&mut self, position: f32) -> bool {
        match self.index_of(position) {
            Some(index) => self.remove_at(index),
            None => false,
        }
    }

    /// Removes the key at `index`. Returns `false` when out of range.
    pub fn remove_at(&mut self, index: usize) -> bool {
        if index >= self.keys.len() {
            return false;
        }

        self.keys.remove(index);

        if !self.segments.is_empty() {
            let seg = index.min(self.segments.len() - 1);
            self.segments.remove(seg);
            if index > 0 && index - 1 < self.segments.len() {
                self.rebuild_segment(index - 1);
            }
        }

        true
    }

    /// Replaces the key at `index`. If the new position breaks ordering the
    /// key is moved; the returned index is where it ends up.
    pub fn set(&mut self, key: K, index: usize) -> Result<usize> {
        let len = self.keys.len();
        if index >= len {
            return Err(AnimationError::KeyIndexOutOfBounds { index, len });
        }

        let position = key.position();
        if !position.is_finite() {
            return Err(AnimationError::NonFinitePosition(position));
        }

        let after_prev = index == 0 || self.keys[index - 1].position() + KEY_POSITION_EPSILON < position;
        let before_next =
            index + 1 >= len || position + KEY_POSITION_EPSILON < self.keys[index + 1].position();

        if after_prev && before_next {
            self.keys[index] = key;
            self.rebuild_around(index);
            return Ok(index);
        }

        self.remove_at(index);
        self.insert(key)
    }

    /// Applies `edit` to the key at `index` and rebuilds its neighbourhood.
    /// The edit must not move the key.
    pub fn modify(&mut self, index: usize, edit: impl FnOnce(&mut K)) -> bool {
        let Some(key) = self.keys.get_mut(index) else {
            return false;
        };
        let position = key.position();
        edit(key);
        debug_assert!((key.position() - position).abs() <= KEY_POSITION_EPSILON);
        self.rebuild_around(index);
        true
    }

    /// Locates `position` among the keys.
    ///
    /// Coarse step: forward scan to the first key past `position`. Fine step:
    /// the segment's sampled table turns the linear segment fraction into the
    /// eased coefficient. Positions outside the key range clamp to the end keys.
    #[must_use]
    pub fn locate(&self, position: f32) -> KeyLocation {
        let len = self.keys.len();
        match len {
            0 => return KeyLocation::Empty,
            1 => return KeyLocation::Key(0),
            _ => {}
        }

        if position <= self.keys[0].position() {
            return KeyLocation::Key(0);
        }
        if position >= self.keys[len - 1].position() {
            return KeyLocation::Key(len - 1);
        }

        let mut next = 1;
        while next < len - 1 && self.keys[next].position() <= position {
            next += 1;
        }
        let from = next - 1;

        let p0 = self.keys[from].position();
        let p1 = self.keys[next].position();
        let x = (position - p0) / (p1 - p0);
        if x <= 0.0 {
            return KeyLocation::Key(from);
        }

        KeyLocation::Between {
            from,
            coef: self.segments[from].sample(x),
        }
    }

    fn rebuild_around(&mut self, index: usize) {
        if index > 0 {
            self.rebuild_segment(index - 1);
        }
        self.rebuild_segment(index);
    }

    fn rebuild_segment(&mut self, segment: usize) {
        if segment + 1 >= self.keys.len() || segment >= self.segments.len() {
            return;
        }
        self.segments[segment] = self.keys[segment].segment_to(&self.keys[segment + 1]);
    }

    fn rebuild_all(&mut self) {
        self.segments = self
            .keys
            .windows(2)
            .map(|pair| pair[0].segment_to(&pair[1]))
            .collect();
    }
}

impl<K: SupportHandles> KeyList<K> {
    pub fn edit_left_handle(&mut self, index: usize, handle: Vec2) -> bool {
        self.modify(index, |key| key.edit_left_handle(handle))
    }

    pub fn edit_right_handle(&mut self, index: usize, handle: Vec2) -> bool {
        self.modify(index, |key| key.edit_right_handle(handle))
    }

    /// Points both handles of a [`SupportType::Smooth`] key along the slope
    /// of its smoothing frame, giving a C1-continuous curve through the key.
    /// `coef` scales the handle length (1.0 = a third of each adjacent segment).
    pub fn smooth_at(&mut self, index: usize, coef: f32) -> bool {
        let Some(key) = self.keys.get(index) else {
            return false;
        };
        if key.support() != SupportType::Smooth {
            log::debug!("Key {index} is {:?}, skipping smoothing", key.support());
            return false;
        }

        let prev = index.checked_sub(1).and_then(|i| self.keys.get(i));
        let frame = key.smoothing_frame(prev, self.keys.get(index + 1));

        // Longer handles would fold the segment back on itself.
        let ratio = SMOOTH_HANDLE_RATIO * coef.clamp(0.0, 3.0);
        let left_len = frame.left_span * ratio;
        let right_len = frame.right_span * ratio;

        self.modify(index, |k| {
            k.store_handles(
                Vec2::new(-left_len, -left_len * frame.slope),
                Vec2::new(right_len, right_len * frame.slope),
            );
        })
    }

    pub fn smooth_all(&mut self, coef: f32) {
        for index in 0..self.keys.len() {
            if self.keys[index].support() == SupportType::Smooth {
                self.smooth_at(index, coef);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Debug, Clone, PartialEq)]
    struct TestKey(f32);

    impl Keyframe for TestKey {
        fn position(&self) -> f32 {
            self.0
        }

        fn segment_to(&self, _next: &Self) -> SegmentApproximation {
            SegmentApproximation::linear()
        }
    }

    fn positions(list: &KeyList<TestKey>) -> Vec<f32> {
        list.keys().iter().map(|k| k.0).collect()
    }

    #[test]
    fn insert_keeps_order_and_segment_count() {
        let mut list = KeyList::new();
        assert_eq!(list.insert(TestKey(2.0)).unwrap(), 0);
        assert_eq!(list.insert(TestKey(0.0)).unwrap(), 0);
        assert_eq!(list.insert(TestKey(1.0)).unwrap(), 1);
        assert_eq!(list.insert(TestKey(3.0)).unwrap(), 3);
        assert_eq!(positions(&list), vec![0.0, 1.0, 2.0, 3.0]);
        assert_eq!(list.segments().len(), 3);
    }

    #[test]
    fn insert_at_existing_position_replaces() {
        let mut list = KeyList::from_keys(vec![TestKey(0.0), TestKey(1.0)]);
        assert_eq!(list.insert(TestKey(1.0)).unwrap(), 1);
        assert_eq!(list.len(), 2);
    }

    #[test]
    fn insert_rejects_nan() {
        let mut list: KeyList<TestKey> = KeyList::new();
        assert!(list.insert(TestKey(f32::NAN)).is_err());
        assert!(list.is_empty());
    }

    #[test]
    fn remove_missing_position_is_noop() {
        let mut list = KeyList::from_keys(vec![TestKey(0.0), TestKey(1.0)]);
        assert!(!list.remove(0.5));
        assert!(!list.remove_at(7));
        assert_eq!(list.len(), 2);
    }

    #[test]
    fn remove_keeps_segments_aligned() {
        let mut list = KeyList::from_keys(vec![TestKey(0.0), TestKey(1.0), TestKey(2.0), TestKey(3.0)]);
        assert!(list.remove(1.0));
        assert_eq!(list.segments().len(), 2);
        assert!(list.remove_at(0));
        assert!(list.remove_at(1));
        assert_eq!(positions(&list), vec![2.0]);
        assert!(list.segments().is_empty());
    }

    #[test]
    fn set_moving_past_neighbour_reorders() {
        let mut list = KeyList::from_keys(vec![TestKey(0.0), TestKey(1.0), TestKey(2.0)]);
        assert_eq!(list.set(TestKey(5.0), 0).unwrap(), 2);
        assert_eq!(positions(&list), vec![1.0, 2.0, 5.0]);
        assert!(matches!(
            list.set(TestKey(0.0), 9),
            Err(AnimationError::KeyIndexOutOfBounds { index: 9, len: 3 })
        ));
    }

    #[test]
    fn from_keys_sorts_and_dedups() {
        let list = KeyList::from_keys(vec![TestKey(2.0), TestKey(f32::NAN), TestKey(0.0), TestKey(2.0)]);
        assert_eq!(positions(&list), vec![0.0, 2.0]);
    }

    #[test]
    fn locate_clamps_outside_range() {
        let list = KeyList::from_keys(vec![TestKey(1.0), TestKey(2.0)]);
        assert_eq!(list.locate(0.0), KeyLocation::Key(0));
        assert_eq!(list.locate(3.0), KeyLocation::Key(1));
        match list.locate(1.5) {
            KeyLocation::Between { from, coef } => {
                assert_eq!(from, 0);
                assert!((coef - 0.5).abs() < 1e-5);
            }
            other => panic!("unexpected {other:?}"),
        }
    }
}
