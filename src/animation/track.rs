use serde::{Deserialize, Deserializer, Serialize, Serializer};

use glam::Vec2;

use crate::animation::approximation::SegmentApproximation;
use crate::animation::curve::SupportType;
use crate::animation::keys::{KeyList, KeyLocation, Keyframe, SmoothingFrame, SupportHandles};
use crate::animation::values::Interpolatable;
use crate::errors::Result;

/// Keyframe of a typed track.
///
/// Unlike [`CurveKey`](super::CurveKey), the support handles here are easing
/// handles measured in fractions of the adjacent segment: position offsets in
/// segment lengths, value offsets in fractions of the value change. Collapsed
/// handles give linear interpolation.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Key<T> {
    pub position: f32,
    pub value: T,
    pub left_offset: f32,
    pub left_offset_position: f32,
    pub right_offset: f32,
    pub right_offset_position: f32,
    pub support: SupportType,
}

impl<T> Key<T> {
    #[must_use]
    pub fn new(position: f32, value: T) -> Self {
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

    /// Sets the incoming (`left`) and outgoing (`right`) easing handles.
    #[must_use]
    pub fn with_easing(mut self, left: Vec2, right: Vec2) -> Self {
        self.left_offset_position = left.x.clamp(-1.0, 0.0);
        self.left_offset = left.y;
        self.right_offset_position = right.x.clamp(0.0, 1.0);
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
}

impl<T: Copy> Key<T> {
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

impl<T: Copy> SupportHandles for Key<T> {
    fn support(&self) -> SupportType {
        self.support
    }

    fn handles(&self) -> (Vec2, Vec2) {
        (self.left_handle(), self.right_handle())
    }

    fn store_handles(&mut self, left: Vec2, right: Vec2) {
        self.left_offset_position = left.x.clamp(-1.0, 0.0);
        self.left_offset = left.y;
        self.right_offset_position = right.x.clamp(0.0, 1.0);
        self.right_offset = right.y;
    }

    // Handles are normalized per segment, so every span is 1 and a slope of 1
    // keeps the progress through the key at uniform speed.
    fn smoothing_frame(&self, prev: Option<&Self>, next: Option<&Self>) -> SmoothingFrame {
        SmoothingFrame {
            left_span: if prev.is_some() { 1.0 } else { 0.0 },
            right_span: if next.is_some() { 1.0 } else { 0.0 },
            slope: 1.0,
        }
    }
}

impl<T: Copy> Keyframe for Key<T> {
    fn position(&self) -> f32 {
        self.position
    }

    fn segment_to(&self, next: &Self) -> SegmentApproximation {
        if self.support == SupportType::Discrete {
            return SegmentApproximation::discrete();
        }
        SegmentApproximation::from_handles(
            Vec2::new(self.right_offset_position, self.right_offset),
            Vec2::new(1.0 + next.left_offset_position, 1.0 + next.left_offset),
        )
    }
}

/// Ordered keys of type `T` evaluated through the bezier approximation tables.
#[derive(Debug, Clone)]
pub struct KeyframeTrack<T> {
    keys: KeyList<Key<T>>,
}

impl<T> Default for KeyframeTrack<T> {
    fn default() -> Self {
        Self {
            keys: KeyList::default(),
        }
    }
}

impl<T: Interpolatable + Default> KeyframeTrack<T> {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn from_keys(keys: Vec<Key<T>>) -> Self {
        Self {
            keys: KeyList::from_keys(keys),
        }
    }

    #[must_use]
    pub fn keys(&self) -> &[Key<T>] {
        self.keys.keys()
    }

    pub fn set_keys(&mut self, keys: Vec<Key<T>>) {
        self.keys.set_keys(keys);
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
    pub fn length(&self) -> f32 {
        self.keys.length()
    }

    pub fn insert_key(&mut self, key: Key<T>) -> Result<usize> {
        self.keys.insert(key)
    }

    pub fn remove_key(&mut self, position: f32) -> bool {
        self.keys.remove(position)
    }

    pub fn remove_key_at(&mut self, index: usize) -> bool {
        self.keys.remove_at(index)
    }

    pub fn set_key(&mut self, key: Key<T>, index: usize) -> Result<usize> {
        self.keys.set(key, index)
    }

    /// Edits the incoming easing handle of the key at `index`.
    pub fn set_key_left_support(&mut self, index: usize, offset_position: f32, offset: f32) -> bool {
        self.keys
            .edit_left_handle(index, Vec2::new(offset_position, offset))
    }

    /// Edits the outgoing easing handle of the key at `index`.
    pub fn set_key_right_support(&mut self, index: usize, offset_position: f32, offset: f32) -> bool {
        self.keys
            .edit_right_handle(index, Vec2::new(offset_position, offset))
    }

    /// Removes the easing around a [`SupportType::Smooth`] key at `position`.
    pub fn smooth_key(&mut self, position: f32, coef: f32) -> bool {
        match self.keys.index_of(position) {
            Some(index) => self.keys.smooth_at(index, coef),
            None => false,
        }
    }

    pub fn smooth_key_at(&mut self, index: usize, coef: f32) -> bool {
        self.keys.smooth_at(index, coef)
    }

    pub fn smooth_all(&mut self, coef: f32) {
        self.keys.smooth_all(coef);
    }

    /// Value at `position`; clamps outside the key range, `T::default()` when empty.
    #[must_use]
    pub fn sample(&self, position: f32) -> T {
        let keys = self.keys.keys();
        match self.keys.locate(position) {
            KeyLocation::Empty => T::default(),
            KeyLocation::Key(index) => keys[index].value,
            KeyLocation::Between { from, coef } => {
                T::interpolate_linear(keys[from].value, keys[from + 1].value, coef)
            }
        }
    }
}

impl<T: Serialize + Copy> Serialize for KeyframeTrack<T> {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        self.keys.keys().serialize(serializer)
    }
}

impl<'de, T> Deserialize<'de> for KeyframeTrack<T>
where
    T: Deserialize<'de> + Interpolatable + Default,
{
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> std::result::Result<Self, D::Error> {
        let keys = Vec::<Key<T>>::deserialize(deserializer)?;
        Ok(Self::from_keys(keys))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn vec2_track_interpolates() {
        let track = KeyframeTrack::from_keys(vec![
            Key::new(0.0, Vec2::ZERO),
            Key::new(2.0, Vec2::new(10.0, -4.0)),
        ]);
        assert!(track.sample(1.0).abs_diff_eq(Vec2::new(5.0, -2.0), 1e-4));
        assert_eq!(track.sample(-1.0), Vec2::ZERO);
        assert_eq!(track.sample(9.0), Vec2::new(10.0, -4.0));
    }

    #[test]
    fn easing_handles_slow_the_start() {
        let track = KeyframeTrack::from_keys(vec![
            Key::new(0.0, 0.0_f32).with_easing(Vec2::ZERO, Vec2::new(0.5, 0.0)),
            Key::new(1.0, 1.0_f32),
        ]);
        assert!(track.sample(0.25) < 0.25);
        assert!((track.sample(1.0) - 1.0).abs() < 1e-6);
    }

    #[test]
    fn empty_track_samples_default() {
        let track: KeyframeTrack<f32> = KeyframeTrack::new();
        assert_eq!(track.sample(1.0), 0.0);
    }

    #[test]
    fn handle_edits_follow_support_type() {
        let mut track = KeyframeTrack::from_keys(vec![
            Key::new(0.0, 0.0_f32),
            Key::new(1.0, 1.0_f32),
            Key::new(2.0, 0.0_f32).with_support(SupportType::Flat),
        ]);

        assert!(track.set_key_right_support(1, 0.25, 0.5));
        assert_eq!(track.keys()[1].left_handle(), Vec2::new(-0.25, -0.5));

        assert!(track.set_key_left_support(2, -0.5, 0.3));
        assert_eq!(track.keys()[2].left_handle(), Vec2::new(-0.5, 0.0));

        assert!(!track.set_key_left_support(7, -0.5, 0.0));
    }

    #[test]
    fn normalized_handles_are_clamped_to_segment() {
        let mut key = Key::new(0.0, 0.0_f32).with_support(SupportType::Broken);
        key.set_right_support(3.0, 1.0);
        assert_eq!(key.right_handle(), Vec2::new(1.0, 1.0));
    }

    #[test]
    fn smoothing_removes_easing_at_key() {
        let mut track = KeyframeTrack::from_keys(vec![
            Key::new(0.0, 0.0_f32),
            Key::new(1.0, 1.0_f32).with_easing(Vec2::new(-0.5, 0.0), Vec2::new(0.5, 0.0)),
            Key::new(2.0, 2.0_f32),
        ]);
        assert!(track.smooth_key(1.0, 1.0));

        let key = track.keys()[1];
        assert!(key.left_handle().abs_diff_eq(Vec2::splat(-1.0 / 3.0), 1e-6));
        assert!(key.right_handle().abs_diff_eq(Vec2::splat(1.0 / 3.0), 1e-6));
        assert!((track.sample(0.5) - 0.5).abs() < 1e-4);
        assert!((track.sample(1.5) - 1.5).abs() < 1e-4);

        assert!(!track.smooth_key(0.5, 1.0));
    }

    #[test]
    fn serde_round_trip_keeps_samples() {
        let track = KeyframeTrack::from_keys(vec![
            Key::new(0.0, Vec2::ZERO).with_easing(Vec2::ZERO, Vec2::new(0.4, 0.0)),
            Key::new(1.5, Vec2::new(3.0, 6.0)).with_support(SupportType::Discrete),
            Key::new(2.0, Vec2::ONE),
        ]);

        let json = serde_json::to_string(&track).unwrap();
        let restored: KeyframeTrack<Vec2> = serde_json::from_str(&json).unwrap();

        assert_eq!(restored.keys(), track.keys());
        for i in 0..=20 {
            let t = i as f32 * 0.1;
            assert!(restored.sample(t).abs_diff_eq(track.sample(t), 1e-6));
        }
    }
}
