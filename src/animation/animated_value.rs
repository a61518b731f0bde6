//! Typed keyframe tracks bound to a property.
//!
//! [`AnimatedValue<T>`] samples its [`KeyframeTrack`] at the owning timeline's
//! in-duration time and pushes the result into its [`TargetBinding`].
//! While registered under an [`Animatable`](super::Animatable) it only stores
//! the sample; the per-path agent writes the aggregated value instead.
//!
//! The set of value types is closed: `f32`, [`Vec2`], colour ([`Vec4`]),
//! `bool` and [`Rect`]. [`AnyAnimatedValue`] is the tagged form used by
//! animations that mix types.

use std::fmt;

use glam::{Vec2, Vec4};
use serde::{Deserialize, Serialize};

use crate::animation::agent::{Agent, ValueAgent};
use crate::animation::target::TargetBinding;
use crate::animation::track::{Key, KeyframeTrack};
use crate::animation::values::{Blendable, Interpolatable, Rect};
use crate::errors::Result;

/// Tag of a supported animated value type.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ValueKind {
    Float,
    Vector,
    Color,
    Bool,
    Rect,
}

impl fmt::Display for ValueKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Float => "float",
            Self::Vector => "vector",
            Self::Color => "color",
            Self::Bool => "bool",
            Self::Rect => "rect",
        };
        f.write_str(name)
    }
}

/// A type that can be animated. Implemented for exactly the [`ValueKind`] set.
pub trait AnimationValue:
    Interpolatable + Blendable + Default + PartialEq + fmt::Debug + 'static
{
    const KIND: ValueKind;

    fn wrap(value: AnimatedValue<Self>) -> AnyAnimatedValue;

    fn downcast(value: &AnyAnimatedValue) -> Option<&AnimatedValue<Self>>;

    fn downcast_mut(value: &mut AnyAnimatedValue) -> Option<&mut AnimatedValue<Self>>;

    fn wrap_agent(agent: Agent<Self>) -> ValueAgent;
}

#[derive(Debug, Clone)]
pub struct AnimatedValue<T> {
    target_path: String,
    track: KeyframeTrack<T>,
    value: T,
    target: Option<TargetBinding<T>>,
    registered: bool,
}

impl<T: AnimationValue> AnimatedValue<T> {
    /// Unbound value animating the property at `target_path`.
    #[must_use]
    pub fn new(target_path: impl Into<String>) -> Self {
        Self {
            target_path: target_path.into(),
            track: KeyframeTrack::new(),
            value: T::default(),
            target: None,
            registered: false,
        }
    }

    /// Two-key linear animation from `from` to `to`.
    #[must_use]
    pub fn linear(target_path: impl Into<String>, from: T, to: T, duration: f32) -> Self {
        Self::new(target_path).with_keys(vec![Key::new(0.0, from), Key::new(duration, to)])
    }

    #[must_use]
    pub fn with_keys(mut self, keys: Vec<Key<T>>) -> Self {
        self.track.set_keys(keys);
        self
    }

    #[must_use]
    pub fn with_target(mut self, target: TargetBinding<T>) -> Self {
        self.target = Some(target);
        self
    }

    #[must_use]
    pub fn target_path(&self) -> &str {
        &self.target_path
    }

    #[must_use]
    pub fn target(&self) -> Option<&TargetBinding<T>> {
        self.target.as_ref()
    }

    /// Replaces the binding.
    pub fn set_target(&mut self, target: TargetBinding<T>) {
        self.target = Some(target);
    }

    pub fn clear_target(&mut self) {
        self.target = None;
    }

    #[must_use]
    pub fn track(&self) -> &KeyframeTrack<T> {
        &self.track
    }

    #[must_use]
    pub fn keys(&self) -> &[Key<T>] {
        self.track.keys()
    }

    pub fn set_keys(&mut self, keys: Vec<Key<T>>) {
        self.track.set_keys(keys);
    }

    pub fn insert_key(&mut self, key: Key<T>) -> Result<usize> {
        self.track.insert_key(key)
    }

    pub fn remove_key(&mut self, position: f32) -> bool {
        let removed = self.track.remove_key(position);
        if !removed {
            log::warn!("'{}' has no key at position {position}", self.target_path);
        }
        removed
    }

    pub fn remove_key_at(&mut self, index: usize) -> bool {
        let removed = self.track.remove_key_at(index);
        if !removed {
            log::warn!("'{}' has no key at index {index}", self.target_path);
        }
        removed
    }

    pub fn set_key(&mut self, key: Key<T>, index: usize) -> Result<usize> {
        self.track.set_key(key, index)
    }

    pub fn set_key_left_support(&mut self, index: usize, offset_position: f32, offset: f32) -> bool {
        self.track.set_key_left_support(index, offset_position, offset)
    }

    pub fn set_key_right_support(&mut self, index: usize, offset_position: f32, offset: f32) -> bool {
        self.track.set_key_right_support(index, offset_position, offset)
    }

    pub fn smooth_key(&mut self, position: f32, coef: f32) -> bool {
        let smoothed = self.track.smooth_key(position, coef);
        if !smoothed {
            log::warn!("'{}' has no smooth key at position {position}", self.target_path);
        }
        smoothed
    }

    pub fn smooth_all(&mut self, coef: f32) {
        self.track.smooth_all(coef);
    }

    /// Position of the last key.
    #[must_use]
    pub fn length(&self) -> f32 {
        self.track.length()
    }

    /// Last sampled value.
    #[must_use]
    pub fn value(&self) -> T {
        self.value
    }

    /// Samples the track without touching the stored value or the target.
    #[must_use]
    pub fn value_at(&self, time: f32) -> T {
        self.track.sample(time)
    }

    /// Samples at `time`, stores the result and, unless an aggregator owns
    /// this value, writes it to the target.
    pub fn evaluate(&mut self, time: f32) {
        self.value = self.track.sample(time);
        if self.registered {
            return;
        }
        if let Some(target) = &self.target {
            target.write(self.value);
        }
    }

    #[must_use]
    pub fn is_registered(&self) -> bool {
        self.registered
    }

    pub(crate) fn register_under_aggregator(&mut self) {
        self.registered = true;
    }

    pub(crate) fn unregister(&mut self) {
        self.registered = false;
    }
}

/// Tagged animated value of any supported type.
#[derive(Debug, Clone)]
pub enum AnyAnimatedValue {
    Float(AnimatedValue<f32>),
    Vector(AnimatedValue<Vec2>),
    Color(AnimatedValue<Vec4>),
    Bool(AnimatedValue<bool>),
    Rect(AnimatedValue<Rect>),
}

macro_rules! dispatch {
    ($self:expr, $v:ident => $body:expr) => {
        match $self {
            AnyAnimatedValue::Float($v) => $body,
            AnyAnimatedValue::Vector($v) => $body,
            AnyAnimatedValue::Color($v) => $body,
            AnyAnimatedValue::Bool($v) => $body,
            AnyAnimatedValue::Rect($v) => $body,
        }
    };
}

impl AnyAnimatedValue {
    #[must_use]
    pub fn kind(&self) -> ValueKind {
        match self {
            Self::Float(_) => ValueKind::Float,
            Self::Vector(_) => ValueKind::Vector,
            Self::Color(_) => ValueKind::Color,
            Self::Bool(_) => ValueKind::Bool,
            Self::Rect(_) => ValueKind::Rect,
        }
    }

    #[must_use]
    pub fn target_path(&self) -> &str {
        dispatch!(self, v => v.target_path())
    }

    #[must_use]
    pub fn length(&self) -> f32 {
        dispatch!(self, v => v.length())
    }

    pub fn evaluate(&mut self, time: f32) {
        dispatch!(self, v => v.evaluate(time));
    }

    #[must_use]
    pub fn is_registered(&self) -> bool {
        dispatch!(self, v => v.is_registered())
    }

    pub(crate) fn register_under_aggregator(&mut self) {
        dispatch!(self, v => v.register_under_aggregator());
    }

    pub(crate) fn unregister(&mut self) {
        dispatch!(self, v => v.unregister());
    }

    /// Creates an empty agent of the matching type for this value's path,
    /// seeded with this value's binding.
    pub(crate) fn make_agent(&self) -> ValueAgent {
        dispatch!(self, v => agent_for(v))
    }

    #[must_use]
    pub fn downcast<T: AnimationValue>(&self) -> Option<&AnimatedValue<T>> {
        T::downcast(self)
    }

    pub fn downcast_mut<T: AnimationValue>(&mut self) -> Option<&mut AnimatedValue<T>> {
        T::downcast_mut(self)
    }
}

fn agent_for<T: AnimationValue>(value: &AnimatedValue<T>) -> ValueAgent {
    T::wrap_agent(Agent::new(value.target_path(), value.target().cloned()))
}

impl<T: AnimationValue> From<AnimatedValue<T>> for AnyAnimatedValue {
    fn from(value: AnimatedValue<T>) -> Self {
        T::wrap(value)
    }
}

macro_rules! impl_animation_value {
    ($ty:ty, $variant:ident) => {
        impl AnimationValue for $ty {
            const KIND: ValueKind = ValueKind::$variant;

            fn wrap(value: AnimatedValue<Self>) -> AnyAnimatedValue {
                AnyAnimatedValue::$variant(value)
            }

            fn downcast(value: &AnyAnimatedValue) -> Option<&AnimatedValue<Self>> {
                match value {
                    AnyAnimatedValue::$variant(v) => Some(v),
                    _ => None,
                }
            }

            fn downcast_mut(value: &mut AnyAnimatedValue) -> Option<&mut AnimatedValue<Self>> {
                match value {
                    AnyAnimatedValue::$variant(v) => Some(v),
                    _ => None,
                }
            }

            fn wrap_agent(agent: Agent<Self>) -> ValueAgent {
                ValueAgent::$variant(agent)
            }
        }
    };
}

impl_animation_value!(f32, Float);
impl_animation_value!(Vec2, Vector);
impl_animation_value!(Vec4, Color);
impl_animation_value!(bool, Bool);
impl_animation_value!(Rect, Rect);

#[cfg(test)]
mod tests {
    use std::cell::Cell;
    use std::rc::Rc;

    use super::*;

    #[test]
    fn evaluate_writes_target() {
        let cell = Rc::new(Cell::new(0.0_f32));
        let mut value = AnimatedValue::linear("alpha", 0.0_f32, 1.0, 1.0)
            .with_target(TargetBinding::cell(Rc::clone(&cell)));

        value.evaluate(0.5);
        assert!((cell.get() - 0.5).abs() < 1e-5);
        assert!((value.value() - 0.5).abs() < 1e-5);
    }

    #[test]
    fn registered_value_does_not_write() {
        let cell = Rc::new(Cell::new(-1.0_f32));
        let mut value = AnimatedValue::linear("alpha", 0.0_f32, 1.0, 1.0)
            .with_target(TargetBinding::cell(Rc::clone(&cell)));

        value.register_under_aggregator();
        value.evaluate(1.0);
        assert_eq!(cell.get(), -1.0);
        assert_eq!(value.value(), 1.0);

        value.unregister();
        value.evaluate(1.0);
        assert_eq!(cell.get(), 1.0);
    }

    #[test]
    fn rebinding_replaces_target() {
        let first = Rc::new(Cell::new(0.0_f32));
        let second = Rc::new(Cell::new(0.0_f32));
        let mut value = AnimatedValue::linear("x", 2.0_f32, 2.0, 1.0)
            .with_target(TargetBinding::cell(Rc::clone(&first)));

        value.set_target(TargetBinding::cell(Rc::clone(&second)));
        value.evaluate(0.0);
        assert_eq!(first.get(), 0.0);
        assert_eq!(second.get(), 2.0);
    }

    #[test]
    fn tagged_value_round_trips_type() {
        let any: AnyAnimatedValue = AnimatedValue::linear("pos", Vec2::ZERO, Vec2::ONE, 2.0).into();
        assert_eq!(any.kind(), ValueKind::Vector);
        assert_eq!(any.target_path(), "pos");
        assert!((any.length() - 2.0).abs() < 1e-6);
        assert!(any.downcast::<Vec2>().is_some());
        assert!(any.downcast::<f32>().is_none());
    }

    #[test]
    fn remove_missing_key_keeps_keys() {
        let mut value = AnimatedValue::linear("x", 0.0_f32, 1.0, 1.0);
        assert!(!value.remove_key(0.5));
        assert_eq!(value.keys().len(), 2);
    }
}
