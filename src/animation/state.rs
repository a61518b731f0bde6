use slotmap::new_key_type;

use crate::animation::animated_value::{AnimatedValue, AnimationValue};
use crate::animation::animation::Animation;
use crate::animation::mask::AnimationMask;
use crate::animation::timeline::Timeline;

new_key_type! {
    /// Handle of a state inside an [`Animatable`](super::Animatable).
    pub struct StateHandle;
}

/// A named animation taking part in an [`Animatable`](super::Animatable) mix.
#[derive(Debug)]
pub struct AnimationState {
    name: String,
    /// Authored weight in `[0, 1]`.
    weight: f32,
    /// Runtime weight in `[0, 1]`, driven only by blend transitions.
    pub(crate) work_weight: f32,
    pub(crate) animation: Animation,
    mask: AnimationMask,
}

impl AnimationState {
    #[must_use]
    pub fn new(name: impl Into<String>, animation: Animation) -> Self {
        Self {
            name: name.into(),
            weight: 1.0,
            work_weight: 1.0,
            animation,
            mask: AnimationMask::default(),
        }
    }

    #[must_use]
    pub fn with_weight(mut self, weight: f32) -> Self {
        self.set_weight(weight);
        self
    }

    #[must_use]
    pub fn with_mask(mut self, mask: AnimationMask) -> Self {
        self.mask = mask;
        self
    }

    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    #[must_use]
    pub fn weight(&self) -> f32 {
        self.weight
    }

    pub fn set_weight(&mut self, weight: f32) {
        self.weight = weight.clamp(0.0, 1.0);
    }

    #[must_use]
    pub fn work_weight(&self) -> f32 {
        self.work_weight
    }

    #[must_use]
    pub fn mask(&self) -> &AnimationMask {
        &self.mask
    }

    pub fn mask_mut(&mut self) -> &mut AnimationMask {
        &mut self.mask
    }

    /// Combined contribution weight of this state for `path`.
    #[must_use]
    pub fn path_weight(&self, path: &str) -> f32 {
        self.weight * self.work_weight * self.mask.node_weight(path)
    }

    #[must_use]
    pub fn animation(&self) -> &Animation {
        &self.animation
    }

    #[must_use]
    pub fn timeline(&self) -> &Timeline {
        self.animation.timeline()
    }

    /// Timeline parameters and events. The value set is fixed while the state
    /// is owned by an `Animatable`.
    pub fn timeline_mut(&mut self) -> &mut Timeline {
        self.animation.timeline_mut()
    }

    /// Mutable access to one value, e.g. for key editing.
    pub fn value_as_mut<T: AnimationValue>(&mut self, index: usize) -> Option<&mut AnimatedValue<T>> {
        self.animation.value_as_mut(index)
    }

    #[must_use]
    pub fn is_playing(&self) -> bool {
        self.animation.is_playing()
    }
}
