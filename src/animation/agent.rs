//! Per-path value agents.
//!
//! An [`Animatable`](super::Animatable) keeps one agent for every property path
//! that at least one of its states animates. The agent knows which
//! `(state, value)` pairs drive the path and, once per frame, folds their
//! current samples into a single value written to the shared target.

use glam::{Vec2, Vec4};
use slotmap::SlotMap;
use smallvec::SmallVec;

use crate::animation::animated_value::{AnimationValue, AnyAnimatedValue, ValueKind};
use crate::animation::settings::{AggregationMode, AnimatableSettings, ZeroWeightPolicy};
use crate::animation::state::{AnimationState, StateHandle};
use crate::animation::target::TargetBinding;
use crate::animation::values::Rect;
use crate::errors::{AnimationError, Result};

const ZERO_WEIGHT: f32 = 1e-6;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct Contributor {
    pub state: StateHandle,
    pub value_index: usize,
}

#[derive(Debug)]
pub struct Agent<T> {
    path: String,
    target: Option<TargetBinding<T>>,
    contributors: SmallVec<[Contributor; 4]>,
    last_written: Option<T>,
}

impl<T: AnimationValue> Agent<T> {
    pub(crate) fn new(path: impl Into<String>, target: Option<TargetBinding<T>>) -> Self {
        Self {
            path: path.into(),
            target,
            contributors: SmallVec::new(),
            last_written: None,
        }
    }

    #[must_use]
    pub fn path(&self) -> &str {
        &self.path
    }

    #[must_use]
    pub fn contributor_count(&self) -> usize {
        self.contributors.len()
    }

    /// Value written by the last update that produced one.
    #[must_use]
    pub fn last_written(&self) -> Option<T> {
        self.last_written
    }

    fn register(&mut self, contributor: Contributor, value: &AnyAnimatedValue) -> bool {
        let Some(value) = value.downcast::<T>() else {
            return false;
        };
        if self.target.is_none() {
            self.target = value.target().cloned();
        }
        if !self.contributors.contains(&contributor) {
            self.contributors.push(contributor);
        }
        true
    }

    fn unregister(&mut self, contributor: Contributor) -> bool {
        let before = self.contributors.len();
        self.contributors.retain(|c| *c != contributor);
        before != self.contributors.len()
    }

    fn update(&mut self, states: &SlotMap<StateHandle, AnimationState>, settings: &AnimatableSettings) {
        let mut weight_sum = 0.0_f32;
        let mut acc = T::zero_accumulator();

        for contributor in &self.contributors {
            let Some(state) = states.get(contributor.state) else {
                continue;
            };
            let Some(value) = state.animation().value_as::<T>(contributor.value_index) else {
                continue;
            };

            let weight = state.path_weight(&self.path);
            weight_sum += weight;

            let scale = match settings.aggregation {
                AggregationMode::Legacy => 1.0,
                AggregationMode::Weighted => weight,
            };
            acc = T::accumulate(acc, value.value(), scale);
        }

        let result = if weight_sum <= ZERO_WEIGHT {
            match settings.zero_weight_policy {
                ZeroWeightPolicy::HoldLast => {
                    log::trace!("'{}': all contributors weigh zero, holding last value", self.path);
                    return;
                }
                ZeroWeightPolicy::WriteDefault => T::default(),
            }
        } else {
            T::resolve(acc, weight_sum)
        };

        if let Some(target) = &self.target {
            target.write(result);
        }
        self.last_written = Some(result);
    }
}

/// Agent of any supported value type.
#[derive(Debug)]
pub enum ValueAgent {
    Float(Agent<f32>),
    Vector(Agent<Vec2>),
    Color(Agent<Vec4>),
    Bool(Agent<bool>),
    Rect(Agent<Rect>),
}

macro_rules! dispatch {
    ($self:expr, $a:ident => $body:expr) => {
        match $self {
            ValueAgent::Float($a) => $body,
            ValueAgent::Vector($a) => $body,
            ValueAgent::Color($a) => $body,
            ValueAgent::Bool($a) => $body,
            ValueAgent::Rect($a) => $body,
        }
    };
}

impl ValueAgent {
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
    pub fn path(&self) -> &str {
        dispatch!(self, a => a.path())
    }

    #[must_use]
    pub fn contributor_count(&self) -> usize {
        dispatch!(self, a => a.contributor_count())
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.contributor_count() == 0
    }

    #[must_use]
    pub fn as_float(&self) -> Option<&Agent<f32>> {
        match self {
            Self::Float(agent) => Some(agent),
            _ => None,
        }
    }

    pub(crate) fn register(&mut self, contributor: Contributor, value: &AnyAnimatedValue) -> Result<()> {
        if dispatch!(self, a => a.register(contributor, value)) {
            Ok(())
        } else {
            Err(AnimationError::PathTypeMismatch {
                path: self.path().to_owned(),
                expected: self.kind(),
                found: value.kind(),
            })
        }
    }

    pub(crate) fn unregister(&mut self, contributor: Contributor) -> bool {
        dispatch!(self, a => a.unregister(contributor))
    }

    pub(crate) fn update(&mut self, states: &SlotMap<StateHandle, AnimationState>, settings: &AnimatableSettings) {
        dispatch!(self, a => a.update(states, settings));
    }
}
