#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::cast_precision_loss)]
#![allow(clippy::cast_possible_truncation)]
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::missing_errors_doc)]
#![allow(clippy::missing_panics_doc)]

pub mod animation;
pub mod errors;

pub use animation::{
    Animatable, AnimatableSettings, AnimatedValue, Animation, AnimationMask, AnimationState, Curve, CurveKey,
    KeyframeTrack, LoopMode, Rect, SupportType, TargetBinding, Timeline,
};
pub use errors::{AnimationError, Result};
