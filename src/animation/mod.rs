//! Keyframe animation.
//!
//! Bottom-up: [`Curve`] and [`KeyframeTrack`] map a position to a value,
//! [`Timeline`] folds wall-clock time into a duration, [`AnimatedValue`]
//! samples a track and writes a [`TargetBinding`], and [`Animation`] ties a
//! timeline to its values. [`Animatable`] runs several named
//! [`AnimationState`]s on one object, aggregating values that share a target
//! path and cross-fading between states.

pub mod values;
pub mod approximation;
pub mod keys;
pub mod curve;
pub mod track;
pub mod target;
pub mod timeline;
pub mod animated_value;
#[allow(clippy::module_inception)]
pub mod animation;
pub mod mask;
pub mod state;
pub mod settings;
pub mod agent;
pub mod blend;
pub mod animatable;

pub use values::{Interpolatable, Blendable, Rect};
pub use approximation::{SegmentApproximation, APPROXIMATION_SAMPLES};
pub use keys::{KeyList, KeyLocation, Keyframe, KEY_POSITION_EPSILON};
pub use curve::{Curve, CurveKey, SupportType};
pub use track::{Key, KeyframeTrack};
pub use target::TargetBinding;
pub use timeline::{Evaluate, LoopMode, MAX_EVENT_CROSSINGS_PER_STEP, TimeEventId, Timeline, TimelineSnapshot};
pub use animated_value::{AnimatedValue, AnimationValue, AnyAnimatedValue, ValueKind};
pub use animation::Animation;
pub use mask::AnimationMask;
pub use state::{AnimationState, StateHandle};
pub use settings::{AggregationMode, AnimatableSettings, ZeroWeightPolicy};
pub use agent::{Agent, ValueAgent};
pub use blend::BlendState;
pub use animatable::Animatable;
