//! Animatable configuration.
//!
//! ```rust,ignore
//! use kinema::animation::{Animatable, AnimatableSettings, AggregationMode};
//!
//! let animatable = Animatable::with_settings(
//!     AnimatableSettings::default().with_aggregation(AggregationMode::Weighted),
//! );
//! ```

use serde::{Deserialize, Serialize};

/// How a per-path agent combines the values of the states driving that path.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum AggregationMode {
    /// `Σ value / Σ weight`.
    ///
    /// Values are summed unweighted and only the denominator sees the
    /// weights. This is exact for a single contributor and for contributors
    /// of equal weight, but not a weighted average in general: a state faded
    /// to zero weight still adds its full value. Kept as the default for
    /// compatibility with existing animation content.
    #[default]
    Legacy,
    /// `Σ (value * weight) / Σ weight`, a true weighted average.
    Weighted,
}

/// What an agent writes when every contributor weighs zero.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum ZeroWeightPolicy {
    /// Skip the write; the target keeps its last value.
    #[default]
    HoldLast,
    /// Write the value type's default.
    WriteDefault,
}

#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct AnimatableSettings {
    pub aggregation: AggregationMode,
    pub zero_weight_policy: ZeroWeightPolicy,
}

impl AnimatableSettings {
    #[must_use]
    pub fn with_aggregation(mut self, aggregation: AggregationMode) -> Self {
        self.aggregation = aggregation;
        self
    }

    #[must_use]
    pub fn with_zero_weight_policy(mut self, policy: ZeroWeightPolicy) -> Self {
        self.zero_weight_policy = policy;
        self
    }
}
