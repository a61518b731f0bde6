//! Error Types
//!
//! The engine is built to degrade rather than fail inside a frame loop:
//! lookups that miss return `None`/`false` and log a warning, degenerate
//! inputs clamp. [`AnimationError`] is reserved for the few edits whose
//! failure is a caller bug the caller can act on.
//!
//! ```rust,ignore
//! use kinema::errors::{AnimationError, Result};
//!
//! fn retime(curve: &mut Curve, key: CurveKey) -> Result<usize> {
//!     curve.set_key(key, 0)
//! }
//! ```

use thiserror::Error;

use crate::animation::ValueKind;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum AnimationError {
    // ========================================================================
    // Key Editing Errors
    // ========================================================================
    /// A key index past the end of the key list.
    #[error("Key index out of bounds: {index} (len: {len})")]
    KeyIndexOutOfBounds { index: usize, len: usize },

    /// Key positions must be finite.
    #[error("Key position is not finite: {0}")]
    NonFinitePosition(f32),

    // ========================================================================
    // Animatable Errors
    // ========================================================================
    /// State names are unique within one animatable.
    #[error("Animation state already exists: {0}")]
    DuplicateState(String),

    /// A value targets a path whose agent aggregates another value type.
    #[error("Path '{path}' is animated as {expected}, not {found}")]
    PathTypeMismatch {
        path: String,
        expected: ValueKind,
        found: ValueKind,
    },
}

/// Alias for `Result<T, AnimationError>`.
pub type Result<T> = std::result::Result<T, AnimationError>;
