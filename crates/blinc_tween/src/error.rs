//! Tween error types

use thiserror::Error;

/// Errors raised while configuring a tween.
///
/// Only construction can fail; lifecycle calls made in the wrong state are
/// silently ignored.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum AnimationError {
    /// No duration was given to the builder
    #[error("Tween duration was not set")]
    MissingDuration,

    /// Duration is negative, NaN or infinite
    #[error("Invalid tween duration: {0}")]
    InvalidDuration(f64),

    /// No end values were given to the builder
    #[error("Tween has no target values")]
    MissingTarget,

    /// A value tree that must be an object was a leaf
    #[error("Expected an object for the {0} values")]
    NotAnObject(&'static str),

    /// The subject was borrowed elsewhere while the tween was being built
    #[error("Subject is already borrowed")]
    SubjectBorrowed,

    /// Time scale is NaN or infinite
    #[error("Invalid time scale: {0}")]
    InvalidTimeScale(f64),
}

/// Result type for tween construction
pub type Result<T> = std::result::Result<T, AnimationError>;
