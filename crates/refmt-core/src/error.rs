//! Error types for replacement composition and the format cycle.

use thiserror::Error;

/// Boxed error returned by external collaborators (style providers, formatters).
pub type BoxError = Box<dyn std::error::Error + Send + Sync + 'static>;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
/// Errors produced while validating or composing a [`crate::ReplacementSet`].
pub enum ReplacementError {
    #[error("replacement {offset}+{length} is out of bounds for a buffer of {buffer_len} characters")]
    /// A replacement range extends past the end of the buffer.
    OutOfBounds {
        /// Start character offset of the replacement.
        offset: usize,
        /// Number of characters the replacement removes.
        length: usize,
        /// Character length of the buffer being composed.
        buffer_len: usize,
    },

    #[error("replacement at {offset} overlaps the range {previous_offset}..{previous_end}")]
    /// Two replacements remove intersecting ranges.
    Overlapping {
        /// Start of the earlier replacement.
        previous_offset: usize,
        /// Exclusive end of the earlier replacement.
        previous_end: usize,
        /// Start of the replacement that intersects it.
        offset: usize,
    },
}

#[derive(Debug, Error)]
/// Errors reported by [`crate::FormatSession::run`].
///
/// Every variant leaves the host buffer and selections untouched.
pub enum FormatError {
    #[error("style '{style}' is unavailable: {source}")]
    /// The requested style could not be resolved, read, or parsed.
    StyleUnavailable {
        /// The requested style name.
        style: String,
        /// The provider's reason.
        #[source]
        source: BoxError,
    },

    #[error("formatter failed: {0}")]
    /// The external formatter reported an error.
    FormatterFailed(#[source] BoxError),

    #[error("could not apply formatting changes: {0}")]
    /// The replacements could not be merged or applied to the buffer.
    CompositionFailed(#[from] ReplacementError),
}

impl FormatError {
    /// The requested style name, for [`FormatError::StyleUnavailable`].
    pub fn style(&self) -> Option<&str> {
        match self {
            FormatError::StyleUnavailable { style, .. } => Some(style),
            _ => None,
        }
    }
}
