//! The formatter seam: computes replacements without touching the buffer.

use crate::replacement::ReplacementSet;
use crate::style::StyleConfig;
use std::ops::Range;

/// An external formatter that computes replacements without touching the buffer.
///
/// Ranges and the returned replacements are expressed in character offsets into `buffer`.
/// Implementations must return a set whose entries are mutually disjoint.
pub trait Formatter {
    /// The error type returned by the formatting passes.
    type Error: std::error::Error + Send + Sync + 'static;

    /// Compute whitespace/line reformatting replacements for `ranges` of `buffer`.
    fn reformat(
        &self,
        style: &StyleConfig,
        buffer: &str,
        ranges: &[Range<usize>],
    ) -> Result<ReplacementSet, Self::Error>;

    /// Compute declaration-ordering replacements (include sorting).
    ///
    /// Only called when [`StyleConfig::sort_includes`] is set. The result is merged with the
    /// output of [`Formatter::reformat`], so it must not overlap it. `filename_hint` lets the
    /// implementation recognise the file's main header.
    fn sort_includes(
        &self,
        style: &StyleConfig,
        buffer: &str,
        ranges: &[Range<usize>],
        filename_hint: Option<&str>,
    ) -> Result<ReplacementSet, Self::Error> {
        let _ = (style, buffer, ranges, filename_hint);
        Ok(ReplacementSet::empty())
    }
}
