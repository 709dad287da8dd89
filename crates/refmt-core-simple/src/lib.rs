//! `refmt-core-simple` - a small whitespace formatter for `refmt-core`.
//!
//! This crate is intended for tests, demos and C-like sources where a full formatter is
//! unnecessary. It only ever rewrites whitespace gaps (plus whole include directives when sorting
//! them), which keeps its replacements small and its output idempotent.

mod includes;
mod line_ending;
mod lines;
mod whitespace;

pub use line_ending::LineEnding;

use refmt_core::{Formatter, Replacement, ReplacementSet, StyleConfig};
use std::convert::Infallible;
use std::ops::Range;

/// A whitespace-only [`Formatter`].
///
/// [`Formatter::reformat`] handles indentation style, trailing whitespace, spacing around
/// assignment operators, surplus blank lines and the final newline. [`Formatter::sort_includes`]
/// orders blocks of `#include` directives.
#[derive(Debug, Clone, Copy, Default)]
pub struct WhitespaceFormatter;

impl WhitespaceFormatter {
    /// Create a formatter.
    pub fn new() -> Self {
        Self
    }
}

impl Formatter for WhitespaceFormatter {
    type Error = Infallible;

    fn reformat(
        &self,
        style: &StyleConfig,
        buffer: &str,
        ranges: &[Range<usize>],
    ) -> Result<ReplacementSet, Self::Error> {
        let replacements = restrict(whitespace::reformat(style, buffer), ranges);
        tracing::debug!(count = replacements.len(), "whitespace pass");
        Ok(replacements)
    }

    fn sort_includes(
        &self,
        _style: &StyleConfig,
        buffer: &str,
        ranges: &[Range<usize>],
        filename_hint: Option<&str>,
    ) -> Result<ReplacementSet, Self::Error> {
        let replacements = restrict(includes::sort_includes(buffer, filename_hint), ranges);
        tracing::debug!(count = replacements.len(), "include sorting pass");
        Ok(replacements)
    }
}

/// Keep the replacements that touch at least one of `ranges`.
fn restrict(replacements: Vec<Replacement>, ranges: &[Range<usize>]) -> ReplacementSet {
    replacements
        .into_iter()
        .filter(|replacement| ranges.iter().any(|range| touches(replacement, range)))
        .collect()
}

fn touches(replacement: &Replacement, range: &Range<usize>) -> bool {
    if replacement.length == 0 {
        range.start <= replacement.offset && replacement.offset <= range.end
    } else {
        replacement.offset < range.end && range.start < replacement.end()
    }
}
