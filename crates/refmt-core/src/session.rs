//! The format cycle: resolve style, compute replacements, compose, remap selections.
//!
//! A [`FormatSession`] works on an immutable [`HostBuffer`] snapshot and returns a new buffer and
//! selection set as one [`FormatOutcome`]. The host installs it with [`HostBuffer::apply`], so
//! there is never a state where only the text or only the selections changed.

use crate::error::FormatError;
use crate::formatter::Formatter;
use crate::offset_index::OffsetIndex;
use crate::remap::SelectionRemapper;
use crate::replacement::ReplacementSet;
use crate::selection::Selection;
use crate::style::{StyleConfig, StyleProvider};
use std::fmt;

/// The host's buffer and selections, as handed to a [`FormatSession`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HostBuffer {
    /// Complete buffer text.
    pub text: String,
    /// The buffer split into lines, terminators included.
    pub lines: Vec<String>,
    /// Current selections (0-based line/column).
    pub selections: Vec<Selection>,
}

impl HostBuffer {
    /// Create a host buffer, deriving `lines` from `text`.
    pub fn new(text: impl Into<String>, selections: Vec<Selection>) -> Self {
        let text = text.into();
        let lines = text.split_inclusive('\n').map(str::to_string).collect();
        Self {
            text,
            lines,
            selections,
        }
    }

    /// Install a format outcome.
    ///
    /// Text, lines and selections are replaced together; [`FormatOutcome::NoChangeNeeded`]
    /// leaves the buffer as it is.
    pub fn apply(&mut self, outcome: FormatOutcome) {
        if let FormatOutcome::Formatted(formatted) = outcome {
            *self = HostBuffer::new(formatted.text, formatted.selections);
        }
    }
}

/// Per-invocation settings.
///
/// This replaces any process-wide "defaults" object: the host owns it and passes it in.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FormatOptions {
    /// Requested style name (a predefined style, or [`crate::CUSTOM_STYLE`]).
    pub style_name: String,
    /// Configuration document for the custom style.
    pub custom_style: Option<Vec<u8>>,
    /// File name of the buffer, used to recognise its main header when sorting includes.
    pub filename_hint: Option<String>,
}

impl FormatOptions {
    /// Options for the given style name.
    pub fn new(style_name: impl Into<String>) -> Self {
        Self {
            style_name: style_name.into(),
            ..Self::default()
        }
    }

    /// Attach a custom style document.
    pub fn with_custom_style(mut self, bytes: impl Into<Vec<u8>>) -> Self {
        self.custom_style = Some(bytes.into());
        self
    }

    /// Attach a file name hint.
    pub fn with_filename_hint(mut self, filename: impl Into<String>) -> Self {
        self.filename_hint = Some(filename.into());
        self
    }
}

/// The new buffer and selections produced by a successful format.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FormattedBuffer {
    /// Formatted buffer text.
    pub text: String,
    /// Remapped selections.
    pub selections: Vec<Selection>,
    /// `true` if no selection could be remapped and a cursor at `(0, 0)` was placed instead.
    pub fallback_cursor: bool,
    /// Number of replacements that were applied.
    pub replacement_count: usize,
}

/// Successful result of a format cycle.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FormatOutcome {
    /// The buffer already conforms to the style; nothing was changed.
    NoChangeNeeded,
    /// The buffer was reformatted.
    Formatted(FormattedBuffer),
}

impl FormatOutcome {
    /// Returns `true` for [`FormatOutcome::NoChangeNeeded`].
    pub fn is_unchanged(&self) -> bool {
        matches!(self, FormatOutcome::NoChangeNeeded)
    }

    /// The formatted buffer, if anything changed.
    pub fn formatted(&self) -> Option<&FormattedBuffer> {
        match self {
            FormatOutcome::Formatted(formatted) => Some(formatted),
            FormatOutcome::NoChangeNeeded => None,
        }
    }
}

impl fmt::Display for FormatOutcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FormatOutcome::NoChangeNeeded => write!(f, "No formatting changes needed"),
            FormatOutcome::Formatted(formatted) => {
                write!(f, "Applied {} formatting changes", formatted.replacement_count)
            }
        }
    }
}

/// Progress of a [`FormatSession`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionState {
    /// Nothing has happened yet.
    Idle,
    /// The style was resolved.
    StyleResolved,
    /// Replacements were computed (and merged).
    Formatted,
    /// Replacements were applied to the buffer.
    Composed,
    /// Selections were remapped onto the new buffer.
    SelectionsRemapped,
    /// The cycle finished, with or without changes.
    Done,
    /// The cycle stopped with an error.
    Failed,
}

/// Drives one format cycle against a [`StyleProvider`] and a [`Formatter`].
pub struct FormatSession<'a, P, F> {
    provider: &'a P,
    formatter: &'a F,
    options: FormatOptions,
    state: SessionState,
}

impl<'a, P, F> FormatSession<'a, P, F>
where
    P: StyleProvider,
    F: Formatter,
{
    /// Create a session.
    pub fn new(provider: &'a P, formatter: &'a F, options: FormatOptions) -> Self {
        Self {
            provider,
            formatter,
            options,
            state: SessionState::Idle,
        }
    }

    /// The last state reached.
    pub fn state(&self) -> SessionState {
        self.state
    }

    /// The options this session runs with.
    pub fn options(&self) -> &FormatOptions {
        &self.options
    }

    /// Format `host` and remap its selections.
    ///
    /// On error nothing about `host` has changed; the caller keeps its buffer and selections.
    pub fn run(&mut self, host: &HostBuffer) -> Result<FormatOutcome, FormatError> {
        self.state = SessionState::Idle;

        let result = self.drive(host);
        match &result {
            Ok(outcome) => tracing::info!(style = %self.options.style_name, "{outcome}"),
            Err(err) => {
                tracing::warn!(style = %self.options.style_name, error = %err, "format failed");
                self.transition(SessionState::Failed);
            }
        }
        result
    }

    fn drive(&mut self, host: &HostBuffer) -> Result<FormatOutcome, FormatError> {
        let old_index = old_index_for(host);

        let style = self.resolve_style()?;
        self.transition(SessionState::StyleResolved);

        let replacements = self.compute_replacements(&style, host, old_index.total_len())?;
        self.transition(SessionState::Formatted);

        if replacements.is_empty() {
            self.transition(SessionState::Done);
            return Ok(FormatOutcome::NoChangeNeeded);
        }

        let text = replacements.compose(&host.text)?;
        self.transition(SessionState::Composed);

        let new_index = OffsetIndex::from_text(&text);
        let remapped = SelectionRemapper::new(&old_index, &replacements, &new_index)
            .remap_all(&host.selections);
        self.transition(SessionState::SelectionsRemapped);

        let formatted = FormattedBuffer {
            text,
            selections: remapped.selections,
            fallback_cursor: remapped.fallback_cursor,
            replacement_count: replacements.len(),
        };
        self.transition(SessionState::Done);
        Ok(FormatOutcome::Formatted(formatted))
    }

    fn resolve_style(&self) -> Result<StyleConfig, FormatError> {
        let name = &self.options.style_name;
        self.provider
            .resolve_style(name, self.options.custom_style.as_deref())
            .map_err(|err| FormatError::StyleUnavailable {
                style: name.clone(),
                source: Box::new(err),
            })
    }

    fn compute_replacements(
        &self,
        style: &StyleConfig,
        host: &HostBuffer,
        char_len: usize,
    ) -> Result<ReplacementSet, FormatError> {
        let ranges = [0..char_len];
        let failed = |err: F::Error| FormatError::FormatterFailed(Box::new(err));

        let mut replacements = self
            .formatter
            .reformat(style, &host.text, &ranges)
            .map_err(failed)?;

        if style.sort_includes {
            let sorted = self
                .formatter
                .sort_includes(
                    style,
                    &host.text,
                    &ranges,
                    self.options.filename_hint.as_deref(),
                )
                .map_err(failed)?;
            tracing::debug!(
                reformat = replacements.len(),
                sort_includes = sorted.len(),
                "merging replacement sets"
            );
            replacements.merge(sorted)?;
        }

        Ok(replacements)
    }

    fn transition(&mut self, next: SessionState) {
        tracing::debug!(from = ?self.state, to = ?next, "format session transition");
        self.state = next;
    }
}

/// Index for the host's buffer, built from the host's lines.
///
/// Falls back to splitting the text if the lines do not add up to the buffer.
fn old_index_for(host: &HostBuffer) -> OffsetIndex {
    let index = OffsetIndex::build(&host.lines);
    let char_len = host.text.chars().count();
    if index.total_len() == char_len {
        return index;
    }

    tracing::warn!(
        lines_len = index.total_len(),
        buffer_len = char_len,
        "host lines do not match the buffer, rebuilding the line index from text"
    );
    OffsetIndex::from_text(&host.text)
}
