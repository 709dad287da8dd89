//! Style configuration and the style-provider seam.
//!
//! `refmt-core` does not load or parse style documents itself. A [`StyleProvider`] resolves a
//! requested style name (plus optional caller-supplied configuration bytes for the `"custom"`
//! style) into a [`StyleConfig`], which is passed through to the [`crate::Formatter`].

use serde::{Deserialize, Serialize};

/// Name of the style that reads its configuration from caller-supplied bytes.
pub const CUSTOM_STYLE: &str = "custom";

/// A resolved set of formatting rules.
///
/// Keys (de)serialize in `PascalCase` (`IndentWidth`, `SortIncludes`, ...), so style documents
/// read like clang-format configuration files. Missing keys take their [`Default`] value.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase", default)]
pub struct StyleConfig {
    /// The predefined style this configuration was derived from, if any.
    pub based_on_style: Option<String>,
    /// Number of columns per indentation level.
    pub indent_width: usize,
    /// Indent with tabs instead of spaces.
    pub use_tab: bool,
    /// Put exactly one space on each side of assignment operators.
    pub space_before_assignment_operators: bool,
    /// Sort blocks of consecutive `#include` lines.
    pub sort_includes: bool,
    /// Maximum number of consecutive blank lines to keep.
    pub max_empty_lines_to_keep: usize,
    /// Make sure a non-empty buffer ends with a newline.
    pub insert_newline_at_eof: bool,
}

impl Default for StyleConfig {
    fn default() -> Self {
        Self {
            based_on_style: None,
            indent_width: 2,
            use_tab: false,
            space_before_assignment_operators: true,
            sort_includes: true,
            max_empty_lines_to_keep: 1,
            insert_newline_at_eof: true,
        }
    }
}

/// Resolves style names into [`StyleConfig`] values.
///
/// Resolution may block (for example when the provider reads a file); the session treats it as a
/// single synchronous call.
pub trait StyleProvider {
    /// The error type returned by [`StyleProvider::resolve_style`].
    type Error: std::error::Error + Send + Sync + 'static;

    /// Resolve `name` into a style.
    ///
    /// `custom` carries the configuration document for [`CUSTOM_STYLE`]; providers should fail
    /// when it is requested without one.
    fn resolve_style(&self, name: &str, custom: Option<&[u8]>) -> Result<StyleConfig, Self::Error>;
}
