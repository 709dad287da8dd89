#![warn(missing_docs)]
//! refmt-core - Headless Format-in-Place Kernel
//!
//! # Overview
//!
//! `refmt-core` reformats a buffer with an external formatter and moves the user's selections so
//! they keep pointing at the same logical text. The formatter and the style loader are
//! collaborators behind traits; this crate owns the coordinate mapping between them.
//!
//! # Architecture Layers
//!
//! ```text
//! ┌─────────────────────────────────────────────┐
//! │  FormatSession (style → format → compose)   │  ← Public API
//! ├─────────────────────────────────────────────┤
//! │  SelectionRemapper                          │  ← line/col → offset → line/col
//! ├─────────────────────────────────────────────┤
//! │  ReplacementSet (compose + translate)       │  ← Offset shifting
//! ├─────────────────────────────────────────────┤
//! │  OffsetIndex                                │  ← Line access
//! └─────────────────────────────────────────────┘
//! ```
//!
//! # Quick Start
//!
//! ```rust
//! use refmt_core::{OffsetIndex, Replacement, ReplacementSet, Selection, SelectionRemapper};
//!
//! let old_text = "int y  =2;\n";
//! let replacements: ReplacementSet = vec![
//!     Replacement::new(5, 2, " "),
//!     Replacement::insertion(8, " "),
//! ]
//! .into_iter()
//! .collect();
//!
//! let new_text = replacements.compose(old_text).unwrap();
//! assert_eq!(new_text, "int y = 2;\n");
//!
//! let old_index = OffsetIndex::from_text(old_text);
//! let new_index = OffsetIndex::from_text(&new_text);
//! let remapper = SelectionRemapper::new(&old_index, &replacements, &new_index);
//!
//! // The cursor on '=' follows it to its new column.
//! assert_eq!(remapper.remap(&Selection::cursor(0, 7)), Some(Selection::cursor(0, 6)));
//! ```
//!
//! # Module Description
//!
//! - [`offset_index`] - character offset <-> line/column mapping
//! - [`replacement`] - disjoint replacement sets, composition and offset translation
//! - [`remap`] - selection remapping with the fallback-cursor policy
//! - [`session`] - the format cycle state machine
//! - [`style`] / [`formatter`] - collaborator traits
//!
//! # Coordinates
//!
//! Offsets, lengths and columns count Unicode scalar values (`char`s). Lines keep their
//! terminators, so a line's length includes its `'\n'`.

pub mod error;
pub mod formatter;
pub mod offset_index;
pub mod remap;
pub mod replacement;
mod selection;
pub mod session;
pub mod style;

pub use error::{BoxError, FormatError, ReplacementError};
pub use formatter::Formatter;
pub use offset_index::{LineOffset, OffsetIndex};
pub use remap::{RemappedSelections, SelectionRemapper};
pub use replacement::{Replacement, ReplacementSet};
pub use selection::{Position, Selection};
pub use session::{
    FormatOptions, FormatOutcome, FormatSession, FormattedBuffer, HostBuffer, SessionState,
};
pub use style::{CUSTOM_STYLE, StyleConfig, StyleProvider};
