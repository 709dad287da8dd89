#![warn(missing_docs)]
//! `refmt-core-style` - style resolution for `refmt-core`.
//!
//! Provides [`StyleRegistry`], a [`refmt_core::StyleProvider`] that knows a handful of
//! predefined styles and parses user style documents (YAML, clang-format-like keys) for the
//! `"custom"` style. Where the document comes from is the caller's business; the registry only
//! ever sees bytes.

mod error;
mod predefined;
mod registry;

pub use error::StyleError;
pub use predefined::PredefinedStyle;
pub use registry::{StyleRegistry, read_style_file};
