use crate::error::StyleError;
use crate::predefined::PredefinedStyle;
use refmt_core::{CUSTOM_STYLE, StyleConfig, StyleProvider};
use serde::Deserialize;
use std::collections::HashMap;
use std::path::Path;

/// A style document as written by the user: every key is optional and overrides the baseline
/// named by `BasedOnStyle`.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "PascalCase")]
struct StyleDocument {
    based_on_style: Option<String>,
    indent_width: Option<usize>,
    use_tab: Option<bool>,
    space_before_assignment_operators: Option<bool>,
    sort_includes: Option<bool>,
    max_empty_lines_to_keep: Option<usize>,
    insert_newline_at_eof: Option<bool>,
}

impl StyleDocument {
    fn apply_to(self, base: StyleConfig) -> StyleConfig {
        StyleConfig {
            based_on_style: base.based_on_style,
            indent_width: self.indent_width.unwrap_or(base.indent_width),
            use_tab: self.use_tab.unwrap_or(base.use_tab),
            space_before_assignment_operators: self
                .space_before_assignment_operators
                .unwrap_or(base.space_before_assignment_operators),
            sort_includes: self.sort_includes.unwrap_or(base.sort_includes),
            max_empty_lines_to_keep: self
                .max_empty_lines_to_keep
                .unwrap_or(base.max_empty_lines_to_keep),
            insert_newline_at_eof: self
                .insert_newline_at_eof
                .unwrap_or(base.insert_newline_at_eof),
        }
    }
}

/// Resolves predefined, registered and custom (YAML) styles.
///
/// Resolution order for a requested name:
/// 1. empty name: the registry's default style
/// 2. [`CUSTOM_STYLE`]: parse the caller-supplied document
/// 3. styles added with [`StyleRegistry::register`]
/// 4. [`PredefinedStyle`] names
#[derive(Debug, Clone)]
pub struct StyleRegistry {
    default_style: PredefinedStyle,
    registered: HashMap<String, StyleConfig>,
}

impl Default for StyleRegistry {
    fn default() -> Self {
        Self::with_default(PredefinedStyle::Llvm)
    }
}

impl StyleRegistry {
    /// Create a registry whose default style is LLVM.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a registry with an explicit default style.
    pub fn with_default(default_style: PredefinedStyle) -> Self {
        Self {
            default_style,
            registered: HashMap::new(),
        }
    }

    /// The style used when an empty name is requested.
    pub fn default_style(&self) -> PredefinedStyle {
        self.default_style
    }

    /// Register a named style. Names are matched ignoring ASCII case.
    pub fn register(&mut self, name: impl AsRef<str>, config: StyleConfig) {
        self.registered
            .insert(name.as_ref().to_ascii_lowercase(), config);
    }

    /// Parse a YAML style document.
    ///
    /// `BasedOnStyle` picks the baseline (the registry default when absent); every other key
    /// overrides it. Unknown keys are ignored.
    pub fn parse_document(&self, bytes: &[u8]) -> Result<StyleConfig, StyleError> {
        let yaml = std::str::from_utf8(bytes)?;
        if yaml.trim().is_empty() {
            return Err(StyleError::NoCustomConfiguration);
        }

        let document: StyleDocument = serde_yaml::from_str(yaml)?;
        let base = match document.based_on_style.as_deref() {
            Some(name) => PredefinedStyle::from_name(name)
                .ok_or_else(|| StyleError::UnknownStyle(name.to_string()))?,
            None => self.default_style,
        };

        tracing::debug!(based_on = base.name(), "parsed custom style document");
        Ok(document.apply_to(base.config()))
    }

    fn resolve(&self, name: &str, custom: Option<&[u8]>) -> Result<StyleConfig, StyleError> {
        let name = name.trim();
        if name.is_empty() {
            return Ok(self.default_style.config());
        }

        if name.eq_ignore_ascii_case(CUSTOM_STYLE) {
            let bytes = custom.ok_or(StyleError::NoCustomConfiguration)?;
            return self.parse_document(bytes);
        }

        if let Some(config) = self.registered.get(&name.to_ascii_lowercase()) {
            return Ok(config.clone());
        }

        PredefinedStyle::from_name(name)
            .map(PredefinedStyle::config)
            .ok_or_else(|| StyleError::UnknownStyle(name.to_string()))
    }
}

impl StyleProvider for StyleRegistry {
    type Error = StyleError;

    fn resolve_style(&self, name: &str, custom: Option<&[u8]>) -> Result<StyleConfig, StyleError> {
        self.resolve(name, custom)
    }
}

/// Read a style document from disk, for passing to [`StyleRegistry`] as the custom style.
pub fn read_style_file(path: impl AsRef<Path>) -> Result<Vec<u8>, StyleError> {
    Ok(std::fs::read(path)?)
}
