use refmt_core::StyleConfig;

/// Built-in baseline styles.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PredefinedStyle {
    /// LLVM coding standards.
    Llvm,
    /// Google style guide.
    Google,
    /// Chromium style guide.
    Chromium,
    /// Mozilla style guide.
    Mozilla,
    /// WebKit style guide.
    WebKit,
}

impl PredefinedStyle {
    /// Every predefined style.
    pub const ALL: [PredefinedStyle; 5] = [
        PredefinedStyle::Llvm,
        PredefinedStyle::Google,
        PredefinedStyle::Chromium,
        PredefinedStyle::Mozilla,
        PredefinedStyle::WebKit,
    ];

    /// Look a style up by name, ignoring ASCII case.
    pub fn from_name(name: &str) -> Option<Self> {
        Self::ALL
            .into_iter()
            .find(|style| style.name().eq_ignore_ascii_case(name.trim()))
    }

    /// Canonical name (`"LLVM"`, `"Google"`, ...).
    pub fn name(self) -> &'static str {
        match self {
            PredefinedStyle::Llvm => "LLVM",
            PredefinedStyle::Google => "Google",
            PredefinedStyle::Chromium => "Chromium",
            PredefinedStyle::Mozilla => "Mozilla",
            PredefinedStyle::WebKit => "WebKit",
        }
    }

    /// The full configuration of this style.
    pub fn config(self) -> StyleConfig {
        let base = StyleConfig {
            based_on_style: Some(self.name().to_string()),
            ..StyleConfig::default()
        };

        match self {
            PredefinedStyle::Llvm | PredefinedStyle::Google | PredefinedStyle::Chromium => base,
            PredefinedStyle::Mozilla => StyleConfig {
                insert_newline_at_eof: false,
                ..base
            },
            PredefinedStyle::WebKit => StyleConfig {
                indent_width: 4,
                sort_includes: false,
                insert_newline_at_eof: false,
                ..base
            },
        }
    }
}
