use thiserror::Error;

#[derive(Debug, Error)]
/// Errors produced while resolving a style.
pub enum StyleError {
    #[error("no custom style configuration is available")]
    /// The custom style was requested without a configuration document.
    NoCustomConfiguration,

    #[error("unknown style '{0}'")]
    /// The name is neither a predefined nor a registered style.
    UnknownStyle(String),

    #[error("style configuration is not valid UTF-8: {0}")]
    /// The configuration document could not be decoded.
    InvalidUtf8(#[from] std::str::Utf8Error),

    #[error("YAML parse error: {0}")]
    /// The configuration document could not be parsed.
    Yaml(#[from] serde_yaml::Error),

    #[error("I/O error: {0}")]
    /// Reading a configuration file failed.
    Io(#[from] std::io::Error),
}
