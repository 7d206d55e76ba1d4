//! Error types of keystack-config

use std::fmt;

/// Error of loading a `keyboard.toml`
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConfigError {
    /// File I/O error
    FileRead { path: String, message: String },
    /// TOML parsing error
    TomlParse { path: String, message: String },
    /// Validation error with context
    Validation { field: String, message: String },
    /// A key string which is not a known keycode or action
    InvalidKey { field: String, key: String, message: String },
    /// A layer reference which doesn't exist in the layout
    UndefinedLayer { field: String, layer: String },
    /// An `@alias` which is not defined in `[aliases]`
    UndefinedAlias { field: String, alias: String },
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::FileRead { path, message } => {
                write!(f, "Failed to read config file '{}': {}", path, message)
            }
            ConfigError::TomlParse { path, message } => {
                write!(f, "Failed to parse '{}': {}", path, message)
            }
            ConfigError::Validation { field, message } => {
                write!(f, "Validation error in '{}': {}", field, message)
            }
            ConfigError::InvalidKey { field, key, message } => {
                write!(f, "Invalid key '{}' in '{}': {}", key, field, message)
            }
            ConfigError::UndefinedLayer { field, layer } => {
                write!(f, "Undefined layer '{}' in '{}'", layer, field)
            }
            ConfigError::UndefinedAlias { field, alias } => {
                write!(f, "Undefined alias '@{}' in '{}'", alias, field)
            }
        }
    }
}

impl std::error::Error for ConfigError {}

/// Result type alias for configuration operations
pub type ConfigResult<T> = Result<T, ConfigError>;

impl ConfigError {
    pub(crate) fn validation(field: impl Into<String>, message: impl Into<String>) -> Self {
        ConfigError::Validation {
            field: field.into(),
            message: message.into(),
        }
    }
}
