//! Error handling for word-forge

use thiserror::Error;

use crate::types::GenerationMode;

/// Main error type for word-forge
#[derive(Error, Debug, Clone)]
pub enum WordForgeError {
    #[error("Invalid length range: min {min} / max {max} (need 1 <= min <= max)")]
    InvalidRange { min: usize, max: usize },

    #[error("Empty alphabet: {mode} mode needs at least one character class")]
    EmptyAlphabet { mode: GenerationMode },

    #[error("Output write error: {message}")]
    SinkWrite {
        message: String,
        path: Option<String>,
    },

    #[error("Random source error: {message}")]
    RandomSource { message: String },

    #[error("Configuration error: {message}")]
    Config { message: String },

    #[error("Validation error: {message}")]
    Validation { message: String },

    #[error("Parse error: {message}")]
    Parse {
        message: String,
        content: Option<String>,
    },

    #[error("CLI error: {message}")]
    Cli { message: String },

    /// Esc (`interrupted: false`) or Ctrl-C (`interrupted: true`) at a prompt
    #[error("Operation cancelled")]
    Cancelled { interrupted: bool },

    #[error("Internal error: {message}")]
    Internal { message: String },
}

impl WordForgeError {
    /// Create an invalid range error
    pub fn invalid_range(min: usize, max: usize) -> Self {
        Self::InvalidRange { min, max }
    }

    /// Create an empty alphabet error
    pub fn empty_alphabet(mode: GenerationMode) -> Self {
        Self::EmptyAlphabet { mode }
    }

    /// Create an output write error
    pub fn sink_write(message: impl Into<String>, path: Option<String>) -> Self {
        Self::SinkWrite {
            message: message.into(),
            path,
        }
    }

    /// Create a random source error
    pub fn random_source(message: impl Into<String>) -> Self {
        Self::RandomSource {
            message: message.into(),
        }
    }

    /// Create a configuration error
    pub fn config(message: impl Into<String>) -> Self {
        Self::Config {
            message: message.into(),
        }
    }

    /// Create a validation error
    pub fn validation(message: impl Into<String>) -> Self {
        Self::Validation {
            message: message.into(),
        }
    }

    /// Create a parse error
    pub fn parse(message: impl Into<String>, content: Option<String>) -> Self {
        Self::Parse {
            message: message.into(),
            content,
        }
    }

    /// Create a CLI error
    pub fn cli(message: impl Into<String>) -> Self {
        Self::Cli {
            message: message.into(),
        }
    }

    /// Create a cancellation error
    pub fn cancelled(interrupted: bool) -> Self {
        Self::Cancelled { interrupted }
    }

    /// Create an internal error
    pub fn internal(message: impl Into<String>) -> Self {
        Self::Internal {
            message: message.into(),
        }
    }

    /// Whether the error was caused by the parameters rather than the environment
    pub fn is_caller_error(&self) -> bool {
        matches!(
            self,
            Self::InvalidRange { .. } | Self::EmptyAlphabet { .. } | Self::Validation { .. }
        )
    }

    /// Get user-friendly error message with suggestions
    pub fn user_message(&self) -> String {
        match self {
            Self::InvalidRange { min, max } => {
                format!("❌ Invalid length range {}..{}\n💡 Minimum must be at least 1 and not above maximum", min, max)
            }
            Self::EmptyAlphabet { mode } => {
                format!("❌ No character set selected for {} mode\n💡 Enable at least one of lowercase, uppercase, digits or symbols", mode)
            }
            Self::SinkWrite { message, path } => {
                let path_info = path.as_ref().map_or(String::new(), |p| format!(" ({})", p));
                format!("❌ Could not write wordlist{}: {}\n💡 Check disk space and file permissions; lines already written are kept", path_info, message)
            }
            Self::RandomSource { message } => {
                format!("❌ Secure random source failed: {}\n💡 The operating system RNG is unavailable", message)
            }
            Self::Config { message } => {
                format!("❌ Configuration problem: {}\n💡 Check your .env file or WORDFORGE_* variables", message)
            }
            Self::Validation { message } => {
                format!("❌ Validation error: {}\n💡 Check your input format", message)
            }
            Self::Parse { message, .. } => {
                format!("❌ Parse error: {}\n💡 Check the preset file is valid JSON", message)
            }
            Self::Cli { message } => {
                format!("❌ Command error: {}\n💡 Use --help for usage information", message)
            }
            Self::Cancelled { .. } => "👋 Cancelled".to_string(),
            Self::Internal { message } => {
                format!("❌ Internal error: {}\n💡 This is a bug, please report it", message)
            }
        }
    }
}

impl From<std::io::Error> for WordForgeError {
    fn from(err: std::io::Error) -> Self {
        Self::sink_write(err.to_string(), None)
    }
}

impl From<serde_json::Error> for WordForgeError {
    fn from(err: serde_json::Error) -> Self {
        Self::parse(err.to_string(), None)
    }
}

impl From<inquire::InquireError> for WordForgeError {
    fn from(err: inquire::InquireError) -> Self {
        match err {
            inquire::InquireError::OperationCanceled => Self::cancelled(false),
            inquire::InquireError::OperationInterrupted => Self::cancelled(true),
            other => Self::cli(other.to_string()),
        }
    }
}

/// Result type alias for convenience
pub type Result<T> = std::result::Result<T, WordForgeError>;

/// Helper macros for common error patterns
#[macro_export]
macro_rules! config_error {
    ($msg:expr) => {
        $crate::error::WordForgeError::config($msg)
    };
    ($fmt:expr, $($arg:tt)*) => {
        $crate::error::WordForgeError::config(format!($fmt, $($arg)*))
    };
}

#[macro_export]
macro_rules! validation_error {
    ($msg:expr) => {
        $crate::error::WordForgeError::validation($msg)
    };
    ($fmt:expr, $($arg:tt)*) => {
        $crate::error::WordForgeError::validation(format!($fmt, $($arg)*))
    };
}
