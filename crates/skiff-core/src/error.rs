//! Error types for Skiff Core

use thiserror::Error;

/// Result type alias for shell operations
pub type Result<T> = std::result::Result<T, Error>;

/// Shell error types
#[derive(Error, Debug)]
pub enum Error {
    // Shell bridge errors
    #[error("Shell bridge unavailable: {0}")]
    BridgeUnavailable(String),

    #[error("Shell call `{op}` failed: {message}")]
    Shell { op: &'static str, message: String },

    // Media errors
    #[error("Failed to convert path to playable URL: {0}")]
    Conversion(String),

    #[error("Failed to create object URL: {0}")]
    ObjectUrl(String),

    #[error("Playback failed: {0}")]
    Playback(String),

    #[error("Dropped file is not a video: {mime}")]
    NotVideo { mime: String },

    // Document errors
    #[error("Fullscreen request failed: {0}")]
    Fullscreen(String),

    #[error("Window close failed: {0}")]
    WindowClose(String),

    // Configuration errors
    #[error("Invalid configuration: {0}")]
    InvalidConfig(#[from] serde_json::Error),
}

impl Error {
    /// Create a shell bridge call error
    pub fn shell(op: &'static str, message: impl Into<String>) -> Self {
        Error::Shell {
            op,
            message: message.into(),
        }
    }

    /// Returns true if the failure came from the native shell bridge
    pub fn is_shell_failure(&self) -> bool {
        matches!(self, Error::Shell { .. } | Error::BridgeUnavailable(_))
    }

    /// Returns the error code used in diagnostics
    pub fn error_code(&self) -> &'static str {
        match self {
            Error::BridgeUnavailable(_) => "BRIDGE_UNAVAILABLE",
            Error::Shell { .. } => "SHELL_CALL",
            Error::Conversion(_) => "PATH_CONVERSION",
            Error::ObjectUrl(_) => "OBJECT_URL",
            Error::Playback(_) => "PLAYBACK",
            Error::NotVideo { .. } => "NOT_VIDEO",
            Error::Fullscreen(_) => "FULLSCREEN",
            Error::WindowClose(_) => "WINDOW_CLOSE",
            Error::InvalidConfig(_) => "INVALID_CONFIG",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_shell_error_display() {
        let err = Error::shell("minimize", "window gone");
        assert_eq!(err.to_string(), "Shell call `minimize` failed: window gone");
        assert_eq!(err.error_code(), "SHELL_CALL");
        assert!(err.is_shell_failure());
    }

    #[test]
    fn test_media_errors_are_not_shell_failures() {
        let err = Error::NotVideo {
            mime: "image/png".to_string(),
        };
        assert!(!err.is_shell_failure());
        assert_eq!(err.error_code(), "NOT_VIDEO");
        assert!(!Error::Playback("NotAllowedError".into()).is_shell_failure());
    }

    #[test]
    fn test_object_url_error_code() {
        let err = Error::ObjectUrl("revoke refused".into());
        assert_eq!(err.error_code(), "OBJECT_URL");
        assert!(!err.is_shell_failure());
    }
}
