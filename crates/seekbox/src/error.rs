#![forbid(unsafe_code)]

//! Error model for seekbox applications.
//!
//! Widgets themselves do not fail: bad input is ignored and out-of-range
//! indices are no-ops. What can fail is the environment around them, namely
//! the terminal session, output writes, and host setup such as log files.

use std::fmt;

/// Terminal session failures.
#[derive(Debug)]
pub enum TerminalError {
    /// I/O failure on the terminal.
    Io(std::io::Error),
    /// Raw mode or a terminal mode toggle failed.
    SessionSetup(String),
    /// Size query returned unusable dimensions.
    InvalidSize { width: u16, height: u16 },
}

impl fmt::Display for TerminalError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Io(err) => write!(f, "terminal I/O error: {err}"),
            Self::SessionSetup(msg) => write!(f, "terminal setup failed: {msg}"),
            Self::InvalidSize { width, height } => {
                write!(f, "invalid terminal size: {width}x{height}")
            }
        }
    }
}

impl std::error::Error for TerminalError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Io(err) => Some(err),
            _ => None,
        }
    }
}

/// Top-level error type for seekbox apps.
#[derive(Debug)]
pub enum Error {
    /// Terminal session failure.
    Terminal(TerminalError),
    /// Raw I/O error (convenience variant for `?` on io::Result).
    Io(std::io::Error),
    /// Logging could not be set up.
    Logging(String),
}

/// Standard result type for seekbox APIs.
pub type Result<T> = std::result::Result<T, Error>;

impl Error {
    /// Whether the terminal is known to be unusable after this error.
    pub fn is_fatal(&self) -> bool {
        matches!(
            self,
            Self::Terminal(TerminalError::SessionSetup(_) | TerminalError::Io(_)) | Self::Io(_)
        )
    }
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Terminal(err) => write!(f, "{err}"),
            Self::Io(err) => write!(f, "{err}"),
            Self::Logging(msg) => write!(f, "logging setup failed: {msg}"),
        }
    }
}

impl std::error::Error for Error {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Terminal(err) => Some(err),
            Self::Io(err) => Some(err),
            Self::Logging(_) => None,
        }
    }
}

impl From<std::io::Error> for Error {
    fn from(err: std::io::Error) -> Self {
        Self::Io(err)
    }
}

impl From<TerminalError> for Error {
    fn from(err: TerminalError) -> Self {
        Self::Terminal(err)
    }
}
