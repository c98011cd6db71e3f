//! Unified error type.

use std::fmt;

/// The error type returned by roster's fallible startup operations.
///
/// Application-level errors (400, 404, etc.) are expressed as HTTP
/// [`Response`](crate::Response) values via [`ApiError`](crate::api::ApiError),
/// not as `Error`s. This type surfaces infrastructure failures: reading the
/// configuration, binding to a port, or accepting a connection.
#[derive(Debug)]
pub enum Error {
    Io(std::io::Error),
    /// An environment variable held a value that could not be used.
    Config { var: &'static str, reason: String },
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Io(e) => write!(f, "io: {e}"),
            Self::Config { var, reason } => write!(f, "config: {var}: {reason}"),
        }
    }
}

impl std::error::Error for Error {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Io(e) => Some(e),
            Self::Config { .. } => None,
        }
    }
}

impl From<std::io::Error> for Error {
    fn from(e: std::io::Error) -> Self {
        Self::Io(e)
    }
}
