use std::error::Error;
use std::fmt::{self, Display};
use std::io;

/// Library-wide error type covering configuration, transport, and I/O failures.
#[derive(Debug)]
pub enum AppError {
    Io(io::Error),
    /// Configuration or environment issue that prevents the run from starting.
    ConfigError(String),
    /// Network-level failure talking to a named upstream (source host, gateway, audio service).
    RequestError {
        service: String,
        message: String,
    },
    /// Upstream answered, but not with something we can use.
    InvalidResponse {
        service: String,
        message: String,
    },
}

impl Display for AppError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AppError::Io(err) => write!(f, "{}", err),
            AppError::ConfigError(message) => write!(f, "{message}"),
            AppError::RequestError { service, message } => {
                write!(f, "{service} request failed: {message}")
            }
            AppError::InvalidResponse { service, message } => {
                write!(f, "{service} returned an invalid response: {message}")
            }
        }
    }
}

impl Error for AppError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            AppError::Io(err) => Some(err),
            AppError::ConfigError(_)
            | AppError::RequestError { .. }
            | AppError::InvalidResponse { .. } => None,
        }
    }
}

impl From<io::Error> for AppError {
    fn from(value: io::Error) -> Self {
        AppError::Io(value)
    }
}

impl AppError {
    pub(crate) fn config_error<S: Into<String>>(message: S) -> Self {
        AppError::ConfigError(message.into())
    }

    pub(crate) fn request_error<S: Into<String>, M: Into<String>>(service: S, message: M) -> Self {
        AppError::RequestError { service: service.into(), message: message.into() }
    }

    pub(crate) fn invalid_response<S: Into<String>, M: Into<String>>(
        service: S,
        message: M,
    ) -> Self {
        AppError::InvalidResponse { service: service.into(), message: message.into() }
    }

    /// Provide an `io::ErrorKind`-like view for callers that only care about the category.
    pub fn kind(&self) -> io::ErrorKind {
        match self {
            AppError::Io(err) => err.kind(),
            AppError::ConfigError(_) => io::ErrorKind::InvalidInput,
            AppError::RequestError { .. } => io::ErrorKind::Other,
            AppError::InvalidResponse { .. } => io::ErrorKind::InvalidData,
        }
    }
}
