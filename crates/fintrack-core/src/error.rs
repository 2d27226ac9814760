use std::{fmt, io};

use thiserror::Error;

#[derive(Debug, Error)]
pub enum CoreError {
    #[error("Records not found for user: {0}")]
    RecordsNotFound(String),
    #[error("Validation failed: {0}")]
    Validation(String),
    #[error("Remote forecast failed ({code}): {message}")]
    Remote {
        code: RemoteErrorCode,
        message: String,
    },
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),
    #[error("Serialization error: {0}")]
    Serde(String),
}

impl CoreError {
    pub fn remote(code: RemoteErrorCode, message: impl Into<String>) -> Self {
        CoreError::Remote {
            code,
            message: message.into(),
        }
    }
}

/// Transport-level classification reported by the remote forecast callable.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RemoteErrorCode {
    Internal,
    Unauthenticated,
    InvalidArgument,
}

impl fmt::Display for RemoteErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            RemoteErrorCode::Internal => "internal",
            RemoteErrorCode::Unauthenticated => "unauthenticated",
            RemoteErrorCode::InvalidArgument => "invalid-argument",
        };
        f.write_str(label)
    }
}
