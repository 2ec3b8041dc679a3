//! Transfer error type for retry classification.

use std::fmt;

/// Error from a single download attempt, kept typed so it can be classified
/// before being converted to `anyhow`. Wrapped causes are exposed through
/// `source()` only, so a `{:#}` chain prints them once.
#[derive(Debug)]
pub enum TransferError {
    /// Curl reported an error (timeout, connection, etc.).
    Curl(curl::Error),
    /// HTTP response had a non-2xx status.
    Http(u32),
    /// Writing the temp file failed. Not retried.
    Storage(std::io::Error),
}

impl fmt::Display for TransferError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TransferError::Curl(_) => write!(f, "curl transfer failed"),
            TransferError::Http(code) => write!(f, "HTTP {}", code),
            TransferError::Storage(_) => write!(f, "storage write failed"),
        }
    }
}

impl std::error::Error for TransferError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            TransferError::Curl(e) => Some(e),
            TransferError::Storage(e) => Some(e),
            TransferError::Http(_) => None,
        }
    }
}

impl From<curl::Error> for TransferError {
    fn from(e: curl::Error) -> Self {
        TransferError::Curl(e)
    }
}
