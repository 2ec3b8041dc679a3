//! Retry and backoff for artifact downloads.
//!
//! Transport failures (timeouts, throttling, dropped connections) are
//! classified and retried with exponential backoff. Integrity failures are
//! not handled here; the cache layer decides whether to re-download.

mod classify;
mod error;
mod policy;
mod run;

pub use classify::{classify, classify_curl_error, classify_http_status};
pub use error::TransferError;
pub use policy::{ErrorKind, RetryDecision, RetryPolicy};
pub use run::run_with_retry;
