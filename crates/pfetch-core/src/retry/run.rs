//! Retry loop: run an attempt until success or the policy says stop.

use super::classify::classify;
use super::error::TransferError;
use super::policy::{RetryDecision, RetryPolicy};

/// Calls `f` until it succeeds or the policy gives up, sleeping between
/// attempts. `f` receives the 1-based attempt number.
pub fn run_with_retry<T, F>(policy: &RetryPolicy, mut f: F) -> Result<T, TransferError>
where
    F: FnMut(u32) -> Result<T, TransferError>,
{
    let mut attempt = 1u32;
    loop {
        match f(attempt) {
            Ok(v) => return Ok(v),
            Err(e) => match policy.decide(attempt, classify(&e)) {
                RetryDecision::NoRetry => return Err(e),
                RetryDecision::RetryAfter(d) => {
                    tracing::warn!("attempt {} failed: {}; retrying in {:?}", attempt, e, d);
                    std::thread::sleep(d);
                    attempt += 1;
                }
            },
        }
    }
}
