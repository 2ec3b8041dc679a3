use std::time::Duration;

use crate::config::RetryConfig;

/// Retry-relevant classification of a failed attempt.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    /// Connect or transfer timed out.
    Timeout,
    /// Server asked us to slow down (429, 503).
    Throttled,
    /// Network-level failure (reset, DNS, dropped body).
    Connection,
    Http5xx(u16),
    /// Anything else; not retried.
    Other,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RetryDecision {
    NoRetry,
    RetryAfter(Duration),
}

/// Exponential backoff with an attempt cap and a delay cap.
#[derive(Debug, Clone, Copy)]
pub struct RetryPolicy {
    /// Maximum number of attempts (including the first).
    pub max_attempts: u32,
    pub base_delay: Duration,
    pub max_delay: Duration,
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self {
            max_attempts: 5,
            base_delay: Duration::from_millis(250),
            max_delay: Duration::from_secs(30),
        }
    }
}

impl RetryPolicy {
    /// Build from config. A base delay that is negative or NaN becomes zero;
    /// one that is infinite or above `max_delay_secs` is clamped to it.
    pub fn from_config(cfg: &RetryConfig) -> Self {
        let max_delay = Duration::from_secs(cfg.max_delay_secs);
        let base_delay = if cfg.base_delay_secs > 0.0 {
            Duration::try_from_secs_f64(cfg.base_delay_secs)
                .unwrap_or(max_delay)
                .min(max_delay)
        } else {
            Duration::ZERO
        };
        Self {
            max_attempts: cfg.max_attempts.max(1),
            base_delay,
            max_delay,
        }
    }

    /// Decide whether attempt number `attempt` (1-based) that failed with
    /// `kind` should be retried, and after how long.
    pub fn decide(&self, attempt: u32, kind: ErrorKind) -> RetryDecision {
        if attempt >= self.max_attempts {
            return RetryDecision::NoRetry;
        }
        let base = match kind {
            ErrorKind::Other => return RetryDecision::NoRetry,
            // Back off harder when the server is shedding load.
            ErrorKind::Throttled => self.base_delay.saturating_mul(2),
            ErrorKind::Timeout | ErrorKind::Connection | ErrorKind::Http5xx(_) => self.base_delay,
        };
        let factor = 1u32.checked_shl(attempt - 1).unwrap_or(u32::MAX);
        let delay = base.checked_mul(factor).unwrap_or(self.max_delay);
        RetryDecision::RetryAfter(delay.min(self.max_delay))
    }
}
