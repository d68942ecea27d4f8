use std::time::Duration;

/// Decision returned by the retry policy.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RetryDecision {
    /// Attempt ceiling reached.
    NoRetry,
    /// Retry after the given delay.
    RetryAfter(Duration),
}

/// Attempt ceiling and delays for one deployment run.
///
/// Every failed attempt is retried the same way regardless of exit code.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DeployTimings {
    /// Maximum number of install attempts (including the first).
    pub max_attempts: u32,
    /// Pause before the first attempt (previous uninstaller cleanup).
    pub pre_install_delay: Duration,
    /// Pause between a clean exit and the install probe.
    pub settle_delay: Duration,
    /// Pause between failed attempts.
    pub retry_backoff: Duration,
}

impl Default for DeployTimings {
    fn default() -> Self {
        Self {
            max_attempts: 10,
            pre_install_delay: Duration::from_secs(10),
            settle_delay: Duration::from_secs(3),
            retry_backoff: Duration::from_secs(10),
        }
    }
}

impl DeployTimings {
    /// Decide what follows failed attempt number `attempt` (1-based).
    pub fn decide(&self, attempt: u32) -> RetryDecision {
        if attempt >= self.max_attempts {
            RetryDecision::NoRetry
        } else {
            RetryDecision::RetryAfter(self.retry_backoff)
        }
    }
}
