//! Retry policy for device acquisition.
//!
//! The default mirrors an unattended monitor: retry forever on a fixed
//! backoff. Tests and cautious deployments can cap the attempt count.

use std::time::Duration;

/// Decides whether (and after how long) to retry a failed open.
#[derive(Debug, Clone)]
pub struct RetryPolicy {
    backoff: Duration,
    /// `None` = retry forever.
    max_attempts: Option<u32>,
}

impl RetryPolicy {
    /// Unbounded fixed-backoff policy.
    pub fn fixed(backoff: Duration) -> Self {
        Self {
            backoff,
            max_attempts: None,
        }
    }

    /// Fixed backoff with at most `max_attempts` total open attempts.
    pub fn capped(backoff: Duration, max_attempts: u32) -> Self {
        Self {
            backoff,
            max_attempts: Some(max_attempts),
        }
    }

    /// Backoff to wait after the `attempt`-th failed open (1-based), or
    /// `None` when the policy is exhausted.
    pub fn next_delay(&self, attempt: u32) -> Option<Duration> {
        match self.max_attempts {
            Some(max) if attempt >= max => None,
            _ => Some(self.backoff),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fixed_policy_never_exhausts() {
        let policy = RetryPolicy::fixed(Duration::from_secs(5));
        assert_eq!(policy.next_delay(1), Some(Duration::from_secs(5)));
        assert_eq!(policy.next_delay(10_000), Some(Duration::from_secs(5)));
    }

    #[test]
    fn capped_policy_exhausts_at_max_attempts() {
        let policy = RetryPolicy::capped(Duration::from_secs(2), 3);
        assert_eq!(policy.next_delay(1), Some(Duration::from_secs(2)));
        assert_eq!(policy.next_delay(2), Some(Duration::from_secs(2)));
        assert_eq!(policy.next_delay(3), None);
    }
}
