//! Reconciliation timing

use crate::config::ReconcileConfig;
use std::time::Duration;

/// Timing bounds for one reconciliation
///
/// Worst case per file: `initial_delay + (max_attempts - 1) * retry_backoff`,
/// 4 seconds with the defaults.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ReconcilePolicy {
    /// Wait before the first folder scan
    pub initial_delay: Duration,
    /// Wait between rename attempts
    pub retry_backoff: Duration,
    /// Total rename attempts (at least 1)
    pub max_attempts: u32,
}

impl ReconcilePolicy {
    /// Default grace period before scanning
    pub const DEFAULT_INITIAL_DELAY: Duration = Duration::from_millis(1000);
    /// Default backoff between rename attempts
    pub const DEFAULT_RETRY_BACKOFF: Duration = Duration::from_millis(1500);
    /// Default number of rename attempts
    pub const DEFAULT_MAX_ATTEMPTS: u32 = 3;

    /// Create a policy
    pub fn new(initial_delay: Duration, retry_backoff: Duration, max_attempts: u32) -> Self {
        Self {
            initial_delay,
            retry_backoff,
            max_attempts: max_attempts.max(1),
        }
    }

    /// No waiting at all; attempts keep their default count
    pub fn immediate() -> Self {
        Self::new(Duration::ZERO, Duration::ZERO, Self::DEFAULT_MAX_ATTEMPTS)
    }

    /// Create from the `[reconcile]` configuration section
    pub fn from_config(config: &ReconcileConfig) -> Self {
        Self::new(
            Duration::from_millis(config.initial_delay_ms),
            Duration::from_millis(config.retry_backoff_ms),
            config.max_attempts,
        )
    }

    /// Upper bound on time spent sleeping for one file
    pub fn worst_case_wait(&self) -> Duration {
        self.initial_delay + self.retry_backoff * self.max_attempts.saturating_sub(1)
    }
}

impl Default for ReconcilePolicy {
    fn default() -> Self {
        Self::new(
            Self::DEFAULT_INITIAL_DELAY,
            Self::DEFAULT_RETRY_BACKOFF,
            Self::DEFAULT_MAX_ATTEMPTS,
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_worst_case_is_four_seconds() {
        assert_eq!(
            ReconcilePolicy::default().worst_case_wait(),
            Duration::from_millis(4000)
        );
    }

    #[test]
    fn test_zero_attempts_clamped() {
        let policy = ReconcilePolicy::new(Duration::ZERO, Duration::from_secs(1), 0);
        assert_eq!(policy.max_attempts, 1);
        assert_eq!(policy.worst_case_wait(), Duration::ZERO);
    }

    #[test]
    fn test_from_config() {
        let config = ReconcileConfig {
            initial_delay_ms: 250,
            retry_backoff_ms: 500,
            max_attempts: 5,
        };
        let policy = ReconcilePolicy::from_config(&config);
        assert_eq!(policy.initial_delay, Duration::from_millis(250));
        assert_eq!(policy.worst_case_wait(), Duration::from_millis(2250));
    }
}
