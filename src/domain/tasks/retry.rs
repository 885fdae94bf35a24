//! Retry backoff policy for failed task attempts.

use rand::Rng;
use std::time::Duration;

/// Computes the delay before the next retry of a failed task.
///
/// The delay grows exponentially with the attempt count and is capped at a
/// maximum interval. Full jitter (a uniform draw between zero and the
/// computed delay) spreads out retries so many simultaneously-failing tasks
/// do not hammer a recovering dependency in lockstep.
///
/// The delay is a pure function of the attempt count (modulo jitter), so the
/// policy is testable in isolation from the queue transport.
#[derive(Debug, Clone, Copy)]
pub struct RetryPolicy {
    /// Multiplier applied per past attempt.
    backoff_coefficient: u32,
    /// Backoff for the first retry.
    initial_interval: Duration,
    /// Upper bound on the computed delay.
    maximum_interval: Duration,
    /// When false, the deterministic capped-exponential delay is returned.
    jitter: bool,
}

impl RetryPolicy {
    pub fn new(
        backoff_coefficient: u32,
        initial_interval: Duration,
        maximum_interval: Duration,
    ) -> Self {
        Self {
            backoff_coefficient,
            initial_interval,
            maximum_interval,
            jitter: true,
        }
    }

    /// Disables jitter, for deterministic tests.
    pub fn without_jitter(mut self) -> Self {
        self.jitter = false;
        self
    }

    /// Delay before the next attempt, given the number of attempts already
    /// made (1 after the first failure).
    pub fn delay_for_attempt(&self, attempt: u32) -> Duration {
        let exponent = attempt.saturating_sub(1).min(31);
        let factor = self.backoff_coefficient.saturating_pow(exponent);
        let delay = self
            .initial_interval
            .saturating_mul(factor)
            .min(self.maximum_interval);

        if self.jitter && !delay.is_zero() {
            let millis = rand::rng().random_range(0..=delay.as_millis() as u64);
            Duration::from_millis(millis)
        } else {
            delay
        }
    }
}

impl Default for RetryPolicy {
    /// Doubling from 1 second, capped at 600 seconds, with jitter.
    fn default() -> Self {
        Self {
            backoff_coefficient: 2,
            initial_interval: Duration::from_secs(1),
            maximum_interval: Duration::from_secs(600),
            jitter: true,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_exponential_growth_without_jitter() {
        let policy = RetryPolicy::default().without_jitter();

        assert_eq!(policy.delay_for_attempt(1), Duration::from_secs(1));
        assert_eq!(policy.delay_for_attempt(2), Duration::from_secs(2));
        assert_eq!(policy.delay_for_attempt(3), Duration::from_secs(4));
        assert_eq!(policy.delay_for_attempt(5), Duration::from_secs(16));
    }

    #[test]
    fn test_delay_is_capped() {
        let policy = RetryPolicy::default().without_jitter();

        // 2^10 = 1024s exceeds the 600s cap
        assert_eq!(policy.delay_for_attempt(11), Duration::from_secs(600));
        assert_eq!(policy.delay_for_attempt(30), Duration::from_secs(600));
    }

    #[test]
    fn test_large_attempt_counts_do_not_overflow() {
        let policy = RetryPolicy::default().without_jitter();

        assert_eq!(policy.delay_for_attempt(u32::MAX), Duration::from_secs(600));
    }

    #[test]
    fn test_attempt_zero_uses_initial_interval() {
        let policy = RetryPolicy::default().without_jitter();

        assert_eq!(policy.delay_for_attempt(0), Duration::from_secs(1));
    }

    #[test]
    fn test_jitter_stays_within_computed_delay() {
        let policy = RetryPolicy::default();

        for attempt in 1..=20 {
            let jittered = policy.delay_for_attempt(attempt);
            let ceiling = RetryPolicy::default()
                .without_jitter()
                .delay_for_attempt(attempt);
            assert!(jittered <= ceiling, "attempt {attempt}: {jittered:?} > {ceiling:?}");
        }
    }

    #[test]
    fn test_custom_policy() {
        let policy =
            RetryPolicy::new(3, Duration::from_millis(100), Duration::from_secs(5)).without_jitter();

        assert_eq!(policy.delay_for_attempt(1), Duration::from_millis(100));
        assert_eq!(policy.delay_for_attempt(2), Duration::from_millis(300));
        assert_eq!(policy.delay_for_attempt(3), Duration::from_millis(900));
        assert_eq!(policy.delay_for_attempt(10), Duration::from_secs(5));
    }
}
