use rand::Rng;
use std::time::Duration;

const DEFAULT_MAX_RETRIES: u32 = 2;
const DEFAULT_BASE_DELAY: Duration = Duration::from_millis(500);
const MAX_EXPONENT: u32 = 6;

/// How often a transient fetch failure is repeated before giving up.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RetryPolicy {
    pub max_retries: u32,
    pub base_delay: Duration,
}

impl RetryPolicy {
    pub fn new(max_retries: u32, base_delay: Duration) -> Self {
        Self {
            max_retries,
            base_delay,
        }
    }

    /// Single attempt, no waiting.
    pub fn none() -> Self {
        Self::new(0, Duration::ZERO)
    }

    pub fn delay_for(&self, attempt: u32) -> Duration {
        calculate_backoff_delay(attempt, self.base_delay)
    }
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self::new(DEFAULT_MAX_RETRIES, DEFAULT_BASE_DELAY)
    }
}

/// Exponential backoff with ±30% jitter: `base * 2^attempt`.
pub fn calculate_backoff_delay(attempt: u32, base: Duration) -> Duration {
    let exponent = attempt.min(MAX_EXPONENT);
    let delay = base.saturating_mul(2_u32.pow(exponent));

    let jitter_factor = rand::thread_rng().gen_range(0.7..1.3);
    delay.mul_f64(jitter_factor)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_backoff_progression() {
        let base = Duration::from_millis(1000);

        let delay0 = calculate_backoff_delay(0, base);
        let delay1 = calculate_backoff_delay(1, base);
        let delay2 = calculate_backoff_delay(2, base);

        assert!(delay0.as_millis() >= 700 && delay0.as_millis() <= 1300);
        assert!(delay1.as_millis() >= 1400 && delay1.as_millis() <= 2600);
        assert!(delay2.as_millis() >= 2800 && delay2.as_millis() <= 5200);
    }

    #[test]
    fn test_backoff_exponent_is_capped() {
        let base = Duration::from_millis(100);

        // 100ms * 2^6 = 6.4s, ±30%
        let delay = calculate_backoff_delay(30, base);
        assert!(delay.as_millis() >= 4480 && delay.as_millis() <= 8320);
    }

    #[test]
    fn test_none_policy_never_waits() {
        let policy = RetryPolicy::none();
        assert_eq!(policy.max_retries, 0);
        assert_eq!(policy.delay_for(3), Duration::ZERO);
    }
}
