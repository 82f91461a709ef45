use rand::Rng;
use std::time::Duration;

/// Exponential backoff with jitter for retrying transient request failures.
///
/// Formula: min(max_delay, base * 2^attempt) + random_jitter
///
/// Only the transport layer retries; a signature the provider rejected will
/// be rejected again, so that path never goes through a backoff loop.
#[derive(Debug, Clone)]
pub struct ExponentialBackoff {
    base: Duration,
    max_delay: Duration,
    jitter_factor: f64,
    attempt: u32,
}

impl Default for ExponentialBackoff {
    /// Pacing tuned for HTTP request retries.
    fn default() -> Self {
        Self::new(Duration::from_millis(500), Duration::from_secs(30), 0.1)
    }
}

impl ExponentialBackoff {
    /// Create a new ExponentialBackoff.
    ///
    /// # Arguments
    /// * `base` - Initial delay duration
    /// * `max_delay` - Maximum delay cap
    /// * `jitter_factor` - Jitter as a fraction of delay (0.0 to 1.0). Negative values are clamped to 0.
    pub fn new(base: Duration, max_delay: Duration, jitter_factor: f64) -> Self {
        Self {
            base,
            max_delay,
            // Clamp negative jitter to 0 to prevent gen_range panic
            jitter_factor: jitter_factor.max(0.0),
            attempt: 0,
        }
    }

    /// Calculate the next delay and increment the attempt counter.
    pub fn next_delay(&mut self) -> Duration {
        let exp_delay = self.base.saturating_mul(2u32.saturating_pow(self.attempt));
        let capped_delay = exp_delay.min(self.max_delay);

        // Jitter: random value in [-jitter_factor, +jitter_factor] of the delay
        let jitter_range = capped_delay.as_secs_f64() * self.jitter_factor;
        let jitter = if jitter_range > 0.0 {
            rand::thread_rng().gen_range(-jitter_range..=jitter_range)
        } else {
            0.0
        };
        let final_secs = (capped_delay.as_secs_f64() + jitter).max(0.0);

        self.attempt = self.attempt.saturating_add(1);

        Duration::from_secs_f64(final_secs)
    }

    /// Reset the attempt counter (call after a successful request).
    pub fn reset(&mut self) {
        self.attempt = 0;
    }

    /// Get current attempt number.
    pub fn attempt(&self) -> u32 {
        self.attempt
    }
}
