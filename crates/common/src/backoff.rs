//! Jittered exponential backoff for retrying transient failures.

use rand::Rng;
use std::time::Duration;

/// Fraction of the capped delay used as the jitter band.
const JITTER_FACTOR: f64 = 0.1;

/// Exponential backoff: `min(cap, base * 2^attempt)` plus up to ±10% jitter.
#[derive(Debug, Clone)]
pub struct Backoff {
    base: Duration,
    cap: Duration,
    attempt: u32,
}

impl Backoff {
    /// Create a backoff starting at `base` and capped at `cap`.
    pub fn new(base: Duration, cap: Duration) -> Self {
        Self {
            base,
            cap,
            attempt: 0,
        }
    }

    /// Delay for the next attempt, advancing the attempt counter.
    pub fn next_delay(&mut self) -> Duration {
        let exp = self.base.saturating_mul(2u32.saturating_pow(self.attempt));
        let capped = exp.min(self.cap);
        self.attempt = self.attempt.saturating_add(1);

        let band = capped.as_secs_f64() * JITTER_FACTOR;
        if band <= 0.0 {
            return capped;
        }
        let jitter = rand::thread_rng().gen_range(-band..=band);
        Duration::from_secs_f64((capped.as_secs_f64() + jitter).max(0.0))
    }

    /// Reset after a success so the next failure starts from `base` again.
    pub fn reset(&mut self) {
        self.attempt = 0;
    }

    /// Number of delays handed out since the last reset.
    pub fn attempt(&self) -> u32 {
        self.attempt
    }
}
