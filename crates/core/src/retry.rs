// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Bounded exponential-backoff retry policy.
//!
//! One policy instance is passed explicitly to every component that makes
//! coordination-service calls; there is no global policy singleton.

use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Caps a single backoff delay so a large attempt number cannot produce
/// an unbounded sleep.
const MAX_DELAY: Duration = Duration::from_secs(60);

/// Bounded exponential backoff: `base_delay * multiplier^attempt`,
/// at most `max_retries` retries after the initial attempt.
#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(default)]
pub struct RetryPolicy {
    /// Delay before the first retry
    #[serde(with = "humantime_serde")]
    pub base_delay: Duration,
    /// Growth factor applied per attempt
    pub multiplier: f64,
    /// Retries after the initial attempt
    pub max_retries: u32,
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self {
            base_delay: Duration::from_secs(3),
            multiplier: 2.0,
            max_retries: 3,
        }
    }
}

impl RetryPolicy {
    pub fn new(base_delay: Duration, max_retries: u32) -> Self {
        Self {
            base_delay,
            max_retries,
            ..Self::default()
        }
    }

    pub fn with_multiplier(mut self, multiplier: f64) -> Self {
        self.multiplier = multiplier;
        self
    }

    /// Total attempts including the initial one.
    pub fn attempts(&self) -> u32 {
        self.max_retries + 1
    }

    /// Delay to sleep after the given zero-based failed attempt.
    pub fn delay(&self, attempt: u32) -> Duration {
        let factor = self.multiplier.max(1.0).powi(attempt.min(30) as i32);
        // Clamp before multiplying: mul_f64 panics past Duration's range.
        let cap = MAX_DELAY.as_secs_f64() / self.base_delay.as_secs_f64().max(f64::EPSILON);
        if factor >= cap {
            MAX_DELAY
        } else {
            self.base_delay.mul_f64(factor)
        }
    }
}

#[cfg(test)]
#[path = "retry_tests.rs"]
mod tests;
