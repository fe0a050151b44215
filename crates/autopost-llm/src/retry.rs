//! Bounded retry with exponential backoff and jitter
//!
//! Every model call in AutoPost goes through [`ResilientInvoker::invoke`].
//! The service does not tell rate limiting apart from other failures, so
//! every error is treated as transient.
//!
//! The delay after failed attempt `n` (0-based) is `base^n + jitter`
//! seconds, with `jitter` drawn uniformly from `[0, max_jitter)`. There is
//! no delay after the last attempt.

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::sync::{Arc, Mutex, PoisonError};
use std::time::Duration;
use thiserror::Error;
use tracing::{debug, warn};

/// Default number of attempts
pub const DEFAULT_MAX_ATTEMPTS: u32 = 3;

/// Retry bounds and backoff shape
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RetryPolicy {
    /// Total attempts, including the first
    pub max_attempts: u32,

    /// Exponential base, in seconds
    pub backoff_base_secs: f64,

    /// Upper bound (exclusive) of the uniform jitter added to each delay
    pub max_jitter_secs: f64,
}

impl Default for RetryPolicy {
    /// Three attempts, delays of `1 + j` then `2 + j` seconds
    fn default() -> Self {
        Self {
            max_attempts: DEFAULT_MAX_ATTEMPTS,
            backoff_base_secs: 2.0,
            max_jitter_secs: 1.0,
        }
    }
}

impl RetryPolicy {
    /// Policy with no waiting between attempts
    pub fn immediate(max_attempts: u32) -> Self {
        Self {
            max_attempts,
            backoff_base_secs: 1.0,
            max_jitter_secs: 0.0,
        }
    }

    /// Validate the policy
    ///
    /// Jitter must stay below `base - 1` so that delays never shrink from one
    /// attempt to the next.
    pub fn validate(&self) -> Result<(), String> {
        if self.max_attempts == 0 {
            return Err("max_attempts must be greater than 0".to_string());
        }
        if !(self.backoff_base_secs >= 1.0) {
            return Err("backoff_base_secs must be at least 1.0".to_string());
        }
        if !(self.max_jitter_secs >= 0.0) {
            return Err("max_jitter_secs cannot be negative".to_string());
        }
        if self.max_jitter_secs > self.backoff_base_secs - 1.0 {
            return Err("max_jitter_secs cannot exceed backoff_base_secs - 1.0".to_string());
        }
        Ok(())
    }

    /// Delay after failed attempt `attempt` (0-based) with the given jitter
    pub fn delay_for(&self, attempt: u32, jitter_secs: f64) -> Duration {
        let exponent = i32::try_from(attempt).unwrap_or(i32::MAX);
        let secs = self.backoff_base_secs.powi(exponent) + jitter_secs.max(0.0);
        Duration::try_from_secs_f64(secs).unwrap_or(Duration::MAX)
    }
}

/// Raised when every attempt failed
#[derive(Debug, Error)]
#[error("Max retries reached after {attempts} attempts: {last_error}")]
pub struct ExhaustedRetries<E> {
    /// Attempts made
    pub attempts: u32,

    /// Error from the final attempt
    pub last_error: E,
}

/// Blocking wait between attempts
pub trait Sleeper: Send + Sync {
    /// Block for `duration`
    fn sleep(&self, duration: Duration);
}

/// Sleeps the current thread
#[derive(Debug, Clone, Copy, Default)]
pub struct ThreadSleeper;

impl Sleeper for ThreadSleeper {
    fn sleep(&self, duration: Duration) {
        std::thread::sleep(duration);
    }
}

/// Records requested delays instead of sleeping
///
/// Clones share the same log.
#[derive(Debug, Clone, Default)]
pub struct RecordingSleeper {
    delays: Arc<Mutex<Vec<Duration>>>,
}

impl RecordingSleeper {
    /// Create an empty recorder
    pub fn new() -> Self {
        Self::default()
    }

    /// Delays requested so far
    pub fn delays(&self) -> Vec<Duration> {
        self.delays
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    /// Sum of requested delays
    pub fn total(&self) -> Duration {
        self.delays().into_iter().sum()
    }
}

impl Sleeper for RecordingSleeper {
    fn sleep(&self, duration: Duration) {
        self.delays
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .push(duration);
    }
}

/// Wraps model calls with bounded retry
pub struct ResilientInvoker {
    policy: RetryPolicy,
    rng: Mutex<StdRng>,
    sleeper: Box<dyn Sleeper>,
}

impl fmt::Debug for ResilientInvoker {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ResilientInvoker")
            .field("policy", &self.policy)
            .finish_non_exhaustive()
    }
}

impl ResilientInvoker {
    /// Create an invoker that sleeps the calling thread, with entropy-seeded jitter
    pub fn new(policy: RetryPolicy) -> Self {
        Self {
            policy,
            rng: Mutex::new(StdRng::from_entropy()),
            sleeper: Box::new(ThreadSleeper),
        }
    }

    /// Use a fixed jitter seed
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.rng = Mutex::new(StdRng::seed_from_u64(seed));
        self
    }

    /// Use a different sleeper
    pub fn with_sleeper(mut self, sleeper: impl Sleeper + 'static) -> Self {
        self.sleeper = Box::new(sleeper);
        self
    }

    /// The active policy
    pub fn policy(&self) -> &RetryPolicy {
        &self.policy
    }

    fn next_delay(&self, attempt: u32) -> Duration {
        let jitter = if self.policy.max_jitter_secs > 0.0 {
            self.rng
                .lock()
                .unwrap_or_else(PoisonError::into_inner)
                .gen_range(0.0..self.policy.max_jitter_secs)
        } else {
            0.0
        };
        self.policy.delay_for(attempt, jitter)
    }

    /// Run `call` until it succeeds or the attempt bound is reached
    ///
    /// At least one attempt is always made.
    pub fn invoke<T, E, F>(&self, mut call: F) -> Result<T, ExhaustedRetries<E>>
    where
        F: FnMut() -> Result<T, E>,
        E: fmt::Display,
    {
        let max_attempts = self.policy.max_attempts.max(1);
        let mut attempt = 0;

        loop {
            match call() {
                Ok(value) => {
                    if attempt > 0 {
                        debug!("Model call succeeded on attempt {}", attempt + 1);
                    }
                    return Ok(value);
                }
                Err(e) => {
                    attempt += 1;
                    warn!("Attempt {}/{} failed: {}", attempt, max_attempts, e);

                    if attempt >= max_attempts {
                        return Err(ExhaustedRetries {
                            attempts: attempt,
                            last_error: e,
                        });
                    }

                    let delay = self.next_delay(attempt - 1);
                    debug!("Backing off for {:?}", delay);
                    self.sleeper.sleep(delay);
                }
            }
        }
    }
}

impl Default for ResilientInvoker {
    fn default() -> Self {
        Self::new(RetryPolicy::default())
    }
}
