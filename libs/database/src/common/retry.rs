use std::future::Future;
use std::time::Duration;
use tracing::{debug, warn};

use crate::common::{Context, ContextError};

/// Backoff settings for establishing connections at startup
///
/// Repository operations are never retried; this is only used while
/// connecting to a backend.
#[derive(Debug, Clone)]
pub struct RetryConfig {
    /// Maximum number of retry attempts after the first try
    pub max_retries: u32,

    /// Initial delay between retries in milliseconds
    pub initial_delay_ms: u64,

    /// Upper bound for the delay between retries in milliseconds
    pub max_delay_ms: u64,

    /// Multiplier applied to the delay after each failure
    pub backoff_multiplier: f64,

    /// Randomize each delay to 50-100% of its nominal value
    pub use_jitter: bool,
}

impl RetryConfig {
    /// Defaults: 3 retries, 100ms initial delay, 5s cap, x2 backoff, jitter on
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_max_retries(mut self, max_retries: u32) -> Self {
        self.max_retries = max_retries;
        self
    }

    pub fn with_initial_delay(mut self, delay_ms: u64) -> Self {
        self.initial_delay_ms = delay_ms;
        self
    }

    pub fn with_max_delay(mut self, delay_ms: u64) -> Self {
        self.max_delay_ms = delay_ms;
        self
    }

    pub fn without_jitter(mut self) -> Self {
        self.use_jitter = false;
        self
    }

    fn next_delay(&self, delay: u64) -> u64 {
        ((delay as f64 * self.backoff_multiplier) as u64).min(self.max_delay_ms)
    }
}

impl Default for RetryConfig {
    fn default() -> Self {
        Self {
            max_retries: 3,
            initial_delay_ms: 100,
            max_delay_ms: 5000,
            backoff_multiplier: 2.0,
            use_jitter: true,
        }
    }
}

/// Retry an async operation with exponential backoff
///
/// Gives up early with the context's error when `ctx` is cancelled or
/// expires, either before an attempt or while sleeping between attempts.
///
/// # Example
/// ```ignore
/// use database::common::{Context, RetryConfig, retry_with_backoff};
///
/// let config = RetryConfig::new().with_max_retries(5);
/// let client = retry_with_backoff(&ctx, || connect(&url), config).await?;
/// ```
pub async fn retry_with_backoff<F, Fut, T, E>(
    ctx: &Context,
    mut operation: F,
    config: RetryConfig,
) -> Result<T, E>
where
    F: FnMut() -> Fut,
    Fut: Future<Output = Result<T, E>>,
    E: std::fmt::Display + From<ContextError>,
{
    let mut attempt = 0;
    let mut delay = config.initial_delay_ms;

    loop {
        match ctx.run(operation()).await? {
            Ok(result) => {
                if attempt > 0 {
                    debug!(attempt, "Operation succeeded after retries");
                }
                return Ok(result);
            }
            Err(e) => {
                attempt += 1;

                if attempt > config.max_retries {
                    warn!(attempts = attempt, error = %e, "Operation failed, giving up");
                    return Err(e);
                }

                let current_delay = if config.use_jitter {
                    apply_jitter(delay)
                } else {
                    delay
                };

                debug!(
                    attempt,
                    max_retries = config.max_retries,
                    delay_ms = current_delay,
                    error = %e,
                    "Operation failed, retrying"
                );

                ctx.run(tokio::time::sleep(Duration::from_millis(current_delay)))
                    .await?;

                delay = config.next_delay(delay);
            }
        }
    }
}

/// Scale a delay by a pseudo-random factor between 0.5 and 1.0
fn apply_jitter(delay: u64) -> u64 {
    use std::collections::hash_map::RandomState;
    use std::hash::BuildHasher;

    let random_factor =
        (RandomState::new().hash_one(std::time::SystemTime::now()) % 50) as f64 / 100.0 + 0.5;

    (delay as f64 * random_factor) as u64
}

/// [`retry_with_backoff`] with [`RetryConfig::default`]
pub async fn retry<F, Fut, T, E>(ctx: &Context, operation: F) -> Result<T, E>
where
    F: FnMut() -> Fut,
    Fut: Future<Output = Result<T, E>>,
    E: std::fmt::Display + From<ContextError>,
{
    retry_with_backoff(ctx, operation, RetryConfig::default()).await
}
