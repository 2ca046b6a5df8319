// Bounded retry for transient GitHub API failures. Read-side calls (listing,
// search) are wrapped; mutations and single-object fetches are not, so a 404
// there surfaces immediately for skip handling.

use std::future::Future;
use std::time::Duration;

use tracing::{debug, warn};

use super::errors::GitHubError;

#[derive(Debug, Clone)]
pub struct RetryConfig {
    pub max_attempts: u32,
    pub base_delay: Duration,
}

impl Default for RetryConfig {
    fn default() -> Self {
        Self {
            max_attempts: 3,
            base_delay: Duration::from_millis(500),
        }
    }
}

/// Run `operation` up to `config.max_attempts` times, backing off linearly
/// between attempts. Only errors classified transient are retried.
pub async fn with_retry<T, F, Fut>(
    config: &RetryConfig,
    what: &str,
    mut operation: F,
) -> Result<T, GitHubError>
where
    F: FnMut() -> Fut,
    Fut: Future<Output = Result<T, GitHubError>>,
{
    let mut attempts = 0;
    loop {
        attempts += 1;
        match operation().await {
            Ok(value) => {
                if attempts > 1 {
                    debug!("{} succeeded on attempt {}", what, attempts);
                }
                return Ok(value);
            }
            Err(err) if err.is_transient() && attempts < config.max_attempts => {
                warn!(
                    "{} failed (attempt {}/{}): {}",
                    what, attempts, config.max_attempts, err
                );
                tokio::time::sleep(config.base_delay * attempts).await;
            }
            Err(err) => return Err(err),
        }
    }
}
