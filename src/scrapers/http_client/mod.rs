//! HTTP page fetching with bounded retries and identity rotation.

mod identity;

pub use identity::{Identity, USER_AGENTS};

use std::ops::RangeInclusive;
use std::time::Duration;

use rand::Rng;
use reqwest::Client;
use thiserror::Error;
use tracing::{debug, warn};

/// Outcome of a single fetch attempt. Absorbed inside the fetcher; callers
/// only ever see presence or absence of a body.
#[derive(Error, Debug)]
enum FetchError {
    #[error("transport error: {0}")]
    Transport(#[from] reqwest::Error),

    #[error("server returned status {0}")]
    Status(u16),
}

/// Tuning for the fetcher.
///
/// The defaults are the service contract; tests shrink the delay ranges to
/// keep the suite fast.
#[derive(Debug, Clone)]
pub struct FetchConfig {
    /// Attempts before giving up on a URL.
    pub max_attempts: u32,
    /// Per-request timeout.
    pub timeout: Duration,
    /// Delay range after a failed attempt, in milliseconds.
    pub retry_delay_ms: RangeInclusive<u64>,
    /// Politeness delay range after a successful fetch, in milliseconds.
    pub success_delay_ms: RangeInclusive<u64>,
}

impl Default for FetchConfig {
    fn default() -> Self {
        Self {
            max_attempts: 3,
            timeout: Duration::from_secs(10),
            retry_delay_ms: 1000..=1500,
            success_delay_ms: 500..=1000,
        }
    }
}

/// Page fetcher tolerating transient upstream failures.
///
/// Each attempt draws a fresh [`Identity`], so retries vary their browser
/// signature. All failures are retried identically up to `max_attempts`;
/// exhaustion yields `None` rather than an error.
#[derive(Debug, Clone)]
pub struct PageFetcher {
    client: Client,
    config: FetchConfig,
}

impl PageFetcher {
    /// Create a fetcher with the given tuning.
    pub fn new(config: FetchConfig) -> Self {
        let client = Client::builder()
            .timeout(config.timeout)
            .gzip(true)
            .brotli(true)
            .build()
            .expect("failed to create HTTP client");

        Self { client, config }
    }

    /// Fetch a page and return its body text.
    ///
    /// A successful attempt sleeps the politeness delay and returns
    /// immediately; a failed attempt sleeps the retry delay and tries
    /// again. Returns `None` once every attempt has failed.
    pub async fn fetch(&self, url: &str) -> Option<String> {
        for attempt in 1..=self.config.max_attempts {
            let identity = Identity::rotate();
            match self.try_get(url, &identity).await {
                Ok(body) => {
                    self.pause(&self.config.success_delay_ms).await;
                    return Some(body);
                }
                Err(e) => {
                    debug!(
                        "attempt {}/{} failed for {}: {}",
                        attempt, self.config.max_attempts, url, e
                    );
                    self.pause(&self.config.retry_delay_ms).await;
                }
            }
        }

        warn!(
            "giving up on {} after {} attempts",
            url, self.config.max_attempts
        );
        None
    }

    async fn try_get(&self, url: &str, identity: &Identity) -> Result<String, FetchError> {
        let response = self
            .client
            .get(url)
            .headers(identity.headers())
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            return Err(FetchError::Status(status.as_u16()));
        }

        Ok(response.text().await?)
    }

    /// Sleep a random duration drawn from `range`, in milliseconds.
    async fn pause(&self, range: &RangeInclusive<u64>) {
        let delay = rand::thread_rng().gen_range(range.clone());
        tokio::time::sleep(Duration::from_millis(delay)).await;
    }
}

impl Default for PageFetcher {
    fn default() -> Self {
        Self::new(FetchConfig::default())
    }
}
