//! Runtime settings for vodfetch.

use crate::scrapers::FetchConfig;

/// Default port when `PORT` is not set.
pub const DEFAULT_PORT: u16 = 8000;

/// The upstream catalog site.
pub const DEFAULT_BASE_URL: &str = "https://www.netflixgc.com";

/// Service settings. The listen port is the only environment surface;
/// everything else defaults here and is overridden in code (tests point
/// `base_url` at a local mock server).
#[derive(Debug, Clone)]
pub struct Settings {
    /// Base URL of the upstream site.
    pub base_url: String,
    /// Fetcher tuning.
    pub fetch: FetchConfig,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            fetch: FetchConfig::default(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_settings() {
        let settings = Settings::default();
        assert_eq!(settings.base_url, DEFAULT_BASE_URL);
        assert_eq!(settings.fetch.max_attempts, 3);
        assert_eq!(settings.fetch.timeout.as_secs(), 10);
    }
}
