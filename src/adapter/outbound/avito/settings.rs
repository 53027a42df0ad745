//! Avito listing source configuration.

use serde::Deserialize;

/// Avito search page and HTTP settings.
#[derive(Debug, Clone, Deserialize)]
pub struct AvitoConfig {
    /// Search results page to poll.
    #[serde(default = "default_search_url")]
    pub search_url: String,
    /// Site root that detail page paths are resolved against.
    #[serde(default = "default_domain")]
    pub domain: String,
    /// Pool of `User-Agent` headers; one is picked at random per request.
    #[serde(default = "default_user_agents")]
    pub user_agents: Vec<String>,
    /// HTTP client settings.
    #[serde(default)]
    pub http: AvitoHttpConfig,
}

fn default_search_url() -> String {
    "https://www.avito.ru/rossiya/tovary_dlya_kompyutera/aksessuary-ASgBAgICAUTGB5Ro?cd=1&p=1&q=valve+index&user=1".into()
}

fn default_domain() -> String {
    "https://www.avito.ru".into()
}

fn default_user_agents() -> Vec<String> {
    [
        "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/124.0.0.0 Safari/537.36",
        "Mozilla/5.0 (Macintosh; Intel Mac OS X 10_15_7) AppleWebKit/605.1.15 (KHTML, like Gecko) Version/17.4 Safari/605.1.15",
        "Mozilla/5.0 (X11; Linux x86_64; rv:125.0) Gecko/20100101 Firefox/125.0",
        "Mozilla/5.0 (Windows NT 10.0; Win64; x64; rv:125.0) Gecko/20100101 Firefox/125.0",
    ]
    .into_iter()
    .map(String::from)
    .collect()
}

impl Default for AvitoConfig {
    fn default() -> Self {
        Self {
            search_url: default_search_url(),
            domain: default_domain(),
            user_agents: default_user_agents(),
            http: AvitoHttpConfig::default(),
        }
    }
}

/// HTTP client configuration for page fetches.
#[derive(Debug, Clone, Deserialize)]
pub struct AvitoHttpConfig {
    /// Request timeout in milliseconds.
    #[serde(default = "default_http_timeout_ms")]
    pub timeout_ms: u64,
    /// Connect timeout in milliseconds.
    #[serde(default = "default_http_connect_timeout_ms")]
    pub connect_timeout_ms: u64,
    /// Maximum number of attempts for transient failures.
    #[serde(default = "default_http_retry_max_attempts")]
    pub retry_max_attempts: u32,
    /// Backoff between retries in milliseconds.
    #[serde(default = "default_http_retry_backoff_ms")]
    pub retry_backoff_ms: u64,
}

const fn default_http_timeout_ms() -> u64 {
    15_000
}

const fn default_http_connect_timeout_ms() -> u64 {
    5_000
}

const fn default_http_retry_max_attempts() -> u32 {
    3
}

const fn default_http_retry_backoff_ms() -> u64 {
    1_000
}

impl Default for AvitoHttpConfig {
    fn default() -> Self {
        Self {
            timeout_ms: default_http_timeout_ms(),
            connect_timeout_ms: default_http_connect_timeout_ms(),
            retry_max_attempts: default_http_retry_max_attempts(),
            retry_backoff_ms: default_http_retry_backoff_ms(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_section_uses_defaults() {
        let config: AvitoConfig = toml::from_str("").unwrap();
        assert_eq!(config.domain, "https://www.avito.ru");
        assert!(config.search_url.contains("q=valve+index"));
        assert!(!config.user_agents.is_empty());
        assert_eq!(config.http.retry_max_attempts, 3);
    }

    #[test]
    fn partial_http_section_keeps_other_defaults() {
        let config: AvitoConfig = toml::from_str("[http]\ntimeout_ms = 100\n").unwrap();
        assert_eq!(config.http.timeout_ms, 100);
        assert_eq!(config.http.connect_timeout_ms, 5_000);
    }
}
