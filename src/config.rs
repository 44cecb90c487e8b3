//! Runtime configuration, read from the environment.
//!
//! | Variable                   | Default                 |
//! |----------------------------|-------------------------|
//! | `TABLESIDE_BASE_URL`       | `http://localhost:5173` |
//! | `TABLESIDE_CHANNEL_BUFFER` | `32`                    |
//! | `TABLESIDE_LOG`            | `info`                  |
//!
//! Missing or unparsable values fall back to the default. A base URL must be an
//! absolute URL that can carry a path. `RUST_LOG`, when set, overrides
//! `TABLESIDE_LOG`.

use url::Url;

#[derive(Debug, Clone, PartialEq)]
pub struct Config {
    /// Origin the QR codes point at.
    pub base_url: String,
    /// Mailbox size of every collection actor.
    pub channel_buffer: usize,
    pub log_filter: String,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            base_url: "http://localhost:5173".into(),
            channel_buffer: 32,
            log_filter: "info".into(),
        }
    }
}

impl Config {
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let defaults = Self::default();
        Self {
            base_url: lookup("TABLESIDE_BASE_URL")
                .map(|v| v.trim().to_string())
                .filter(|v| Url::parse(v).is_ok_and(|url| !url.cannot_be_a_base()))
                .unwrap_or(defaults.base_url),
            channel_buffer: lookup("TABLESIDE_CHANNEL_BUFFER")
                .and_then(|v| v.parse().ok())
                .filter(|n: &usize| *n > 0)
                .unwrap_or(defaults.channel_buffer),
            log_filter: lookup("TABLESIDE_LOG").unwrap_or(defaults.log_filter),
        }
    }
}
