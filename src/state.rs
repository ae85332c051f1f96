//! Shared application state and startup configuration.

use std::{env, fmt};

use crate::cache::MetaCache;

/// Shared application state accessible to all handlers
#[derive(Debug, Clone)]
pub struct AppState {
    /// Canonical external base URL without trailing slash (e.g. "https://github.com/go-vikunja")
    pub base_url: String,
    /// Public hostname this server answers for (e.g. "code.vikunja.io")
    pub domain: String,
    /// Cache of rendered vanity pages, shared across requests
    pub cache: MetaCache,
}

/// Configuration problems that abort startup.
#[derive(Debug, PartialEq, Eq)]
pub enum ConfigError {
    MissingBaseUrl,
    InvalidBaseUrl(String),
    MissingDomain,
    InvalidDomain(String),
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::MissingBaseUrl => write!(f, "BASE_URL is not set (or pass --base-url)"),
            Self::InvalidBaseUrl(url) => {
                write!(f, "base URL '{url}' must start with http:// or https://")
            }
            Self::MissingDomain => write!(f, "DOMAIN is not set (or pass --domain)"),
            Self::InvalidDomain(domain) => {
                write!(f, "domain '{domain}' must be a bare hostname")
            }
        }
    }
}

impl std::error::Error for ConfigError {}

impl AppState {
    /// Resolves configuration from CLI overrides, falling back to the
    /// `BASE_URL` and `DOMAIN` environment variables.
    pub fn resolve(base_url: Option<String>, domain: Option<String>) -> Result<Self, ConfigError> {
        let base_url = base_url.or_else(|| env::var("BASE_URL").ok());
        let domain = domain.or_else(|| env::var("DOMAIN").ok());
        Self::from_parts(base_url, domain)
    }

    /// Validates the raw configuration values and builds the state.
    ///
    /// The base URL must carry an explicit scheme; a trailing slash is
    /// stripped so redirect targets never contain `//`. The domain must be a
    /// bare hostname, since it is interpolated into the go-import meta tag.
    pub fn from_parts(
        base_url: Option<String>,
        domain: Option<String>,
    ) -> Result<Self, ConfigError> {
        let base_url = base_url
            .filter(|url| !url.is_empty())
            .ok_or(ConfigError::MissingBaseUrl)?;
        if !base_url.starts_with("http://") && !base_url.starts_with("https://") {
            return Err(ConfigError::InvalidBaseUrl(base_url));
        }

        let domain = domain
            .filter(|host| !host.is_empty())
            .ok_or(ConfigError::MissingDomain)?;
        if domain.contains("://") || domain.contains('/') || domain.contains(char::is_whitespace) {
            return Err(ConfigError::InvalidDomain(domain));
        }

        Ok(Self {
            base_url: base_url.trim_end_matches('/').to_string(),
            domain,
            cache: MetaCache::new(),
        })
    }
}
