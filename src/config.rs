// src/config.rs
use crate::errors::ConfigError;
use std::time::Duration;
use url::Url;

pub const BASE_URL_ENV: &str = "EVENTBOARD_API_BASE_URL";
pub const DEFAULT_BASE_URL: &str = "https://jsonplaceholder.typicode.com";
pub const DEFAULT_LIST_LIMIT: usize = 10;
pub const DEFAULT_TIMEOUT_SECS: u64 = 10;
pub const DEFAULT_OWNER_ID: u64 = 1;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    base_url: String,
    list_limit: usize,
    timeout: Duration,
    owner_id: u64,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            list_limit: DEFAULT_LIST_LIMIT,
            timeout: Duration::from_secs(DEFAULT_TIMEOUT_SECS),
            owner_id: DEFAULT_OWNER_ID,
        }
    }
}

impl Config {
    /// Defaults, with the base URL taken from the environment when set.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_env_value(std::env::var(BASE_URL_ENV).ok().as_deref())
    }

    pub fn from_env_value(value: Option<&str>) -> Result<Self, ConfigError> {
        match value.map(str::trim).filter(|v| !v.is_empty()) {
            Some(url) => Self::default().with_base_url(url),
            None => Ok(Self::default()),
        }
    }

    // Builder methods
    pub fn with_base_url(mut self, url_str: &str) -> Result<Self, ConfigError> {
        self.base_url = normalize_base_url(url_str)?;
        Ok(self)
    }

    pub fn with_list_limit(mut self, limit: usize) -> Self {
        self.list_limit = limit;
        self
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    pub fn with_owner_id(mut self, owner_id: u64) -> Self {
        self.owner_id = owner_id;
        self
    }

    /// Always without a trailing slash.
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    pub fn list_limit(&self) -> usize {
        self.list_limit
    }

    pub fn timeout(&self) -> Duration {
        self.timeout
    }

    pub fn owner_id(&self) -> u64 {
        self.owner_id
    }
}

fn normalize_base_url(url_str: &str) -> Result<String, ConfigError> {
    let parsed = Url::parse(url_str.trim()).map_err(|source| ConfigError::InvalidUrl {
        url: url_str.to_string(),
        source,
    })?;
    if parsed.scheme() != "http" && parsed.scheme() != "https" {
        return Err(ConfigError::UnsupportedScheme(parsed.scheme().to_string()));
    }
    Ok(parsed.as_str().trim_end_matches('/').to_string())
}
