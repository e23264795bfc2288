//! Client configuration.
//!
//! Read once at startup. Any `ConfigError` is fatal: the host should
//! refuse to start rather than run against an unknown backend.

use std::path::PathBuf;
use std::time::Duration;

use thiserror::Error;
use url::Url;

use crate::session::{FileSessionStore, MemorySessionStore, SessionStore};

pub const ENV_API_URL: &str = "AUTOTRACKER_API_URL";
pub const ENV_TIMEOUT_SECS: &str = "AUTOTRACKER_TIMEOUT_SECS";
pub const ENV_SESSION_DIR: &str = "AUTOTRACKER_SESSION_DIR";

/// Round-trip limit applied to every request.
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(5);

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("{0} is not set")]
    Missing(&'static str),

    #[error("invalid base URL {url:?}: {source}")]
    InvalidUrl {
        url: String,
        #[source]
        source: url::ParseError,
    },

    #[error("base URL {0:?} must be http(s) with a host and no query or fragment")]
    UnsupportedUrl(String),

    #[error("invalid timeout {0:?}: expected a positive number of seconds")]
    InvalidTimeout(String),

    #[error("failed to build HTTP client: {0}")]
    HttpClient(#[from] reqwest::Error),
}

#[derive(Debug, Clone, PartialEq)]
pub struct ClientConfig {
    pub base_url: Url,
    pub timeout: Duration,
    /// Where `FileSessionStore` keeps the current user. `None` keeps the
    /// session in memory.
    pub session_dir: Option<PathBuf>,
}

impl ClientConfig {
    pub fn new(base_url: &str) -> Result<Self, ConfigError> {
        Ok(Self {
            base_url: parse_base_url(base_url)?,
            timeout: DEFAULT_TIMEOUT,
            session_dir: None,
        })
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    pub fn with_session_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.session_dir = Some(dir.into());
        self
    }

    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build from an arbitrary key lookup. Empty values count as unset.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let get = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());

        let base_url = get(ENV_API_URL).ok_or(ConfigError::Missing(ENV_API_URL))?;
        let mut config = Self::new(&base_url)?;

        if let Some(raw) = get(ENV_TIMEOUT_SECS) {
            let secs: u64 = raw
                .trim()
                .parse()
                .map_err(|_| ConfigError::InvalidTimeout(raw.clone()))?;
            if secs == 0 {
                return Err(ConfigError::InvalidTimeout(raw));
            }
            config.timeout = Duration::from_secs(secs);
        }
        if let Some(dir) = get(ENV_SESSION_DIR) {
            config.session_dir = Some(PathBuf::from(dir));
        }
        Ok(config)
    }

    /// The session store this configuration asks for: a file store in
    /// `session_dir` when set, memory otherwise.
    pub fn session_store(&self) -> Box<dyn SessionStore> {
        match &self.session_dir {
            Some(dir) => Box::new(FileSessionStore::new(dir)),
            None => Box::new(MemorySessionStore::new()),
        }
    }

    /// Base URL as the string `TrackerClient` joins paths onto.
    pub fn base_url_str(&self) -> &str {
        self.base_url.as_str().trim_end_matches('/')
    }
}

fn parse_base_url(raw: &str) -> Result<Url, ConfigError> {
    let url = Url::parse(raw.trim()).map_err(|source| ConfigError::InvalidUrl {
        url: raw.to_string(),
        source,
    })?;
    // Paths are appended to the base as text, so a query or fragment would
    // end up in front of them.
    if !matches!(url.scheme(), "http" | "https")
        || url.host_str().is_none()
        || url.query().is_some()
        || url.fragment().is_some()
    {
        return Err(ConfigError::UnsupportedUrl(raw.to_string()));
    }
    Ok(url)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{Role, User};
    use std::collections::HashMap;

    fn lookup(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| map.get(key).cloned()
    }

    #[test]
    fn defaults_apply() {
        let config = ClientConfig::from_lookup(lookup(&[(ENV_API_URL, "http://10.0.0.5:8080/")]))
            .unwrap();
        assert_eq!(config.timeout, DEFAULT_TIMEOUT);
        assert_eq!(config.session_dir, None);
        assert_eq!(config.base_url_str(), "http://10.0.0.5:8080");
    }

    #[test]
    fn reads_all_keys() {
        let config = ClientConfig::from_lookup(lookup(&[
            (ENV_API_URL, "https://api.example.ru/v1"),
            (ENV_TIMEOUT_SECS, "12"),
            (ENV_SESSION_DIR, "/var/lib/autotracker"),
        ]))
        .unwrap();
        assert_eq!(config.timeout, Duration::from_secs(12));
        assert_eq!(config.session_dir, Some(PathBuf::from("/var/lib/autotracker")));
        assert_eq!(config.base_url_str(), "https://api.example.ru/v1");
    }

    #[test]
    fn missing_url_is_fatal() {
        let err = ClientConfig::from_lookup(lookup(&[(ENV_API_URL, "  ")])).unwrap_err();
        assert!(matches!(err, ConfigError::Missing(ENV_API_URL)));
    }

    #[test]
    fn rejects_bad_values() {
        assert!(matches!(
            ClientConfig::new("not a url"),
            Err(ConfigError::InvalidUrl { .. })
        ));
        assert!(matches!(
            ClientConfig::new("ftp://example.ru"),
            Err(ConfigError::UnsupportedUrl(_))
        ));
        assert!(matches!(
            ClientConfig::new("http://backend.test/api?tenant=1"),
            Err(ConfigError::UnsupportedUrl(_))
        ));
        assert!(matches!(
            ClientConfig::new("http://backend.test/api#top"),
            Err(ConfigError::UnsupportedUrl(_))
        ));
        let err = ClientConfig::from_lookup(lookup(&[
            (ENV_API_URL, "http://localhost:3000"),
            (ENV_TIMEOUT_SECS, "0"),
        ]))
        .unwrap_err();
        assert!(matches!(err, ConfigError::InvalidTimeout(_)));
    }

    fn sample_user() -> User {
        User {
            name: "Иван".to_string(),
            surname: "Иванов".to_string(),
            lastname: None,
            email: "ivanov@example.ru".to_string(),
            role: Role::Operator,
            is_verified: false,
            passport: None,
        }
    }

    #[test]
    fn builder_overrides_defaults() {
        let config = ClientConfig::new("http://localhost:3000")
            .unwrap()
            .with_timeout(Duration::from_secs(2))
            .with_session_dir("/tmp/autotracker");
        assert_eq!(config.timeout, Duration::from_secs(2));
        assert_eq!(config.session_dir, Some(PathBuf::from("/tmp/autotracker")));
    }

    #[test]
    fn session_store_uses_configured_dir() {
        let dir = tempfile::tempdir().unwrap();
        let config = ClientConfig::new("http://localhost:3000")
            .unwrap()
            .with_session_dir(dir.path());
        let store = config.session_store();
        store.save(&sample_user()).unwrap();
        assert!(dir.path().join("currentUser.json").exists());
        assert_eq!(store.load().unwrap(), Some(sample_user()));
    }

    #[test]
    fn session_store_defaults_to_memory() {
        let config = ClientConfig::new("http://localhost:3000").unwrap();
        let store = config.session_store();
        assert_eq!(store.load().unwrap(), None);
        store.save(&sample_user()).unwrap();
        assert_eq!(store.load().unwrap(), Some(sample_user()));
        store.clear().unwrap();
        assert_eq!(store.load().unwrap(), None);
    }
}
