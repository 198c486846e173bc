use std::time::Duration;

use thiserror::Error;

const DEFAULT_CMS_URL: &str = "http://localhost:1337";
const DEFAULT_CACHE_TTL_SECS: u64 = 60;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ConfigError {
    #[error("STRAPI_URL must be an http(s) URL, got '{0}'")]
    InvalidUrl(String),
    #[error("CMS_CACHE_TTL_SECS must be a whole number of seconds, got '{0}'")]
    InvalidTtl(String),
}

/// Where the CMS lives and how long its responses are reused.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CmsConfig {
    pub base_url: String,
    pub token: Option<String>,
    pub cache_ttl: Duration,
}

impl CmsConfig {
    /// Reads `STRAPI_URL`, `STRAPI_TOKEN` and `CMS_CACHE_TTL_SECS`.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let base_url = lookup("STRAPI_URL")
            .map(|s| s.trim().to_string())
            .filter(|s| !s.is_empty())
            .unwrap_or_else(|| DEFAULT_CMS_URL.to_string());
        if !(base_url.starts_with("http://") || base_url.starts_with("https://")) {
            return Err(ConfigError::InvalidUrl(base_url));
        }
        let base_url = base_url.trim_end_matches('/').to_string();

        let token = lookup("STRAPI_TOKEN")
            .map(|s| s.trim().to_string())
            .filter(|s| !s.is_empty());

        let cache_ttl = match lookup("CMS_CACHE_TTL_SECS") {
            Some(raw) => raw
                .trim()
                .parse::<u64>()
                .map_err(|_| ConfigError::InvalidTtl(raw.clone()))?,
            None => DEFAULT_CACHE_TTL_SECS,
        };

        Ok(Self {
            base_url,
            token,
            cache_ttl: Duration::from_secs(cache_ttl),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup(vars: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let vars = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect::<HashMap<_, _>>();
        move |key| vars.get(key).cloned()
    }

    #[test]
    fn test_defaults() {
        let config = CmsConfig::from_lookup(lookup(&[])).unwrap();
        assert_eq!(config.base_url, "http://localhost:1337");
        assert_eq!(config.token, None);
        assert_eq!(config.cache_ttl, Duration::from_secs(60));
    }

    #[test]
    fn test_overrides() {
        let config = CmsConfig::from_lookup(lookup(&[
            ("STRAPI_URL", "https://cms.example.com/"),
            ("STRAPI_TOKEN", " secret "),
            ("CMS_CACHE_TTL_SECS", "0"),
        ]))
        .unwrap();
        assert_eq!(config.base_url, "https://cms.example.com");
        assert_eq!(config.token.as_deref(), Some("secret"));
        assert_eq!(config.cache_ttl, Duration::ZERO);

        let config = CmsConfig::from_lookup(lookup(&[("STRAPI_TOKEN", "  ")])).unwrap();
        assert_eq!(config.token, None);
    }

    #[test]
    fn test_invalid_values() {
        assert_eq!(
            CmsConfig::from_lookup(lookup(&[("STRAPI_URL", "ftp://cms")])),
            Err(ConfigError::InvalidUrl("ftp://cms".to_string()))
        );
        assert_eq!(
            CmsConfig::from_lookup(lookup(&[("CMS_CACHE_TTL_SECS", "soon")])),
            Err(ConfigError::InvalidTtl("soon".to_string()))
        );
    }
}
