//! Configuration for the animal facts client
//!
//! Settings are resolved once at startup into an immutable [`Config`] that is
//! handed to [`AnimalClient`](crate::AnimalClient). Nothing reads the process
//! environment after that point.

use crate::error::ConfigError;
use reqwest::header::HeaderName;
use std::str::FromStr;
use std::time::Duration;
use url::Url;

/// Required: secret sent with every request
pub const API_KEY_VAR: &str = "API_KEY";
/// Required: endpoint base URL
pub const BASE_URL_VAR: &str = "BASE_URL";
/// Optional: `x-api-key` or `bearer`
pub const AUTH_SCHEME_VAR: &str = "ANIMALS_AUTH_SCHEME";
/// Optional: header carrying the key for the api-key scheme
pub const API_KEY_HEADER_VAR: &str = "ANIMALS_API_KEY_HEADER";
/// Optional: path appended to the base URL
pub const RESOURCE_PATH_VAR: &str = "ANIMALS_RESOURCE_PATH";
/// Optional: envelope field holding the record array
pub const ENVELOPE_FIELD_VAR: &str = "ANIMALS_ENVELOPE_FIELD";
/// Optional: request timeout in seconds
pub const TIMEOUT_VAR: &str = "ANIMALS_TIMEOUT_SECS";

/// Default header for the api-key scheme
pub const DEFAULT_API_KEY_HEADER: &str = "X-Api-Key";

/// Default envelope field
pub const DEFAULT_ENVELOPE_FIELD: &str = "animals";

/// How the API key is attached to the request
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AuthScheme {
    /// Key sent verbatim in the named header
    ApiKeyHeader(String),
    /// `Authorization: Bearer <key>`
    Bearer,
}

impl Default for AuthScheme {
    fn default() -> Self {
        AuthScheme::ApiKeyHeader(DEFAULT_API_KEY_HEADER.to_string())
    }
}

impl FromStr for AuthScheme {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "x-api-key" | "api-key" | "header" => Ok(AuthScheme::default()),
            "bearer" => Ok(AuthScheme::Bearer),
            _ => Err(ConfigError::InvalidAuthScheme(s.to_string())),
        }
    }
}

impl std::fmt::Display for AuthScheme {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            AuthScheme::ApiKeyHeader(header) => write!(f, "header {}", header),
            AuthScheme::Bearer => write!(f, "bearer"),
        }
    }
}

/// Immutable client configuration
#[derive(Clone)]
pub struct Config {
    api_key: String,
    base_url: Url,
    auth: AuthScheme,
    resource_path: Option<String>,
    envelope_field: String,
    timeout: Option<Duration>,
}

impl std::fmt::Debug for Config {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Config")
            .field("api_key", &"<redacted>")
            .field("base_url", &self.base_url.as_str())
            .field("auth", &self.auth)
            .field("resource_path", &self.resource_path)
            .field("envelope_field", &self.envelope_field)
            .field("timeout", &self.timeout)
            .finish()
    }
}

impl Config {
    /// Create a configuration with default request shape
    ///
    /// Fails if either value is blank or the URL is not http(s).
    pub fn new(api_key: impl Into<String>, base_url: &str) -> Result<Self, ConfigError> {
        let api_key = api_key.into();
        if api_key.trim().is_empty() {
            return Err(ConfigError::Missing(API_KEY_VAR));
        }
        Ok(Self {
            api_key,
            base_url: parse_base_url(base_url)?,
            auth: AuthScheme::default(),
            resource_path: None,
            envelope_field: DEFAULT_ENVELOPE_FIELD.to_string(),
            timeout: None,
        })
    }

    /// Load from the process environment, reading `.env` first if present
    pub fn from_env() -> Result<Self, ConfigError> {
        if let Ok(path) = dotenvy::dotenv() {
            tracing::debug!(path = %path.display(), "Loaded .env file");
        }
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Resolve settings through an arbitrary key lookup
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());

        let api_key = get(API_KEY_VAR).ok_or(ConfigError::Missing(API_KEY_VAR))?;
        let base_url = get(BASE_URL_VAR).ok_or(ConfigError::Missing(BASE_URL_VAR))?;
        let mut config = Self::new(api_key, &base_url)?;

        let scheme = match get(AUTH_SCHEME_VAR) {
            Some(raw) => raw.parse()?,
            None => AuthScheme::default(),
        };
        config = match (scheme, get(API_KEY_HEADER_VAR)) {
            (AuthScheme::ApiKeyHeader(_), Some(header)) => config.api_key_header(header)?,
            (scheme, _) => config.auth_scheme(scheme),
        };

        if let Some(path) = get(RESOURCE_PATH_VAR) {
            config = config.resource_path(path);
        }
        if let Some(field) = get(ENVELOPE_FIELD_VAR) {
            config = config.envelope_field(field);
        }
        if let Some(raw) = get(TIMEOUT_VAR) {
            let secs: u64 = raw
                .trim()
                .parse()
                .ok()
                .filter(|secs| *secs > 0)
                .ok_or_else(|| ConfigError::InvalidTimeout(raw.clone()))?;
            config = config.timeout(Duration::from_secs(secs));
        }

        Ok(config)
    }

    /// Set the auth scheme
    pub fn auth_scheme(mut self, auth: AuthScheme) -> Self {
        self.auth = auth;
        self
    }

    /// Use the api-key scheme with a custom header name
    pub fn api_key_header(mut self, header: impl Into<String>) -> Result<Self, ConfigError> {
        let header = header.into();
        HeaderName::from_bytes(header.trim().as_bytes())
            .map_err(|_| ConfigError::InvalidHeaderName(header.clone()))?;
        self.auth = AuthScheme::ApiKeyHeader(header.trim().to_string());
        Ok(self)
    }

    /// Append a path (e.g. `animals`) to the base URL
    pub fn resource_path(mut self, path: impl Into<String>) -> Self {
        let path = path.into();
        let trimmed = path.trim().trim_matches('/');
        self.resource_path = if trimmed.is_empty() {
            None
        } else {
            Some(trimmed.to_string())
        };
        self
    }

    /// Set the envelope field name
    pub fn envelope_field(mut self, field: impl Into<String>) -> Self {
        self.envelope_field = field.into();
        self
    }

    /// Set the request timeout
    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }

    pub fn api_key(&self) -> &str {
        &self.api_key
    }

    pub fn auth(&self) -> &AuthScheme {
        &self.auth
    }

    pub fn envelope(&self) -> &str {
        &self.envelope_field
    }

    pub fn request_timeout(&self) -> Option<Duration> {
        self.timeout
    }

    /// The URL requests go to, without the query string
    pub fn endpoint(&self) -> Url {
        let mut url = self.base_url.clone();
        if let Some(path) = &self.resource_path {
            if let Ok(mut segments) = url.path_segments_mut() {
                segments.pop_if_empty();
                segments.extend(path.split('/').filter(|s| !s.is_empty()));
            }
        }
        url
    }
}

fn parse_base_url(raw: &str) -> Result<Url, ConfigError> {
    let raw = raw.trim();
    if raw.is_empty() {
        return Err(ConfigError::Missing(BASE_URL_VAR));
    }
    let url = Url::parse(raw).map_err(|e| ConfigError::InvalidUrl {
        url: raw.to_string(),
        reason: e.to_string(),
    })?;
    if url.scheme() != "http" && url.scheme() != "https" {
        return Err(ConfigError::InvalidUrl {
            url: raw.to_string(),
            reason: "must start with http:// or https://".to_string(),
        });
    }
    Ok(url)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| map.get(key).cloned()
    }

    #[test]
    fn test_from_lookup_defaults() {
        let config = Config::from_lookup(lookup(&[
            ("API_KEY", "secret"),
            ("BASE_URL", "https://api.example.com/v1/animals"),
        ]))
        .unwrap();

        assert_eq!(config.api_key(), "secret");
        assert_eq!(config.auth(), &AuthScheme::ApiKeyHeader("X-Api-Key".into()));
        assert_eq!(config.envelope(), "animals");
        assert_eq!(config.request_timeout(), None);
        assert_eq!(
            config.endpoint().as_str(),
            "https://api.example.com/v1/animals"
        );
    }

    #[test]
    fn test_missing_required_values() {
        let err = Config::from_lookup(lookup(&[("BASE_URL", "https://x.test")])).unwrap_err();
        assert!(matches!(err, ConfigError::Missing("API_KEY")));

        let err = Config::from_lookup(lookup(&[("API_KEY", "k")])).unwrap_err();
        assert!(matches!(err, ConfigError::Missing("BASE_URL")));

        let err = Config::from_lookup(lookup(&[("API_KEY", "  "), ("BASE_URL", "https://x.test")]))
            .unwrap_err();
        assert!(matches!(err, ConfigError::Missing("API_KEY")));
    }

    #[test]
    fn test_invalid_base_url() {
        let err = Config::new("k", "not a url").unwrap_err();
        assert!(matches!(err, ConfigError::InvalidUrl { .. }));

        let err = Config::new("k", "ftp://example.com").unwrap_err();
        assert!(matches!(err, ConfigError::InvalidUrl { .. }));
    }

    #[test]
    fn test_optional_settings() {
        let config = Config::from_lookup(lookup(&[
            ("API_KEY", "k"),
            ("BASE_URL", "https://api.example.com/"),
            ("ANIMALS_AUTH_SCHEME", "Bearer"),
            ("ANIMALS_RESOURCE_PATH", "/animals/"),
            ("ANIMALS_ENVELOPE_FIELD", "results"),
            ("ANIMALS_TIMEOUT_SECS", "5"),
        ]))
        .unwrap();

        assert_eq!(config.auth(), &AuthScheme::Bearer);
        assert_eq!(config.envelope(), "results");
        assert_eq!(config.request_timeout(), Some(Duration::from_secs(5)));
        assert_eq!(config.endpoint().as_str(), "https://api.example.com/animals");
    }

    #[test]
    fn test_custom_api_key_header() {
        let config = Config::from_lookup(lookup(&[
            ("API_KEY", "k"),
            ("BASE_URL", "https://api.example.com"),
            ("ANIMALS_API_KEY_HEADER", "X-Animals-Key"),
        ]))
        .unwrap();
        assert_eq!(config.auth(), &AuthScheme::ApiKeyHeader("X-Animals-Key".into()));

        let err = Config::new("k", "https://api.example.com")
            .unwrap()
            .api_key_header("bad header")
            .unwrap_err();
        assert!(matches!(err, ConfigError::InvalidHeaderName(_)));
    }

    #[test]
    fn test_invalid_optional_settings() {
        let err = Config::from_lookup(lookup(&[
            ("API_KEY", "k"),
            ("BASE_URL", "https://api.example.com"),
            ("ANIMALS_AUTH_SCHEME", "basic"),
        ]))
        .unwrap_err();
        assert!(matches!(err, ConfigError::InvalidAuthScheme(_)));

        for bad in ["zero", "0", "-3"] {
            let err = Config::from_lookup(lookup(&[
                ("API_KEY", "k"),
                ("BASE_URL", "https://api.example.com"),
                ("ANIMALS_TIMEOUT_SECS", bad),
            ]))
            .unwrap_err();
            assert!(matches!(err, ConfigError::InvalidTimeout(_)));
        }
    }

    #[test]
    fn test_endpoint_keeps_base_path() {
        let config = Config::new("k", "https://api.example.com/v1")
            .unwrap()
            .resource_path("animals");
        assert_eq!(config.endpoint().as_str(), "https://api.example.com/v1/animals");
    }

    #[test]
    fn test_debug_redacts_key() {
        let config = Config::new("super-secret", "https://api.example.com").unwrap();
        let debug = format!("{:?}", config);
        assert!(!debug.contains("super-secret"));
        assert!(debug.contains("<redacted>"));
    }

    #[test]
    fn test_auth_scheme_parse_and_display() {
        assert_eq!("x-api-key".parse::<AuthScheme>().unwrap(), AuthScheme::default());
        assert_eq!("BEARER".parse::<AuthScheme>().unwrap(), AuthScheme::Bearer);
        assert_eq!(AuthScheme::Bearer.to_string(), "bearer");
        assert_eq!(AuthScheme::default().to_string(), "header X-Api-Key");
    }
}
