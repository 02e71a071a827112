//! HTTP client for the animal facts API
//!
//! One GET per lookup: `<endpoint>?name=<query>` with the API key attached as
//! configured. The body is normalized into a record list by [`normalize`].

use crate::config::{AuthScheme, Config};
use crate::error::FetchError;
use crate::source::AnimalSource;
use crate::types::{AnimalQuery, AnimalRecord, FetchOutcome};
use crate::DEFAULT_USER_AGENT;
use async_trait::async_trait;
use reqwest::header::{HeaderMap, HeaderName, HeaderValue, ACCEPT, AUTHORIZATION, USER_AGENT};
use serde_json::Value;
use tracing::{debug, info};
use url::Url;

/// Query parameter carrying the animal name
pub const NAME_PARAM: &str = "name";

/// Client for the animal facts API
#[derive(Debug, Clone)]
pub struct AnimalClient {
    config: Config,
    http: reqwest::Client,
    auth: (HeaderName, HeaderValue),
}

impl AnimalClient {
    /// Build a client from configuration
    ///
    /// Fails if the HTTP client cannot be built or the key cannot be sent
    /// as a header value.
    pub fn new(config: Config) -> Result<Self, FetchError> {
        let mut headers = HeaderMap::new();
        headers.insert(USER_AGENT, HeaderValue::from_static(DEFAULT_USER_AGENT));
        headers.insert(ACCEPT, HeaderValue::from_static("application/json"));

        let mut builder = reqwest::Client::builder().default_headers(headers);
        if let Some(timeout) = config.request_timeout() {
            builder = builder.connect_timeout(timeout).timeout(timeout);
        }
        let http = builder.build().map_err(FetchError::ClientBuild)?;
        let auth = auth_header(&config)?;

        Ok(Self { config, http, auth })
    }

    /// Full request URL for a query
    pub fn request_url(&self, query: &AnimalQuery) -> Url {
        let mut url = self.config.endpoint();
        url.query_pairs_mut().append_pair(NAME_PARAM, query.name());
        url
    }
}

fn auth_header(config: &Config) -> Result<(HeaderName, HeaderValue), FetchError> {
    let key = config.api_key();
    let (name, value) = match config.auth() {
        AuthScheme::ApiKeyHeader(header) => {
            let name = HeaderName::from_bytes(header.as_bytes())
                .map_err(|_| FetchError::InvalidAuthHeader(format!("bad header name {:?}", header)))?;
            (name, HeaderValue::from_str(key))
        }
        AuthScheme::Bearer => (AUTHORIZATION, HeaderValue::from_str(&format!("Bearer {}", key))),
    };
    let mut value = value.map_err(|_| {
        FetchError::InvalidAuthHeader("API key contains characters not allowed in a header".into())
    })?;
    value.set_sensitive(true);
    Ok((name, value))
}

#[async_trait]
impl AnimalSource for AnimalClient {
    fn name(&self) -> &'static str {
        "http"
    }

    async fn fetch(&self, query: &AnimalQuery) -> Result<FetchOutcome, FetchError> {
        info!(animal = %query, "Fetching data for animal");

        let url = self.request_url(query);
        let (header_name, header_value) = self.auth.clone();
        debug!(url = %self.config.endpoint(), auth = %self.config.auth(), "Sending request");

        let response = self
            .http
            .get(url)
            .header(header_name, header_value)
            .send()
            .await
            .map_err(FetchError::from_reqwest)?;

        let status = response.status();
        if !status.is_success() {
            return Err(FetchError::HttpStatus {
                status: status.as_u16(),
            });
        }

        let body = response.text().await.map_err(FetchError::from_reqwest)?;
        let value: Value = serde_json::from_str(&body).map_err(FetchError::InvalidBody)?;
        let records = normalize(value, self.config.envelope())?;

        if !records.is_empty() {
            info!(count = records.len(), "Data fetched successfully");
        }
        Ok(FetchOutcome::from_records(records))
    }
}

/// Turn a response body into a record list
///
/// Accepts a top-level array, or an object holding an array under
/// `envelope`. Every element must be a JSON object. `null` and `{}` carry
/// no records and normalize to an empty list.
pub fn normalize(body: Value, envelope: &str) -> Result<Vec<AnimalRecord>, FetchError> {
    let items = match body {
        Value::Array(items) => items,
        Value::Null => Vec::new(),
        Value::Object(map) if map.is_empty() => Vec::new(),
        Value::Object(mut map) => match map.remove(envelope) {
            Some(Value::Array(items)) => items,
            Some(other) => {
                return Err(FetchError::UnexpectedShape(format!(
                    "field {:?} is {}, expected an array",
                    envelope,
                    kind(&other)
                )))
            }
            None => {
                return Err(FetchError::UnexpectedShape(format!(
                    "object without {:?} field",
                    envelope
                )))
            }
        },
        other => {
            return Err(FetchError::UnexpectedShape(format!(
                "top-level {}, expected an array",
                kind(&other)
            )))
        }
    };

    items
        .into_iter()
        .enumerate()
        .map(|(i, item)| match item {
            Value::Object(record) => Ok(record),
            other => Err(FetchError::UnexpectedShape(format!(
                "element {} is {}, expected an object",
                i,
                kind(&other)
            ))),
        })
        .collect()
}

fn kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}
