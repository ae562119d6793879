//! Country data source: the lookup port and its REST Countries client

use super::record::CountryRecord;
use crate::config::CountriesConfig;
use async_trait::async_trait;
use reqwest::{Client, Url};
use std::time::Duration;
use thiserror::Error;

/// Every way a lookup can fail. The pipeline turns all of them into the same
/// "could not find data for X" answer; the variants only matter for logs.
#[derive(Debug, Error)]
pub enum LookupError {
    #[error("country '{country}' not found (HTTP {status})")]
    NotFound { country: String, status: u16 },

    #[error("no records returned for '{country}'")]
    Empty { country: String },

    #[error("request for '{country}' failed: {message}")]
    Transport { country: String, message: String },

    #[error("could not decode records for '{country}': {message}")]
    Decode { country: String, message: String },
}

impl LookupError {
    /// The country name the failed lookup was for
    pub fn country(&self) -> &str {
        match self {
            Self::NotFound { country, .. }
            | Self::Empty { country }
            | Self::Transport { country, .. }
            | Self::Decode { country, .. } => country,
        }
    }
}

/// Name → record lookup. Implementations are queried once per user query;
/// nothing is cached between queries.
#[async_trait]
pub trait CountrySource: Send + Sync {
    async fn lookup(&self, name: &str) -> Result<CountryRecord, LookupError>;
}

/// Client for `GET {base_url}/name/{country}`
#[derive(Debug, Clone)]
pub struct RestCountriesClient {
    client: Client,
    base_url: String,
}

impl RestCountriesClient {
    pub fn new(config: &CountriesConfig) -> Self {
        let client = Client::builder()
            .user_agent(format!("agentica/{}", env!("CARGO_PKG_VERSION")))
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()
            .unwrap_or_default();

        Self {
            client,
            base_url: config.base_url.trim_end_matches('/').to_string(),
        }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Lookup URL with the country name as a single, percent-encoded path segment
    pub fn lookup_url(&self, name: &str) -> Result<Url, LookupError> {
        let mut url = Url::parse(&self.base_url).map_err(|e| LookupError::Transport {
            country: name.to_string(),
            message: format!("invalid base URL {}: {}", self.base_url, e),
        })?;

        url.path_segments_mut()
            .map_err(|_| LookupError::Transport {
                country: name.to_string(),
                message: format!("base URL {} cannot carry a path", self.base_url),
            })?
            .pop_if_empty()
            .push("name")
            .push(name);

        Ok(url)
    }
}

/// Decode a response body and keep the first (canonical) record
pub fn parse_lookup_body(country: &str, body: &str) -> Result<CountryRecord, LookupError> {
    if body.trim().is_empty() {
        return Err(LookupError::Empty {
            country: country.to_string(),
        });
    }

    let records: Vec<CountryRecord> =
        serde_json::from_str(body).map_err(|e| LookupError::Decode {
            country: country.to_string(),
            message: e.to_string(),
        })?;

    records.into_iter().next().ok_or_else(|| LookupError::Empty {
        country: country.to_string(),
    })
}

#[async_trait]
impl CountrySource for RestCountriesClient {
    async fn lookup(&self, name: &str) -> Result<CountryRecord, LookupError> {
        let url = self.lookup_url(name)?;
        tracing::debug!(%url, "looking up country");

        let response = self
            .client
            .get(url)
            .send()
            .await
            .map_err(|e| LookupError::Transport {
                country: name.to_string(),
                message: e.to_string(),
            })?;

        let status = response.status();
        if !status.is_success() {
            return Err(LookupError::NotFound {
                country: name.to_string(),
                status: status.as_u16(),
            });
        }

        let body = response.text().await.map_err(|e| LookupError::Transport {
            country: name.to_string(),
            message: e.to_string(),
        })?;

        parse_lookup_body(name, &body)
    }
}
