//! HTTP client for the property fetch/save endpoints.

use crate::config::ClientConfig;
use crate::gateway::RecordGateway;
use crate::wire::{parse_error_body, parse_field_errors};
use async_trait::async_trait;
use gazetteer_core::{FetchError, PropertySnapshot, SaveError, Uprn};
use reqwest::header::{HeaderMap, HeaderValue, AUTHORIZATION};
use reqwest::StatusCode;
use std::time::Duration;

#[derive(Debug, thiserror::Error)]
pub enum ApiClientError {
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),
    #[error("Config error: {0}")]
    Config(String),
}

/// Client for the property endpoints. Cheap to clone; the underlying
/// connection pool is shared.
#[derive(Clone)]
pub struct PropertyClient {
    client: reqwest::Client,
    base_url: String,
    auth_header: HeaderMap,
}

impl PropertyClient {
    pub fn new(config: &ClientConfig) -> Result<Self, ApiClientError> {
        let timeout = Duration::from_millis(config.request_timeout_ms);
        let client = reqwest::Client::builder().timeout(timeout).build()?;

        let mut auth_header = HeaderMap::new();
        let value = format!("Bearer {}", config.auth.token);
        auth_header.insert(
            AUTHORIZATION,
            HeaderValue::from_str(&value)
                .map_err(|e| ApiClientError::Config(e.to_string()))?,
        );

        Ok(Self {
            client,
            base_url: config.base_url.trim_end_matches('/').to_string(),
            auth_header,
        })
    }

    /// Fetch the authoritative snapshot for one UPRN. Any non-2xx outcome
    /// is reported as the record being unavailable.
    pub async fn fetch_property(&self, uprn: Uprn) -> Result<PropertySnapshot, FetchError> {
        let url = format!("{}/property/{}", self.base_url, uprn);
        let response = self
            .client
            .get(url)
            .headers(self.auth_header.clone())
            .send()
            .await
            .map_err(|e| FetchError::Transport {
                uprn,
                reason: e.to_string(),
            })?;

        let status = response.status();
        if !status.is_success() {
            tracing::debug!(%uprn, status = status.as_u16(), "Record unavailable");
            return Err(FetchError::Unavailable {
                uprn,
                status: Some(status.as_u16()),
            });
        }

        response
            .json::<PropertySnapshot>()
            .await
            .map_err(|e| FetchError::Transport {
                uprn,
                reason: format!("Failed to parse snapshot: {}", e),
            })
    }

    /// Submit an updated snapshot. Placeholder UPRNs create, persisted ones
    /// update. Returns the canonical saved snapshot.
    pub async fn save_property(
        &self,
        snapshot: &PropertySnapshot,
    ) -> Result<PropertySnapshot, SaveError> {
        let request = if snapshot.uprn.is_placeholder() {
            let url = format!("{}/property", self.base_url);
            self.client.post(url)
        } else {
            let url = format!("{}/property/{}", self.base_url, snapshot.uprn);
            self.client.put(url)
        };

        let response = request
            .headers(self.auth_header.clone())
            .json(snapshot)
            .send()
            .await
            .map_err(|e| SaveError::Transport {
                reason: e.to_string(),
            })?;

        let status = response.status();
        if status.is_success() {
            return response
                .json::<PropertySnapshot>()
                .await
                .map_err(|e| SaveError::Transport {
                    reason: format!("Failed to parse saved snapshot: {}", e),
                });
        }

        let body = response.text().await.unwrap_or_default();
        match status {
            StatusCode::BAD_REQUEST => {
                let errors = parse_field_errors(&body);
                if errors.is_empty() {
                    let (title, description) = parse_error_body(status.as_u16(), &body);
                    Err(SaveError::Rejected { title, description })
                } else {
                    Err(SaveError::Validation { errors })
                }
            }
            StatusCode::UNAUTHORIZED => Err(SaveError::SessionExpired),
            _ => {
                tracing::warn!(uprn = %snapshot.uprn, status = status.as_u16(), "Save failed");
                let (title, description) = parse_error_body(status.as_u16(), &body);
                Err(SaveError::Rejected { title, description })
            }
        }
    }
}

#[async_trait]
impl RecordGateway for PropertyClient {
    async fn fetch(&self, uprn: Uprn) -> Result<PropertySnapshot, FetchError> {
        self.fetch_property(uprn).await
    }

    async fn save(&self, snapshot: &PropertySnapshot) -> Result<PropertySnapshot, SaveError> {
        self.save_property(snapshot).await
    }
}

impl std::fmt::Debug for PropertyClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PropertyClient")
            .field("base_url", &self.base_url)
            .field("auth_header", &"[REDACTED]")
            .finish()
    }
}
