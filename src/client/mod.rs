use std::time::Duration;

use reqwest::header;
use thiserror::Error;

use crate::pipeline::Filter;
use crate::records::{ContentType, Record};

pub const DEFAULT_TIMEOUT_SECONDS: u64 = 10;

const USER_AGENT: &str = concat!("jobgenie/", env!("CARGO_PKG_VERSION"));

#[derive(Debug, Error)]
pub enum FetchError {
    #[error("network unavailable: {source}")]
    NetworkUnavailable {
        #[source]
        source: reqwest::Error,
    },

    #[error("unexpected HTTP status {status}")]
    HttpStatus { status: u16 },

    #[error("malformed response body: {source}")]
    MalformedResponse {
        #[source]
        source: serde_json::Error,
    },

    #[error("invalid API base URL: {url}")]
    InvalidBaseUrl { url: String },

    #[error("failed to build HTTP client: {source}")]
    ClientBuild {
        #[source]
        source: reqwest::Error,
    },
}

/// Thin client over the listings API. One instance is shared by the search
/// pipeline, the admin delete operation and the endpoint probe.
#[derive(Clone, Debug)]
pub struct ApiClient {
    http: reqwest::Client,
    base: String,
}

impl ApiClient {
    pub fn new(base: &str, timeout_seconds: u64) -> Result<Self, FetchError> {
        let trimmed = base.trim().trim_end_matches('/').to_string();
        if reqwest::Url::parse(&trimmed).is_err() {
            return Err(FetchError::InvalidBaseUrl {
                url: base.to_string(),
            });
        }

        let mut headers = header::HeaderMap::new();
        headers.insert(
            header::USER_AGENT,
            header::HeaderValue::from_static(USER_AGENT),
        );
        let http = reqwest::Client::builder()
            .default_headers(headers)
            .timeout(Duration::from_secs(timeout_seconds))
            .build()
            .map_err(|e| FetchError::ClientBuild { source: e })?;

        Ok(Self {
            http,
            base: trimmed,
        })
    }

    pub fn base(&self) -> &str {
        &self.base
    }

    /// Fetches one collection. The category narrows server-side via a query
    /// parameter; the keyword is never forwarded, it is always applied
    /// locally after the fetch.
    pub async fn fetch_records(
        &self,
        content: ContentType,
        filter: &Filter,
    ) -> Result<Vec<Record>, FetchError> {
        let url = format!("{}{}", self.base, content.endpoint());
        let mut request = self.http.get(&url);
        if let Some(category) = filter.category.as_deref().filter(|c| !c.trim().is_empty()) {
            request = request.query(&[("category", category)]);
        }

        let response = request
            .send()
            .await
            .map_err(|e| FetchError::NetworkUnavailable { source: e })?;
        let status = response.status();
        if !status.is_success() {
            return Err(FetchError::HttpStatus {
                status: status.as_u16(),
            });
        }

        let body = response
            .text()
            .await
            .map_err(|e| FetchError::NetworkUnavailable { source: e })?;
        serde_json::from_str::<Vec<Record>>(&body)
            .map_err(|e| FetchError::MalformedResponse { source: e })
    }

    /// Admin delete; the API answers 2xx on success.
    pub async fn delete_record(&self, content: ContentType, id: &str) -> Result<(), FetchError> {
        let url = format!("{}{}/{}", self.base, content.endpoint(), id);
        let response = self
            .http
            .delete(&url)
            .send()
            .await
            .map_err(|e| FetchError::NetworkUnavailable { source: e })?;
        let status = response.status();
        if !status.is_success() {
            return Err(FetchError::HttpStatus {
                status: status.as_u16(),
            });
        }
        Ok(())
    }

    /// Health-check request with its own (usually shorter) timeout.
    pub async fn ping(
        &self,
        content: ContentType,
        timeout: Duration,
    ) -> Result<u16, reqwest::Error> {
        let url = format!("{}{}", self.base, content.endpoint());
        let response = self.http.get(&url).timeout(timeout).send().await?;
        Ok(response.status().as_u16())
    }
}
