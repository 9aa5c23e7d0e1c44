//! Portal HTTP client.

use std::time::Duration;

use tracing::{debug, instrument, trace};

use loginator_core::error::{NetworkError, ParseError};
use loginator_core::types::PortalUrl;
use loginator_core::{Error, Result};

pub(crate) fn map_reqwest(url: &str, err: reqwest::Error) -> Error {
    // A URL reqwest cannot build a request for came from the portal page.
    if err.is_builder() {
        return Error::Parse(ParseError::InvalidUrl {
            value: url.to_string(),
            reason: err.to_string(),
        });
    }

    let err = if err.is_timeout() {
        NetworkError::Timeout {
            url: url.to_string(),
        }
    } else if err.is_connect() {
        NetworkError::Connection {
            url: url.to_string(),
            message: err.to_string(),
        }
    } else {
        NetworkError::Http {
            message: err.to_string(),
        }
    };
    Error::Network(err)
}

/// A fully read portal response.
#[derive(Debug, Clone)]
pub struct PortalResponse {
    /// HTTP status code.
    pub status: u16,
    /// Final URL after redirects.
    pub url: String,
    /// Response body as text.
    pub body: String,
}

/// HTTP client for portal requests. Every request carries the configured
/// timeout.
#[derive(Debug, Clone)]
pub struct PortalClient {
    client: reqwest::Client,
}

impl PortalClient {
    /// Create a new portal client.
    pub fn new(timeout: Duration) -> Result<Self> {
        let client = reqwest::Client::builder()
            .user_agent(concat!("loginator/", env!("CARGO_PKG_VERSION")))
            .timeout(timeout)
            .build()
            .map_err(|e| map_reqwest("", e))?;

        Ok(Self { client })
    }

    /// GET a URL, following redirects.
    #[instrument(skip(self))]
    pub async fn get(&self, url: &str) -> Result<PortalResponse> {
        debug!("GET");
        let response = self
            .client
            .get(url)
            .send()
            .await
            .map_err(|e| map_reqwest(url, e))?;

        Self::read(url, response).await
    }

    /// POST form-encoded fields.
    #[instrument(skip(self, url, fields), fields(url = %url))]
    pub async fn post_form(
        &self,
        url: &PortalUrl,
        fields: &[(String, String)],
    ) -> Result<PortalResponse> {
        debug!(field_count = fields.len(), "POST form");
        let response = self
            .client
            .post(url.as_str())
            .form(fields)
            .send()
            .await
            .map_err(|e| map_reqwest(url.as_str(), e))?;

        Self::read(url.as_str(), response).await
    }

    async fn read(url: &str, response: reqwest::Response) -> Result<PortalResponse> {
        let status = response.status().as_u16();
        let final_url = response.url().to_string();
        trace!(status, %final_url, "portal response");

        let body = response.text().await.map_err(|e| map_reqwest(url, e))?;

        Ok(PortalResponse {
            status,
            url: final_url,
            body,
        })
    }
}
