//! HTTP transport backed by reqwest

use reqwest::Url;
use tracing::{debug, warn};

use crate::config::DEFAULT_USER_AGENT;
use crate::version::error::TransportError;
use crate::version::transport::Transport;

/// Plain unauthenticated GET of the descriptor URL
pub struct HttpTransport {
    client: reqwest::Client,
}

impl HttpTransport {
    pub fn new(user_agent: &str) -> Self {
        Self {
            client: reqwest::Client::builder()
                .user_agent(user_agent)
                .build()
                .expect("Failed to create HTTP client"),
        }
    }

    fn parse_url(url: &str) -> Result<Url, TransportError> {
        let parsed = Url::parse(url).map_err(|e| TransportError::InvalidUrl {
            url: url.to_string(),
            reason: e.to_string(),
        })?;

        match parsed.scheme() {
            "http" | "https" => Ok(parsed),
            scheme => Err(TransportError::InvalidUrl {
                url: url.to_string(),
                reason: format!("unsupported scheme '{}'", scheme),
            }),
        }
    }
}

impl Default for HttpTransport {
    fn default() -> Self {
        Self::new(DEFAULT_USER_AGENT)
    }
}

#[async_trait::async_trait]
impl Transport for HttpTransport {
    async fn fetch(&self, url: &str) -> Result<String, TransportError> {
        let parsed = Self::parse_url(url)?;
        debug!("Fetching version descriptor from {}", parsed);

        let response = self.client.get(parsed).send().await?;

        let status = response.status();
        if !status.is_success() {
            warn!("Version descriptor request returned status {}: {}", status, url);
            return Err(TransportError::Status(status.to_string()));
        }

        Ok(response.text().await?)
    }
}
