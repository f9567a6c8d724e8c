//! HTTP capability used by the GitHub client

use log::debug;
use thiserror::Error;

use crate::config::Settings;

/// A fully buffered HTTP response
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HttpResponse {
    pub status: u16,
    pub body: Vec<u8>,
}

impl HttpResponse {
    pub fn new(status: u16, body: impl Into<Vec<u8>>) -> Self {
        Self {
            status,
            body: body.into(),
        }
    }

    /// GitHub signals every error with a 4xx or 5xx status
    pub fn is_failure(&self) -> bool {
        self.status >= 400
    }
}

#[derive(Debug, Error)]
#[error("request to {url} failed: {source}")]
pub struct FetchError {
    pub url: String,
    #[source]
    pub source: reqwest::Error,
}

/// Issues a GET and buffers the whole body
#[allow(async_fn_in_trait)]
pub trait Transport {
    async fn get(&self, url: &str) -> Result<HttpResponse, FetchError>;
}

/// `reqwest`-backed transport
pub struct ReqwestTransport {
    client: reqwest::Client,
}

impl ReqwestTransport {
    pub fn new(settings: &Settings) -> Result<Self, reqwest::Error> {
        let client = reqwest::Client::builder()
            .user_agent(settings.user_agent.as_str())
            .connect_timeout(settings.connect_timeout)
            .build()?;
        debug!(
            "HTTP client ready ({}, {}s connect timeout)",
            settings.user_agent,
            settings.connect_timeout.as_secs()
        );
        Ok(Self { client })
    }
}

impl Transport for ReqwestTransport {
    async fn get(&self, url: &str) -> Result<HttpResponse, FetchError> {
        let wrap = |source| FetchError {
            url: url.to_string(),
            source,
        };

        let response = self.client.get(url).send().await.map_err(wrap)?;
        let status = response.status().as_u16();
        let body = response.bytes().await.map_err(wrap)?;

        debug!("GET {} -> {} ({} bytes)", url, status, body.len());
        Ok(HttpResponse::new(status, body.to_vec()))
    }
}
