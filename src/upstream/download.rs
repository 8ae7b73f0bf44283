//! Forwarding client for the internal download service.

use axum::http::HeaderName;
use reqwest::Client;
use serde_json::{Map, Value};
use url::Url;

use crate::config::DownloadConfig;
use crate::upstream::{observed, UpstreamError, UpstreamResult};

#[derive(Clone, Debug)]
pub struct DownloadClient {
    http: Client,
    url: Url,
    api_key_header: HeaderName,
}

impl DownloadClient {
    pub fn new(http: Client, config: &DownloadConfig) -> UpstreamResult<Self> {
        let url = Url::parse(&config.url)?;
        let api_key_header = HeaderName::from_bytes(config.api_key_header.as_bytes())
            .map_err(|_| UpstreamError::Header(config.api_key_header.clone()))?;
        Ok(Self {
            http,
            url,
            api_key_header,
        })
    }

    /// POST `params` as JSON with the key in the configured header.
    ///
    /// Any response, whatever its status, is returned to the caller; only a
    /// missing response is an error. Errors never carry the service URL.
    pub async fn forward(
        &self,
        api_key: &str,
        params: &Map<String, Value>,
    ) -> UpstreamResult<reqwest::Response> {
        tracing::debug!(url = %self.url, fields = params.len(), "Forwarding download request");

        observed("download", async {
            self.http
                .post(self.url.clone())
                .header(self.api_key_header.clone(), api_key)
                .json(params)
                .send()
                .await
                .map_err(|e| UpstreamError::Http(e.without_url()))
        })
        .await
    }
}
