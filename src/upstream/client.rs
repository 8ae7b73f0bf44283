//! APS client: client-credentials token exchange and data API listings.
//!
//! # Responsibilities
//! - Build upstream URLs from the configured base (segments percent-encoded)
//! - Exchange client credentials for a bearer token
//! - Fetch `{data: [...]}` collections and unwrap the envelope

use std::fmt;

use reqwest::Client;
use serde::Deserialize;
use serde_json::Value;
use url::Url;

use crate::config::UpstreamConfig;
use crate::upstream::{observed, UpstreamError, UpstreamResult};

const TOKEN_PATH: [&str; 3] = ["authentication", "v2", "token"];

/// Client id + secret for the client-credentials grant.
#[derive(Clone, PartialEq, Eq)]
pub struct Credentials {
    pub client_id: String,
    client_secret: String,
}

impl Credentials {
    /// Returns `None` if either half is empty.
    pub fn new(client_id: impl Into<String>, client_secret: impl Into<String>) -> Option<Self> {
        let client_id = client_id.into();
        let client_secret = client_secret.into();
        if client_id.is_empty() || client_secret.is_empty() {
            return None;
        }
        Some(Self {
            client_id,
            client_secret,
        })
    }
}

impl fmt::Debug for Credentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Credentials")
            .field("client_id", &self.client_id)
            .field("client_secret", &"<redacted>")
            .finish()
    }
}

#[derive(Deserialize)]
struct Envelope {
    data: Vec<Value>,
}

/// Unwrap the `data` array of an upstream collection response.
pub fn parse_envelope(body: &[u8]) -> UpstreamResult<Vec<Value>> {
    serde_json::from_slice::<Envelope>(body)
        .map(|envelope| envelope.data)
        .map_err(|e| UpstreamError::Shape(e.to_string()))
}

/// Client for the upstream document API.
#[derive(Clone, Debug)]
pub struct ApsClient {
    http: Client,
    base_url: Url,
    scope: String,
}

impl ApsClient {
    pub fn new(http: Client, config: &UpstreamConfig) -> UpstreamResult<Self> {
        let base_url = Url::parse(&config.base_url)?;
        if base_url.cannot_be_a_base() {
            return Err(UpstreamError::BaseUrl(config.base_url.clone()));
        }
        Ok(Self {
            http,
            base_url,
            scope: config.scope_string(),
        })
    }

    /// Append path segments to the base URL.
    pub fn endpoint(&self, segments: &[&str]) -> UpstreamResult<Url> {
        let mut url = self.base_url.clone();
        url.path_segments_mut()
            .map_err(|_| UpstreamError::BaseUrl(self.base_url.to_string()))?
            .pop_if_empty()
            .extend(segments);
        Ok(url)
    }

    /// Exchange client credentials for a token; the payload is returned as-is.
    pub async fn exchange_client_credentials(
        &self,
        credentials: &Credentials,
    ) -> UpstreamResult<Value> {
        let url = self.endpoint(&TOKEN_PATH)?;
        tracing::info!(url = %url, client_id = %credentials.client_id, "Requesting access token");

        let params = [
            ("client_id", credentials.client_id.as_str()),
            ("client_secret", credentials.client_secret.as_str()),
            ("grant_type", "client_credentials"),
            ("scope", self.scope.as_str()),
        ];

        observed("token", async {
            let response = self
                .http
                .post(url)
                .form(&params)
                .send()
                .await?
                .error_for_status()?;
            Ok(response.json::<Value>().await?)
        })
        .await
    }

    pub async fn list_hubs(&self, token: &str) -> UpstreamResult<Vec<Value>> {
        self.get_collection("hubs", token, &["project", "v1", "hubs"])
            .await
    }

    pub async fn list_projects(&self, token: &str, hub_id: &str) -> UpstreamResult<Vec<Value>> {
        self.get_collection(
            "projects",
            token,
            &["project", "v1", "hubs", hub_id, "projects"],
        )
        .await
    }

    pub async fn list_top_folders(
        &self,
        token: &str,
        hub_id: &str,
        project_id: &str,
    ) -> UpstreamResult<Vec<Value>> {
        self.get_collection(
            "top_folders",
            token,
            &["project", "v1", "hubs", hub_id, "projects", project_id, "topFolders"],
        )
        .await
    }

    pub async fn list_folder_contents(
        &self,
        token: &str,
        project_id: &str,
        folder_id: &str,
    ) -> UpstreamResult<Vec<Value>> {
        self.get_collection(
            "folder_contents",
            token,
            &["data", "v1", "projects", project_id, "folders", folder_id, "contents"],
        )
        .await
    }

    async fn get_collection(
        &self,
        operation: &'static str,
        token: &str,
        segments: &[&str],
    ) -> UpstreamResult<Vec<Value>> {
        let url = self.endpoint(segments)?;
        tracing::debug!(operation, url = %url, "Fetching upstream collection");

        observed(operation, async {
            let body = self
                .http
                .get(url)
                .bearer_auth(token)
                .send()
                .await?
                .error_for_status()?
                .bytes()
                .await?;
            parse_envelope(&body)
        })
        .await
    }
}
