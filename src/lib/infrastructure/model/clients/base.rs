//! Shared HTTP plumbing for chat-completion backends

use reqwest::{Client, Response};
use serde::Serialize;
use serde::de::DeserializeOwned;
use tracing::debug;

use crate::config::ModelSettings;
use crate::infrastructure::model::types::ModelError;

/// Target of one backend: resolved URL plus the bearer credential.
#[derive(Clone)]
pub struct HttpClientBase {
    pub provider: String,
    pub url: String,
    credential: Option<String>,
    http: Client,
}

impl HttpClientBase {
    pub fn from_settings(settings: &ModelSettings) -> Self {
        Self {
            provider: settings.provider.clone(),
            url: join_url(&settings.endpoint, &settings.api_path),
            credential: settings.credential.clone(),
            http: Client::new(),
        }
    }

    /// POSTs `body` as JSON with bearer auth and decodes the JSON reply.
    pub async fn post_json<Req, Res>(&self, body: &Req) -> Result<Res, ModelError>
    where
        Req: Serialize,
        Res: DeserializeOwned,
    {
        let credential = self.credential()?;

        let response = self
            .http
            .post(&self.url)
            .bearer_auth(credential)
            .json(body)
            .send()
            .await
            .map_err(|err| ModelError::network(&self.provider, err))?;
        debug!(provider = %self.provider, status = %response.status(), "Backend responded");

        self.decode(response).await
    }

    async fn decode<Res: DeserializeOwned>(&self, response: Response) -> Result<Res, ModelError> {
        let response = response
            .error_for_status()
            .map_err(|err| ModelError::network(&self.provider, err))?;
        response.json().await.map_err(|err| {
            if err.is_decode() {
                ModelError::invalid_response(&self.provider, err.to_string())
            } else {
                ModelError::network(&self.provider, err)
            }
        })
    }

    fn credential(&self) -> Result<&str, ModelError> {
        self.credential
            .as_deref()
            .map(str::trim)
            .filter(|key| !key.is_empty())
            .ok_or_else(|| ModelError::missing_api_key(&self.provider))
    }
}

/// Joins the base address and path with exactly one slash between them.
pub fn join_url(endpoint: &str, path: &str) -> String {
    format!(
        "{}/{}",
        endpoint.trim_end_matches('/'),
        path.trim_start_matches('/')
    )
}
