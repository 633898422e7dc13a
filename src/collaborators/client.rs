use std::time::Duration;

use reqwest::{Client, Response};
use serde::de::DeserializeOwned;
use serde::Serialize;
use tracing::{debug, warn};

use super::contracts::{ConversationClient, ExtractedItem, ItemExtractor, RecipeClient, WeatherClient};
use super::messages::{
    ConversationRequest, ConversationResponse, ExtractionRequest, ExtractionResponse, RecipeRequest,
    RecipeResponse, WeatherResponse,
};
use crate::error::CollaboratorError;

/// JSON-over-HTTP client for the assistant's collaborator endpoints
///
/// - `POST /api/llama` `{command}` → `{response}`
/// - `POST /api/extract` `{prompt}` → `{itemName, quantity}`
/// - `POST /api/recipe` `{availableItems}` → `{recipe}`
/// - `GET /api/weather?lat=&lon=` → `{weather}`
#[derive(Clone)]
pub struct HttpCollaborators {
    client: Client,
    base_url: String,
}

impl HttpCollaborators {
    pub fn new(base_url: impl Into<String>, timeout: Duration) -> Result<Self, CollaboratorError> {
        let client = Client::builder().timeout(timeout).build()?;

        Ok(Self {
            client,
            base_url: base_url.into().trim_end_matches('/').to_string(),
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    async fn post_json<Req, Resp>(&self, path: &str, body: &Req) -> Result<Resp, CollaboratorError>
    where
        Req: Serialize + ?Sized,
        Resp: DeserializeOwned,
    {
        let url = self.url(path);
        debug!("POST {}", url);

        let response = self.client.post(&url).json(body).send().await?;
        Self::decode(&url, response).await
    }

    async fn decode<Resp: DeserializeOwned>(url: &str, response: Response) -> Result<Resp, CollaboratorError> {
        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            warn!("{} answered {}: {}", url, status, body);
            return Err(CollaboratorError::Rejected {
                status: status.as_u16(),
            });
        }

        response
            .json::<Resp>()
            .await
            .map_err(|e| CollaboratorError::Malformed(e.to_string()))
    }
}

#[async_trait::async_trait]
impl ConversationClient for HttpCollaborators {
    async fn converse(&self, command: &str) -> Result<String, CollaboratorError> {
        let reply: ConversationResponse = self
            .post_json(
                "/api/llama",
                &ConversationRequest {
                    command: command.to_string(),
                },
            )
            .await?;
        Ok(reply.response)
    }
}

#[async_trait::async_trait]
impl ItemExtractor for HttpCollaborators {
    async fn extract(&self, prompt: &str) -> Result<ExtractedItem, CollaboratorError> {
        let reply: ExtractionResponse = self
            .post_json(
                "/api/extract",
                &ExtractionRequest {
                    prompt: prompt.to_string(),
                },
            )
            .await?;
        Ok(reply.into())
    }
}

#[async_trait::async_trait]
impl RecipeClient for HttpCollaborators {
    async fn suggest(&self, available_items: &str) -> Result<String, CollaboratorError> {
        let reply: RecipeResponse = self
            .post_json(
                "/api/recipe",
                &RecipeRequest {
                    available_items: available_items.to_string(),
                },
            )
            .await?;
        Ok(reply.recipe.trim().to_string())
    }
}

#[async_trait::async_trait]
impl WeatherClient for HttpCollaborators {
    async fn current(&self, latitude: f64, longitude: f64) -> Result<String, CollaboratorError> {
        let url = self.url("/api/weather");
        debug!("GET {} ({}, {})", url, latitude, longitude);

        let response = self
            .client
            .get(&url)
            .query(&[("lat", latitude), ("lon", longitude)])
            .send()
            .await?;

        let reply: WeatherResponse = Self::decode(&url, response).await?;
        Ok(reply.weather)
    }
}
