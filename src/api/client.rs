use async_trait::async_trait;
use reqwest::{Client, Response, StatusCode};
use std::marker::PhantomData;
use std::time::Duration;

use crate::config::ApiConfig;
use crate::model::Entity;

use super::error::ApiError;
use super::ResourceApi;

/// Longest server error body kept in [`ApiError::Server`].
const MAX_ERROR_BODY: usize = 512;

/// HTTP implementation of [`ResourceApi`] for one entity type.
///
/// Collection: `{base_url}{path_prefix}/{E::RESOURCE}`
/// Item:       `{collection}/{id}`
pub struct RestClient<E> {
    client: Client,
    collection_url: String,
    _entity: PhantomData<fn() -> E>,
}

impl<E: Entity> RestClient<E> {
    /// Build a client with the configured timeouts.
    pub fn new(config: &ApiConfig) -> Result<Self, ApiError> {
        let client = Client::builder()
            .timeout(Duration::from_secs(config.timeout_seconds.into()))
            .connect_timeout(Duration::from_secs(config.connect_timeout_seconds.into()))
            .build()
            .map_err(ApiError::Build)?;
        Ok(Self::with_client(client, &config.base_url, &config.path_prefix))
    }

    pub fn with_client(client: Client, base_url: &str, path_prefix: &str) -> Self {
        let base = base_url.trim_end_matches('/');
        let prefix = path_prefix.trim_matches('/');
        let collection_url = if prefix.is_empty() {
            format!("{}/{}", base, E::RESOURCE)
        } else {
            format!("{}/{}/{}", base, prefix, E::RESOURCE)
        };

        Self {
            client,
            collection_url,
            _entity: PhantomData,
        }
    }

    pub fn collection_url(&self) -> &str {
        &self.collection_url
    }

    fn item_url(&self, id: E::Id) -> String {
        format!("{}/{}", self.collection_url, id)
    }

    async fn send(
        &self,
        url: &str,
        request: reqwest::RequestBuilder,
    ) -> Result<Response, ApiError> {
        request.send().await.map_err(|source| {
            tracing::warn!(url = %url, error = %source, "Request failed before a response");
            ApiError::Network {
                url: url.to_string(),
                source,
            }
        })
    }

    async fn decode<T: serde::de::DeserializeOwned>(
        url: &str,
        response: Response,
    ) -> Result<T, ApiError> {
        response.json::<T>().await.map_err(|source| ApiError::Decode {
            url: url.to_string(),
            source,
        })
    }
}

/// Map a non-2xx response to an error. `item_id` is set for item paths,
/// where a 404 means the entity does not exist.
async fn check_status(
    response: Response,
    resource: &'static str,
    item_id: Option<String>,
) -> Result<Response, ApiError> {
    let status = response.status();
    if status.is_success() {
        return Ok(response);
    }

    if status == StatusCode::NOT_FOUND {
        if let Some(id) = item_id {
            return Err(ApiError::NotFound { resource, id });
        }
    }

    let mut message = response
        .text()
        .await
        .unwrap_or_else(|_| "Failed to read error body".to_string());
    if message.len() > MAX_ERROR_BODY {
        let cut = (0..=MAX_ERROR_BODY)
            .rev()
            .find(|idx| message.is_char_boundary(*idx))
            .unwrap_or(0);
        message.truncate(cut);
    }
    if message.is_empty() {
        message = status
            .canonical_reason()
            .unwrap_or("unknown status")
            .to_string();
    }

    tracing::warn!(status = status.as_u16(), resource, "Upstream returned an error");
    Err(ApiError::Server {
        status: status.as_u16(),
        message,
    })
}

#[async_trait]
impl<E: Entity> ResourceApi<E> for RestClient<E> {
    async fn list(&self) -> Result<Vec<E>, ApiError> {
        let url = self.collection_url.clone();
        tracing::debug!(url = %url, "GET collection");
        let response = self.send(&url, self.client.get(&url)).await?;
        let response = check_status(response, E::RESOURCE, None).await?;
        Self::decode(&url, response).await
    }

    async fn get(&self, id: E::Id) -> Result<E, ApiError> {
        let url = self.item_url(id);
        tracing::debug!(url = %url, "GET item");
        let response = self.send(&url, self.client.get(&url)).await?;
        let response = check_status(response, E::RESOURCE, Some(id.to_string())).await?;
        Self::decode(&url, response).await
    }

    async fn create(&self, entity: &E) -> Result<E, ApiError> {
        if let Some(id) = entity.id() {
            return Err(ApiError::InvalidRequest(format!(
                "a new {} cannot already have an id ({})",
                E::RESOURCE,
                id
            )));
        }
        let url = self.collection_url.clone();
        tracing::debug!(url = %url, "POST collection");
        let response = self.send(&url, self.client.post(&url).json(entity)).await?;
        let response = check_status(response, E::RESOURCE, None).await?;
        Self::decode(&url, response).await
    }

    async fn update(&self, entity: &E) -> Result<E, ApiError> {
        let Some(id) = entity.id() else {
            return Err(ApiError::InvalidRequest(format!(
                "cannot update a {} without an id",
                E::RESOURCE
            )));
        };
        let url = self.collection_url.clone();
        tracing::debug!(url = %url, id = %id, "PUT collection");
        let response = self.send(&url, self.client.put(&url).json(entity)).await?;
        let response = check_status(response, E::RESOURCE, Some(id.to_string())).await?;
        Self::decode(&url, response).await
    }

    async fn remove(&self, id: E::Id) -> Result<(), ApiError> {
        let url = self.item_url(id);
        tracing::debug!(url = %url, "DELETE item");
        let response = self.send(&url, self.client.delete(&url)).await?;
        check_status(response, E::RESOURCE, Some(id.to_string())).await?;
        Ok(())
    }
}
