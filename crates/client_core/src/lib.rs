use async_trait::async_trait;
use reqwest::{Client, Response, StatusCode};
use shared::{
    domain::ProdutoId,
    error::{ApiError, ErrorCode},
    protocol::{Produto, ProdutoDraft},
};
use thiserror::Error;
use tracing::debug;
use url::Url;

pub mod config;
pub mod controller;

pub use config::ClientSettings;
pub use controller::{
    ControllerError, ControllerEvent, ModalState, ModalTarget, Notification, NotificationStatus,
    ProdutoListController, Route,
};

#[derive(Debug, Error)]
pub enum ClientError {
    #[error("invalid backend url '{url}': {reason}")]
    InvalidUrl { url: String, reason: String },
    #[error("backend unreachable: {0}")]
    Unreachable(#[source] reqwest::Error),
    #[error("backend answered {status}: {body}")]
    Status { status: StatusCode, body: String },
    #[error("malformed backend response: {0}")]
    Decode(#[source] reqwest::Error),
    #[error("request failed: {0}")]
    Request(#[source] reqwest::Error),
}

impl ClientError {
    pub fn code(&self) -> ErrorCode {
        match self {
            Self::InvalidUrl { .. } => ErrorCode::Validation,
            Self::Unreachable(_) => ErrorCode::Unreachable,
            Self::Status { status, .. } => match *status {
                StatusCode::NOT_FOUND => ErrorCode::NotFound,
                StatusCode::BAD_REQUEST | StatusCode::UNPROCESSABLE_ENTITY => {
                    ErrorCode::Validation
                }
                StatusCode::UNAUTHORIZED => ErrorCode::Unauthorized,
                StatusCode::FORBIDDEN => ErrorCode::Forbidden,
                StatusCode::TOO_MANY_REQUESTS => ErrorCode::RateLimited,
                _ => ErrorCode::Internal,
            },
            Self::Decode(_) | Self::Request(_) => ErrorCode::Internal,
        }
    }

    pub fn to_api_error(&self) -> ApiError {
        ApiError::new(self.code(), self.to_string())
    }

    fn from_send(err: reqwest::Error) -> Self {
        if err.is_connect() || err.is_timeout() {
            Self::Unreachable(err)
        } else {
            Self::Request(err)
        }
    }
}

/// Access to the produtos collection of the backend.
#[async_trait]
pub trait ProdutosApi: Send + Sync {
    async fn list(&self) -> Result<Vec<Produto>, ClientError>;
    async fn create(&self, draft: &ProdutoDraft) -> Result<(), ClientError>;
    async fn update(&self, id: &ProdutoId, draft: &ProdutoDraft) -> Result<(), ClientError>;
    async fn delete(&self, id: &ProdutoId) -> Result<(), ClientError>;
}

/// REST client for a `/produtos` style collection endpoint.
pub struct HttpProdutosClient {
    http: Client,
    collection_url: Url,
}

impl HttpProdutosClient {
    pub fn new(settings: &ClientSettings) -> Result<Self, ClientError> {
        let collection_url = parse_collection_url(&settings.api_url)?;
        let mut builder = Client::builder();
        if let Some(timeout) = settings.request_timeout() {
            builder = builder.timeout(timeout);
        }
        let http = builder.build().map_err(ClientError::Request)?;
        Ok(Self {
            http,
            collection_url,
        })
    }

    pub fn collection_url(&self) -> &Url {
        &self.collection_url
    }

    pub fn item_url(&self, id: &ProdutoId) -> Result<Url, ClientError> {
        let mut url = self.collection_url.clone();
        url.path_segments_mut()
            .map_err(|_| ClientError::InvalidUrl {
                url: self.collection_url.to_string(),
                reason: "url cannot carry path segments".to_string(),
            })?
            .pop_if_empty()
            .push(&id.to_string());
        Ok(url)
    }
}

#[async_trait]
impl ProdutosApi for HttpProdutosClient {
    async fn list(&self) -> Result<Vec<Produto>, ClientError> {
        let response = self
            .http
            .get(self.collection_url.clone())
            .send()
            .await
            .map_err(ClientError::from_send)?;
        let produtos: Vec<Produto> = ensure_success(response)
            .await?
            .json()
            .await
            .map_err(ClientError::Decode)?;
        debug!(count = produtos.len(), "produtos: GET collection");
        Ok(produtos)
    }

    async fn create(&self, draft: &ProdutoDraft) -> Result<(), ClientError> {
        let response = self
            .http
            .post(self.collection_url.clone())
            .json(draft)
            .send()
            .await
            .map_err(ClientError::from_send)?;
        ensure_success(response).await?;
        debug!(codigo = %draft.codigo, "produtos: POST collection");
        Ok(())
    }

    async fn update(&self, id: &ProdutoId, draft: &ProdutoDraft) -> Result<(), ClientError> {
        let body = Produto::from_draft(id.clone(), draft.clone());
        let response = self
            .http
            .put(self.item_url(id)?)
            .json(&body)
            .send()
            .await
            .map_err(ClientError::from_send)?;
        ensure_success(response).await?;
        debug!(id = %id, "produtos: PUT item");
        Ok(())
    }

    async fn delete(&self, id: &ProdutoId) -> Result<(), ClientError> {
        let response = self
            .http
            .delete(self.item_url(id)?)
            .send()
            .await
            .map_err(ClientError::from_send)?;
        ensure_success(response).await?;
        debug!(id = %id, "produtos: DELETE item");
        Ok(())
    }
}

async fn ensure_success(response: Response) -> Result<Response, ClientError> {
    let status = response.status();
    if status.is_success() {
        return Ok(response);
    }
    let body = response.text().await.unwrap_or_default();
    Err(ClientError::Status { status, body })
}

fn parse_collection_url(raw: &str) -> Result<Url, ClientError> {
    let trimmed = raw.trim().trim_end_matches('/');
    let url = Url::parse(trimmed).map_err(|e| ClientError::InvalidUrl {
        url: raw.to_string(),
        reason: e.to_string(),
    })?;
    if !matches!(url.scheme(), "http" | "https") {
        return Err(ClientError::InvalidUrl {
            url: raw.to_string(),
            reason: format!("unsupported scheme '{}'", url.scheme()),
        });
    }
    if url.cannot_be_a_base() {
        return Err(ClientError::InvalidUrl {
            url: raw.to_string(),
            reason: "url cannot carry path segments".to_string(),
        });
    }
    Ok(url)
}

#[cfg(test)]
#[path = "tests/lib_tests.rs"]
mod tests;
