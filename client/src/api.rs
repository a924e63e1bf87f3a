//! HTTP client for the catalog API.

use std::time::Duration;

use reqwest::{RequestBuilder, Response, StatusCode, Url};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::{debug, warn};

use farmfresh_common::contact::{Contact, NewContact};
use farmfresh_common::farmer::{Farmer, FarmerId};
use farmfresh_common::product::{Product, ProductId};
use farmfresh_common::review::{NewReview, Review};

pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(10);

/// A read that could not produce an answer. Never confused with an empty
/// result: an empty catalog is `Ok(vec![])`.
#[derive(Debug, Error)]
pub enum FetchError {
    #[error("invalid API url '{0}'")]
    InvalidUrl(String),

    #[error("failed to build HTTP client: {0}")]
    Client(#[source] reqwest::Error),

    #[error("request to {url} failed: {source}")]
    Transport {
        url: String,
        #[source]
        source: reqwest::Error,
    },

    #[error("{url} returned {status}")]
    Status { url: String, status: StatusCode },

    #[error("unexpected response from {url}: {source}")]
    Decode {
        url: String,
        #[source]
        source: reqwest::Error,
    },
}

impl FetchError {
    /// Transport failures and server errors may succeed on a second try.
    pub fn is_retryable(&self) -> bool {
        match self {
            FetchError::Transport { .. } => true,
            FetchError::Status { status, .. } => status.is_server_error(),
            _ => false,
        }
    }
}

/// A write the server did not accept.
#[derive(Debug, Error)]
pub enum SubmitError {
    /// 400 with the server's message.
    #[error("{0}")]
    Rejected(String),

    #[error("Product not found")]
    NotFound,

    #[error(transparent)]
    Fetch(#[from] FetchError),
}

#[derive(Deserialize)]
struct ErrorBody {
    message: String,
}

#[derive(Debug, Clone)]
pub struct CatalogClient {
    http: reqwest::Client,
    base: Url,
}

impl CatalogClient {
    pub fn new(base_url: &str, timeout: Duration) -> Result<Self, FetchError> {
        let base =
            Url::parse(base_url).map_err(|_| FetchError::InvalidUrl(base_url.to_string()))?;
        if base.cannot_be_a_base() {
            return Err(FetchError::InvalidUrl(base_url.to_string()));
        }
        let http = reqwest::Client::builder()
            .timeout(timeout)
            .build()
            .map_err(FetchError::Client)?;
        Ok(Self { http, base })
    }

    // ─── Reads ──────────────────────────────────────────────────────────────

    /// `GET /api/products`, optionally filtered by category.
    pub async fn products(&self, category: Option<&str>) -> Result<Vec<Product>, FetchError> {
        let url = self.endpoint(&["products"])?;
        let query: Vec<(&str, &str)> = category.map(|c| ("category", c)).into_iter().collect();
        self.get_json(url.clone(), &query)
            .await?
            .ok_or_else(|| not_found(&url))
    }

    /// `GET /api/products/{slug}`. An unknown slug is `Ok(None)`.
    pub async fn product_by_slug(&self, slug: &str) -> Result<Option<Product>, FetchError> {
        let url = self.endpoint(&["products", slug])?;
        self.get_json(url, &[]).await
    }

    pub async fn farmers(&self) -> Result<Vec<Farmer>, FetchError> {
        let url = self.endpoint(&["farmers"])?;
        self.get_json(url.clone(), &[])
            .await?
            .ok_or_else(|| not_found(&url))
    }

    pub async fn farmer(&self, id: FarmerId) -> Result<Option<Farmer>, FetchError> {
        let url = self.endpoint(&["farmers", &id.to_string()])?;
        self.get_json(url, &[]).await
    }

    /// Reviews for a product. An unknown product is `Ok(None)`.
    pub async fn reviews(&self, product_id: ProductId) -> Result<Option<Vec<Review>>, FetchError> {
        let url = self.endpoint(&["products", &product_id.to_string(), "reviews"])?;
        self.get_json(url, &[]).await
    }

    // ─── Writes ─────────────────────────────────────────────────────────────

    pub async fn submit_review(
        &self,
        product_id: ProductId,
        review: &NewReview,
    ) -> Result<Review, SubmitError> {
        let url = self.endpoint(&["products", &product_id.to_string(), "reviews"])?;
        self.post_json(url, review).await
    }

    pub async fn submit_contact(&self, contact: &NewContact) -> Result<Contact, SubmitError> {
        let url = self.endpoint(&["contact"])?;
        self.post_json(url, contact).await
    }

    // ─── Plumbing ───────────────────────────────────────────────────────────

    fn endpoint(&self, segments: &[&str]) -> Result<Url, FetchError> {
        let mut url = self.base.clone();
        url.path_segments_mut()
            .map_err(|_| FetchError::InvalidUrl(self.base.to_string()))?
            .pop_if_empty()
            .push("api")
            .extend(segments);
        Ok(url)
    }

    /// GET with one retry. 404 is `Ok(None)`.
    async fn get_json<T: DeserializeOwned>(
        &self,
        url: Url,
        query: &[(&str, &str)],
    ) -> Result<Option<T>, FetchError> {
        let request = || self.http.get(url.clone()).query(query);
        let response = match send(request(), &url).await {
            Err(err) if err.is_retryable() => {
                warn!(%url, error = %err, "Catalog request failed, retrying once");
                send(request(), &url).await?
            }
            other => other?,
        };

        let status = response.status();
        if status == StatusCode::NOT_FOUND {
            debug!(%url, "Not found");
            return Ok(None);
        }
        if !status.is_success() {
            return Err(FetchError::Status {
                url: url.to_string(),
                status,
            });
        }
        response
            .json::<T>()
            .await
            .map(Some)
            .map_err(|source| FetchError::Decode {
                url: url.to_string(),
                source,
            })
    }

    /// POST without retry, so a slow server never records a submission twice.
    async fn post_json<B: Serialize, T: DeserializeOwned>(
        &self,
        url: Url,
        body: &B,
    ) -> Result<T, SubmitError> {
        let response = send(self.http.post(url.clone()).json(body), &url).await?;
        match response.status() {
            status if status.is_success() => {
                response
                    .json::<T>()
                    .await
                    .map_err(|source| {
                        SubmitError::Fetch(FetchError::Decode {
                            url: url.to_string(),
                            source,
                        })
                    })
            }
            StatusCode::BAD_REQUEST => {
                let message = response
                    .json::<ErrorBody>()
                    .await
                    .map(|body| body.message)
                    .unwrap_or_else(|_| "Invalid request".to_string());
                Err(SubmitError::Rejected(message))
            }
            StatusCode::NOT_FOUND => Err(SubmitError::NotFound),
            status => Err(FetchError::Status {
                url: url.to_string(),
                status,
            }
            .into()),
        }
    }
}

/// Send once. Server errors are reported as `Status` so the caller can retry.
async fn send(request: RequestBuilder, url: &Url) -> Result<Response, FetchError> {
    let response = request.send().await.map_err(|source| FetchError::Transport {
        url: url.to_string(),
        source,
    })?;
    if response.status().is_server_error() {
        return Err(FetchError::Status {
            url: url.to_string(),
            status: response.status(),
        });
    }
    Ok(response)
}

fn not_found(url: &Url) -> FetchError {
    FetchError::Status {
        url: url.to_string(),
        status: StatusCode::NOT_FOUND,
    }
}
