use anyhow::{Context, Result};
use async_trait::async_trait;
use reqwest::Client;
use serde::Deserialize;
use std::env;

use crate::error::CatalogError;
use crate::models::Movie;

const CATALOG_BASE: &str = "https://api.themoviedb.org/3";
const IMAGE_BASE: &str = "https://image.tmdb.org/t/p/original";

/// Read access to the movie catalog service. Both calls hit the network every
/// time; there is deliberately no caching or retry at this layer.
#[async_trait]
pub trait CatalogApi: Send + Sync {
    async fn fetch_detail(&self, id: i32) -> Result<Movie, CatalogError>;
    async fn fetch_recommendations(&self, id: i32) -> Result<Vec<Movie>, CatalogError>;
}

#[derive(Debug, Clone)]
pub struct CatalogClient {
    client: Client,
    bearer_token: String,
    base_url: String,
}

impl CatalogClient {
    pub fn from_env() -> Result<Self> {
        let bearer_token = env::var("API_ACCESS_TOKEN").context("API_ACCESS_TOKEN not set")?;
        let base_url = env::var("CATALOG_BASE_URL").unwrap_or_else(|_| CATALOG_BASE.to_string());
        Ok(Self {
            client: Client::new(),
            bearer_token,
            base_url,
        })
    }

    async fn get_json<T: for<'de> Deserialize<'de>>(
        &self,
        operation: &'static str,
        id: i32,
        url: &str,
    ) -> Result<T, CatalogError> {
        let res = self
            .client
            .get(url)
            .bearer_auth(&self.bearer_token)
            .send()
            .await
            .map_err(|e| CatalogError::RemoteFetch {
                operation,
                id,
                detail: e.to_string(),
            })?;
        let status = res.status();
        let text = res.text().await.map_err(|e| CatalogError::RemoteFetch {
            operation,
            id,
            detail: e.to_string(),
        })?;
        if !status.is_success() {
            return Err(CatalogError::RemoteFetch {
                operation,
                id,
                detail: format!("{} -> {}", status, text),
            });
        }
        serde_json::from_str(&text).map_err(|source| CatalogError::InvalidPayload {
            operation,
            id,
            source,
        })
    }
}

#[async_trait]
impl CatalogApi for CatalogClient {
    async fn fetch_detail(&self, id: i32) -> Result<Movie, CatalogError> {
        let url = format!("{}/movie/{id}?language=en-US", self.base_url);
        self.get_json("fetch_detail", id, &url).await
    }

    async fn fetch_recommendations(&self, id: i32) -> Result<Vec<Movie>, CatalogError> {
        #[derive(Deserialize)]
        struct RecommendationsResponse {
            results: Vec<Movie>,
        }

        let url = format!("{}/movie/{id}/recommendations?language=en-US", self.base_url);
        let data: RecommendationsResponse =
            self.get_json("fetch_recommendations", id, &url).await?;
        Ok(data.results)
    }
}

/// Absolute image URL for a catalog-relative path such as `/abc.jpg`.
pub fn image_url(path: &str) -> String {
    format!("{IMAGE_BASE}{path}")
}
