use std::time::Duration;

use anyhow::{Context, Result};
use async_trait::async_trait;
use reqwest::Client;
use serde_json::{json, Value};
use tracing::{debug, warn};

use crate::api::normalize::normalize_page;
use crate::api::traits::{FeaturedSink, ListingSource, ReorderSink};
use crate::api::types::{ApiConfig, ListingQuery, OrderEntry};
use crate::error::EngineError;
use crate::models::{ListingItem, ListingKind, Page};

/// REST client for the directory backend
pub struct ApiClient {
    client: Client,
    config: ApiConfig,
}

impl ApiClient {
    pub fn new(config: ApiConfig) -> Result<Self> {
        let client = Client::builder()
            .timeout(Duration::from_secs(30))
            .user_agent("travel-scout/0.1")
            .build()
            .context("Failed to create HTTP client")?;

        Ok(Self { client, config })
    }

    fn listing_url(&self, kind: ListingKind) -> String {
        let segment = match kind {
            ListingKind::Office => "offices",
            ListingKind::Package => "packages",
        };
        format!("{}/{}", self.config.base_url.trim_end_matches('/'), segment)
    }

    async fn check_status(response: reqwest::Response) -> Result<reqwest::Response, EngineError> {
        let status = response.status();
        if !status.is_success() {
            warn!("backend returned status: {}", status);
            return Err(EngineError::BackendStatus {
                status: status.as_u16(),
            });
        }
        Ok(response)
    }
}

#[async_trait]
impl ListingSource for ApiClient {
    async fn fetch_page(&self, query: &ListingQuery) -> Result<Page<ListingItem>, EngineError> {
        let url = self.listing_url(query.kind);
        debug!("Fetching URL: {} ({:?})", url, query.kind);

        let response = self
            .client
            .get(&url)
            .query(&query.to_query_pairs())
            .send()
            .await?;
        let response = Self::check_status(response).await?;
        let raw: Value = response.json().await?;

        normalize_page(
            &raw,
            query.kind,
            query.page,
            query.page_size,
            &query.locale,
        )
    }

    fn source_name(&self) -> &'static str {
        "rest-backend"
    }
}

#[async_trait]
impl ReorderSink for ApiClient {
    async fn persist_order(
        &self,
        collection_id: &str,
        order: &[OrderEntry],
    ) -> Result<(), EngineError> {
        let url = format!(
            "{}/galleries/{}/order",
            self.config.base_url.trim_end_matches('/'),
            collection_id
        );
        debug!("Persisting order of {} items to {}", order.len(), url);

        let response = self
            .client
            .put(&url)
            .json(&json!({ "items": order }))
            .send()
            .await?;
        Self::check_status(response).await?;
        Ok(())
    }
}

#[async_trait]
impl FeaturedSink for ApiClient {
    async fn persist_featured(
        &self,
        collection_id: &str,
        item_id: &str,
    ) -> Result<(), EngineError> {
        let url = format!(
            "{}/galleries/{}/featured",
            self.config.base_url.trim_end_matches('/'),
            collection_id
        );
        debug!("Marking {} featured via {}", item_id, url);

        let response = self
            .client
            .put(&url)
            .json(&json!({ "id": item_id }))
            .send()
            .await?;
        Self::check_status(response).await?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn listing_url_per_kind() {
        let client = ApiClient::new(ApiConfig {
            base_url: "https://example.test/api/".into(),
            locale: "en".into(),
        })
        .unwrap();
        assert_eq!(
            client.listing_url(ListingKind::Office),
            "https://example.test/api/offices"
        );
        assert_eq!(
            client.listing_url(ListingKind::Package),
            "https://example.test/api/packages"
        );
    }
}
