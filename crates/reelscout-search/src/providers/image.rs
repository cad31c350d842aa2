use async_trait::async_trait;

use super::serpapi::SerpApiClient;
use super::Provider;
use crate::error::SearchError;
use crate::types::{MediaType, ProviderRecord};

const MAX_IMAGES: usize = 10;

/// Google Images results, top 10. Upstream errors are logged and swallowed.
pub struct ImageSearch {
    serp: SerpApiClient,
}

impl ImageSearch {
    #[must_use]
    pub fn new(serp: SerpApiClient) -> Self {
        Self { serp }
    }
}

#[async_trait]
impl Provider for ImageSearch {
    fn platform_tag(&self) -> &'static str {
        "google_images"
    }

    async fn search(&self, query: &str) -> Result<Vec<ProviderRecord>, SearchError> {
        if !self.serp.has_key() {
            tracing::warn!(provider = "image", "skipping image search: SERPAPI_KEY is not set");
            return Ok(vec![]);
        }

        tracing::info!(provider = "image", query, "querying google images");
        let response = match self.serp.search(query, &[("tbm", "isch"), ("num", "10")]).await {
            Ok(r) => r,
            Err(e) => {
                tracing::warn!(provider = "image", error = %e, "serpapi image error; returning no results");
                return Ok(vec![]);
            }
        };

        Ok(response
            .images_results
            .into_iter()
            .take(MAX_IMAGES)
            .map(|item| ProviderRecord {
                title: item.title,
                link: item.link,
                media_type: Some(MediaType::Image),
                media_url: item.original,
                thumbnail: item.thumbnail,
                source: item.source,
                ..ProviderRecord::default()
            })
            .collect())
    }
}
