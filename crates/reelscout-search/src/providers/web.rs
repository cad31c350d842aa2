use async_trait::async_trait;

use super::serpapi::SerpApiClient;
use super::{non_blank, Provider};
use crate::error::SearchError;
use crate::types::{MediaType, ProviderRecord};

/// Google organic results, top 5. Upstream errors propagate.
pub struct WebSearch {
    serp: SerpApiClient,
}

impl WebSearch {
    #[must_use]
    pub fn new(serp: SerpApiClient) -> Self {
        Self { serp }
    }
}

#[async_trait]
impl Provider for WebSearch {
    fn platform_tag(&self) -> &'static str {
        "google"
    }

    async fn search(&self, query: &str) -> Result<Vec<ProviderRecord>, SearchError> {
        if !self.serp.has_key() {
            tracing::warn!(provider = "web", "skipping web search: SERPAPI_KEY is not set");
            return Ok(vec![]);
        }

        tracing::info!(provider = "web", query, "querying google");
        let response = self
            .serp
            .search(query, &[("num", "5")])
            .await
            .inspect_err(|e| tracing::error!(provider = "web", error = %e, "serpapi error"))?;

        Ok(response
            .organic_results
            .into_iter()
            .map(|item| {
                let thumbnail = non_blank(item.thumbnail);
                ProviderRecord {
                    title: item.title,
                    link: item.link,
                    snippet: item.snippet,
                    media_type: Some(if thumbnail.is_some() {
                        MediaType::Image
                    } else {
                        MediaType::Article
                    }),
                    thumbnail,
                    date: item.date,
                    source: item.source,
                    ..ProviderRecord::default()
                }
            })
            .collect())
    }
}
