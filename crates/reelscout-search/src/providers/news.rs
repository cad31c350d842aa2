use async_trait::async_trait;

use super::serpapi::SerpApiClient;
use super::Provider;
use crate::error::SearchError;
use crate::types::ProviderRecord;

/// Google News results, top 5. Upstream errors are logged and swallowed.
pub struct NewsSearch {
    serp: SerpApiClient,
}

impl NewsSearch {
    #[must_use]
    pub fn new(serp: SerpApiClient) -> Self {
        Self { serp }
    }
}

#[async_trait]
impl Provider for NewsSearch {
    fn platform_tag(&self) -> &'static str {
        "news"
    }

    async fn search(&self, query: &str) -> Result<Vec<ProviderRecord>, SearchError> {
        if !self.serp.has_key() {
            tracing::warn!(provider = "news", "skipping news search: SERPAPI_KEY is not set");
            return Ok(vec![]);
        }

        tracing::info!(provider = "news", query, "querying google news");
        let response = match self.serp.search(query, &[("tbm", "nws"), ("num", "5")]).await {
            Ok(r) => r,
            Err(e) => {
                tracing::warn!(provider = "news", error = %e, "serpapi news error; returning no results");
                return Ok(vec![]);
            }
        };

        Ok(response
            .news_results
            .into_iter()
            .map(|item| ProviderRecord {
                title: item.title,
                url: item.link,
                source: item.source.and_then(super::serpapi::NewsSource::into_name),
                date: item.date,
                snippet: item.snippet,
                thumbnail: item.thumbnail,
                ..ProviderRecord::default()
            })
            .collect())
    }
}
