//! Top trending news for a time period.

use serde::{Deserialize, Serialize};

use crate::error::SearchError;
use crate::providers::serpapi::{NewsSource, SerpApiClient};

/// Map a user-facing period onto a `SerpApi` `tbs` filter.
///
/// The provider has no exact "yesterday" or "3 days" window, so those
/// collapse to the nearest wider one. Unknown periods mean `today`.
#[must_use]
pub fn period_filter(period: &str) -> &'static str {
    match period {
        "3days" | "week" => "qdr:w",
        "month" => "qdr:m",
        _ => "qdr:d",
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TrendingItem {
    /// 1-based position in the provider's ranking.
    pub rank: usize,
    pub title: String,
    pub link: String,
    pub source: Option<String>,
    pub date: Option<String>,
    pub snippet: Option<String>,
    pub thumbnail: Option<String>,
}

pub struct TrendingNews {
    serp: SerpApiClient,
}

impl TrendingNews {
    #[must_use]
    pub fn new(serp: SerpApiClient) -> Self {
        Self { serp }
    }

    /// Fetch up to 20 trending headlines for `period`.
    ///
    /// # Errors
    ///
    /// Returns [`SearchError`] on upstream failure. A missing key is not an
    /// error and yields an empty list.
    pub async fn fetch(&self, period: &str) -> Result<Vec<TrendingItem>, SearchError> {
        if !self.serp.has_key() {
            tracing::warn!("trending: SERPAPI_KEY is not set");
            return Ok(vec![]);
        }

        let tbs = period_filter(period);
        tracing::info!(period, tbs, "fetching trending news");

        let response = self
            .serp
            .search("news", &[("tbm", "nws"), ("tbs", tbs), ("num", "20")])
            .await?;

        Ok(response
            .news_results
            .into_iter()
            .enumerate()
            .map(|(i, item)| TrendingItem {
                rank: i + 1,
                title: item.title.unwrap_or_default(),
                link: item.link.unwrap_or_default(),
                source: item.source.and_then(NewsSource::into_name),
                date: item.date,
                snippet: item.snippet,
                thumbnail: item.thumbnail,
            })
            .collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn period_filter_collapses_windows() {
        assert_eq!(period_filter("today"), "qdr:d");
        assert_eq!(period_filter("yesterday"), "qdr:d");
        assert_eq!(period_filter("3days"), "qdr:w");
        assert_eq!(period_filter("week"), "qdr:w");
        assert_eq!(period_filter("month"), "qdr:m");
    }

    #[test]
    fn period_filter_unknown_means_today() {
        assert_eq!(period_filter("fortnight"), "qdr:d");
        assert_eq!(period_filter(""), "qdr:d");
    }
}
