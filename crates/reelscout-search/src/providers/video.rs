//! YouTube Data API v3 video search with direct-stream resolution.

use std::sync::Arc;

use async_trait::async_trait;
use futures::future::join_all;
use reqwest::{Client, Url};
use serde::Deserialize;

use super::media::MediaResolver;
use super::Provider;
use crate::error::SearchError;
use crate::http::{endpoint, get_json, parse_base_url};
use crate::types::{MediaType, ProviderRecord};

const DEFAULT_BASE_URL: &str = "https://www.googleapis.com/";
const MAX_RESULTS: &str = "5";

#[derive(Debug, Deserialize)]
struct SearchListResponse {
    #[serde(default)]
    items: Vec<SearchItem>,
}

#[derive(Debug, Deserialize)]
struct SearchItem {
    id: SearchItemId,
    #[serde(default)]
    snippet: Snippet,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct SearchItemId {
    video_id: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
struct Snippet {
    title: Option<String>,
    description: Option<String>,
    published_at: Option<String>,
    channel_title: Option<String>,
    #[serde(default)]
    thumbnails: Thumbnails,
}

#[derive(Debug, Default, Deserialize)]
struct Thumbnails {
    high: Option<Thumbnail>,
    default: Option<Thumbnail>,
}

#[derive(Debug, Deserialize)]
struct Thumbnail {
    url: Option<String>,
}

/// Top 5 YouTube videos for a query. Upstream errors propagate.
///
/// Each video's direct stream URL is resolved concurrently through the
/// [`MediaResolver`]; a `None` leaves the embed URL as the media URL.
pub struct VideoSearch {
    client: Client,
    api_key: Option<String>,
    base_url: Url,
    resolver: Arc<dyn MediaResolver>,
}

impl VideoSearch {
    /// # Errors
    ///
    /// Never fails for the built-in base URL.
    pub fn new(
        client: Client,
        api_key: Option<String>,
        resolver: Arc<dyn MediaResolver>,
    ) -> Result<Self, SearchError> {
        Self::with_base_url(client, api_key, resolver, DEFAULT_BASE_URL)
    }

    /// # Errors
    ///
    /// Returns [`SearchError::InvalidBaseUrl`] if `base_url` does not parse.
    pub fn with_base_url(
        client: Client,
        api_key: Option<String>,
        resolver: Arc<dyn MediaResolver>,
        base_url: &str,
    ) -> Result<Self, SearchError> {
        Ok(Self {
            client,
            api_key,
            base_url: parse_base_url(base_url)?,
            resolver,
        })
    }

    async fn to_record(&self, video_id: String, snippet: Snippet) -> ProviderRecord {
        let watch_url = format!("https://www.youtube.com/watch?v={video_id}");
        let embed_url = format!("https://www.youtube.com/embed/{video_id}");
        let direct = self.resolver.resolve(&watch_url).await;

        let Snippet {
            title,
            description,
            published_at,
            channel_title,
            thumbnails,
        } = snippet;
        let thumbnail = thumbnails
            .high
            .and_then(|t| t.url)
            .or_else(|| thumbnails.default.and_then(|t| t.url));

        ProviderRecord {
            title,
            description,
            thumbnail,
            published_at,
            source: channel_title,
            media_type: Some(MediaType::Video),
            media_url: Some(direct.unwrap_or_else(|| embed_url.clone())),
            source_link: Some(watch_url),
            embed_url: Some(embed_url),
            video_id: Some(video_id),
            ..ProviderRecord::default()
        }
    }
}

#[async_trait]
impl Provider for VideoSearch {
    fn platform_tag(&self) -> &'static str {
        "youtube"
    }

    async fn search(&self, query: &str) -> Result<Vec<ProviderRecord>, SearchError> {
        let Some(api_key) = self.api_key.as_deref() else {
            tracing::warn!(provider = "video", "skipping video search: YOUTUBE_API_KEY is not set");
            return Ok(vec![]);
        };

        tracing::info!(provider = "video", query, "querying youtube data api");
        let url = endpoint(
            &self.base_url,
            "youtube/v3/search",
            &[
                ("part", "snippet"),
                ("q", query),
                ("type", "video"),
                ("maxResults", MAX_RESULTS),
                ("key", api_key),
            ],
        )?;

        let response: SearchListResponse = get_json(&self.client, url, "youtube", "youtube.search.list")
            .await
            .inspect_err(|e| tracing::error!(provider = "video", error = %e, "youtube api error"))?;

        let pending = response.items.into_iter().filter_map(|item| {
            let video_id = item.id.video_id.filter(|id| !id.trim().is_empty())?;
            Some(self.to_record(video_id, item.snippet))
        });

        Ok(join_all(pending).await)
    }
}
