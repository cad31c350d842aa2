//! Parallel fan-out across every configured provider.

use std::sync::Arc;
use std::time::Duration;

use futures::future::join_all;
use reelscout_core::AppConfig;

use crate::error::SearchError;
use crate::http::build_client;
use crate::normalize::normalize;
use crate::providers::{
    ImageSearch, MediaResolver, NewsSearch, Provider, SerpApiClient, VideoSearch, WebSearch,
    YtDlpResolver,
};
use crate::types::UnifiedResult;

/// Fans one query out to all providers and merges their normalized results.
#[derive(Clone)]
pub struct SearchOrchestrator {
    providers: Vec<Arc<dyn Provider>>,
}

impl SearchOrchestrator {
    /// The standard provider set, concatenated in the order web, video,
    /// news, image.
    #[must_use]
    pub fn new(
        web: Arc<dyn Provider>,
        video: Arc<dyn Provider>,
        news: Arc<dyn Provider>,
        image: Arc<dyn Provider>,
    ) -> Self {
        Self::with_providers(vec![web, video, news, image])
    }

    /// An arbitrary provider list; results keep the list's order.
    #[must_use]
    pub fn with_providers(providers: Vec<Arc<dyn Provider>>) -> Self {
        Self { providers }
    }

    /// Build the production provider set from configuration.
    ///
    /// # Errors
    ///
    /// Returns [`SearchError::Http`] if the HTTP client cannot be built.
    pub fn from_config(config: &AppConfig) -> Result<Self, SearchError> {
        let client = build_client(config.http_timeout_secs, &config.user_agent)?;
        let serp = SerpApiClient::new(client.clone(), config.serpapi_key.clone())?;

        let resolver: Arc<dyn MediaResolver> = if config.media_extraction_enabled {
            Arc::new(YtDlpResolver::new(
                config.yt_dlp_path.clone(),
                Duration::from_secs(config.media_timeout_secs),
            ))
        } else {
            Arc::new(YtDlpResolver::disabled())
        };

        Ok(Self::new(
            Arc::new(WebSearch::new(serp.clone())),
            Arc::new(VideoSearch::new(
                client,
                config.youtube_api_key.clone(),
                resolver,
            )?),
            Arc::new(NewsSearch::new(serp.clone())),
            Arc::new(ImageSearch::new(serp)),
        ))
    }

    /// Query every provider concurrently and return the normalized results.
    ///
    /// A failing provider contributes nothing; the others are unaffected.
    /// Never errors: if every provider fails the result is empty.
    pub async fn run_all(&self, query: &str) -> Vec<UnifiedResult> {
        tracing::info!(query, providers = self.providers.len(), "starting parallel search");

        let branches = self.providers.iter().map(|provider| async move {
            let tag = provider.platform_tag();
            let records = provider.search(query).await.unwrap_or_else(|e| {
                tracing::warn!(provider = tag, query, error = %e, "provider failed; continuing without it");
                Vec::new()
            });
            (tag, records)
        });

        let results: Vec<UnifiedResult> = join_all(branches)
            .await
            .into_iter()
            .flat_map(|(tag, records)| records.into_iter().map(move |r| normalize(r, tag)))
            .collect();

        tracing::info!(query, count = results.len(), "parallel search complete");
        results
    }
}
