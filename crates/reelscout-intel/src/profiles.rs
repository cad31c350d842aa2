//! TTL-cached channel profiles.

use std::sync::Arc;

use chrono::Utc;

use crate::analyzer::ContentAnalyzer;
use crate::error::IntelError;
use crate::profile::{default_profile, ChannelProfile};
use crate::scraper::ContentScraper;
use crate::store::ProfileStore;

/// Builds, caches, and refreshes channel profiles.
///
/// Refreshes are not serialised: two concurrent refreshes of one channel
/// both run and the last save wins.
pub struct ChannelProfiles {
    store: Arc<dyn ProfileStore>,
    scraper: Arc<dyn ContentScraper>,
    analyzer: Arc<dyn ContentAnalyzer>,
    ttl_hours: u64,
}

impl ChannelProfiles {
    #[must_use]
    pub fn new(
        store: Arc<dyn ProfileStore>,
        scraper: Arc<dyn ContentScraper>,
        analyzer: Arc<dyn ContentAnalyzer>,
        ttl_hours: u64,
    ) -> Self {
        Self {
            store,
            scraper,
            analyzer,
            ttl_hours,
        }
    }

    /// Return the profile for `channel`, refreshing it when stale or forced.
    ///
    /// Never fails: if scraping or analysis fails the degraded default
    /// profile is returned, and it is not persisted.
    pub async fn get_profile(&self, channel: &str, force_refresh: bool) -> ChannelProfile {
        if force_refresh {
            tracing::info!(channel, "forced profile refresh");
        } else if let Some(cached) = self.cached(channel).await {
            return cached;
        }

        match self.refresh(channel).await {
            Ok(profile) => profile,
            Err(e) => {
                tracing::warn!(channel, error = %e, "profile refresh failed; using default profile");
                default_profile(channel, Utc::now())
            }
        }
    }

    async fn cached(&self, channel: &str) -> Option<ChannelProfile> {
        let profile = match self.store.load(channel).await {
            Ok(Some(p)) => p,
            Ok(None) => {
                tracing::info!(channel, "no cached profile");
                return None;
            }
            Err(e) => {
                tracing::warn!(channel, error = %e, "unreadable cached profile; treating as miss");
                return None;
            }
        };

        if profile.is_fresh(Utc::now(), self.ttl_hours) {
            tracing::info!(channel, analysed_at = %profile.analysed_at, "using cached profile");
            Some(profile)
        } else {
            tracing::info!(channel, ttl_hours = self.ttl_hours, "cached profile is stale");
            None
        }
    }

    async fn refresh(&self, channel: &str) -> Result<ChannelProfile, IntelError> {
        let samples = self.scraper.scrape(channel).await?;
        if samples.is_empty() {
            return Err(IntelError::Other(format!("scraper returned 0 posts for {channel}")));
        }

        let analysis = self.analyzer.analyze(channel, &samples).await?;
        let profile = ChannelProfile::from_analysis(channel, Utc::now(), analysis);

        match self.store.save(&profile).await {
            Ok(()) => tracing::info!(channel, "profile refreshed and cached"),
            Err(e) => tracing::warn!(channel, error = %e, "could not persist refreshed profile"),
        }
        Ok(profile)
    }
}

#[cfg(test)]
#[path = "profiles_test.rs"]
mod tests;
