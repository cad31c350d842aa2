//! The user-facing operations: research, trending, profile, channel report.

use std::sync::Arc;

use reelscout_core::AppConfig;
use reelscout_search::http::build_client;
use reelscout_search::{SearchOrchestrator, SerpApiClient, TrendingItem, TrendingNews, UnifiedResult};
use serde::Serialize;

use crate::analyzer::ModelAnalyzer;
use crate::error::IntelError;
use crate::model::{GeminiClient, JsonModel, OpenAiClient, GEMINI_FLASH, GEMINI_PRO};
use crate::profile::ChannelProfile;
use crate::profiles::ChannelProfiles;
use crate::ranking::{ChannelSearch, ModelScorer, RelevanceScorer, ScoredCandidate};
use crate::scraper::ApifyScraper;
use crate::store::FileProfileStore;
use crate::summary::{build_research_context, ChannelBrief, ResearchBrief, Summarizer, CHANNEL_BRIEF_TOP};

#[derive(Debug, Clone, Serialize)]
pub struct ResearchReport {
    pub results: Vec<UnifiedResult>,
    pub summary: ResearchBrief,
}

#[derive(Debug, Clone, Serialize)]
pub struct ChannelReport {
    pub profile: ChannelProfile,
    pub results: Vec<ScoredCandidate>,
    pub summary: ChannelBrief,
}

/// Every component wired together.
pub struct ReelScout {
    orchestrator: SearchOrchestrator,
    trending: TrendingNews,
    profiles: ChannelProfiles,
    channel_search: ChannelSearch,
    summarizer: Summarizer,
}

fn require_non_blank<'a>(value: &'a str, what: &str) -> Result<&'a str, IntelError> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return Err(IntelError::InvalidInput(format!("{what} is required")));
    }
    Ok(trimmed)
}

impl ReelScout {
    #[must_use]
    pub fn new(
        orchestrator: SearchOrchestrator,
        trending: TrendingNews,
        profiles: ChannelProfiles,
        channel_search: ChannelSearch,
        summarizer: Summarizer,
    ) -> Self {
        Self {
            orchestrator,
            trending,
            profiles,
            channel_search,
            summarizer,
        }
    }

    /// Build the production wiring from configuration.
    ///
    /// Missing credentials do not fail construction; the affected
    /// capabilities degrade at call time.
    ///
    /// # Errors
    ///
    /// Returns [`IntelError`] if the HTTP client cannot be constructed.
    pub fn from_config(config: &AppConfig) -> Result<Self, IntelError> {
        let client = build_client(config.http_timeout_secs, &config.user_agent)?;
        let orchestrator = SearchOrchestrator::from_config(config)?;
        let trending = TrendingNews::new(SerpApiClient::new(
            client.clone(),
            config.serpapi_key.clone(),
        )?);

        let flash = Arc::new(GeminiClient::new(
            client.clone(),
            config.gemini_api_key.clone(),
            GEMINI_FLASH,
        )?);
        let pro = Arc::new(GeminiClient::new(
            client.clone(),
            config.gemini_api_key.clone(),
            GEMINI_PRO,
        )?);
        let openai = Arc::new(OpenAiClient::new(client.clone(), config.openai_api_key.clone())?);

        let profiles = ChannelProfiles::new(
            Arc::new(FileProfileStore::new(config.profile_dir.clone())),
            Arc::new(ApifyScraper::new(
                client,
                config.apify_api_token.clone(),
                &config.apify_actor_id,
            )?),
            Arc::new(ModelAnalyzer::new(flash)),
            config.profile_ttl_hours,
        );

        let scorer: Option<Arc<dyn RelevanceScorer>> = if pro.is_configured() {
            Some(Arc::new(ModelScorer::new(pro.clone())))
        } else {
            None
        };
        let channel_search = ChannelSearch::new(orchestrator.clone(), scorer);

        let mut models: Vec<Arc<dyn JsonModel>> = Vec::new();
        if pro.is_configured() {
            models.push(pro);
        }
        if openai.is_configured() {
            models.push(openai);
        }

        Ok(Self::new(
            orchestrator,
            trending,
            profiles,
            channel_search,
            Summarizer::new(models),
        ))
    }

    /// Search every provider for `query` and summarise what came back.
    ///
    /// # Errors
    ///
    /// Returns [`IntelError::InvalidInput`] for a blank query.
    pub async fn research(&self, query: &str) -> Result<ResearchReport, IntelError> {
        let query = require_non_blank(query, "query")?;
        tracing::info!(query, "research request");

        let results = self.orchestrator.run_all(query).await;
        let context = build_research_context(&results);
        let summary = self.summarizer.research_brief(query, &context).await;

        tracing::info!(query, count = results.len(), "research complete");
        Ok(ResearchReport { results, summary })
    }

    /// Top trending headlines for `period`.
    ///
    /// # Errors
    ///
    /// Returns [`IntelError::Search`] when the news provider fails.
    pub async fn trending(&self, period: &str) -> Result<Vec<TrendingItem>, IntelError> {
        Ok(self.trending.fetch(period).await?)
    }

    /// The cached or refreshed content profile of `channel`.
    ///
    /// # Errors
    ///
    /// Returns [`IntelError::InvalidInput`] for a blank channel id.
    pub async fn profile(&self, channel: &str, force_refresh: bool) -> Result<ChannelProfile, IntelError> {
        let channel = require_non_blank(channel, "channel")?;
        Ok(self.profiles.get_profile(channel, force_refresh).await)
    }

    /// Profile, ranked channel search, and a reel brief from the top results.
    ///
    /// # Errors
    ///
    /// Returns [`IntelError::InvalidInput`] for a blank channel id.
    pub async fn channel_report(
        &self,
        channel: &str,
        force_refresh: bool,
    ) -> Result<ChannelReport, IntelError> {
        let channel = require_non_blank(channel, "channel")?;
        let profile = self.profiles.get_profile(channel, force_refresh).await;
        let results = self.channel_search.search_for_channel(&profile).await;

        let top = &results[..results.len().min(CHANNEL_BRIEF_TOP)];
        let summary = self.summarizer.channel_brief(&profile, top).await;

        Ok(ChannelReport {
            profile,
            results,
            summary,
        })
    }
}
