//! End-to-end tests of `ReelScout` with fake providers and models.

use std::sync::Arc;

use async_trait::async_trait;
use reelscout_intel::analyzer::ContentAnalyzer;
use reelscout_intel::model::{JsonModel, JsonRequest};
use reelscout_intel::profile::ProfileAnalysis;
use reelscout_intel::scraper::{ContentSample, ContentScraper};
use reelscout_intel::{
    ChannelProfiles, ChannelSearch, IntelError, MemoryProfileStore, ReelScout, ResearchBrief,
    Summarizer,
};
use reelscout_search::http::build_client;
use reelscout_search::{
    Provider, ProviderRecord, SearchError, SearchOrchestrator, SerpApiClient, TrendingNews,
};

struct EchoWeb;

#[async_trait]
impl Provider for EchoWeb {
    fn platform_tag(&self) -> &'static str {
        "google"
    }

    async fn search(&self, query: &str) -> Result<Vec<ProviderRecord>, SearchError> {
        Ok(vec![ProviderRecord {
            title: Some(format!("About {query}")),
            link: Some(format!("https://web.example/{}", query.replace(' ', "-"))),
            snippet: Some(format!("snippet for {query}")),
            ..ProviderRecord::default()
        }])
    }
}

struct NoPosts;

#[async_trait]
impl ContentScraper for NoPosts {
    async fn scrape(&self, _channel: &str) -> Result<Vec<ContentSample>, IntelError> {
        Ok(vec![])
    }
}

struct NeverAnalyze;

#[async_trait]
impl ContentAnalyzer for NeverAnalyze {
    async fn analyze(
        &self,
        _channel: &str,
        _samples: &[ContentSample],
    ) -> Result<ProfileAnalysis, IntelError> {
        Err(IntelError::Other("should not be called".into()))
    }
}

struct Canned(&'static str);

#[async_trait]
impl JsonModel for Canned {
    fn name(&self) -> &'static str {
        "canned"
    }

    async fn generate_json(&self, _request: JsonRequest<'_>) -> Result<String, IntelError> {
        Ok(self.0.to_string())
    }
}

fn scout(models: Vec<Arc<dyn JsonModel>>) -> ReelScout {
    let orchestrator = SearchOrchestrator::with_providers(vec![Arc::new(EchoWeb)]);
    let serp = SerpApiClient::with_base_url(
        build_client(5, "reelscout-test").unwrap(),
        None,
        "http://127.0.0.1:9",
    )
    .unwrap();
    let profiles = ChannelProfiles::new(
        Arc::new(MemoryProfileStore::new()),
        Arc::new(NoPosts),
        Arc::new(NeverAnalyze),
        24,
    );
    ReelScout::new(
        orchestrator.clone(),
        TrendingNews::new(serp),
        profiles,
        ChannelSearch::new(orchestrator, None),
        Summarizer::new(models),
    )
}

#[tokio::test]
async fn research_returns_results_and_brief() {
    let brief = r#"{"headline":"H","what_happened":"W","current_status":"S","key_sources":[]}"#;
    let report = scout(vec![Arc::new(Canned(brief))])
        .research("  solar flare  ")
        .await
        .unwrap();

    assert_eq!(report.results.len(), 1);
    assert_eq!(report.results[0].source_link, "https://web.example/solar-flare");
    assert_eq!(report.summary.headline, "H");
}

#[tokio::test]
async fn research_without_models_uses_fallback_brief() {
    let report = scout(vec![]).research("solar flare").await.unwrap();
    assert_eq!(report.summary, ResearchBrief::fallback("solar flare"));
}

#[tokio::test]
async fn blank_inputs_are_rejected() {
    let scout = scout(vec![]);
    assert!(matches!(scout.research("   ").await, Err(IntelError::InvalidInput(_))));
    assert!(matches!(scout.profile("", false).await, Err(IntelError::InvalidInput(_))));
    assert!(matches!(
        scout.channel_report(" ", false).await,
        Err(IntelError::InvalidInput(_))
    ));
}

#[tokio::test]
async fn trending_without_key_is_empty() {
    assert!(scout(vec![]).trending("week").await.unwrap().is_empty());
}

#[tokio::test]
async fn channel_report_degrades_end_to_end() {
    let report = scout(vec![]).channel_report("newchannel", false).await.unwrap();

    assert_eq!(report.profile.channel, "newchannel");
    assert_eq!(report.profile.content_tone, "educational");
    assert_eq!(report.results.len(), 3, "one unranked result per planned query");
    assert!(report.results.iter().all(|c| c.relevance_score.is_none()));
    assert_eq!(report.summary.headline, "Trending Output for newchannel");

    let json = serde_json::to_value(&report).unwrap();
    assert!(json["results"][0]["source_link"].is_string());
    assert!(json["profile"]["reel_style_guide"].is_object());
}
