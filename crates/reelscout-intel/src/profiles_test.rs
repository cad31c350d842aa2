use std::sync::atomic::{AtomicUsize, Ordering};

use async_trait::async_trait;
use chrono::{DateTime, TimeDelta, Utc};

use super::*;
use crate::profile::{ProfileAnalysis, ReelStyleGuide};
use crate::scraper::ContentSample;
use crate::store::MemoryProfileStore;

const TTL: u64 = 24;

#[derive(Default)]
struct CountingScraper {
    calls: AtomicUsize,
    posts: usize,
    fail: bool,
}

#[async_trait]
impl ContentScraper for CountingScraper {
    async fn scrape(&self, _channel: &str) -> Result<Vec<ContentSample>, IntelError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        if self.fail {
            return Err(IntelError::MissingCredential("APIFY_API_TOKEN"));
        }
        Ok((0..self.posts)
            .map(|i| ContentSample {
                caption: format!("post {i}"),
                ..ContentSample::default()
            })
            .collect())
    }
}

#[derive(Default)]
struct CountingAnalyzer {
    calls: AtomicUsize,
    fail: bool,
}

#[async_trait]
impl ContentAnalyzer for CountingAnalyzer {
    async fn analyze(
        &self,
        _channel: &str,
        samples: &[ContentSample],
    ) -> Result<ProfileAnalysis, IntelError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        if self.fail {
            return Err(IntelError::Other("model unavailable".into()));
        }
        Ok(ProfileAnalysis {
            primary_topics: vec!["AI".into()],
            search_keywords: vec![format!("{} samples", samples.len())],
            content_tone: "news".into(),
            reel_style_guide: ReelStyleGuide {
                hook_pattern: "question".into(),
                ..ReelStyleGuide::default()
            },
            ..ProfileAnalysis::default()
        })
    }
}

struct Harness {
    store: Arc<MemoryProfileStore>,
    scraper: Arc<CountingScraper>,
    analyzer: Arc<CountingAnalyzer>,
    profiles: ChannelProfiles,
}

fn harness(scraper: CountingScraper, analyzer: CountingAnalyzer) -> Harness {
    let store = Arc::new(MemoryProfileStore::new());
    let scraper = Arc::new(scraper);
    let analyzer = Arc::new(analyzer);
    let profiles = ChannelProfiles::new(store.clone(), scraper.clone(), analyzer.clone(), TTL);
    Harness {
        store,
        scraper,
        analyzer,
        profiles,
    }
}

fn healthy() -> Harness {
    harness(
        CountingScraper {
            posts: 3,
            ..CountingScraper::default()
        },
        CountingAnalyzer::default(),
    )
}

fn cached_profile(analysed_at: DateTime<Utc>) -> ChannelProfile {
    ChannelProfile {
        channel: "techdaily".into(),
        analysed_at,
        primary_topics: vec!["cached".into()],
        search_keywords: vec!["cached keyword".into()],
        content_tone: "opinion".into(),
        format_style: String::new(),
        target_audience: String::new(),
        avoid_topics: vec![],
        reel_style_guide: ReelStyleGuide::default(),
    }
}

#[tokio::test]
async fn cache_inside_ttl_is_returned_without_refresh() {
    let h = healthy();
    let cached = cached_profile(Utc::now() - TimeDelta::hours(23));
    h.store.save(&cached).await.unwrap();

    let profile = h.profiles.get_profile("techdaily", false).await;

    assert_eq!(profile, cached);
    assert_eq!(h.scraper.calls.load(Ordering::SeqCst), 0);
    assert_eq!(h.analyzer.calls.load(Ordering::SeqCst), 0);
}

#[tokio::test]
async fn cache_past_ttl_is_refreshed_and_replaced() {
    let h = healthy();
    h.store
        .save(&cached_profile(Utc::now() - TimeDelta::hours(25)))
        .await
        .unwrap();

    let profile = h.profiles.get_profile("techdaily", false).await;

    assert_eq!(h.scraper.calls.load(Ordering::SeqCst), 1);
    assert_eq!(h.analyzer.calls.load(Ordering::SeqCst), 1);
    assert_eq!(profile.primary_topics, vec!["AI"]);
    assert_eq!(profile.search_keywords, vec!["3 samples"]);
    assert!(Utc::now() - profile.analysed_at < TimeDelta::minutes(1));

    let stored = h.store.load("techdaily").await.unwrap().unwrap();
    assert_eq!(stored, profile);
}

#[tokio::test]
async fn force_refresh_bypasses_fresh_cache() {
    let h = healthy();
    h.store
        .save(&cached_profile(Utc::now() - TimeDelta::hours(1)))
        .await
        .unwrap();

    let profile = h.profiles.get_profile("techdaily", true).await;

    assert_eq!(h.scraper.calls.load(Ordering::SeqCst), 1);
    assert_eq!(profile.content_tone, "news");
}

#[tokio::test]
async fn refreshed_profile_carries_requested_channel() {
    let h = healthy();
    let profile = h.profiles.get_profile("new_channel", false).await;
    assert_eq!(profile.channel, "new_channel");
    assert_eq!(profile.reel_style_guide.hook_pattern, "question");
}

#[tokio::test]
async fn zero_samples_yield_default_profile_not_persisted() {
    let h = harness(CountingScraper::default(), CountingAnalyzer::default());

    let profile = h.profiles.get_profile("quiet", false).await;

    assert_eq!(profile.channel, "quiet");
    assert_eq!(profile.primary_topics, vec!["Business", "Startups", "News"]);
    assert_eq!(h.analyzer.calls.load(Ordering::SeqCst), 0);
    assert!(h.store.is_empty().await);
}

#[tokio::test]
async fn scrape_failure_yields_default_profile() {
    let h = harness(
        CountingScraper {
            fail: true,
            ..CountingScraper::default()
        },
        CountingAnalyzer::default(),
    );
    let profile = h.profiles.get_profile("c", false).await;
    assert_eq!(profile.content_tone, "educational");
    assert!(h.store.is_empty().await);
}

#[tokio::test]
async fn analysis_failure_keeps_stale_cache_untouched() {
    let h = harness(
        CountingScraper {
            posts: 2,
            ..CountingScraper::default()
        },
        CountingAnalyzer {
            fail: true,
            ..CountingAnalyzer::default()
        },
    );
    let stale = cached_profile(Utc::now() - TimeDelta::hours(48));
    h.store.save(&stale).await.unwrap();

    let profile = h.profiles.get_profile("techdaily", false).await;

    assert_eq!(profile.format_style, "Fallback dynamic format based on current events.");
    assert_eq!(h.store.load("techdaily").await.unwrap(), Some(stale));
}
