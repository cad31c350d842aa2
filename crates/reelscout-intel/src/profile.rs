//! Channel content profile types.

use chrono::{DateTime, TimeDelta, Utc};
use serde::{Deserialize, Serialize};

/// How a channel structures its short-form videos.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ReelStyleGuide {
    pub hook_pattern: String,
    pub structure: String,
    pub cta_style: String,
    pub tone_words: Vec<String>,
}

/// The persisted content profile of one channel.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChannelProfile {
    pub channel: String,
    pub analysed_at: DateTime<Utc>,
    #[serde(default)]
    pub primary_topics: Vec<String>,
    #[serde(default)]
    pub search_keywords: Vec<String>,
    #[serde(default)]
    pub content_tone: String,
    #[serde(default)]
    pub format_style: String,
    #[serde(default)]
    pub target_audience: String,
    #[serde(default)]
    pub avoid_topics: Vec<String>,
    #[serde(default)]
    pub reel_style_guide: ReelStyleGuide,
}

impl ChannelProfile {
    /// Attach an analysis result to a channel at a point in time.
    #[must_use]
    pub fn from_analysis(channel: &str, analysed_at: DateTime<Utc>, a: ProfileAnalysis) -> Self {
        Self {
            channel: channel.to_string(),
            analysed_at,
            primary_topics: a.primary_topics,
            search_keywords: a.search_keywords,
            content_tone: a.content_tone,
            format_style: a.format_style,
            target_audience: a.target_audience,
            avoid_topics: a.avoid_topics,
            reel_style_guide: a.reel_style_guide,
        }
    }

    /// `true` when the profile was analysed less than `ttl_hours` before `now`.
    #[must_use]
    pub fn is_fresh(&self, now: DateTime<Utc>, ttl_hours: u64) -> bool {
        let Some(ttl) = i64::try_from(ttl_hours).ok().and_then(TimeDelta::try_hours) else {
            return true;
        };
        now.signed_duration_since(self.analysed_at) < ttl
    }
}

/// What the content analyzer returns.
///
/// Carries no `channel` or `analysed_at`; the store sets those and any
/// model-supplied values are dropped.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(default)]
pub struct ProfileAnalysis {
    pub primary_topics: Vec<String>,
    pub search_keywords: Vec<String>,
    pub content_tone: String,
    pub format_style: String,
    pub target_audience: String,
    pub avoid_topics: Vec<String>,
    pub reel_style_guide: ReelStyleGuide,
}

/// The degraded profile used when scraping or analysis fails.
#[must_use]
pub fn default_profile(channel: &str, now: DateTime<Utc>) -> ChannelProfile {
    let strings = |v: &[&str]| v.iter().map(|s| (*s).to_string()).collect::<Vec<_>>();
    ChannelProfile {
        channel: channel.to_string(),
        analysed_at: now,
        primary_topics: strings(&["Business", "Startups", "News"]),
        search_keywords: strings(&[
            "business news today",
            "startup funding 2026",
            "brand strategy",
            "technology trends latest",
        ]),
        content_tone: "educational".into(),
        format_style: "Fallback dynamic format based on current events.".into(),
        target_audience: "Professionals and entrepreneurs".into(),
        avoid_topics: Vec::new(),
        reel_style_guide: ReelStyleGuide {
            hook_pattern: "Starts with a bold statement".into(),
            structure: "Standard hook -> context -> value".into(),
            cta_style: "Follow for more".into(),
            tone_words: strings(&["informative", "fast-paced"]),
        },
    }
}
