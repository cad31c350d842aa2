//! Content-DNA analysis of scraped posts.

use std::sync::Arc;

use async_trait::async_trait;

use crate::error::IntelError;
use crate::model::{parse_json, JsonModel, JsonRequest};
use crate::profile::ProfileAnalysis;
use crate::scraper::ContentSample;

const ANALYSIS_PROMPT: &str = r#"You are a content strategy analyst. Analyse these Instagram posts from a single creator and extract their content DNA.
Return ONLY a valid JSON object with this exact structure. Do not wrap it in markdown code fences and do not add any other text.

{
  "primary_topics": ["5-8 core topics this channel covers"],
  "search_keywords": ["15-20 specific search keywords and phrases that represent what this channel covers; they will be used to search Google and YouTube for trending content"],
  "content_tone": "one of: educational | entertainment | news | opinion | investigative | inspirational",
  "format_style": "2 sentences on how this channel presents information: fast cuts or slow, text-heavy or visual, serious or casual",
  "target_audience": "the audience in 1 sentence",
  "avoid_topics": ["topics that would NOT fit this channel based on what is absent from their content"],
  "reel_style_guide": {
    "hook_pattern": "how this channel typically opens a reel, based on the captions",
    "structure": "the typical content flow",
    "cta_style": "how they typically end posts",
    "tone_words": ["5-6 adjectives describing the voice"]
  }
}"#;

/// Turns a channel's recent posts into a content profile.
#[async_trait]
pub trait ContentAnalyzer: Send + Sync {
    /// # Errors
    ///
    /// Returns [`IntelError`] when the model call fails or its output does
    /// not parse as a [`ProfileAnalysis`].
    async fn analyze(
        &self,
        channel: &str,
        samples: &[ContentSample],
    ) -> Result<ProfileAnalysis, IntelError>;
}

/// [`ContentAnalyzer`] backed by a JSON-mode model.
pub struct ModelAnalyzer {
    model: Arc<dyn JsonModel>,
}

impl ModelAnalyzer {
    #[must_use]
    pub fn new(model: Arc<dyn JsonModel>) -> Self {
        Self { model }
    }
}

#[async_trait]
impl ContentAnalyzer for ModelAnalyzer {
    async fn analyze(
        &self,
        channel: &str,
        samples: &[ContentSample],
    ) -> Result<ProfileAnalysis, IntelError> {
        let posts = serde_json::to_string_pretty(samples)?;
        let prompt = format!("Channel: {channel}\n\nRecent Posts Data:\n{posts}");

        tracing::info!(channel, count = samples.len(), model = self.model.name(), "analysing channel posts");
        let text = self
            .model
            .generate_json(JsonRequest {
                system: ANALYSIS_PROMPT,
                prompt: &prompt,
                temperature: 0.2,
            })
            .await?;

        parse_json(&text, "profile analysis")
    }
}
