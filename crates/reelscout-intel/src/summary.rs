//! Research and channel briefs generated by JSON-mode models.
//!
//! Models are tried in order; the first response that parses wins. When
//! every model fails, or there is nothing to summarise, a fixed fallback
//! brief is returned instead.

use std::fmt::Write as _;
use std::sync::Arc;

use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};

use reelscout_search::UnifiedResult;

use crate::model::{parse_json, JsonModel, JsonRequest};
use crate::profile::ChannelProfile;
use crate::ranking::ScoredCandidate;

/// Results considered when building research context.
pub const RESEARCH_CONTEXT_LIMIT: usize = 10;
/// Ranked results passed into a channel brief.
pub const CHANNEL_BRIEF_TOP: usize = 5;

const RESEARCH_PROMPT: &str = r#"You are a professional incident analyst. Summarise real-time incident data into a factual, neutral briefing.
Output ONLY a valid JSON object matching the schema below. Do not wrap it in markdown code fences and do not add any other text.

{
  "headline": "one line summarising the core incident",
  "what_happened": "2-3 sentences: who, what, where, when, based only on the data",
  "current_status": "1-2 sentences on the latest known update or current impact",
  "key_sources": [ { "name": "Source Name", "url": "URL of the source" } ]
}

Rules:
- Describe only the incident itself; never mention the search process or the provided data.
- Neutral, factual, professional tone. No speculation or opinion.
- If the context is insufficient or unrelated to an incident, output: { "headline": "Insufficient Information", "what_happened": "Limited information available at this time.", "current_status": "Awaiting further updates.", "key_sources": [] }
- Include the 2-3 most credible sources from the context."#;

const CHANNEL_PROMPT: &str = r#"You are a content strategist for a specific Instagram channel.
Using the channel's content DNA and the trending web results provided, write a content intelligence brief.
Output ONLY a valid JSON object matching the schema below. Do not wrap it in markdown code fences and do not add any other text.

{
  "headline": "the single biggest trending story that fits this channel, one punchy sentence",
  "why_this_fits": "two sentences on why this topic matches the channel's DNA and audience",
  "trending_angle": "the specific angle this channel should take, different from generic coverage",
  "reel_brief": {
    "hook": "the exact opening line or visual concept, in this channel's tone",
    "structure": [ { "section": "string", "content": "what to say or show", "duration_seconds": 5 } ],
    "key_facts": ["3-5 specific facts from the web results"],
    "cta": "closing line in this channel's voice",
    "hashtags": ["15 hashtags matching this channel's style"],
    "music_mood": "string"
  },
  "other_trending_topics": [ { "topic": "string", "why_relevant": "string", "quick_angle": "string" } ]
}
Include 3-4 runner-up topics in other_trending_topics."#;

// ---------------------------------------------------------------------------
// Brief schemas
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct KeySource {
    pub name: String,
    pub url: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ResearchBrief {
    pub headline: String,
    pub what_happened: String,
    pub current_status: String,
    #[serde(default)]
    pub key_sources: Vec<KeySource>,
}

impl ResearchBrief {
    #[must_use]
    pub fn fallback(query: &str) -> Self {
        Self {
            headline: format!("Incident Review: {query}"),
            what_happened: format!(
                "Multiple web results, news articles, and videos were retrieved for \"{query}\"."
            ),
            current_status:
                "Please refer to the gathered sources below for specific details and live updates."
                    .into(),
            key_sources: Vec::new(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ReelSection {
    pub section: String,
    pub content: String,
    pub duration_seconds: u32,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ReelBrief {
    pub hook: String,
    #[serde(default)]
    pub structure: Vec<ReelSection>,
    #[serde(default)]
    pub key_facts: Vec<String>,
    pub cta: String,
    #[serde(default)]
    pub hashtags: Vec<String>,
    #[serde(default)]
    pub music_mood: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TrendingTopic {
    pub topic: String,
    #[serde(default)]
    pub why_relevant: String,
    #[serde(default)]
    pub quick_angle: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChannelBrief {
    pub headline: String,
    pub why_this_fits: String,
    pub trending_angle: String,
    pub reel_brief: ReelBrief,
    #[serde(default)]
    pub other_trending_topics: Vec<TrendingTopic>,
}

impl ChannelBrief {
    #[must_use]
    pub fn fallback(channel: &str) -> Self {
        let section = |name: &str, content: &str, secs: u32| ReelSection {
            section: name.into(),
            content: content.into(),
            duration_seconds: secs,
        };
        Self {
            headline: format!("Trending Output for {channel}"),
            why_this_fits: "Analyzed multiple sources to compile this report.".into(),
            trending_angle: "Focus on the key facts presented in current events.".into(),
            reel_brief: ReelBrief {
                hook: "Latest updates incoming.".into(),
                structure: vec![
                    section("Intro", "Brief context.", 5),
                    section("Body", "Main details.", 15),
                    section("Outro", "See facts.", 5),
                ],
                key_facts: vec!["Reference sources for details.".into()],
                cta: "Stay tuned for more updates.".into(),
                hashtags: vec!["#news".into(), "#trending".into()],
                music_mood: "Neutral".into(),
            },
            other_trending_topics: Vec::new(),
        }
    }
}

// ---------------------------------------------------------------------------
// Context builders
// ---------------------------------------------------------------------------

/// Text context for a research brief from the first results that carry a
/// title or description.
#[must_use]
pub fn build_research_context(results: &[UnifiedResult]) -> String {
    let mut ctx = String::new();
    for r in results
        .iter()
        .filter(|r| !r.title.is_empty() || r.description.is_some())
        .take(RESEARCH_CONTEXT_LIMIT)
    {
        let source = r.source.as_deref().unwrap_or(r.platform.as_str());
        let _ = writeln!(ctx, "Source: {source}");
        let _ = writeln!(ctx, "Title: {}", r.title);
        if let Some(ts) = &r.timestamp {
            let _ = writeln!(ctx, "Date: {ts}");
        }
        if let Some(desc) = &r.description {
            let _ = writeln!(ctx, "Snippet: {desc}");
        }
        ctx.push_str("---\n");
    }
    ctx
}

fn build_channel_context(top: &[ScoredCandidate]) -> String {
    top.iter()
        .map(|c| {
            format!(
                "Title: {}\nSnippet: {}\nURL: {}",
                c.result.title,
                c.result.snippet(),
                c.result.source_link
            )
        })
        .collect::<Vec<_>>()
        .join("\n\n")
}

// ---------------------------------------------------------------------------
// Summarizer
// ---------------------------------------------------------------------------

/// Generates briefs with an ordered list of models.
#[derive(Clone, Default)]
pub struct Summarizer {
    models: Vec<Arc<dyn JsonModel>>,
}

impl Summarizer {
    /// `models` are tried in order. An empty list always yields fallbacks.
    #[must_use]
    pub fn new(models: Vec<Arc<dyn JsonModel>>) -> Self {
        Self { models }
    }

    /// A factual brief about `query`. Never fails.
    pub async fn research_brief(&self, query: &str, context: &str) -> ResearchBrief {
        if context.trim().is_empty() {
            return ResearchBrief::fallback(query);
        }

        let prompt = format!("Query: \"{query}\"\n\nIncident Data Context:\n{context}");
        let request = JsonRequest {
            system: RESEARCH_PROMPT,
            prompt: &prompt,
            temperature: 0.1,
        };

        self.first_parsed(request, "research brief")
            .await
            .unwrap_or_else(|| ResearchBrief::fallback(query))
    }

    /// A reel brief for `profile` from its top ranked results. Never fails.
    pub async fn channel_brief(&self, profile: &ChannelProfile, top: &[ScoredCandidate]) -> ChannelBrief {
        if top.is_empty() {
            return ChannelBrief::fallback(&profile.channel);
        }

        let (Ok(profile_json), Ok(style_json)) = (
            serde_json::to_string_pretty(profile),
            serde_json::to_string_pretty(&profile.reel_style_guide),
        ) else {
            return ChannelBrief::fallback(&profile.channel);
        };

        let prompt = format!(
            "Channel DNA Profile:\n{profile_json}\n\nTrending Web Results:\n{}\n\nChannel's Reel Style Guide:\n{style_json}",
            build_channel_context(top)
        );
        let request = JsonRequest {
            system: CHANNEL_PROMPT,
            prompt: &prompt,
            temperature: 0.3,
        };

        self.first_parsed(request, "channel brief")
            .await
            .unwrap_or_else(|| ChannelBrief::fallback(&profile.channel))
    }

    async fn first_parsed<T: DeserializeOwned>(
        &self,
        request: JsonRequest<'_>,
        context: &str,
    ) -> Option<T> {
        for model in &self.models {
            tracing::info!(model = model.name(), brief = context, "generating brief");
            let parsed = model
                .generate_json(request)
                .await
                .and_then(|text| parse_json::<T>(&text, context));
            match parsed {
                Ok(brief) => return Some(brief),
                Err(e) => {
                    tracing::warn!(model = model.name(), brief = context, error = %e, "brief generation failed");
                }
            }
        }
        tracing::warn!(brief = context, "no model produced a brief; using fallback");
        None
    }
}

#[cfg(test)]
#[path = "summary_test.rs"]
mod tests;
