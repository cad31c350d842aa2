//! Channel-targeted search: plan, fan out, dedup, score, filter, sort, cap.

use std::collections::{HashMap, HashSet};
use std::sync::Arc;

use async_trait::async_trait;
use futures::future::join_all;
use reelscout_search::{SearchOrchestrator, UnifiedResult};
use serde::{Deserialize, Serialize};

use crate::error::IntelError;
use crate::model::{parse_json, JsonModel, JsonRequest};
use crate::planner::build_queries;
use crate::profile::ChannelProfile;

pub const MAX_RESULTS: usize = 20;
pub const MIN_RELEVANCE: u8 = 5;

const RELEVANCE_PROMPT: &str = r#"You are a content strategy ranker. You are given an Instagram channel's content DNA profile and a list of trending web search results.
Evaluate how relevant each result is to this channel's DNA and format style.

Return ONLY a valid JSON array. Do not wrap it in markdown code fences and do not add any other text.
Each element must have exactly this structure:
[
  {
    "url": "the url of the result being scored, copied exactly",
    "relevance_score": integer between 1 and 10,
    "relevance_reason": "one sentence on why this fits or does not fit the channel's DNA",
    "suggested_angle": "how this channel would uniquely cover the story, based on its reel_style_guide"
  }
]"#;

/// A result annotated with its fit to a channel.
///
/// The relevance fields are `None` on the unranked fallback path.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScoredCandidate {
    #[serde(flatten)]
    pub result: UnifiedResult,
    pub relevance_score: Option<u8>,
    pub relevance_reason: Option<String>,
    pub suggested_angle: Option<String>,
}

impl ScoredCandidate {
    #[must_use]
    pub fn unranked(result: UnifiedResult) -> Self {
        Self {
            result,
            relevance_score: None,
            relevance_reason: None,
            suggested_angle: None,
        }
    }
}

/// The compact view of a candidate sent to the scorer.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CandidateSummary {
    pub url: String,
    pub title: String,
    pub snippet: String,
    pub platform: String,
}

impl From<&UnifiedResult> for CandidateSummary {
    fn from(r: &UnifiedResult) -> Self {
        Self {
            url: r.source_link.clone(),
            title: r.title.clone(),
            snippet: r.snippet().to_string(),
            platform: r.platform.to_string(),
        }
    }
}

/// One scorer verdict.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct RelevanceScore {
    pub url: String,
    pub relevance_score: u8,
    #[serde(default)]
    pub relevance_reason: String,
    #[serde(default)]
    pub suggested_angle: String,
}

/// Scores candidates against a channel profile.
///
/// Scores need not cover every candidate.
#[async_trait]
pub trait RelevanceScorer: Send + Sync {
    /// # Errors
    ///
    /// Returns [`IntelError`] when the call fails or the response violates
    /// the score schema. The pipeline then falls back to unranked results.
    async fn score(
        &self,
        profile: &ChannelProfile,
        candidates: &[CandidateSummary],
    ) -> Result<Vec<RelevanceScore>, IntelError>;
}

/// [`RelevanceScorer`] backed by a JSON-mode model.
pub struct ModelScorer {
    model: Arc<dyn JsonModel>,
}

impl ModelScorer {
    #[must_use]
    pub fn new(model: Arc<dyn JsonModel>) -> Self {
        Self { model }
    }
}

/// Parse and validate a scorer response.
///
/// # Errors
///
/// Returns [`IntelError::Deserialize`] for malformed JSON and
/// [`IntelError::Schema`] when any score is outside 1–10.
pub fn parse_scores(text: &str) -> Result<Vec<RelevanceScore>, IntelError> {
    let scores: Vec<RelevanceScore> = parse_json(text, "relevance scores")?;
    if let Some(bad) = scores.iter().find(|s| !(1..=10).contains(&s.relevance_score)) {
        return Err(IntelError::Schema {
            context: "relevance scores".into(),
            reason: format!("score {} for {} is outside 1-10", bad.relevance_score, bad.url),
        });
    }
    Ok(scores)
}

#[async_trait]
impl RelevanceScorer for ModelScorer {
    async fn score(
        &self,
        profile: &ChannelProfile,
        candidates: &[CandidateSummary],
    ) -> Result<Vec<RelevanceScore>, IntelError> {
        let prompt = format!(
            "Channel DNA Profile:\n{}\n\nWeb Results to Score:\n{}",
            serde_json::to_string_pretty(profile)?,
            serde_json::to_string_pretty(candidates)?,
        );

        let text = self
            .model
            .generate_json(JsonRequest {
                system: RELEVANCE_PROMPT,
                prompt: &prompt,
                temperature: 0.2,
            })
            .await?;

        parse_scores(&text)
    }
}

/// Merge result groups in order, keeping the first item seen per
/// `source_link`. Items with an empty link are dropped.
#[must_use]
pub fn dedup_by_source_link(groups: Vec<Vec<UnifiedResult>>) -> Vec<UnifiedResult> {
    let mut seen: HashSet<String> = HashSet::new();
    let mut merged: Vec<UnifiedResult> = groups
        .into_iter()
        .flatten()
        .filter(|r| !r.source_link.is_empty())
        .collect();
    merged.retain(|r| seen.insert(r.source_link.clone()));
    merged
}

/// Join scores onto candidates, keep those at or above [`MIN_RELEVANCE`],
/// sort by descending score (stable), and cap at [`MAX_RESULTS`].
///
/// Scores whose url matches no candidate are ignored; when a url is scored
/// more than once the first verdict wins.
#[must_use]
pub fn apply_scores(candidates: &[UnifiedResult], scores: Vec<RelevanceScore>) -> Vec<ScoredCandidate> {
    let by_link: HashMap<&str, &UnifiedResult> = candidates
        .iter()
        .map(|r| (r.source_link.as_str(), r))
        .collect();
    let mut used: HashSet<String> = HashSet::new();

    let mut ranked: Vec<ScoredCandidate> = scores
        .into_iter()
        .filter_map(|s| {
            let result = by_link.get(s.url.as_str())?;
            if !used.insert(s.url.clone()) || s.relevance_score < MIN_RELEVANCE {
                return None;
            }
            Some(ScoredCandidate {
                result: (*result).clone(),
                relevance_score: Some(s.relevance_score),
                relevance_reason: Some(s.relevance_reason),
                suggested_angle: Some(s.suggested_angle),
            })
        })
        .collect();

    ranked.sort_by(|a, b| b.relevance_score.cmp(&a.relevance_score));
    ranked.truncate(MAX_RESULTS);
    ranked
}

fn unranked(candidates: Vec<UnifiedResult>) -> Vec<ScoredCandidate> {
    candidates
        .into_iter()
        .take(MAX_RESULTS)
        .map(ScoredCandidate::unranked)
        .collect()
}

/// Runs profile-targeted searches and ranks the merged results.
pub struct ChannelSearch {
    orchestrator: SearchOrchestrator,
    scorer: Option<Arc<dyn RelevanceScorer>>,
}

impl ChannelSearch {
    /// `scorer = None` always returns unranked results.
    #[must_use]
    pub fn new(orchestrator: SearchOrchestrator, scorer: Option<Arc<dyn RelevanceScorer>>) -> Self {
        Self { orchestrator, scorer }
    }

    /// Search for content fitting `profile`, best first, at most
    /// [`MAX_RESULTS`] items. Never fails.
    pub async fn search_for_channel(&self, profile: &ChannelProfile) -> Vec<ScoredCandidate> {
        let queries = build_queries(profile);
        tracing::info!(channel = %profile.channel, ?queries, "channel search queries");
        self.search_queries(profile, &queries).await
    }

    /// [`ChannelSearch::search_for_channel`] over an explicit query list.
    pub async fn search_queries(
        &self,
        profile: &ChannelProfile,
        queries: &[String],
    ) -> Vec<ScoredCandidate> {
        let groups = join_all(queries.iter().map(|q| self.orchestrator.run_all(q))).await;
        let candidates = dedup_by_source_link(groups);
        tracing::info!(channel = %profile.channel, count = candidates.len(), "unique channel candidates");

        if candidates.is_empty() {
            return Vec::new();
        }

        let Some(scorer) = &self.scorer else {
            tracing::warn!(channel = %profile.channel, "no relevance scorer configured; returning unranked results");
            return unranked(candidates);
        };

        let summaries: Vec<CandidateSummary> = candidates.iter().map(CandidateSummary::from).collect();
        match scorer.score(profile, &summaries).await {
            Ok(scores) => {
                let ranked = apply_scores(&candidates, scores);
                tracing::info!(channel = %profile.channel, count = ranked.len(), "ranked channel results");
                ranked
            }
            Err(e) => {
                tracing::warn!(channel = %profile.channel, error = %e, "relevance scoring failed; returning unranked results");
                unranked(candidates)
            }
        }
    }
}

#[cfg(test)]
#[path = "ranking_test.rs"]
mod tests;
