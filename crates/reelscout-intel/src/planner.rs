//! Derives targeted search queries from a channel profile.

use chrono::{Datelike, Utc};
use rand::seq::SliceRandom;
use rand::Rng;

use crate::profile::ChannelProfile;

/// Build 1–3 search queries for `profile`.
///
/// Keyword selection is random, so repeated calls may differ.
#[must_use]
pub fn build_queries(profile: &ChannelProfile) -> Vec<String> {
    build_queries_with(profile, &mut rand::rng(), Utc::now().year())
}

/// [`build_queries`] with an explicit RNG and year.
///
/// Picks three keywords, distinct whenever the profile has at least three
/// non-blank ones and cycling through them otherwise. With no usable
/// keywords a single query is built from the first topic, or `news`.
#[must_use]
pub fn build_queries_with<R: Rng + ?Sized>(
    profile: &ChannelProfile,
    rng: &mut R,
    year: i32,
) -> Vec<String> {
    let mut keywords: Vec<&str> = profile
        .search_keywords
        .iter()
        .map(|k| k.trim())
        .filter(|k| !k.is_empty())
        .collect();

    if keywords.is_empty() {
        let topic = profile
            .primary_topics
            .iter()
            .map(|t| t.trim())
            .find(|t| !t.is_empty())
            .unwrap_or("news");
        return vec![format!("{topic} trending today")];
    }

    keywords.shuffle(rng);
    let pick = |i: usize| keywords[i % keywords.len()];

    vec![
        format!("{} latest news today", pick(0)),
        format!("{} trending viral this week", pick(1)),
        format!("{} recent update {year}", pick(2)),
    ]
}
