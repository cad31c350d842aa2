//! Provider record → [`UnifiedResult`] mapping.

use crate::types::{MediaType, Platform, ProviderRecord, UnifiedResult};

const DEFAULT_NEWS_SOURCE: &str = "News Source";
const DEFAULT_IMAGE_SOURCE: &str = "Image Source";

/// Normalize one provider record into the unified schema.
///
/// Total over its input: blank strings are treated as absent, an unknown
/// `platform_tag` yields a defaulted result carrying the raw tag, and no
/// combination of fields panics.
#[must_use]
pub fn normalize(record: ProviderRecord, platform_tag: &str) -> UnifiedResult {
    let platform = Platform::from_tag(platform_tag);
    let record = strip_blanks(record);

    match platform {
        Platform::Web => normalize_web(record),
        Platform::Video => normalize_video(record),
        Platform::News => normalize_news(record),
        Platform::Image => normalize_image(record),
        Platform::Other(tag) => {
            tracing::warn!(platform = %tag, "unknown platform tag; emitting defaulted result");
            UnifiedResult::empty(Platform::Other(tag))
        }
    }
}

fn normalize_web(r: ProviderRecord) -> UnifiedResult {
    UnifiedResult {
        platform: Platform::Web,
        media_type: r.media_type.unwrap_or_default(),
        title: r.title.unwrap_or_default(),
        media_url: r.media_url.unwrap_or_default(),
        thumbnail: r.thumbnail,
        source_link: r.link.unwrap_or_default(),
        timestamp: r.date,
        description: r.snippet,
        body: None,
        source: r.source,
    }
}

fn normalize_video(r: ProviderRecord) -> UnifiedResult {
    UnifiedResult {
        platform: Platform::Video,
        media_type: MediaType::Video,
        title: r.title.unwrap_or_default(),
        media_url: r.media_url.or(r.embed_url).unwrap_or_default(),
        thumbnail: r.thumbnail,
        source_link: r.source_link.unwrap_or_default(),
        timestamp: r.published_at,
        description: r.description,
        body: None,
        source: r.source,
    }
}

fn normalize_news(r: ProviderRecord) -> UnifiedResult {
    UnifiedResult {
        platform: Platform::News,
        media_type: MediaType::Article,
        title: r.title.unwrap_or_default(),
        media_url: String::new(),
        thumbnail: r.thumbnail,
        source_link: r.url.unwrap_or_default(),
        timestamp: r.date,
        description: r.snippet,
        body: None,
        source: Some(r.source.unwrap_or_else(|| DEFAULT_NEWS_SOURCE.to_string())),
    }
}

fn normalize_image(r: ProviderRecord) -> UnifiedResult {
    UnifiedResult {
        platform: Platform::Image,
        media_type: MediaType::Image,
        title: r.title.unwrap_or_default(),
        media_url: r.media_url.or_else(|| r.thumbnail.clone()).unwrap_or_default(),
        thumbnail: r.thumbnail,
        source_link: r.link.unwrap_or_default(),
        timestamp: None,
        description: None,
        body: None,
        source: Some(r.source.unwrap_or_else(|| DEFAULT_IMAGE_SOURCE.to_string())),
    }
}

fn strip_blanks(r: ProviderRecord) -> ProviderRecord {
    fn keep(v: Option<String>) -> Option<String> {
        v.filter(|s| !s.trim().is_empty())
    }

    ProviderRecord {
        title: keep(r.title),
        link: keep(r.link),
        url: keep(r.url),
        source_link: keep(r.source_link),
        snippet: keep(r.snippet),
        description: keep(r.description),
        media_type: r.media_type,
        media_url: keep(r.media_url),
        embed_url: keep(r.embed_url),
        thumbnail: keep(r.thumbnail),
        date: keep(r.date),
        published_at: keep(r.published_at),
        source: keep(r.source),
        video_id: keep(r.video_id),
    }
}

#[cfg(test)]
#[path = "normalize_test.rs"]
mod tests;
