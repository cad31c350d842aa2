use std::fmt;

use serde::{Deserialize, Serialize};

/// Source tag carried on every [`UnifiedResult`].
///
/// Unrecognised provider tags survive normalization verbatim as
/// [`Platform::Other`] so callers can see where a record came from.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum Platform {
    Web,
    Video,
    News,
    Image,
    Other(String),
}

impl Platform {
    /// Map a provider tag onto a platform.
    ///
    /// Accepts both the provider names (`google`, `youtube`, `news`,
    /// `google_images`) and the canonical names (`web`, `video`, `image`).
    #[must_use]
    pub fn from_tag(tag: &str) -> Self {
        match tag {
            "google" | "web" => Self::Web,
            "youtube" | "video" => Self::Video,
            "news" => Self::News,
            "google_images" | "image" => Self::Image,
            other => Self::Other(other.to_string()),
        }
    }

    #[must_use]
    pub fn as_str(&self) -> &str {
        match self {
            Self::Web => "web",
            Self::Video => "video",
            Self::News => "news",
            Self::Image => "image",
            Self::Other(tag) => tag,
        }
    }
}

impl fmt::Display for Platform {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl From<String> for Platform {
    fn from(tag: String) -> Self {
        Self::from_tag(&tag)
    }
}

impl From<Platform> for String {
    fn from(platform: Platform) -> Self {
        platform.as_str().to_string()
    }
}

/// How downstream consumers should render or act on a result.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MediaType {
    #[default]
    Article,
    Video,
    Image,
}

/// The single schema every provider record is normalized into.
///
/// Every field is always serialized; absent data is `null` or `""`, never a
/// missing key.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UnifiedResult {
    pub platform: Platform,
    pub media_type: MediaType,
    pub title: String,
    /// Directly playable or viewable resource, or empty when none exists.
    pub media_url: String,
    pub thumbnail: Option<String>,
    /// Canonical link back to the original content; the dedup key.
    pub source_link: String,
    /// Provider-supplied date/time string. `None` sorts last.
    pub timestamp: Option<String>,
    pub description: Option<String>,
    pub body: Option<String>,
    /// Publisher or site name, when the provider reports one.
    pub source: Option<String>,
}

impl UnifiedResult {
    /// A result with every field defaulted.
    #[must_use]
    pub fn empty(platform: Platform) -> Self {
        Self {
            platform,
            media_type: MediaType::Article,
            title: String::new(),
            media_url: String::new(),
            thumbnail: None,
            source_link: String::new(),
            timestamp: None,
            description: None,
            body: None,
            source: None,
        }
    }

    /// Best available snippet: `description`, then `body`, else empty.
    #[must_use]
    pub fn snippet(&self) -> &str {
        self.description
            .as_deref()
            .or(self.body.as_deref())
            .unwrap_or("")
    }
}

/// A provider-shaped record before normalization.
///
/// Each provider fills the subset of fields its API exposes; the normalizer
/// knows which fields matter for which platform.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ProviderRecord {
    pub title: Option<String>,
    /// Canonical link for web and image results.
    pub link: Option<String>,
    /// Canonical link for news results.
    pub url: Option<String>,
    /// Watch page for video results.
    pub source_link: Option<String>,
    pub snippet: Option<String>,
    pub description: Option<String>,
    pub media_type: Option<MediaType>,
    pub media_url: Option<String>,
    pub embed_url: Option<String>,
    pub thumbnail: Option<String>,
    pub date: Option<String>,
    pub published_at: Option<String>,
    pub source: Option<String>,
    pub video_id: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn platform_from_provider_tags() {
        assert_eq!(Platform::from_tag("google"), Platform::Web);
        assert_eq!(Platform::from_tag("youtube"), Platform::Video);
        assert_eq!(Platform::from_tag("news"), Platform::News);
        assert_eq!(Platform::from_tag("google_images"), Platform::Image);
    }

    #[test]
    fn platform_unknown_tag_kept_verbatim() {
        let platform = Platform::from_tag("tiktok");
        assert_eq!(platform, Platform::Other("tiktok".into()));
        assert_eq!(platform.as_str(), "tiktok");
    }

    #[test]
    fn platform_serializes_as_plain_string() {
        let json = serde_json::to_string(&Platform::Image).unwrap();
        assert_eq!(json, "\"image\"");
        let back: Platform = serde_json::from_str("\"video\"").unwrap();
        assert_eq!(back, Platform::Video);
    }

    #[test]
    fn media_type_serializes_lowercase() {
        assert_eq!(
            serde_json::to_string(&MediaType::Article).unwrap(),
            "\"article\""
        );
    }

    #[test]
    fn empty_result_serializes_every_key() {
        let value = serde_json::to_value(UnifiedResult::empty(Platform::Web)).unwrap();
        let obj = value.as_object().unwrap();
        for key in [
            "platform",
            "media_type",
            "title",
            "media_url",
            "thumbnail",
            "source_link",
            "timestamp",
            "description",
            "body",
            "source",
        ] {
            assert!(obj.contains_key(key), "missing key {key}");
        }
        assert!(obj["thumbnail"].is_null());
        assert_eq!(obj["title"], "");
    }

    #[test]
    fn snippet_prefers_description_then_body() {
        let mut r = UnifiedResult::empty(Platform::News);
        assert_eq!(r.snippet(), "");
        r.body = Some("body text".into());
        assert_eq!(r.snippet(), "body text");
        r.description = Some("desc".into());
        assert_eq!(r.snippet(), "desc");
    }
}
