//! Recent-post scraping through an Apify actor.

use async_trait::async_trait;
use reelscout_search::http::{parse_base_url, send_json};
use reqwest::{Client, Url};
use serde::{Deserialize, Serialize};

use crate::error::IntelError;

const DEFAULT_BASE_URL: &str = "https://api.apify.com/";
const RESULTS_LIMIT: u32 = 20;

/// One recent post of a channel, reduced to what profile analysis needs.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ContentSample {
    pub caption: String,
    pub hashtags: Vec<String>,
    #[serde(rename = "type")]
    pub kind: String,
    pub likes: u64,
    pub comments: u64,
    pub views: u64,
    pub posted_at: String,
}

/// Fetches a channel's most recent posts.
#[async_trait]
pub trait ContentScraper: Send + Sync {
    /// # Errors
    ///
    /// Returns [`IntelError`] on a missing credential or upstream failure.
    async fn scrape(&self, channel: &str) -> Result<Vec<ContentSample>, IntelError>;
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct ActorInput<'a> {
    usernames: [&'a str; 1],
    results_limit: u32,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct ActorPost {
    caption: Option<String>,
    #[serde(default)]
    hashtags: Vec<String>,
    #[serde(rename = "type")]
    kind: Option<String>,
    likes_count: Option<i64>,
    comments_count: Option<i64>,
    video_view_count: Option<i64>,
    timestamp: Option<String>,
}

fn count(v: Option<i64>) -> u64 {
    v.and_then(|n| u64::try_from(n).ok()).unwrap_or(0)
}

impl From<ActorPost> for ContentSample {
    fn from(p: ActorPost) -> Self {
        Self {
            caption: p.caption.unwrap_or_default(),
            hashtags: p.hashtags,
            kind: p.kind.unwrap_or_else(|| "unknown".to_string()),
            likes: count(p.likes_count),
            comments: count(p.comments_count),
            views: count(p.video_view_count),
            posted_at: p.timestamp.unwrap_or_default(),
        }
    }
}

/// Runs an Apify actor synchronously and reads its dataset items.
pub struct ApifyScraper {
    client: Client,
    token: Option<String>,
    actor_id: String,
    base_url: Url,
}

impl ApifyScraper {
    /// # Errors
    ///
    /// Never fails for the built-in base URL.
    pub fn new(client: Client, token: Option<String>, actor_id: &str) -> Result<Self, IntelError> {
        Self::with_base_url(client, token, actor_id, DEFAULT_BASE_URL)
    }

    /// # Errors
    ///
    /// Returns [`IntelError::Search`] if `base_url` does not parse.
    pub fn with_base_url(
        client: Client,
        token: Option<String>,
        actor_id: &str,
        base_url: &str,
    ) -> Result<Self, IntelError> {
        Ok(Self {
            client,
            token,
            actor_id: actor_id.to_string(),
            base_url: parse_base_url(base_url)?,
        })
    }
}

#[async_trait]
impl ContentScraper for ApifyScraper {
    async fn scrape(&self, channel: &str) -> Result<Vec<ContentSample>, IntelError> {
        let Some(token) = self.token.as_deref() else {
            return Err(IntelError::MissingCredential("APIFY_API_TOKEN"));
        };

        let url = self
            .base_url
            .join(&format!("v2/acts/{}/run-sync-get-dataset-items", self.actor_id))
            .map_err(|e| IntelError::Other(format!("invalid Apify URL: {e}")))?;

        tracing::info!(channel, actor = %self.actor_id, "starting apify scrape");
        let posts: Vec<ActorPost> = send_json(
            self.client.post(url).bearer_auth(token).json(&ActorInput {
                usernames: [channel],
                results_limit: RESULTS_LIMIT,
            }),
            "apify",
            &format!("apify({})", self.actor_id),
        )
        .await?;

        tracing::info!(channel, count = posts.len(), "apify returned posts");
        Ok(posts.into_iter().map(ContentSample::from).collect())
    }
}
