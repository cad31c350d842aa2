use std::path::PathBuf;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Environment {
    Development,
    Test,
    Production,
}

impl std::fmt::Display for Environment {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Environment::Development => write!(f, "development"),
            Environment::Test => write!(f, "test"),
            Environment::Production => write!(f, "production"),
        }
    }
}

#[derive(Clone)]
pub struct AppConfig {
    pub env: Environment,
    pub log_level: String,
    pub serpapi_key: Option<String>,
    pub youtube_api_key: Option<String>,
    pub gemini_api_key: Option<String>,
    pub openai_api_key: Option<String>,
    pub apify_api_token: Option<String>,
    pub apify_actor_id: String,
    pub yt_dlp_path: String,
    /// `false` in constrained runtimes where spawning `yt-dlp` is impossible.
    pub media_extraction_enabled: bool,
    pub profile_dir: PathBuf,
    pub profile_ttl_hours: u64,
    pub http_timeout_secs: u64,
    pub media_timeout_secs: u64,
    pub user_agent: String,
}

impl AppConfig {
    /// Log which upstream credentials are configured.
    ///
    /// Missing keys never abort startup; the affected providers degrade to
    /// empty results at request time.
    pub fn credential_report(&self) {
        if self.serpapi_key.is_some() {
            tracing::info!("SERPAPI_KEY is configured");
        } else {
            tracing::warn!("SERPAPI_KEY is not set; web, news and image search will return nothing");
        }

        if self.youtube_api_key.is_some() {
            tracing::info!("YOUTUBE_API_KEY is configured");
        } else {
            tracing::warn!("YOUTUBE_API_KEY is not set; video search will return nothing");
        }

        if self.apify_api_token.is_none() {
            tracing::warn!("APIFY_API_TOKEN is not set; channel profiles will use the default profile");
        }

        if self.gemini_api_key.is_none() && self.openai_api_key.is_none() {
            tracing::info!("no model API keys (Gemini/OpenAI) are set; ranking and summaries are disabled");
        }
    }
}

impl std::fmt::Debug for AppConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let redact = |v: &Option<String>| v.as_ref().map(|_| "[redacted]");
        f.debug_struct("AppConfig")
            .field("env", &self.env)
            .field("log_level", &self.log_level)
            .field("serpapi_key", &redact(&self.serpapi_key))
            .field("youtube_api_key", &redact(&self.youtube_api_key))
            .field("gemini_api_key", &redact(&self.gemini_api_key))
            .field("openai_api_key", &redact(&self.openai_api_key))
            .field("apify_api_token", &redact(&self.apify_api_token))
            .field("apify_actor_id", &self.apify_actor_id)
            .field("yt_dlp_path", &self.yt_dlp_path)
            .field("media_extraction_enabled", &self.media_extraction_enabled)
            .field("profile_dir", &self.profile_dir)
            .field("profile_ttl_hours", &self.profile_ttl_hours)
            .field("http_timeout_secs", &self.http_timeout_secs)
            .field("media_timeout_secs", &self.media_timeout_secs)
            .field("user_agent", &self.user_agent)
            .finish()
    }
}
