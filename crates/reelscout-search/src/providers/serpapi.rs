//! Shared `SerpApi` transport for the web, news, image and trending adapters.

use std::sync::Arc;

use reqwest::{Client, Url};
use serde::Deserialize;

use crate::error::SearchError;
use crate::http::{endpoint, get_json, parse_base_url};

const DEFAULT_BASE_URL: &str = "https://serpapi.com/";

/// `SerpApi` Google engine client.
///
/// Use [`SerpApiClient::new`] for production or
/// [`SerpApiClient::with_base_url`] to point at a mock server in tests.
#[derive(Clone)]
pub struct SerpApiClient {
    client: Client,
    api_key: Option<Arc<str>>,
    base_url: Url,
}

/// The subset of a `search.json` response the adapters read.
#[derive(Debug, Default, Deserialize)]
pub struct SerpResponse {
    #[serde(default)]
    pub organic_results: Vec<OrganicResult>,
    #[serde(default)]
    pub news_results: Vec<NewsResult>,
    #[serde(default)]
    pub images_results: Vec<ImageResult>,
    /// Set by `SerpApi` on a 200 response when the engine found nothing.
    #[serde(default)]
    pub error: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct OrganicResult {
    pub title: Option<String>,
    pub link: Option<String>,
    pub snippet: Option<String>,
    pub thumbnail: Option<String>,
    pub date: Option<String>,
    pub source: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct NewsResult {
    pub title: Option<String>,
    pub link: Option<String>,
    pub source: Option<NewsSource>,
    pub date: Option<String>,
    pub snippet: Option<String>,
    pub thumbnail: Option<String>,
}

/// `SerpApi` reports a news source either as a plain name or as an object.
#[derive(Debug, Deserialize)]
#[serde(untagged)]
pub enum NewsSource {
    Name(String),
    Detailed { name: Option<String> },
}

impl NewsSource {
    #[must_use]
    pub fn into_name(self) -> Option<String> {
        match self {
            Self::Name(n) => Some(n),
            Self::Detailed { name } => name,
        }
    }
}

#[derive(Debug, Deserialize)]
pub struct ImageResult {
    pub title: Option<String>,
    pub link: Option<String>,
    pub original: Option<String>,
    pub thumbnail: Option<String>,
    pub source: Option<String>,
}

impl SerpApiClient {
    /// Creates a client pointed at the production `SerpApi` endpoint.
    ///
    /// # Errors
    ///
    /// Never fails for the built-in base URL; the `Result` mirrors
    /// [`SerpApiClient::with_base_url`].
    pub fn new(client: Client, api_key: Option<String>) -> Result<Self, SearchError> {
        Self::with_base_url(client, api_key, DEFAULT_BASE_URL)
    }

    /// Creates a client with a custom base URL (for testing with wiremock).
    ///
    /// # Errors
    ///
    /// Returns [`SearchError::InvalidBaseUrl`] if `base_url` does not parse.
    pub fn with_base_url(
        client: Client,
        api_key: Option<String>,
        base_url: &str,
    ) -> Result<Self, SearchError> {
        Ok(Self {
            client,
            api_key: api_key.map(Arc::from),
            base_url: parse_base_url(base_url)?,
        })
    }

    #[must_use]
    pub fn has_key(&self) -> bool {
        self.api_key.is_some()
    }

    /// Run one `engine=google` search with the given extra parameters.
    ///
    /// # Errors
    ///
    /// Returns [`SearchError::MissingCredential`] without a network call when
    /// no key is configured, otherwise any transport, status, or parse error.
    pub async fn search(
        &self,
        query: &str,
        extra: &[(&str, &str)],
    ) -> Result<SerpResponse, SearchError> {
        let Some(api_key) = self.api_key.as_deref() else {
            return Err(SearchError::MissingCredential("SERPAPI_KEY"));
        };

        let mut params: Vec<(&str, &str)> =
            vec![("q", query), ("api_key", api_key), ("engine", "google")];
        params.extend_from_slice(extra);

        let url = endpoint(&self.base_url, "search.json", &params)?;
        let tbm = extra
            .iter()
            .find(|(k, _)| *k == "tbm")
            .map_or("web", |(_, v)| *v);
        let response: SerpResponse =
            get_json(&self.client, url, "serpapi", &format!("serpapi(tbm={tbm})")).await?;

        if let Some(message) = &response.error {
            tracing::debug!(query, tbm, message = %message, "serpapi returned no results");
        }
        Ok(response)
    }
}
