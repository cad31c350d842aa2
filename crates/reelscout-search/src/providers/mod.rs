//! Provider adapters: one per external content source.
//!
//! Every adapter converts a query into provider-shaped [`ProviderRecord`]s.
//! A missing credential is never an error; the adapter logs a warning and
//! returns an empty list. Upstream failures are either swallowed (news,
//! images) or returned (web, video); the orchestrator isolates both.

use async_trait::async_trait;

use crate::error::SearchError;
use crate::types::ProviderRecord;

pub mod image;
pub mod media;
pub mod news;
pub mod serpapi;
pub mod video;
pub mod web;

pub use image::ImageSearch;
pub use media::{MediaResolver, YtDlpResolver};
pub use news::NewsSearch;
pub use serpapi::SerpApiClient;
pub use video::VideoSearch;
pub use web::WebSearch;

/// A content source the orchestrator can fan a query out to.
#[async_trait]
pub trait Provider: Send + Sync {
    /// Tag passed to the normalizer for this provider's records.
    fn platform_tag(&self) -> &'static str;

    /// Query the source.
    ///
    /// # Errors
    ///
    /// Adapters that propagate upstream failures return [`SearchError`];
    /// the orchestrator maps it to an empty list for this branch.
    async fn search(&self, query: &str) -> Result<Vec<ProviderRecord>, SearchError>;
}

/// Treat blank provider strings as absent.
pub(crate) fn non_blank(value: Option<String>) -> Option<String> {
    value.filter(|v| !v.trim().is_empty())
}
