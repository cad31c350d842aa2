//! Multi-source search for reelscout.
//!
//! Fans a query out to web, video, news and image providers in parallel,
//! isolates per-provider failures, and normalizes every record into one
//! [`UnifiedResult`] schema.

pub mod error;
pub mod http;
pub mod normalize;
pub mod orchestrator;
pub mod providers;
pub mod trending;
pub mod types;

pub use error::SearchError;
pub use normalize::normalize;
pub use orchestrator::SearchOrchestrator;
pub use providers::{MediaResolver, Provider, SerpApiClient, YtDlpResolver};
pub use trending::{period_filter, TrendingItem, TrendingNews};
pub use types::{MediaType, Platform, ProviderRecord, UnifiedResult};
