//! Channel intelligence for reelscout.
//!
//! Builds and caches per-channel content profiles, plans targeted searches
//! from them, ranks the merged results by fit, and writes briefs.

pub mod analyzer;
pub mod error;
pub mod model;
pub mod planner;
pub mod profile;
pub mod profiles;
pub mod ranking;
pub mod scraper;
pub mod service;
pub mod store;
pub mod summary;

pub use error::IntelError;
pub use planner::build_queries;
pub use profile::{default_profile, ChannelProfile, ReelStyleGuide};
pub use profiles::ChannelProfiles;
pub use ranking::{dedup_by_source_link, ChannelSearch, RelevanceScorer, ScoredCandidate};
pub use service::{ChannelReport, ReelScout, ResearchReport};
pub use store::{FileProfileStore, MemoryProfileStore, ProfileStore};
pub use summary::{ChannelBrief, ResearchBrief, Summarizer};
