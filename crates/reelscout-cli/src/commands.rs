//! Command handlers. Each runs one operation and prints its JSON to stdout.

use reelscout_intel::ReelScout;
use serde::Serialize;

fn print_json<T: Serialize>(value: &T, compact: bool) -> anyhow::Result<()> {
    let out = if compact {
        serde_json::to_string(value)?
    } else {
        serde_json::to_string_pretty(value)?
    };
    println!("{out}");
    Ok(())
}

/// # Errors
///
/// Returns an error for a blank query or if output cannot be serialized.
pub(crate) async fn run_research(scout: &ReelScout, query: &str, compact: bool) -> anyhow::Result<()> {
    let report = scout.research(query).await?;
    tracing::info!(count = report.results.len(), "research results ready");
    print_json(&report, compact)
}

/// # Errors
///
/// Returns an error if the news provider fails.
pub(crate) async fn run_trending(scout: &ReelScout, period: &str, compact: bool) -> anyhow::Result<()> {
    let items = scout.trending(period).await?;
    if items.is_empty() {
        tracing::warn!(period, "no trending items; is SERPAPI_KEY set?");
    }
    print_json(&items, compact)
}

/// # Errors
///
/// Returns an error for a blank channel id.
pub(crate) async fn run_profile(
    scout: &ReelScout,
    channel: &str,
    refresh: bool,
    compact: bool,
) -> anyhow::Result<()> {
    let profile = scout.profile(channel, refresh).await?;
    print_json(&profile, compact)
}

/// # Errors
///
/// Returns an error for a blank channel id.
pub(crate) async fn run_channel(
    scout: &ReelScout,
    channel: &str,
    refresh: bool,
    compact: bool,
) -> anyhow::Result<()> {
    let report = scout.channel_report(channel, refresh).await?;
    tracing::info!(channel, count = report.results.len(), "channel report ready");
    print_json(&report, compact)
}
