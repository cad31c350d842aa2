use super::*;

#[test]
fn parses_research_query() {
    let cli = Cli::try_parse_from(["reelscout", "research", "bridge collapse"])
        .expect("expected valid cli args");
    assert!(matches!(
        cli.command,
        Commands::Research { ref query } if query == "bridge collapse"
    ));
    assert!(!cli.compact);
}

#[test]
fn research_requires_query() {
    assert!(Cli::try_parse_from(["reelscout", "research"]).is_err());
}

#[test]
fn trending_period_defaults_to_today() {
    let cli = Cli::try_parse_from(["reelscout", "trending"]).unwrap();
    assert!(matches!(cli.command, Commands::Trending { ref period } if period == "today"));
}

#[test]
fn trending_accepts_period() {
    let cli = Cli::try_parse_from(["reelscout", "trending", "--period", "week"]).unwrap();
    assert!(matches!(cli.command, Commands::Trending { ref period } if period == "week"));
}

#[test]
fn profile_refresh_flag() {
    let cli = Cli::try_parse_from(["reelscout", "profile", "techdaily", "--refresh"]).unwrap();
    assert!(matches!(
        cli.command,
        Commands::Profile { ref channel, refresh: true } if channel == "techdaily"
    ));
}

#[test]
fn channel_without_refresh() {
    let cli = Cli::try_parse_from(["reelscout", "channel", "techdaily"]).unwrap();
    assert!(matches!(
        cli.command,
        Commands::Channel { refresh: false, .. }
    ));
}

#[test]
fn compact_is_global() {
    let cli = Cli::try_parse_from(["reelscout", "trending", "--compact"]).unwrap();
    assert!(cli.compact);
}

#[test]
fn subcommand_is_required() {
    assert!(Cli::try_parse_from(["reelscout"]).is_err());
}
