use std::collections::HashMap;
use std::env::VarError;

use super::*;

fn lookup_from_map<'a>(
    map: &'a HashMap<&'a str, &'a str>,
) -> impl Fn(&str) -> Result<String, VarError> + 'a {
    move |key| {
        map.get(key)
            .map(|v| (*v).to_string())
            .ok_or(VarError::NotPresent)
    }
}

#[test]
fn parse_environment_development() {
    assert_eq!(
        parse_environment("development").unwrap(),
        Environment::Development
    );
}

#[test]
fn parse_environment_test() {
    assert_eq!(parse_environment("test").unwrap(), Environment::Test);
}

#[test]
fn parse_environment_production() {
    assert_eq!(
        parse_environment("production").unwrap(),
        Environment::Production
    );
}

#[test]
fn parse_environment_unknown_fails() {
    let err = parse_environment("unknown").unwrap_err();
    assert!(matches!(err, ConfigError::InvalidEnvVar { ref var, .. } if var == "REELSCOUT_ENV"));
}

#[test]
fn build_app_config_succeeds_with_empty_env() {
    let map: HashMap<&str, &str> = HashMap::new();
    let result = build_app_config(lookup_from_map(&map));
    assert!(result.is_ok(), "expected Ok, got: {result:?}");
    let cfg = result.unwrap();
    assert_eq!(cfg.env, Environment::Development);
    assert_eq!(cfg.log_level, "info");
    assert!(cfg.serpapi_key.is_none());
    assert!(cfg.youtube_api_key.is_none());
    assert!(cfg.gemini_api_key.is_none());
    assert!(cfg.openai_api_key.is_none());
    assert!(cfg.apify_api_token.is_none());
    assert_eq!(cfg.apify_actor_id, "apify~instagram-post-scraper");
    assert_eq!(cfg.yt_dlp_path, "yt-dlp");
    assert!(cfg.media_extraction_enabled);
    assert_eq!(
        cfg.profile_dir.to_string_lossy(),
        "./data/channel-profiles"
    );
    assert_eq!(cfg.profile_ttl_hours, 24);
    assert_eq!(cfg.http_timeout_secs, 30);
    assert_eq!(cfg.media_timeout_secs, 15);
    assert_eq!(cfg.user_agent, "reelscout/0.1 (content-intelligence)");
}

#[test]
fn build_app_config_reads_credentials() {
    let mut map = HashMap::new();
    map.insert("SERPAPI_KEY", "serp");
    map.insert("YOUTUBE_API_KEY", "yt");
    map.insert("GEMINI_API_KEY", "gem");
    map.insert("APIFY_API_TOKEN", "apify");
    let cfg = build_app_config(lookup_from_map(&map)).unwrap();
    assert_eq!(cfg.serpapi_key.as_deref(), Some("serp"));
    assert_eq!(cfg.youtube_api_key.as_deref(), Some("yt"));
    assert_eq!(cfg.gemini_api_key.as_deref(), Some("gem"));
    assert_eq!(cfg.apify_api_token.as_deref(), Some("apify"));
    assert!(cfg.openai_api_key.is_none());
}

#[test]
fn blank_credentials_are_treated_as_unset() {
    let mut map = HashMap::new();
    map.insert("SERPAPI_KEY", "   ");
    map.insert("GEMINI_API_KEY", "");
    let cfg = build_app_config(lookup_from_map(&map)).unwrap();
    assert!(cfg.serpapi_key.is_none());
    assert!(cfg.gemini_api_key.is_none());
}

#[test]
fn serverless_runtime_disables_media_extraction_by_default() {
    let mut map = HashMap::new();
    map.insert("VERCEL", "1");
    let cfg = build_app_config(lookup_from_map(&map)).unwrap();
    assert!(!cfg.media_extraction_enabled);
}

#[test]
fn explicit_media_extraction_flag_wins_over_serverless_default() {
    let mut map = HashMap::new();
    map.insert("VERCEL", "1");
    map.insert("REELSCOUT_MEDIA_EXTRACTION", "true");
    let cfg = build_app_config(lookup_from_map(&map)).unwrap();
    assert!(cfg.media_extraction_enabled);
}

#[test]
fn media_extraction_flag_invalid() {
    let mut map = HashMap::new();
    map.insert("REELSCOUT_MEDIA_EXTRACTION", "maybe");
    let result = build_app_config(lookup_from_map(&map));
    assert!(
        matches!(result, Err(ConfigError::InvalidEnvVar { ref var, .. }) if var == "REELSCOUT_MEDIA_EXTRACTION"),
        "expected InvalidEnvVar(REELSCOUT_MEDIA_EXTRACTION), got: {result:?}"
    );
}

#[test]
fn profile_ttl_hours_override() {
    let mut map = HashMap::new();
    map.insert("REELSCOUT_PROFILE_TTL_HOURS", "6");
    let cfg = build_app_config(lookup_from_map(&map)).unwrap();
    assert_eq!(cfg.profile_ttl_hours, 6);
}

#[test]
fn profile_ttl_hours_invalid() {
    let mut map = HashMap::new();
    map.insert("REELSCOUT_PROFILE_TTL_HOURS", "not-a-number");
    let result = build_app_config(lookup_from_map(&map));
    assert!(
        matches!(result, Err(ConfigError::InvalidEnvVar { ref var, .. }) if var == "REELSCOUT_PROFILE_TTL_HOURS"),
        "expected InvalidEnvVar(REELSCOUT_PROFILE_TTL_HOURS), got: {result:?}"
    );
}

#[test]
fn http_timeout_zero_rejected() {
    let mut map = HashMap::new();
    map.insert("REELSCOUT_HTTP_TIMEOUT_SECS", "0");
    let result = build_app_config(lookup_from_map(&map));
    assert!(
        matches!(result, Err(ConfigError::InvalidEnvVar { ref var, .. }) if var == "REELSCOUT_HTTP_TIMEOUT_SECS"),
        "expected InvalidEnvVar(REELSCOUT_HTTP_TIMEOUT_SECS), got: {result:?}"
    );
}

#[test]
fn media_timeout_override() {
    let mut map = HashMap::new();
    map.insert("REELSCOUT_MEDIA_TIMEOUT_SECS", "5");
    let cfg = build_app_config(lookup_from_map(&map)).unwrap();
    assert_eq!(cfg.media_timeout_secs, 5);
}

#[test]
fn build_app_config_fails_on_invalid_env() {
    let mut map = HashMap::new();
    map.insert("REELSCOUT_ENV", "producton");
    let result = build_app_config(lookup_from_map(&map));
    assert!(
        matches!(result, Err(ConfigError::InvalidEnvVar { ref var, .. }) if var == "REELSCOUT_ENV"),
        "expected InvalidEnvVar(REELSCOUT_ENV), got: {result:?}"
    );
}

#[test]
fn debug_output_redacts_credentials() {
    let mut map = HashMap::new();
    map.insert("SERPAPI_KEY", "super-secret-serp");
    map.insert("GEMINI_API_KEY", "super-secret-gemini");
    let cfg = build_app_config(lookup_from_map(&map)).unwrap();
    let debug = format!("{cfg:?}");
    assert!(!debug.contains("super-secret"));
    assert!(debug.contains("[redacted]"));
}
