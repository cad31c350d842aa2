use crate::app_config::{AppConfig, Environment};
use crate::ConfigError;

/// Load application configuration from environment variables.
///
/// Calls `dotenvy::dotenv().ok()` to load `.env` files before reading env vars.
///
/// # Errors
///
/// Returns `ConfigError` if a value is present but invalid.
pub fn load_app_config() -> Result<AppConfig, ConfigError> {
    dotenvy::dotenv().ok();
    load_app_config_from_env()
}

/// Load application configuration from environment variables already in the process.
///
/// Unlike [`load_app_config`], this does NOT load `.env` files. Useful for testing
/// or when the caller manages env setup.
///
/// # Errors
///
/// Returns `ConfigError` if a value is present but invalid.
pub fn load_app_config_from_env() -> Result<AppConfig, ConfigError> {
    build_app_config(|key| std::env::var(key))
}

/// Build application configuration using the provided env-var lookup function.
///
/// Every variable is optional: missing credentials disable the matching
/// provider rather than failing the load.
fn build_app_config<F>(lookup: F) -> Result<AppConfig, ConfigError>
where
    F: Fn(&str) -> Result<String, std::env::VarError>,
{
    use std::path::PathBuf;

    let or_default = |var: &str, default: &str| -> String {
        lookup(var).unwrap_or_else(|_| default.to_string())
    };

    // Blank values count as unset so `KEY=` in a .env file disables a provider.
    let optional = |var: &str| -> Option<String> {
        lookup(var)
            .ok()
            .map(|v| v.trim().to_string())
            .filter(|v| !v.is_empty())
    };

    let parse_u64 = |var: &str, default: &str| -> Result<u64, ConfigError> {
        let raw = or_default(var, default);
        raw.parse::<u64>().map_err(|e| ConfigError::InvalidEnvVar {
            var: var.to_string(),
            reason: e.to_string(),
        })
    };

    let parse_bool = |var: &str, default: &str| -> Result<bool, ConfigError> {
        let raw = or_default(var, default);
        match raw.trim().to_ascii_lowercase().as_str() {
            "1" | "true" | "yes" | "on" => Ok(true),
            "0" | "false" | "no" | "off" => Ok(false),
            other => Err(ConfigError::InvalidEnvVar {
                var: var.to_string(),
                reason: format!("expected a boolean, got '{other}'"),
            }),
        }
    };

    let env = parse_environment(&or_default("REELSCOUT_ENV", "development"))?;
    let log_level = or_default("REELSCOUT_LOG_LEVEL", "info");

    let serpapi_key = optional("SERPAPI_KEY");
    let youtube_api_key = optional("YOUTUBE_API_KEY");
    let gemini_api_key = optional("GEMINI_API_KEY");
    let openai_api_key = optional("OPENAI_API_KEY");
    let apify_api_token = optional("APIFY_API_TOKEN");
    let apify_actor_id = or_default("APIFY_ACTOR_ID", "apify~instagram-post-scraper");

    let yt_dlp_path = or_default("YT_DLP_PATH", "yt-dlp");
    // Serverless deployments cannot spawn subprocesses.
    let serverless = lookup("VERCEL").is_ok_and(|v| v == "1");
    let media_extraction_enabled = parse_bool(
        "REELSCOUT_MEDIA_EXTRACTION",
        if serverless { "false" } else { "true" },
    )?;

    let profile_dir = PathBuf::from(or_default(
        "REELSCOUT_PROFILE_DIR",
        "./data/channel-profiles",
    ));
    let profile_ttl_hours = parse_u64("REELSCOUT_PROFILE_TTL_HOURS", "24")?;
    let http_timeout_secs = parse_u64("REELSCOUT_HTTP_TIMEOUT_SECS", "30")?;
    let media_timeout_secs = parse_u64("REELSCOUT_MEDIA_TIMEOUT_SECS", "15")?;
    let user_agent = or_default("REELSCOUT_USER_AGENT", "reelscout/0.1 (content-intelligence)");

    if http_timeout_secs == 0 {
        return Err(ConfigError::InvalidEnvVar {
            var: "REELSCOUT_HTTP_TIMEOUT_SECS".to_string(),
            reason: "must be greater than 0".to_string(),
        });
    }
    if media_timeout_secs == 0 {
        return Err(ConfigError::InvalidEnvVar {
            var: "REELSCOUT_MEDIA_TIMEOUT_SECS".to_string(),
            reason: "must be greater than 0".to_string(),
        });
    }

    Ok(AppConfig {
        env,
        log_level,
        serpapi_key,
        youtube_api_key,
        gemini_api_key,
        openai_api_key,
        apify_api_token,
        apify_actor_id,
        yt_dlp_path,
        media_extraction_enabled,
        profile_dir,
        profile_ttl_hours,
        http_timeout_secs,
        media_timeout_secs,
        user_agent,
    })
}

/// Parse a string into an `Environment` variant.
fn parse_environment(s: &str) -> Result<Environment, ConfigError> {
    match s {
        "development" => Ok(Environment::Development),
        "production" => Ok(Environment::Production),
        "test" => Ok(Environment::Test),
        other => Err(ConfigError::InvalidEnvVar {
            var: "REELSCOUT_ENV".to_string(),
            reason: format!("unknown environment '{other}'"),
        }),
    }
}

#[cfg(test)]
#[path = "config_test.rs"]
mod tests;
