use crate::error::AppError;
use crate::rate_limit::RatePolicy;
use std::env;
use std::path::PathBuf;

#[derive(Debug, Clone)]
pub struct Config {
    pub api_key: String,
    /// Replaces `https://{region}.api.riotgames.com` when set.
    pub api_base_url: Option<String>,
    pub rate_policy: RatePolicy,
    pub static_data_dir: PathBuf,
    pub cache_enabled: bool,
    pub cache_ttl_hours: i64,
}

impl Config {
    pub fn from_env() -> Result<Self, AppError> {
        dotenvy::dotenv().ok();

        let api_key = env::var("RIOT_API_KEY").map_err(|_| {
            AppError::ConfigError("RIOT_API_KEY not found in environment or .env file".to_string())
        })?;

        let api_base_url = env::var("RIOT_API_BASE_URL")
            .ok()
            .map(|url| url.trim_end_matches('/').to_string())
            .filter(|url| !url.is_empty());

        let rate_policy = match env::var("RIOT_RATE_LIMITS") {
            Ok(spec) => RatePolicy::parse(&spec)?,
            Err(_) => RatePolicy::default(),
        };

        let static_data_dir = env::var("STATIC_DATA_DIR")
            .map(PathBuf::from)
            .unwrap_or_else(|_| PathBuf::from("static"));

        let cache_enabled = env::var("MATCH_CACHE")
            .map(|v| !matches!(v.to_ascii_lowercase().as_str(), "off" | "0" | "false"))
            .unwrap_or(true);

        let cache_ttl_hours = match env::var("MATCH_CACHE_TTL_HOURS") {
            Ok(v) => v.parse().map_err(|_| {
                AppError::ConfigError(format!("MATCH_CACHE_TTL_HOURS must be an integer, got '{}'", v))
            })?,
            Err(_) => 24,
        };

        Ok(Config {
            api_key,
            api_base_url,
            rate_policy,
            static_data_dir,
            cache_enabled,
            cache_ttl_hours,
        })
    }

    #[cfg(test)]
    pub fn for_tests(api_base_url: &str) -> Self {
        Config {
            api_key: "test-key".to_string(),
            api_base_url: Some(api_base_url.to_string()),
            rate_policy: RatePolicy::default(),
            static_data_dir: PathBuf::from("static"),
            cache_enabled: false,
            cache_ttl_hours: 24,
        }
    }
}
