//! Runtime configuration
//!
//! Everything the pipeline and its HTTP adapters need is gathered here and
//! passed down explicitly through constructors.

use std::time::Duration;

use crate::modules::matching::ToleranceDays;
use crate::shared::errors::{AppError, AppResult};

pub const TMDB_BASE_URL: &str = "https://api.themoviedb.org/3";
pub const ANILIST_URL: &str = "https://graphql.anilist.co";
pub const MAPPING_URL: &str =
    "https://raw.githubusercontent.com/Fribb/anime-lists/master/anime-list-full.json";

/// Settings of the matching pipeline itself
#[derive(Debug, Clone, PartialEq)]
pub struct PipelineConfig {
    pub tolerance: ToleranceDays,
    /// Drop season 0 (specials) before matching
    pub exclude_specials: bool,
    /// Log progress every N entries of a batch; 0 disables progress lines
    pub progress_interval: usize,
}

impl Default for PipelineConfig {
    fn default() -> Self {
        Self {
            tolerance: ToleranceDays::DEFAULT,
            exclude_specials: false,
            progress_interval: 10,
        }
    }
}

/// Settings of the remote collaborators
#[derive(Debug, Clone, PartialEq)]
pub struct TransportConfig {
    /// TMDB v3 api key or v4 read access token
    pub tmdb_api_key: String,
    pub tmdb_base_url: String,
    pub anilist_url: String,
    pub mapping_url: String,
    pub request_timeout: Duration,
    /// AniList runs in a degraded 30 req/min mode at the time of writing
    pub anilist_requests_per_minute: u32,
    pub tmdb_requests_per_second: u32,
}

impl TransportConfig {
    pub fn new(tmdb_api_key: impl Into<String>) -> Self {
        Self {
            tmdb_api_key: tmdb_api_key.into(),
            tmdb_base_url: TMDB_BASE_URL.to_string(),
            anilist_url: ANILIST_URL.to_string(),
            mapping_url: MAPPING_URL.to_string(),
            request_timeout: Duration::from_secs(10),
            anilist_requests_per_minute: 30,
            tmdb_requests_per_second: 4,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct MapperConfig {
    pub pipeline: PipelineConfig,
    pub transport: TransportConfig,
}

impl MapperConfig {
    pub fn new(tmdb_api_key: impl Into<String>) -> Self {
        Self {
            pipeline: PipelineConfig::default(),
            transport: TransportConfig::new(tmdb_api_key),
        }
    }

    /// Load configuration from the process environment, reading `.env` first
    pub fn from_env() -> AppResult<Self> {
        dotenvy::dotenv().ok();
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build configuration from any key lookup
    pub fn from_lookup<F>(lookup: F) -> AppResult<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let api_key = lookup("TMDB_API_KEY")
            .map(|k| k.trim().to_string())
            .filter(|k| !k.is_empty())
            .ok_or_else(|| {
                AppError::ConfigError(
                    "TMDB_API_KEY not found. Create a .env file containing TMDB_API_KEY=your_key_here"
                        .to_string(),
                )
            })?;

        let mut config = Self::new(api_key);

        if let Some(raw) = lookup("SEASONMAP_TOLERANCE_DAYS") {
            let days: i64 = raw.trim().parse()?;
            config.pipeline.tolerance = ToleranceDays::new(days)?;
        }
        if let Some(raw) = lookup("SEASONMAP_EXCLUDE_SPECIALS") {
            config.pipeline.exclude_specials = parse_flag("SEASONMAP_EXCLUDE_SPECIALS", &raw)?;
        }
        if let Some(raw) = lookup("SEASONMAP_PROGRESS_INTERVAL") {
            config.pipeline.progress_interval = raw.trim().parse()?;
        }
        if let Some(raw) = lookup("SEASONMAP_REQUEST_TIMEOUT_SECS") {
            let secs: u64 = raw.trim().parse()?;
            if secs == 0 {
                return Err(AppError::ConfigError(
                    "SEASONMAP_REQUEST_TIMEOUT_SECS must be at least 1".to_string(),
                ));
            }
            config.transport.request_timeout = Duration::from_secs(secs);
        }

        Ok(config)
    }
}

fn parse_flag(key: &str, raw: &str) -> AppResult<bool> {
    match raw.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Ok(true),
        "0" | "false" | "no" | "off" => Ok(false),
        other => Err(AppError::ConfigError(format!(
            "{} must be a boolean, got '{}'",
            key, other
        ))),
    }
}
