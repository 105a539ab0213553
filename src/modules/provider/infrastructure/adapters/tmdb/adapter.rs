use async_trait::async_trait;

use crate::{
    modules::{
        mapping::SeasonCatalogProvider,
        matching::{SeasonCandidate, ShowId},
        provider::infrastructure::{adapters::tmdb::mapper::TmdbMapper, http_client::RateLimitClient},
    },
    shared::{
        config::TransportConfig,
        errors::{AppError, AppResult},
    },
};

use super::models::TvShowDetails;

/// v4 read access tokens are long JWTs, v3 api keys are 32 hex chars
const BEARER_TOKEN_MIN_LEN: usize = 60;

/// TMDB (The Movie Database) provider adapter with REST API
/// Provides the season listing of a TV show
pub struct TmdbAdapter {
    http_client: RateLimitClient,
    base_url: String,
    /// `None` when the credential travels as a bearer token
    api_key: Option<String>,
    mapper: TmdbMapper,
}

impl TmdbAdapter {
    pub fn new(transport: &TransportConfig) -> AppResult<Self> {
        let http_client = RateLimitClient::for_tmdb(
            transport.tmdb_requests_per_second,
            transport.request_timeout,
        )?;
        Self::with_client(
            http_client,
            &transport.tmdb_api_key,
            transport.tmdb_base_url.clone(),
        )
    }

    /// Create adapter with custom HTTP client (for testing)
    pub fn with_client(
        http_client: RateLimitClient,
        credential: &str,
        base_url: String,
    ) -> AppResult<Self> {
        let credential = credential.trim();
        if credential.is_empty() {
            return Err(AppError::ConfigError("TMDB API key is empty".to_string()));
        }

        let (http_client, api_key) = if credential.len() > BEARER_TOKEN_MIN_LEN {
            (http_client.with_bearer_token(credential), None)
        } else {
            (http_client, Some(credential.to_string()))
        };

        Ok(Self {
            http_client,
            base_url: base_url.trim_end_matches('/').to_string(),
            api_key,
            mapper: TmdbMapper::new(),
        })
    }

    /// Check if a request can be made immediately (for testing and monitoring)
    pub fn can_make_request_now(&self) -> bool {
        self.http_client.can_make_request_now()
    }

    /// Build URL with API key parameter
    fn build_url(&self, endpoint: &str) -> String {
        match &self.api_key {
            Some(key) => format!(
                "{}{}?api_key={}",
                self.base_url,
                endpoint,
                urlencoding::encode(key)
            ),
            None => format!("{}{}", self.base_url, endpoint),
        }
    }
}

#[async_trait]
impl SeasonCatalogProvider for TmdbAdapter {
    async fn fetch(&self, show_id: ShowId) -> AppResult<Vec<SeasonCandidate>> {
        let url = self.build_url(&format!("/tv/{}", show_id));

        log::debug!("TMDB: Getting seasons for TV show '{}'", show_id);

        let details: TvShowDetails = match self.http_client.get(&url).await {
            Ok(details) => details,
            // Movie ids from the base mapping have no TV entry
            Err(AppError::NotFound(_)) => {
                log::warn!(
                    "TMDB: No TV show found for ID '{}', treating it as having no seasons",
                    show_id
                );
                return Ok(Vec::new());
            }
            Err(e) => return Err(e),
        };

        let candidates = self.mapper.map_to_candidates(details)?;
        log::debug!(
            "TMDB: Found {} seasons for TV show '{}'",
            candidates.len(),
            show_id
        );
        Ok(candidates)
    }
}
