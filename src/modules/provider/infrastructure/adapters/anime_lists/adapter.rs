//! Base mapping from AniList ids to TMDB show ids
//!
//! Backed by the community anime-lists dump, downloaded on first use and
//! kept for the lifetime of the process.

use std::collections::HashMap;

use async_trait::async_trait;
use tokio::sync::OnceCell;

use crate::{
    modules::{
        mapping::ShowResolver,
        matching::{ShowId, SourceId},
        provider::infrastructure::http_client::RateLimitClient,
    },
    shared::{
        config::TransportConfig,
        errors::{AppError, AppResult},
        utils::TimedOperation,
    },
};

use super::models::AnimeListEntry;

pub struct AnimeListsResolver {
    http_client: Option<RateLimitClient>,
    url: String,
    table: OnceCell<HashMap<SourceId, ShowId>>,
}

impl AnimeListsResolver {
    pub fn new(transport: &TransportConfig) -> AppResult<Self> {
        let http_client = RateLimitClient::for_static_content(transport.request_timeout)?;
        Ok(Self {
            http_client: Some(http_client),
            url: transport.mapping_url.clone(),
            table: OnceCell::new(),
        })
    }

    /// Resolver over entries already in memory; never touches the network
    pub fn from_entries(entries: impl IntoIterator<Item = AnimeListEntry>) -> Self {
        Self {
            http_client: None,
            url: String::new(),
            table: OnceCell::from(build_table(entries)),
        }
    }

    /// Every AniList id that has a TMDB show, ascending
    pub async fn all_source_ids(&self) -> AppResult<Vec<SourceId>> {
        let mut ids: Vec<SourceId> = self.table().await?.keys().copied().collect();
        ids.sort_unstable();
        Ok(ids)
    }

    /// Number of usable links, downloading the dump if needed
    pub async fn len(&self) -> AppResult<usize> {
        Ok(self.table().await?.len())
    }

    pub fn is_loaded(&self) -> bool {
        self.table.initialized()
    }

    async fn table(&self) -> AppResult<&HashMap<SourceId, ShowId>> {
        self.table.get_or_try_init(|| self.download()).await
    }

    async fn download(&self) -> AppResult<HashMap<SourceId, ShowId>> {
        let client = self.http_client.as_ref().ok_or_else(|| {
            AppError::InternalError("Anime-lists resolver has no HTTP client".to_string())
        })?;

        log::info!("Downloading mapping data from Fribb/anime-lists...");
        let timer = TimedOperation::new("Anime-lists download");

        let entries = client
            .get::<Vec<AnimeListEntry>>(&self.url)
            .await
            .map_err(|e| match e {
                AppError::SerializationError(msg) => {
                    AppError::SerializationError(format!("Error parsing mapping data: {}", msg))
                }
                other => other,
            })?;
        let total = entries.len();
        let table = build_table(entries);

        timer.finish();
        log::info!(
            "Loaded {} valid mappings out of {} entries",
            table.len(),
            total
        );
        Ok(table)
    }
}

/// Later entries win when an AniList id appears twice
fn build_table(entries: impl IntoIterator<Item = AnimeListEntry>) -> HashMap<SourceId, ShowId> {
    entries
        .into_iter()
        .filter_map(|entry| entry.link())
        .collect()
}

#[async_trait]
impl ShowResolver for AnimeListsResolver {
    async fn resolve(&self, source_id: SourceId) -> AppResult<Option<ShowId>> {
        Ok(self.table().await?.get(&source_id).copied())
    }
}
