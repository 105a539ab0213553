use async_trait::async_trait;

use crate::modules::matching::{ShowId, SourceId};
use crate::shared::errors::AppResult;

/// Port for the static AniList to TMDB show lookup
#[async_trait]
pub trait ShowResolver: Send + Sync {
    /// TMDB show id for an AniList id, `None` when the base mapping has no entry
    async fn resolve(&self, source_id: SourceId) -> AppResult<Option<ShowId>>;
}
