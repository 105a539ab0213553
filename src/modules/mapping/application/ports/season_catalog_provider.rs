use async_trait::async_trait;

use crate::modules::matching::{SeasonCandidate, ShowId};
use crate::shared::errors::AppResult;

/// Port for the season list of a target show
#[async_trait]
pub trait SeasonCatalogProvider: Send + Sync {
    /// Seasons in catalog order. An empty list is a valid answer (movies, OVAs)
    async fn fetch(&self, show_id: ShowId) -> AppResult<Vec<SeasonCandidate>>;
}
