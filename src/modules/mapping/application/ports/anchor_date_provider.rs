use async_trait::async_trait;

use crate::modules::matching::{AnchorDate, SourceId};
use crate::shared::errors::AppResult;

/// What the source catalog knows about an entry
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AnchorInfo {
    pub title: Option<String>,
    pub start_date: Option<AnchorDate>,
}

impl AnchorInfo {
    pub fn new(title: Option<String>, start_date: Option<AnchorDate>) -> Self {
        Self { title, start_date }
    }

    pub fn unknown() -> Self {
        Self::default()
    }
}

/// Port for the canonical start date of a source entry
#[async_trait]
pub trait AnchorDateProvider: Send + Sync {
    /// Start date and display title; both absent when the entry is unknown
    async fn fetch(&self, source_id: SourceId) -> AppResult<AnchorInfo>;
}
