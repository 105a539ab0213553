use serde::{Deserialize, Serialize};

use super::EntryStatus;
use crate::modules::matching::{MatchResult, ShowId, SourceId};

/// One row of the output collection.
///
/// Serialized field-exact as `anilist_id, title, tmdb_show_id,
/// tmdb_season_id, tmdb_season_number, matched_date, date_difference_days`
/// with absent values written as null.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MappingRecord {
    #[serde(rename = "anilist_id")]
    pub source_id: SourceId,
    pub title: Option<String>,
    #[serde(rename = "tmdb_show_id")]
    pub target_show_id: Option<ShowId>,
    #[serde(flatten)]
    pub season_match: MatchResult,
}

impl MappingRecord {
    pub fn new(
        source_id: SourceId,
        title: Option<String>,
        target_show_id: Option<ShowId>,
        season_match: MatchResult,
    ) -> Self {
        Self {
            source_id,
            title,
            target_show_id,
            season_match,
        }
    }

    /// Record for an id missing from the base mapping
    pub fn unresolved(source_id: SourceId) -> Self {
        Self::new(source_id, None, None, MatchResult::absent())
    }
}

/// A finished record together with the way its entry ended
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MappedEntry {
    pub record: MappingRecord,
    pub status: EntryStatus,
}

impl MappedEntry {
    pub fn new(record: MappingRecord, status: EntryStatus) -> Self {
        Self { record, status }
    }

    pub fn source_id(&self) -> SourceId {
        self.record.source_id
    }
}
