use serde::{Deserialize, Serialize};

use crate::modules::matching::domain::value_objects::{AnchorDate, SeasonId};

/// A fully populated season match
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SeasonMatch {
    pub season_id: SeasonId,
    pub season_number: u32,
    pub matched_date: AnchorDate,
    pub day_difference: u32,
}

/// Outcome of season selection: either every field is present or none is.
///
/// Serializes to the four nullable output columns
/// (`tmdb_season_id`, `tmdb_season_number`, `matched_date`,
/// `date_difference_days`) and refuses to deserialize a partially filled set.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(try_from = "MatchColumns", into = "MatchColumns")]
pub struct MatchResult(Option<SeasonMatch>);

impl MatchResult {
    pub fn absent() -> Self {
        Self(None)
    }

    pub fn matched(season: SeasonMatch) -> Self {
        Self(Some(season))
    }

    pub fn is_absent(&self) -> bool {
        self.0.is_none()
    }

    pub fn season(&self) -> Option<&SeasonMatch> {
        self.0.as_ref()
    }

    pub fn season_id(&self) -> Option<SeasonId> {
        self.0.map(|m| m.season_id)
    }

    pub fn season_number(&self) -> Option<u32> {
        self.0.map(|m| m.season_number)
    }

    pub fn matched_date(&self) -> Option<AnchorDate> {
        self.0.map(|m| m.matched_date)
    }

    pub fn day_difference(&self) -> Option<u32> {
        self.0.map(|m| m.day_difference)
    }
}

impl From<Option<SeasonMatch>> for MatchResult {
    fn from(season: Option<SeasonMatch>) -> Self {
        Self(season)
    }
}

/// Wire shape of [`MatchResult`]
#[derive(Debug, Clone, Serialize, Deserialize)]
struct MatchColumns {
    tmdb_season_id: Option<SeasonId>,
    tmdb_season_number: Option<u32>,
    matched_date: Option<AnchorDate>,
    date_difference_days: Option<u32>,
}

impl From<MatchResult> for MatchColumns {
    fn from(result: MatchResult) -> Self {
        Self {
            tmdb_season_id: result.season_id(),
            tmdb_season_number: result.season_number(),
            matched_date: result.matched_date(),
            date_difference_days: result.day_difference(),
        }
    }
}

impl TryFrom<MatchColumns> for MatchResult {
    type Error = String;

    fn try_from(columns: MatchColumns) -> Result<Self, Self::Error> {
        match (
            columns.tmdb_season_id,
            columns.tmdb_season_number,
            columns.matched_date,
            columns.date_difference_days,
        ) {
            (Some(season_id), Some(season_number), Some(matched_date), Some(day_difference)) => {
                Ok(MatchResult::matched(SeasonMatch {
                    season_id,
                    season_number,
                    matched_date,
                    day_difference,
                }))
            }
            (None, None, None, None) => Ok(MatchResult::absent()),
            _ => Err("season match columns must be all null or all present".to_string()),
        }
    }
}
