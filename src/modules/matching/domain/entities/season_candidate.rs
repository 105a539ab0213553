use serde::{Deserialize, Serialize};

use crate::modules::matching::domain::value_objects::{AnchorDate, SeasonId};

/// One season of a target show as the catalog lists it.
///
/// Season number 0 holds specials/extras by catalog convention. Candidates
/// keep catalog order; the order only matters for tie-breaking.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SeasonCandidate {
    pub season_number: u32,
    pub season_id: SeasonId,
    pub air_date: Option<AnchorDate>,
}

impl SeasonCandidate {
    pub fn new(season_number: u32, season_id: SeasonId, air_date: Option<AnchorDate>) -> Self {
        Self {
            season_number,
            season_id,
            air_date,
        }
    }

    pub fn is_specials(&self) -> bool {
        self.season_number == 0
    }
}
