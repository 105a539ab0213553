/// Test data factories using builder pattern
///
/// Provides convenient methods to create season listings and dates with
/// sensible defaults
use seasonmap::modules::matching::{AnchorDate, SeasonCandidate, SeasonId};

pub fn date(raw: &str) -> AnchorDate {
    raw.parse().expect("valid ISO date in test data")
}

/// Builds a TMDB-style season listing in catalog order
#[derive(Default)]
pub struct SeasonListFactory {
    seasons: Vec<SeasonCandidate>,
    next_id: SeasonId,
}

impl SeasonListFactory {
    pub fn new() -> Self {
        Self {
            seasons: Vec::new(),
            next_id: 1000,
        }
    }

    /// Attack on Titan as TMDB lists it: specials first, then the numbered seasons
    pub fn attack_on_titan() -> Self {
        Self::new()
            .season_with_id(0, 3627, Some("2013-07-07"))
            .season_with_id(1, 3628, Some("2013-04-07"))
            .season_with_id(2, 85987, Some("2017-04-01"))
            .season_with_id(3, 99120, Some("2018-07-23"))
    }

    pub fn season(mut self, number: u32, air_date: Option<&str>) -> Self {
        let id = self.next_id;
        self.next_id += 1;
        self.seasons
            .push(SeasonCandidate::new(number, id, air_date.map(date)));
        self
    }

    pub fn season_with_id(mut self, number: u32, id: SeasonId, air_date: Option<&str>) -> Self {
        self.seasons
            .push(SeasonCandidate::new(number, id, air_date.map(date)));
        self
    }

    pub fn build(self) -> Vec<SeasonCandidate> {
        self.seasons
    }
}
