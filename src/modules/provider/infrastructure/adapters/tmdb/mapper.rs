use super::models::{Season, TvShowDetails};
use crate::modules::matching::{AnchorDate, SeasonCandidate};
use crate::shared::errors::AppResult;

/// Turns TMDB show details into season candidates
#[derive(Debug, Clone, Copy, Default)]
pub struct TmdbMapper;

impl TmdbMapper {
    pub fn new() -> Self {
        Self
    }

    /// Candidates in the order TMDB lists the seasons
    pub fn map_to_candidates(&self, details: TvShowDetails) -> AppResult<Vec<SeasonCandidate>> {
        details
            .seasons
            .unwrap_or_default()
            .into_iter()
            .map(|season| self.map_season(season))
            .collect()
    }

    fn map_season(&self, season: Season) -> AppResult<SeasonCandidate> {
        let air_date = AnchorDate::parse_optional(season.air_date.as_deref())?;
        Ok(SeasonCandidate::new(season.season_number, season.id, air_date))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn details(raw: &str) -> TvShowDetails {
        serde_json::from_str(raw).unwrap()
    }

    #[test]
    fn test_maps_seasons_in_listing_order() {
        let show = details(
            r#"{
                "id": 1429,
                "name": "Attack on Titan",
                "seasons": [
                    { "id": 3627, "season_number": 0, "air_date": "2013-07-07", "name": "Specials" },
                    { "id": 3628, "season_number": 1, "air_date": "2013-04-07", "name": "Season 1" },
                    { "id": 74522, "season_number": 2, "air_date": "2017-04-01", "name": "Season 2" },
                    { "id": 99999, "season_number": 5, "air_date": null, "name": "Season 5" }
                ]
            }"#,
        );

        let candidates = TmdbMapper::new().map_to_candidates(show).unwrap();
        assert_eq!(candidates.len(), 4);
        assert!(candidates[0].is_specials());
        assert_eq!(candidates[2].season_id, 74522);
        assert_eq!(candidates[2].air_date.unwrap().to_string(), "2017-04-01");
        assert!(candidates[3].air_date.is_none());
    }

    #[test]
    fn test_blank_air_date_is_absent() {
        let show = details(r#"{ "id": 1, "seasons": [ { "id": 2, "season_number": 1, "air_date": "" } ] }"#);
        let candidates = TmdbMapper::new().map_to_candidates(show).unwrap();
        assert!(candidates[0].air_date.is_none());
    }

    #[test]
    fn test_missing_seasons_is_empty() {
        let show = details(r#"{ "id": 1, "name": "Some Movie Entry" }"#);
        assert!(TmdbMapper::new().map_to_candidates(show).unwrap().is_empty());
    }

    #[test]
    fn test_malformed_air_date_is_an_error() {
        let show = details(r#"{ "id": 1, "seasons": [ { "id": 2, "season_number": 1, "air_date": "2013/04/07" } ] }"#);
        assert!(TmdbMapper::new().map_to_candidates(show).is_err());
    }
}
