/// Date-anchored season matching
///
/// Pure core of the crate: compares calendar dates and picks the season of a
/// target show whose air date best matches a source entry's start date.
/// Nothing in here performs I/O.
pub mod domain;

pub use domain::{
    entities::{MatchResult, SeasonCandidate, SeasonMatch},
    services::{day_difference, select_best_season, SeasonSelector, Selection},
    value_objects::{AnchorDate, SeasonId, ShowId, SourceId, ToleranceDays},
};
