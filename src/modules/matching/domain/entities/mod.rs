mod match_result;
mod season_candidate;

pub use match_result::{MatchResult, SeasonMatch};
pub use season_candidate::SeasonCandidate;
