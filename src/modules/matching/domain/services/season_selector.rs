use crate::modules::matching::domain::{
    entities::{MatchResult, SeasonCandidate, SeasonMatch},
    services::day_difference,
    value_objects::{AnchorDate, ToleranceDays},
};

/// How a selection ended.
///
/// Every variant except `Matched` collapses to an absent [`MatchResult`], but
/// they mean different things to an operator: `NoCandidates` is the normal
/// movie/OVA shape while `ToleranceMiss` suggests the tolerance or the source
/// data needs a look.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Selection {
    Matched(SeasonMatch),
    /// The source entry has no known start date
    NoAnchor,
    /// The target show lists no seasons at all
    NoCandidates,
    /// Seasons exist but none carries an air date
    NoDatedCandidates,
    /// Dated seasons exist but the closest one is outside the tolerance
    ToleranceMiss { closest_days: u32 },
}

impl Selection {
    pub fn into_match_result(self) -> MatchResult {
        match self {
            Selection::Matched(season) => MatchResult::matched(season),
            _ => MatchResult::absent(),
        }
    }

    pub fn is_match(&self) -> bool {
        matches!(self, Selection::Matched(_))
    }
}

/// Picks the season whose air date lies closest to an anchor date
#[derive(Debug, Clone, Copy, Default)]
pub struct SeasonSelector {
    tolerance: ToleranceDays,
}

impl SeasonSelector {
    pub fn new(tolerance: ToleranceDays) -> Self {
        Self { tolerance }
    }

    pub fn tolerance(&self) -> ToleranceDays {
        self.tolerance
    }

    /// Select the best season and report why nothing matched when it doesn't.
    ///
    /// The closest air date within tolerance wins. Ties keep the candidate
    /// seen first, so the result only depends on the catalog order.
    pub fn evaluate(&self, anchor: Option<AnchorDate>, candidates: &[SeasonCandidate]) -> Selection {
        let Some(anchor) = anchor else {
            return Selection::NoAnchor;
        };
        if candidates.is_empty() {
            return Selection::NoCandidates;
        }

        let mut closest: Option<u32> = None;
        let mut best: Option<SeasonMatch> = None;

        for candidate in candidates {
            let Some(air_date) = candidate.air_date else {
                continue;
            };
            let difference = day_difference(anchor, air_date);
            closest = Some(closest.map_or(difference, |c| c.min(difference)));

            if !self.tolerance.allows(difference) {
                continue;
            }
            // strictly smaller: an equal distance never displaces an earlier candidate
            if best.map_or(true, |b| difference < b.day_difference) {
                best = Some(SeasonMatch {
                    season_id: candidate.season_id,
                    season_number: candidate.season_number,
                    matched_date: air_date,
                    day_difference: difference,
                });
            }
        }

        match (best, closest) {
            (Some(season), _) => Selection::Matched(season),
            (None, Some(closest_days)) => Selection::ToleranceMiss { closest_days },
            (None, None) => Selection::NoDatedCandidates,
        }
    }

    pub fn select(&self, anchor: Option<AnchorDate>, candidates: &[SeasonCandidate]) -> MatchResult {
        self.evaluate(anchor, candidates).into_match_result()
    }
}

/// Best season for `anchor` among `candidates` within `tolerance`
pub fn select_best_season(
    anchor: Option<AnchorDate>,
    candidates: &[SeasonCandidate],
    tolerance: ToleranceDays,
) -> MatchResult {
    SeasonSelector::new(tolerance).select(anchor, candidates)
}
