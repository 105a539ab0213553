use std::fmt;

use crate::shared::errors::{AppError, AppResult};

/// Why an entry that reached the season catalog has no season
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UnmatchedReason {
    /// The source catalog has no complete start date
    UnknownStartDate,
    /// The target show has no seasons (movie/OVA)
    NoSeasonData,
    /// Seasons exist but none has an air date
    NoDatedSeasons,
    /// The closest season is further away than the tolerance
    ToleranceMiss { closest_days: u32 },
}

impl fmt::Display for UnmatchedReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            UnmatchedReason::UnknownStartDate => write!(f, "unknown start date"),
            UnmatchedReason::NoSeasonData => write!(f, "no season data"),
            UnmatchedReason::NoDatedSeasons => write!(f, "no dated seasons"),
            UnmatchedReason::ToleranceMiss { closest_days } => {
                write!(f, "tolerance miss (closest {} day(s))", closest_days)
            }
        }
    }
}

/// Terminal status of one entry
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EntryStatus {
    Matched,
    Unmatched(UnmatchedReason),
    /// The id is absent from the base mapping
    ResolutionFailed,
    /// A collaborator call failed after its retries
    Failed(String),
}

impl EntryStatus {
    pub fn state(&self) -> EntryState {
        match self {
            EntryStatus::Matched => EntryState::Matched,
            EntryStatus::Unmatched(_) => EntryState::Unmatched,
            EntryStatus::ResolutionFailed => EntryState::ResolutionFailed,
            EntryStatus::Failed(_) => EntryState::Failed,
        }
    }

    pub fn is_match(&self) -> bool {
        matches!(self, EntryStatus::Matched)
    }
}

impl fmt::Display for EntryStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            EntryStatus::Matched => write!(f, "matched"),
            EntryStatus::Unmatched(reason) => write!(f, "unmatched: {}", reason),
            EntryStatus::ResolutionFailed => write!(f, "resolution failed"),
            EntryStatus::Failed(message) => write!(f, "failed: {}", message),
        }
    }
}

/// Lifecycle of one entry while the pipeline works on it.
///
/// `Pending -> Resolved | ResolutionFailed -> DateFetched -> CandidatesFetched
/// -> Matched | Unmatched`; `Failed` is reachable from every non-terminal
/// state and an entry without a start date ends `Unmatched` right after
/// `DateFetched`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EntryState {
    Pending,
    Resolved,
    ResolutionFailed,
    DateFetched,
    CandidatesFetched,
    Matched,
    Unmatched,
    Failed,
}

impl EntryState {
    pub fn is_terminal(&self) -> bool {
        matches!(
            self,
            EntryState::ResolutionFailed
                | EntryState::Matched
                | EntryState::Unmatched
                | EntryState::Failed
        )
    }

    pub fn can_transition_to(&self, next: EntryState) -> bool {
        use EntryState::*;

        match (self, next) {
            (Pending, Resolved | ResolutionFailed) => true,
            (Resolved, DateFetched) => true,
            (DateFetched, CandidatesFetched | Unmatched) => true,
            (CandidatesFetched, Matched | Unmatched) => true,
            (state, Failed) => !state.is_terminal(),
            _ => false,
        }
    }

    /// Move to `next`, refusing backward or skipping transitions
    pub fn transition(self, next: EntryState) -> AppResult<EntryState> {
        if self.can_transition_to(next) {
            Ok(next)
        } else {
            Err(AppError::InternalError(format!(
                "Illegal entry transition {:?} -> {:?}",
                self, next
            )))
        }
    }
}
