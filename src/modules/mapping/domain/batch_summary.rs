use super::EntryStatus;
use crate::shared::utils::LogContext;

/// Counters for one batch run
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BatchSummary {
    /// Ids handed to the batch
    pub total: usize,
    /// Entries that reached a terminal status and were recorded
    pub processed: usize,
    pub matched: usize,
    pub unmatched: usize,
    pub resolution_failed: usize,
    pub failed: usize,
    /// Stopped by cancellation before every id was processed
    pub interrupted: bool,
}

impl BatchSummary {
    pub fn new(total: usize) -> Self {
        Self {
            total,
            ..Self::default()
        }
    }

    pub fn record(&mut self, status: &EntryStatus) {
        self.processed += 1;
        match status {
            EntryStatus::Matched => self.matched += 1,
            EntryStatus::Unmatched(_) => self.unmatched += 1,
            EntryStatus::ResolutionFailed => self.resolution_failed += 1,
            EntryStatus::Failed(_) => self.failed += 1,
        }
    }

    /// Percentage of processed entries that matched a season
    pub fn match_rate(&self) -> f64 {
        LogContext::match_rate(self.matched, self.processed)
    }

    pub fn remaining(&self) -> usize {
        self.total.saturating_sub(self.processed)
    }
}
