/// Mapping pipeline
///
/// Chains the show resolver, the anchor date provider and the season catalog
/// with the season selector, one entry at a time. Entries are independent:
/// a failed entry is recorded with its status and the batch moves on.
use std::sync::Arc;

use tokio_util::sync::CancellationToken;

use crate::modules::mapping::application::ports::{
    AnchorDateProvider, SeasonCatalogProvider, ShowResolver,
};
use crate::modules::mapping::domain::{
    BatchSummary, EntryState, EntryStatus, MappedEntry, MappingRecord, UnmatchedReason,
};
use crate::modules::matching::{SeasonCandidate, SeasonSelector, Selection, ShowId, SourceId};
use crate::shared::config::PipelineConfig;
use crate::shared::errors::AppResult;
use crate::shared::utils::{LogContext, TimedOperation};
use crate::{log_debug, log_error, log_info, log_warn};

/// Receives every finished entry of a batch, in input order, as soon as it completes
pub trait RecordSink {
    fn accept(&mut self, entry: &MappedEntry) -> AppResult<()>;
}

impl RecordSink for Vec<MappedEntry> {
    fn accept(&mut self, entry: &MappedEntry) -> AppResult<()> {
        self.push(entry.clone());
        Ok(())
    }
}

/// Entries of a batch together with its counters
#[derive(Debug, Clone, Default)]
pub struct BatchOutcome {
    pub entries: Vec<MappedEntry>,
    pub summary: BatchSummary,
}

impl BatchOutcome {
    pub fn records(&self) -> impl Iterator<Item = &MappingRecord> {
        self.entries.iter().map(|e| &e.record)
    }
}

/// Orchestrates resolution, date lookup, season lookup and selection
pub struct MappingPipeline {
    resolver: Arc<dyn ShowResolver>,
    anchor_dates: Arc<dyn AnchorDateProvider>,
    season_catalog: Arc<dyn SeasonCatalogProvider>,
    selector: SeasonSelector,
    config: PipelineConfig,
}

/// Progress of one entry through the pipeline
struct EntryTrace {
    source_id: SourceId,
    state: EntryState,
    title: Option<String>,
    show_id: Option<ShowId>,
}

impl EntryTrace {
    fn new(source_id: SourceId) -> Self {
        Self {
            source_id,
            state: EntryState::Pending,
            title: None,
            show_id: None,
        }
    }

    fn advance(&mut self, next: EntryState) -> AppResult<()> {
        self.state = self.state.transition(next)?;
        log_debug!("AniList {}: {:?}", self.source_id, self.state);
        Ok(())
    }
}

impl MappingPipeline {
    pub fn new(
        resolver: Arc<dyn ShowResolver>,
        anchor_dates: Arc<dyn AnchorDateProvider>,
        season_catalog: Arc<dyn SeasonCatalogProvider>,
        config: PipelineConfig,
    ) -> Self {
        Self {
            resolver,
            anchor_dates,
            season_catalog,
            selector: SeasonSelector::new(config.tolerance),
            config,
        }
    }

    pub fn config(&self) -> &PipelineConfig {
        &self.config
    }

    /// Map one AniList id. Never fails: collaborator errors end up in the status
    pub async fn map_one(&self, source_id: SourceId) -> MappedEntry {
        let mut trace = EntryTrace::new(source_id);

        match self.run_entry(&mut trace).await {
            Ok(entry) => entry,
            Err(e) => {
                if e.is_transient() {
                    log_error!("AniList {}: mapping failed after retries: {}", source_id, e);
                } else {
                    log_error!("AniList {}: mapping failed: {}", source_id, e);
                }
                let record = MappingRecord::new(
                    source_id,
                    trace.title.take(),
                    trace.show_id,
                    Default::default(),
                );
                if !trace.state.is_terminal() {
                    let _ = trace.advance(EntryState::Failed);
                }
                MappedEntry::new(record, EntryStatus::Failed(e.to_string()))
            }
        }
    }

    /// Map a batch, collecting every entry in input order
    pub async fn map_many(
        &self,
        source_ids: &[SourceId],
        cancel: &CancellationToken,
    ) -> AppResult<BatchOutcome> {
        let mut entries = Vec::with_capacity(source_ids.len());
        let summary = self.map_many_into(source_ids, &mut entries, cancel).await?;
        Ok(BatchOutcome { entries, summary })
    }

    /// Map a batch, handing each finished entry to `sink` before starting the next.
    ///
    /// Cancellation is honoured between entries and while an entry is in
    /// flight; the in-flight entry is dropped and everything already handed to
    /// the sink stays there. Only a sink error aborts the batch.
    pub async fn map_many_into<S>(
        &self,
        source_ids: &[SourceId],
        sink: &mut S,
        cancel: &CancellationToken,
    ) -> AppResult<BatchSummary>
    where
        S: RecordSink + ?Sized,
    {
        let total = source_ids.len();
        let mut summary = BatchSummary::new(total);
        let timer = TimedOperation::new(&format!("Mapping batch of {} ids", total));

        log_info!("Starting processing of {} items", total);

        for (index, &source_id) in source_ids.iter().enumerate() {
            if index > 0
                && self.config.progress_interval > 0
                && index % self.config.progress_interval == 0
            {
                LogContext::batch_progress(index, total, summary.matched);
            }

            let entry = tokio::select! {
                biased;
                _ = cancel.cancelled() => None,
                entry = self.map_one(source_id) => Some(entry),
            };

            let Some(entry) = entry else {
                summary.interrupted = true;
                log_warn!(
                    "Processing interrupted after {}/{} items",
                    summary.processed,
                    total
                );
                break;
            };

            sink.accept(&entry)?;
            summary.record(&entry.status);
        }

        timer.finish_with_info(&format!(
            "{} matched out of {} processed",
            summary.matched, summary.processed
        ));

        Ok(summary)
    }

    async fn run_entry(&self, trace: &mut EntryTrace) -> AppResult<MappedEntry> {
        let source_id = trace.source_id;

        let Some(show_id) = self.resolver.resolve(source_id).await? else {
            trace.advance(EntryState::ResolutionFailed)?;
            log_warn!("No mapping found for AniList ID {}", source_id);
            return Ok(MappedEntry::new(
                MappingRecord::unresolved(source_id),
                EntryStatus::ResolutionFailed,
            ));
        };
        trace.show_id = Some(show_id);
        trace.advance(EntryState::Resolved)?;

        let anchor = self.anchor_dates.fetch(source_id).await?;
        trace.title = anchor.title.clone();
        trace.advance(EntryState::DateFetched)?;

        let Some(start_date) = anchor.start_date else {
            trace.advance(EntryState::Unmatched)?;
            log_warn!("No start date found for AniList ID {}", source_id);
            return Ok(self.finish(trace, Selection::NoAnchor));
        };

        log_info!(
            "Processing: {} | Date: {}",
            anchor.title.as_deref().unwrap_or("<untitled>"),
            start_date
        );

        let candidates = self.apply_specials_policy(self.season_catalog.fetch(show_id).await?);
        trace.advance(EntryState::CandidatesFetched)?;

        let selection = self.selector.evaluate(Some(start_date), &candidates);
        trace.advance(if selection.is_match() {
            EntryState::Matched
        } else {
            EntryState::Unmatched
        })?;

        match selection {
            Selection::Matched(season) => log_info!(
                "MATCH: Season {} (Season ID: {}) - {} day(s) difference",
                season.season_number,
                season.season_id,
                season.day_difference
            ),
            Selection::NoCandidates => log_info!(
                "No seasons found for TMDB ID {}. Likely a Movie/OVA.",
                show_id
            ),
            Selection::NoDatedCandidates => log_warn!(
                "TMDB ID {} lists {} season(s) but none has an air date",
                show_id,
                candidates.len()
            ),
            Selection::ToleranceMiss { closest_days } => log_warn!(
                "NO MATCH: could not match date {} in TMDB {} seasons within {} (closest {} day(s))",
                start_date,
                show_id,
                self.selector.tolerance(),
                closest_days
            ),
            Selection::NoAnchor => {}
        }

        Ok(self.finish(trace, selection))
    }

    fn finish(&self, trace: &mut EntryTrace, selection: Selection) -> MappedEntry {
        let status = match selection {
            Selection::Matched(_) => EntryStatus::Matched,
            Selection::NoAnchor => EntryStatus::Unmatched(UnmatchedReason::UnknownStartDate),
            Selection::NoCandidates => EntryStatus::Unmatched(UnmatchedReason::NoSeasonData),
            Selection::NoDatedCandidates => EntryStatus::Unmatched(UnmatchedReason::NoDatedSeasons),
            Selection::ToleranceMiss { closest_days } => {
                EntryStatus::Unmatched(UnmatchedReason::ToleranceMiss { closest_days })
            }
        };

        let record = MappingRecord::new(
            trace.source_id,
            trace.title.take(),
            trace.show_id,
            selection.into_match_result(),
        );
        MappedEntry::new(record, status)
    }

    fn apply_specials_policy(&self, candidates: Vec<SeasonCandidate>) -> Vec<SeasonCandidate> {
        if !self.config.exclude_specials {
            return candidates;
        }
        candidates.into_iter().filter(|c| !c.is_specials()).collect()
    }
}
