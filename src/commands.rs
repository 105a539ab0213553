//! Command handlers behind the CLI
//!
//! Each handler takes already-built services so the binary stays a thin
//! argument parser.

use std::path::Path;

use tokio_util::sync::CancellationToken;

use crate::modules::mapping::{
    load_ids_from_file, BatchSummary, MappedEntry, MappingPipeline, ResultsStore,
};
use crate::modules::matching::SourceId;
use crate::shared::errors::AppResult;
use crate::Services;

/// Map `source_ids` into the results file at `output`, skipping ids it already holds
pub async fn map_into_results(
    pipeline: &MappingPipeline,
    source_ids: &[SourceId],
    output: &Path,
    cancel: &CancellationToken,
) -> AppResult<BatchSummary> {
    let mut store = ResultsStore::open(output)?;
    let pending = store.filter_unprocessed(source_ids);

    let skipped = source_ids.len() - pending.len();
    if skipped > 0 {
        log::info!(
            "Skipping {} ids already present in {}",
            skipped,
            store.path().display()
        );
    }
    if pending.is_empty() {
        log::info!("Nothing to do, every id is already mapped");
        return Ok(BatchSummary::new(0));
    }

    let summary = pipeline
        .map_many_into(&pending, &mut store, cancel)
        .await?;

    log::info!(
        "Finished: {}/{} processed, {} matched ({:.1}%), results in {}",
        summary.processed,
        summary.total,
        summary.matched,
        summary.match_rate(),
        store.path().display()
    );
    Ok(summary)
}

/// Map every id listed in `input`
pub async fn map_file(
    services: &Services,
    input: &Path,
    output: &Path,
    cancel: &CancellationToken,
) -> AppResult<BatchSummary> {
    let ids = load_ids_from_file(input)?;
    log::info!("Read {} ids from {}", ids.len(), input.display());
    map_into_results(&services.pipeline, &ids, output, cancel).await
}

/// Map every AniList id the base mapping links to a TMDB show
pub async fn map_all(
    services: &Services,
    output: &Path,
    cancel: &CancellationToken,
) -> AppResult<BatchSummary> {
    let ids = services.resolver.all_source_ids().await?;
    log::info!("Base mapping lists {} AniList ids", ids.len());
    map_into_results(&services.pipeline, &ids, output, cancel).await
}

/// Map a single id without touching any results file
pub async fn map_single(services: &Services, source_id: SourceId) -> MappedEntry {
    let entry = services.pipeline.map_one(source_id).await;
    log::info!("AniList {}: {}", source_id, entry.status);
    entry
}
