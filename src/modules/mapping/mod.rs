/// Mapping pipeline module
///
/// Turns AniList ids into output records by chaining the three collaborator
/// ports with the season selector.
///
/// Architecture:
/// - Domain: records, per-entry status and lifecycle
/// - Application: collaborator ports and the pipeline orchestration
/// - Infrastructure: results file and id list plumbing
pub mod application;
pub mod domain;
pub mod infrastructure;

// Re-exports for easy access
pub use application::{
    pipeline::{BatchOutcome, MappingPipeline, RecordSink},
    ports::{AnchorDateProvider, AnchorInfo, SeasonCatalogProvider, ShowResolver},
};
pub use domain::{
    BatchSummary, EntryState, EntryStatus, MappedEntry, MappingRecord, UnmatchedReason,
};
pub use infrastructure::{load_ids_from_file, parse_ids, ResultsStore};
