mod batch_summary;
mod entry_status;
mod mapping_record;

pub use batch_summary::BatchSummary;
pub use entry_status::{EntryState, EntryStatus, UnmatchedReason};
pub use mapping_record::{MappedEntry, MappingRecord};
