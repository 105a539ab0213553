mod input;
mod results_store;

pub use input::{load_ids_from_file, parse_ids};
pub use results_store::ResultsStore;
