mod date_comparator;
mod season_selector;

pub use date_comparator::day_difference;
pub use season_selector::{select_best_season, SeasonSelector, Selection};
