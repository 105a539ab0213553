pub mod caching_season_catalog;

pub use caching_season_catalog::CachingSeasonCatalog;
