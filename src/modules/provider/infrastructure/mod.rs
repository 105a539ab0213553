pub mod adapters;
pub mod decorators;
pub mod http_client;

pub use adapters::{AniListAdapter, AnimeListsResolver, TmdbAdapter};
pub use decorators::CachingSeasonCatalog;
pub use http_client::{RateLimitClient, RetryPolicy};
