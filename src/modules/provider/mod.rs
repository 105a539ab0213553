/// Remote collaborators of the mapping pipeline
///
/// HTTP adapters for AniList, TMDB and the anime-lists dump, behind the ports
/// declared by the mapping module.
pub mod infrastructure;

pub use infrastructure::{
    AniListAdapter, AnimeListsResolver, CachingSeasonCatalog, RateLimitClient, TmdbAdapter,
};
