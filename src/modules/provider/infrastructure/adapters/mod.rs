pub mod anilist;
pub mod anime_lists;
pub mod tmdb;

pub use anilist::AniListAdapter;
pub use anime_lists::AnimeListsResolver;
pub use tmdb::TmdbAdapter;
