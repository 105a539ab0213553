mod anchor_date;
mod tolerance_days;

pub use anchor_date::AnchorDate;
pub use tolerance_days::ToleranceDays;

/// AniList media id
pub type SourceId = u32;
/// TMDB tv show id
pub type ShowId = u32;
/// TMDB season id (unique across shows)
pub type SeasonId = u32;
