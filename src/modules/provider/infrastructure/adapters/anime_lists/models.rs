//! Entries of the community anime-lists dump
//!
//! Ids in the dump are not consistently typed: most are numbers, some are
//! numeric strings, and a few carry placeholder values.

use serde::{Deserialize, Deserializer};
use serde_json::Value;

#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Default)]
pub struct AnimeListEntry {
    #[serde(default, deserialize_with = "lenient_id")]
    pub anilist_id: Option<u32>,
    #[serde(default, deserialize_with = "lenient_id")]
    pub themoviedb_id: Option<u32>,
}

impl AnimeListEntry {
    /// Both ids, when the entry links an AniList id to a TMDB show
    pub fn link(&self) -> Option<(u32, u32)> {
        Some((self.anilist_id?, self.themoviedb_id?))
    }
}

/// Accepts a positive number or a numeric string; anything else is absent
fn lenient_id<'de, D>(deserializer: D) -> Result<Option<u32>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<Value>::deserialize(deserializer)?;
    let id = match value {
        Some(Value::Number(n)) => n.as_u64(),
        Some(Value::String(s)) => s.trim().parse::<u64>().ok(),
        _ => None,
    };
    Ok(id
        .filter(|&id| id > 0)
        .and_then(|id| u32::try_from(id).ok()))
}
