//! AniList GraphQL queries

/// Start date and titles of one anime
pub const MEDIA_START_DATE_QUERY: &str = r#"
query ($id: Int) {
  Media(id: $id, type: ANIME) {
    id
    format
    startDate {
      year
      month
      day
    }
    title {
      romaji
      english
    }
  }
}
"#;
