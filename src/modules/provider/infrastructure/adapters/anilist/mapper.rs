use super::models::{Media, MediaTitle};
use crate::modules::mapping::AnchorInfo;
use crate::modules::matching::AnchorDate;
use crate::shared::errors::AppResult;

/// Maps AniList media onto what the pipeline needs from the source catalog
#[derive(Debug, Clone, Copy, Default)]
pub struct AniListMapper;

impl AniListMapper {
    pub fn new() -> Self {
        Self
    }

    /// Title and start date; an incomplete start date maps to an absent one
    pub fn map_to_anchor_info(&self, media: Media) -> AppResult<AnchorInfo> {
        let start_date = match media.start_date {
            Some(date) => AnchorDate::from_parts(date.year, date.month, date.day)?,
            None => None,
        };
        let title = media.title.as_ref().and_then(Self::display_title);

        Ok(AnchorInfo::new(title, start_date))
    }

    /// English title when there is one, romaji otherwise
    fn display_title(title: &MediaTitle) -> Option<String> {
        let pick = |value: &Option<String>| {
            value
                .as_deref()
                .map(str::trim)
                .filter(|s| !s.is_empty())
                .map(str::to_string)
        };
        pick(&title.english).or_else(|| pick(&title.romaji))
    }
}
