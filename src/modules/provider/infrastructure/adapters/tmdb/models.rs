use serde::{Deserialize, Serialize};

/// `/tv/{id}` details, limited to the season listing
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TvShowDetails {
    pub id: u32,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub first_air_date: Option<String>,
    #[serde(default)]
    pub number_of_seasons: Option<u32>,
    #[serde(default)]
    pub seasons: Option<Vec<Season>>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Season {
    pub id: u32,
    #[serde(default)]
    pub name: Option<String>,
    pub season_number: u32,
    #[serde(default)]
    pub episode_count: Option<u32>,
    #[serde(default)]
    pub air_date: Option<String>,
}
