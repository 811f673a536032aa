use serde::{Deserialize, Serialize};

/// A single entry of an apex-tier league listing.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PlayerEntry {
    pub puuid: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub summoner_id: Option<String>,
    pub league_points: i32,
    #[serde(default)]
    pub rank: String,
    pub wins: i32,
    pub losses: i32,
    #[serde(default)]
    pub veteran: bool,
    #[serde(default)]
    pub inactive: bool,
    #[serde(default)]
    pub fresh_blood: bool,
    #[serde(default)]
    pub hot_streak: bool,
}

/// League listing as returned by the vendor; only the entries are kept.
#[derive(Debug, Clone, Default, Deserialize)]
pub(crate) struct LeagueList {
    #[serde(default)]
    pub entries: Vec<PlayerEntry>,
}
