use serde::{Deserialize, Serialize};
use strum_macros::{Display, EnumString};

/// Platform routing value used by the league endpoints (`{platform}.api.riotgames.com`).
#[derive(
    Debug, Default, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Display, EnumString,
)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase", ascii_case_insensitive)]
pub enum Platform {
    Br1,
    Eun1,
    Euw1,
    Jp1,
    Kr,
    La1,
    La2,
    Me1,
    Na1,
    Oc1,
    Ph2,
    Ru,
    Sg2,
    Th2,
    Tr1,
    Tw2,
    #[default]
    Vn2,
}

/// Regional routing value used by the match endpoints.
#[derive(
    Debug, Default, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Display, EnumString,
)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase", ascii_case_insensitive)]
pub enum RegionalRoute {
    Americas,
    Asia,
    Europe,
    #[default]
    Sea,
}

/// Apex ranked tiers that expose a full league listing.
#[derive(
    Debug, Default, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Display, EnumString,
)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase", ascii_case_insensitive)]
pub enum Tier {
    #[default]
    Challenger,
    Grandmaster,
    Master,
}

/// Ranked matchmaking queue.
#[derive(
    Debug, Default, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Display, EnumString,
)]
pub enum RankedQueue {
    #[default]
    #[serde(rename = "RANKED_SOLO_5x5")]
    #[strum(serialize = "RANKED_SOLO_5x5")]
    RankedSolo5x5,
    #[serde(rename = "RANKED_FLEX_SR")]
    #[strum(serialize = "RANKED_FLEX_SR")]
    RankedFlexSr,
}

impl RankedQueue {
    /// Numeric queue id the match endpoints filter on.
    pub const fn queue_id(self) -> i32 {
        match self {
            Self::RankedSolo5x5 => 420,
            Self::RankedFlexSr => 440,
        }
    }
}

/// Match type filter for the match-id listing.
#[derive(
    Debug, Default, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Display, EnumString,
)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase", ascii_case_insensitive)]
pub enum MatchType {
    #[default]
    Ranked,
    Normal,
    Tourney,
    Tutorial,
}
