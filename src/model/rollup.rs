use serde::{Deserialize, Serialize};

/// Per-champion statistics computed from the flat participant records.
///
/// Averages and maxima are `None` when no record of the group carried a
/// numeric value for the field.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ChampionRollup {
    pub champion: Option<String>,
    pub average_damage_to_champions: Option<f64>,
    pub average_damage_to_objectives: Option<f64>,
    pub average_damage_to_buildings: Option<f64>,
    pub average_kills: Option<f64>,
    pub average_deaths: Option<f64>,
    pub average_assists: Option<f64>,
    pub average_damage_taken: Option<f64>,
    pub average_heal: Option<f64>,
    pub max_damage_to_champions: Option<f64>,
    pub total_pentakills: i64,
    pub total_kills: i64,
    pub total_deaths: i64,
    pub total_assists: i64,
    pub total_minions: i64,
    pub wins: i64,
    pub total_games: i64,
    pub kda: f64,
}

/// `(kills + assists) / deaths`, or `kills + assists` when there were no deaths.
pub fn kda(kills: i64, deaths: i64, assists: i64) -> f64 {
    let takedowns = (kills + assists) as f64;
    if deaths == 0 {
        takedowns
    } else {
        takedowns / deaths as f64
    }
}
