//! Read-only views over the champion rollup.

mod render;
mod server;

pub use server::{router, serve};

use std::cmp::Ordering;

use serde::Serialize;
use strum::IntoEnumIterator;
use strum_macros::{Display, EnumIter};

use crate::error::Result;
use crate::model::ChampionRollup;
use crate::store::Store;

/// A rollup column that can be charted or ranked.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Display, EnumIter,
)]
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "snake_case")]
pub enum Metric {
    AverageDamageToChampions,
    AverageDamageToObjectives,
    AverageDamageToBuildings,
    AverageKills,
    AverageDeaths,
    AverageAssists,
    AverageDamageTaken,
    AverageHeal,
    MaxDamageToChampions,
    TotalPentakills,
    TotalKills,
    TotalDeaths,
    TotalAssists,
    TotalMinions,
    Wins,
    TotalGames,
    Kda,
}

impl Metric {
    pub fn value(self, row: &ChampionRollup) -> Option<f64> {
        match self {
            Self::AverageDamageToChampions => row.average_damage_to_champions,
            Self::AverageDamageToObjectives => row.average_damage_to_objectives,
            Self::AverageDamageToBuildings => row.average_damage_to_buildings,
            Self::AverageKills => row.average_kills,
            Self::AverageDeaths => row.average_deaths,
            Self::AverageAssists => row.average_assists,
            Self::AverageDamageTaken => row.average_damage_taken,
            Self::AverageHeal => row.average_heal,
            Self::MaxDamageToChampions => row.max_damage_to_champions,
            Self::TotalPentakills => Some(row.total_pentakills as f64),
            Self::TotalKills => Some(row.total_kills as f64),
            Self::TotalDeaths => Some(row.total_deaths as f64),
            Self::TotalAssists => Some(row.total_assists as f64),
            Self::TotalMinions => Some(row.total_minions as f64),
            Self::Wins => Some(row.wins as f64),
            Self::TotalGames => Some(row.total_games as f64),
            Self::Kda => Some(row.kda),
        }
    }

    pub const fn label(self) -> &'static str {
        match self {
            Self::AverageDamageToChampions => "Avg damage to champions",
            Self::AverageDamageToObjectives => "Avg damage to objectives",
            Self::AverageDamageToBuildings => "Avg damage to buildings",
            Self::AverageKills => "Avg kills",
            Self::AverageDeaths => "Avg deaths",
            Self::AverageAssists => "Avg assists",
            Self::AverageDamageTaken => "Avg damage taken",
            Self::AverageHeal => "Avg heal",
            Self::MaxDamageToChampions => "Max damage to champions",
            Self::TotalPentakills => "Pentakills",
            Self::TotalKills => "Kills",
            Self::TotalDeaths => "Deaths",
            Self::TotalAssists => "Assists",
            Self::TotalMinions => "Minions killed",
            Self::Wins => "Wins",
            Self::TotalGames => "Games",
            Self::Kda => "KDA",
        }
    }

    /// Every metric, in table column order.
    pub fn all() -> impl Iterator<Item = Self> {
        Self::iter()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum SortOrder {
    Ascending,
    Descending,
}

/// One labelled value of a bar chart or leaderboard.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Bar {
    pub label: String,
    pub value: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Leaderboard {
    pub title: String,
    pub metric: Metric,
    pub order: SortOrder,
    pub entries: Vec<Bar>,
}

/// Share of won games, as the two slices of a pie.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct WinRate {
    pub wins: i64,
    pub losses: i64,
    /// Wins over games, rounded to two decimals.
    pub ratio: f64,
}

impl WinRate {
    fn of(row: &ChampionRollup) -> Self {
        Self {
            wins: row.wins,
            losses: row.total_games - row.wins,
            ratio: round2(row.wins as f64 / row.total_games as f64),
        }
    }
}

/// Everything the detail view shows for one champion.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ChampionDetail {
    pub rollup: ChampionRollup,
    pub cards: Vec<Bar>,
    pub win_rate: WinRate,
    pub stats: Vec<Bar>,
    pub leaderboards: Vec<Leaderboard>,
}

#[derive(Debug, Clone, PartialEq)]
pub enum ChampionLookup {
    Found(Box<ChampionDetail>),
    /// No rollup row, or a row without games.
    NoData,
}

const CARD_METRICS: [Metric; 8] = [
    Metric::Wins,
    Metric::TotalGames,
    Metric::Kda,
    Metric::TotalKills,
    Metric::TotalDeaths,
    Metric::TotalAssists,
    Metric::TotalMinions,
    Metric::TotalPentakills,
];

const STAT_METRICS: [Metric; 3] = [
    Metric::AverageDamageToChampions,
    Metric::AverageDamageTaken,
    Metric::AverageHeal,
];

const LEADERBOARD_SIZE: usize = 5;

/// The rollup, loaded once and queried in memory.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RollupTable {
    rows: Vec<ChampionRollup>,
}

impl RollupTable {
    pub fn new(rows: Vec<ChampionRollup>) -> Self {
        Self { rows }
    }

    pub async fn load<S: Store + ?Sized>(store: &S) -> Result<Self> {
        Ok(Self::new(store.rollup().await?))
    }

    pub fn rows(&self) -> &[ChampionRollup] {
        &self.rows
    }

    /// Champion names in alphabetical order.
    pub fn champions(&self) -> Vec<&str> {
        let mut names: Vec<&str> = self
            .rows
            .iter()
            .filter_map(|row| row.champion.as_deref())
            .collect();
        names.sort_unstable();
        names
    }

    pub fn get(&self, champion: &str) -> Option<&ChampionRollup> {
        self.rows
            .iter()
            .find(|row| row.champion.as_deref() == Some(champion))
    }

    pub fn lookup(&self, champion: &str) -> ChampionLookup {
        match self.get(champion) {
            Some(row) if row.total_games > 0 => {
                ChampionLookup::Found(Box::new(self.detail(row)))
            }
            _ => ChampionLookup::NoData,
        }
    }

    /// The `n` named champions with the highest (or lowest) `metric`.
    /// Rows without a value for the metric come last either way.
    pub fn leaderboard(&self, metric: Metric, n: usize, order: SortOrder) -> Leaderboard {
        let mut ranked: Vec<(&str, Option<f64>)> = self
            .rows
            .iter()
            .filter_map(|row| Some((row.champion.as_deref()?, metric.value(row))))
            .collect();
        ranked.sort_by(|(_, a), (_, b)| match (a, b) {
            (Some(a), Some(b)) => match order {
                SortOrder::Ascending => a.total_cmp(b),
                SortOrder::Descending => b.total_cmp(a),
            },
            (Some(_), None) => Ordering::Less,
            (None, Some(_)) => Ordering::Greater,
            (None, None) => Ordering::Equal,
        });

        let direction = match order {
            SortOrder::Ascending => "lowest",
            SortOrder::Descending => "highest",
        };
        Leaderboard {
            title: format!("Top {n} champions by {} ({direction})", metric.label()),
            metric,
            order,
            entries: ranked
                .into_iter()
                .take(n)
                .map(|(champion, value)| Bar {
                    label: champion.to_owned(),
                    value: value.unwrap_or_default(),
                })
                .collect(),
        }
    }

    fn detail(&self, row: &ChampionRollup) -> ChampionDetail {
        let bars = |metrics: &[Metric]| -> Vec<Bar> {
            metrics
                .iter()
                .map(|metric| Bar {
                    label: metric.label().to_owned(),
                    value: metric.value(row).unwrap_or_default(),
                })
                .collect()
        };

        let mut cards = bars(&CARD_METRICS);
        for card in &mut cards {
            card.value = round2(card.value);
        }

        ChampionDetail {
            rollup: row.clone(),
            cards,
            win_rate: WinRate::of(row),
            stats: bars(&STAT_METRICS),
            leaderboards: vec![
                self.leaderboard(Metric::TotalPentakills, LEADERBOARD_SIZE, SortOrder::Descending),
                self.leaderboard(
                    Metric::AverageDamageToChampions,
                    LEADERBOARD_SIZE,
                    SortOrder::Descending,
                ),
            ],
        }
    }
}

fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

#[cfg(test)]
pub(crate) mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    pub(crate) fn row(champion: &str, wins: i64, games: i64, pentas: i64, damage: f64) -> ChampionRollup {
        ChampionRollup {
            champion: Some(champion.to_owned()),
            average_damage_to_champions: Some(damage),
            average_damage_taken: Some(damage / 2.0),
            average_heal: None,
            total_pentakills: pentas,
            total_kills: 10,
            total_deaths: 3,
            total_assists: 7,
            wins,
            total_games: games,
            kda: 17.0 / 3.0,
            ..Default::default()
        }
    }

    pub(crate) fn table() -> RollupTable {
        RollupTable::new(vec![
            row("Zed", 3, 4, 1, 21_000.0),
            row("Ahri", 1, 3, 0, 18_500.0),
            row("Kayn", 0, 0, 2, 0.0),
            ChampionRollup {
                champion: None,
                total_games: 2,
                ..Default::default()
            },
            row("Lux", 2, 2, 4, 25_000.0),
        ])
    }

    #[test]
    fn champions_are_alphabetical_and_named() {
        assert_eq!(table().champions(), vec!["Ahri", "Kayn", "Lux", "Zed"]);
    }

    #[test]
    fn unknown_and_gameless_champions_have_no_data() {
        let table = table();

        assert_eq!(table.lookup("Teemo"), ChampionLookup::NoData);
        assert_eq!(table.lookup("Kayn"), ChampionLookup::NoData);
        assert_eq!(RollupTable::default().lookup("Zed"), ChampionLookup::NoData);
    }

    #[test]
    fn detail_carries_win_rate_cards_and_stats() {
        let ChampionLookup::Found(detail) = table().lookup("Zed") else {
            panic!("expected Zed to be found");
        };

        assert_eq!(
            detail.win_rate,
            WinRate {
                wins: 3,
                losses: 1,
                ratio: 0.75
            }
        );
        let kda = detail.cards.iter().find(|c| c.label == "KDA").unwrap();
        assert_eq!(kda.value, 5.67);
        assert_eq!(
            detail.stats,
            vec![
                Bar {
                    label: "Avg damage to champions".to_owned(),
                    value: 21_000.0
                },
                Bar {
                    label: "Avg damage taken".to_owned(),
                    value: 10_500.0
                },
                Bar {
                    label: "Avg heal".to_owned(),
                    value: 0.0
                },
            ]
        );
        assert_eq!(detail.leaderboards.len(), 2);
    }

    #[test]
    fn leaderboards_sort_both_ways() {
        let table = table();

        let top = table.leaderboard(Metric::TotalPentakills, 2, SortOrder::Descending);
        let names: Vec<_> = top.entries.iter().map(|e| e.label.as_str()).collect();
        assert_eq!(names, vec!["Lux", "Kayn"]);

        let bottom = table.leaderboard(Metric::AverageDamageToChampions, 5, SortOrder::Ascending);
        let names: Vec<_> = bottom.entries.iter().map(|e| e.label.as_str()).collect();
        assert_eq!(names, vec!["Kayn", "Ahri", "Zed", "Lux"]);
    }

    #[test]
    fn missing_metric_values_sort_last() {
        let mut rows = table().rows().to_vec();
        rows[0].average_heal = Some(300.0);
        let table = RollupTable::new(rows);

        for order in [SortOrder::Ascending, SortOrder::Descending] {
            let board = table.leaderboard(Metric::AverageHeal, 10, order);
            assert_eq!(board.entries[0].label, "Zed");
            assert_eq!(board.entries.len(), 4);
        }
    }

    #[test]
    fn metric_names_match_rollup_fields() {
        assert_eq!(Metric::TotalPentakills.to_string(), "total_pentakills");
        assert_eq!(
            Metric::AverageDamageToChampions.to_string(),
            "average_damage_to_champions"
        );
        assert_eq!(Metric::all().count(), 17);
    }
}
