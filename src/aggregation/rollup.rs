use std::collections::BTreeMap;

use mongodb::bson::{self, doc, Bson, Document};

use crate::aggregation::{as_count, as_number};
use crate::error::Result;
use crate::model::{kda, ChampionRollup, ParticipantRecord};

/// Averaged participant fields, as `(output, participant field)`.
const AVERAGES: [(&str, &str); 8] = [
    ("average_damage_to_champions", "totalDamageDealtToChampions"),
    ("average_damage_to_objectives", "damageDealtToObjectives"),
    ("average_damage_to_buildings", "damageDealtToBuildings"),
    ("average_kills", "kills"),
    ("average_deaths", "deaths"),
    ("average_assists", "assists"),
    ("average_damage_taken", "totalDamageTaken"),
    ("average_heal", "totalHeal"),
];

/// Summed participant fields, as `(output, participant field)`.
const TOTALS: [(&str, &str); 5] = [
    ("total_pentakills", "pentaKills"),
    ("total_kills", "kills"),
    ("total_deaths", "deaths"),
    ("total_assists", "assists"),
    ("total_minions", "totalMinionsKilled"),
];

const MAX_DAMAGE: (&str, &str) = ("max_damage_to_champions", "totalDamageDealtToChampions");

#[derive(Debug, Default, Clone, Copy)]
struct Mean {
    sum: f64,
    count: u32,
}

impl Mean {
    fn push(&mut self, value: Option<f64>) {
        if let Some(value) = value {
            self.sum += value;
            self.count += 1;
        }
    }

    fn value(self) -> Option<f64> {
        (self.count > 0).then(|| self.sum / f64::from(self.count))
    }
}

#[derive(Debug, Default)]
struct Group {
    averages: [Mean; AVERAGES.len()],
    totals: [i64; TOTALS.len()],
    max_damage: Option<f64>,
    wins: i64,
    games: i64,
}

impl Group {
    fn push(&mut self, record: &ParticipantRecord) {
        for (mean, (_, field)) in self.averages.iter_mut().zip(AVERAGES) {
            mean.push(as_number(record.field(field)));
        }
        for (total, (_, field)) in self.totals.iter_mut().zip(TOTALS) {
            *total += as_count(record.field(field));
        }
        if let Some(damage) = as_number(record.field(MAX_DAMAGE.1)) {
            self.max_damage = Some(self.max_damage.map_or(damage, |max| max.max(damage)));
        }
        if record.is_win() {
            self.wins += 1;
        }
        self.games += 1;
    }

    fn finish(self, champion: Option<String>) -> ChampionRollup {
        let [damage_to_champions, damage_to_objectives, damage_to_buildings, kills, deaths, assists, damage_taken, heal] =
            self.averages.map(Mean::value);
        let [total_pentakills, total_kills, total_deaths, total_assists, total_minions] = self.totals;
        ChampionRollup {
            champion,
            average_damage_to_champions: damage_to_champions,
            average_damage_to_objectives: damage_to_objectives,
            average_damage_to_buildings: damage_to_buildings,
            average_kills: kills,
            average_deaths: deaths,
            average_assists: assists,
            average_damage_taken: damage_taken,
            average_heal: heal,
            max_damage_to_champions: self.max_damage,
            total_pentakills,
            total_kills,
            total_deaths,
            total_assists,
            total_minions,
            wins: self.wins,
            total_games: self.games,
            kda: kda(total_kills, total_deaths, total_assists),
        }
    }
}

/// Group participant records by champion name, ordered by name.
///
/// Records without a champion name form a single group keyed by `None`,
/// which sorts first.
pub fn rollup(records: &[ParticipantRecord]) -> Vec<ChampionRollup> {
    let mut groups: BTreeMap<Option<&str>, Group> = BTreeMap::new();
    for record in records {
        groups.entry(record.champion_name()).or_default().push(record);
    }
    groups
        .into_iter()
        .map(|(champion, group)| group.finish(champion.map(str::to_owned)))
        .collect()
}

/// BSON types `as_number` and `as_count` accept.
const NUMERIC_TYPES: [&str; 3] = ["int", "long", "double"];

/// `field` when it holds a number, `fallback` otherwise, so the server
/// accumulators skip the same values the in-process ones do.
fn numeric_or(field: &str, fallback: Bson) -> Document {
    doc! {
        "$cond": [
            { "$in": [{ "$type": field }, NUMERIC_TYPES.to_vec()] },
            field,
            fallback,
        ]
    }
}

/// The rollup as a server-side pipeline over the participant collection.
///
/// Non-numeric inputs are nulled before `$avg`/`$max` and zeroed before
/// `$sum`, and totals are truncated to longs, so every output row decodes
/// into [`ChampionRollup`].
pub fn rollup_pipeline() -> Vec<Document> {
    let mut group = doc! { "_id": "$participant.championName" };
    for (output, field) in AVERAGES {
        let field = format!("$participant.{field}");
        group.insert(output, doc! { "$avg": numeric_or(&field, Bson::Null) });
    }
    let max_field = format!("$participant.{}", MAX_DAMAGE.1);
    group.insert(
        MAX_DAMAGE.0,
        doc! { "$max": numeric_or(&max_field, Bson::Null) },
    );
    for (output, field) in TOTALS {
        let field = format!("$participant.{field}");
        group.insert(
            output,
            doc! { "$sum": { "$toLong": numeric_or(&field, Bson::Int64(0)) } },
        );
    }
    group.insert(
        "wins",
        doc! { "$sum": { "$cond": [{ "$eq": ["$participant.win", true] }, 1, 0] } },
    );
    group.insert("total_games", doc! { "$sum": 1 });

    vec![
        doc! { "$group": group },
        doc! {
            "$addFields": {
                "kda": {
                    "$cond": [
                        { "$eq": ["$total_deaths", 0] },
                        { "$add": ["$total_kills", "$total_assists"] },
                        { "$divide": [{ "$add": ["$total_kills", "$total_assists"] }, "$total_deaths"] },
                    ]
                }
            }
        },
        doc! { "$set": { "champion": "$_id" } },
        doc! { "$unset": "_id" },
        doc! { "$sort": { "champion": 1 } },
    ]
}

/// Decode one output row of [`rollup_pipeline`].
pub fn decode_row(document: Document) -> Result<ChampionRollup> {
    Ok(bson::from_document(document)?)
}
