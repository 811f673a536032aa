use mongodb::bson::{doc, Bson, Document};
use serde::Serialize;
use strum::IntoEnumIterator;
use tracing::{info, instrument};

use crate::error::Result;
use crate::model::{ChampionTransform, MatchDetail, ParticipantRecord};
use crate::store::Store;

pub const TRANSFORM_FIELD: &str = "championTransform";

/// What one reshape run did to the participant collection.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct ReshapeReport {
    /// Records written by the unwind stage.
    pub materialized: u64,
    /// Early-surrender records deleted afterwards.
    pub excluded: u64,
}

/// Flatten matches into one record per participant.
///
/// A match whose `info.participants` is missing, not an array or empty
/// contributes nothing. Array elements that are not documents are skipped.
pub fn unwind(details: &[MatchDetail]) -> Vec<ParticipantRecord> {
    details
        .iter()
        .flat_map(|detail| {
            let match_id = detail.match_id().map(str::to_owned);
            detail
                .participants()
                .unwrap_or_default()
                .iter()
                .filter_map(Bson::as_document)
                .map(move |participant| ParticipantRecord {
                    id: None,
                    match_id: match_id.clone(),
                    participant: participant.clone(),
                })
        })
        .collect()
}

/// Replace a known `championTransform` code with its label; other values stay.
pub fn recode(participant: &mut Document) {
    let label = participant
        .get(TRANSFORM_FIELD)
        .and_then(ChampionTransform::from_code);
    if let Some(label) = label {
        participant.insert(TRANSFORM_FIELD, label.to_string());
    }
}

pub fn is_early_surrender(record: &ParticipantRecord) -> bool {
    record.ended_in_early_surrender()
}

/// Unwind, materialize, recode, merge and exclude, in that order, using only
/// the primitive [`Store`] operations.
#[instrument(skip(store))]
pub async fn run<S: Store + ?Sized>(store: &S) -> Result<ReshapeReport> {
    let details = store.match_details().await?;
    let materialized = store.replace_participants(unwind(&details)).await?;

    let mut records = store.participants().await?;
    for record in &mut records {
        recode(&mut record.participant);
    }
    store.merge_participants(records).await?;

    let excluded = store.delete_early_surrenders().await?;
    info!(
        matches = details.len(),
        materialized, excluded, "reshaped participants"
    );
    Ok(ReshapeReport {
        materialized,
        excluded,
    })
}

/// Unwind raw matches into `into`, replacing its contents.
pub fn unwind_pipeline(into: &str) -> Vec<Document> {
    vec![
        // A bare `$unwind` would pass a non-array `participants` through as
        // a single row and keep scalar elements; both are dropped here so the
        // server agrees with `unwind`, which yields documents only.
        doc! { "$match": { "info.participants": { "$type": "array" } } },
        doc! { "$unwind": "$info.participants" },
        doc! { "$match": { "info.participants": { "$type": "object" } } },
        doc! {
            "$project": {
                "_id": 0,
                "matchId": "$metadata.matchId",
                "participant": "$info.participants",
            }
        },
        doc! { "$out": into },
    ]
}

/// Recode `championTransform` and merge the result back into `into` by `_id`.
pub fn recode_pipeline(into: &str) -> Vec<Document> {
    let field = format!("$participant.{TRANSFORM_FIELD}");
    let branches: Vec<Bson> = ChampionTransform::iter()
        .map(|transform| {
            Bson::Document(doc! {
                "case": { "$eq": [field.as_str(), transform.code()] },
                "then": transform.to_string(),
            })
        })
        .collect();

    let mut set = Document::new();
    set.insert(
        format!("participant.{TRANSFORM_FIELD}"),
        doc! { "$switch": { "branches": branches, "default": field.as_str() } },
    );

    vec![
        doc! { "$set": set },
        doc! {
            "$merge": {
                "into": into,
                "on": "_id",
                "whenMatched": "merge",
                "whenNotMatched": "insert",
            }
        },
    ]
}

pub fn early_surrender_filter() -> Document {
    doc! { "participant.gameEndedInEarlySurrender": true }
}
