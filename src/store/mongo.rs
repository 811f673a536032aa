use async_trait::async_trait;
use futures::TryStreamExt;
use mongodb::bson::{doc, Bson, Document};
use mongodb::{Client, Collection, Database};
use tracing::{debug, info, instrument};

use crate::aggregation::reshape::{early_surrender_filter, recode_pipeline, unwind_pipeline};
use crate::aggregation::rollup::{decode_row, rollup_pipeline};
use crate::aggregation::ReshapeReport;
use crate::error::Result;
use crate::model::{ChampionRollup, MatchDetail, MatchIdBatch, ParticipantRecord, PlayerEntry};
use crate::store::{Store, MATCH_DETAILS, MATCH_IDS, PARTICIPANTS, PLAYERS};

/// A [`Store`] backed by one MongoDB database.
///
/// Open it once per process with [`MongoStore::connect`], hand references to
/// the components that need it and finish with [`MongoStore::close`].
#[derive(Debug, Clone)]
pub struct MongoStore {
    client: Client,
    db: Database,
}

impl MongoStore {
    #[instrument(skip(uri))]
    pub async fn connect(uri: &str, database: &str) -> Result<Self> {
        let client = Client::with_uri_str(uri).await?;
        info!(database, "connected to document store");
        Ok(Self {
            db: client.database(database),
            client,
        })
    }

    /// Close the connection pool, waiting for in-flight operations.
    pub async fn close(self) {
        self.client.shutdown().await;
        debug!("document store connection closed");
    }

    fn players(&self) -> Collection<PlayerEntry> {
        self.db.collection(PLAYERS)
    }

    fn match_ids(&self) -> Collection<MatchIdBatch> {
        self.db.collection(MATCH_IDS)
    }

    fn match_details_collection(&self) -> Collection<MatchDetail> {
        self.db.collection(MATCH_DETAILS)
    }

    fn participants_collection(&self) -> Collection<ParticipantRecord> {
        self.db.collection(PARTICIPANTS)
    }

    async fn distinct_strings<T: Send + Sync>(
        collection: Collection<T>,
        field: &str,
    ) -> Result<Vec<String>> {
        let values = collection.distinct(field, doc! {}).await?;
        Ok(values
            .into_iter()
            .filter_map(|value| match value {
                Bson::String(value) => Some(value),
                _ => None,
            })
            .collect())
    }
}

#[async_trait]
impl Store for MongoStore {
    async fn insert_players(&self, players: &[PlayerEntry]) -> Result<()> {
        if players.is_empty() {
            return Ok(());
        }
        self.players().insert_many(players).await?;
        Ok(())
    }

    async fn distinct_puuids(&self) -> Result<Vec<String>> {
        Self::distinct_strings(self.players(), "puuid").await
    }

    async fn insert_match_batch(&self, batch: &MatchIdBatch) -> Result<()> {
        self.match_ids().insert_one(batch).await?;
        Ok(())
    }

    async fn distinct_match_ids(&self) -> Result<Vec<String>> {
        Self::distinct_strings(self.match_ids(), "matches").await
    }

    async fn insert_match_detail(&self, detail: &MatchDetail) -> Result<()> {
        self.match_details_collection().insert_one(detail).await?;
        Ok(())
    }

    async fn match_details(&self) -> Result<Vec<MatchDetail>> {
        let cursor = self.match_details_collection().find(doc! {}).await?;
        Ok(cursor.try_collect().await?)
    }

    async fn replace_participants(&self, records: Vec<ParticipantRecord>) -> Result<u64> {
        let collection = self.participants_collection();
        collection.drop().await?;
        if records.is_empty() {
            return Ok(0);
        }
        let result = collection.insert_many(records).await?;
        Ok(result.inserted_ids.len() as u64)
    }

    async fn participants(&self) -> Result<Vec<ParticipantRecord>> {
        let cursor = self.participants_collection().find(doc! {}).await?;
        Ok(cursor.try_collect().await?)
    }

    async fn merge_participants(&self, records: Vec<ParticipantRecord>) -> Result<()> {
        let collection = self.participants_collection();
        for record in records {
            match record.id {
                Some(id) => {
                    let mut update = doc! { "participant": record.participant };
                    if let Some(match_id) = record.match_id {
                        update.insert("matchId", match_id);
                    }
                    collection
                        .update_one(doc! { "_id": id }, doc! { "$set": update })
                        .upsert(true)
                        .await?;
                }
                None => {
                    collection.insert_one(record).await?;
                }
            }
        }
        Ok(())
    }

    async fn delete_early_surrenders(&self) -> Result<u64> {
        let result = self
            .participants_collection()
            .delete_many(early_surrender_filter())
            .await?;
        Ok(result.deleted_count)
    }

    /// Runs the reshape as server-side pipelines; the participant documents
    /// never leave the database.
    #[instrument(skip(self))]
    async fn reshape(&self) -> Result<ReshapeReport> {
        self.db
            .collection::<Document>(MATCH_DETAILS)
            .aggregate(unwind_pipeline(PARTICIPANTS))
            .await?;
        let participants = self.db.collection::<Document>(PARTICIPANTS);
        let materialized = participants.count_documents(doc! {}).await?;

        participants
            .aggregate(recode_pipeline(PARTICIPANTS))
            .await?;
        let excluded = self.delete_early_surrenders().await?;

        info!(materialized, excluded, "reshaped participants");
        Ok(ReshapeReport {
            materialized,
            excluded,
        })
    }

    #[instrument(skip(self))]
    async fn rollup(&self) -> Result<Vec<ChampionRollup>> {
        let documents: Vec<Document> = self
            .db
            .collection::<Document>(PARTICIPANTS)
            .aggregate(rollup_pipeline())
            .await?
            .try_collect()
            .await?;
        let rows = documents
            .into_iter()
            .map(decode_row)
            .collect::<Result<Vec<_>>>()?;
        debug!(count = rows.len(), "computed champion rollup");
        Ok(rows)
    }
}
