use async_trait::async_trait;
use itertools::Itertools;
use mongodb::bson::oid::ObjectId;
use tokio::sync::Mutex;

use crate::aggregation::reshape::is_early_surrender;
use crate::error::Result;
use crate::model::{MatchDetail, MatchIdBatch, ParticipantRecord, PlayerEntry};
use crate::store::Store;

/// A [`Store`] kept entirely in memory.
#[derive(Debug, Default)]
pub struct MemoryStore {
    collections: Mutex<Collections>,
}

#[derive(Debug, Default)]
struct Collections {
    players: Vec<PlayerEntry>,
    match_ids: Vec<MatchIdBatch>,
    match_details: Vec<MatchDetail>,
    participants: Vec<ParticipantRecord>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Seed the raw match-detail collection.
    pub fn with_match_details(details: impl IntoIterator<Item = MatchDetail>) -> Self {
        Self {
            collections: Mutex::new(Collections {
                match_details: details.into_iter().collect(),
                ..Default::default()
            }),
        }
    }

    pub async fn players(&self) -> Vec<PlayerEntry> {
        self.collections.lock().await.players.clone()
    }

    pub async fn match_batches(&self) -> Vec<MatchIdBatch> {
        self.collections.lock().await.match_ids.clone()
    }
}

#[async_trait]
impl Store for MemoryStore {
    async fn insert_players(&self, players: &[PlayerEntry]) -> Result<()> {
        self.collections
            .lock()
            .await
            .players
            .extend_from_slice(players);
        Ok(())
    }

    async fn distinct_puuids(&self) -> Result<Vec<String>> {
        let collections = self.collections.lock().await;
        Ok(collections
            .players
            .iter()
            .map(|p| p.puuid.clone())
            .unique()
            .collect())
    }

    async fn insert_match_batch(&self, batch: &MatchIdBatch) -> Result<()> {
        self.collections.lock().await.match_ids.push(batch.clone());
        Ok(())
    }

    async fn distinct_match_ids(&self) -> Result<Vec<String>> {
        let collections = self.collections.lock().await;
        Ok(collections
            .match_ids
            .iter()
            .flat_map(|b| b.matches.iter().cloned())
            .unique()
            .collect())
    }

    async fn insert_match_detail(&self, detail: &MatchDetail) -> Result<()> {
        self.collections
            .lock()
            .await
            .match_details
            .push(detail.clone());
        Ok(())
    }

    async fn match_details(&self) -> Result<Vec<MatchDetail>> {
        Ok(self.collections.lock().await.match_details.clone())
    }

    async fn replace_participants(&self, records: Vec<ParticipantRecord>) -> Result<u64> {
        let records = records
            .into_iter()
            .map(|mut record| {
                record.id.get_or_insert_with(ObjectId::new);
                record
            })
            .collect_vec();
        let written = records.len() as u64;
        self.collections.lock().await.participants = records;
        Ok(written)
    }

    async fn participants(&self) -> Result<Vec<ParticipantRecord>> {
        Ok(self.collections.lock().await.participants.clone())
    }

    async fn merge_participants(&self, records: Vec<ParticipantRecord>) -> Result<()> {
        let mut collections = self.collections.lock().await;
        for mut record in records {
            let position = record
                .id
                .and_then(|id| collections.participants.iter().position(|p| p.id == Some(id)));
            match position {
                Some(index) => {
                    let existing = &mut collections.participants[index];
                    if record.match_id.is_some() {
                        existing.match_id = record.match_id;
                    }
                    existing.participant = record.participant;
                }
                None => {
                    record.id.get_or_insert_with(ObjectId::new);
                    collections.participants.push(record);
                }
            }
        }
        Ok(())
    }

    async fn delete_early_surrenders(&self) -> Result<u64> {
        let mut collections = self.collections.lock().await;
        let before = collections.participants.len();
        collections
            .participants
            .retain(|p| !is_early_surrender(p));
        Ok((before - collections.participants.len()) as u64)
    }
}
