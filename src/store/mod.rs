//! The document store behind every stage of the pipeline.
//!
//! [`Store`] exposes the handful of collection operations the harvester and
//! the reshape stage need. The two aggregation stages have default
//! implementations that run in process on top of those operations;
//! [`MongoStore`] overrides both to run them as server-side pipelines.

mod memory;
mod mongo;

pub use memory::MemoryStore;
pub use mongo::MongoStore;

use async_trait::async_trait;

use crate::aggregation::{self, ReshapeReport};
use crate::error::Result;
use crate::model::{ChampionRollup, MatchDetail, MatchIdBatch, ParticipantRecord, PlayerEntry};

/// Ranked-ladder entries.
pub const PLAYERS: &str = "player";
/// One [`MatchIdBatch`] per player per harvest.
pub const MATCH_IDS: &str = "matches";
/// Raw vendor match documents.
pub const MATCH_DETAILS: &str = "match_detail";
/// Flat participant records produced by the reshape stage.
pub const PARTICIPANTS: &str = "participant";

#[async_trait]
pub trait Store: Send + Sync {
    async fn insert_players(&self, players: &[PlayerEntry]) -> Result<()>;

    /// Distinct player ids, snapshotted at call time.
    async fn distinct_puuids(&self) -> Result<Vec<String>>;

    async fn insert_match_batch(&self, batch: &MatchIdBatch) -> Result<()>;

    /// Distinct match ids across every stored batch, snapshotted at call time.
    async fn distinct_match_ids(&self) -> Result<Vec<String>>;

    async fn insert_match_detail(&self, detail: &MatchDetail) -> Result<()>;

    async fn match_details(&self) -> Result<Vec<MatchDetail>>;

    /// Replace the participant collection with `records`, assigning ids to
    /// records without one. Returns the number of records written.
    async fn replace_participants(&self, records: Vec<ParticipantRecord>) -> Result<u64>;

    async fn participants(&self) -> Result<Vec<ParticipantRecord>>;

    /// Upsert `records` by `_id`: matched records take the new `matchId` and
    /// `participant`, unmatched ones are inserted.
    async fn merge_participants(&self, records: Vec<ParticipantRecord>) -> Result<()>;

    /// Delete every participant flagged as an early surrender.
    async fn delete_early_surrenders(&self) -> Result<u64>;

    /// Rebuild the participant collection from the raw match details.
    async fn reshape(&self) -> Result<ReshapeReport> {
        aggregation::reshape::run(self).await
    }

    /// Per-champion statistics over the current participant collection.
    async fn rollup(&self) -> Result<Vec<ChampionRollup>> {
        Ok(aggregation::rollup::rollup(&self.participants().await?))
    }
}
