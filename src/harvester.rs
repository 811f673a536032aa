use std::time::Duration;

use chrono::{DateTime, TimeDelta, Utc};
use serde::Serialize;
use tokio::time::sleep;
use tracing::{debug, info, instrument, warn};

use crate::client::RiotApi;
use crate::error::Result;
use crate::model::{MatchIdsRequest, MatchType, Platform, RankedQueue, RegionalRoute, Tier};
use crate::store::Store;

/// What to harvest and how fast.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HarvestConfig {
    pub tier: Tier,
    pub queue: RankedQueue,
    pub match_type: MatchType,
    pub platform: Platform,
    pub region: RegionalRoute,
    /// Length of the trailing observation window.
    pub window: TimeDelta,
    /// Match ids requested per player.
    pub count: u32,
    pub start: u32,
    /// Pause before every match-id and match-detail request.
    pub delay: Duration,
}

impl Default for HarvestConfig {
    fn default() -> Self {
        Self {
            tier: Tier::Challenger,
            queue: RankedQueue::RankedSolo5x5,
            match_type: MatchType::Ranked,
            platform: Platform::Vn2,
            region: RegionalRoute::Sea,
            window: TimeDelta::days(30),
            count: 50,
            start: 0,
            delay: Duration::from_millis(1500),
        }
    }
}

/// Counts of what one harvest stored.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct HarvestReport {
    pub players: usize,
    pub batches: usize,
    pub failed_batches: usize,
    pub details: usize,
    pub missing_details: usize,
}

/// Fills the raw player, match-id and match-detail collections.
///
/// Requests are issued one at a time with `config.delay` between them. Vendor
/// failures never stop a run; store failures do.
pub struct Harvester<'a, A: ?Sized, S: ?Sized> {
    api: &'a A,
    store: &'a S,
    config: HarvestConfig,
}

impl<'a, A, S> Harvester<'a, A, S>
where
    A: RiotApi + ?Sized,
    S: Store + ?Sized,
{
    pub fn new(api: &'a A, store: &'a S, config: HarvestConfig) -> Self {
        Self { api, store, config }
    }

    /// Harvest the window ending now.
    pub async fn run(&self) -> Result<HarvestReport> {
        self.run_until(Utc::now()).await
    }

    /// Harvest the window ending at `end`.
    #[instrument(skip(self), fields(tier = %self.config.tier, queue = %self.config.queue))]
    pub async fn run_until(&self, end: DateTime<Utc>) -> Result<HarvestReport> {
        let mut report = HarvestReport {
            players: self.harvest_players().await?,
            ..Default::default()
        };
        self.harvest_match_ids(end, &mut report).await?;
        self.harvest_match_details(&mut report).await?;
        info!(?report, "harvest finished");
        Ok(report)
    }

    async fn harvest_players(&self) -> Result<usize> {
        let players = self
            .api
            .ranked_roster(self.config.tier, self.config.queue, self.config.platform)
            .await;
        if players.is_empty() {
            warn!("ranked roster is empty, nothing to harvest");
            return Ok(0);
        }
        self.store.insert_players(&players).await?;
        info!(count = players.len(), "stored ranked roster");
        Ok(players.len())
    }

    async fn harvest_match_ids(&self, end: DateTime<Utc>, report: &mut HarvestReport) -> Result<()> {
        let start = end - self.config.window;
        let puuids = self.store.distinct_puuids().await?;
        debug!(count = puuids.len(), "distinct players to fetch");

        for puuid in puuids {
            sleep(self.config.delay).await;
            let request = MatchIdsRequest {
                puuid,
                queue: self.config.queue,
                match_type: self.config.match_type,
                start_time: start.timestamp(),
                end_time: end.timestamp(),
                start: self.config.start,
                count: self.config.count,
                region: self.config.region,
            };
            let batch = self.api.match_ids(&request).await;
            self.store.insert_match_batch(&batch).await?;

            report.batches += 1;
            if batch.is_failed() {
                report.failed_batches += 1;
            }
            info!(
                puuid = %batch.puuid,
                count = batch.matches.len(),
                failed = batch.is_failed(),
                "stored match ids"
            );
        }
        Ok(())
    }

    async fn harvest_match_details(&self, report: &mut HarvestReport) -> Result<()> {
        let match_ids = self.store.distinct_match_ids().await?;
        debug!(count = match_ids.len(), "distinct matches to fetch");

        for match_id in match_ids {
            sleep(self.config.delay).await;
            match self.api.match_detail(&match_id, self.config.region).await {
                Some(detail) => {
                    self.store.insert_match_detail(&detail).await?;
                    report.details += 1;
                    info!(%match_id, "stored match detail");
                }
                None => {
                    report.missing_details += 1;
                    warn!(%match_id, "match detail unavailable, skipped");
                }
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use std::collections::{HashMap, HashSet};
    use std::sync::Mutex;

    use async_trait::async_trait;
    use chrono::TimeZone;
    use mongodb::bson::doc;
    use pretty_assertions::assert_eq;

    use super::*;
    use crate::model::{MatchDetail, MatchIdBatch, PlayerEntry};
    use crate::store::MemoryStore;

    #[derive(Default)]
    struct FakeApi {
        roster: Vec<PlayerEntry>,
        match_ids: HashMap<String, Vec<String>>,
        failing_players: HashSet<String>,
        missing_matches: HashSet<String>,
        id_requests: Mutex<Vec<MatchIdsRequest>>,
        detail_requests: Mutex<Vec<String>>,
    }

    impl FakeApi {
        fn player(mut self, puuid: &str, match_ids: &[&str]) -> Self {
            self.roster.push(player(puuid));
            self.match_ids.insert(
                puuid.to_owned(),
                match_ids.iter().map(|id| (*id).to_owned()).collect(),
            );
            self
        }

        fn detail_requests(&self) -> Vec<String> {
            self.detail_requests.lock().unwrap().clone()
        }
    }

    #[async_trait]
    impl RiotApi for FakeApi {
        async fn ranked_roster(&self, _: Tier, _: RankedQueue, _: Platform) -> Vec<PlayerEntry> {
            self.roster.clone()
        }

        async fn match_ids(&self, request: &MatchIdsRequest) -> MatchIdBatch {
            self.id_requests.lock().unwrap().push(request.clone());
            let failed = self.failing_players.contains(&request.puuid);
            MatchIdBatch {
                puuid: request.puuid.clone(),
                matches: if failed {
                    Vec::new()
                } else {
                    self.match_ids.get(&request.puuid).cloned().unwrap_or_default()
                },
                match_type: request.match_type,
                queue: request.queue.queue_id(),
                inserted_at: Utc::now().date_naive(),
                error: failed.then(|| "unexpected status 429".to_owned()),
            }
        }

        async fn match_detail(&self, match_id: &str, _: RegionalRoute) -> Option<MatchDetail> {
            self.detail_requests.lock().unwrap().push(match_id.to_owned());
            if self.missing_matches.contains(match_id) {
                return None;
            }
            Some(MatchDetail::new(doc! {
                "metadata": { "matchId": match_id },
                "info": { "participants": [] },
            }))
        }
    }

    fn player(puuid: &str) -> PlayerEntry {
        PlayerEntry {
            puuid: puuid.to_owned(),
            summoner_id: None,
            league_points: 1200,
            rank: "I".to_owned(),
            wins: 100,
            losses: 90,
            veteran: false,
            inactive: false,
            fresh_blood: false,
            hot_streak: false,
        }
    }

    fn instant_config() -> HarvestConfig {
        HarvestConfig {
            delay: Duration::ZERO,
            ..Default::default()
        }
    }

    #[tokio::test]
    async fn shared_matches_are_fetched_once() {
        let api = FakeApi::default()
            .player("p-1", &["M1", "M2"])
            .player("p-2", &["M2", "M3"])
            .player("p-3", &["M3", "M1", "M4"]);
        let store = MemoryStore::new();

        let report = Harvester::new(&api, &store, instant_config())
            .run()
            .await
            .unwrap();

        let mut requested = api.detail_requests();
        requested.sort();
        assert_eq!(requested, vec!["M1", "M2", "M3", "M4"]);
        assert_eq!(
            report,
            HarvestReport {
                players: 3,
                batches: 3,
                failed_batches: 0,
                details: 4,
                missing_details: 0,
            }
        );
        assert_eq!(store.players().await.len(), 3);
        assert_eq!(store.match_batches().await.len(), 3);
        assert_eq!(store.match_details().await.unwrap().len(), 4);
    }

    #[tokio::test]
    async fn failed_batches_are_stored_for_audit() {
        let mut api = FakeApi::default()
            .player("p-1", &["M1"])
            .player("p-2", &["M2"]);
        api.failing_players.insert("p-2".to_owned());
        let store = MemoryStore::new();

        let report = Harvester::new(&api, &store, instant_config())
            .run()
            .await
            .unwrap();

        let batches = store.match_batches().await;
        let failed = batches.iter().find(|b| b.puuid == "p-2").unwrap();
        assert!(failed.matches.is_empty());
        assert_eq!(failed.error.as_deref(), Some("unexpected status 429"));
        assert_eq!(report.failed_batches, 1);
        assert_eq!(api.detail_requests(), vec!["M1"]);
    }

    #[tokio::test]
    async fn missing_details_are_skipped() {
        let mut api = FakeApi::default().player("p-1", &["M1", "M2"]);
        api.missing_matches.insert("M2".to_owned());
        let store = MemoryStore::new();

        let report = Harvester::new(&api, &store, instant_config())
            .run()
            .await
            .unwrap();

        let details = store.match_details().await.unwrap();
        assert_eq!(details.len(), 1);
        assert_eq!(details[0].match_id(), Some("M1"));
        assert_eq!(report.missing_details, 1);
    }

    #[tokio::test]
    async fn empty_roster_stops_early() {
        let api = FakeApi::default();
        let store = MemoryStore::new();

        let report = Harvester::new(&api, &store, instant_config())
            .run()
            .await
            .unwrap();

        assert_eq!(report, HarvestReport::default());
        assert!(api.id_requests.lock().unwrap().is_empty());
        assert!(api.detail_requests().is_empty());
    }

    #[tokio::test]
    async fn requests_cover_the_trailing_window() {
        let api = FakeApi::default().player("p-1", &[]);
        let store = MemoryStore::new();
        let end = Utc.with_ymd_and_hms(2025, 6, 30, 12, 0, 0).unwrap();
        let config = HarvestConfig {
            count: 100,
            queue: RankedQueue::RankedFlexSr,
            ..instant_config()
        };

        Harvester::new(&api, &store, config)
            .run_until(end)
            .await
            .unwrap();

        let requests = api.id_requests.lock().unwrap().clone();
        assert_eq!(requests.len(), 1);
        assert_eq!(requests[0].end_time, end.timestamp());
        assert_eq!(requests[0].end_time - requests[0].start_time, 30 * 24 * 60 * 60);
        assert_eq!(requests[0].count, 100);
        assert_eq!(requests[0].queue, RankedQueue::RankedFlexSr);
    }

    #[tokio::test(start_paused = true)]
    async fn every_request_after_the_roster_waits_for_the_delay() {
        let api = FakeApi::default()
            .player("p-1", &["M1", "M2"])
            .player("p-2", &["M2"]);
        let store = MemoryStore::new();
        let config = HarvestConfig {
            delay: Duration::from_millis(1500),
            ..Default::default()
        };

        let started = tokio::time::Instant::now();
        Harvester::new(&api, &store, config).run().await.unwrap();

        // two match-id requests and two match-detail requests
        assert_eq!(started.elapsed(), Duration::from_millis(4 * 1500));
    }
}
