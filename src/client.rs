use async_trait::async_trait;
use chrono::Utc;
use tracing::{instrument, warn};

use crate::error::Result;
use crate::model::*;
use crate::riot_api::{self, BaseUrl};

/// The main entry point for talking to the Riot Games API.
///
/// `RiotClient` wraps a [`reqwest::Client`] and the API key. The inherent
/// `get_*` methods return every failure as a [`StatsError`](crate::StatsError);
/// the [`RiotApi`] implementation degrades those failures the way the
/// harvester expects.
///
/// # Examples
///
/// ```no_run
/// # async fn example() -> champion_stats::Result<()> {
/// use champion_stats::{Platform, RankedQueue, RiotClient, Tier};
///
/// let client = RiotClient::new("RGAPI-...");
/// let roster = client
///     .get_ranked_roster(Tier::Challenger, RankedQueue::RankedSolo5x5, Platform::Vn2)
///     .await?;
/// println!("Found {} players", roster.len());
/// # Ok(())
/// # }
/// ```
pub struct RiotClient {
    http: reqwest::Client,
    api_key: String,
    base: BaseUrl,
}

impl RiotClient {
    /// Create a new client with default settings.
    pub fn new(api_key: impl Into<String>) -> Self {
        Self::with_client(reqwest::Client::new(), api_key)
    }

    /// Create a new client using the provided [`reqwest::Client`].
    ///
    /// Use this when you need to configure timeouts, proxies, headers, etc.
    pub fn with_client(client: reqwest::Client, api_key: impl Into<String>) -> Self {
        Self {
            http: client,
            api_key: api_key.into(),
            base: BaseUrl::Vendor,
        }
    }

    /// Send every request to `base_url` instead of the per-route vendor hosts.
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base = BaseUrl::Fixed(base_url.into());
        self
    }

    /// Fetch the league listing of an apex tier.
    #[instrument(skip(self))]
    pub async fn get_ranked_roster(
        &self,
        tier: Tier,
        queue: RankedQueue,
        platform: Platform,
    ) -> Result<Vec<PlayerEntry>> {
        riot_api::league::get_ranked_roster(
            &self.http,
            &self.base,
            &self.api_key,
            tier,
            queue,
            platform,
        )
        .await
    }

    /// Fetch one page of a player's match ids.
    #[instrument(skip(self, request), fields(puuid = %request.puuid))]
    pub async fn get_match_ids(&self, request: &MatchIdsRequest) -> Result<Vec<String>> {
        riot_api::matches::get_match_ids(&self.http, &self.base, &self.api_key, request).await
    }

    /// Fetch the full detail of one match.
    #[instrument(skip(self))]
    pub async fn get_match_detail(
        &self,
        match_id: &str,
        region: RegionalRoute,
    ) -> Result<MatchDetail> {
        riot_api::matches::get_match_detail(&self.http, &self.base, &self.api_key, match_id, region)
            .await
    }
}

/// The three vendor reads the harvester needs, with failures already
/// degraded to partial results.
///
/// None of these report errors to the caller: a failed call is logged and
/// turns into an empty roster, a batch carrying `error`, or a missing detail.
#[async_trait]
pub trait RiotApi: Send + Sync {
    async fn ranked_roster(
        &self,
        tier: Tier,
        queue: RankedQueue,
        platform: Platform,
    ) -> Vec<PlayerEntry>;

    async fn match_ids(&self, request: &MatchIdsRequest) -> MatchIdBatch;

    async fn match_detail(&self, match_id: &str, region: RegionalRoute) -> Option<MatchDetail>;
}

#[async_trait]
impl RiotApi for RiotClient {
    async fn ranked_roster(
        &self,
        tier: Tier,
        queue: RankedQueue,
        platform: Platform,
    ) -> Vec<PlayerEntry> {
        self.get_ranked_roster(tier, queue, platform)
            .await
            .unwrap_or_else(|e| {
                warn!(error = %e, %tier, %queue, "ranked roster request failed");
                Vec::new()
            })
    }

    async fn match_ids(&self, request: &MatchIdsRequest) -> MatchIdBatch {
        let (matches, error) = match self.get_match_ids(request).await {
            Ok(ids) => (ids, None),
            Err(e) => {
                warn!(error = %e, puuid = %request.puuid, "match id request failed");
                (Vec::new(), Some(e.to_string()))
            }
        };
        MatchIdBatch {
            puuid: request.puuid.clone(),
            matches,
            match_type: request.match_type,
            queue: request.queue.queue_id(),
            inserted_at: Utc::now().date_naive(),
            error,
        }
    }

    async fn match_detail(&self, match_id: &str, region: RegionalRoute) -> Option<MatchDetail> {
        self.get_match_detail(match_id, region)
            .await
            .map_err(|e| warn!(error = %e, match_id, "match detail request failed"))
            .ok()
    }
}

impl std::fmt::Debug for RiotClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RiotClient")
            .field("base", &self.base)
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use axum::http::StatusCode;

    use super::*;
    use crate::riot_api::test_server;

    async fn failing_client() -> RiotClient {
        let router = axum::Router::new().fallback(|| async { StatusCode::SERVICE_UNAVAILABLE });
        RiotClient::new("RGAPI-secret").with_base_url(test_server::spawn(router).await)
    }

    #[tokio::test]
    async fn failed_roster_is_empty() {
        let client = failing_client().await;

        let roster = client
            .ranked_roster(Tier::Challenger, RankedQueue::RankedSolo5x5, Platform::Vn2)
            .await;

        assert!(roster.is_empty());
    }

    #[tokio::test]
    async fn failed_match_ids_are_recorded_with_error() {
        let client = failing_client().await;
        let request = MatchIdsRequest {
            puuid: "p-1".to_owned(),
            queue: RankedQueue::RankedFlexSr,
            match_type: MatchType::Ranked,
            start_time: 0,
            end_time: 10,
            start: 0,
            count: 20,
            region: RegionalRoute::Sea,
        };

        let batch = client.match_ids(&request).await;

        assert_eq!(batch.puuid, "p-1");
        assert!(batch.matches.is_empty());
        assert!(batch.is_failed());
        assert_eq!(batch.queue, 440);
        let error = batch.error.unwrap();
        assert!(error.contains("503"));
        assert!(!error.contains("RGAPI-secret"));
    }

    #[tokio::test]
    async fn failed_match_detail_is_none() {
        let client = failing_client().await;

        assert_eq!(client.match_detail("VN2_1", RegionalRoute::Sea).await, None);
    }

    #[test]
    fn debug_output_omits_the_key() {
        let client = RiotClient::new("RGAPI-secret");
        assert!(!format!("{client:?}").contains("RGAPI-secret"));
    }
}
