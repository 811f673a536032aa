use tracing::{debug, instrument};

use crate::error::Result;
use crate::model::{LeagueList, Platform, PlayerEntry, RankedQueue, Tier};
use crate::riot_api::{self, BaseUrl};

#[instrument(skip(client, base, api_key))]
pub(crate) async fn get_ranked_roster(
    client: &reqwest::Client,
    base: &BaseUrl,
    api_key: &str,
    tier: Tier,
    queue: RankedQueue,
    platform: Platform,
) -> Result<Vec<PlayerEntry>> {
    let url = format!(
        "{}/lol/league/v4/{tier}leagues/by-queue/{queue}",
        base.for_route(platform)
    );
    let list: LeagueList = riot_api::get_json(client, &url, api_key).await?;
    debug!(count = list.entries.len(), "parsed ranked roster");
    Ok(list.entries)
}
