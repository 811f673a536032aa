use tracing::{debug, instrument};

use crate::error::Result;
use crate::model::{MatchDetail, MatchIdsRequest, RegionalRoute};
use crate::riot_api::{self, BaseUrl};

#[instrument(skip(client, base, api_key), fields(puuid = %request.puuid))]
pub(crate) async fn get_match_ids(
    client: &reqwest::Client,
    base: &BaseUrl,
    api_key: &str,
    request: &MatchIdsRequest,
) -> Result<Vec<String>> {
    let url = format!(
        "{}/lol/match/v5/matches/by-puuid/{}/ids?startTime={}&endTime={}&queue={}&type={}&start={}&count={}",
        base.for_route(request.region),
        request.puuid,
        request.start_time,
        request.end_time,
        request.queue.queue_id(),
        request.match_type,
        request.start,
        request.count,
    );
    let ids: Vec<String> = riot_api::get_json(client, &url, api_key).await?;
    debug!(count = ids.len(), "parsed match ids");
    Ok(ids)
}

#[instrument(skip(client, base, api_key))]
pub(crate) async fn get_match_detail(
    client: &reqwest::Client,
    base: &BaseUrl,
    api_key: &str,
    match_id: &str,
    region: RegionalRoute,
) -> Result<MatchDetail> {
    let url = format!(
        "{}/lol/match/v5/matches/{match_id}",
        base.for_route(region)
    );
    let detail: MatchDetail = riot_api::get_json(client, &url, api_key).await?;
    debug!(
        participants = detail.participants().map_or(0, <[_]>::len),
        "parsed match detail"
    );
    Ok(detail)
}
