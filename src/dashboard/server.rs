use std::net::SocketAddr;
use std::sync::Arc;

use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::response::{Html, IntoResponse, Json, Response};
use axum::routing::get;
use serde::Deserialize;
use serde_json::json;
use tokio::net::TcpListener;
use tracing::info;

use super::render::{self, NO_DATA};
use super::{ChampionLookup, RollupTable};
use crate::error::Result;
use crate::model::ChampionRollup;

#[derive(Debug, Deserialize)]
struct PageQuery {
    champion: Option<String>,
}

pub fn router(table: RollupTable) -> axum::Router {
    axum::Router::new()
        .route("/", get(page))
        .route("/api/rollup", get(rollup))
        .route("/api/champions", get(champions))
        .route("/api/champions/:name", get(champion))
        .with_state(Arc::new(table))
}

/// Serve the dashboard on `addr` until the process is stopped.
pub async fn serve(table: RollupTable, addr: SocketAddr) -> Result<()> {
    let listener = TcpListener::bind(addr).await?;
    info!(addr = %listener.local_addr()?, champions = table.rows().len(), "serving dashboard");
    axum::serve(listener, router(table)).await?;
    Ok(())
}

#[tracing::instrument(skip(table))]
async fn page(
    State(table): State<Arc<RollupTable>>,
    Query(query): Query<PageQuery>,
) -> Html<String> {
    let selected = query.champion.as_deref().filter(|name| !name.is_empty());
    Html(render::page(&table, selected))
}

async fn rollup(State(table): State<Arc<RollupTable>>) -> Json<Vec<ChampionRollup>> {
    Json(table.rows().to_vec())
}

async fn champions(State(table): State<Arc<RollupTable>>) -> Json<Vec<String>> {
    Json(table.champions().into_iter().map(str::to_owned).collect())
}

#[tracing::instrument(skip(table))]
async fn champion(State(table): State<Arc<RollupTable>>, Path(name): Path<String>) -> Response {
    match table.lookup(&name) {
        ChampionLookup::Found(detail) => Json(detail).into_response(),
        ChampionLookup::NoData => (
            StatusCode::NOT_FOUND,
            Json(json!({ "champion": name, "message": NO_DATA })),
        )
            .into_response(),
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use serde_json::Value;

    use super::*;
    use crate::dashboard::tests::table;
    use crate::riot_api::test_server;

    async fn get_text(url: &str) -> (u16, String) {
        let response = reqwest::get(url).await.unwrap();
        let status = response.status().as_u16();
        (status, response.text().await.unwrap())
    }

    #[tokio::test]
    async fn api_lists_champions_and_rollup() {
        let base = test_server::spawn(router(table())).await;

        let (status, body) = get_text(&format!("{base}/api/champions")).await;
        assert_eq!(status, 200);
        let names: Vec<String> = serde_json::from_str(&body).unwrap();
        assert_eq!(names, vec!["Ahri", "Kayn", "Lux", "Zed"]);

        let (_, body) = get_text(&format!("{base}/api/rollup")).await;
        let rows: Vec<ChampionRollup> = serde_json::from_str(&body).unwrap();
        assert_eq!(rows, table().rows().to_vec());
    }

    #[tokio::test]
    async fn champion_detail_or_not_found() {
        let base = test_server::spawn(router(table())).await;

        let (status, body) = get_text(&format!("{base}/api/champions/Lux")).await;
        assert_eq!(status, 200);
        let detail: Value = serde_json::from_str(&body).unwrap();
        assert_eq!(detail["win_rate"]["ratio"], 1.0);
        assert_eq!(detail["leaderboards"][0]["entries"][0]["label"], "Lux");

        let (status, body) = get_text(&format!("{base}/api/champions/Teemo")).await;
        assert_eq!(status, 404);
        let error: Value = serde_json::from_str(&body).unwrap();
        assert_eq!(error["message"], NO_DATA);
    }

    #[tokio::test]
    async fn page_renders_the_selected_champion() {
        let base = test_server::spawn(router(table())).await;

        let (status, html) = get_text(&format!("{base}/?champion=Ahri")).await;
        assert_eq!(status, 200);
        assert!(html.contains("<h2>Ahri</h2>"));

        let (_, html) = get_text(&format!("{base}/?champion=Kayn")).await;
        assert!(html.contains(NO_DATA));
    }
}
