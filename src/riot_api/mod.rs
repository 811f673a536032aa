pub(crate) mod league;
pub(crate) mod matches;

use std::fmt::Display;

use serde::de::DeserializeOwned;
use tracing::debug;

use crate::error::{Result, StatsError};

/// Where vendor requests are sent.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub(crate) enum BaseUrl {
    /// `https://{route}.api.riotgames.com`
    #[default]
    Vendor,
    /// A single host that serves every route, e.g. a proxy or a test server.
    Fixed(String),
}

impl BaseUrl {
    pub(crate) fn for_route(&self, route: impl Display) -> String {
        match self {
            Self::Vendor => format!("https://{route}.api.riotgames.com"),
            Self::Fixed(url) => url.trim_end_matches('/').to_owned(),
        }
    }
}

/// Fetch `url` and decode the JSON body.
///
/// The API key is appended as the `api_key` query parameter. Errors carry
/// `url` without the key and reqwest errors are stripped of their URL for the
/// same reason.
pub(crate) async fn get_json<T: DeserializeOwned>(
    client: &reqwest::Client,
    url: &str,
    api_key: &str,
) -> Result<T> {
    debug!(url, "requesting");

    let separator = if url.contains('?') { '&' } else { '?' };
    let response = client
        .get(format!("{url}{separator}api_key={api_key}"))
        .send()
        .await
        .map_err(|e| StatsError::Http {
            url: url.to_owned(),
            source: e.without_url(),
        })?;

    let status = response.status();
    if !status.is_success() {
        return Err(StatsError::UnexpectedStatus {
            url: url.to_owned(),
            status,
        });
    }

    let body = response.text().await.map_err(|e| StatsError::ResponseBody {
        url: url.to_owned(),
        source: e.without_url(),
    })?;

    serde_json::from_str(&body).map_err(|e| StatsError::Decode {
        url: url.to_owned(),
        source: e,
    })
}
