use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use super::{MatchType, RankedQueue, RegionalRoute};

/// The match ids fetched for one player in one harvest.
///
/// Failed fetches are still recorded: `matches` is then empty and `error`
/// carries the failure, so check [`MatchIdBatch::is_failed`] before trusting
/// an empty list.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MatchIdBatch {
    pub puuid: String,
    pub matches: Vec<String>,
    #[serde(rename = "type")]
    pub match_type: MatchType,
    pub queue: i32,
    pub inserted_at: NaiveDate,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl MatchIdBatch {
    pub fn is_failed(&self) -> bool {
        self.error.is_some()
    }
}

/// Parameters of a single match-id page request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MatchIdsRequest {
    pub puuid: String,
    pub queue: RankedQueue,
    pub match_type: MatchType,
    /// Window start, unix seconds.
    pub start_time: i64,
    /// Window end, unix seconds.
    pub end_time: i64,
    pub start: u32,
    /// Page size; the vendor accepts 0 to 100.
    pub count: u32,
    pub region: RegionalRoute,
}

#[cfg(test)]
mod tests {
    use mongodb::bson;

    use super::*;

    #[test]
    fn stores_with_vendor_field_names() {
        let batch = MatchIdBatch {
            puuid: "p-1".to_owned(),
            matches: vec!["VN2_1".to_owned()],
            match_type: MatchType::Ranked,
            queue: 420,
            inserted_at: NaiveDate::from_ymd_opt(2025, 3, 14).unwrap(),
            error: None,
        };

        let document = bson::to_document(&batch).unwrap();

        assert_eq!(document.get_str("type").unwrap(), "ranked");
        assert_eq!(document.get_str("insertedAt").unwrap(), "2025-03-14");
        assert!(!document.contains_key("error"));
        assert!(!batch.is_failed());
    }
}
