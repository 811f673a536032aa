use mongodb::bson::{Bson, Document};
use serde::{Deserialize, Serialize};

/// Full vendor match document, stored verbatim.
///
/// The vendor owns the shape of this document, so nothing is validated on the
/// way in. Accessors return `None` when the expected paths are missing rather
/// than failing, and the reshape stage treats a malformed match the same way.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct MatchDetail(Document);

impl MatchDetail {
    pub fn new(document: Document) -> Self {
        Self(document)
    }

    /// `metadata.matchId`, if present and a string.
    pub fn match_id(&self) -> Option<&str> {
        self.0.get_document("metadata").ok()?.get_str("matchId").ok()
    }

    /// `info.participants`, if present and an array.
    pub fn participants(&self) -> Option<&[Bson]> {
        self.0
            .get_document("info")
            .ok()?
            .get_array("participants")
            .ok()
            .map(Vec::as_slice)
    }
}
