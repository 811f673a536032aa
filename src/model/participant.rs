use mongodb::bson::oid::ObjectId;
use mongodb::bson::{Bson, Document};
use serde::{Deserialize, Serialize};

/// One participant of one match, as produced by the reshape stage.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ParticipantRecord {
    #[serde(rename = "_id", default, skip_serializing_if = "Option::is_none")]
    pub id: Option<ObjectId>,
    #[serde(rename = "matchId", default, skip_serializing_if = "Option::is_none")]
    pub match_id: Option<String>,
    #[serde(default)]
    pub participant: Document,
}

impl ParticipantRecord {
    pub fn champion_name(&self) -> Option<&str> {
        self.participant.get_str("championName").ok()
    }

    /// Raw participant field, `None` when absent.
    pub fn field(&self, key: &str) -> Option<&Bson> {
        self.participant.get(key)
    }

    pub fn ended_in_early_surrender(&self) -> bool {
        matches!(
            self.participant.get("gameEndedInEarlySurrender"),
            Some(Bson::Boolean(true))
        )
    }

    pub fn is_win(&self) -> bool {
        matches!(self.participant.get("win"), Some(Bson::Boolean(true)))
    }
}

/// Labels for the numeric `championTransform` codes.
///
/// Only the listed codes are recoded; anything else (including `0`, no
/// transform) is left as the vendor sent it.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    strum_macros::Display,
    strum_macros::EnumIter,
    strum_macros::FromRepr,
)]
#[repr(u8)]
pub enum ChampionTransform {
    Slayer = 1,
    Assassin = 2,
}

impl ChampionTransform {
    /// Looks up the label for a stored code. Numeric types compare by value,
    /// so `1`, `1i64` and `1.0` all match; strings and fractions never do.
    pub fn from_code(code: &Bson) -> Option<Self> {
        let code = match code {
            Bson::Int32(code) => i64::from(*code),
            Bson::Int64(code) => *code,
            Bson::Double(code) if code.fract() == 0.0 => *code as i64,
            _ => return None,
        };
        u8::try_from(code).ok().and_then(Self::from_repr)
    }

    pub const fn code(self) -> i32 {
        self as i32
    }
}

#[cfg(test)]
mod tests {
    use mongodb::bson::doc;

    use super::*;

    #[test]
    fn transform_codes() {
        assert_eq!(
            ChampionTransform::from_code(&Bson::Int32(1)),
            Some(ChampionTransform::Slayer)
        );
        assert_eq!(
            ChampionTransform::from_code(&Bson::Int64(2)),
            Some(ChampionTransform::Assassin)
        );
        assert_eq!(ChampionTransform::from_code(&Bson::Int32(0)), None);
        assert_eq!(ChampionTransform::from_code(&Bson::Int32(-1)), None);
        assert_eq!(
            ChampionTransform::from_code(&Bson::Double(1.0)),
            Some(ChampionTransform::Slayer)
        );
        assert_eq!(ChampionTransform::from_code(&Bson::Double(1.5)), None);
        assert_eq!(ChampionTransform::from_code(&Bson::String("1".into())), None);
        assert_eq!(ChampionTransform::Slayer.to_string(), "Slayer");
    }

    #[test]
    fn flags_require_true_booleans() {
        let record = ParticipantRecord {
            participant: doc! { "gameEndedInEarlySurrender": 1, "win": "true" },
            ..Default::default()
        };

        assert!(!record.ended_in_early_surrender());
        assert!(!record.is_win());
    }
}
