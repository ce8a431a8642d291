//! Name suggestion model with its per-voter ledger.

use std::collections::HashMap;

use serde::{Deserialize, Deserializer, Serialize};

/// Sentinel voter identity for callers whose network address could not
/// be resolved. Such callers bypass duplicate-vote prevention.
pub const UNKNOWN_VOTER: &str = "unknown";

/// A voter's recorded choice on a name.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum VoteChoice {
    Up,
    Down,
}

/// A vote request's direction, including withdrawal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum VoteType {
    Up,
    Down,
    None,
}

/// A suggested baby name with vote tallies.
///
/// `votes` and `dislikes` mirror the `votedBy` ledger; they are kept in
/// step by the repository rather than recounted on every read.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NameSuggestion {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub votes: u32,
    #[serde(default)]
    pub dislikes: u32,
    #[serde(default, deserialize_with = "voted_by_compat")]
    pub voted_by: HashMap<String, VoteChoice>,
}

/// Accept both ledger shapes found on disk.
///
/// Early files stored `votedBy` as a plain array of voter identities
/// with no direction. Those entries are upgraded to "up" on read; the
/// upgraded mapping is persisted on the record's next write.
fn voted_by_compat<'de, D>(deserializer: D) -> Result<HashMap<String, VoteChoice>, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Shape {
        Ledger(HashMap<String, VoteChoice>),
        Legacy(Vec<String>),
    }

    Ok(match Shape::deserialize(deserializer)? {
        Shape::Ledger(map) => map,
        Shape::Legacy(voters) => voters
            .into_iter()
            .map(|voter| (voter, VoteChoice::Up))
            .collect(),
    })
}

/// Request body for suggesting a new name.
#[derive(Debug, Clone, Deserialize)]
pub struct CreateNameRequest {
    pub name: String,
}

/// Request body for casting, changing, or withdrawing a vote.
#[derive(Debug, Clone, Deserialize)]
pub struct VoteRequest {
    pub id: String,
    #[serde(rename = "type")]
    pub vote_type: VoteType,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_deserialize_ledger_shape() {
        let record: NameSuggestion = serde_json::from_str(
            r#"{"id":"a","name":"Mia","votes":1,"dislikes":1,
                "votedBy":{"10.0.0.1":"up","10.0.0.2":"down"}}"#,
        )
        .unwrap();

        assert_eq!(record.voted_by.get("10.0.0.1"), Some(&VoteChoice::Up));
        assert_eq!(record.voted_by.get("10.0.0.2"), Some(&VoteChoice::Down));
    }

    #[test]
    fn test_deserialize_legacy_shape_as_up_votes() {
        let record: NameSuggestion = serde_json::from_str(
            r#"{"id":"a","name":"Mia","votes":2,"dislikes":0,
                "votedBy":["10.0.0.1","10.0.0.2"]}"#,
        )
        .unwrap();

        assert_eq!(record.voted_by.len(), 2);
        assert!(record
            .voted_by
            .values()
            .all(|choice| *choice == VoteChoice::Up));
    }

    #[test]
    fn test_deserialize_missing_ledger_as_empty() {
        let record: NameSuggestion =
            serde_json::from_str(r#"{"id":"a","name":"Mia"}"#).unwrap();

        assert_eq!(record.votes, 0);
        assert_eq!(record.dislikes, 0);
        assert!(record.voted_by.is_empty());
    }

    #[test]
    fn test_serializes_ledger_as_mapping() {
        let record: NameSuggestion = serde_json::from_str(
            r#"{"id":"a","name":"Mia","votes":1,"dislikes":0,"votedBy":["10.0.0.1"]}"#,
        )
        .unwrap();

        let out = serde_json::to_value(&record).unwrap();
        assert_eq!(out["votedBy"]["10.0.0.1"], "up");
    }
}
