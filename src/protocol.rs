//! Public protocol structs for WebSocket and HTTP endpoints (serde ready).
//! Request bodies are checked here and turned into domain values, so handlers
//! only ever see well-formed records.

use std::collections::HashSet;

use serde::{Deserialize, Serialize};

use crate::domain::{GameRecordPatch, NewGameRecord, SubmittedGroup, GROUP_SIZE};
use crate::error::QuestError;
use crate::session::{Notice, SessionView};

/// Messages the client can send over WebSocket.
#[derive(Debug, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum ClientWsMessage {
    Ping,
    Start {
        #[serde(rename = "wordSetId")]
        word_set_id: u64,
    },
    SelectWord {
        word: String,
    },
    Submit,
    Reset,
}

/// Messages the server sends back over WebSocket.
#[derive(Debug, Serialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum ServerWsMessage {
    Pong,
    Session {
        session: SessionView,
        notices: Vec<Notice>,
    },
    Error {
        message: String,
    },
}

//
// HTTP request/response DTOs
//

#[derive(Serialize)]
pub struct HealthOut {
    pub ok: bool,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct ErrorOut {
    pub message: String,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub errors: Vec<String>,
}

#[derive(Debug, Deserialize)]
pub struct CheckIn {
    pub words: Vec<String>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CheckOut {
    pub is_correct: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub explanation: Option<String>,
}

impl CheckIn {
    /// The candidate must be exactly four distinct words.
    pub fn validate(self) -> Result<Vec<String>, QuestError> {
        let errors = group_errors("words", &self.words);
        if errors.is_empty() {
            Ok(self.words)
        } else {
            Err(QuestError::Validation { what: "group", errors })
        }
    }
}

/// Body of `POST /api/game-states`: a game record without its id.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewGameRecordIn {
    #[serde(alias = "wordSetId")]
    pub quiz_id: u64,
    pub submitted_groups: Vec<SubmittedGroup>,
    pub score: i64,
    pub completed: bool,
}

impl NewGameRecordIn {
    pub fn validate(self) -> Result<NewGameRecord, QuestError> {
        let mut errors = score_errors(self.score);
        for (idx, group) in self.submitted_groups.iter().enumerate() {
            errors.extend(group_errors(&format!("submittedGroups[{}].words", idx), &group.words));
        }
        if !errors.is_empty() {
            return Err(QuestError::Validation { what: "game state data", errors });
        }
        Ok(NewGameRecord {
            quiz_id: self.quiz_id,
            submitted_groups: self.submitted_groups,
            score: self.score as u8,
            completed: self.completed,
        })
    }
}

/// Body of `PATCH /api/game-states/:id`. Every field is optional; `id` is ignored.
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GameRecordPatchIn {
    #[serde(default, alias = "wordSetId")]
    pub quiz_id: Option<u64>,
    #[serde(default)]
    pub submitted_groups: Option<Vec<SubmittedGroup>>,
    #[serde(default)]
    pub score: Option<i64>,
    #[serde(default)]
    pub completed: Option<bool>,
}

impl GameRecordPatchIn {
    pub fn validate(self) -> Result<GameRecordPatch, QuestError> {
        let mut errors = self.score.map(score_errors).unwrap_or_default();
        for (idx, group) in self.submitted_groups.iter().flatten().enumerate() {
            errors.extend(group_errors(&format!("submittedGroups[{}].words", idx), &group.words));
        }
        if !errors.is_empty() {
            return Err(QuestError::Validation { what: "game state update", errors });
        }
        Ok(GameRecordPatch {
            quiz_id: self.quiz_id,
            submitted_groups: self.submitted_groups,
            score: self.score.map(|s| s as u8),
            completed: self.completed,
        })
    }
}

fn score_errors(score: i64) -> Vec<String> {
    if (0..=100).contains(&score) {
        Vec::new()
    } else {
        vec![format!("score: must be between 0 and 100, got {}", score)]
    }
}

fn group_errors(field: &str, words: &[String]) -> Vec<String> {
    let distinct: HashSet<&str> = words.iter().map(String::as_str).collect();
    if words.len() == GROUP_SIZE && distinct.len() == GROUP_SIZE {
        Vec::new()
    } else {
        vec![format!("{}: expected {} distinct words", field, GROUP_SIZE)]
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn group(is_correct: bool) -> serde_json::Value {
        json!({ "words": ["a", "b", "c", "d"], "isCorrect": is_correct })
    }

    #[test]
    fn create_body_accepts_either_quiz_id_name() {
        let body: NewGameRecordIn = serde_json::from_value(json!({
            "wordSetId": 1, "submittedGroups": [group(true)], "score": 100, "completed": true
        }))
        .unwrap();
        let record = body.validate().unwrap();
        assert_eq!(record.quiz_id, 1);
        assert_eq!(record.score, 100);
    }

    #[test]
    fn create_body_collects_every_field_error() {
        let body: NewGameRecordIn = serde_json::from_value(json!({
            "quizId": 1,
            "submittedGroups": [group(true), { "words": ["a", "a", "b", "c"], "isCorrect": false }],
            "score": 140,
            "completed": false
        }))
        .unwrap();
        match body.validate() {
            Err(QuestError::Validation { errors, .. }) => {
                assert_eq!(errors.len(), 2);
                assert!(errors[0].starts_with("score"));
                assert!(errors[1].starts_with("submittedGroups[1]"));
            }
            other => panic!("expected validation error, got {:?}", other),
        }
    }

    #[test]
    fn create_body_requires_every_field() {
        let res = serde_json::from_value::<NewGameRecordIn>(json!({ "quizId": 1, "score": 10 }));
        assert!(res.is_err());
    }

    #[test]
    fn empty_patch_is_valid_and_changes_nothing() {
        let patch: GameRecordPatchIn = serde_json::from_value(json!({ "id": 99 })).unwrap();
        assert_eq!(patch.validate().unwrap(), GameRecordPatch::default());
    }

    #[test]
    fn patch_rejects_negative_score() {
        let patch: GameRecordPatchIn = serde_json::from_value(json!({ "score": -1 })).unwrap();
        assert!(patch.validate().is_err());
    }

    #[test]
    fn check_needs_four_distinct_words() {
        assert!(CheckIn { words: vec!["a".into(), "b".into(), "c".into()] }.validate().is_err());
        let words: Vec<String> = ["a", "b", "c", "d"].iter().map(|w| w.to_string()).collect();
        assert_eq!(CheckIn { words: words.clone() }.validate().unwrap(), words);
    }

    #[test]
    fn client_messages_use_snake_case_tags() {
        let msg: ClientWsMessage = serde_json::from_str(r#"{"type":"select_word","word":"Senate"}"#).unwrap();
        assert!(matches!(msg, ClientWsMessage::SelectWord { ref word } if word == "Senate"));
        let msg: ClientWsMessage = serde_json::from_str(r#"{"type":"start","wordSetId":2}"#).unwrap();
        assert!(matches!(msg, ClientWsMessage::Start { word_set_id: 2 }));
    }
}
