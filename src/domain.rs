//! Domain models used by the backend: quizzes, their answer keys, and game records.

use std::collections::{BTreeMap, HashSet};

use serde::{Deserialize, Serialize};

/// Number of words in every group, both in the answer key and in a submission.
pub const GROUP_SIZE: usize = 4;

/// One hidden grouping of the answer key.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct WordGroup {
  pub words: Vec<String>,
  pub explanation: String,
}

/// A themed word-grouping puzzle. Called a "word set" on the wire.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Quiz {
  pub id: u64,
  pub name: String,
  pub difficulty: String,   // free-form tier (e.g., "easy", "hard")
  pub word_groups: Vec<WordGroup>,
  #[serde(default)] pub definitions: BTreeMap<String, String>,
}

/// A quiz before the store has assigned it an id.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct NewQuiz {
  pub name: String,
  pub difficulty: String,
  pub word_groups: Vec<WordGroup>,
  pub definitions: BTreeMap<String, String>,
}

impl NewQuiz {
  pub fn with_id(self, id: u64) -> Quiz {
    Quiz {
      id,
      name: self.name,
      difficulty: self.difficulty,
      word_groups: self.word_groups,
      definitions: self.definitions,
    }
  }

  /// Everything that breaks the answer-key invariants. Empty means the quiz is playable.
  ///
  /// Groups must hold exactly [`GROUP_SIZE`] distinct words and no word may
  /// belong to two groups, otherwise group matching becomes ambiguous.
  pub fn integrity_problems(&self) -> Vec<String> {
    let mut problems = Vec::new();
    if self.name.trim().is_empty() {
      problems.push("name is empty".to_string());
    }
    if self.word_groups.is_empty() {
      problems.push("no word groups".to_string());
    }

    let mut seen = HashSet::new();
    for (idx, group) in self.word_groups.iter().enumerate() {
      let distinct: HashSet<&str> = group.words.iter().map(String::as_str).collect();
      if group.words.len() != GROUP_SIZE || distinct.len() != GROUP_SIZE {
        problems.push(format!(
          "group {} must have {} distinct words, found {:?}",
          idx + 1,
          GROUP_SIZE,
          group.words
        ));
      }
      for word in distinct {
        if !seen.insert(word) {
          problems.push(format!("word '{}' appears in more than one group", word));
        }
      }
    }
    problems
  }
}

impl Quiz {
  /// Every word of the answer key, in declared order.
  pub fn words(&self) -> impl Iterator<Item = &str> {
    self.word_groups.iter().flat_map(|g| g.words.iter().map(String::as_str))
  }

  pub fn contains_word(&self, word: &str) -> bool {
    self.words().any(|w| w == word)
  }
}

/// A player's attempted grouping plus its verdict.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SubmittedGroup {
  pub words: Vec<String>,
  pub is_correct: bool,
  #[serde(default, skip_serializing_if = "Option::is_none")]
  pub explanation: Option<String>,
}

/// Persisted snapshot of one play session. Called a "game state" on the wire.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GameRecord {
  pub id: u64,
  pub quiz_id: u64,
  pub submitted_groups: Vec<SubmittedGroup>,
  pub score: u8,
  pub completed: bool,
}

/// A game record before the store has assigned it an id.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct NewGameRecord {
  pub quiz_id: u64,
  pub submitted_groups: Vec<SubmittedGroup>,
  pub score: u8,
  pub completed: bool,
}

impl NewGameRecord {
  pub fn with_id(self, id: u64) -> GameRecord {
    GameRecord {
      id,
      quiz_id: self.quiz_id,
      submitted_groups: self.submitted_groups,
      score: self.score,
      completed: self.completed,
    }
  }
}

/// Shallow partial update of a [`GameRecord`]. Absent fields keep their value.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct GameRecordPatch {
  pub quiz_id: Option<u64>,
  pub submitted_groups: Option<Vec<SubmittedGroup>>,
  pub score: Option<u8>,
  pub completed: Option<bool>,
}

impl GameRecord {
  pub fn apply(&mut self, patch: GameRecordPatch) {
    if let Some(quiz_id) = patch.quiz_id { self.quiz_id = quiz_id; }
    if let Some(groups) = patch.submitted_groups { self.submitted_groups = groups; }
    if let Some(score) = patch.score { self.score = score; }
    if let Some(completed) = patch.completed { self.completed = completed; }
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  fn group(words: [&str; 4]) -> WordGroup {
    WordGroup { words: words.iter().map(|w| w.to_string()).collect(), explanation: "x".into() }
  }

  fn new_quiz(groups: Vec<WordGroup>) -> NewQuiz {
    NewQuiz { name: "Test".into(), difficulty: "easy".into(), word_groups: groups, definitions: BTreeMap::new() }
  }

  #[test]
  fn disjoint_groups_have_no_problems() {
    let quiz = new_quiz(vec![group(["a", "b", "c", "d"]), group(["e", "f", "g", "h"])]);
    assert!(quiz.integrity_problems().is_empty());
  }

  #[test]
  fn shared_word_across_groups_is_reported() {
    let quiz = new_quiz(vec![group(["a", "b", "c", "d"]), group(["d", "e", "f", "g"])]);
    let problems = quiz.integrity_problems();
    assert_eq!(problems.len(), 1);
    assert!(problems[0].contains("'d'"));
  }

  #[test]
  fn short_or_repeated_groups_are_reported() {
    let mut short = group(["a", "b", "c", "d"]);
    short.words.pop();
    let quiz = new_quiz(vec![short, group(["e", "e", "f", "g"])]);
    assert_eq!(quiz.integrity_problems().len(), 2);
    assert!(!new_quiz(vec![]).integrity_problems().is_empty());
  }

  #[test]
  fn quiz_serializes_with_camel_case_keys() {
    let quiz = new_quiz(vec![group(["a", "b", "c", "d"])]).with_id(7);
    let v = serde_json::to_value(&quiz).unwrap();
    assert_eq!(v["id"], 7);
    assert_eq!(v["wordGroups"][0]["words"][3], "d");
    assert!(v["definitions"].is_object());
  }

  #[test]
  fn wrong_submission_omits_explanation() {
    let sub = SubmittedGroup { words: vec!["a".into()], is_correct: false, explanation: None };
    let v = serde_json::to_value(&sub).unwrap();
    assert_eq!(v["isCorrect"], false);
    assert!(v.get("explanation").is_none());
  }

  #[test]
  fn patch_merges_only_present_fields() {
    let mut record = NewGameRecord { quiz_id: 1, submitted_groups: vec![], score: 40, completed: false }.with_id(3);
    record.apply(GameRecordPatch { completed: Some(true), ..Default::default() });
    assert_eq!(record.id, 3);
    assert_eq!(record.score, 40);
    assert!(record.completed);
  }
}
