//! Core quiz rules shared by the HTTP handlers and the session state machine.
//!
//! This includes:
//!   - Matching a candidate group against the answer key
//!   - Scoring a sequence of submissions
//!   - The completion predicate
//!   - Shuffling the word pool

use std::collections::HashSet;

use rand::seq::SliceRandom;
use rand::Rng;

use crate::domain::{Quiz, SubmittedGroup};

/// Outcome of matching one candidate group.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct GroupVerdict {
  pub is_correct: bool,
  pub explanation: Option<String>,
}

impl GroupVerdict {
  pub fn into_submission(self, words: Vec<String>) -> SubmittedGroup {
    SubmittedGroup { words, is_correct: self.is_correct, explanation: self.explanation }
  }
}

/// Find the first group of the answer key whose words equal `candidate` as a set.
///
/// The caller is responsible for handing in exactly four distinct words.
/// Groups are searched in declared order, so if an author ever places the same
/// word in two groups the earlier group wins.
pub fn validate_group<S: AsRef<str>>(candidate: &[S], quiz: &Quiz) -> GroupVerdict {
  let wanted: HashSet<&str> = candidate.iter().map(AsRef::as_ref).collect();
  let matched = quiz.word_groups.iter().find(|group| {
    let words: HashSet<&str> = group.words.iter().map(String::as_str).collect();
    words == wanted
  });

  match matched {
    Some(group) => GroupVerdict { is_correct: true, explanation: Some(group.explanation.clone()) },
    None => GroupVerdict { is_correct: false, explanation: None },
  }
}

/// Percentage of correct submissions, rounded half-up. Zero when nothing was submitted.
///
/// This is accuracy over the player's own attempts, not coverage of the answer key.
pub fn compute_score(submissions: &[SubmittedGroup]) -> u8 {
  let total = submissions.len();
  if total == 0 {
    return 0;
  }
  let correct = submissions.iter().filter(|s| s.is_correct).count();
  // Integer form of round(100 * correct / total) with halves going up.
  ((100 * correct + total / 2) / total) as u8
}

/// True once every word of the answer key has shown up in a correct submission.
pub fn is_quiz_complete(quiz: &Quiz, submissions: &[SubmittedGroup]) -> bool {
  let solved: HashSet<&str> = submissions
    .iter()
    .filter(|s| s.is_correct)
    .flat_map(|s| s.words.iter().map(String::as_str))
    .collect();
  quiz.words().all(|w| solved.contains(w))
}

/// All quiz words in random order (Fisher–Yates via `SliceRandom::shuffle`).
pub fn shuffled_pool<R: Rng + ?Sized>(quiz: &Quiz, rng: &mut R) -> Vec<String> {
  let mut pool: Vec<String> = quiz.words().map(str::to_string).collect();
  pool.shuffle(rng);
  pool
}

#[cfg(test)]
mod tests {
  use super::*;
  use crate::domain::{NewQuiz, WordGroup};
  use crate::seeds::branches_of_government;
  use rand::rngs::StdRng;
  use rand::SeedableRng;
  use std::collections::BTreeMap;

  fn sub(is_correct: bool) -> SubmittedGroup {
    SubmittedGroup { words: vec![], is_correct, explanation: None }
  }

  fn correct_submission(quiz: &Quiz, idx: usize) -> SubmittedGroup {
    let words = quiz.word_groups[idx].words.clone();
    validate_group(&words, quiz).into_submission(words)
  }

  #[test]
  fn every_group_of_the_key_validates_with_its_explanation() {
    let quiz = branches_of_government().with_id(1);
    for group in &quiz.word_groups {
      let mut reversed = group.words.clone();
      reversed.reverse();
      let verdict = validate_group(&reversed, &quiz);
      assert!(verdict.is_correct);
      assert_eq!(verdict.explanation.as_deref(), Some(group.explanation.as_str()));
    }
  }

  #[test]
  fn mixed_group_is_wrong_without_explanation() {
    let quiz = branches_of_government().with_id(1);
    let verdict = validate_group(&["President", "Senate", "Supreme Court", "House"], &quiz);
    assert_eq!(verdict, GroupVerdict { is_correct: false, explanation: None });
  }

  #[test]
  fn partial_overlap_is_not_a_match() {
    let quiz = branches_of_government().with_id(1);
    let verdict = validate_group(&["President", "Vice President", "Cabinet", "Senate"], &quiz);
    assert!(!verdict.is_correct);
  }

  #[test]
  fn first_declared_group_wins_on_duplicate_keys() {
    let words: Vec<String> = ["a", "b", "c", "d"].iter().map(|w| w.to_string()).collect();
    let quiz = NewQuiz {
      name: "dup".into(),
      difficulty: "easy".into(),
      word_groups: vec![
        WordGroup { words: words.clone(), explanation: "first".into() },
        WordGroup { words: words.clone(), explanation: "second".into() },
      ],
      definitions: BTreeMap::new(),
    }
    .with_id(1);
    assert_eq!(validate_group(&words, &quiz).explanation.as_deref(), Some("first"));
  }

  #[test]
  fn score_is_accuracy_over_attempts() {
    assert_eq!(compute_score(&[]), 0);
    assert_eq!(compute_score(&[sub(true), sub(true)]), 100);
    assert_eq!(compute_score(&[sub(true), sub(false)]), 50);
    assert_eq!(compute_score(&[sub(true), sub(false), sub(false)]), 33);
    assert_eq!(compute_score(&[sub(true), sub(true), sub(false)]), 67);
    assert_eq!(compute_score(&[sub(false), sub(false)]), 0);
  }

  #[test]
  fn score_rounds_halves_up() {
    let mut subs = vec![sub(true)];
    subs.extend(std::iter::repeat_with(|| sub(false)).take(7));
    // 1 of 8 = 12.5%
    assert_eq!(compute_score(&subs), 13);
    let mut subs = vec![sub(true); 3];
    subs.extend(std::iter::repeat_with(|| sub(false)).take(5));
    // 3 of 8 = 37.5%
    assert_eq!(compute_score(&subs), 38);
  }

  #[test]
  fn completion_requires_every_group_and_stays_true() {
    let quiz = branches_of_government().with_id(1);
    let mut subs = vec![correct_submission(&quiz, 0)];
    assert!(!is_quiz_complete(&quiz, &subs));
    subs.push(correct_submission(&quiz, 1));
    subs.push(validate_group(&["President", "Senate", "Supreme Court", "House"], &quiz)
      .into_submission(vec!["President".into(), "Senate".into(), "Supreme Court".into(), "House".into()]));
    assert!(!is_quiz_complete(&quiz, &subs));
    subs.push(correct_submission(&quiz, 2));
    assert!(is_quiz_complete(&quiz, &subs));
    subs.push(sub(false));
    assert!(is_quiz_complete(&quiz, &subs));
  }

  #[test]
  fn wrong_submissions_never_count_toward_completion() {
    let quiz = branches_of_government().with_id(1);
    let subs: Vec<SubmittedGroup> = quiz
      .word_groups
      .iter()
      .map(|g| SubmittedGroup { words: g.words.clone(), is_correct: false, explanation: None })
      .collect();
    assert!(!is_quiz_complete(&quiz, &subs));
  }

  #[test]
  fn shuffle_keeps_every_word_once() {
    let quiz = branches_of_government().with_id(1);
    let mut rng = StdRng::seed_from_u64(7);
    let mut pool = shuffled_pool(&quiz, &mut rng);
    assert_eq!(pool.len(), 12);
    pool.sort();
    let mut expected: Vec<String> = quiz.words().map(str::to_string).collect();
    expected.sort();
    assert_eq!(pool, expected);
  }

  #[test]
  fn shuffle_is_reproducible_for_a_seed() {
    let quiz = branches_of_government().with_id(1);
    let a = shuffled_pool(&quiz, &mut StdRng::seed_from_u64(42));
    let b = shuffled_pool(&quiz, &mut StdRng::seed_from_u64(42));
    assert_eq!(a, b);
  }
}
