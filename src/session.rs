//! Per-player game session: word pool, current selection, and submission history.
//!
//! The session never renders or persists anything itself. Every mutating call
//! returns a [`Step`] carrying the new phase and the notices the client should
//! show. When the last group is solved the step also carries the finished
//! [`NewGameRecord`] for the caller to store.

use rand::Rng;
use serde::Serialize;

use crate::domain::{NewGameRecord, Quiz, SubmittedGroup, GROUP_SIZE};
use crate::logic::{compute_score, is_quiz_complete, shuffled_pool, validate_group};

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Phase {
    Selecting,
    ReadyToSubmit,
    Finished,
}

/// Side effects for the client to display.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Notice {
    MaximumReached { max: usize },
    UnknownWord { word: String },
    NotReady { selected: usize },
    SessionFinished,
    Correct { explanation: String },
    Incorrect,
    Completed { score: u8 },
}

#[derive(Debug)]
pub struct Step {
    pub phase: Phase,
    pub notices: Vec<Notice>,
    pub finished: Option<NewGameRecord>,
}

/// Serializable snapshot of a session.
#[derive(Clone, Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SessionView {
    pub word_set_id: u64,
    pub name: String,
    pub difficulty: String,
    pub pool: Vec<String>,
    pub selection: Vec<String>,
    pub submissions: Vec<SubmittedGroup>,
    pub score: u8,
    pub phase: Phase,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub game_state_id: Option<u64>,
}

#[derive(Debug)]
pub struct GameSession {
    quiz: Quiz,
    pool: Vec<String>,
    selection: Vec<String>,
    history: Vec<SubmittedGroup>,
    finished: bool,
    game_state_id: Option<u64>,
}

impl GameSession {
    pub fn new<R: Rng + ?Sized>(quiz: Quiz, rng: &mut R) -> Self {
        let pool = shuffled_pool(&quiz, rng);
        Self {
            quiz,
            pool,
            selection: Vec::with_capacity(GROUP_SIZE),
            history: Vec::new(),
            finished: false,
            game_state_id: None,
        }
    }

    pub fn quiz(&self) -> &Quiz {
        &self.quiz
    }

    pub fn selection(&self) -> &[String] {
        &self.selection
    }

    pub fn history(&self) -> &[SubmittedGroup] {
        &self.history
    }

    pub fn score(&self) -> u8 {
        compute_score(&self.history)
    }

    pub fn phase(&self) -> Phase {
        if self.finished {
            Phase::Finished
        } else if self.selection.len() == GROUP_SIZE {
            Phase::ReadyToSubmit
        } else {
            Phase::Selecting
        }
    }

    /// Toggle `word` in the selection.
    pub fn select_word(&mut self, word: &str) -> Step {
        if self.finished {
            return self.step(vec![Notice::SessionFinished]);
        }
        if let Some(pos) = self.selection.iter().position(|w| w == word) {
            self.selection.remove(pos);
            return self.step(Vec::new());
        }
        if !self.quiz.contains_word(word) {
            return self.step(vec![Notice::UnknownWord { word: word.to_string() }]);
        }
        if self.selection.len() >= GROUP_SIZE {
            return self.step(vec![Notice::MaximumReached { max: GROUP_SIZE }]);
        }
        self.selection.push(word.to_string());
        self.step(Vec::new())
    }

    /// Judge the current selection. Only acts when exactly four words are selected.
    pub fn submit(&mut self) -> Step {
        if self.finished {
            return self.step(vec![Notice::SessionFinished]);
        }
        if self.selection.len() != GROUP_SIZE {
            let selected = self.selection.len();
            return self.step(vec![Notice::NotReady { selected }]);
        }

        let words = std::mem::take(&mut self.selection);
        let verdict = validate_group(&words, &self.quiz);
        let mut notices = vec![match &verdict.explanation {
            Some(explanation) if verdict.is_correct => Notice::Correct {
                explanation: explanation.clone(),
            },
            _ => Notice::Incorrect,
        }];
        self.history.push(verdict.into_submission(words));

        if !is_quiz_complete(&self.quiz, &self.history) {
            return self.step(notices);
        }

        self.finished = true;
        let score = self.score();
        notices.push(Notice::Completed { score });
        let record = NewGameRecord {
            quiz_id: self.quiz.id,
            submitted_groups: self.history.clone(),
            score,
            completed: true,
        };
        Step {
            phase: self.phase(),
            notices,
            finished: Some(record),
        }
    }

    /// Start over with an empty selection and history and a freshly shuffled pool.
    pub fn reset<R: Rng + ?Sized>(&mut self, rng: &mut R) -> Step {
        self.pool = shuffled_pool(&self.quiz, rng);
        self.selection.clear();
        self.history.clear();
        self.finished = false;
        self.game_state_id = None;
        self.step(Vec::new())
    }

    /// Remember the id the store gave the finished record.
    pub fn mark_persisted(&mut self, game_state_id: u64) {
        self.game_state_id = Some(game_state_id);
    }

    pub fn view(&self) -> SessionView {
        SessionView {
            word_set_id: self.quiz.id,
            name: self.quiz.name.clone(),
            difficulty: self.quiz.difficulty.clone(),
            pool: self.pool.clone(),
            selection: self.selection.clone(),
            submissions: self.history.clone(),
            score: self.score(),
            phase: self.phase(),
            game_state_id: self.game_state_id,
        }
    }

    fn step(&self, notices: Vec<Notice>) -> Step {
        Step {
            phase: self.phase(),
            notices,
            finished: None,
        }
    }
}
