//! Application state: the in-memory store and the catalog loading at startup.
//!
//! The store owns two tables (quizzes, game records). Each table keeps its own
//! id counter starting at 1; ids are never reused, not even after updates.
//! Nothing here survives a restart.

use std::{
    collections::{BTreeMap, HashMap},
    sync::Arc,
};
use tokio::sync::RwLock;
use tracing::{error, info, instrument};

use crate::config::QuestConfig;
use crate::domain::{GameRecord, GameRecordPatch, NewGameRecord, NewQuiz, Quiz};
use crate::error::QuestError;
use crate::seeds::seed_quizzes;

/// Rows keyed by an auto-increment id. `BTreeMap` keeps insertion order for listing.
#[derive(Debug)]
struct Table<T> {
    rows: BTreeMap<u64, T>,
    next_id: u64,
}

impl<T: Clone> Table<T> {
    fn new() -> Self {
        Self {
            rows: BTreeMap::new(),
            next_id: 1,
        }
    }

    fn insert_with(&mut self, build: impl FnOnce(u64) -> T) -> T {
        let id = self.next_id;
        self.next_id += 1;
        let row = build(id);
        self.rows.insert(id, row.clone());
        row
    }
}

#[derive(Clone)]
pub struct Store {
    quizzes: Arc<RwLock<Table<Quiz>>>,
    game_records: Arc<RwLock<Table<GameRecord>>>,
}

impl Default for Store {
    fn default() -> Self {
        Self {
            quizzes: Arc::new(RwLock::new(Table::new())),
            game_records: Arc::new(RwLock::new(Table::new())),
        }
    }
}

impl Store {
    /// All quizzes in insertion order.
    pub async fn list_quizzes(&self) -> Vec<Quiz> {
        self.quizzes.read().await.rows.values().cloned().collect()
    }

    #[instrument(level = "debug", skip(self))]
    pub async fn get_quiz(&self, id: u64) -> Result<Quiz, QuestError> {
        let quizzes = self.quizzes.read().await;
        quizzes
            .rows
            .get(&id)
            .cloned()
            .ok_or_else(|| QuestError::not_found("Word set", id))
    }

    #[instrument(level = "debug", skip(self, quiz), fields(name = %quiz.name))]
    pub async fn create_quiz(&self, quiz: NewQuiz) -> Quiz {
        self.quizzes.write().await.insert_with(|id| quiz.with_id(id))
    }

    #[instrument(level = "debug", skip(self))]
    pub async fn get_game_record(&self, id: u64) -> Result<GameRecord, QuestError> {
        let records = self.game_records.read().await;
        records
            .rows
            .get(&id)
            .cloned()
            .ok_or_else(|| QuestError::not_found("Game state", id))
    }

    pub async fn contains_game_record(&self, id: u64) -> bool {
        self.game_records.read().await.rows.contains_key(&id)
    }

    #[instrument(level = "debug", skip(self, record), fields(quiz_id = record.quiz_id, score = record.score))]
    pub async fn create_game_record(&self, record: NewGameRecord) -> GameRecord {
        self.game_records
            .write()
            .await
            .insert_with(|id| record.with_id(id))
    }

    /// Shallow-merge `patch` into an existing record. Never creates one.
    #[instrument(level = "debug", skip(self, patch))]
    pub async fn update_game_record(
        &self,
        id: u64,
        patch: GameRecordPatch,
    ) -> Result<GameRecord, QuestError> {
        let mut records = self.game_records.write().await;
        let record = records
            .rows
            .get_mut(&id)
            .ok_or_else(|| QuestError::not_found("Game state", id))?;
        record.apply(patch);
        Ok(record.clone())
    }
}

#[derive(Clone)]
pub struct AppState {
    pub store: Store,
    pub static_dir: String,
}

impl AppState {
    /// Build state from config: seed the catalog first, then add valid bank quizzes.
    #[instrument(level = "info", skip_all)]
    pub async fn new(cfg: &QuestConfig) -> Self {
        let store = Store::default();

        for quiz in seed_quizzes() {
            store.create_quiz(quiz).await;
        }

        for qc in &cfg.quizzes {
            let quiz: NewQuiz = qc.clone().into();
            let problems = quiz.integrity_problems();
            if !problems.is_empty() {
                error!(target: "quiz", name = %quiz.name, ?problems, "Skipping bank quiz: answer key is not playable.");
                continue;
            }
            store.create_quiz(quiz).await;
        }

        // Inventory summary by difficulty.
        let mut count_by_diff: HashMap<String, usize> = HashMap::new();
        for quiz in store.list_quizzes().await {
            *count_by_diff.entry(quiz.difficulty).or_default() += 1;
        }
        for (difficulty, count) in count_by_diff {
            info!(target: "quiz", %difficulty, count, "Startup quiz inventory");
        }

        Self {
            store,
            static_dir: cfg.server.static_dir.clone(),
        }
    }
}
