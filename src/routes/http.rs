//! HTTP endpoint handlers. These are thin wrappers around the store and the quiz rules.
//! Each handler is instrumented and logs its parameters and basic result info.

use std::sync::Arc;
use axum::{
  extract::{rejection::JsonRejection, Path, State},
  response::IntoResponse,
  Json,
};
use tracing::{info, instrument};

use crate::domain::{GameRecord, Quiz};
use crate::error::QuestError;
use crate::logic::validate_group;
use crate::protocol::*;
use crate::state::AppState;

/// Ids arrive as raw path segments; anything that is not a number cannot exist.
fn parse_id(entity: &'static str, raw: &str) -> Result<u64, QuestError> {
  raw.parse::<u64>().map_err(|_| QuestError::not_found(entity, raw))
}

/// Body shape errors are 400s, not axum's default 422.
fn rejected(what: &'static str, e: JsonRejection) -> QuestError {
  QuestError::Validation { what, errors: vec![e.body_text()] }
}

#[instrument(level = "info")]
pub async fn http_health() -> impl IntoResponse { Json(HealthOut { ok: true }) }

#[instrument(level = "info", skip(state))]
pub async fn http_list_word_sets(State(state): State<Arc<AppState>>) -> Json<Vec<Quiz>> {
  let quizzes = state.store.list_quizzes().await;
  info!(target: "quiz", count = quizzes.len(), "HTTP word sets listed");
  Json(quizzes)
}

#[instrument(level = "info", skip(state), fields(%id))]
pub async fn http_get_word_set(
  State(state): State<Arc<AppState>>,
  Path(id): Path<String>,
) -> Result<Json<Quiz>, QuestError> {
  let quiz = state.store.get_quiz(parse_id("Word set", &id)?).await?;
  info!(target: "quiz", id = quiz.id, name = %quiz.name, "HTTP word set served");
  Ok(Json(quiz))
}

#[instrument(level = "info", skip(state, payload), fields(%id))]
pub async fn http_post_check_group(
  State(state): State<Arc<AppState>>,
  Path(id): Path<String>,
  payload: Result<Json<CheckIn>, JsonRejection>,
) -> Result<Json<CheckOut>, QuestError> {
  let quiz = state.store.get_quiz(parse_id("Word set", &id)?).await?;
  let Json(body) = payload.map_err(|e| rejected("group", e))?;
  let words = body.validate()?;
  let verdict = validate_group(&words, &quiz);
  info!(target: "quiz", id = quiz.id, correct = verdict.is_correct, "HTTP group checked");
  Ok(Json(CheckOut { is_correct: verdict.is_correct, explanation: verdict.explanation }))
}

#[instrument(level = "info", skip(state, payload))]
pub async fn http_post_game_state(
  State(state): State<Arc<AppState>>,
  payload: Result<Json<NewGameRecordIn>, JsonRejection>,
) -> Result<Json<GameRecord>, QuestError> {
  let Json(body) = payload.map_err(|e| rejected("game state data", e))?;
  let record = state.store.create_game_record(body.validate()?).await;
  info!(target: "quiz", id = record.id, quiz_id = record.quiz_id, score = record.score, completed = record.completed, "HTTP game state created");
  Ok(Json(record))
}

#[instrument(level = "info", skip(state), fields(%id))]
pub async fn http_get_game_state(
  State(state): State<Arc<AppState>>,
  Path(id): Path<String>,
) -> Result<Json<GameRecord>, QuestError> {
  let record = state.store.get_game_record(parse_id("Game state", &id)?).await?;
  Ok(Json(record))
}

#[instrument(level = "info", skip(state, payload), fields(%id))]
pub async fn http_patch_game_state(
  State(state): State<Arc<AppState>>,
  Path(id): Path<String>,
  payload: Result<Json<GameRecordPatchIn>, JsonRejection>,
) -> Result<Json<GameRecord>, QuestError> {
  let id = parse_id("Game state", &id)?;
  // Unknown ids are 404 whatever the body looks like.
  if !state.store.contains_game_record(id).await {
    return Err(QuestError::not_found("Game state", id));
  }
  let Json(body) = payload.map_err(|e| rejected("game state update", e))?;
  let record = state.store.update_game_record(id, body.validate()?).await?;
  info!(target: "quiz", id = record.id, score = record.score, completed = record.completed, "HTTP game state updated");
  Ok(Json(record))
}
