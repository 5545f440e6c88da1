//! Service errors and their HTTP rendering.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use tracing::warn;

use crate::protocol::ErrorOut;

#[derive(Debug, thiserror::Error)]
pub enum QuestError {
    #[error("{entity} {id} not found")]
    NotFound { entity: &'static str, id: String },

    #[error("Invalid {what}")]
    Validation {
        what: &'static str,
        errors: Vec<String>,
    },
}

impl QuestError {
    pub fn not_found(entity: &'static str, id: impl ToString) -> Self {
        QuestError::NotFound {
            entity,
            id: id.to_string(),
        }
    }

    pub fn status(&self) -> StatusCode {
        match self {
            QuestError::NotFound { .. } => StatusCode::NOT_FOUND,
            QuestError::Validation { .. } => StatusCode::BAD_REQUEST,
        }
    }
}

impl IntoResponse for QuestError {
    fn into_response(self) -> Response {
        let status = self.status();
        warn!(target: "word_quest", %status, error = %self, "Request rejected");
        let message = self.to_string();
        let errors = match self {
            QuestError::Validation { errors, .. } => errors,
            QuestError::NotFound { .. } => Vec::new(),
        };
        let body = ErrorOut { message, errors };
        (status, Json(body)).into_response()
    }
}
