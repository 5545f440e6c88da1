//! WebSocket upgrade + message loop. Each connection owns one game session;
//! every client message is parsed as JSON, applied to the session, and answered
//! with a single JSON message.

use std::sync::Arc;
use axum::{
  extract::{
    ws::{Message, WebSocket},
    State, WebSocketUpgrade,
  },
  response::IntoResponse,
};
use rand::rngs::StdRng;
use rand::SeedableRng;
use tracing::{info, error, instrument, debug};
use uuid::Uuid;

use crate::protocol::{ClientWsMessage, ServerWsMessage};
use crate::session::{GameSession, Step};
use crate::state::AppState;

#[instrument(level = "info", skip(state))]
pub async fn ws_upgrade(ws: WebSocketUpgrade, State(state): State<Arc<AppState>>) -> impl IntoResponse {
  info!(target: "word_quest", "WebSocket upgrade requested");
  ws.on_upgrade(move |socket| handle_ws(socket, state))
}

/// Per-connection play state.
struct Connection {
  id: Uuid,
  rng: StdRng,
  session: Option<GameSession>,
}

#[instrument(level = "info", skip(socket, state))]
async fn handle_ws(mut socket: WebSocket, state: Arc<AppState>) {
  let mut conn = Connection { id: Uuid::new_v4(), rng: StdRng::from_entropy(), session: None };
  info!(target: "word_quest", conn = %conn.id, "WebSocket connected");
  while let Some(Ok(msg)) = socket.recv().await {
    match msg {
      Message::Text(txt) => {
        // Parse, dispatch, serialize response.
        let reply_msg = match serde_json::from_str::<ClientWsMessage>(&txt) {
          Ok(incoming) => {
            debug!(target: "word_quest", conn = %conn.id, "WS received: {:?}", &incoming);
            handle_client_ws(incoming, &mut conn, &state).await
          }
          Err(e) => ServerWsMessage::Error { message: format!("Invalid JSON: {}", e) },
        };

        let out = serde_json::to_string(&reply_msg).unwrap_or_else(|e| {
          serde_json::json!({ "type": "error", "message": format!("Serialization error: {}", e) }).to_string()
        });

        if let Err(e) = socket.send(Message::Text(out)).await {
          error!(target: "word_quest", conn = %conn.id, error = %e, "WS send error");
          break;
        }
      }
      Message::Ping(payload) => { let _ = socket.send(Message::Pong(payload)).await; }
      Message::Close(_) => break,
      _ => {}
    }
  }
  info!(target: "word_quest", conn = %conn.id, "WebSocket disconnected");
}

#[instrument(level = "info", skip(conn, state), fields(conn = %conn.id))]
async fn handle_client_ws(msg: ClientWsMessage, conn: &mut Connection, state: &AppState) -> ServerWsMessage {
  let Connection { rng, session, .. } = conn;
  match msg {
    ClientWsMessage::Ping => ServerWsMessage::Pong,

    ClientWsMessage::Start { word_set_id } => match state.store.get_quiz(word_set_id).await {
      Ok(quiz) => {
        let started = session.insert(GameSession::new(quiz, rng));
        info!(target: "quiz", id = started.quiz().id, name = %started.quiz().name, "WS session started");
        ServerWsMessage::Session { session: started.view(), notices: Vec::new() }
      }
      Err(e) => ServerWsMessage::Error { message: e.to_string() },
    },

    ClientWsMessage::SelectWord { word } => match session {
      Some(s) => {
        let step = s.select_word(&word);
        debug!(target: "quiz", %word, selected = s.selection().len(), "WS word toggled");
        reply(s, step)
      }
      None => no_session(),
    },

    ClientWsMessage::Submit => match session {
      Some(s) => {
        let step = s.submit();
        if let Some(record) = step.finished.clone() {
          let stored = state.store.create_game_record(record).await;
          s.mark_persisted(stored.id);
          info!(target: "quiz", id = stored.id, quiz_id = stored.quiz_id, score = stored.score, attempts = s.history().len(), "WS session finished; game state stored");
        }
        reply(s, step)
      }
      None => no_session(),
    },

    ClientWsMessage::Reset => match session {
      Some(s) => {
        let step = s.reset(rng);
        reply(s, step)
      }
      None => no_session(),
    },
  }
}

fn reply(session: &GameSession, step: Step) -> ServerWsMessage {
  debug!(target: "quiz", phase = ?step.phase, notices = step.notices.len(), "WS session step");
  ServerWsMessage::Session { session: session.view(), notices: step.notices }
}

fn no_session() -> ServerWsMessage {
  ServerWsMessage::Error { message: "No session: send a start message first.".into() }
}
