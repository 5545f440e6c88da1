//! Loading service configuration (server settings + optional quiz bank) from TOML.
//!
//! Example:
//!
//! ```toml
//! [server]
//! port = 8080
//! static_dir = "./static"
//!
//! [[quizzes]]
//! name = "Local Government"
//! difficulty = "medium"
//! groups = [
//!   { words = ["Mayor", "Council", "Ordinance", "City Hall"], explanation = "City government." },
//! ]
//! ```

use std::collections::BTreeMap;

use serde::Deserialize;
use tracing::{error, info};

use crate::domain::{NewQuiz, WordGroup};

#[derive(Clone, Debug, Deserialize, Default)]
pub struct QuestConfig {
  #[serde(default)]
  pub server: ServerCfg,
  #[serde(default)]
  pub quizzes: Vec<QuizCfg>,
}

#[derive(Clone, Debug, Deserialize)]
pub struct ServerCfg {
  #[serde(default = "default_port")]
  pub port: u16,
  #[serde(default = "default_static_dir")]
  pub static_dir: String,
}

fn default_port() -> u16 { 3000 }
fn default_static_dir() -> String { "./static".into() }

impl Default for ServerCfg {
  fn default() -> Self {
    Self { port: default_port(), static_dir: default_static_dir() }
  }
}

/// Quiz entry accepted in the TOML bank. Checked for integrity before it is stored.
#[derive(Clone, Debug, Deserialize)]
pub struct QuizCfg {
  pub name: String,
  pub difficulty: String,
  #[serde(default)] pub groups: Vec<GroupCfg>,
  #[serde(default)] pub definitions: BTreeMap<String, String>,
}

#[derive(Clone, Debug, Deserialize)]
pub struct GroupCfg {
  pub words: Vec<String>,
  pub explanation: String,
}

impl From<QuizCfg> for NewQuiz {
  fn from(cfg: QuizCfg) -> Self {
    NewQuiz {
      name: cfg.name,
      difficulty: cfg.difficulty,
      word_groups: cfg
        .groups
        .into_iter()
        .map(|g| WordGroup { words: g.words, explanation: g.explanation })
        .collect(),
      definitions: cfg.definitions,
    }
  }
}

pub fn parse_quest_config(s: &str) -> Result<QuestConfig, toml::de::Error> {
  toml::from_str::<QuestConfig>(s)
}

/// Attempt to load `QuestConfig` from QUEST_CONFIG_PATH. On any parsing/IO error, returns None.
pub fn load_quest_config_from_env() -> Option<QuestConfig> {
  let path = std::env::var("QUEST_CONFIG_PATH").ok()?;
  match std::fs::read_to_string(&path) {
    Ok(s) => match parse_quest_config(&s) {
      Ok(cfg) => {
        info!(target: "word_quest", %path, bank_quizzes = cfg.quizzes.len(), "Loaded quest config (TOML)");
        Some(cfg)
      }
      Err(e) => {
        error!(target: "word_quest", %path, error = %e, "Failed to parse TOML config");
        None
      }
    },
    Err(e) => {
      error!(target: "word_quest", %path, error = %e, "Failed to read TOML config file");
      None
    }
  }
}
