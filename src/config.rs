//! Loading core configuration (judge prompts + phrase-store path) from TOML.
//!
//! Everything has a usable default; the TOML file only exists for tuning
//! prompt wording or relocating the leaky-phrase store.

use serde::Deserialize;
use tracing::{error, info};

#[derive(Clone, Debug, Deserialize, Default)]
pub struct CoreConfig {
  #[serde(default)]
  pub prompts: JudgePrompts,
  /// Where the append-only leaky-phrase store lives. `None` keeps the
  /// detector purely in-memory (learning still works, just not durably).
  #[serde(default)]
  pub phrase_store_path: Option<String>,
}

/// Prompts for the composition-judge model call. The call itself happens in
/// the serving layer; these templates define the narrow request we build for
/// it (see `model::build_composition_request`).
#[derive(Clone, Debug, Deserialize)]
pub struct JudgePrompts {
  pub composition_system: String,
  pub composition_user_template: String,
}

impl Default for JudgePrompts {
  fn default() -> Self {
    Self {
      composition_system: "You are a strict reviewer of history-ordering puzzles. \
        Score the six candidate events as one puzzle. Respond ONLY with strict JSON: \
        {\"approved\": boolean, \"qualityScore\": number, \
        \"ordering\": {\"sequence\": [six zero-based indices], \"rationale\": string}, \
        \"composition\": {\"topicDiversity\": number, \"geographicSpread\": number, \
        \"difficultyGradient\": number, \"guessability\": number}, \
        \"issues\": [string], \"suggestions\": [string]}. \
        All scores are between 0 and 1. Do not mention exact years in the rationale."
        .into(),
      composition_user_template:
        "Era track: {era}\nCandidate events (JSON):\n{events_json}\n\nJudge this six-event puzzle."
          .into(),
    }
  }
}

/// Attempt to load `CoreConfig` from CHRONOFALL_CONFIG_PATH.
/// On any parsing/IO error, returns None and the caller falls back to defaults.
pub fn load_core_config_from_env() -> Option<CoreConfig> {
  let path = std::env::var("CHRONOFALL_CONFIG_PATH").ok()?;
  match std::fs::read_to_string(&path) {
    Ok(s) => match toml::from_str::<CoreConfig>(&s) {
      Ok(cfg) => {
        info!(target: "chronofall_core", %path, "Loaded core config (TOML)");
        Some(cfg)
      }
      Err(e) => {
        error!(target: "chronofall_core", %path, error = %e, "Failed to parse TOML config");
        None
      }
    },
    Err(e) => {
      error!(target: "chronofall_core", %path, error = %e, "Failed to read TOML config file");
      None
    }
  }
}
