//! The narrow interface to the generative-model client.
//!
//! The core never performs network I/O. The serving layer owns the HTTP
//! call; this module owns both ends of the data contract around it:
//!   - building the judge request (system prompt + filled user template +
//!     the schema name the caller must ask the model for), and
//!   - parsing the raw model text back into an `UpstreamJudgment`.
//!
//! Usage/cost metadata travels alongside the reply but is never interpreted
//! here beyond logging.

use serde::{Deserialize, Serialize};
use tracing::{info, instrument};

use crate::config::JudgePrompts;
use crate::domain::{Event, UpstreamJudgment};
use crate::error::CoreError;
use crate::judge::ensure_judgeable;
use crate::util::fill_template;

/// Schema name the caller requests from the model for a composition verdict.
pub const COMPOSITION_SCHEMA: &str = "composition_judgment";

/// A fully assembled judge request, ready for the serving layer to send.
#[derive(Clone, Debug, Serialize)]
pub struct JudgeRequest {
  pub system: String,
  pub user: String,
  pub schema: &'static str,
}

/// Token/cost accounting reported by the model client. Opaque to the core.
#[derive(Clone, Copy, Debug, Default, Deserialize, Serialize)]
pub struct ModelUsage {
  #[serde(default)] pub prompt_tokens: Option<u32>,
  #[serde(default)] pub completion_tokens: Option<u32>,
  #[serde(default)] pub total_tokens: Option<u32>,
  #[serde(default)] pub cost_usd: Option<f64>,
}

/// What the serving layer hands back after the model call.
#[derive(Clone, Debug, Deserialize)]
pub struct JudgeReply {
  /// Raw model text, expected to be one JSON object.
  pub raw: String,
  #[serde(default)] pub usage: Option<ModelUsage>,
}

/// Assemble the composition-judge request for six candidate events.
///
/// Input validation matches the judge's own: at least six events and a
/// recognized era track, so a request we refuse to build is one the judge
/// would have refused to score.
#[instrument(level = "info", skip(prompts, events), fields(%era, candidates = events.len()))]
pub fn build_composition_request(
  prompts: &JudgePrompts,
  events: &[Event],
  era: &str,
) -> Result<JudgeRequest, CoreError> {
  ensure_judgeable(events, era)?;

  let events_json = serde_json::to_string_pretty(events)
    .map_err(|e| CoreError::PromptBuild(format!("failed to serialize candidate events: {e}")))?;
  let user = fill_template(
    &prompts.composition_user_template,
    &[("era", era), ("events_json", &events_json)],
  );

  Ok(JudgeRequest {
    system: prompts.composition_system.clone(),
    user,
    schema: COMPOSITION_SCHEMA,
  })
}

/// Parse a reply into the judgment the composition judge will re-score.
///
/// Strict: the model must return exactly the schema, or the caller retries
/// at its own layer. Usage numbers are logged and passed through untouched.
#[instrument(level = "info", skip(reply), fields(raw_len = reply.raw.len()))]
pub fn parse_judge_reply(reply: &JudgeReply) -> Result<UpstreamJudgment, CoreError> {
  if let Some(usage) = &reply.usage {
    info!(
      target: "chronofall_core",
      prompt_tokens = ?usage.prompt_tokens,
      completion_tokens = ?usage.completion_tokens,
      total_tokens = ?usage.total_tokens,
      cost_usd = ?usage.cost_usd,
      "Judge model usage"
    );
  }
  serde_json::from_str::<UpstreamJudgment>(reply.raw.trim())
    .map_err(|e| CoreError::MalformedJudgment(e.to_string()))
}
