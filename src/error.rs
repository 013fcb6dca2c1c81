//! Error taxonomy for the integrity core.
//!
//! Only caller-input problems are errors here. Quality-verdict overrides and
//! anti-cheat mismatches are ordinary return values (issues / discrepancy
//! lists), and phrase-store persistence failures are logged and swallowed.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum CoreError {
  #[error("puzzle composition needs at least {needed} candidate events, got {got}")]
  TooFewEvents { needed: usize, got: usize },

  #[error("unrecognized era tag '{0}' (expected \"bce\" or \"ce\")")]
  UnknownEra(String),

  #[error("submitted ordering has {got} entries, the puzzle has {expected} events")]
  OrderingLength { expected: usize, got: usize },

  #[error("submitted ordering references unknown event id '{0}'")]
  UnknownEventId(String),

  #[error("submitted ordering repeats event id '{0}'")]
  DuplicateEventId(String),

  #[error("model reply is not a valid composition judgment: {0}")]
  MalformedJudgment(String),

  #[error("failed to build judge prompt: {0}")]
  PromptBuild(String),
}
