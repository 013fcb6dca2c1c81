//! Composition judging: turn the model's claimed verdict on a six-event
//! puzzle into an authoritative one.
//!
//! The model's `approved` and `qualityScore` are never taken at face value.
//! The quality score is recomputed from fixed weights over the four
//! composition dimensions, the approval decision is re-derived from two
//! gates, and any downgrade of a claimed approval is explained in `issues`.

use serde::Serialize;
use tracing::{instrument, warn};

use crate::domain::{CompositionScores, Event, RecommendedOrdering, UpstreamJudgment};
use crate::error::CoreError;
use crate::util::round3;
use crate::verify::reconcile;

/// A puzzle is always composed from at least this many candidates.
pub const MIN_CANDIDATE_EVENTS: usize = 6;
/// Overall gate: recomputed quality score must reach this (inclusive).
pub const APPROVAL_THRESHOLD: f64 = 0.6;
/// Component gate: every dimension must reach this (inclusive).
pub const COMPONENT_FLOOR: f64 = 0.4;

/// The two era tracks a generation request may target.
pub const ERA_TRACKS: [&str; 2] = ["bce", "ce"];

// Difficulty gradient and guessability weigh most because they most directly
// shape how a round feels to play. Weights sum to 1.0.
const W_TOPIC_DIVERSITY: f64 = 0.2;
const W_GEOGRAPHIC_SPREAD: f64 = 0.2;
const W_DIFFICULTY_GRADIENT: f64 = 0.3;
const W_GUESSABILITY: f64 = 0.3;

/// The authoritative verdict: recomputed score and approval, the model's
/// ordering recommendation and suggestions passed through, and its issues
/// extended with an explanation whenever a claimed approval was overturned.
#[derive(Clone, Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CompositionJudgment {
  pub approved: bool,
  pub quality_score: f64,
  pub ordering: RecommendedOrdering,
  pub composition: CompositionScores,
  pub issues: Vec<String>,
  pub suggestions: Vec<String>,
}

/// Caller-input checks shared with the request builder: a judge call (or a
/// judge prompt) for fewer than six events or an unknown era track is a bug
/// in the caller, not a quality problem.
pub fn ensure_judgeable(events: &[Event], era: &str) -> Result<(), CoreError> {
  if events.len() < MIN_CANDIDATE_EVENTS {
    return Err(CoreError::TooFewEvents { needed: MIN_CANDIDATE_EVENTS, got: events.len() });
  }
  if !ERA_TRACKS.contains(&era) {
    return Err(CoreError::UnknownEra(era.to_string()));
  }
  Ok(())
}

/// Weighted recomputation of the overall quality score, rounded to 3 places.
pub fn quality_score(c: &CompositionScores) -> f64 {
  round3(
    c.topic_diversity * W_TOPIC_DIVERSITY
      + c.geographic_spread * W_GEOGRAPHIC_SPREAD
      + c.difficulty_gradient * W_DIFFICULTY_GRADIENT
      + c.guessability * W_GUESSABILITY,
  )
}

// Fixed reporting order for failing dimensions.
fn low_dimensions(c: &CompositionScores) -> Vec<&'static str> {
  let dims = [
    ("topicDiversity", c.topic_diversity),
    ("geographicSpread", c.geographic_spread),
    ("difficultyGradient", c.difficulty_gradient),
    ("guessability", c.guessability),
  ];
  dims.iter().filter(|(_, v)| *v < COMPONENT_FLOOR).map(|(name, _)| *name).collect()
}

/// Produce the authoritative judgment for a candidate puzzle.
///
/// Pure over its inputs: identical composition scores and upstream claims
/// always yield the identical verdict, whatever produced them.
#[instrument(level = "info", skip(events, upstream), fields(%era, candidates = events.len(), claimed = upstream.approved))]
pub fn judge_composition(
  events: &[Event],
  era: &str,
  upstream: &UpstreamJudgment,
) -> Result<CompositionJudgment, CoreError> {
  ensure_judgeable(events, era)?;

  let score = quality_score(&upstream.composition);
  let overall_ok = score >= APPROVAL_THRESHOLD;
  let low = low_dimensions(&upstream.composition);
  let components_ok = low.is_empty();

  let (approved, override_note) = reconcile(upstream.approved, overall_ok && components_ok, |claimed, real| {
    format!("upstream claimed approved={claimed}, recomputed approved={real}")
  });
  if let Some(note) = override_note {
    warn!(target: "review", %era, score, %note, "Overriding upstream approval claim");
  }

  let mut issues = upstream.issues.clone();
  // Only a downgraded approval needs explaining; an upstream rejection we
  // agree or disagree with carries its own issues already.
  if upstream.approved && !approved {
    if !overall_ok {
      issues.push(format!("Quality score {score:.2} below {APPROVAL_THRESHOLD} threshold"));
    }
    if !components_ok {
      issues.push(format!("Low scores: {}", low.join(", ")));
    }
  }

  Ok(CompositionJudgment {
    approved,
    quality_score: score,
    ordering: upstream.ordering.clone(),
    composition: upstream.composition,
    issues,
    suggestions: upstream.suggestions.clone(),
  })
}
