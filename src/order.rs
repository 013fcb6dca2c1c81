//! Anti-cheat scoring for the ordering game.
//!
//! A client reports how its ordering went; nothing it says is trusted.
//! Three layers, cheapest first, each a pure function over the canonical
//! event set:
//!   1) `would_solve` — is this ordering a win at all;
//!   2) `evaluate_ordering` — authoritative per-position feedback and
//!      pairwise correctness;
//!   3) `is_solved` — terminal check over server-verified feedback.
//! `verify_attempt` runs them together and reconciles the client's claims,
//! handing the caller the recomputed truth plus a list of forged fields.

use serde::{Deserialize, Serialize};
use tracing::{instrument, warn};

use crate::domain::{Feedback, OrderAttempt};
use crate::error::CoreError;
use crate::verify::reconcile;

/// Points awarded per correctly ordered pair.
pub const POINTS_PER_PAIR: u32 = 2;

/// One dated event as stored for an ordering puzzle.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct OrderEvent {
  pub id: String,
  pub year: i32,
  pub text: String,
}

/// Server-recomputed feedback for a submission (layer 2 output).
#[derive(Clone, Debug, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct OrderEvaluation {
  pub feedback: Vec<Feedback>,
  pub pairs_correct: u32,
  pub total_pairs: u32,
}

/// The outcome of reconciling a client attempt against the recomputation.
#[derive(Clone, Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct VerifiedAttempt {
  pub evaluation: OrderEvaluation,
  pub solved: bool,
  /// `pairs_correct * POINTS_PER_PAIR`. Perfect positions are a display
  /// statistic only and never enter the point formula.
  pub points: u32,
  pub perfect_positions: u32,
  /// One entry per client claim that disagreed with the recomputation.
  /// Non-empty means the submission must be rejected, not persisted.
  pub discrepancies: Vec<String>,
}

/// Canonical ascending-by-year order. The sort is stable, so events with
/// equal years keep the order the canonical array assigns them.
pub fn canonical_order(events: &[OrderEvent]) -> Vec<OrderEvent> {
  let mut sorted = events.to_vec();
  sorted.sort_by_key(|e| e.year);
  sorted
}

// A submitted ordering must be a permutation of the canonical event ids.
fn check_ordering(ordering: &[String], events: &[OrderEvent]) -> Result<(), CoreError> {
  if ordering.len() != events.len() {
    return Err(CoreError::OrderingLength { expected: events.len(), got: ordering.len() });
  }
  let mut seen = std::collections::HashSet::with_capacity(ordering.len());
  for id in ordering {
    if !events.iter().any(|e| &e.id == id) {
      return Err(CoreError::UnknownEventId(id.clone()));
    }
    if !seen.insert(id.as_str()) {
      return Err(CoreError::DuplicateEventId(id.clone()));
    }
  }
  Ok(())
}

/// Layer 1: would this ordering end the game as a win?
///
/// True iff the submitted ids match the canonical order exactly. The
/// coarsest and cheapest check; run it alone when that is all a caller
/// needs to gate.
pub fn would_solve(ordering: &[String], events: &[OrderEvent]) -> Result<bool, CoreError> {
  check_ordering(ordering, events)?;
  let canonical = canonical_order(events);
  Ok(ordering.iter().zip(&canonical).all(|(id, e)| *id == e.id))
}

/// Layer 2: authoritative positional and pairwise recomputation.
///
/// `feedback[i]` is strict positional equality against the canonical order.
/// A pair (i, j), i < j, counts as correct when the event at submitted
/// position i is canonically no later than the one at position j, so ties
/// in year are preserved in either orientation. `total_pairs` is C(n, 2).
#[instrument(level = "debug", skip(ordering, events), fields(n = events.len()))]
pub fn evaluate_ordering(ordering: &[String], events: &[OrderEvent]) -> Result<OrderEvaluation, CoreError> {
  check_ordering(ordering, events)?;

  let canonical = canonical_order(events);
  let feedback: Vec<Feedback> = ordering
    .iter()
    .zip(&canonical)
    .map(|(id, e)| if *id == e.id { Feedback::Correct } else { Feedback::Incorrect })
    .collect();

  let year_of = |id: &str| -> i32 {
    // check_ordering guarantees every id resolves.
    events.iter().find(|e| e.id == id).map(|e| e.year).unwrap_or_default()
  };
  let years: Vec<i32> = ordering.iter().map(|id| year_of(id)).collect();

  let n = years.len();
  let mut pairs_correct = 0u32;
  for i in 0..n {
    for j in (i + 1)..n {
      if years[i] <= years[j] {
        pairs_correct += 1;
      }
    }
  }

  Ok(OrderEvaluation { feedback, pairs_correct, total_pairs: (n * (n - 1) / 2) as u32 })
}

/// Layer 3: terminal-state check over server-verified feedback.
/// Only the final attempt of a session may mark it won, and only with
/// feedback that came out of `evaluate_ordering`, never the client's.
pub fn is_solved(feedback: &[Feedback]) -> bool {
  !feedback.is_empty() && feedback.iter().all(|f| *f == Feedback::Correct)
}

/// Recompute everything for one attempt and reconcile the client's claims.
///
/// The recomputed values are always the ones to act on; `discrepancies`
/// names each claim that was forged or stale so the caller can log a
/// security event and reject the submission.
#[instrument(level = "info", skip(attempt, events), fields(n = events.len(), claimed_pairs = attempt.pairs_correct))]
pub fn verify_attempt(attempt: &OrderAttempt, events: &[OrderEvent]) -> Result<VerifiedAttempt, CoreError> {
  let evaluation = evaluate_ordering(&attempt.ordering, events)?;
  let mut discrepancies = Vec::new();

  let (feedback, note) = reconcile(attempt.feedback.clone(), evaluation.feedback.clone(), |claimed, real| {
    format!("claimed feedback {:?} does not match recomputed {:?}", claimed, real)
  });
  discrepancies.extend(note);

  let (pairs_correct, note) = reconcile(attempt.pairs_correct, evaluation.pairs_correct, |claimed, real| {
    format!("claimed pairsCorrect {claimed} does not match recomputed {real}")
  });
  discrepancies.extend(note);

  let (_, note) = reconcile(attempt.total_pairs, evaluation.total_pairs, |claimed, real| {
    format!("claimed totalPairs {claimed} does not match recomputed {real}")
  });
  discrepancies.extend(note);

  if !discrepancies.is_empty() {
    warn!(
      target: "order",
      forged_fields = discrepancies.len(),
      timestamp = attempt.timestamp,
      "Attempt claims disagree with recomputation"
    );
  }

  let perfect_positions = feedback.iter().filter(|f| **f == Feedback::Correct).count() as u32;

  Ok(VerifiedAttempt {
    solved: is_solved(&feedback),
    points: pairs_correct * POINTS_PER_PAIR,
    perfect_positions,
    evaluation,
    discrepancies,
  })
}
