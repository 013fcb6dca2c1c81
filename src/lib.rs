//! Chronofall · Puzzle Integrity & Quality Control core
//!
//! The shared logic behind a daily history-ordering game, split in two:
//!
//! Review time (content generation):
//!   - `leakage`: score candidate text against learned answer-revealing
//!     phrases; learn new ones from rejections (append-only, atomic store).
//!   - `validator`: pass/fail one event on leakage + metadata completeness.
//!   - `judge`: re-score and re-approve the model's verdict on a six-event
//!     puzzle from fixed weights and thresholds.
//!   - `coverage`: find era gaps and demand hot-spots in the pool.
//!
//! Play time:
//!   - `order`: authoritative recomputation of ordering feedback, pairwise
//!     correctness and points, reconciled against the client's claims.
//!
//! One rule everywhere: never trust an upstream producer. The judge model's
//! approval and the game client's feedback are claims to be checked against
//! a server-side recomputation (`verify::reconcile`), never ground truth.
//!
//! Everything is synchronous and pure over its inputs; the single exception
//! is the leakage detector's learning path, which appends to a JSON phrase
//! store via an atomic write-then-rename.

pub mod config;
pub mod coverage;
pub mod domain;
pub mod error;
pub mod judge;
pub mod leakage;
pub mod model;
pub mod order;
pub mod telemetry;
pub mod util;
pub mod validator;
pub mod verify;

pub use config::{load_core_config_from_env, CoreConfig, JudgePrompts};
pub use coverage::{analyze_demand, analyze_gaps, DemandReport, GapReport, YearStats};
pub use domain::{
  CompositionScores, Era, Event, EventMetadata, Feedback, LeakyPhrase, OrderAttempt,
  RecommendedOrdering, UpstreamJudgment,
};
pub use error::CoreError;
pub use judge::{judge_composition, CompositionJudgment};
pub use leakage::{LeakageDetector, LeakageScore};
pub use model::{build_composition_request, parse_judge_reply, JudgeReply, JudgeRequest, ModelUsage};
pub use order::{
  canonical_order, evaluate_ordering, is_solved, verify_attempt, would_solve, OrderEvaluation,
  OrderEvent, VerifiedAttempt,
};
pub use validator::{validate_event, ValidationReport, ValidationScores};
