//! Domain models shared by the review-time and play-time engines: events and
//! their metadata, historical eras, leaky phrases, the upstream judgment
//! schema, and order-game attempts.

use serde::{Deserialize, Serialize};

/// Historical-era bucket used for pool-health and demand aggregation.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Era {
  Ancient,
  Medieval,
  Modern,
}

impl Era {
  /// Bucket a year (astronomical convention, BCE negative).
  pub fn from_year(year: i32) -> Self {
    if year <= 500 {
      Era::Ancient
    } else if year < 1500 {
      Era::Medieval
    } else {
      Era::Modern
    }
  }
}

/// Enrichment metadata attached to an event after generation.
/// Every field is optional; completeness is scored by the validator.
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EventMetadata {
  #[serde(default)] pub difficulty: Option<u8>, // 1-5
  #[serde(default)] pub category: Option<Vec<String>>,
  #[serde(default)] pub era: Option<String>,
  #[serde(default)] pub fame_level: Option<String>,
  #[serde(default)] pub tags: Option<Vec<String>>,
}

impl EventMetadata {
  /// How many of the five schema fields are filled in.
  pub fn present_fields(&self) -> usize {
    [
      self.difficulty.is_some(),
      self.category.is_some(),
      self.era.is_some(),
      self.fame_level.is_some(),
      self.tags.is_some(),
    ]
    .iter()
    .filter(|present| **present)
    .count()
  }
}

/// A historical fact candidate as it moves through generation and review.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct Event {
  /// Signed year, BCE negative (astronomical convention).
  pub year: i32,
  pub text: String,
  #[serde(default)] pub metadata: Option<EventMetadata>,
}

/// A text fragment known to reveal its year too directly.
///
/// Entries are append-only: created when a reviewer rejects content for
/// leakage, never edited or deleted. The token set used for scoring is
/// derived from `phrase` on load, never persisted.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LeakyPhrase {
  pub phrase: String,
  /// `[start, end]` years the phrase gives away.
  pub year_range: [i32; 2],
}

/// The four composition dimensions the judge model scores, each in 0..=1.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CompositionScores {
  pub topic_diversity: f64,
  pub geographic_spread: f64,
  pub difficulty_gradient: f64,
  pub guessability: f64,
}

/// The model's recommended presentation order for the six events.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct RecommendedOrdering {
  /// Zero-based indices into the candidate event slice.
  #[serde(default)] pub sequence: Vec<usize>,
  #[serde(default)] pub rationale: String,
}

/// The unvalidated upstream verdict on a candidate 6-event puzzle,
/// exactly as the judge model returned it. `approved` and `quality_score`
/// here are claims; the composition judge recomputes both.
#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpstreamJudgment {
  pub approved: bool,
  pub quality_score: f64,
  #[serde(default)] pub ordering: RecommendedOrdering,
  pub composition: CompositionScores,
  #[serde(default)] pub issues: Vec<String>,
  #[serde(default)] pub suggestions: Vec<String>,
}

/// Per-position verdict on a submitted ordering.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Feedback {
  Correct,
  Incorrect,
}

/// One play-time submission as the client reported it.
///
/// `feedback` and `pairs_correct` are untrusted claims; only the anti-cheat
/// engine's recomputation of them may be persisted or scored.
#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OrderAttempt {
  /// Event ids in the order the player placed them.
  pub ordering: Vec<String>,
  #[serde(default)] pub feedback: Vec<Feedback>,
  #[serde(default)] pub pairs_correct: u32,
  #[serde(default)] pub total_pairs: u32,
  /// Epoch milliseconds.
  pub timestamp: i64,
}
