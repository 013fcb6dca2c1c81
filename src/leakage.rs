//! Semantic leakage detection for candidate event texts.
//!
//! Flow:
//! 1) Reviewers reject content that gives its year away; the rejected text
//!    becomes a leaky phrase (`learn_from_rejected`).
//! 2) Every new candidate text is scored against all known phrases by token
//!    recall: how much of a phrase's content vocabulary the candidate
//!    contains.
//!
//! The phrase list is append-only. In-memory it carries a derived token set
//! per phrase; on disk it is a plain JSON array of `{phrase, yearRange}`
//! written atomically (temp file + rename) so concurrent learners or a crash
//! can never leave a torn store.

use std::collections::HashSet;
use std::io::Write;
use std::path::{Path, PathBuf};

use tracing::{error, info, instrument, warn};

use crate::domain::LeakyPhrase;
use crate::util::content_token_set;

/// Learned phrases are truncated to keep store entries compact.
pub const MAX_PHRASE_CHARS: usize = 180;

/// Result of scoring one candidate text.
#[derive(Clone, Debug, PartialEq)]
pub struct LeakageScore {
  /// Maximum recall against any stored phrase, in 0..=1.
  pub score: f64,
  /// The stored phrase that achieved the maximum, if any phrase matched.
  pub closest_phrase: Option<String>,
}

pub struct LeakageDetector {
  phrases: Vec<LeakyPhrase>,
  // Derived from `phrases`, same indexing. Rebuilt on load, extended on learn.
  token_sets: Vec<HashSet<String>>,
  store_path: Option<PathBuf>,
}

impl LeakageDetector {
  /// Empty, in-memory-only detector. Scores 0 until something is learned.
  pub fn new() -> Self {
    Self { phrases: Vec::new(), token_sets: Vec::new(), store_path: None }
  }

  /// Detector backed by a JSON phrase store at `path`.
  ///
  /// A missing file is a normal first run. An unreadable or unparsable file
  /// is logged and treated as empty; the atomic persist discipline means
  /// that only happens through outside interference.
  #[instrument(level = "info", skip(path))]
  pub fn with_store(path: impl Into<PathBuf>) -> Self {
    let path = path.into();
    let phrases = match std::fs::read_to_string(&path) {
      Ok(s) => match serde_json::from_str::<Vec<LeakyPhrase>>(&s) {
        Ok(list) => {
          info!(target: "review", path = %path.display(), phrases = list.len(), "Loaded leaky-phrase store");
          list
        }
        Err(e) => {
          error!(target: "review", path = %path.display(), error = %e, "Corrupt phrase store; starting empty");
          Vec::new()
        }
      },
      Err(e) if e.kind() == std::io::ErrorKind::NotFound => Vec::new(),
      Err(e) => {
        error!(target: "review", path = %path.display(), error = %e, "Failed to read phrase store; starting empty");
        Vec::new()
      }
    };
    let mut detector = Self::from_phrases(phrases);
    detector.store_path = Some(path);
    detector
  }

  /// Detector over an explicit phrase list, no backing file.
  pub fn from_phrases(phrases: Vec<LeakyPhrase>) -> Self {
    let token_sets = phrases.iter().map(|p| content_token_set(&p.phrase)).collect();
    Self { phrases, token_sets, store_path: None }
  }

  pub fn phrases(&self) -> &[LeakyPhrase] {
    &self.phrases
  }

  pub fn is_empty(&self) -> bool {
    self.phrases.is_empty()
  }

  /// Score `text` against every known phrase; pure over the current store.
  ///
  /// Per phrase we compute recall: |phrase tokens ∩ text tokens| divided by
  /// |phrase tokens|. The asymmetry is deliberate: a long candidate sentence
  /// that contains a short leaky phrase in full still scores 1.0. Ties keep
  /// the earliest (oldest) phrase, so repeat calls always name the same
  /// closest match.
  #[instrument(level = "debug", skip(self, text), fields(text_len = text.len(), phrases = self.phrases.len()))]
  pub fn score(&self, text: &str) -> LeakageScore {
    let text_tokens = content_token_set(text);
    let mut best = 0.0_f64;
    let mut closest: Option<&str> = None;

    for (phrase, tokens) in self.phrases.iter().zip(&self.token_sets) {
      if tokens.is_empty() {
        continue;
      }
      let overlap = tokens.intersection(&text_tokens).count();
      let recall = overlap as f64 / tokens.len() as f64;
      if recall > best {
        best = recall;
        closest = Some(&phrase.phrase);
      }
    }

    LeakageScore { score: best, closest_phrase: closest.map(str::to_string) }
  }

  /// Record rejected text as a new leaky phrase and persist the store.
  ///
  /// Persistence is best-effort: a failed write is logged and swallowed
  /// because learning must never abort the generation pipeline that
  /// triggered it.
  #[instrument(level = "info", skip(self, text), fields(text_len = text.len(), start = year_range[0], end = year_range[1]))]
  pub fn learn_from_rejected(&mut self, text: &str, year_range: [i32; 2]) {
    let phrase: String = text.to_lowercase().chars().take(MAX_PHRASE_CHARS).collect();
    if phrase.trim().is_empty() {
      warn!(target: "review", "Ignoring empty rejected text");
      return;
    }

    self.token_sets.push(content_token_set(&phrase));
    self.phrases.push(LeakyPhrase { phrase, year_range });
    info!(target: "review", phrases = self.phrases.len(), "Learned leaky phrase from rejection");

    if let Some(path) = self.store_path.clone() {
      if let Err(e) = persist_atomic(&path, &self.phrases) {
        error!(target: "review", path = %path.display(), error = %e, "Failed to persist phrase store (continuing)");
      }
    }
  }
}

impl Default for LeakageDetector {
  fn default() -> Self {
    Self::new()
  }
}

/// Write the phrase list to a temp file in the store's directory, then
/// rename over the real file. Readers and concurrent learners always see a
/// complete snapshot of some prior state, never a partial write.
fn persist_atomic(path: &Path, phrases: &[LeakyPhrase]) -> std::io::Result<()> {
  let dir = path.parent().filter(|p| !p.as_os_str().is_empty()).unwrap_or(Path::new("."));
  let json = serde_json::to_vec_pretty(phrases)?;
  let mut tmp = tempfile::NamedTempFile::new_in(dir)?;
  tmp.write_all(&json)?;
  tmp.persist(path).map_err(|e| e.error)?;
  Ok(())
}
