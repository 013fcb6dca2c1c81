//! Small utility helpers used across modules.

use std::collections::HashSet;

/// Function words stripped before any overlap scoring.
///
/// Without this, "Battle of Hastings" and "Battle of Waterloo" would look
/// related through "of" alone. The lone "s" catches the possessive artifact
/// produced by splitting "Napoleon's" on non-alphanumeric runs.
pub const STOPWORDS: &[&str] = &[
  // articles
  "a", "an", "the",
  // prepositions
  "of", "in", "on", "at", "to", "for", "from", "by", "with", "into", "over",
  "under", "after", "before", "during", "between", "through", "against",
  // conjunctions
  "and", "or", "but", "nor", "so", "yet", "as",
  // pronouns
  "it", "its", "he", "she", "his", "her", "they", "them", "their", "we", "us",
  "our", "you", "your", "i", "me", "my", "this", "that", "these", "those",
  // auxiliary verbs
  "is", "are", "was", "were", "be", "been", "being", "am", "has", "have",
  "had", "do", "does", "did", "will", "would", "shall", "should", "can",
  "could", "may", "might", "must",
  // possessive artifact
  "s",
];

fn is_stopword(token: &str) -> bool {
  STOPWORDS.contains(&token)
}

/// Lowercase, split on non-alphanumeric runs, drop empties and stopwords.
/// The content tokens that remain are what leakage scoring compares.
pub fn content_tokens(text: &str) -> Vec<String> {
  text
    .to_lowercase()
    .split(|c: char| !c.is_alphanumeric())
    .filter(|t| !t.is_empty() && !is_stopword(t))
    .map(|t| t.to_string())
    .collect()
}

/// Same tokens as `content_tokens`, deduplicated into a set for overlap math.
pub fn content_token_set(text: &str) -> HashSet<String> {
  content_tokens(text).into_iter().collect()
}

/// Round to three decimal places (quality scores).
pub fn round3(x: f64) -> f64 {
  (x * 1000.0).round() / 1000.0
}

/// Very small and safe string templating.
/// Replaces occurrences of `{key}` in the template with provided values.
/// This is intentionally simple (no nested/conditional logic).
pub fn fill_template(tpl: &str, pairs: &[(&str, &str)]) -> String {
  let mut out = tpl.to_string();
  for (k, v) in pairs {
    let needle = format!("{{{}}}", k);
    out = out.replace(&needle, v);
  }
  out
}

/// Log-safe truncation for large strings.
/// Avoids spamming logs with huge event texts or model replies.
#[allow(dead_code)]
pub fn trunc_for_log(s: &str, max: usize) -> String {
  if s.len() <= max { s.to_string() } else { format!("{}… ({} bytes total)", &s[..max], s.len()) }
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn tokenizer_drops_stopwords_and_splits_possessives() {
    let tokens = content_tokens("Napoleon's defeat at the Battle of Waterloo");
    assert_eq!(tokens, vec!["napoleon", "defeat", "battle", "waterloo"]);
  }

  #[test]
  fn tokenizer_handles_punctuation_runs_and_digits() {
    let tokens = content_tokens("Rome -- founded (traditionally) 753!");
    assert_eq!(tokens, vec!["rome", "founded", "traditionally", "753"]);
  }

  #[test]
  fn token_set_deduplicates() {
    let set = content_token_set("battle battle BATTLE waterloo");
    assert_eq!(set.len(), 2);
    assert!(set.contains("battle") && set.contains("waterloo"));
  }

  #[test]
  fn fill_template_replaces_all_occurrences() {
    let out = fill_template("{era}: {era} events", &[("era", "ce")]);
    assert_eq!(out, "ce: ce events");
  }

  #[test]
  fn round3_rounds_half_up() {
    assert_eq!(round3(0.8505), 0.851);
    assert_eq!(round3(0.79), 0.79);
  }
}
