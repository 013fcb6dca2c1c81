//! The shared claimed-versus-recomputed idiom.
//!
//! Both halves of the core face the same situation: an upstream producer
//! (the judge model, or a game client) hands us a value we can recompute
//! from canonical inputs. The authoritative value is always the recomputed
//! one; the claim only matters for telling the caller it was wrong.

/// Reconcile an untrusted claim with a server-side recomputation.
///
/// Returns the recomputed value plus a note describing the discrepancy when
/// the claim disagrees. `note` is only invoked on a mismatch.
pub fn reconcile<T, F>(claimed: T, recomputed: T, note: F) -> (T, Option<String>)
where
  T: PartialEq,
  F: FnOnce(&T, &T) -> String,
{
  if claimed == recomputed {
    (recomputed, None)
  } else {
    let msg = note(&claimed, &recomputed);
    (recomputed, Some(msg))
  }
}
