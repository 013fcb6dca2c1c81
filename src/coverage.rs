//! Pool-health and demand aggregation over the fixed historical range.
//!
//! Two independent, side-effect-free passes feed generation planning:
//!   - gap analysis: which years have no events at all, which have too few
//!     to build a puzzle from, and how well each era is covered;
//!   - demand analysis: which target years players keep landing on, and how
//!     demand distributes across eras.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};
use tracing::instrument;

use crate::domain::Era;

/// Contiguous span of years both analyses operate over.
pub const MIN_YEAR: i32 = -3000;
pub const MAX_YEAR: i32 = 2025;

/// A year needs this many recorded events (used or not) to build puzzles.
pub const MIN_EVENTS_PER_YEAR: u32 = 6;

/// Per-year pool counts as storage reports them.
#[derive(Clone, Copy, Debug, Serialize, Deserialize)]
pub struct YearStats {
  pub year: i32,
  pub total: u32,
  pub used: u32,
  pub available: u32,
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize)]
pub struct EraCoverage {
  pub ancient: f64,
  pub medieval: f64,
  pub modern: f64,
}

#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct GapReport {
  /// Years in range with zero recorded events.
  pub missing_years: Vec<i32>,
  /// Years with some events but fewer than `MIN_EVENTS_PER_YEAR`.
  pub insufficient_years: Vec<i32>,
  /// Fraction of each era's years that have at least one event.
  pub coverage_by_era: EraCoverage,
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize)]
pub struct EraDemand {
  pub ancient: u32,
  pub medieval: u32,
  pub modern: u32,
}

#[derive(Clone, Copy, Debug, PartialEq, Serialize)]
pub struct YearDemand {
  pub year: i32,
  pub puzzles: u32,
}

#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct DemandReport {
  /// Years targeted by more than one puzzle, most-demanded first.
  pub high_demand: Vec<YearDemand>,
  /// Raw puzzle counts per era (not ratios).
  pub demand_by_era: EraDemand,
}

/// Scan per-year pool stats for missing and thin years.
///
/// `total` is what matters, not `available`: a year whose events are all
/// used up is still a populated year, just one that needs topping up before
/// it is reported as insufficient here.
#[instrument(level = "info", skip(stats), fields(years_reported = stats.len()))]
pub fn analyze_gaps(stats: &[YearStats]) -> GapReport {
  let totals: HashMap<i32, u32> = stats.iter().map(|s| (s.year, s.total)).collect();

  let mut missing_years = Vec::new();
  let mut insufficient_years = Vec::new();
  let mut covered = EraDemand::default();
  let mut span = EraDemand::default();

  for year in MIN_YEAR..=MAX_YEAR {
    let era = Era::from_year(year);
    bump(&mut span, era);

    let total = totals.get(&year).copied().unwrap_or(0);
    if total == 0 {
      missing_years.push(year);
    } else {
      bump(&mut covered, era);
      if total < MIN_EVENTS_PER_YEAR {
        insufficient_years.push(year);
      }
    }
  }

  GapReport {
    missing_years,
    insufficient_years,
    coverage_by_era: EraCoverage {
      ancient: ratio(covered.ancient, span.ancient),
      medieval: ratio(covered.medieval, span.medieval),
      modern: ratio(covered.modern, span.modern),
    },
  }
}

/// Aggregate played-puzzle target years into demand hot-spots.
///
/// Frequencies are accumulated in first-seen order and stably sorted by
/// descending count, so equally demanded years keep their discovery order.
#[instrument(level = "info", skip(target_years), fields(puzzles = target_years.len()))]
pub fn analyze_demand(target_years: &[i32]) -> DemandReport {
  let mut counts: Vec<YearDemand> = Vec::new();
  let mut index: HashMap<i32, usize> = HashMap::new();
  let mut demand_by_era = EraDemand::default();

  for &year in target_years {
    bump(&mut demand_by_era, Era::from_year(year));
    match index.get(&year) {
      Some(&i) => counts[i].puzzles += 1,
      None => {
        index.insert(year, counts.len());
        counts.push(YearDemand { year, puzzles: 1 });
      }
    }
  }

  let mut high_demand: Vec<YearDemand> = counts.into_iter().filter(|c| c.puzzles > 1).collect();
  high_demand.sort_by(|a, b| b.puzzles.cmp(&a.puzzles));

  DemandReport { high_demand, demand_by_era }
}

fn bump(counts: &mut EraDemand, era: Era) {
  match era {
    Era::Ancient => counts.ancient += 1,
    Era::Medieval => counts.medieval += 1,
    Era::Modern => counts.modern += 1,
  }
}

fn ratio(covered: u32, span: u32) -> f64 {
  if span == 0 { 0.0 } else { covered as f64 / span as f64 }
}

#[cfg(test)]
mod tests {
  use super::*;

  // Year counts per era within MIN_YEAR..=MAX_YEAR.
  const ANCIENT_SPAN: u32 = 3501; // -3000..=500
  const MEDIEVAL_SPAN: u32 = 999; // 501..=1499
  const MODERN_SPAN: u32 = 526; // 1500..=2025

  fn stats(entries: &[(i32, u32)]) -> Vec<YearStats> {
    entries
      .iter()
      .map(|&(year, total)| YearStats { year, total, used: total.min(1), available: total.saturating_sub(1) })
      .collect()
  }

  #[test]
  fn spans_cover_the_whole_range() {
    assert_eq!(ANCIENT_SPAN + MEDIEVAL_SPAN + MODERN_SPAN, (MAX_YEAR - MIN_YEAR + 1) as u32);
  }

  #[test]
  fn zero_total_is_missing_low_total_is_insufficient() {
    let report = analyze_gaps(&stats(&[(1500, 10), (1501, 3), (1502, 0)]));
    assert!(report.missing_years.contains(&1502));
    assert!(report.missing_years.contains(&2025));
    assert!(!report.missing_years.contains(&1500));
    assert!(!report.missing_years.contains(&1501));
    assert_eq!(report.insufficient_years, vec![1501]);
  }

  #[test]
  fn used_up_years_still_count_as_populated() {
    // All six events consumed: total is what proves the year exists.
    let report = analyze_gaps(&[YearStats { year: 1969, total: 6, used: 6, available: 0 }]);
    assert!(!report.missing_years.contains(&1969));
    assert!(!report.insufficient_years.contains(&1969));
  }

  #[test]
  fn coverage_ratios_are_per_era() {
    let report = analyze_gaps(&stats(&[(1500, 10), (1501, 3), (-44, 8)]));
    assert_eq!(report.coverage_by_era.modern, 2.0 / MODERN_SPAN as f64);
    assert_eq!(report.coverage_by_era.ancient, 1.0 / ANCIENT_SPAN as f64);
    assert_eq!(report.coverage_by_era.medieval, 0.0);
  }

  #[test]
  fn gap_analysis_is_idempotent() {
    let snapshot = stats(&[(800, 2), (1815, 9), (1969, 6), (-500, 1)]);
    assert_eq!(analyze_gaps(&snapshot), analyze_gaps(&snapshot));
  }

  #[test]
  fn repeated_years_become_high_demand_sorted_desc() {
    let report = analyze_demand(&[1969, 1066, 1969, 44, 1066, 1969]);
    assert_eq!(
      report.high_demand,
      vec![YearDemand { year: 1969, puzzles: 3 }, YearDemand { year: 1066, puzzles: 2 }]
    );
  }

  #[test]
  fn demand_ties_keep_discovery_order() {
    let report = analyze_demand(&[1815, 1453, 1815, 1453]);
    assert_eq!(
      report.high_demand,
      vec![YearDemand { year: 1815, puzzles: 2 }, YearDemand { year: 1453, puzzles: 2 }]
    );
  }

  #[test]
  fn era_demand_is_a_raw_count() {
    let report = analyze_demand(&[1969, 1066, 1969, 44, 1066, 1969]);
    assert_eq!(report.demand_by_era, EraDemand { ancient: 1, medieval: 2, modern: 3 });
    assert!(report.high_demand.iter().all(|d| d.puzzles > 1));
  }

  #[test]
  fn singleton_years_are_not_high_demand() {
    let report = analyze_demand(&[1815, 1453, 44]);
    assert!(report.high_demand.is_empty());
    assert_eq!(report.demand_by_era.ancient, 1);
  }
}
