// src/stats.rs
//
// Pure derivation logic: everything here is recomputed from the record
// set on each request and never persisted.

use std::collections::BTreeMap;
use std::fmt;

use serde::Serialize;

use crate::models::record::TestRecord;

/// Chapters averaging below this many marks per test get flagged for
/// revision.
pub const TIP_THRESHOLD: f64 = 50.0;

/// Summed marks and occurrence count for one subject+chapter.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ChapterAggregate {
    pub subject: String,
    pub chapter: String,
    pub total_marks: u32,
    pub occurrence_count: u32,
}

impl ChapterAggregate {
    /// Average marks scored per logged test for this chapter.
    pub fn average(&self) -> f64 {
        f64::from(self.total_marks) / f64::from(self.occurrence_count)
    }
}

/// Gamification tier, derived from the overall score percentage.
/// Ordering follows the threshold bands (Bronze lowest).
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize)]
pub enum RankTier {
    Bronze,
    Silver,
    Gold,
    Platinum,
    Diamond,
}

impl RankTier {
    /// Classifies a percentage (clamped to [0, 100]) into a tier.
    /// Bands are inclusive on their lower bound, evaluated highest-first.
    pub fn from_percentage(percentage: f64) -> Self {
        let p = percentage.clamp(0.0, 100.0);
        if p >= 95.0 {
            RankTier::Diamond
        } else if p >= 85.0 {
            RankTier::Platinum
        } else if p >= 75.0 {
            RankTier::Gold
        } else if p >= 65.0 {
            RankTier::Silver
        } else {
            RankTier::Bronze
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            RankTier::Bronze => "Bronze",
            RankTier::Silver => "Silver",
            RankTier::Gold => "Gold",
            RankTier::Platinum => "Platinum",
            RankTier::Diamond => "Diamond",
        }
    }
}

impl fmt::Display for RankTier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// A chapter flagged for revision, with its rounded average.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Tip {
    pub key: String,
    pub average: f64,
}

/// Groups records by subject+chapter, accumulating the sum of marks
/// scored and the number of occurrences. Empty input yields an empty map.
pub fn aggregate_by_chapter(records: &[TestRecord]) -> BTreeMap<String, ChapterAggregate> {
    let mut aggregates: BTreeMap<String, ChapterAggregate> = BTreeMap::new();

    for record in records {
        aggregates
            .entry(record.chapter_key())
            .and_modify(|agg| {
                agg.total_marks += record.marks_scored;
                agg.occurrence_count += 1;
            })
            .or_insert_with(|| ChapterAggregate {
                subject: record.subject.clone(),
                chapter: record.chapter.clone(),
                total_marks: record.marks_scored,
                occurrence_count: 1,
            });
    }

    aggregates
}

/// Sums marks scored and marks total across all records.
pub fn flat_sums(records: &[TestRecord]) -> (u32, u32) {
    records.iter().fold((0, 0), |(scored, total), r| {
        (scored + r.marks_scored, total + r.marks_total)
    })
}

/// Overall score percentage, `100 * scored / total`, clamped to
/// [0, 100]. An empty record set is defined as 0%.
pub fn overall_percentage(records: &[TestRecord]) -> f64 {
    let (scored, total) = flat_sums(records);
    if total == 0 {
        return 0.0;
    }
    (100.0 * f64::from(scored) / f64::from(total)).clamp(0.0, 100.0)
}

/// Flags chapters whose per-test average falls below `TIP_THRESHOLD`.
///
/// Results are sorted ascending by average, so the weakest chapter comes
/// first; averages are rounded to one decimal for display. No weak
/// chapters yields an empty vec.
pub fn weak_chapters(aggregates: &BTreeMap<String, ChapterAggregate>) -> Vec<Tip> {
    let mut tips: Vec<Tip> = aggregates
        .iter()
        .filter(|(_, agg)| agg.average() < TIP_THRESHOLD)
        .map(|(key, agg)| Tip {
            key: key.clone(),
            average: (agg.average() * 10.0).round() / 10.0,
        })
        .collect();

    tips.sort_by(|a, b| a.average.total_cmp(&b.average));
    tips
}
