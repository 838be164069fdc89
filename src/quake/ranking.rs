//! Intensity-area ranking
//!
//! Deduplicates per-area shake-intensity readings and orders them by
//! intensity level descending, county name ascending. The ordering is
//! stable and total: every pair of areas is comparable, and equal keys
//! keep their input order.

use once_cell::sync::Lazy;
use regex::Regex;
use std::collections::HashSet;

static FIRST_INTEGER: Lazy<Regex> = Lazy::new(|| Regex::new(r"\d+").unwrap());

/// One area-level shake-intensity reading
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct IntensityArea {
    pub county: String,
    pub description: String,
    /// Intensity label as published, e.g. "4級" or "5弱"; may be empty
    pub label: String,
}

/// Numeric level of an intensity label
///
/// The level is the first integer found in the label; an absent or
/// unparsable label ranks as level 0, the lowest.
pub fn intensity_level(label: &str) -> u32 {
    FIRST_INTEGER
        .find(label)
        .and_then(|found| found.as_str().parse().ok())
        .unwrap_or(0)
}

/// Deduplicates readings by the (county, description, label) triple,
/// keeping first occurrence order
pub fn dedup_areas(areas: &[IntensityArea]) -> Vec<IntensityArea> {
    let mut seen = HashSet::new();
    let mut unique = Vec::new();

    for area in areas {
        if seen.insert(area.clone()) {
            unique.push(area.clone());
        }
    }

    unique
}

/// Sorts readings by intensity level descending, tie-broken by county name
/// ascending (empty names first)
pub fn rank_areas(mut areas: Vec<IntensityArea>) -> Vec<IntensityArea> {
    areas.sort_by(|a, b| {
        intensity_level(&b.label)
            .cmp(&intensity_level(&a.label))
            .then_with(|| a.county.cmp(&b.county))
    });
    areas
}

/// Dedup-then-rank convenience over one report's readings
pub fn ranked_areas(areas: &[IntensityArea]) -> Vec<IntensityArea> {
    rank_areas(dedup_areas(areas))
}
