//! Fuzzy duplicate detection and resolution.
//!
//! Rows are compared within one column by normalized Levenshtein similarity.
//! Grouping is greedy and single-direction: scanning in original row order,
//! the first unconsumed row anchors a group and every later unconsumed row
//! scoring at or above the threshold joins it. Candidate pairs are pruned by
//! a length-bucket index: values whose trimmed lengths differ by more than
//! [`LENGTH_WINDOW`] are treated as distinct and never scored, which keeps
//! the scan near-linear on typical data.

use crate::types::{DuplicateGroup, DuplicateMatch, Row};
use crate::value;
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, HashSet};

/// Detection stops once this many groups have formed. Bounded cost for
/// interactive use; exhaustive detection requires re-running on filtered
/// data.
pub const MAX_GROUPS: usize = 50;

/// Maximum trimmed-length difference for a candidate pair.
pub const LENGTH_WINDOW: usize = 3;

/// Values shorter than this (trimmed) are too short to anchor a comparison.
pub const MIN_ANCHOR_LEN: usize = 3;

/// Levenshtein edit distance over characters.
pub fn levenshtein(a: &str, b: &str) -> usize {
    let a: Vec<char> = a.chars().collect();
    let b: Vec<char> = b.chars().collect();
    if a.is_empty() {
        return b.len();
    }
    if b.is_empty() {
        return a.len();
    }

    let mut previous: Vec<usize> = (0..=b.len()).collect();
    let mut current = vec![0usize; b.len() + 1];

    for (i, ca) in a.iter().enumerate() {
        current[0] = i + 1;
        for (j, cb) in b.iter().enumerate() {
            let cost = usize::from(ca != cb);
            current[j + 1] = (previous[j + 1] + 1)
                .min(current[j] + 1)
                .min(previous[j] + cost);
        }
        std::mem::swap(&mut previous, &mut current);
    }
    previous[b.len()]
}

/// Normalized, case-insensitive similarity in `[0, 1]`:
/// `1 - distance / max(len)`. Two empty strings are identical.
pub fn similarity(a: &str, b: &str) -> f64 {
    let max_len = a.chars().count().max(b.chars().count());
    if max_len == 0 {
        return 1.0;
    }
    let distance = levenshtein(&a.to_lowercase(), &b.to_lowercase());
    1.0 - distance as f64 / max_len as f64
}

/// Find clusters of near-duplicate rows in `column`.
///
/// `threshold` is the minimum similarity in `(0, 1]` for a pair to count as
/// duplicates. A row index appears in at most one group, as a main row or a
/// duplicate; an empty result is a valid outcome.
pub fn find_duplicates(rows: &[Row], column: &str, threshold: f64) -> Vec<DuplicateGroup> {
    let values: Vec<String> = rows
        .iter()
        .map(|row| value::lenient_string(row.get(column)).trim().to_owned())
        .collect();
    let lengths: Vec<usize> = values.iter().map(|v| v.chars().count()).collect();

    // Length-bucket index: candidates for an anchor of length L are the rows
    // in buckets L-3..=L+3. Indices stay ascending within each bucket.
    let mut buckets: BTreeMap<usize, Vec<usize>> = BTreeMap::new();
    for (i, &len) in lengths.iter().enumerate() {
        buckets.entry(len).or_default().push(i);
    }

    let mut used = vec![false; rows.len()];
    let mut groups = Vec::new();

    for i in 0..rows.len() {
        if used[i] || lengths[i] < MIN_ANCHOR_LEN {
            continue;
        }

        let lo = lengths[i].saturating_sub(LENGTH_WINDOW);
        let hi = lengths[i] + LENGTH_WINDOW;
        let mut candidates: Vec<usize> = buckets
            .range(lo..=hi)
            .flat_map(|(_, indices)| indices.iter().copied())
            .filter(|&j| j > i && !used[j])
            .collect();
        candidates.sort_unstable();

        let mut duplicates = Vec::new();
        for j in candidates {
            let score = similarity(&values[i], &values[j]);
            if score >= threshold {
                duplicates.push(DuplicateMatch { index: j, score });
            }
        }

        if !duplicates.is_empty() {
            used[i] = true;
            for d in &duplicates {
                used[d.index] = true;
            }
            groups.push(DuplicateGroup {
                main_index: i,
                column: column.to_owned(),
                duplicates,
            });
            if groups.len() >= MAX_GROUPS {
                break;
            }
        }
    }

    tracing::debug!(column, groups = groups.len(), "duplicate scan complete");
    groups
}

/// How the caller resolved one duplicate group.
#[derive(Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Debug)]
#[serde(rename_all = "snake_case")]
pub enum ResolutionAction {
    /// Keep the main row, drop every duplicate.
    KeepMain,
    /// Replace the main row with the first duplicate, then drop the
    /// duplicates.
    KeepDuplicate,
    /// Fill the main row's missing cells from the duplicates in order, then
    /// drop the duplicates.
    Merge,
}

/// A duplicate group paired with the caller's chosen action.
#[derive(Clone, Serialize, Deserialize, Debug)]
pub struct Resolution {
    pub group: DuplicateGroup,
    pub action: ResolutionAction,
}

/// Apply a batch of duplicate resolutions, producing a new dataset.
///
/// Group indices refer to the input ordering; out-of-range indices are
/// ignored rather than panicking.
pub fn apply_resolutions(rows: &[Row], resolutions: &[Resolution]) -> Vec<Row> {
    let mut new_rows: Vec<Row> = rows.to_vec();
    let mut removed: HashSet<usize> = HashSet::new();

    for resolution in resolutions {
        let group = &resolution.group;
        match resolution.action {
            ResolutionAction::KeepMain => {
                for d in &group.duplicates {
                    removed.insert(d.index);
                }
            }
            ResolutionAction::KeepDuplicate => {
                if let Some(first) = group.duplicates.first()
                    && let Some(replacement) = new_rows.get(first.index).cloned()
                    && let Some(main) = new_rows.get_mut(group.main_index)
                {
                    *main = replacement;
                }
                for d in &group.duplicates {
                    removed.insert(d.index);
                }
            }
            ResolutionAction::Merge => {
                for d in &group.duplicates {
                    let Some(dup_row) = new_rows.get(d.index).cloned() else {
                        continue;
                    };
                    if let Some(main) = new_rows.get_mut(group.main_index) {
                        for (key, val) in dup_row {
                            if value::is_missing(main.get(&key)) {
                                main.insert(key, val);
                            }
                        }
                    }
                    removed.insert(d.index);
                }
            }
        }
    }

    new_rows
        .into_iter()
        .enumerate()
        .filter(|(i, _)| !removed.contains(i))
        .map(|(_, row)| row)
        .collect()
}
