use super::rows_from;
use crate::dedup::{
    MAX_GROUPS, Resolution, ResolutionAction, apply_resolutions, find_duplicates, similarity,
};
use serde_json::{Value, json};

#[test]
fn test_near_duplicate_names_group_together() {
    let rows = rows_from(json!([
        {"name": "Jon Smith", "city": "Sydney"},
        {"name": "Jon Smyth", "city": "Perth"},
        {"name": "Alice Wong", "city": "Hobart"}
    ]));

    let groups = find_duplicates(&rows, "name", 0.85);
    assert_eq!(groups.len(), 1);

    let group = &groups[0];
    assert_eq!(group.main_index, 0);
    assert_eq!(group.column, "name");
    assert_eq!(group.duplicates.len(), 1);
    assert_eq!(group.duplicates[0].index, 1);
    // One substitution over nine characters.
    assert!((group.duplicates[0].score - (1.0 - 1.0 / 9.0)).abs() < 1e-12);
}

#[test]
fn test_distinct_values_yield_no_groups() {
    let rows = rows_from(json!([
        {"name": "Alice"}, {"name": "Roberto"}, {"name": "Xiulan"}
    ]));
    assert!(find_duplicates(&rows, "name", 0.85).is_empty());
}

#[test]
fn test_each_index_belongs_to_at_most_one_group() {
    let rows = rows_from(json!([
        {"code": "aaaa"}, {"code": "aaab"}, {"code": "aaac"}, {"code": "zzzz"}
    ]));

    let groups = find_duplicates(&rows, "code", 0.7);
    assert_eq!(groups.len(), 1);
    assert_eq!(groups[0].main_index, 0);
    let members: Vec<usize> = groups[0].duplicates.iter().map(|d| d.index).collect();
    assert_eq!(members, vec![1, 2]);
}

#[test]
fn test_short_values_never_anchor() {
    let rows = rows_from(json!([
        {"code": "ab"}, {"code": "ab"}, {"code": "ab"}
    ]));
    assert!(find_duplicates(&rows, "code", 0.9).is_empty());
}

#[test]
fn test_length_window_prunes_distant_lengths() {
    // Similarity 3/8 would pass a 0.3 threshold, but the trimmed lengths
    // differ by more than the window so the pair is never scored.
    let rows = rows_from(json!([
        {"code": "abc"}, {"code": "abcdefgh"}
    ]));
    assert!(find_duplicates(&rows, "code", 0.3).is_empty());
}

#[test]
fn test_matching_ignores_case_and_surrounding_whitespace() {
    let rows = rows_from(json!([
        {"name": "JON SMITH"}, {"name": "  jon smith  "}
    ]));
    let groups = find_duplicates(&rows, "name", 0.99);
    assert_eq!(groups.len(), 1);
    assert_eq!(groups[0].duplicates[0].score, 1.0);
}

#[test]
fn test_numeric_cells_compare_as_text() {
    let rows = rows_from(json!([
        {"id": 123456}, {"id": "123456"}
    ]));
    let groups = find_duplicates(&rows, "id", 0.99);
    assert_eq!(groups.len(), 1, "numbers are stringified before comparison");
}

#[test]
fn test_detection_stops_at_the_group_cap() {
    // 60 independent duplicate families, two identical rows each. Values
    // like "record-007" differ from every other family by at least one
    // character, which 0.95 rejects at this length, so only the exact pairs
    // group.
    let mut data = Vec::new();
    for family in 0..60 {
        for _ in 0..2 {
            data.push(json!({"code": format!("record-{family:03}")}));
        }
    }
    let rows = rows_from(Value::Array(data));

    let groups = find_duplicates(&rows, "code", 0.95);
    assert_eq!(groups.len(), MAX_GROUPS, "scan stops once the cap is hit");

    // Groups form in row order, so the capped scan covers exactly the first
    // fifty families and never reaches the rest.
    assert_eq!(groups[0].main_index, 0);
    assert_eq!(groups[MAX_GROUPS - 1].main_index, 98);
    assert!(groups.iter().all(|g| g.duplicates.len() == 1));
}

#[test]
fn test_similarity_bounds() {
    assert_eq!(similarity("same", "same"), 1.0);
    let score = similarity("abcd", "wxyz");
    assert!((0.0..1.0).contains(&score));
}

fn one_group(rows: &[crate::types::Row], threshold: f64) -> crate::types::DuplicateGroup {
    let groups = find_duplicates(rows, "name", threshold);
    assert_eq!(groups.len(), 1, "fixture should produce exactly one group");
    groups.into_iter().next().unwrap()
}

#[test]
fn test_resolution_keep_main() {
    let rows = rows_from(json!([
        {"name": "Jon Smith", "city": "Sydney"},
        {"name": "Jon Smyth", "city": "Perth"},
        {"name": "Alice Wong", "city": "Hobart"}
    ]));
    let group = one_group(&rows, 0.85);

    let resolved = apply_resolutions(
        &rows,
        &[Resolution {
            group,
            action: ResolutionAction::KeepMain,
        }],
    );
    assert_eq!(resolved.len(), 2);
    assert_eq!(resolved[0].get("city"), Some(&json!("Sydney")));
    assert_eq!(resolved[1].get("name"), Some(&json!("Alice Wong")));
}

#[test]
fn test_resolution_keep_duplicate_replaces_main() {
    let rows = rows_from(json!([
        {"name": "Jon Smith", "city": "Sydney"},
        {"name": "Jon Smyth", "city": "Perth"}
    ]));
    let group = one_group(&rows, 0.85);

    let resolved = apply_resolutions(
        &rows,
        &[Resolution {
            group,
            action: ResolutionAction::KeepDuplicate,
        }],
    );
    assert_eq!(resolved.len(), 1);
    assert_eq!(resolved[0].get("name"), Some(&json!("Jon Smyth")));
    assert_eq!(resolved[0].get("city"), Some(&json!("Perth")));
}

#[test]
fn test_resolution_merge_fills_gaps_only() {
    let rows = rows_from(json!([
        {"name": "Jon Smith", "city": "Sydney", "email": null},
        {"name": "Jon Smyth", "city": "Perth", "email": "jon@example.com"}
    ]));
    let group = one_group(&rows, 0.85);

    let resolved = apply_resolutions(
        &rows,
        &[Resolution {
            group,
            action: ResolutionAction::Merge,
        }],
    );
    assert_eq!(resolved.len(), 1);
    // Present cells keep the main row's value; gaps absorb the duplicate's.
    assert_eq!(resolved[0].get("city"), Some(&json!("Sydney")));
    assert_eq!(resolved[0].get("email"), Some(&json!("jon@example.com")));
}

#[test]
fn test_out_of_range_indices_are_ignored() {
    let rows = rows_from(json!([{"name": "only row"}]));
    let stale = Resolution {
        group: crate::types::DuplicateGroup {
            main_index: 7,
            column: "name".to_owned(),
            duplicates: vec![crate::types::DuplicateMatch {
                index: 9,
                score: 1.0,
            }],
        },
        action: ResolutionAction::Merge,
    };

    let resolved = apply_resolutions(&rows, &[stale]);
    assert_eq!(resolved, rows);
}
