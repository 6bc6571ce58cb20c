//! Anchor-window row grouping.
//!
//! Rows are built in one pass over bubbles sorted by y. Each row is anchored
//! at its first bubble and every later bubble is compared to that anchor, not
//! to its predecessor, so a row never drifts down the page.

use omr_scan_core::{ClassifiedBubble, ColumnAssignment, RowPair};

/// Sort bubbles top-down and group them into rows.
///
/// Ties on y are broken by x so the grouping is deterministic.
pub fn group_rows(
    mut bubbles: Vec<ClassifiedBubble>,
    tolerance_px: i32,
) -> Vec<Vec<ClassifiedBubble>> {
    bubbles.sort_by_key(|b| (b.candidate.center.y, b.candidate.center.x));

    let mut rows: Vec<Vec<ClassifiedBubble>> = Vec::new();
    for bubble in bubbles {
        let anchor_y = rows.last().and_then(|row| row.first()).map(|a| a.y());
        match anchor_y {
            Some(ay) if (bubble.y() - ay).abs() <= tolerance_px => {
                if let Some(row) = rows.last_mut() {
                    row.push(bubble);
                }
            }
            _ => rows.push(vec![bubble]),
        }
    }
    rows
}

/// First YES-column and first NO-column bubble of a row.
pub fn reduce_row(row: &[ClassifiedBubble]) -> RowPair {
    let first_in = |column: ColumnAssignment| row.iter().find(|b| b.column == column).copied();
    RowPair {
        yes: first_in(ColumnAssignment::Yes),
        no: first_in(ColumnAssignment::No),
    }
}

/// Row pairs truncated to `expected_rows`.
///
/// Also returns how many rows were found before truncation.
pub fn build_row_pairs(
    bubbles: Vec<ClassifiedBubble>,
    tolerance_px: i32,
    expected_rows: usize,
) -> (Vec<RowPair>, usize) {
    let rows = group_rows(bubbles, tolerance_px);
    let detected = rows.len();
    let pairs = rows
        .iter()
        .take(expected_rows)
        .map(|row| reduce_row(row))
        .collect();
    (pairs, detected)
}

#[cfg(test)]
mod tests {
    use super::*;
    use omr_scan_core::CircleCandidate;

    fn bubble(x: i32, y: i32, column: ColumnAssignment, filled: bool) -> ClassifiedBubble {
        ClassifiedBubble {
            candidate: CircleCandidate::new(x, y, 12),
            column,
            is_filled: filled,
            center_intensity: if filled { 30.0 } else { 240.0 },
        }
    }

    #[test]
    fn anchor_window_collects_unsorted_input() {
        let bubbles = vec![
            bubble(500, 120, ColumnAssignment::No, false),
            bubble(500, 100, ColumnAssignment::Yes, false),
            bubble(560, 110, ColumnAssignment::No, false),
        ];
        let rows = group_rows(bubbles, 20);
        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0].len(), 3);
        assert_eq!(rows[0][0].y(), 100);
    }

    #[test]
    fn grouping_is_anchor_relative_not_chained() {
        // chaining 100 -> 115 -> 130 would give one row; 130 is 30 from the anchor
        let bubbles = vec![
            bubble(500, 100, ColumnAssignment::Yes, false),
            bubble(560, 115, ColumnAssignment::No, false),
            bubble(500, 130, ColumnAssignment::Yes, false),
        ];
        let rows = group_rows(bubbles, 20);
        assert_eq!(rows.len(), 2);
        assert_eq!(rows[0].len(), 2);
        assert_eq!(rows[1][0].y(), 130);
    }

    #[test]
    fn row_closes_when_anchor_is_out_of_reach() {
        // 135 is within 20 of 118 but not of the anchor at 100
        let bubbles = vec![
            bubble(500, 100, ColumnAssignment::Yes, false),
            bubble(560, 118, ColumnAssignment::No, false),
            bubble(500, 135, ColumnAssignment::Yes, false),
            bubble(560, 150, ColumnAssignment::No, false),
        ];
        let rows = group_rows(bubbles, 20);
        let ys: Vec<Vec<i32>> = rows
            .iter()
            .map(|r| r.iter().map(|b| b.y()).collect())
            .collect();
        assert_eq!(ys, vec![vec![100, 118], vec![135, 150]]);
    }

    #[test]
    fn reduce_row_keeps_first_per_column() {
        let row = [
            bubble(498, 100, ColumnAssignment::Yes, true),
            bubble(502, 104, ColumnAssignment::Yes, false),
        ];
        let pair = reduce_row(&row);
        assert_eq!(pair.yes.map(|b| b.candidate.center.x), Some(498));
        assert!(pair.no.is_none());
    }

    #[test]
    fn rows_beyond_expected_count_are_dropped() {
        let bubbles = (0..5)
            .flat_map(|k| {
                let y = 300 + 60 * k;
                [
                    bubble(500, y, ColumnAssignment::Yes, false),
                    bubble(560, y, ColumnAssignment::No, false),
                ]
            })
            .collect();
        let (pairs, detected) = build_row_pairs(bubbles, 20, 3);
        assert_eq!(detected, 5);
        assert_eq!(pairs.len(), 3);
        assert_eq!(pairs[2].yes.map(|b| b.y()), Some(420));
    }

    #[test]
    fn no_bubbles_no_rows() {
        let (pairs, detected) = build_row_pairs(Vec::new(), 20, 10);
        assert!(pairs.is_empty());
        assert_eq!(detected, 0);
    }
}
