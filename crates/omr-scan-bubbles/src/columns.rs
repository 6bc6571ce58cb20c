//! YES/NO column discovery by run-length bucketing of x coordinates.
//!
//! Distinct x values are sorted and split wherever two neighbours are more
//! than `max_gap_px` apart. Members of one bucket are chained through their
//! neighbours, so a bucket can be wider than `max_gap_px` end to end. The two
//! most populated buckets become the answer columns.

use omr_scan_core::{CircleCandidate, ColumnAssignment};
use serde::{Deserialize, Serialize};

use crate::error::BubbleSheetError;
use crate::params::ColumnParams;

#[cfg(feature = "tracing")]
use tracing::instrument;

/// The two discovered answer columns.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct AnswerColumns {
    pub yes_x: f32,
    pub no_x: f32,
}

impl AnswerColumns {
    /// Column of a candidate at `x`; YES wins when both are within tolerance.
    pub fn assign(&self, x: i32, tolerance: f32) -> ColumnAssignment {
        let x = x as f32;
        if (x - self.yes_x).abs() <= tolerance {
            ColumnAssignment::Yes
        } else if (x - self.no_x).abs() <= tolerance {
            ColumnAssignment::No
        } else {
            ColumnAssignment::Unassigned
        }
    }
}

/// Split sorted, de-duplicated x values into runs with gaps `<= max_gap`.
pub fn bucket_x_positions(candidates: &[CircleCandidate], max_gap: i32) -> Vec<Vec<i32>> {
    let mut xs: Vec<i32> = candidates.iter().map(|c| c.x()).collect();
    xs.sort_unstable();
    xs.dedup();

    let mut buckets: Vec<Vec<i32>> = Vec::new();
    for x in xs {
        let open_run = buckets
            .last_mut()
            .filter(|run| run.last().is_some_and(|&prev| x - prev <= max_gap));
        match open_run {
            Some(run) => run.push(x),
            None => buckets.push(vec![x]),
        }
    }
    buckets
}

/// Find the YES and NO column centres.
///
/// Bucket size is the number of distinct x values, not the number of circles.
/// Ties keep the left-to-right order.
#[cfg_attr(
    feature = "tracing",
    instrument(level = "debug", skip(candidates, params), fields(n = candidates.len()))
)]
pub fn classify_columns(
    candidates: &[CircleCandidate],
    params: &ColumnParams,
) -> Result<AnswerColumns, BubbleSheetError> {
    let mut buckets = bucket_x_positions(candidates, params.max_gap_px);
    if buckets.len() < 2 {
        return Err(BubbleSheetError::NoColumns {
            clusters: buckets.len(),
        });
    }
    // stable: equal sizes stay left to right
    buckets.sort_by_key(|b| std::cmp::Reverse(b.len()));

    let mut yes_x = mean(&buckets[0]);
    let mut no_x = mean(&buckets[1]);
    let out_of_order = if params.yes_on_left {
        yes_x > no_x
    } else {
        yes_x < no_x
    };
    if out_of_order {
        std::mem::swap(&mut yes_x, &mut no_x);
    }
    if (yes_x - no_x).abs() < f32::EPSILON {
        return Err(BubbleSheetError::ColumnsCollapsed { x: yes_x });
    }

    log::debug!(
        "answer columns: yes_x={yes_x:.1} no_x={no_x:.1} ({} x-buckets, {} discarded)",
        buckets.len(),
        buckets.len() - 2
    );
    Ok(AnswerColumns { yes_x, no_x })
}

fn mean(values: &[i32]) -> f32 {
    values.iter().map(|&v| v as f64).sum::<f64>() as f32 / values.len() as f32
}
