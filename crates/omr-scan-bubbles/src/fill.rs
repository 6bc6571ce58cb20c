//! Filled-vs-empty decision for bubbles sitting in an answer column.
//!
//! A pencil mark is a solid dark disc; an empty bubble is a thin outline
//! around paper-white. Only the inner part of the circle is averaged so the
//! outline never dominates the mean.

use omr_scan_core::{
    mean_in_disc, CircleCandidate, ClassifiedBubble, ColumnAssignment, GrayImageView,
};

use crate::columns::AnswerColumns;
use crate::params::{ColumnParams, FillParams};

#[cfg(feature = "tracing")]
use tracing::instrument;

/// Radius of the sampled interior disc for a bubble of radius `radius`.
pub fn inner_radius(radius: i32, params: &FillParams) -> i32 {
    ((radius as f32 * params.inner_radius_frac) as i32).max(params.min_inner_radius)
}

/// Mean interior intensity of a candidate, `None` if it lies off-image.
pub fn sample_center_intensity(
    img: &GrayImageView<'_>,
    candidate: &CircleCandidate,
    params: &FillParams,
) -> Option<f32> {
    mean_in_disc(img, candidate.center, inner_radius(candidate.radius, params))
}

#[inline]
pub fn is_filled(center_intensity: f32, params: &FillParams) -> bool {
    center_intensity < params.filled_below
}

/// Assign every candidate to a column and sample its fill.
///
/// Candidates outside both column tolerances are stray circles and dropped.
#[cfg_attr(
    feature = "tracing",
    instrument(
        level = "debug",
        skip(img, candidates, columns, column_params, fill_params),
        fields(n = candidates.len())
    )
)]
pub fn classify_bubbles(
    img: &GrayImageView<'_>,
    candidates: &[CircleCandidate],
    columns: &AnswerColumns,
    column_params: &ColumnParams,
    fill_params: &FillParams,
) -> Vec<ClassifiedBubble> {
    let mut out = Vec::with_capacity(candidates.len());
    for cand in candidates {
        let column = columns.assign(cand.x(), column_params.column_tolerance_px);
        if column == ColumnAssignment::Unassigned {
            log::debug!("stray circle at ({}, {}) r={}", cand.x(), cand.y(), cand.radius);
            continue;
        }
        let Some(center_intensity) = sample_center_intensity(img, cand, fill_params) else {
            log::debug!("circle at ({}, {}) lies outside the image", cand.x(), cand.y());
            continue;
        };
        out.push(ClassifiedBubble {
            candidate: *cand,
            column,
            is_filled: is_filled(center_intensity, fill_params),
            center_intensity,
        });
    }
    out
}
