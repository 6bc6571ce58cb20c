use omr_scan_core::CircleCandidate;

use crate::error::BubbleSheetError;
use crate::params::CandidateFilterParams;

#[cfg(feature = "tracing")]
use tracing::instrument;

/// Keep only circles inside the answer region with a bubble-sized radius.
///
/// Output order follows the input; nothing downstream relies on it.
#[cfg_attr(
    feature = "tracing",
    instrument(level = "debug", skip(candidates, params), fields(n = candidates.len()))
)]
pub fn filter_candidates(
    candidates: &[CircleCandidate],
    width: usize,
    height: usize,
    params: &CandidateFilterParams,
) -> Result<Vec<CircleCandidate>, BubbleSheetError> {
    let min_x = width as f32 * params.min_x_frac;
    let min_y = height as f32 * params.min_y_frac;

    let kept: Vec<CircleCandidate> = candidates
        .iter()
        .copied()
        .filter(|c| {
            c.x() as f32 >= min_x
                && c.y() as f32 > min_y
                && (params.min_radius..=params.max_radius).contains(&c.radius)
        })
        .collect();

    log::debug!(
        "bubble candidates: {} of {} kept (x >= {min_x:.0}, y > {min_y:.0})",
        kept.len(),
        candidates.len()
    );

    if kept.len() < params.min_candidates {
        return Err(BubbleSheetError::InsufficientCandidates {
            found: kept.len(),
            required: params.min_candidates,
        });
    }
    Ok(kept)
}
