use omr_scan_core::{
    AnswerCounts, CircleCandidate, ClassifiedBubble, GrayImageView, RowAnswer, RowPair,
};
use serde::{Deserialize, Serialize};

use crate::answers::{count_answers, synthesize_answers};
use crate::columns::{classify_columns, AnswerColumns};
use crate::error::BubbleSheetError;
use crate::fill::classify_bubbles;
use crate::filter::filter_candidates;
use crate::params::BubbleSheetParams;
use crate::rows::build_row_pairs;

#[cfg(feature = "tracing")]
use tracing::instrument;

/// Everything the bubble reader derived from one page.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct BubbleSheetDetection {
    pub columns: AnswerColumns,
    /// Candidates that passed the region/radius filter.
    pub candidates: Vec<CircleCandidate>,
    /// Candidates assigned to a column, with fill state.
    pub bubbles: Vec<ClassifiedBubble>,
    /// Row pairs after truncation to the expected row count.
    pub rows: Vec<RowPair>,
    pub answers: Vec<RowAnswer>,
    pub counts: AnswerCounts,
    /// Rows found before truncation.
    pub detected_rows: usize,
}

/// YES/NO bubble-sheet reader over externally detected circles.
pub struct BubbleSheetDetector {
    params: BubbleSheetParams,
}

impl BubbleSheetDetector {
    pub fn new(params: BubbleSheetParams) -> Self {
        Self { params }
    }

    pub fn params(&self) -> &BubbleSheetParams {
        &self.params
    }

    /// Read answers from `circles` detected in `image`.
    ///
    /// `expected_rows` bounds how many rows are kept; see
    /// [`RowParams::expected_rows`](crate::RowParams::expected_rows).
    #[cfg_attr(
        feature = "tracing",
        instrument(
            level = "info",
            skip(self, image, circles),
            fields(width = image.width, height = image.height, circles = circles.len())
        )
    )]
    pub fn detect(
        &self,
        image: &GrayImageView<'_>,
        circles: &[CircleCandidate],
        expected_rows: usize,
    ) -> Result<BubbleSheetDetection, BubbleSheetError> {
        let p = &self.params;
        let candidates = filter_candidates(circles, image.width, image.height, &p.filter)?;
        let columns = classify_columns(&candidates, &p.columns)?;
        let bubbles = classify_bubbles(image, &candidates, &columns, &p.columns, &p.fill);

        let (rows, detected_rows) =
            build_row_pairs(bubbles.clone(), p.rows.tolerance_px, expected_rows);
        if detected_rows != expected_rows {
            log::warn!(
                "found {detected_rows} bubble rows, expected {expected_rows}; keeping {}",
                rows.len()
            );
        }

        let answers = synthesize_answers(&rows);
        let counts = count_answers(&answers);
        log::info!(
            "bubble sheet: {} rows, {} answered, {} unanswered",
            counts.total,
            counts.answered,
            counts.unanswered
        );

        Ok(BubbleSheetDetection {
            columns,
            candidates,
            bubbles,
            rows,
            answers,
            counts,
            detected_rows,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use omr_scan_core::{AnswerState, GrayImage};

    fn draw_bubble(img: &mut GrayImage, c: CircleCandidate, filled: bool) {
        img.fill_disc(c.center, c.radius, 10);
        if !filled {
            img.fill_disc(c.center, c.radius - 2, 250);
        }
    }

    #[test]
    fn reads_rows_from_clean_sheet() {
        let mut img = GrayImage::filled(800, 1000, 250);
        let marks = [(true, false), (false, true), (true, true), (false, false)];
        let mut circles = Vec::new();
        for (k, (yes, no)) in marks.iter().enumerate() {
            let y = 400 + 70 * k as i32;
            let yes_c = CircleCandidate::new(520, y, 12);
            let no_c = CircleCandidate::new(600, y, 12);
            draw_bubble(&mut img, yes_c, *yes);
            draw_bubble(&mut img, no_c, *no);
            circles.extend([no_c, yes_c]);
        }

        let detector = BubbleSheetDetector::new(BubbleSheetParams::default());
        let det = detector.detect(&img.view(), &circles, 4).expect("detection");
        let states: Vec<AnswerState> = det.answers.iter().map(|a| a.answer).collect();
        assert_eq!(
            states,
            vec![
                AnswerState::Yes,
                AnswerState::No,
                AnswerState::Ambiguous,
                AnswerState::Unanswered
            ]
        );
        assert_eq!(det.counts.answered, 2);
        assert_eq!(det.counts.unanswered, 1);
        assert_eq!(det.detected_rows, 4);
    }

    #[test]
    fn too_few_circles_declines_page() {
        let img = GrayImage::filled(800, 1000, 250);
        let circles = [
            CircleCandidate::new(520, 400, 12),
            CircleCandidate::new(600, 400, 12),
        ];
        let detector = BubbleSheetDetector::new(BubbleSheetParams::default());
        let err = detector.detect(&img.view(), &circles, 10).expect_err("declined");
        assert!(matches!(err, BubbleSheetError::InsufficientCandidates { .. }));
    }

    #[test]
    fn detection_is_deterministic() {
        let mut img = GrayImage::filled(800, 1000, 250);
        let mut circles = Vec::new();
        for k in 0..3 {
            let y = 400 + 70 * k;
            let a = CircleCandidate::new(520, y, 12);
            let b = CircleCandidate::new(600, y, 12);
            draw_bubble(&mut img, a, k % 2 == 0);
            draw_bubble(&mut img, b, false);
            circles.extend([a, b]);
        }
        let detector = BubbleSheetDetector::new(BubbleSheetParams::default());
        let first = detector.detect(&img.view(), &circles, 3).expect("first");
        circles.reverse();
        let second = detector.detect(&img.view(), &circles, 3).expect("second");
        assert_eq!(first.answers, second.answers);
        assert_eq!(first.rows, second.rows);
    }
}
