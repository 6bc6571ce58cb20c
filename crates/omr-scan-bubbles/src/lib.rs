//! YES/NO answer-bubble reader for fixed-layout questionnaire pages.
//!
//! Pipeline, given circles from an external detector:
//! - keep circles inside the answer region with a bubble-sized radius;
//! - bucket x positions and pick the two dominant answer columns;
//! - sample each bubble's interior and classify it filled or empty;
//! - group bubbles into rows around an anchor y;
//! - turn each row pair into YES / NO / AMBIGUOUS / UNANSWERED.
//!
//! Every failure is an "insufficient evidence" signal
//! ([`BubbleSheetError`]); callers are expected to fall back to reading the
//! page as free text.

pub mod answers;
pub mod columns;
pub mod detector;
mod error;
pub mod fill;
pub mod filter;
mod params;
pub mod rows;

pub use columns::AnswerColumns;
pub use detector::{BubbleSheetDetection, BubbleSheetDetector};
pub use error::BubbleSheetError;
pub use params::{BubbleSheetParams, CandidateFilterParams, ColumnParams, FillParams, RowParams};
