/// Reasons the bubble reader declines a page.
///
/// None of these is fatal: each means the image does not carry enough
/// evidence for an OMR reading and the caller should fall back to plain text.
#[derive(thiserror::Error, Debug, Clone, PartialEq)]
pub enum BubbleSheetError {
    #[error("insufficient bubble candidates (found {found}, need at least {required})")]
    InsufficientCandidates { found: usize, required: usize },
    #[error("answer columns not found ({clusters} x-cluster(s), need 2)")]
    NoColumns { clusters: usize },
    #[error("answer columns collapsed onto x={x:.1}")]
    ColumnsCollapsed { x: f32 },
}
