use serde::{Deserialize, Serialize};

/// Region and size bounds a circle must satisfy to be considered a bubble.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CandidateFilterParams {
    /// Bubbles live right of `min_x_frac * width` (inclusive).
    pub min_x_frac: f32,
    /// Bubbles live strictly below `min_y_frac * height`; above is the header.
    pub min_y_frac: f32,
    /// Accepted radius range in pixels, both ends inclusive.
    pub min_radius: i32,
    pub max_radius: i32,
    /// Fewer surviving candidates than this means "not an OMR page".
    pub min_candidates: usize,
}

impl Default for CandidateFilterParams {
    fn default() -> Self {
        Self {
            min_x_frac: 0.55,
            min_y_frac: 0.25,
            min_radius: 8,
            max_radius: 22,
            min_candidates: 4,
        }
    }
}

/// Column discovery and assignment.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ColumnParams {
    /// Sorted x values further apart than this start a new cluster.
    pub max_gap_px: i32,
    /// Max |x - column_x| for a candidate to belong to a column.
    pub column_tolerance_px: f32,
    /// Layout contract: the YES column is the left one.
    pub yes_on_left: bool,
}

impl Default for ColumnParams {
    fn default() -> Self {
        Self {
            max_gap_px: 20,
            column_tolerance_px: 15.0,
            yes_on_left: true,
        }
    }
}

/// Interior sampling used to decide filled vs empty.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FillParams {
    /// Sampled disc radius as a fraction of the bubble radius.
    pub inner_radius_frac: f32,
    /// Lower bound on the sampled disc radius in pixels.
    pub min_inner_radius: i32,
    /// Mean intensity strictly below this (0..255) reads as filled.
    pub filled_below: f32,
}

impl Default for FillParams {
    fn default() -> Self {
        Self {
            inner_radius_frac: 0.5,
            min_inner_radius: 2,
            filled_below: 130.0,
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RowParams {
    /// Max |y - anchor_y| for a bubble to join the current row.
    pub tolerance_px: i32,
    /// Row budget when no question text was recognized.
    pub default_row_count: usize,
}

impl Default for RowParams {
    fn default() -> Self {
        Self {
            tolerance_px: 20,
            default_row_count: 10,
        }
    }
}

impl RowParams {
    /// Expected row count given how many questions were read from the text.
    pub fn expected_rows(&self, recognized_questions: usize) -> usize {
        if recognized_questions == 0 {
            self.default_row_count
        } else {
            recognized_questions
        }
    }
}

/// Parameters for the whole bubble-sheet reader.
#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct BubbleSheetParams {
    pub filter: CandidateFilterParams,
    pub columns: ColumnParams,
    pub fill: FillParams,
    pub rows: RowParams,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn expected_rows_defaults_when_no_questions() {
        let rows = RowParams::default();
        assert_eq!(rows.expected_rows(0), 10);
        assert_eq!(rows.expected_rows(3), 3);
    }

    #[test]
    fn partial_json_keeps_defaults() {
        let params: BubbleSheetParams =
            serde_json::from_str(r#"{ "fill": { "filled_below": 100.0 } }"#).expect("json");
        assert_eq!(params.fill.filled_below, 100.0);
        assert_eq!(params.fill.min_inner_radius, 2);
        assert_eq!(params.columns, ColumnParams::default());
    }
}
