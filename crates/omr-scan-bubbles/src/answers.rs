use omr_scan_core::{AnswerCounts, AnswerState, RowAnswer, RowPair};

/// Map each row pair to its answer state, numbering rows from 1.
pub fn synthesize_answers(pairs: &[RowPair]) -> Vec<RowAnswer> {
    pairs
        .iter()
        .enumerate()
        .map(|(idx, pair)| {
            let yes_marked = pair.yes_filled();
            let no_marked = pair.no_filled();
            RowAnswer {
                question_number: idx + 1,
                answer: AnswerState::from_marks(yes_marked, no_marked),
                yes_marked,
                no_marked,
            }
        })
        .collect()
}

pub fn count_answers(answers: &[RowAnswer]) -> AnswerCounts {
    AnswerCounts::tally(answers.iter().map(|a| a.answer))
}
