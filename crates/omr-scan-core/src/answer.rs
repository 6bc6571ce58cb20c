use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

/// Outcome of reading one YES/NO row.
#[derive(Clone, Copy, Debug, Eq, PartialEq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum AnswerState {
    Yes,
    No,
    Ambiguous,
    Unanswered,
}

impl AnswerState {
    /// Decision table for a row's two fill flags.
    pub fn from_marks(yes_marked: bool, no_marked: bool) -> Self {
        match (yes_marked, no_marked) {
            (true, false) => Self::Yes,
            (false, true) => Self::No,
            (true, true) => Self::Ambiguous,
            (false, false) => Self::Unanswered,
        }
    }

    /// `true` for a single, unambiguous mark.
    pub fn is_answered(self) -> bool {
        matches!(self, Self::Yes | Self::No)
    }
}

/// Answer state of one geometric row, before question text is attached.
#[derive(Clone, Copy, Debug, Eq, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RowAnswer {
    /// 1-based row position.
    pub question_number: usize,
    pub answer: AnswerState,
    pub yes_marked: bool,
    pub no_marked: bool,
}

#[derive(Clone, Debug, Eq, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AnswerRecord {
    pub question_number: usize,
    pub question: String,
    pub answer: AnswerState,
    pub yes_marked: bool,
    pub no_marked: bool,
}

#[derive(Clone, Copy, Debug, Default, Eq, PartialEq, Serialize, Deserialize)]
pub struct AnswerCounts {
    pub total: usize,
    pub answered: usize,
    pub unanswered: usize,
}

impl AnswerCounts {
    /// AMBIGUOUS rows count toward `total` only.
    pub fn tally<I: IntoIterator<Item = AnswerState>>(states: I) -> Self {
        states
            .into_iter()
            .fold(Self::default(), |mut acc, state| {
                acc.total += 1;
                if state.is_answered() {
                    acc.answered += 1;
                } else if state == AnswerState::Unanswered {
                    acc.unanswered += 1;
                }
                acc
            })
    }
}

/// Structured reading of one questionnaire page.
#[derive(Clone, Debug, Eq, PartialEq, Serialize, Deserialize)]
#[serde(tag = "formType", rename = "questionnaire", rename_all = "camelCase")]
pub struct QuestionnaireResult {
    pub header: BTreeMap<String, String>,
    pub total_questions: usize,
    pub answered: usize,
    pub unanswered: usize,
    /// Rows found in the image before truncation to the expected count.
    pub detected_rows: usize,
    pub questions: Vec<AnswerRecord>,
}

impl QuestionnaireResult {
    pub fn new(
        header: BTreeMap<String, String>,
        questions: Vec<AnswerRecord>,
        detected_rows: usize,
    ) -> Self {
        let counts = AnswerCounts::tally(questions.iter().map(|q| q.answer));
        Self {
            header,
            total_questions: counts.total,
            answered: counts.answered,
            unanswered: counts.unanswered,
            detected_rows,
            questions,
        }
    }

    pub fn counts(&self) -> AnswerCounts {
        AnswerCounts {
            total: self.total_questions,
            answered: self.answered,
            unanswered: self.unanswered,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn decision_table_is_exhaustive_and_exclusive() {
        let cases = [
            ((true, false), AnswerState::Yes),
            ((false, true), AnswerState::No),
            ((true, true), AnswerState::Ambiguous),
            ((false, false), AnswerState::Unanswered),
        ];
        for ((yes, no), expected) in cases {
            assert_eq!(AnswerState::from_marks(yes, no), expected);
        }
    }

    #[test]
    fn ambiguous_counts_toward_neither_bucket() {
        let counts = AnswerCounts::tally([
            AnswerState::Yes,
            AnswerState::Ambiguous,
            AnswerState::Unanswered,
            AnswerState::No,
        ]);
        assert_eq!(
            counts,
            AnswerCounts {
                total: 4,
                answered: 2,
                unanswered: 1
            }
        );
    }

    #[test]
    fn questionnaire_serializes_with_form_type_tag() {
        let result = QuestionnaireResult::new(
            BTreeMap::from([("Name".to_string(), "Jane".to_string())]),
            vec![AnswerRecord {
                question_number: 1,
                question: "Fever".to_string(),
                answer: AnswerState::Ambiguous,
                yes_marked: true,
                no_marked: true,
            }],
            1,
        );
        let json = serde_json::to_value(&result).expect("json");
        assert_eq!(json["formType"], "questionnaire");
        assert_eq!(json["totalQuestions"], 1);
        assert_eq!(json["answered"], 0);
        assert_eq!(json["unanswered"], 0);
        assert_eq!(json["questions"][0]["answer"], "AMBIGUOUS");
        assert_eq!(json["questions"][0]["questionNumber"], 1);
        assert_eq!(json["header"]["Name"], "Jane");
    }
}
