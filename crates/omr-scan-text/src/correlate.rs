use std::collections::BTreeMap;

use omr_scan_core::{AnswerRecord, QuestionnaireResult, RowAnswer};
use serde::{Deserialize, Serialize};

use crate::header::extract_header;
use crate::questions::extract_questions;

#[cfg(feature = "tracing")]
use tracing::instrument;

/// Text-side reading of a questionnaire: header fields and question texts.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct QuestionnaireText {
    pub header: BTreeMap<String, String>,
    pub questions: Vec<String>,
}

impl QuestionnaireText {
    #[cfg_attr(
        feature = "tracing",
        instrument(level = "debug", skip(text), fields(len = text.len()))
    )]
    pub fn parse(text: &str) -> Self {
        let parsed = Self {
            header: extract_header(text),
            questions: extract_questions(text),
        };
        log::debug!(
            "questionnaire text: {} header field(s), {} question(s)",
            parsed.header.len(),
            parsed.questions.len()
        );
        parsed
    }

    /// Pair the i-th answer row with the i-th question.
    pub fn correlate(&self, answers: &[RowAnswer]) -> Vec<AnswerRecord> {
        correlate_answers(&self.questions, answers)
    }

    /// Assemble the final result for this page.
    pub fn into_result(self, answers: &[RowAnswer], detected_rows: usize) -> QuestionnaireResult {
        let records = self.correlate(answers);
        QuestionnaireResult::new(self.header, records, detected_rows)
    }
}

pub fn placeholder_question(question_number: usize) -> String {
    format!("Question {question_number}")
}

/// Positional pairing; rows without a recognized question get a placeholder.
pub fn correlate_answers(questions: &[String], answers: &[RowAnswer]) -> Vec<AnswerRecord> {
    answers
        .iter()
        .enumerate()
        .map(|(idx, row)| AnswerRecord {
            question_number: row.question_number,
            question: questions
                .get(idx)
                .cloned()
                .unwrap_or_else(|| placeholder_question(row.question_number)),
            answer: row.answer,
            yes_marked: row.yes_marked,
            no_marked: row.no_marked,
        })
        .collect()
}
