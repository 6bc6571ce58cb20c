//! Text side of questionnaire reading.
//!
//! Works on OCR output only, with no access to image geometry:
//! - [`is_omr_form`] decides whether a page is a YES/NO bubble form at all;
//! - [`QuestionnaireText`] extracts header fields and numbered questions and
//!   pairs them with answer rows by position;
//! - [`section_text`] is the fallback reading of a page as headed sections.

mod correlate;
pub mod form;
pub mod header;
mod patterns;
pub mod questions;
pub mod sections;

pub use correlate::{correlate_answers, placeholder_question, QuestionnaireText};
pub use form::{is_omr_form, FormSignals};
pub use header::{extract_header, FORM_TITLE_KEY};
pub use questions::{clean_question_text, extract_questions};
pub use sections::{section_text, Field, Section, SectionedText};
