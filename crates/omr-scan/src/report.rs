//! JSON envelope written by the CLI.

use omr_scan_core::QuestionnaireResult;
use omr_scan_text::SectionedText;
use serde::{Deserialize, Serialize};

/// Caller-supplied hint about what kind of page was scanned.
///
/// It is echoed in the report metadata and does not change how text is read.
#[derive(Clone, Copy, Debug, Eq, PartialEq, Hash, Serialize, Deserialize)]
#[cfg_attr(feature = "cli", derive(clap::ValueEnum))]
#[serde(rename_all = "kebab-case")]
pub enum PageType {
    TestStatus,
    TreatmentUpdate,
    Symptoms,
    Notes,
}

/// Structured reading of a page: questionnaire answers or sectioned text.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Structured {
    Questionnaire(QuestionnaireResult),
    Sections(SectionedText),
}

impl Structured {
    pub fn as_questionnaire(&self) -> Option<&QuestionnaireResult> {
        match self {
            Structured::Questionnaire(q) => Some(q),
            Structured::Sections(_) => None,
        }
    }

    pub fn as_sections(&self) -> Option<&SectionedText> {
        match self {
            Structured::Sections(s) => Some(s),
            Structured::Questionnaire(_) => None,
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ScanMetadata {
    pub processing_time_ms: u64,
    pub image_width: u32,
    pub image_height: u32,
    pub omr_detected: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub page_type: Option<PageType>,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ScanReport {
    pub raw_text: String,
    pub confidence: f64,
    pub structured: Structured,
    pub metadata: ScanMetadata,
}

/// Body printed to stderr when a scan fails.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ErrorReport {
    pub error: String,
}

impl ErrorReport {
    pub fn new(err: &dyn std::error::Error) -> Self {
        Self {
            error: err.to_string(),
        }
    }
}
