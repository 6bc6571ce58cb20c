//! High-level facade crate for the `omr-scan-*` workspace.
//!
//! This crate provides:
//! - re-exports of the bubble reader and the text-side crates
//! - a pure-Rust Hough circle detector and a `tesseract` CLI adapter, the two
//!   primitives the bubble reader needs from outside
//! - the end-to-end page reader and the JSON report the `omr-scan` binary prints
//!
//! ## Quickstart
//!
//! ```no_run
//! use omr_scan::{PageScanner, ScanConfig};
//! use std::path::Path;
//!
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let scanner = PageScanner::from_config(&ScanConfig::default());
//! let report = scanner.scan_file(Path::new("page.png"), None)?;
//! println!("omr detected: {}", report.metadata.omr_detected);
//! # Ok(())
//! # }
//! ```
//!
//! ## API map
//! - `omr_scan::core`: shared types (circles, bubbles, answers, grayscale view).
//! - `omr_scan::bubbles`: candidate filter, columns, fill, rows, answers.
//! - `omr_scan::text`: form detector, header/question extraction, sectioning.
//! - `omr_scan::circles`: circle detection primitive.
//! - `omr_scan::ocr`: text recognition primitive.
//! - `omr_scan::scan`: page pipeline with free-text fallback.

pub use omr_scan_bubbles as bubbles;
pub use omr_scan_core as core;
pub use omr_scan_text as text;

pub mod circles;
pub mod config;
pub mod ocr;
pub mod report;
pub mod scan;

pub use circles::{CircleDetector, HoughCircleDetector, HoughCircleParams};
pub use config::{ConfigError, ScanConfig};
pub use ocr::{OcrConfig, OcrError, Recognition, TesseractCli, TextRecognizer};
pub use report::{ErrorReport, PageType, ScanMetadata, ScanReport, Structured};
pub use scan::{gray_view, scan_image, scan_page, PageReading, PageScanner, ScanError};

pub use omr_scan_bubbles::BubbleSheetParams;
pub use omr_scan_core::{AnswerState, CircleCandidate, QuestionnaireResult};
