//! Core types and utilities for bubble-sheet optical mark recognition.
//!
//! This crate is intentionally small. It holds the shared data model (circle
//! candidates, classified bubbles, row pairs, answers) and a lightweight
//! grayscale view; it does not depend on any circle detector or OCR engine.

mod answer;
mod bubble;
mod image;
mod logger;

pub use answer::{AnswerCounts, AnswerRecord, AnswerState, QuestionnaireResult, RowAnswer};
pub use bubble::{CircleCandidate, ClassifiedBubble, ColumnAssignment, RowPair};
pub use image::{mean_in_disc, GrayImage, GrayImageView};

#[cfg(feature = "tracing")]
pub use logger::init_tracing;

pub use logger::init_with_level;
