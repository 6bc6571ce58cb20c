//! OCR through the `tesseract` command-line tool.
//!
//! Two passes are made over the same file: plain text for the transcript and
//! TSV for per-word confidences. The engine is an external process so nothing
//! here links against Tesseract.

use std::path::{Path, PathBuf};
use std::process::Command;

use serde::{Deserialize, Serialize};

/// Text recognised on a page plus the mean word confidence (0..=100).
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct Recognition {
    pub text: String,
    pub confidence: f64,
}

#[derive(thiserror::Error, Debug)]
pub enum OcrError {
    #[error("failed to launch OCR engine `{program}`: {source}")]
    Spawn {
        program: String,
        #[source]
        source: std::io::Error,
    },

    #[error("OCR engine exited with {status}: {stderr}")]
    Failed { status: String, stderr: String },

    #[error("OCR engine produced non UTF-8 output")]
    Utf8(#[from] std::string::FromUtf8Error),
}

/// Anything that can turn a page image on disk into text.
pub trait TextRecognizer {
    fn recognize(&self, image_path: &Path) -> Result<Recognition, OcrError>;
}

impl<T: TextRecognizer + ?Sized> TextRecognizer for &T {
    fn recognize(&self, image_path: &Path) -> Result<Recognition, OcrError> {
        (**self).recognize(image_path)
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct OcrConfig {
    /// Executable name or path.
    pub program: PathBuf,
    /// Tesseract language code(s), e.g. `eng` or `eng+deu`.
    pub language: Option<String>,
    /// Page segmentation mode (`--psm`).
    pub page_segmentation: Option<u8>,
}

impl Default for OcrConfig {
    fn default() -> Self {
        Self {
            program: PathBuf::from("tesseract"),
            language: None,
            page_segmentation: None,
        }
    }
}

#[derive(Clone, Debug, Default)]
pub struct TesseractCli {
    config: OcrConfig,
}

impl TesseractCli {
    pub fn new(config: OcrConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &OcrConfig {
        &self.config
    }

    fn run(&self, image_path: &Path, tsv: bool) -> Result<String, OcrError> {
        let mut cmd = Command::new(&self.config.program);
        cmd.arg(image_path).arg("stdout");
        if let Some(lang) = &self.config.language {
            cmd.arg("-l").arg(lang);
        }
        if let Some(psm) = self.config.page_segmentation {
            cmd.arg("--psm").arg(psm.to_string());
        }
        if tsv {
            cmd.arg("tsv");
        }

        let output = cmd.output().map_err(|source| OcrError::Spawn {
            program: self.config.program.display().to_string(),
            source,
        })?;
        if !output.status.success() {
            return Err(OcrError::Failed {
                status: output.status.to_string(),
                stderr: String::from_utf8_lossy(&output.stderr).trim().to_string(),
            });
        }
        Ok(String::from_utf8(output.stdout)?)
    }
}

impl TextRecognizer for TesseractCli {
    fn recognize(&self, image_path: &Path) -> Result<Recognition, OcrError> {
        let text = self.run(image_path, false)?.trim().to_string();
        let confidence = mean_confidence(&self.run(image_path, true)?);
        log::debug!(
            "ocr: {} chars, confidence {confidence:.2}",
            text.chars().count()
        );
        Ok(Recognition { text, confidence })
    }
}

/// Mean of the `conf` column of Tesseract TSV output, rounded to 2 decimals.
///
/// Rows with confidence `-1` (layout rows without a word) are skipped; no
/// scored word at all gives `0.0`.
pub fn mean_confidence(tsv: &str) -> f64 {
    let mut lines = tsv.lines();
    let conf_col = lines
        .next()
        .and_then(|header| header.split('\t').position(|h| h.trim() == "conf"))
        .unwrap_or(10);

    let confs: Vec<f64> = lines
        .filter_map(|line| line.split('\t').nth(conf_col))
        .filter_map(|c| c.trim().parse::<f64>().ok())
        .filter(|&c| c != -1.0)
        .collect();
    if confs.is_empty() {
        return 0.0;
    }
    let mean = confs.iter().sum::<f64>() / confs.len() as f64;
    (mean * 100.0).round() / 100.0
}
