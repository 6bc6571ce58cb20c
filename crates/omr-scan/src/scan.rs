//! End-to-end page reading: OCR text + circles -> structured result.

use std::path::{Path, PathBuf};
use std::time::Instant;

use image::{GrayImage, ImageReader};
use omr_scan_bubbles::{BubbleSheetDetector, BubbleSheetParams};
use omr_scan_core::GrayImageView;
use omr_scan_text::{is_omr_form, section_text, QuestionnaireText};

use crate::circles::{CircleDetector, HoughCircleDetector};
use crate::config::{ConfigError, ScanConfig};
use crate::ocr::{OcrError, TesseractCli, TextRecognizer};
use crate::report::{PageType, ScanMetadata, ScanReport, Structured};

#[cfg(feature = "tracing")]
use tracing::instrument;

/// Errors that abort a scan. Weak OMR evidence is not one of them: it only
/// switches the page to the free-text reading.
#[derive(thiserror::Error, Debug)]
pub enum ScanError {
    #[error("Image file not found: {}", .0.display())]
    InputMissing(PathBuf),

    #[error("failed to decode image: {0}")]
    Decode(#[from] image::ImageError),

    #[error(transparent)]
    Ocr(#[from] OcrError),

    #[error("invalid configuration: {0}")]
    Config(#[from] ConfigError),

    #[error(transparent)]
    Json(#[from] serde_json::Error),

    #[error(transparent)]
    Io(#[from] std::io::Error),
}

/// Structured reading of a page and whether it came from the bubble reader.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct PageReading {
    pub structured: Structured,
    pub omr_detected: bool,
}

impl PageReading {
    fn free_text(text: &str) -> Self {
        Self {
            structured: Structured::Sections(section_text(text)),
            omr_detected: false,
        }
    }
}

/// Convert an `image::GrayImage` into the lightweight `omr-scan-core` view type.
pub fn gray_view(img: &GrayImage) -> GrayImageView<'_> {
    GrayImageView {
        width: img.width() as usize,
        height: img.height() as usize,
        data: img.as_raw(),
    }
}

/// Read one page given its grayscale raster and recognised text.
///
/// Circles are only detected once the text looks like a YES/NO form. Any
/// bubble-reader failure falls back to sectioned free text.
#[cfg_attr(
    feature = "tracing",
    instrument(
        level = "info",
        skip(img, text, circles, params),
        fields(width = img.width(), height = img.height())
    )
)]
pub fn scan_page<D: CircleDetector + ?Sized>(
    img: &GrayImage,
    text: &str,
    circles: &D,
    params: &BubbleSheetParams,
) -> PageReading {
    if !is_omr_form(text) {
        log::info!("page does not look like a YES/NO form; reading as free text");
        return PageReading::free_text(text);
    }

    let parsed = QuestionnaireText::parse(text);
    let expected_rows = params.rows.expected_rows(parsed.questions.len());
    let candidates = circles.detect_circles(img);
    log::debug!("{} circle candidate(s) before filtering", candidates.len());

    let detector = BubbleSheetDetector::new(*params);
    match detector.detect(&gray_view(img), &candidates, expected_rows) {
        Ok(detection) => PageReading {
            structured: Structured::Questionnaire(
                parsed.into_result(&detection.answers, detection.detected_rows),
            ),
            omr_detected: true,
        },
        Err(err) => {
            log::info!("bubble reader gave up ({err}); reading as free text");
            PageReading::free_text(text)
        }
    }
}

/// Scanner wiring a circle detector and a text recogniser to the page reader.
pub struct PageScanner<D = HoughCircleDetector, R = TesseractCli> {
    params: BubbleSheetParams,
    circles: D,
    recognizer: R,
}

impl PageScanner {
    /// Hough circles and the `tesseract` CLI, configured from `config`.
    pub fn from_config(config: &ScanConfig) -> Self {
        Self::new(
            config.bubbles,
            HoughCircleDetector::new(config.circles),
            TesseractCli::new(config.ocr.clone()),
        )
    }
}

impl<D: CircleDetector, R: TextRecognizer> PageScanner<D, R> {
    pub fn new(params: BubbleSheetParams, circles: D, recognizer: R) -> Self {
        Self {
            params,
            circles,
            recognizer,
        }
    }

    pub fn params(&self) -> &BubbleSheetParams {
        &self.params
    }

    /// Decode, recognise and read the page stored at `path`.
    #[cfg_attr(feature = "tracing", instrument(level = "info", skip(self)))]
    pub fn scan_file(
        &self,
        path: &Path,
        page_type: Option<PageType>,
    ) -> Result<ScanReport, ScanError> {
        if !path.is_file() {
            return Err(ScanError::InputMissing(path.to_path_buf()));
        }
        let started = Instant::now();

        let img = ImageReader::open(path)?
            .with_guessed_format()?
            .decode()?
            .to_luma8();
        let recognition = self.recognizer.recognize(path)?;
        let reading = scan_page(&img, &recognition.text, &self.circles, &self.params);

        let processing_time_ms = started.elapsed().as_millis() as u64;
        log::info!(
            "scanned {} ({}x{}) in {processing_time_ms} ms, omr={}",
            path.display(),
            img.width(),
            img.height(),
            reading.omr_detected
        );

        Ok(ScanReport {
            raw_text: recognition.text,
            confidence: recognition.confidence,
            structured: reading.structured,
            metadata: ScanMetadata {
                processing_time_ms,
                image_width: img.width(),
                image_height: img.height(),
                omr_detected: reading.omr_detected,
                page_type,
            },
        })
    }
}

/// Load the optional config file and scan `path` with the default engines.
pub fn scan_image(
    path: &Path,
    config_path: Option<&Path>,
    page_type: Option<PageType>,
) -> Result<ScanReport, ScanError> {
    let config = match config_path {
        Some(p) => ScanConfig::load_json(p)?,
        None => ScanConfig::default(),
    };
    PageScanner::from_config(&config).scan_file(path, page_type)
}
