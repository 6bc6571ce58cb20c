//! JSON configuration for a scan.
//!
//! Every section is optional in the file; missing fields take their defaults.

use std::fs;
use std::path::Path;

use omr_scan_bubbles::BubbleSheetParams;
use serde::{Deserialize, Serialize};

use crate::circles::HoughCircleParams;
use crate::ocr::OcrConfig;

#[derive(thiserror::Error, Debug)]
pub enum ConfigError {
    #[error(transparent)]
    Io(#[from] std::io::Error),
    #[error(transparent)]
    Json(#[from] serde_json::Error),
}

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ScanConfig {
    pub circles: HoughCircleParams,
    pub bubbles: BubbleSheetParams,
    pub ocr: OcrConfig,
}

impl ScanConfig {
    /// Load a JSON config from disk.
    pub fn load_json(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let raw = fs::read_to_string(path)?;
        Ok(serde_json::from_str(&raw)?)
    }

    /// Write this config to disk as pretty JSON.
    pub fn write_json(&self, path: impl AsRef<Path>) -> Result<(), ConfigError> {
        let json = serde_json::to_string_pretty(self)?;
        fs::write(path, json)?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn partial_json_keeps_defaults() {
        let cfg: ScanConfig = serde_json::from_str(
            r#"{ "bubbles": { "fill": { "filled_below": 110.0 } }, "ocr": { "language": "eng" } }"#,
        )
        .expect("parse");
        assert_eq!(cfg.bubbles.fill.filled_below, 110.0);
        assert_eq!(cfg.bubbles.rows, BubbleSheetParams::default().rows);
        assert_eq!(cfg.circles, HoughCircleParams::default());
        assert_eq!(cfg.ocr.language.as_deref(), Some("eng"));
        assert_eq!(cfg.ocr.program, OcrConfig::default().program);
    }

    #[test]
    fn empty_object_is_default() {
        let cfg: ScanConfig = serde_json::from_str("{}").expect("parse");
        assert_eq!(cfg, ScanConfig::default());
    }
}
