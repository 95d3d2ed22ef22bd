//! Configuration structures for the scanning pipeline.

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

use crate::error::{Result, SlipscanError};
use crate::receipt::CategoryTable;

/// Main configuration for slipscan.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct SlipscanConfig {
    /// Text recognition configuration.
    pub ocr: OcrConfig,

    /// PDF processing configuration.
    pub pdf: PdfConfig,

    /// Model file locations.
    pub models: ModelConfig,

    /// Field extraction configuration.
    pub extraction: ExtractionConfig,
}

/// Text recognition configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct OcrConfig {
    /// Run text recognition on images and scanned PDFs.
    pub enabled: bool,

    /// Keep `[UNK]` tokens emitted by the recognizer instead of blanking them.
    pub keep_unk: bool,

    /// Maximum image dimension (longer side) passed to the recognizer.
    pub max_image_size: u32,
}

impl Default for OcrConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            keep_unk: false,
            max_image_size: 2048,
        }
    }
}

/// PDF processing configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct PdfConfig {
    /// Maximum pages to recognize (0 = unlimited).
    pub max_pages: usize,

    /// Use embedded text instead of recognition when there is enough of it.
    pub prefer_embedded_text: bool,

    /// Minimum non-whitespace characters for embedded text to count.
    pub min_text_length: usize,
}

impl Default for PdfConfig {
    fn default() -> Self {
        Self {
            max_pages: 0,
            prefer_embedded_text: true,
            min_text_length: 50,
        }
    }
}

/// Model file paths.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ModelConfig {
    /// Directory containing model files.
    pub model_dir: PathBuf,

    /// Text detection model file name.
    pub detection_model: String,

    /// Text recognition model file name.
    pub recognition_model: String,

    /// Character dictionary file name.
    pub dictionary: String,
}

impl Default for ModelConfig {
    fn default() -> Self {
        Self {
            model_dir: PathBuf::from("models"),
            detection_model: "det.onnx".to_string(),
            recognition_model: "latin_rec.onnx".to_string(),
            dictionary: "latin_dict.txt".to_string(),
        }
    }
}

impl ModelConfig {
    /// Paths of the detection model, recognition model and dictionary in `dir`.
    pub fn files_in(&self, dir: &Path) -> [PathBuf; 3] {
        [
            dir.join(&self.detection_model),
            dir.join(&self.recognition_model),
            dir.join(&self.dictionary),
        ]
    }

    /// Whether every model file exists in `dir`.
    pub fn available_in(&self, dir: &Path) -> bool {
        self.files_in(dir).iter().all(|p| p.exists())
    }
}

/// Field extraction configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct ExtractionConfig {
    /// Ordered keyword tables used for categorization.
    pub categories: CategoryTable,
}

impl SlipscanConfig {
    /// Load configuration from a JSON file.
    pub fn from_file(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        serde_json::from_str(&content)
            .map_err(|e| SlipscanError::Config(format!("{}: {}", path.display(), e)))
    }

    /// Save configuration to a JSON file.
    pub fn save(&self, path: &Path) -> Result<()> {
        let content = serde_json::to_string_pretty(self)
            .map_err(|e| SlipscanError::Config(e.to_string()))?;
        std::fs::write(path, content)?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::record::Category;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_partial_config_fills_defaults() {
        let config: SlipscanConfig =
            serde_json::from_str(r#"{ "pdf": { "max_pages": 3 } }"#).unwrap();

        assert_eq!(config.pdf.max_pages, 3);
        assert_eq!(config.pdf.min_text_length, 50);
        assert!(config.ocr.enabled);
        assert_eq!(config.models.detection_model, "det.onnx");
        assert_eq!(config.extraction.categories, CategoryTable::default());
    }

    #[test]
    fn test_custom_category_table() {
        let config: SlipscanConfig = serde_json::from_str(
            r#"{ "extraction": { "categories": [
                { "category": "shopping", "keywords": ["bookshop"] }
            ] } }"#,
        )
        .unwrap();

        let rules = config.extraction.categories.rules();
        assert_eq!(rules.len(), 1);
        assert_eq!(rules[0].category, Category::Shopping);
        assert_eq!(rules[0].keywords, vec!["bookshop".to_string()]);
    }

    #[test]
    fn test_save_and_load_roundtrip() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.json");

        let mut config = SlipscanConfig::default();
        config.ocr.keep_unk = true;
        config.save(&path).unwrap();

        let loaded = SlipscanConfig::from_file(&path).unwrap();
        assert!(loaded.ocr.keep_unk);
        assert_eq!(
            loaded.models.files_in(Path::new("models"))[0],
            PathBuf::from("models/det.onnx")
        );
    }

    #[test]
    fn test_invalid_config_is_config_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.json");
        std::fs::write(&path, "{ not json").unwrap();

        let err = SlipscanConfig::from_file(&path).unwrap_err();
        assert!(matches!(err, SlipscanError::Config(_)));
    }
}
