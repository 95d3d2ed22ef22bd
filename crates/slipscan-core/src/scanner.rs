//! Document scanner: text acquisition followed by field extraction.

use std::path::Path;

use tracing::{info, warn};

use crate::acquire::{Acquired, TextAcquirer};
use crate::error::AcquisitionError;
use crate::models::config::SlipscanConfig;
use crate::models::scan::ScanOutput;
use crate::receipt::{ExpenseParser, ExtractionResult, RecordParser};

/// Scans receipt documents into expense records.
pub struct Scanner {
    acquirer: TextAcquirer,
    parser: ExpenseParser,
}

/// A scanned document: its text and what was extracted from it.
#[derive(Debug, Clone)]
pub struct ScannedDocument {
    pub acquired: Acquired,
    pub extraction: ExtractionResult,
}

impl ScannedDocument {
    /// Output envelope for this document.
    pub fn into_output(self, path: &Path) -> ScanOutput {
        ScanOutput::extracted(
            path,
            self.acquired.text,
            self.acquired.error,
            self.extraction.record,
        )
    }
}

impl Scanner {
    pub fn new(acquirer: TextAcquirer, parser: ExpenseParser) -> Self {
        Self { acquirer, parser }
    }

    /// Build a scanner from configuration.
    ///
    /// A recognizer is attached only when recognition is enabled and every
    /// model file is present; otherwise images and scanned PDFs fail with
    /// [`AcquisitionError::RecognizerUnavailable`].
    pub fn from_config(config: &SlipscanConfig) -> Self {
        let parser = ExpenseParser::from_config(&config.extraction);
        let acquirer = TextAcquirer::new(config.pdf.clone());
        Self::new(attach_recognizer(acquirer, config), parser)
    }

    /// Whether images and scanned PDFs can be recognized.
    pub fn can_recognize(&self) -> bool {
        self.acquirer.has_recognizer()
    }

    /// Acquire the document's text and extract its fields.
    pub fn scan(&self, path: &Path) -> Result<ScannedDocument, AcquisitionError> {
        let acquired = self.acquirer.acquire(path)?;
        let extraction = self.parser.parse(&acquired.text);

        info!(
            "Scanned {} ({} missing fields)",
            path.display(),
            extraction.record.missing_fields().len()
        );

        Ok(ScannedDocument {
            acquired,
            extraction,
        })
    }

    /// Scan a document, folding hard failures into an error envelope.
    pub fn scan_to_output(&self, path: &Path) -> ScanOutput {
        match self.scan(path) {
            Ok(document) => document.into_output(path),
            Err(e) => {
                warn!("Failed to scan {}: {}", path.display(), e);
                ScanOutput::failed(path, e)
            }
        }
    }
}

#[cfg(feature = "native")]
fn attach_recognizer(acquirer: TextAcquirer, config: &SlipscanConfig) -> TextAcquirer {
    use crate::ocr::PureOcrRecognizer;

    if !config.ocr.enabled {
        info!("Text recognition disabled");
        return acquirer;
    }

    let model_dir = &config.models.model_dir;
    if !config.models.available_in(model_dir) {
        warn!(
            "Model files not found in {}, text recognition unavailable",
            model_dir.display()
        );
        return acquirer;
    }

    match PureOcrRecognizer::from_dir(model_dir, &config.models, config.ocr.clone()) {
        Ok(recognizer) => acquirer.with_recognizer(Box::new(recognizer)),
        Err(e) => {
            warn!("Failed to load recognizer: {}", e);
            acquirer
        }
    }
}

#[cfg(not(feature = "native"))]
fn attach_recognizer(acquirer: TextAcquirer, _config: &SlipscanConfig) -> TextAcquirer {
    acquirer
}
