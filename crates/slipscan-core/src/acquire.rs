//! Text acquisition: turning a document path into one block of text.

use std::path::{Path, PathBuf};

use image::DynamicImage;
use serde::Serialize;
use tracing::{debug, info, warn};

use crate::error::{AcquisitionError, OcrError};
use crate::models::config::PdfConfig;
use crate::ocr::TextRecognizer;
use crate::pdf::{meaningful_len, PdfDocument};
use crate::receipt::trim_text;

/// Broad document type, decided by file extension.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum DocumentKind {
    Pdf,
    Image,
    Text,
}

impl DocumentKind {
    /// Kind for a file extension (case-insensitive, without the dot).
    pub fn from_extension(ext: &str) -> Option<Self> {
        match ext.to_lowercase().as_str() {
            "pdf" => Some(Self::Pdf),
            "png" | "jpg" | "jpeg" | "tif" | "tiff" | "bmp" | "webp" | "gif" => Some(Self::Image),
            "txt" | "text" => Some(Self::Text),
            _ => None,
        }
    }

    /// Kind for a path.
    pub fn from_path(path: &Path) -> Option<Self> {
        path.extension()
            .and_then(|e| e.to_str())
            .and_then(Self::from_extension)
    }
}

/// How the text of a document was obtained.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum AcquisitionMethod {
    /// Read directly from a text file.
    Direct,
    /// Taken from the text layer of a PDF.
    Embedded,
    /// Recognized from images.
    Ocr,
    /// Recognition failed; the text is a failure message.
    Placeholder,
}

/// Text obtained for one document.
#[derive(Debug, Clone, PartialEq)]
pub struct Acquired {
    /// Trimmed document text.
    pub text: String,
    /// Document kind.
    pub kind: DocumentKind,
    /// How the text was obtained.
    pub method: AcquisitionMethod,
    /// Pages or images that went through recognition.
    pub pages: usize,
    /// Recognition failure behind a placeholder text.
    pub error: Option<String>,
}

impl Acquired {
    fn new(text: &str, kind: DocumentKind, method: AcquisitionMethod, pages: usize) -> Self {
        Self {
            text: trim_text(text).to_string(),
            kind,
            method,
            pages,
            error: None,
        }
    }

    /// Placeholder standing in for text that could not be recognized.
    fn placeholder(kind: DocumentKind, reason: impl std::fmt::Display) -> Self {
        let reason = reason.to_string();
        warn!("Text recognition failed: {}", reason);
        Self {
            text: format!("OCR failed: {}", reason),
            kind,
            method: AcquisitionMethod::Placeholder,
            pages: 0,
            error: Some(reason),
        }
    }
}

/// Reads documents and produces their text.
pub struct TextAcquirer {
    recognizer: Option<Box<dyn TextRecognizer>>,
    pdf: PdfConfig,
}

impl TextAcquirer {
    /// Create an acquirer without a recognizer.
    pub fn new(pdf: PdfConfig) -> Self {
        Self {
            recognizer: None,
            pdf,
        }
    }

    /// Attach a text recognizer for images and scanned PDFs.
    pub fn with_recognizer(mut self, recognizer: Box<dyn TextRecognizer>) -> Self {
        self.recognizer = Some(recognizer);
        self
    }

    /// Whether a recognizer is attached.
    pub fn has_recognizer(&self) -> bool {
        self.recognizer.is_some()
    }

    /// Acquire the text of the document at `path`.
    pub fn acquire(&self, path: &Path) -> Result<Acquired, AcquisitionError> {
        if !path.exists() {
            return Err(AcquisitionError::NotFound(path.to_path_buf()));
        }

        let kind = DocumentKind::from_path(path).ok_or_else(|| {
            AcquisitionError::UnsupportedFormat(
                path.extension()
                    .and_then(|e| e.to_str())
                    .unwrap_or("")
                    .to_string(),
            )
        })?;

        info!("Acquiring text from {} ({:?})", path.display(), kind);

        let acquired = match kind {
            DocumentKind::Text => {
                let text = std::fs::read_to_string(path).map_err(|e| read_error(path, e))?;
                Acquired::new(&text, kind, AcquisitionMethod::Direct, 0)
            }
            DocumentKind::Image => self.acquire_image(path)?,
            DocumentKind::Pdf => self.acquire_pdf(path)?,
        };

        debug!(
            "Acquired {} characters via {:?} from {} pages",
            acquired.text.len(),
            acquired.method,
            acquired.pages
        );
        Ok(acquired)
    }

    fn require_recognizer(&self, path: &Path) -> Result<&dyn TextRecognizer, AcquisitionError> {
        self.recognizer
            .as_deref()
            .ok_or_else(|| AcquisitionError::RecognizerUnavailable(path.to_path_buf()))
    }

    fn acquire_image(&self, path: &Path) -> Result<Acquired, AcquisitionError> {
        let recognizer = self.require_recognizer(path)?;

        let image = match image::open(path) {
            Ok(image) => image,
            Err(e) => return Ok(Acquired::placeholder(DocumentKind::Image, e)),
        };

        Ok(match recognizer.recognize(&image) {
            Ok(text) => Acquired::new(&text, DocumentKind::Image, AcquisitionMethod::Ocr, 1),
            Err(e) => Acquired::placeholder(DocumentKind::Image, e),
        })
    }

    fn acquire_pdf(&self, path: &Path) -> Result<Acquired, AcquisitionError> {
        let data = std::fs::read(path).map_err(|e| read_error(path, e))?;

        let document = match PdfDocument::load(&data) {
            Ok(document) => document,
            Err(e) => return Ok(Acquired::placeholder(DocumentKind::Pdf, e)),
        };

        let embedded = document.extract_text().unwrap_or_else(|e| {
            warn!("No embedded text: {}", e);
            String::new()
        });
        let has_embedded = meaningful_len(&embedded) > 0;

        let enough_text = meaningful_len(&embedded) >= self.pdf.min_text_length.max(1);
        if self.pdf.prefer_embedded_text && enough_text {
            debug!("Using embedded PDF text");
            return Ok(Acquired::new(&embedded, DocumentKind::Pdf, AcquisitionMethod::Embedded, 0));
        }

        let Some(recognizer) = self.recognizer.as_deref() else {
            if has_embedded {
                warn!("No recognizer configured, using sparse embedded text");
                return Ok(Acquired::new(&embedded, DocumentKind::Pdf, AcquisitionMethod::Embedded, 0));
            }
            return Err(AcquisitionError::RecognizerUnavailable(path.to_path_buf()));
        };

        let images = self.pdf_images(&document);
        if images.is_empty() {
            if has_embedded {
                warn!("PDF has no images, using embedded text");
                return Ok(Acquired::new(&embedded, DocumentKind::Pdf, AcquisitionMethod::Embedded, 0));
            }
            return Ok(Acquired::placeholder(DocumentKind::Pdf, "no page images found in PDF"));
        }

        match recognize_all(recognizer, &images) {
            Ok(text) => Ok(Acquired::new(&text, DocumentKind::Pdf, AcquisitionMethod::Ocr, images.len())),
            Err(e) => Ok(Acquired::placeholder(DocumentKind::Pdf, e)),
        }
    }

    /// Page images in page order, limited by `max_pages`.
    fn pdf_images(&self, document: &PdfDocument) -> Vec<DynamicImage> {
        let page_count = document.page_count();
        let last_page = match self.pdf.max_pages {
            0 => page_count,
            max => page_count.min(max as u32),
        };

        let mut images = Vec::new();
        for page in 1..=last_page {
            match document.page_images(page) {
                Ok(page_images) => images.extend(page_images),
                Err(e) => warn!("Failed to extract images from page {}: {}", page, e),
            }
        }

        if images.is_empty() {
            debug!("No page XObject images, scanning all objects");
            images = document.all_images();
            if self.pdf.max_pages > 0 {
                images.truncate(self.pdf.max_pages);
            }
        }

        images
    }
}

/// Recognize every image and join the texts with newlines; the first failure aborts.
fn recognize_all(recognizer: &dyn TextRecognizer, images: &[DynamicImage]) -> Result<String, OcrError> {
    let mut texts = Vec::with_capacity(images.len());
    for (i, image) in images.iter().enumerate() {
        debug!("Recognizing page image {}/{} with {}", i + 1, images.len(), recognizer.name());
        texts.push(recognizer.recognize(image)?);
    }
    Ok(texts.join("\n"))
}

fn read_error(path: &Path, source: std::io::Error) -> AcquisitionError {
    AcquisitionError::Read {
        path: PathBuf::from(path),
        source,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    struct FixedRecognizer(&'static str);

    impl TextRecognizer for FixedRecognizer {
        fn name(&self) -> &'static str {
            "fixed"
        }

        fn recognize(&self, _image: &DynamicImage) -> Result<String, OcrError> {
            Ok(self.0.to_string())
        }
    }

    struct FailingRecognizer;

    impl TextRecognizer for FailingRecognizer {
        fn name(&self) -> &'static str {
            "failing"
        }

        fn recognize(&self, _image: &DynamicImage) -> Result<String, OcrError> {
            Err(OcrError::Recognition("engine crashed".to_string()))
        }
    }

    fn write_png(dir: &Path) -> PathBuf {
        let path = dir.join("receipt.png");
        image::RgbImage::new(8, 8).save(&path).unwrap();
        path
    }

    #[test]
    fn test_document_kind() {
        assert_eq!(DocumentKind::from_path(Path::new("a/b.PDF")), Some(DocumentKind::Pdf));
        assert_eq!(DocumentKind::from_path(Path::new("scan.jpeg")), Some(DocumentKind::Image));
        assert_eq!(DocumentKind::from_path(Path::new("notes.txt")), Some(DocumentKind::Text));
        assert_eq!(DocumentKind::from_path(Path::new("sheet.xlsx")), None);
        assert_eq!(DocumentKind::from_path(Path::new("README")), None);
    }

    #[test]
    fn test_text_file_is_read_and_trimmed() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("receipt.txt");
        std::fs::write(&path, "\n  Acme Cafe\nLunch  \n\n").unwrap();

        let acquired = TextAcquirer::new(PdfConfig::default()).acquire(&path).unwrap();

        assert_eq!(acquired.text, "Acme Cafe\nLunch");
        assert_eq!(acquired.method, AcquisitionMethod::Direct);
        assert_eq!(acquired.error, None);
    }

    #[test]
    fn test_separator_controls_are_trimmed() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("receipt.txt");
        std::fs::write(&path, "\u{1f}Acme Cafe\n$4.00\u{1c}\u{1f} ").unwrap();

        let acquired = TextAcquirer::new(PdfConfig::default()).acquire(&path).unwrap();

        assert_eq!(acquired.text, "Acme Cafe\n$4.00");
    }

    #[test]
    fn test_missing_file() {
        let err = TextAcquirer::new(PdfConfig::default())
            .acquire(Path::new("/nonexistent/receipt.png"))
            .unwrap_err();
        assert!(matches!(err, AcquisitionError::NotFound(_)));
    }

    #[test]
    fn test_unsupported_format() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("receipt.docx");
        std::fs::write(&path, "x").unwrap();

        let err = TextAcquirer::new(PdfConfig::default()).acquire(&path).unwrap_err();
        assert!(matches!(err, AcquisitionError::UnsupportedFormat(ref ext) if ext == "docx"));
    }

    #[test]
    fn test_image_without_recognizer() {
        let dir = tempfile::tempdir().unwrap();
        let path = write_png(dir.path());

        let err = TextAcquirer::new(PdfConfig::default()).acquire(&path).unwrap_err();
        assert!(matches!(err, AcquisitionError::RecognizerUnavailable(_)));
    }

    #[test]
    fn test_image_recognized() {
        let dir = tempfile::tempdir().unwrap();
        let path = write_png(dir.path());

        let acquirer = TextAcquirer::new(PdfConfig::default())
            .with_recognizer(Box::new(FixedRecognizer(" Acme Cafe\n$4.00 \n")));
        let acquired = acquirer.acquire(&path).unwrap();

        assert_eq!(acquired.text, "Acme Cafe\n$4.00");
        assert_eq!(acquired.kind, DocumentKind::Image);
        assert_eq!(acquired.method, AcquisitionMethod::Ocr);
        assert_eq!(acquired.pages, 1);
    }

    #[test]
    fn test_recognition_failure_becomes_placeholder() {
        let dir = tempfile::tempdir().unwrap();
        let path = write_png(dir.path());

        let acquirer =
            TextAcquirer::new(PdfConfig::default()).with_recognizer(Box::new(FailingRecognizer));
        let acquired = acquirer.acquire(&path).unwrap();

        assert_eq!(acquired.method, AcquisitionMethod::Placeholder);
        assert_eq!(acquired.text, "OCR failed: text recognition failed: engine crashed");
        assert_eq!(acquired.error.as_deref(), Some("text recognition failed: engine crashed"));
    }

    #[test]
    fn test_corrupt_image_becomes_placeholder() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("broken.png");
        std::fs::write(&path, b"not really a png").unwrap();

        let acquirer =
            TextAcquirer::new(PdfConfig::default()).with_recognizer(Box::new(FixedRecognizer("x")));
        let acquired = acquirer.acquire(&path).unwrap();

        assert_eq!(acquired.method, AcquisitionMethod::Placeholder);
        assert!(acquired.text.starts_with("OCR failed: "));
    }

    #[test]
    fn test_corrupt_pdf_becomes_placeholder() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("broken.pdf");
        std::fs::write(&path, b"%PDF-1.4 truncated").unwrap();

        let acquired = TextAcquirer::new(PdfConfig::default()).acquire(&path).unwrap();

        assert_eq!(acquired.kind, DocumentKind::Pdf);
        assert_eq!(acquired.method, AcquisitionMethod::Placeholder);
        assert!(acquired.text.starts_with("OCR failed: failed to parse PDF"));
    }
}
