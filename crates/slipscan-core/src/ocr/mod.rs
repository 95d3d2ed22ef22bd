//! Text recognition for scanned pages and photos.

#[cfg(feature = "native")]
mod pure_engine;

#[cfg(feature = "native")]
pub use pure_engine::PureOcrRecognizer;

use image::DynamicImage;

use crate::error::OcrError;

/// Something that turns an image into plain text.
pub trait TextRecognizer {
    /// Engine identifier.
    fn name(&self) -> &'static str;

    /// Recognize the text in an image, lines separated by `\n`.
    fn recognize(&self, image: &DynamicImage) -> Result<String, OcrError>;
}

/// A piece of recognized text with its top-left corner.
#[derive(Debug, Clone, PartialEq)]
pub struct TextRegion {
    pub left: f32,
    pub top: f32,
    pub text: String,
}

/// Vertical distance (pixels) within which regions share a row.
const ROW_HEIGHT: f32 = 20.0;

/// Sort regions top-to-bottom, then left-to-right within a row.
pub fn sort_reading_order(regions: &mut [TextRegion]) {
    regions.sort_by(|a, b| {
        let row_a = (a.top / ROW_HEIGHT) as i32;
        let row_b = (b.top / ROW_HEIGHT) as i32;

        row_a.cmp(&row_b).then_with(|| {
            a.left
                .partial_cmp(&b.left)
                .unwrap_or(std::cmp::Ordering::Equal)
        })
    });
}

/// Join regions in reading order, one per line.
pub fn join_regions(mut regions: Vec<TextRegion>) -> String {
    sort_reading_order(&mut regions);
    regions
        .iter()
        .map(|r| r.text.as_str())
        .collect::<Vec<_>>()
        .join("\n")
}
