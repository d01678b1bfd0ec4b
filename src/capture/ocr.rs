//! OCR text detection using rusty-tesseract

use std::collections::HashMap;

use anyhow::Result;
use image::RgbaImage;

use crate::capture::image::ScreenCapture;
use crate::domain::RectF;

/// External text-detection collaborator.
///
/// Implementations may be slow; callers run them off the event loop and
/// treat any error as "no text detected".
pub trait TextDetector {
    fn detect_text(&self, region: RectF) -> Result<String>;
}

/// Tesseract-backed text detector over a capture source
#[derive(Clone, Debug)]
pub struct OcrEngine<C> {
    source: C,
    lang: String,
}

impl<C: ScreenCapture> OcrEngine<C> {
    pub fn new(source: C) -> Self {
        Self::with_language(source, "eng")
    }

    pub fn with_language(source: C, lang: impl Into<String>) -> Self {
        Self {
            source,
            lang: lang.into(),
        }
    }
}

impl<C: ScreenCapture> TextDetector for OcrEngine<C> {
    fn detect_text(&self, region: RectF) -> Result<String> {
        let img = self.source.capture_region(region)?;
        recognize_text(&img, &self.lang)
    }
}

/// Check whether the system tesseract binary is usable.
/// rusty-tesseract shells out to it, so this is the only install check
/// needed.
pub fn tesseract_available() -> bool {
    rusty_tesseract::get_tesseract_version().is_ok()
}

/// A recognized word with its position in the page layout
#[derive(Clone, Debug, PartialEq)]
struct OcrWord {
    text: String,
    block_num: i32,
    line_num: i32,
    word_num: i32,
}

/// Run tesseract over an image and return the recognized text in reading
/// order.
fn recognize_text(img: &RgbaImage, lang: &str) -> Result<String> {
    use rusty_tesseract::{Args, Image};

    log::info!(
        "Running OCR with rusty-tesseract on {}x{} region...",
        img.width(),
        img.height()
    );

    let dynamic_img = image::DynamicImage::ImageRgba8(img.clone());

    // For small regions, upscale to improve OCR accuracy on small text.
    // Tesseract works best with text that's at least 10-12 pixels tall.
    let min_dimension = img.width().min(img.height());
    let processed_img = if min_dimension < 100 {
        let (w, h) = (img.width() * 4, img.height() * 4);
        log::info!("Upscaling small region 4x to {}x{}", w, h);
        dynamic_img.resize(w, h, image::imageops::FilterType::Lanczos3)
    } else if min_dimension < 200 {
        let (w, h) = (img.width() * 2, img.height() * 2);
        log::info!("Upscaling small region 2x to {}x{}", w, h);
        dynamic_img.resize(w, h, image::imageops::FilterType::Lanczos3)
    } else {
        dynamic_img
    };

    let tess_img = Image::from_dynamic_image(&processed_img)
        .map_err(|e| anyhow::anyhow!("failed to create tesseract image: {e}"))?;

    // Use higher DPI for better small text recognition
    let dpi = if min_dimension < 200 { 300 } else { 150 };
    let args = Args {
        lang: lang.to_string(),
        config_variables: HashMap::new(),
        dpi: Some(dpi),
        psm: Some(11), // Fully automatic page segmentation
        oem: Some(3),  // Default OCR Engine Mode
    };

    let data_output = rusty_tesseract::image_to_data(&tess_img, &args)
        .map_err(|e| anyhow::anyhow!("tesseract OCR failed: {e}"))?;
    log::debug!("Tesseract returned {} data entries", data_output.data.len());

    let words: Vec<OcrWord> = data_output
        .data
        .into_iter()
        .filter(|d| !d.text.trim().is_empty() && d.conf > 0.0)
        .map(|d| OcrWord {
            text: d.text,
            block_num: d.block_num,
            line_num: d.line_num,
            word_num: d.word_num,
        })
        .collect();

    Ok(text_in_reading_order(words))
}

/// Join recognized words into block/line/word order: spaces within a line,
/// one newline per line break, blank line between blocks.
fn text_in_reading_order(mut words: Vec<OcrWord>) -> String {
    words.sort_by(|a, b| {
        a.block_num
            .cmp(&b.block_num)
            .then(a.line_num.cmp(&b.line_num))
            .then(a.word_num.cmp(&b.word_num))
    });

    let mut out = String::new();
    let mut prev: Option<(i32, i32)> = None;
    for word in words {
        match prev {
            None => {}
            Some((block, _)) if block != word.block_num => out.push_str("\n\n"),
            Some((_, line)) if line != word.line_num => out.push('\n'),
            Some(_) => out.push(' '),
        }
        out.push_str(word.text.trim());
        prev = Some((word.block_num, word.line_num));
    }
    out.trim().to_string()
}
