//! Text extraction: pulls plain text out of an uploaded PDF.
//!
//! The embedded text layer is tried first. Scanned resumes have little or no
//! text layer, so when it comes back shorter than `MIN_TEXT_CHARS` the pages
//! are rasterized with poppler and read back with tesseract.
//!
//! `AppState` holds an `Arc<dyn TextExtractor>` so handlers can be exercised
//! with a stub in tests.

pub mod ocr;
pub mod pdf;

use std::path::Path;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::{debug, info, warn};

use crate::extract::ocr::OcrEngine;

/// Below this many non-whitespace-trimmed characters a document is treated as
/// having no usable text.
pub const MIN_TEXT_CHARS: usize = 50;

#[derive(Debug, Error)]
pub enum ExtractError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("failed to launch {tool}: {source}")]
    Spawn {
        tool: String,
        #[source]
        source: std::io::Error,
    },

    #[error("{tool} exited with status {status}: {stderr}")]
    ToolFailed {
        tool: String,
        status: i32,
        stderr: String,
    },

    #[error("{tool} timed out after {secs}s")]
    Timeout { tool: String, secs: u64 },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ExtractionMethod {
    TextLayer,
    Ocr,
}

#[derive(Debug, Clone)]
pub struct ExtractedText {
    pub text: String,
    pub method: ExtractionMethod,
    /// Number of pages read by OCR; zero when the text layer was used.
    pub ocr_pages: usize,
}

impl ExtractedText {
    pub fn meaningful_len(&self) -> usize {
        meaningful_len(&self.text)
    }
}

pub fn meaningful_len(text: &str) -> usize {
    text.trim().chars().count()
}

#[async_trait]
pub trait TextExtractor: Send + Sync {
    async fn extract(&self, path: &Path) -> Result<ExtractedText, ExtractError>;
}

/// Default extractor: text layer, then OCR fallback when enabled.
pub struct PdfExtractor {
    ocr: Option<OcrEngine>,
    min_text_chars: usize,
}

impl PdfExtractor {
    pub fn new(ocr: Option<OcrEngine>) -> Self {
        Self {
            ocr,
            min_text_chars: MIN_TEXT_CHARS,
        }
    }
}

#[async_trait]
impl TextExtractor for PdfExtractor {
    async fn extract(&self, path: &Path) -> Result<ExtractedText, ExtractError> {
        let bytes = tokio::fs::read(path).await?;
        let text = pdf::extract_text_layer(bytes).await;
        let layer_len = meaningful_len(&text);
        debug!(chars = layer_len, "Text layer extracted");

        let layer = ExtractedText {
            text,
            method: ExtractionMethod::TextLayer,
            ocr_pages: 0,
        };

        if layer_len >= self.min_text_chars {
            return Ok(layer);
        }

        let Some(ocr) = &self.ocr else {
            debug!("OCR disabled; keeping short text layer");
            return Ok(layer);
        };

        info!(chars = layer_len, "Text layer too short, falling back to OCR");
        match ocr.ocr_pdf(path).await {
            Ok(output) if meaningful_len(&output.text) > layer_len => {
                info!(
                    pages = output.pages,
                    chars = meaningful_len(&output.text),
                    "OCR fallback produced text"
                );
                Ok(ExtractedText {
                    text: output.text,
                    method: ExtractionMethod::Ocr,
                    ocr_pages: output.pages,
                })
            }
            Ok(_) => Ok(layer),
            Err(e) => {
                warn!("OCR fallback failed: {e}");
                Ok(layer)
            }
        }
    }
}
