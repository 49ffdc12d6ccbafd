use std::panic::{self, AssertUnwindSafe};
use std::time::Instant;

use lopdf::Document;

use crate::error::{AppError, AppResult};
use crate::models::UploadedFile;

#[derive(Debug, Clone, Copy, Default)]
pub struct PdfProcessor;

#[derive(Debug)]
pub struct ExtractionResult {
    pub text: String,
    pub pages: usize,
    pub processing_time_ms: u64,
}

impl PdfProcessor {
    pub fn new() -> Self {
        Self
    }

    /// Runs extraction on the blocking pool; parsing is CPU-bound.
    pub async fn extract_text(&self, file: UploadedFile) -> AppResult<ExtractionResult> {
        let processor = *self;

        tracing::info!(
            "Starting PDF text extraction for file: {} ({} bytes)",
            file.name,
            file.size
        );

        if !file.has_pdf_signature() {
            tracing::debug!("Upload {} lacks a %PDF header, parsing anyway", file.name);
        }

        tokio::task::spawn_blocking(move || processor.extract_text_from_bytes(&file.content))
            .await?
    }

    /// Text of every page in page order, joined with newlines.
    ///
    /// Only a document that cannot be parsed at all is an error. A page
    /// whose text cannot be decoded contributes nothing.
    pub fn extract_text_from_bytes(&self, content: &[u8]) -> AppResult<ExtractionResult> {
        let start = Instant::now();

        let doc = Document::load_mem(content).map_err(|e| {
            tracing::warn!("PDF structure could not be parsed: {}", e);
            AppError::pdf_parse(e.to_string())
        })?;

        let page_numbers: Vec<u32> = doc.get_pages().into_keys().collect();
        let pages = page_numbers.len();

        let page_texts: Vec<String> = page_numbers
            .iter()
            .map(|&page| match doc.extract_text(&[page]) {
                Ok(text) => text,
                Err(e) => {
                    tracing::debug!("No extractable text on page {}: {}", page, e);
                    String::new()
                }
            })
            .collect();

        let mut text = page_texts.join("\n");

        if pages > 0 && text.trim().is_empty() {
            tracing::debug!("Page-level extraction found no text, retrying with pdf-extract");
            text = self.fallback_extract(content);
        }

        let processing_time = start.elapsed().as_millis() as u64;

        tracing::info!(
            "PDF processing completed in {}ms, {} pages, extracted {} characters",
            processing_time,
            pages,
            text.len()
        );

        Ok(ExtractionResult {
            text,
            pages,
            processing_time_ms: processing_time,
        })
    }

    // pdf-extract panics on some malformed font tables.
    fn fallback_extract(&self, content: &[u8]) -> String {
        match panic::catch_unwind(AssertUnwindSafe(|| pdf_extract::extract_text_from_mem(content))) {
            Ok(Ok(text)) => text,
            Ok(Err(e)) => {
                tracing::warn!("pdf-extract fallback failed: {}", e);
                String::new()
            }
            Err(_) => {
                tracing::warn!("pdf-extract fallback panicked, treating document as textless");
                String::new()
            }
        }
    }
}
