use tracing::warn;

/// Extracts the embedded text layer of a PDF.
///
/// Parsing runs on the blocking pool. Any parser error, including a panic on
/// a malformed document, yields an empty string so the caller can fall back
/// to OCR.
pub async fn extract_text_layer(bytes: Vec<u8>) -> String {
    let result =
        tokio::task::spawn_blocking(move || pdf_extract::extract_text_from_mem(&bytes)).await;

    match result {
        Ok(Ok(text)) => text,
        Ok(Err(e)) => {
            warn!("PDF text extraction error: {e}");
            String::new()
        }
        Err(e) => {
            warn!("PDF text extraction aborted: {e}");
            String::new()
        }
    }
}
