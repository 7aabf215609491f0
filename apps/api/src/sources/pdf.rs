use bytes::Bytes;
use tracing::{info, warn};

use crate::errors::AppError;

const PDF_MAGIC: &[u8] = b"%PDF";

/// Extracts the text layer of an uploaded PDF.
///
/// Parsing is CPU-bound, so it runs on the blocking pool. A file that is not a PDF,
/// cannot be parsed, or has no text layer is a user input problem (`Validation`).
pub async fn extract_pdf_text(data: Bytes) -> Result<String, AppError> {
    if !data.starts_with(PDF_MAGIC) {
        return Err(AppError::Validation(
            "Uploaded file is not a PDF document".to_string(),
        ));
    }

    let size = data.len();
    let text = tokio::task::spawn_blocking(move || pdf_extract::extract_text_from_mem(&data))
        .await
        .map_err(|e| {
            // pdf-extract panics on some malformed documents
            if e.is_panic() {
                warn!("PDF extraction panicked on malformed input");
                AppError::Validation("Could not read text from the uploaded PDF".to_string())
            } else {
                AppError::Internal(anyhow::anyhow!("PDF extraction task failed: {e}"))
            }
        })?
        .map_err(|e| {
            warn!("PDF extraction failed: {e}");
            AppError::Validation("Could not read text from the uploaded PDF".to_string())
        })?;

    if text.trim().is_empty() {
        return Err(AppError::Validation(
            "The uploaded PDF contains no extractable text".to_string(),
        ));
    }

    info!("Extracted {} chars of text from {} byte PDF", text.len(), size);
    Ok(text)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_rejects_non_pdf() {
        let err = extract_pdf_text(Bytes::from_static(b"hello, not a pdf"))
            .await
            .unwrap_err();
        assert!(matches!(err, AppError::Validation(_)));
    }

    #[tokio::test]
    async fn test_rejects_empty_upload() {
        let err = extract_pdf_text(Bytes::new()).await.unwrap_err();
        assert!(matches!(err, AppError::Validation(_)));
    }

    #[tokio::test]
    async fn test_rejects_truncated_pdf() {
        let err = extract_pdf_text(Bytes::from_static(b"%PDF-1.7\n%garbage"))
            .await
            .unwrap_err();
        assert!(matches!(err, AppError::Validation(_)));
    }
}
