// Resume text extraction for uploaded files.
// PDF parsing is CPU-bound and runs inside tokio::task::spawn_blocking.

use anyhow::anyhow;
use bytes::Bytes;
use tracing::debug;

use crate::errors::AppError;

pub const PDF_CONTENT_TYPE: &str = "application/pdf";

/// Pulls the text layer out of a PDF. Scanned documents without one are
/// rejected rather than analysed as empty resumes.
pub async fn extract_pdf_text(data: Bytes) -> Result<String, AppError> {
    if !data.starts_with(b"%PDF") {
        return Err(AppError::Validation("uploaded file is not a PDF".into()));
    }

    let size = data.len();
    let text = tokio::task::spawn_blocking(move || pdf_extract::extract_text_from_mem(&data))
        .await
        .map_err(|e| AppError::Internal(anyhow!("PDF extraction task failed: {e}")))?
        .map_err(|e| AppError::UnprocessableEntity(format!("could not read PDF: {e}")))?;

    let text = normalize_whitespace(&text);
    debug!("Extracted {} chars from {size}-byte PDF", text.len());
    if text.is_empty() {
        return Err(AppError::UnprocessableEntity(
            "PDF has no extractable text".into(),
        ));
    }
    Ok(text)
}

/// Collapses runs of blank lines and trailing spaces left by the extractor.
fn normalize_whitespace(text: &str) -> String {
    text.lines()
        .map(str::trim_end)
        .filter(|line| !line.trim().is_empty())
        .collect::<Vec<_>>()
        .join("\n")
}
