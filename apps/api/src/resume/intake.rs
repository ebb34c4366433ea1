//! Resume intake: size checks and text extraction ahead of parsing.

use bytes::Bytes;

use crate::errors::AppError;

pub const MAX_UPLOAD_BYTES: usize = 1_048_576;
pub const MAX_RESUME_CHARS: usize = 300_000;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ResumeFormat {
    Pdf,
    Docx,
    PlainText,
}

impl ResumeFormat {
    /// Content type wins over the file extension; unknown uploads are read as text.
    pub fn detect(file_name: Option<&str>, content_type: Option<&str>) -> Self {
        match content_type {
            Some("application/pdf") => return ResumeFormat::Pdf,
            Some("application/vnd.openxmlformats-officedocument.wordprocessingml.document") => {
                return ResumeFormat::Docx
            }
            _ => {}
        }

        let extension = file_name
            .and_then(|name| name.rsplit_once('.'))
            .map(|(_, ext)| ext.to_ascii_lowercase());
        match extension.as_deref() {
            Some("pdf") => ResumeFormat::Pdf,
            Some("docx") => ResumeFormat::Docx,
            _ => ResumeFormat::PlainText,
        }
    }
}

pub fn validate_upload_size(len: usize) -> Result<(), AppError> {
    if len > MAX_UPLOAD_BYTES {
        return Err(AppError::PayloadTooLarge(
            "File size exceeds 1MB. Please upload a smaller file or shorten the resume \
            to under 300,000 characters."
                .to_string(),
        ));
    }
    Ok(())
}

pub fn validate_resume_text(text: &str) -> Result<(), AppError> {
    if text.trim().is_empty() {
        return Err(AppError::Validation("resume text cannot be empty".to_string()));
    }
    if text.chars().count() > MAX_RESUME_CHARS {
        return Err(AppError::PayloadTooLarge(
            "Resume text exceeds 300,000 characters. Please shorten the resume \
            or use a text-based format."
                .to_string(),
        ));
    }
    Ok(())
}

/// Extracts plain text from an uploaded resume file.
pub fn extract_resume_text(bytes: &[u8], format: ResumeFormat) -> Result<String, AppError> {
    match format {
        ResumeFormat::Pdf => pdf_extract::extract_text_from_mem(bytes)
            .map_err(|e| AppError::Validation(format!("Could not read PDF resume: {e}"))),
        ResumeFormat::Docx => Err(AppError::Validation(
            "DOCX resumes are not supported. Please upload a PDF or TXT file.".to_string(),
        )),
        ResumeFormat::PlainText => Ok(String::from_utf8_lossy(bytes).into_owned()),
    }
}

/// Size-checks an upload, extracts its text off the async runtime and validates it.
pub async fn read_resume_upload(
    bytes: Bytes,
    file_name: Option<&str>,
    content_type: Option<&str>,
) -> Result<String, AppError> {
    validate_upload_size(bytes.len())?;
    let format = ResumeFormat::detect(file_name, content_type);

    let text = tokio::task::spawn_blocking(move || extract_resume_text(&bytes, format))
        .await
        .map_err(|e| AppError::Internal(anyhow::anyhow!("Resume extraction task failed: {e}")))??;

    validate_resume_text(&text)?;
    Ok(text)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_detect_by_content_type() {
        assert_eq!(
            ResumeFormat::detect(Some("resume.txt"), Some("application/pdf")),
            ResumeFormat::Pdf
        );
    }

    #[test]
    fn test_detect_by_extension() {
        assert_eq!(ResumeFormat::detect(Some("CV.PDF"), None), ResumeFormat::Pdf);
        assert_eq!(ResumeFormat::detect(Some("cv.docx"), None), ResumeFormat::Docx);
        assert_eq!(ResumeFormat::detect(Some("cv.txt"), None), ResumeFormat::PlainText);
        assert_eq!(ResumeFormat::detect(None, None), ResumeFormat::PlainText);
    }

    #[test]
    fn test_upload_size_limit() {
        assert!(validate_upload_size(MAX_UPLOAD_BYTES).is_ok());
        assert!(matches!(
            validate_upload_size(MAX_UPLOAD_BYTES + 1),
            Err(AppError::PayloadTooLarge(_))
        ));
    }

    #[test]
    fn test_resume_char_limit() {
        assert!(validate_resume_text(&"a".repeat(MAX_RESUME_CHARS)).is_ok());
        assert!(matches!(
            validate_resume_text(&"a".repeat(MAX_RESUME_CHARS + 1)),
            Err(AppError::PayloadTooLarge(_))
        ));
    }

    #[test]
    fn test_blank_resume_rejected() {
        assert!(matches!(
            validate_resume_text("  \n "),
            Err(AppError::Validation(_))
        ));
    }

    #[test]
    fn test_docx_rejected() {
        assert!(matches!(
            extract_resume_text(b"PK\x03\x04", ResumeFormat::Docx),
            Err(AppError::Validation(_))
        ));
    }

    #[tokio::test]
    async fn test_plain_text_upload() {
        let bytes = Bytes::from_static(b"Jane Doe\nRust engineer");
        let text = read_resume_upload(bytes, Some("resume.txt"), Some("text/plain"))
            .await
            .unwrap();
        assert_eq!(text, "Jane Doe\nRust engineer");
    }

    #[tokio::test]
    async fn test_oversized_upload_rejected_before_extraction() {
        let bytes = Bytes::from(vec![b'a'; MAX_UPLOAD_BYTES + 1]);
        let err = read_resume_upload(bytes, Some("resume.txt"), None)
            .await
            .unwrap_err();
        assert!(matches!(err, AppError::PayloadTooLarge(_)));
    }
}
