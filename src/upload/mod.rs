//! Upload boundary: the checks a transport runs before invoking the engine
//!
//! The engine itself never rejects input. Everything here is caller-side
//! policy: which declared types and extensions are accepted and how large a
//! file may be.

mod response;

pub use response::{AnalysisResponse, ErrorResponse};

use crate::FileMetadata;
use std::path::Path;
use thiserror::Error;

pub const PDF_MEDIA_TYPE: &str = "application/pdf";
pub const DOC_MEDIA_TYPE: &str = "application/msword";
pub const DOCX_MEDIA_TYPE: &str =
    "application/vnd.openxmlformats-officedocument.wordprocessingml.document";
pub const FALLBACK_MEDIA_TYPE: &str = "application/octet-stream";

/// 10MB
pub const MAX_FILE_SIZE: u64 = 10 * 1024 * 1024;
/// 1KB
pub const MIN_FILE_SIZE: u64 = 1024;

/// Errors reported to the uploader. Messages are fixed and user-facing.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum UploadError {
    #[error("No file provided")]
    MissingFile,

    #[error("Invalid file type. Please upload a PDF, DOC, or DOCX file.")]
    InvalidType { file_name: String, media_type: String },

    #[error("File too large. Maximum size is {}.", human_size(*.max))]
    TooLarge { size: u64, max: u64 },

    #[error("File too small. Please upload a valid resume.")]
    TooSmall { size: u64, min: u64 },

    #[error("Analysis failed. Please try again.")]
    AnalysisFailed(String),
}

impl UploadError {
    /// HTTP-style status code a transport should answer with
    pub fn status_code(&self) -> u16 {
        match self {
            UploadError::AnalysisFailed(_) => 500,
            _ => 400,
        }
    }

    /// Validation failures are final; only analysis failures are worth retrying
    pub fn is_retryable(&self) -> bool {
        matches!(self, UploadError::AnalysisFailed(_))
    }
}

/// Accepted types, extensions and size bounds for uploads
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UploadPolicy {
    pub allowed_media_types: Vec<String>,
    /// Lowercase, with leading dot
    pub allowed_extensions: Vec<String>,
    pub max_file_size: u64,
    pub min_file_size: u64,
}

impl Default for UploadPolicy {
    fn default() -> Self {
        Self {
            allowed_media_types: vec![
                PDF_MEDIA_TYPE.to_string(),
                DOC_MEDIA_TYPE.to_string(),
                DOCX_MEDIA_TYPE.to_string(),
            ],
            allowed_extensions: vec![".pdf".to_string(), ".doc".to_string(), ".docx".to_string()],
            max_file_size: MAX_FILE_SIZE,
            min_file_size: MIN_FILE_SIZE,
        }
    }
}

impl UploadPolicy {
    /// Override the size bounds, keeping the defaults where `None`
    pub fn with_limits(mut self, min_file_size: Option<u64>, max_file_size: Option<u64>) -> Self {
        if let Some(min) = min_file_size {
            self.min_file_size = min;
        }
        if let Some(max) = max_file_size {
            self.max_file_size = max;
        }
        self
    }

    /// Check an upload. Order: presence, type, too large, too small.
    pub fn validate(&self, file: Option<&FileMetadata>) -> Result<(), UploadError> {
        let file = file.ok_or(UploadError::MissingFile)?;

        if !self.is_allowed_type(&file.media_type) && !self.has_valid_extension(&file.file_name) {
            return Err(UploadError::InvalidType {
                file_name: file.file_name.clone(),
                media_type: file.media_type.clone(),
            });
        }

        if file.file_size > self.max_file_size {
            return Err(UploadError::TooLarge {
                size: file.file_size,
                max: self.max_file_size,
            });
        }

        if file.file_size < self.min_file_size {
            return Err(UploadError::TooSmall {
                size: file.file_size,
                min: self.min_file_size,
            });
        }

        Ok(())
    }

    pub fn is_allowed_type(&self, media_type: &str) -> bool {
        self.allowed_media_types.iter().any(|t| t == media_type)
    }

    /// Extension is everything from the last '.' of the lowercased name
    pub fn has_valid_extension(&self, file_name: &str) -> bool {
        let lower = file_name.to_lowercase();
        match lower.rfind('.') {
            Some(idx) => self.allowed_extensions.iter().any(|ext| *ext == lower[idx..]),
            None => false,
        }
    }
}

/// Declared media type for a file on disk, inferred from its extension the
/// way a browser fills in an upload's type
pub fn media_type_for_path(path: &Path) -> &'static str {
    let ext = path
        .extension()
        .and_then(|e| e.to_str())
        .map(str::to_lowercase)
        .unwrap_or_default();
    match ext.as_str() {
        "pdf" => PDF_MEDIA_TYPE,
        "doc" => DOC_MEDIA_TYPE,
        "docx" => DOCX_MEDIA_TYPE,
        _ => FALLBACK_MEDIA_TYPE,
    }
}

/// "10MB", "512KB" or "1500 bytes"
pub fn human_size(bytes: u64) -> String {
    const KB: u64 = 1024;
    const MB: u64 = 1024 * 1024;
    if bytes >= MB && bytes % MB == 0 {
        format!("{}MB", bytes / MB)
    } else if bytes >= KB && bytes % KB == 0 {
        format!("{}KB", bytes / KB)
    } else {
        format!("{} bytes", bytes)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn file(name: &str, size: u64, media_type: &str) -> FileMetadata {
        FileMetadata::new(name, size, media_type)
    }

    #[test]
    fn test_missing_file() {
        let err = UploadPolicy::default().validate(None).unwrap_err();
        assert_eq!(err, UploadError::MissingFile);
        assert_eq!(err.to_string(), "No file provided");
        assert_eq!(err.status_code(), 400);
    }

    #[test]
    fn test_text_file_rejected_before_engine() {
        let policy = UploadPolicy::default();
        let err = policy
            .validate(Some(&file("doc1.txt", 500, "text/plain")))
            .unwrap_err();
        assert!(matches!(err, UploadError::InvalidType { .. }));
        assert_eq!(
            err.to_string(),
            "Invalid file type. Please upload a PDF, DOC, or DOCX file."
        );
    }

    #[test]
    fn test_tiny_pdf_rejected_as_too_small() {
        let err = UploadPolicy::default()
            .validate(Some(&file("doc1.pdf", 500, PDF_MEDIA_TYPE)))
            .unwrap_err();
        assert_eq!(err, UploadError::TooSmall { size: 500, min: 1024 });
        assert_eq!(err.to_string(), "File too small. Please upload a valid resume.");
    }

    #[test]
    fn test_size_bounds_inclusive() {
        let policy = UploadPolicy::default();
        assert!(policy.validate(Some(&file("cv.pdf", 1024, PDF_MEDIA_TYPE))).is_ok());
        assert!(policy
            .validate(Some(&file("cv.pdf", MAX_FILE_SIZE, PDF_MEDIA_TYPE)))
            .is_ok());
        let err = policy
            .validate(Some(&file("cv.pdf", MAX_FILE_SIZE + 1, PDF_MEDIA_TYPE)))
            .unwrap_err();
        assert_eq!(err.to_string(), "File too large. Maximum size is 10MB.");
    }

    #[test]
    fn test_extension_rescues_unknown_type() {
        let policy = UploadPolicy::default();
        assert!(policy
            .validate(Some(&file("Resume.DOCX", 40_000, "application/octet-stream")))
            .is_ok());
        assert!(policy.validate(Some(&file("resume", 40_000, PDF_MEDIA_TYPE))).is_ok());
        assert!(policy.validate(Some(&file("resume", 40_000, ""))).is_err());
    }

    #[test]
    fn test_has_valid_extension_uses_last_dot() {
        let policy = UploadPolicy::default();
        assert!(policy.has_valid_extension("my.resume.pdf"));
        assert!(!policy.has_valid_extension("resume.pdf.txt"));
        assert!(!policy.has_valid_extension("pdf"));
    }

    #[test]
    fn test_custom_limits() {
        let policy = UploadPolicy::default().with_limits(Some(10), Some(2048));
        assert!(policy.validate(Some(&file("cv.pdf", 20, PDF_MEDIA_TYPE))).is_ok());
        let err = policy
            .validate(Some(&file("cv.pdf", 4096, PDF_MEDIA_TYPE)))
            .unwrap_err();
        assert_eq!(err.to_string(), "File too large. Maximum size is 2KB.");
    }

    #[test]
    fn test_media_type_for_path() {
        assert_eq!(media_type_for_path(Path::new("a/b/cv.PDF")), PDF_MEDIA_TYPE);
        assert_eq!(media_type_for_path(Path::new("cv.doc")), DOC_MEDIA_TYPE);
        assert_eq!(media_type_for_path(Path::new("cv.docx")), DOCX_MEDIA_TYPE);
        assert_eq!(media_type_for_path(Path::new("cv")), FALLBACK_MEDIA_TYPE);
    }

    #[test]
    fn test_only_analysis_failure_is_retryable() {
        assert!(UploadError::AnalysisFailed("io".to_string()).is_retryable());
        assert_eq!(UploadError::AnalysisFailed("io".to_string()).status_code(), 500);
        assert!(!UploadError::MissingFile.is_retryable());
    }
}
