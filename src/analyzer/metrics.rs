//! Metric extraction from file metadata

use super::rules::{first_match, naming_rules, professional_keywords};
use super::thresholds::{
    OTHER_BYTES_PER_WORD, PDF_BYTES_PER_WORD, PREFERRED_EXTENSION, PREFERRED_MEDIA_TYPE,
};
use crate::{FileMetadata, ResumeMetrics};

/// Turns raw file metadata into `ResumeMetrics`
pub struct MetricExtractor;

impl MetricExtractor {
    /// Extract metrics from the (name, size, type) triple. Never fails.
    pub fn extract(file_name: &str, file_size: u64, media_type: &str) -> ResumeMetrics {
        let file_name = file_name.to_lowercase();
        let is_preferred_format = Self::is_preferred_format(&file_name, media_type);

        ResumeMetrics {
            file_size_bytes: file_size,
            has_good_naming: Self::has_good_naming(&file_name),
            is_preferred_format,
            estimated_word_count: Self::estimate_word_count(file_size, is_preferred_format),
            has_professional_keyword: Self::has_professional_keyword(&file_name),
            declared_media_type: media_type.to_string(),
            file_name,
        }
    }

    pub fn from_metadata(metadata: &FileMetadata) -> ResumeMetrics {
        Self::extract(&metadata.file_name, metadata.file_size, &metadata.media_type)
    }

    pub fn has_good_naming(file_name: &str) -> bool {
        first_match(naming_rules(), file_name).is_some()
    }

    pub fn is_preferred_format(file_name: &str, media_type: &str) -> bool {
        media_type == PREFERRED_MEDIA_TYPE || file_name.to_lowercase().ends_with(PREFERRED_EXTENSION)
    }

    /// Rough word count from byte size alone: PDFs run ~10-15 bytes per word,
    /// DOC/DOCX ~20-30. This is an approximation; content is never read.
    pub fn estimate_word_count(file_size: u64, is_preferred_format: bool) -> u64 {
        let bytes_per_word = if is_preferred_format {
            PDF_BYTES_PER_WORD
        } else {
            OTHER_BYTES_PER_WORD
        };
        file_size / bytes_per_word
    }

    pub fn has_professional_keyword(file_name: &str) -> bool {
        first_match(professional_keywords(), file_name).is_some()
    }
}
