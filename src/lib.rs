//! Rescore: Resume File Quality Analyzer
//!
//! This library scores an uploaded resume from its metadata alone (file name,
//! declared size and declared media type) and explains the score with
//! findings and recommendations. Document content is never parsed.

pub mod analyzer;
pub mod config;
pub mod mcp;
pub mod reporter;
pub mod upload;
pub mod watcher;

use serde::{Deserialize, Serialize};

/// Metadata describing an uploaded file, as declared by the uploader
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FileMetadata {
    /// Original file name
    pub file_name: String,
    /// Declared size in bytes
    pub file_size: u64,
    /// Declared media type (may be empty)
    #[serde(rename = "fileType", default)]
    pub media_type: String,
}

impl FileMetadata {
    pub fn new(file_name: impl Into<String>, file_size: u64, media_type: impl Into<String>) -> Self {
        Self {
            file_name: file_name.into(),
            file_size,
            media_type: media_type.into(),
        }
    }
}

/// Normalized facts derived from file metadata; the sole input to scoring
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ResumeMetrics {
    pub file_size_bytes: u64,
    /// Lowercased file name
    pub file_name: String,
    pub declared_media_type: String,
    /// File name follows a professional naming pattern
    pub has_good_naming: bool,
    /// PDF by declared type or extension
    pub is_preferred_format: bool,
    /// Approximate word count derived from byte size (not from content)
    pub estimated_word_count: u64,
    /// File name contains a role or seniority term
    pub has_professional_keyword: bool,
}

/// Traffic-light status, ordered from worst to best
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Status {
    Red,
    Yellow,
    Green,
}

impl std::fmt::Display for Status {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Status::Red => write!(f, "red"),
            Status::Yellow => write!(f, "yellow"),
            Status::Green => write!(f, "green"),
        }
    }
}

impl std::str::FromStr for Status {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "red" => Ok(Status::Red),
            "yellow" => Ok(Status::Yellow),
            "green" => Ok(Status::Green),
            other => Err(format!("unknown status '{}' (expected red, yellow or green)", other)),
        }
    }
}

/// The result of analyzing one resume file
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AnalysisResult {
    pub status: Status,
    /// Headline message, fixed per status
    pub message: String,
    /// Ordered findings; the last line always reports the score
    pub details: Vec<String>,
    /// Score (0-100)
    pub score: u8,
    /// Ordered suggestions; never empty
    pub recommendations: Vec<String>,
}

/// Points earned per rule group
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ScoreBreakdown {
    /// File size band (0-25)
    pub size: u8,
    /// File format (0-20)
    pub format: u8,
    /// Naming convention (0-20)
    pub naming: u8,
    /// Estimated length (0-20)
    pub length: u8,
    /// Professional signals in the file name (0-15)
    pub professional: u8,
}

impl ScoreBreakdown {
    pub fn total(&self) -> u8 {
        let sum = self.size as u16
            + self.format as u16
            + self.naming as u16
            + self.length as u16
            + self.professional as u16;
        sum.min(100) as u8
    }

    /// (name, earned, max) per group, in scoring order
    pub fn categories(&self) -> [(&'static str, u8, u8); 5] {
        [
            ("File Size", self.size, 25),
            ("File Format", self.format, 20),
            ("Naming", self.naming, 20),
            ("Length", self.length, 20),
            ("Professional Signals", self.professional, 15),
        ]
    }
}

/// Public API: analyze one file's metadata. Never fails.
pub fn analyze(metadata: &FileMetadata) -> AnalysisResult {
    analyzer::AnalysisEngine::new().analyze(metadata)
}
