//! Response envelopes returned to uploaders

use super::UploadError;
use crate::{AnalysisResult, FileMetadata};
use serde::{Deserialize, Serialize};

/// Analysis result plus an echo of the uploaded file's name and size
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AnalysisResponse {
    #[serde(flatten)]
    pub result: AnalysisResult,
    pub file_name: String,
    pub file_size: u64,
}

impl AnalysisResponse {
    pub fn new(result: AnalysisResult, file: &FileMetadata) -> Self {
        Self {
            result,
            file_name: file.file_name.clone(),
            file_size: file.file_size,
        }
    }
}

/// `{ "error": "..." }`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ErrorResponse {
    pub error: String,
}

impl From<&UploadError> for ErrorResponse {
    fn from(err: &UploadError) -> Self {
        Self {
            error: err.to_string(),
        }
    }
}
