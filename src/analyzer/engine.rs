//! Analysis engine - runs extraction, scoring, classification and explanation

use crate::upload::{media_type_for_path, AnalysisResponse, ErrorResponse, UploadError, UploadPolicy};
use crate::{AnalysisResult, FileMetadata, Status};
use anyhow::{Context, Result};
use serde::Serialize;
use std::fs;
use std::path::{Path, PathBuf};

use super::{
    DetailGenerator, MetricExtractor, RecommendationGenerator, ScoreCalculator, StatusClassifier,
};

/// Main analysis engine. `analyze` is the pure core; the path and upload
/// entry points add boundary validation in front of it.
#[derive(Debug, Clone, Default)]
pub struct AnalysisEngine {
    policy: UploadPolicy,
}

impl AnalysisEngine {
    /// Create a new analysis engine with the default upload policy
    pub fn new() -> Self {
        Self {
            policy: UploadPolicy::default(),
        }
    }

    /// Use a custom upload policy for path and upload analysis
    pub fn with_policy(mut self, policy: UploadPolicy) -> Self {
        self.policy = policy;
        self
    }

    pub fn policy(&self) -> &UploadPolicy {
        &self.policy
    }

    /// Analyze file metadata. Never fails.
    pub fn analyze(&self, metadata: &FileMetadata) -> AnalysisResult {
        log::debug!(
            "Processing file: {}, Size: {} bytes, Type: {}",
            metadata.file_name,
            metadata.file_size,
            metadata.media_type
        );

        let metrics = MetricExtractor::from_metadata(metadata);
        let score = ScoreCalculator::calculate(&metrics);
        let (status, message) = StatusClassifier::classify(score);
        let details = DetailGenerator::generate(&metrics, score);
        let recommendations = RecommendationGenerator::generate(&metrics, score);

        log::debug!(
            "Analysis complete for {}: {} (Score: {})",
            metadata.file_name,
            status,
            score
        );

        AnalysisResult {
            status,
            message: message.to_string(),
            details,
            score,
            recommendations,
        }
    }

    /// Analyze an in-memory upload. Only the content length is used.
    pub fn analyze_bytes(&self, file_name: &str, media_type: &str, content: &[u8]) -> AnalysisResult {
        self.analyze(&FileMetadata::new(file_name, content.len() as u64, media_type))
    }

    /// Validate an upload against the policy, then analyze it
    pub fn analyze_upload(&self, file: Option<&FileMetadata>) -> Result<AnalysisResponse, UploadError> {
        self.policy.validate(file)?;
        let file = file.ok_or(UploadError::MissingFile)?;
        Ok(AnalysisResponse::new(self.analyze(file), file))
    }

    /// Build upload metadata for a file on disk. The declared type is inferred
    /// from the extension unless `media_type` overrides it.
    pub fn metadata_for_path(path: &Path, media_type: Option<&str>) -> Result<FileMetadata> {
        let meta = fs::metadata(path)
            .with_context(|| format!("Failed to read file: {}", path.display()))?;
        if !meta.is_file() {
            anyhow::bail!("Not a file: {}", path.display());
        }
        let file_name = path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_default();
        let media_type = media_type
            .map(str::to_string)
            .unwrap_or_else(|| media_type_for_path(path).to_string());
        Ok(FileMetadata::new(file_name, meta.len(), media_type))
    }

    /// Analyze a file on disk. I/O failures are errors; policy rejections
    /// are reported in the outcome.
    pub fn analyze_path(&self, path: &Path, media_type: Option<&str>) -> Result<FileReport> {
        let metadata = Self::metadata_for_path(path, media_type)?;
        let outcome = match self.analyze_upload(Some(&metadata)) {
            Ok(response) => FileOutcome::Analyzed(response),
            Err(err) => {
                log::debug!("Rejected {}: {}", path.display(), err);
                FileOutcome::Rejected(ErrorResponse::from(&err))
            }
        };
        Ok(FileReport {
            file_path: path.to_path_buf(),
            metadata,
            outcome,
        })
    }

    /// Analyze multiple files sequentially
    pub fn analyze_many(&self, paths: &[PathBuf]) -> Vec<Result<FileReport>> {
        paths.iter().map(|p| self.analyze_path(p, None)).collect()
    }

    /// Analyze multiple files in parallel using rayon; output keeps input order
    pub fn analyze_parallel(&self, paths: &[PathBuf]) -> Vec<Result<FileReport>> {
        use rayon::prelude::*;

        paths.par_iter().map(|p| self.analyze_path(p, None)).collect()
    }

    /// Get aggregate stats from multiple reports
    pub fn aggregate_stats(reports: &[FileReport]) -> AggregateStats {
        let mut stats = AggregateStats {
            files_analyzed: reports.len(),
            ..AggregateStats::default()
        };

        let mut total_score: u32 = 0;
        for report in reports {
            match &report.outcome {
                FileOutcome::Analyzed(response) => {
                    total_score += response.result.score as u32;
                    match response.result.status {
                        Status::Green => stats.green += 1,
                        Status::Yellow => stats.yellow += 1,
                        Status::Red => stats.red += 1,
                    }
                    stats.worst_status = Some(match stats.worst_status {
                        Some(worst) => worst.min(response.result.status),
                        None => response.result.status,
                    });
                }
                FileOutcome::Rejected(_) => stats.rejected += 1,
            }
        }

        let scored = stats.green + stats.yellow + stats.red;
        if scored > 0 {
            stats.average_score = (total_score / scored as u32) as u8;
        }
        stats
    }
}

/// What happened to one file
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(untagged)]
pub enum FileOutcome {
    Analyzed(AnalysisResponse),
    Rejected(ErrorResponse),
}

/// Outcome of analyzing one file on disk
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FileReport {
    pub file_path: PathBuf,
    /// Metadata the analysis ran on
    #[serde(skip)]
    pub metadata: FileMetadata,
    #[serde(flatten)]
    pub outcome: FileOutcome,
}

impl FileReport {
    pub fn response(&self) -> Option<&AnalysisResponse> {
        match &self.outcome {
            FileOutcome::Analyzed(response) => Some(response),
            FileOutcome::Rejected(_) => None,
        }
    }

    pub fn is_rejected(&self) -> bool {
        matches!(self.outcome, FileOutcome::Rejected(_))
    }
}

/// Aggregate statistics from multiple file analyses
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AggregateStats {
    /// Number of files examined, rejected ones included
    pub files_analyzed: usize,
    /// Files turned away by the upload policy
    pub rejected: usize,
    pub green: usize,
    pub yellow: usize,
    pub red: usize,
    /// Average score over files that were scored
    pub average_score: u8,
    /// Lowest status among scored files
    pub worst_status: Option<Status>,
}
