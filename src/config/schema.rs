//! Config schema and deserialization

use crate::upload::UploadPolicy;
use crate::Status;
use serde::Deserialize;

/// Overrides for the upload size bounds
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UploadLimits {
    /// Largest accepted file in bytes (default 10MB)
    #[serde(default)]
    pub max_file_size: Option<u64>,

    /// Smallest accepted file in bytes (default 1KB)
    #[serde(default)]
    pub min_file_size: Option<u64>,
}

/// Root config structure for .rescorerc.json
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Config {
    /// Extend another config file (path relative to this config)
    #[serde(default)]
    pub extends: Option<String>,

    /// Minimum score threshold (exit 1 if below)
    #[serde(default)]
    pub threshold: Option<u8>,

    /// Exit 1 if any file is at or below this status
    #[serde(default)]
    pub fail_on: Option<Status>,

    /// Glob patterns for files/directories to exclude from analysis
    #[serde(default)]
    pub ignore: Vec<String>,

    /// Resume file suffixes to pick up when scanning directories
    #[serde(default)]
    pub file_patterns: Vec<String>,

    /// Upload size bound overrides
    #[serde(default)]
    pub upload: UploadLimits,
}

impl Config {
    /// Merge CLI overrides into config. CLI values take precedence.
    pub fn merge_with_cli(mut self, cli_threshold: Option<u8>, cli_fail_on: Option<Status>) -> Self {
        if cli_threshold.is_some() {
            self.threshold = cli_threshold;
        }
        if cli_fail_on.is_some() {
            self.fail_on = cli_fail_on;
        }
        self
    }

    /// Merge another config into this one (for extends)
    pub fn merge_from(&mut self, base: Config) {
        // Base values are overridden by this config's values
        if self.threshold.is_none() {
            self.threshold = base.threshold;
        }
        if self.fail_on.is_none() {
            self.fail_on = base.fail_on;
        }
        if self.extends.is_none() {
            self.extends = base.extends;
        }

        let mut all_ignores = base.ignore;
        all_ignores.append(&mut self.ignore);
        self.ignore = all_ignores;

        if self.file_patterns.is_empty() {
            self.file_patterns = base.file_patterns;
        }

        if self.upload.max_file_size.is_none() {
            self.upload.max_file_size = base.upload.max_file_size;
        }
        if self.upload.min_file_size.is_none() {
            self.upload.min_file_size = base.upload.min_file_size;
        }
    }

    /// Resume file suffixes, defaulting to the accepted upload extensions
    pub fn get_file_patterns(&self) -> Vec<&str> {
        if self.file_patterns.is_empty() {
            vec![".pdf", ".doc", ".docx"]
        } else {
            self.file_patterns.iter().map(|s| s.as_str()).collect()
        }
    }

    /// Default upload policy with this config's size overrides applied
    pub fn upload_policy(&self) -> UploadPolicy {
        UploadPolicy::default().with_limits(self.upload.min_file_size, self.upload.max_file_size)
    }
}
