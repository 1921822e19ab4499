//! Findings that explain a score

use super::thresholds::{
    BRIEF_WORDS, LENGTHY_WORDS, MAX_REASONABLE_SIZE, MIN_VIABLE_SIZE, OPTIMAL_SIZE,
};
use crate::ResumeMetrics;

/// Builds the ordered list of findings: size, format, naming, length, score
pub struct DetailGenerator;

impl DetailGenerator {
    pub fn generate(metrics: &ResumeMetrics, score: u8) -> Vec<String> {
        let mut details = Vec::new();

        if metrics.file_size_bytes < MIN_VIABLE_SIZE {
            details.push("Resume appears too short - may lack sufficient detail".to_string());
        } else if metrics.file_size_bytes > MAX_REASONABLE_SIZE {
            details.push("Resume file is quite large - consider condensing content".to_string());
        } else if OPTIMAL_SIZE.contains(metrics.file_size_bytes) {
            details.push("File size is in the optimal range".to_string());
        }

        if metrics.is_preferred_format {
            details.push("PDF format ensures consistent formatting across devices".to_string());
        } else {
            details.push("Consider converting to PDF for better compatibility".to_string());
        }

        if metrics.has_good_naming {
            details.push("Professional file naming detected".to_string());
        } else {
            details.push("Consider renaming file to include 'resume' or 'CV'".to_string());
        }

        if metrics.estimated_word_count < BRIEF_WORDS {
            details.push("Resume may be too brief - consider adding more detail".to_string());
        } else if metrics.estimated_word_count > LENGTHY_WORDS {
            details.push("Resume may be too lengthy - consider condensing".to_string());
        } else {
            details.push(format!(
                "Estimated {} words - good length",
                metrics.estimated_word_count
            ));
        }

        details.push(format!("Overall score: {}/100", score));
        details
    }
}
