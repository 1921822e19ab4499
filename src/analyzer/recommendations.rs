//! Improvement suggestions for resumes below the green threshold

use super::thresholds::{EXAMPLE_WORDS, GREEN_MIN_SCORE, OPTIMAL_SIZE, YELLOW_MIN_SCORE};
use crate::ResumeMetrics;

pub const MEETS_STANDARDS: &str = "Your resume meets professional standards!";

/// Builds the ordered, never-empty list of recommendations
pub struct RecommendationGenerator;

impl RecommendationGenerator {
    pub fn generate(metrics: &ResumeMetrics, score: u8) -> Vec<String> {
        let mut recs = Vec::new();

        if score < GREEN_MIN_SCORE {
            if !metrics.is_preferred_format {
                recs.push("Convert your resume to PDF format".to_string());
            }

            if !metrics.has_good_naming {
                recs.push(
                    "Rename file to include your name and 'resume' (e.g., 'john_doe_resume.pdf')"
                        .to_string(),
                );
            }

            if metrics.file_size_bytes < OPTIMAL_SIZE.min {
                recs.push("Add more detail about your experience and achievements".to_string());
            }

            if metrics.file_size_bytes > OPTIMAL_SIZE.max {
                recs.push("Condense content to 1-2 pages maximum".to_string());
            }

            if metrics.estimated_word_count < EXAMPLE_WORDS {
                recs.push("Include more specific examples of your accomplishments".to_string());
            }

            if score < YELLOW_MIN_SCORE {
                recs.push("Consider using a professional resume template".to_string());
                recs.push(
                    "Have someone review your resume for content and formatting".to_string(),
                );
            }
        }

        if recs.is_empty() {
            recs.push(MEETS_STANDARDS.to_string());
        }

        recs
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::analyzer::MetricExtractor;

    #[test]
    fn test_green_gets_affirmation_only() {
        let metrics = MetricExtractor::extract("resume_2024.pdf", 200_000, "application/pdf");
        let recs = RecommendationGenerator::generate(&metrics, 85);
        assert_eq!(recs, vec![MEETS_STANDARDS]);
    }

    #[test]
    fn test_yellow_word_document_order() {
        let metrics = MetricExtractor::extract("old_draft.doc", 50_000, "application/msword");
        let recs = RecommendationGenerator::generate(&metrics, 45);
        assert_eq!(
            recs,
            vec![
                "Convert your resume to PDF format",
                "Rename file to include your name and 'resume' (e.g., 'john_doe_resume.pdf')",
                "Add more detail about your experience and achievements",
            ]
        );
    }

    #[test]
    fn test_red_word_document_order() {
        let metrics = MetricExtractor::extract("draft.doc", 50_000, "application/msword");
        let recs = RecommendationGenerator::generate(&metrics, 40);
        assert_eq!(
            recs,
            vec![
                "Convert your resume to PDF format",
                "Rename file to include your name and 'resume' (e.g., 'john_doe_resume.pdf')",
                "Add more detail about your experience and achievements",
                "Consider using a professional resume template",
                "Have someone review your resume for content and formatting",
            ]
        );
    }

    #[test]
    fn test_yellow_large_pdf() {
        let metrics = MetricExtractor::extract("resume.pdf", 900_000, "application/pdf");
        let recs = RecommendationGenerator::generate(&metrics, 60);
        assert_eq!(recs, vec!["Condense content to 1-2 pages maximum"]);
    }

    #[test]
    fn test_short_estimate_recommends_examples() {
        let metrics = MetricExtractor::extract("resume.pdf", 2_400, "application/pdf");
        let recs = RecommendationGenerator::generate(&metrics, 50);
        assert_eq!(
            recs,
            vec![
                "Add more detail about your experience and achievements",
                "Include more specific examples of your accomplishments",
            ]
        );
    }

    #[test]
    fn test_no_condition_below_green_still_affirms() {
        // Optimal-size, well-named PDF with an artificially low score
        let mut metrics = MetricExtractor::extract("resume.pdf", 100_000, "application/pdf");
        metrics.estimated_word_count = 500;
        let recs = RecommendationGenerator::generate(&metrics, 70);
        assert_eq!(recs, vec![MEETS_STANDARDS]);
    }
}
