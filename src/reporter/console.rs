//! Console reporter with colored output

use crate::analyzer::{AggregateStats, FileOutcome, FileReport, MetricExtractor, ScoreCalculator};
use crate::upload::{human_size, ErrorResponse};
use crate::{AnalysisResult, FileMetadata, Status};
use colored::Colorize;
use std::path::Path;

/// Reporter for terminal output
pub struct ConsoleReporter {
    /// Whether to use colors
    use_colors: bool,
    /// Whether to show verbose output
    verbose: bool,
}

impl ConsoleReporter {
    /// Create a new console reporter
    pub fn new() -> Self {
        Self {
            use_colors: true,
            verbose: false,
        }
    }

    /// Disable colors
    pub fn without_colors(mut self) -> Self {
        self.use_colors = false;
        self
    }

    /// Enable verbose output
    pub fn verbose(mut self) -> Self {
        self.verbose = true;
        self
    }

    /// Report a single file
    pub fn report(&self, report: &FileReport) {
        match &report.outcome {
            FileOutcome::Analyzed(response) => {
                self.report_result(&report.metadata, &response.result)
            }
            FileOutcome::Rejected(error) => self.report_rejection(&report.file_path, error),
        }
    }

    /// Report an analysis of plain metadata
    pub fn report_result(&self, metadata: &FileMetadata, result: &AnalysisResult) {
        self.print_header(metadata);
        self.print_score(result);
        if self.verbose {
            self.print_breakdown(metadata);
        }
        self.print_details(result);
        self.print_recommendations(result);
        println!();
    }

    /// Report a file turned away by the upload policy
    pub fn report_rejection(&self, path: &Path, error: &ErrorResponse) {
        println!();
        println!(
            "{}",
            format!("📄 Resume Analysis: {}", path.display()).bold()
        );
        println!("   {} {}", "✗".red(), error.error);
        println!();
    }

    /// Report multiple files with summary
    pub fn report_many(&self, reports: &[FileReport], stats: &AggregateStats) {
        for report in reports {
            self.report(report);
            println!("{}", "─".repeat(60));
        }

        self.print_summary(stats);
    }

    /// Report in quiet mode (just score and status)
    pub fn report_quiet(&self, report: &FileReport) {
        match &report.outcome {
            FileOutcome::Analyzed(response) => println!(
                "{}: {} ({})",
                report.file_path.display(),
                response.result.score,
                self.colorize_status(response.result.status)
            ),
            FileOutcome::Rejected(error) => println!(
                "{}: {} ({})",
                report.file_path.display(),
                "rejected".red(),
                error.error
            ),
        }
    }

    fn print_header(&self, metadata: &FileMetadata) {
        println!();
        println!(
            "{}",
            format!("📄 Resume Analysis: {}", metadata.file_name).bold()
        );
        let media_type = if metadata.media_type.is_empty() {
            "unknown"
        } else {
            metadata.media_type.as_str()
        };
        println!(
            "   Size: {} | Type: {}",
            human_size(metadata.file_size),
            media_type
        );
        println!();
    }

    fn print_score(&self, result: &AnalysisResult) {
        let score_bar = self.create_score_bar(result.score);
        println!(
            "   Score: {} {}",
            score_bar,
            self.colorize_status(result.status).bold()
        );
        println!("   {}", result.message.dimmed());
        println!();
    }

    fn print_breakdown(&self, metadata: &FileMetadata) {
        let breakdown = ScoreCalculator::breakdown(&MetricExtractor::from_metadata(metadata));
        println!("   {}", "Score Breakdown:".bold());
        for (name, earned, max) in breakdown.categories() {
            let bar = self.create_mini_bar(earned, max);
            let score_str = format!("{:>2}/{}", earned, max);
            let colored_score = if earned == max {
                score_str.green()
            } else if earned > 0 {
                score_str.yellow()
            } else {
                score_str.red()
            };
            println!("   {} {} {}", bar, colored_score, name);
        }
        println!();
    }

    fn print_details(&self, result: &AnalysisResult) {
        println!("   {}", "Findings:".bold());
        for detail in &result.details {
            println!("   {} {}", "•".dimmed(), detail);
        }
        println!();
    }

    fn print_recommendations(&self, result: &AnalysisResult) {
        println!("   {}", "Recommendations:".bold());
        for rec in &result.recommendations {
            println!("   {} {}", "→".cyan(), rec);
        }
    }

    fn print_summary(&self, stats: &AggregateStats) {
        println!();
        println!("{}", "═".repeat(60));
        println!("{}", "Summary".bold());
        println!("{}", "═".repeat(60));
        println!(
            "   Files analyzed: {}",
            stats.files_analyzed.to_string().bold()
        );
        println!(
            "   Average score:  {}",
            stats.average_score.to_string().bold()
        );
        println!(
            "   {} {}  {} {}  {} {}",
            self.colorize_status(Status::Green),
            stats.green,
            self.colorize_status(Status::Yellow),
            stats.yellow,
            self.colorize_status(Status::Red),
            stats.red
        );
        if stats.rejected > 0 {
            println!("   Rejected:       {}", stats.rejected.to_string().red());
        }
        println!();
    }

    fn colorize_status(&self, status: Status) -> colored::ColoredString {
        let s = format!("● {}", status.to_string().to_uppercase());
        if !self.use_colors {
            return s.normal();
        }
        match status {
            Status::Green => s.green(),
            Status::Yellow => s.yellow(),
            Status::Red => s.red(),
        }
    }

    fn create_score_bar(&self, score: u8) -> String {
        let filled = (score as usize * 20) / 100;
        let empty = 20 - filled;

        let bar = format!(
            "[{}{}] {:>3}/100",
            "█".repeat(filled),
            "░".repeat(empty),
            score
        );

        if self.use_colors {
            match Status::from_score(score) {
                Status::Green => bar.green().to_string(),
                Status::Yellow => bar.yellow().to_string(),
                Status::Red => bar.red().to_string(),
            }
        } else {
            bar
        }
    }

    fn create_mini_bar(&self, score: u8, max: u8) -> String {
        let filled = (score as usize * 10) / max.max(1) as usize;
        let empty = 10 - filled.min(10);
        format!("[{}{}]", "▓".repeat(filled.min(10)), "░".repeat(empty))
    }
}

impl Default for ConsoleReporter {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_score_bar_plain() {
        let reporter = ConsoleReporter::new().without_colors();
        assert_eq!(
            reporter.create_score_bar(50),
            format!("[{}{}]  50/100", "█".repeat(10), "░".repeat(10))
        );
        assert!(reporter.create_score_bar(100).starts_with(&format!("[{}]", "█".repeat(20))));
    }

    #[test]
    fn test_mini_bar_bounds() {
        let reporter = ConsoleReporter::new().without_colors();
        assert_eq!(reporter.create_mini_bar(0, 25), format!("[{}]", "░".repeat(10)));
        assert_eq!(reporter.create_mini_bar(25, 25), format!("[{}]", "▓".repeat(10)));
        assert_eq!(reporter.create_mini_bar(15, 15), format!("[{}]", "▓".repeat(10)));
    }

    #[test]
    fn test_status_label_plain() {
        let reporter = ConsoleReporter::new().without_colors();
        assert_eq!(reporter.colorize_status(Status::Yellow).to_string(), "● YELLOW");
    }
}
