//! JSON reporter for machine-readable output

use crate::analyzer::{AggregateStats, FileReport};
use crate::Status;
use serde::Serialize;

/// Reporter for JSON output
pub struct JsonReporter {
    /// Whether to pretty-print JSON
    pretty: bool,
}

impl JsonReporter {
    /// Create a new JSON reporter
    pub fn new() -> Self {
        Self { pretty: false }
    }

    /// Enable pretty-printing
    pub fn pretty(mut self) -> Self {
        self.pretty = true;
        self
    }

    /// Report any serializable payload (a single response, a report, ...)
    pub fn report<T: Serialize + ?Sized>(&self, value: &T) -> String {
        self.to_json(value, "{}")
    }

    /// Report with summary
    pub fn report_with_summary(&self, reports: &[FileReport], stats: &AggregateStats) -> String {
        let output = JsonOutput {
            results: reports,
            summary: JsonSummary {
                files_analyzed: stats.files_analyzed,
                average_score: stats.average_score,
                green: stats.green,
                yellow: stats.yellow,
                red: stats.red,
                rejected: stats.rejected,
                worst_status: stats.worst_status,
            },
        };
        self.to_json(&output, "{}")
    }

    fn to_json<T: Serialize + ?Sized>(&self, value: &T, fallback: &str) -> String {
        let json = if self.pretty {
            serde_json::to_string_pretty(value)
        } else {
            serde_json::to_string(value)
        };
        json.unwrap_or_else(|_| fallback.to_string())
    }
}

impl Default for JsonReporter {
    fn default() -> Self {
        Self::new()
    }
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct JsonOutput<'a> {
    results: &'a [FileReport],
    summary: JsonSummary,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct JsonSummary {
    files_analyzed: usize,
    average_score: u8,
    green: usize,
    yellow: usize,
    red: usize,
    rejected: usize,
    #[serde(skip_serializing_if = "Option::is_none")]
    worst_status: Option<Status>,
}
