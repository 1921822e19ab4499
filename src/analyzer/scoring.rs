//! Score calculation for resume file quality
//!
//! Five independent rule groups each contribute at most their cap; the sum is
//! clamped to 100 (a guard only, the caps already sum to exactly 100).

use super::thresholds::{
    DRAFT_MARKERS, GOOD_WORDS, MAX_NAME_LEN, MAX_SCORE, MIN_ACCEPTABLE_WORDS, MIN_NAME_LEN,
    MIN_VIABLE_SIZE, OPTIMAL_SIZE, OPTIMAL_WORDS, REASONABLE_SIZE, RECENT_YEARS,
};
use crate::{ResumeMetrics, ScoreBreakdown};

const SIZE_OPTIMAL_POINTS: u8 = 25;
const SIZE_REASONABLE_POINTS: u8 = 15;
const SIZE_LARGE_POINTS: u8 = 10;

const FORMAT_PREFERRED_POINTS: u8 = 20;
const FORMAT_WORD_POINTS: u8 = 15;

const NAMING_PATTERN_POINTS: u8 = 15;
const NAMING_KEYWORD_POINTS: u8 = 5;

const LENGTH_OPTIMAL_POINTS: u8 = 20;
const LENGTH_GOOD_POINTS: u8 = 15;
const LENGTH_ACCEPTABLE_POINTS: u8 = 10;

const SIGNAL_POINTS: u8 = 5;

/// Calculator for resume quality scores
pub struct ScoreCalculator;

impl ScoreCalculator {
    /// Final score (0-100)
    pub fn calculate(metrics: &ResumeMetrics) -> u8 {
        Self::breakdown(metrics).total().min(MAX_SCORE)
    }

    /// Points earned by each rule group
    pub fn breakdown(metrics: &ResumeMetrics) -> ScoreBreakdown {
        ScoreBreakdown {
            size: Self::size_points(metrics.file_size_bytes),
            format: Self::format_points(metrics),
            naming: Self::naming_points(metrics),
            length: Self::length_points(metrics.estimated_word_count),
            professional: Self::professional_points(&metrics.file_name),
        }
    }

    /// First matching band wins
    pub fn size_points(file_size: u64) -> u8 {
        if OPTIMAL_SIZE.contains(file_size) {
            SIZE_OPTIMAL_POINTS
        } else if REASONABLE_SIZE.contains(file_size) {
            SIZE_REASONABLE_POINTS
        } else if file_size >= MIN_VIABLE_SIZE {
            SIZE_LARGE_POINTS
        } else {
            0
        }
    }

    pub fn format_points(metrics: &ResumeMetrics) -> u8 {
        let media_type = &metrics.declared_media_type;
        if metrics.is_preferred_format {
            FORMAT_PREFERRED_POINTS
        } else if media_type.contains("word") || media_type.contains("document") {
            FORMAT_WORD_POINTS
        } else {
            0
        }
    }

    pub fn naming_points(metrics: &ResumeMetrics) -> u8 {
        let mut points = 0;
        if metrics.has_good_naming {
            points += NAMING_PATTERN_POINTS;
        }
        if metrics.has_professional_keyword {
            points += NAMING_KEYWORD_POINTS;
        }
        points
    }

    /// First matching band wins; the acceptable tier has no upper bound
    pub fn length_points(word_count: u64) -> u8 {
        if OPTIMAL_WORDS.contains(word_count) {
            LENGTH_OPTIMAL_POINTS
        } else if GOOD_WORDS.contains(word_count) {
            LENGTH_GOOD_POINTS
        } else if word_count >= MIN_ACCEPTABLE_WORDS {
            LENGTH_ACCEPTABLE_POINTS
        } else {
            0
        }
    }

    /// Recent year, no draft markers, reasonable name length: 5 points each
    pub fn professional_points(file_name: &str) -> u8 {
        let mut points = 0;
        if RECENT_YEARS.iter().any(|year| file_name.contains(year)) {
            points += SIGNAL_POINTS;
        }
        if !DRAFT_MARKERS.iter().any(|marker| file_name.contains(marker)) {
            points += SIGNAL_POINTS;
        }
        // UTF-16 code units, as browsers report a file name's length
        let len = file_name.encode_utf16().count();
        if len > MIN_NAME_LEN && len < MAX_NAME_LEN {
            points += SIGNAL_POINTS;
        }
        points
    }
}


#[cfg(test)]
mod proptest_tests {
    use super::*;
    use crate::analyzer::MetricExtractor;
    use proptest::prelude::*;

    fn arbitrary_media_type() -> impl Strategy<Value = String> {
        prop::sample::select(vec![
            "application/pdf",
            "application/msword",
            "application/vnd.openxmlformats-officedocument.wordprocessingml.document",
            "text/plain",
            "",
        ])
        .prop_map(str::to_string)
    }

    proptest! {
        #![proptest_config(ProptestConfig::with_cases(200))]

        #[test]
        fn score_is_bounded(
            ref name in ".{0,80}",
            size in 0u64..20_000_000,
            ref media_type in arbitrary_media_type()
        ) {
            let metrics = MetricExtractor::extract(name, size, media_type);
            let breakdown = ScoreCalculator::breakdown(&metrics);
            prop_assert!(breakdown.size <= 25);
            prop_assert!(breakdown.format <= 20);
            prop_assert!(breakdown.naming <= 20);
            prop_assert!(breakdown.length <= 20);
            prop_assert!(breakdown.professional <= 15);
            prop_assert!(ScoreCalculator::calculate(&metrics) <= 100);
        }
    }
}
