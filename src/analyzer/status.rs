//! Score to traffic-light status

use super::thresholds::{GREEN_MIN_SCORE, YELLOW_MIN_SCORE};
use crate::Status;

pub const GREEN_MESSAGE: &str = "Your resume looks great and is ready for applications!";
pub const YELLOW_MESSAGE: &str = "Your resume has potential but requires some enhancements.";
pub const RED_MESSAGE: &str = "Your resume needs significant improvements to be competitive.";

/// Maps scores onto three half-open bands, lower bound inclusive
pub struct StatusClassifier;

impl StatusClassifier {
    pub fn classify(score: u8) -> (Status, &'static str) {
        let status = Status::from_score(score);
        (status, status.message())
    }
}

impl Status {
    pub fn from_score(score: u8) -> Self {
        if score >= GREEN_MIN_SCORE {
            Status::Green
        } else if score >= YELLOW_MIN_SCORE {
            Status::Yellow
        } else {
            Status::Red
        }
    }

    /// Headline message shown with this status
    pub fn message(&self) -> &'static str {
        match self {
            Status::Green => GREEN_MESSAGE,
            Status::Yellow => YELLOW_MESSAGE,
            Status::Red => RED_MESSAGE,
        }
    }
}
