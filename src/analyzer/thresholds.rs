//! Named thresholds shared by every scoring and explanation rule

/// Inclusive numeric range used for first-match-wins band lookups
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Band {
    pub min: u64,
    pub max: u64,
}

impl Band {
    pub const fn new(min: u64, max: u64) -> Self {
        Self { min, max }
    }

    pub fn contains(&self, value: u64) -> bool {
        value >= self.min && value <= self.max
    }
}

/// File size that earns full size points (~80KB to ~800KB)
pub const OPTIMAL_SIZE: Band = Band::new(80_000, 800_000);
/// Smallest size considered viable (~30KB)
pub const MIN_VIABLE_SIZE: u64 = 30_000;
/// Largest size considered reasonable (~2MB)
pub const MAX_REASONABLE_SIZE: u64 = 2_000_000;
pub const REASONABLE_SIZE: Band = Band::new(MIN_VIABLE_SIZE, MAX_REASONABLE_SIZE);

/// Bytes per word for PDF files
pub const PDF_BYTES_PER_WORD: u64 = 12;
/// Bytes per word for DOC/DOCX and anything else
pub const OTHER_BYTES_PER_WORD: u64 = 25;

pub const OPTIMAL_WORDS: Band = Band::new(300, 800);
pub const GOOD_WORDS: Band = Band::new(200, 1200);
pub const MIN_ACCEPTABLE_WORDS: u64 = 100;
/// Below this the resume reads as too brief
pub const BRIEF_WORDS: u64 = 200;
/// Above this the resume reads as too lengthy
pub const LENGTHY_WORDS: u64 = 1000;
/// Below this more concrete examples are recommended
pub const EXAMPLE_WORDS: u64 = 300;

/// Exclusive bounds on a reasonable file name length
pub const MIN_NAME_LEN: usize = 10;
pub const MAX_NAME_LEN: usize = 50;

pub const RECENT_YEARS: [&str; 2] = ["2024", "2023"];
pub const DRAFT_MARKERS: [&str; 3] = ["draft", "temp", "old"];

/// Score at or above which a resume is green
pub const GREEN_MIN_SCORE: u8 = 75;
/// Score at or above which a resume is yellow
pub const YELLOW_MIN_SCORE: u8 = 45;
pub const MAX_SCORE: u8 = 100;

pub const PREFERRED_MEDIA_TYPE: &str = "application/pdf";
pub const PREFERRED_EXTENSION: &str = ".pdf";
