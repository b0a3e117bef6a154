use ahash::AHasher;
use std::hash::{Hash, Hasher};

/// Minimal supported Tesseract version
pub const MINIMAL_SUPPORTED_TESSERACT_VERSION: u32 = 5;

/// TSV parsing constants
pub const TSV_WORD_LEVEL: u32 = 5;
pub const TSV_MIN_FIELDS: usize = 12;

/// Table formatting constants
pub const MIN_COLUMN_WIDTH: usize = 3;

/// Compute a hash string from input data
pub fn compute_hash(data: &str) -> String {
    let mut hasher = AHasher::default();
    data.hash(&mut hasher);
    let hash = hasher.finish();
    format!("{:016x}", hash)
}
