//! Fake content producers. Every producer draws from a caller-supplied RNG.
//!
//! | Content | Function | Source of randomness |
//! |---|---|---|
//! | Document text | [`document_text`] | `fake` lorem words |
//! | Phrase | [`hacker_phrase`] | template + vocabulary |
//! | CSV row | [`Transaction::random`] | `uuid`, `chrono`, `rand` |
//! | Pixels | [`noise_image`] | uniform RGB noise |
//!
//! Shapes are fixed constants: the fixture consumers depend on them, so they
//! are deliberately not part of [`GenerationConfig`](crate::config::GenerationConfig).
//!
//! ## Seeding
//!
//! Each output file gets its own [`StdRng`] seeded from
//! `SHA-256(run seed ‖ relative path)` via [`file_rng`]. Contents therefore
//! depend only on the run seed and the file's place in the tree, never on
//! the order in which parallel workers happen to run.

mod hacker;
mod pixels;
mod records;
mod text;

pub use hacker::hacker_phrase;
pub use pixels::noise_image;
pub use records::{CSV_HEADER, Transaction, date_window};
pub use text::{DOCUMENT_SHAPE, ParagraphShape, document_text};

use rand::SeedableRng;
use rand::rngs::StdRng;
use sha2::{Digest, Sha256};

/// Data rows per CSV file (the header is extra).
pub const CSV_ROWS: usize = 100;

/// How far back transaction dates may go.
pub const LOOKBACK_MONTHS: u32 = 6;

/// Inclusive bounds for transaction amounts.
pub const AMOUNT_MIN: f64 = 1.0;
pub const AMOUNT_MAX: f64 = 1000.0;

/// Top-level `photo_{i}.jpg` resolution (width, height).
pub const PHOTO_SIZE: (u32, u32) = (640, 480);

/// Per-subdirectory `thumb.png` resolution (width, height).
pub const THUMB_SIZE: (u32, u32) = (100, 100);

/// JPEG encoder quality.
pub const JPEG_QUALITY: u8 = 75;

/// Build the RNG for a single output file.
///
/// `rel_path` uses `/` separators so seeds match across platforms.
pub fn file_rng(seed: u64, rel_path: &str) -> StdRng {
    let mut hasher = Sha256::new();
    hasher.update(seed.to_le_bytes());
    hasher.update(rel_path.as_bytes());
    let digest = hasher.finalize();
    let mut key = [0u8; 32];
    key.copy_from_slice(&digest);
    StdRng::from_seed(key)
}
