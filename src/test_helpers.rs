//! Shared test utilities.
//!
//! ```rust,ignore
//! use crate::test_helpers::*;
//!
//! let tmp = TempDir::new().unwrap();
//! let config = config_with_counts(&tmp.path().join("out"), 1, 1, 1, 1);
//! generate(&config, &fixed_context(), None).unwrap();
//! assert_eq!(sorted_names(&config.output_dir).len(), 4);
//! ```

use crate::config::GenerationConfig;
use crate::generate::RunContext;
use chrono::NaiveDate;
use log::{Level, LevelFilter, Log, Metadata, Record};
use std::path::Path;
use std::sync::Mutex;

/// A config writing into `dir` with the given counts and a fixed seed.
pub fn config_with_counts(
    dir: &Path,
    text_files: usize,
    csv_files: usize,
    image_files: usize,
    sub_dirs: usize,
) -> GenerationConfig {
    GenerationConfig {
        output_dir: dir.to_path_buf(),
        text_files,
        csv_files,
        image_files,
        sub_dirs,
        seed: Some(7),
        ..Default::default()
    }
}

/// Run context pinned to 2026-10-14 with seed 7.
pub fn fixed_context() -> RunContext {
    RunContext {
        today: NaiveDate::from_ymd_opt(2026, 10, 14).unwrap(),
        seed: 7,
    }
}

/// Entry names directly under `dir`, sorted.
pub fn sorted_names(dir: &Path) -> Vec<String> {
    let mut names: Vec<String> = std::fs::read_dir(dir)
        .unwrap_or_else(|e| panic!("cannot read {}: {e}", dir.display()))
        .map(|e| e.unwrap().file_name().to_string_lossy().into_owned())
        .collect();
    names.sort();
    names
}

static CAPTURED: Mutex<Vec<(Level, String)>> = Mutex::new(Vec::new());

struct CaptureLogger;

impl Log for CaptureLogger {
    fn enabled(&self, _metadata: &Metadata<'_>) -> bool {
        true
    }

    fn log(&self, record: &Record<'_>) {
        CAPTURED
            .lock()
            .unwrap()
            .push((record.level(), record.args().to_string()));
    }

    fn flush(&self) {}
}

static LOGGER: CaptureLogger = CaptureLogger;

/// Install the capturing logger (idempotent).
///
/// Tests run in parallel and share the buffer, so look for a message
/// specific to the test rather than counting records.
pub fn init_test_logger() {
    if log::set_logger(&LOGGER).is_ok() {
        log::set_max_level(LevelFilter::Trace);
    }
}

/// Captured messages logged at `level`.
pub fn logged(level: Level) -> Vec<String> {
    CAPTURED
        .lock()
        .unwrap()
        .iter()
        .filter(|(l, _)| *l == level)
        .map(|(_, msg)| msg.clone())
        .collect()
}
