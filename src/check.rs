//! Validation of an existing fixture tree.
//!
//! [`check`] compares a directory against what a run with the same config
//! would produce and lists every deviation as a [`Problem`]. It verifies
//! structure, not exact contents:
//!
//! - top level holds exactly the configured documents, tables, photos and subdirectories
//! - each subdirectory holds exactly `secret_note.md` and `thumb.png`
//! - CSV files: header, 100 rows of 4 fields, UUID / date window / amount format
//! - images: real JPEG or PNG by content sniffing, decodable, exact dimensions
//! - text files: non-empty UTF-8
//!
//! Transaction dates are checked against the window ending at `today`, so
//! checking a tree generated on an earlier day can legitimately fail.

use crate::config::GenerationConfig;
use crate::digest;
use crate::mock::{
    AMOUNT_MAX, AMOUNT_MIN, CSV_HEADER, CSV_ROWS, PHOTO_SIZE, THUMB_SIZE, date_window,
};
use crate::naming::{self, EntryName};
use chrono::NaiveDate;
use image::{ImageFormat, ImageReader};
use serde::Serialize;
use std::collections::BTreeSet;
use std::fs;
use std::path::{Path, PathBuf};
use thiserror::Error;
use uuid::Uuid;
use walkdir::WalkDir;

/// Per-file problem cap; further problems in the same file are summarised.
const MAX_PROBLEMS_PER_FILE: usize = 5;

#[derive(Error, Debug)]
pub enum CheckError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("Walk error: {0}")]
    Walk(#[from] walkdir::Error),
}

/// A single deviation from the expected tree.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Problem {
    /// `/`-separated path below the output directory.
    pub path: String,
    pub message: String,
}

/// Inventory line for one file found in the tree.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FileEntry {
    pub path: String,
    pub bytes: u64,
    pub sha256: String,
}

#[derive(Debug, Clone, Serialize)]
pub struct CheckReport {
    pub output_dir: PathBuf,
    pub files: Vec<FileEntry>,
    pub problems: Vec<Problem>,
    pub digest: String,
}

impl CheckReport {
    pub fn is_ok(&self) -> bool {
        self.problems.is_empty()
    }
}

/// Validate `config.output_dir` against `config`.
///
/// Only failing to read the root itself is an error; everything found
/// inside is reported as problems.
pub fn check(config: &GenerationConfig, today: NaiveDate) -> Result<CheckReport, CheckError> {
    let base = config.output_dir.as_path();
    let mut problems = Vec::new();

    let mut present = BTreeSet::new();
    for entry in fs::read_dir(base)? {
        let entry = entry?;
        present.insert(entry.file_name().to_string_lossy().into_owned());
    }

    let mut expected: Vec<(String, EntryName)> = Vec::new();
    expected.extend((0..config.text_files).map(|i| (naming::text_name(i), EntryName::Text(i))));
    expected.extend((0..config.csv_files).map(|i| (naming::csv_name(i), EntryName::Csv(i))));
    expected.extend((0..config.image_files).map(|i| (naming::photo_name(i), EntryName::Photo(i))));
    expected.extend((0..config.sub_dirs).map(|i| (naming::subdir_name(i), EntryName::SubDir(i))));

    let expected_names: BTreeSet<&str> = expected.iter().map(|(n, _)| n.as_str()).collect();
    for name in &present {
        if !expected_names.contains(name.as_str()) {
            problems.push(Problem {
                path: name.clone(),
                message: unexpected_message(name, config),
            });
        }
    }

    for (name, kind) in &expected {
        if !present.contains(name) {
            problems.push(problem(name, "missing"));
            continue;
        }
        let path = base.join(name);
        let found = match kind {
            EntryName::Text(_) => check_text(&path),
            EntryName::Csv(_) => check_csv(&path, today),
            EntryName::Photo(_) => check_image(&path, ImageFormat::Jpeg, PHOTO_SIZE),
            EntryName::SubDir(_) => {
                check_subdir(&path, name, &mut problems);
                continue;
            }
        };
        push_capped(&mut problems, name, found);
    }

    let mut files = Vec::new();
    for entry in WalkDir::new(base).sort_by_file_name() {
        let entry = entry?;
        if !entry.file_type().is_file() {
            continue;
        }
        let rel = digest::relative_slash_path(base, entry.path());
        match digest::file_hash(entry.path()) {
            Ok(sha256) => files.push(FileEntry {
                path: rel,
                bytes: entry.metadata()?.len(),
                sha256,
            }),
            Err(e) => problems.push(problem(&rel, &format!("unreadable: {e}"))),
        }
    }

    Ok(CheckReport {
        output_dir: base.to_path_buf(),
        files,
        problems,
        digest: digest::directory_hash(base)?,
    })
}

fn problem(path: &str, message: &str) -> Problem {
    Problem {
        path: path.to_string(),
        message: message.to_string(),
    }
}

/// Explain why a top-level name is not part of the expected set.
fn unexpected_message(name: &str, config: &GenerationConfig) -> String {
    let (index, limit) = match naming::parse_entry_name(name) {
        Some(EntryName::Text(i)) => (i, config.text_files),
        Some(EntryName::Csv(i)) => (i, config.csv_files),
        Some(EntryName::Photo(i)) => (i, config.image_files),
        Some(EntryName::SubDir(i)) => (i, config.sub_dirs),
        None => return "unexpected entry".to_string(),
    };
    format!("unexpected entry: index {index} is beyond the configured count of {limit}")
}

fn push_capped(problems: &mut Vec<Problem>, path: &str, messages: Vec<String>) {
    let total = messages.len();
    for message in messages.into_iter().take(MAX_PROBLEMS_PER_FILE) {
        problems.push(Problem {
            path: path.to_string(),
            message,
        });
    }
    if total > MAX_PROBLEMS_PER_FILE {
        problems.push(problem(
            path,
            &format!("... and {} more", total - MAX_PROBLEMS_PER_FILE),
        ));
    }
}

fn check_subdir(path: &Path, name: &str, problems: &mut Vec<Problem>) {
    if !path.is_dir() {
        problems.push(problem(name, "expected a directory"));
        return;
    }
    let entries = match fs::read_dir(path) {
        Ok(entries) => entries,
        Err(e) => {
            problems.push(problem(name, &format!("unreadable: {e}")));
            return;
        }
    };
    let mut seen = BTreeSet::new();
    for entry in entries.flatten() {
        let child = entry.file_name().to_string_lossy().into_owned();
        if child != naming::NOTE_NAME && child != naming::THUMB_NAME {
            problems.push(problem(&format!("{name}/{child}"), "unexpected entry"));
        }
        seen.insert(child);
    }

    let note = format!("{name}/{}", naming::NOTE_NAME);
    if seen.contains(naming::NOTE_NAME) {
        push_capped(problems, &note, check_text(&path.join(naming::NOTE_NAME)));
    } else {
        problems.push(problem(&note, "missing"));
    }

    let thumb = format!("{name}/{}", naming::THUMB_NAME);
    if seen.contains(naming::THUMB_NAME) {
        let found = check_image(&path.join(naming::THUMB_NAME), ImageFormat::Png, THUMB_SIZE);
        push_capped(problems, &thumb, found);
    } else {
        problems.push(problem(&thumb, "missing"));
    }
}

fn check_text(path: &Path) -> Vec<String> {
    match fs::read_to_string(path) {
        Ok(text) if text.trim().is_empty() => vec!["empty text file".to_string()],
        Ok(_) => Vec::new(),
        Err(e) => vec![format!("not readable as UTF-8 text: {e}")],
    }
}

fn check_image(path: &Path, format: ImageFormat, size: (u32, u32)) -> Vec<String> {
    let reader = match ImageReader::open(path).and_then(|r| r.with_guessed_format()) {
        Ok(reader) => reader,
        Err(e) => return vec![format!("unreadable: {e}")],
    };
    let mut messages = Vec::new();
    if reader.format() != Some(format) {
        messages.push(format!(
            "expected {format:?} content, found {:?}",
            reader.format()
        ));
        return messages;
    }
    match reader.decode() {
        Ok(img) if (img.width(), img.height()) != size => messages.push(format!(
            "expected {}x{}, found {}x{}",
            size.0,
            size.1,
            img.width(),
            img.height()
        )),
        Ok(_) => {}
        Err(e) => messages.push(format!("failed to decode: {e}")),
    }
    messages
}

fn check_csv(path: &Path, today: NaiveDate) -> Vec<String> {
    let mut reader = match csv::ReaderBuilder::new().flexible(true).from_path(path) {
        Ok(reader) => reader,
        Err(e) => return vec![format!("unreadable: {e}")],
    };
    let mut messages = Vec::new();

    match reader.headers() {
        Ok(headers) if headers.iter().eq(CSV_HEADER.iter().copied()) => {}
        Ok(headers) => messages.push(format!(
            "header is {:?}, expected {:?}",
            headers.iter().collect::<Vec<_>>(),
            CSV_HEADER
        )),
        Err(e) => return vec![format!("unreadable header: {e}")],
    }

    let (earliest, latest) = date_window(today);
    let mut rows = 0;
    for (i, record) in reader.records().enumerate() {
        let row = i + 1;
        let record = match record {
            Ok(record) => record,
            Err(e) => {
                messages.push(format!("row {row}: {e}"));
                continue;
            }
        };
        rows += 1;
        if record.len() != CSV_HEADER.len() {
            messages.push(format!("row {row}: {} fields, expected 4", record.len()));
            continue;
        }
        if Uuid::parse_str(&record[0]).is_err() {
            messages.push(format!("row {row}: UserID '{}' is not a UUID", &record[0]));
        }
        match NaiveDate::parse_from_str(&record[1], "%Y-%m-%d") {
            Ok(date) if date < earliest || date > latest => messages.push(format!(
                "row {row}: Timestamp {date} outside {earliest}..={latest}"
            )),
            Ok(_) => {}
            Err(_) => messages.push(format!(
                "row {row}: Timestamp '{}' is not YYYY-MM-DD",
                &record[1]
            )),
        }
        if let Some(message) = amount_problem(&record[2]) {
            messages.push(format!("row {row}: {message}"));
        }
    }
    if rows != CSV_ROWS {
        messages.push(format!("{rows} data rows, expected {CSV_ROWS}"));
    }
    messages
}

fn amount_problem(amount: &str) -> Option<String> {
    let two_decimals = amount
        .split_once('.')
        .is_some_and(|(whole, frac)| !whole.is_empty() && frac.len() == 2);
    if !two_decimals {
        return Some(format!("Amount '{amount}' is not written with 2 decimals"));
    }
    match amount.parse::<f64>() {
        Ok(value) if (AMOUNT_MIN..=AMOUNT_MAX).contains(&value) => None,
        Ok(_) => Some(format!(
            "Amount {amount} outside [{AMOUNT_MIN:.2}, {AMOUNT_MAX:.2}]"
        )),
        Err(_) => Some(format!("Amount '{amount}' is not a number")),
    }
}
