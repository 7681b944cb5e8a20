//! Fixture tree generation.
//!
//! A run has three phases:
//!
//! ```text
//! 1. Reset     remove <output_dir>, recreate it (0755)         fatal on error
//! 2. Dirs      create internal_data_{i}/ for every index         fatal on error
//! 3. Files     write every planned file, in parallel             non-fatal per file
//! ```
//!
//! ## Output Structure
//!
//! ```text
//! mock_data/
//! ├── document_0.txt ... document_{text_files-1}.txt
//! ├── transactions_0.csv ... transactions_{csv_files-1}.csv
//! ├── photo_0.jpg ... photo_{image_files-1}.jpg
//! ├── internal_data_0/
//! │   ├── secret_note.md
//! │   └── thumb.png
//! └── ...
//! ```
//!
//! ## Error policy
//!
//! Directory failures abort the run with a [`GenerateError`]. A failure to
//! write an individual file is reported as a [`GenerateEvent::FileFailed`],
//! recorded in [`GenerationReport::failures`], and does not stop its
//! siblings. Callers decide what a non-empty failure list means; the CLI
//! exits non-zero.
//!
//! ## Parallel Processing
//!
//! File jobs run on the current [rayon](https://docs.rs/rayon) pool. Every
//! file's contents come from its own RNG (see [`crate::mock::file_rng`]), so
//! a given seed yields the same bytes at any thread count.

use crate::config::{ConfigError, GenerationConfig};
use crate::digest;
use crate::mock::{
    self, CSV_HEADER, CSV_ROWS, DOCUMENT_SHAPE, PHOTO_SIZE, THUMB_SIZE, Transaction,
};
use crate::naming;
use crate::writer::{self, FileKind, FixtureWriter, FsWriter, WriteError};
use chrono::NaiveDate;
use rand::Rng;
use rayon::prelude::*;
use serde::Serialize;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use std::sync::mpsc::Sender;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum GenerateError {
    #[error("Invalid config: {0}")]
    Config(#[from] ConfigError),
    #[error("Failed to reset output directory {}: {source}", path.display())]
    ResetDir { path: PathBuf, source: io::Error },
    #[error("Failed to create directory {}: {source}", path.display())]
    CreateDir { path: PathBuf, source: io::Error },
}

/// Per-run values shared by every file job.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RunContext {
    /// Transaction dates are drawn from the six months ending here.
    pub today: NaiveDate,
    pub seed: u64,
}

impl RunContext {
    /// Today's local date and the configured seed, or a fresh random one.
    pub fn new(config: &GenerationConfig) -> Self {
        Self {
            today: chrono::Local::now().date_naive(),
            seed: config.seed.unwrap_or_else(|| rand::rng().random()),
        }
    }
}

/// What a planned file will contain.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum JobContent {
    Document,
    Transactions,
    Photo,
    Note,
    Thumbnail,
}

impl JobContent {
    pub fn kind(self) -> FileKind {
        match self {
            JobContent::Document | JobContent::Note => FileKind::Text,
            JobContent::Transactions => FileKind::Csv,
            JobContent::Photo | JobContent::Thumbnail => FileKind::Image,
        }
    }
}

/// A single file to write, relative to the output directory.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FileJob {
    /// `/`-separated path below the output directory; also the RNG key.
    pub rel_path: String,
    pub content: JobContent,
}

/// Subdirectory names, in index order.
pub fn plan_dirs(config: &GenerationConfig) -> Vec<String> {
    (0..config.sub_dirs).map(naming::subdir_name).collect()
}

/// Every file a run writes, in the order a sequential run would write them.
pub fn plan_files(config: &GenerationConfig) -> Vec<FileJob> {
    let mut jobs = Vec::with_capacity(config.expected_file_count());
    let mut push = |rel_path: String, content| jobs.push(FileJob { rel_path, content });

    for i in 0..config.text_files {
        push(naming::text_name(i), JobContent::Document);
    }
    for i in 0..config.csv_files {
        push(naming::csv_name(i), JobContent::Transactions);
    }
    for i in 0..config.image_files {
        push(naming::photo_name(i), JobContent::Photo);
    }
    for dir in plan_dirs(config) {
        push(format!("{dir}/{}", naming::NOTE_NAME), JobContent::Note);
        push(format!("{dir}/{}", naming::THUMB_NAME), JobContent::Thumbnail);
    }
    jobs
}

/// Progress events emitted while generating.
#[derive(Debug, Clone, PartialEq)]
pub enum GenerateEvent {
    Started {
        output_dir: PathBuf,
        seed: u64,
        files: usize,
    },
    DirCreated {
        path: PathBuf,
    },
    FileWritten {
        path: PathBuf,
        kind: FileKind,
    },
    FileFailed {
        path: PathBuf,
        kind: FileKind,
        error: String,
    },
}

/// A file that could not be written.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FileFailure {
    pub path: PathBuf,
    pub kind: FileKind,
    pub message: String,
}

/// Outcome of a run that got past directory setup.
#[derive(Debug, Clone, Default, Serialize)]
pub struct GenerationReport {
    pub output_dir: PathBuf,
    pub seed: u64,
    pub text_written: usize,
    pub csv_written: usize,
    pub images_written: usize,
    pub failures: Vec<FileFailure>,
    /// SHA-256 over the finished tree (see [`digest::directory_hash`]).
    #[serde(skip_serializing_if = "Option::is_none")]
    pub digest: Option<String>,
}

impl GenerationReport {
    pub fn files_written(&self) -> usize {
        self.text_written + self.csv_written + self.images_written
    }

    pub fn is_clean(&self) -> bool {
        self.failures.is_empty()
    }

    fn count(&mut self, kind: FileKind) {
        match kind {
            FileKind::Text => self.text_written += 1,
            FileKind::Csv => self.csv_written += 1,
            FileKind::Image => self.images_written += 1,
        }
    }
}

/// Generate the fixture tree on the local filesystem.
pub fn generate(
    config: &GenerationConfig,
    ctx: &RunContext,
    events: Option<Sender<GenerateEvent>>,
) -> Result<GenerationReport, GenerateError> {
    generate_with_writer(&FsWriter::new(), config, ctx, events)
}

/// Generate using a specific writer (allows testing with a mock).
pub fn generate_with_writer(
    writer: &impl FixtureWriter,
    config: &GenerationConfig,
    ctx: &RunContext,
    events: Option<Sender<GenerateEvent>>,
) -> Result<GenerationReport, GenerateError> {
    config.validate()?;
    let base = config.output_dir.as_path();
    let emit = |event: GenerateEvent| {
        if let Some(tx) = &events {
            // A closed receiver only means nobody is listening
            let _ = tx.send(event);
        }
    };

    let jobs = plan_files(config);
    emit(GenerateEvent::Started {
        output_dir: base.to_path_buf(),
        seed: ctx.seed,
        files: jobs.len(),
    });

    reset_output_dir(base)?;
    emit(GenerateEvent::DirCreated {
        path: base.to_path_buf(),
    });

    for dir in plan_dirs(config) {
        let path = base.join(dir);
        writer.create_dir(&path).map_err(|source| GenerateError::CreateDir {
            path: path.clone(),
            source,
        })?;
        emit(GenerateEvent::DirCreated { path });
    }

    let outcomes: Vec<(PathBuf, FileKind, Result<(), WriteError>)> = jobs
        .par_iter()
        .map(|job| {
            let path = base.join(&job.rel_path);
            let kind = job.content.kind();
            let result = write_job(writer, &path, job, ctx);
            match &result {
                Ok(()) => {
                    log::debug!("wrote {}", path.display());
                    emit(GenerateEvent::FileWritten {
                        path: path.clone(),
                        kind,
                    });
                }
                Err(e) => {
                    log::warn!("{}: {e}", path.display());
                    emit(GenerateEvent::FileFailed {
                        path: path.clone(),
                        kind,
                        error: e.to_string(),
                    });
                }
            }
            (path, kind, result)
        })
        .collect();

    let mut report = GenerationReport {
        output_dir: base.to_path_buf(),
        seed: ctx.seed,
        ..Default::default()
    };
    for (path, kind, result) in outcomes {
        match result {
            Ok(()) => report.count(kind),
            Err(e) => report.failures.push(FileFailure {
                path,
                kind,
                message: e.to_string(),
            }),
        }
    }

    report.digest = match digest::directory_hash(base) {
        Ok(hash) => Some(hash),
        Err(e) => {
            log::warn!("could not hash {}: {e}", base.display());
            None
        }
    };
    Ok(report)
}

/// Produce one file's contents from its own RNG and hand them to the writer.
fn write_job(
    writer: &impl FixtureWriter,
    path: &Path,
    job: &FileJob,
    ctx: &RunContext,
) -> Result<(), WriteError> {
    let mut rng = mock::file_rng(ctx.seed, &job.rel_path);
    match job.content {
        JobContent::Document => {
            writer.write_text(path, &mock::document_text(&DOCUMENT_SHAPE, &mut rng))
        }
        JobContent::Note => writer.write_text(path, &mock::hacker_phrase(&mut rng)),
        JobContent::Transactions => {
            let rows: Vec<[String; 4]> = (0..CSV_ROWS)
                .map(|_| Transaction::random(&mut rng, ctx.today).to_record())
                .collect();
            writer.write_csv(path, &CSV_HEADER, &rows)
        }
        JobContent::Photo => {
            writer.write_image(path, &mock::noise_image(PHOTO_SIZE.0, PHOTO_SIZE.1, &mut rng))
        }
        JobContent::Thumbnail => {
            writer.write_image(path, &mock::noise_image(THUMB_SIZE.0, THUMB_SIZE.1, &mut rng))
        }
    }
}

/// Remove whatever is at `dir` and create it again, empty.
///
/// A plain file or symlink at the path is removed rather than followed.
pub fn reset_output_dir(dir: &Path) -> Result<(), GenerateError> {
    let removed = match fs::symlink_metadata(dir) {
        Ok(meta) if meta.is_dir() => fs::remove_dir_all(dir),
        Ok(_) => fs::remove_file(dir),
        Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(()),
        Err(e) => Err(e),
    };
    removed.map_err(|source| GenerateError::ResetDir {
        path: dir.to_path_buf(),
        source,
    })?;
    writer::create_dir_all(dir).map_err(|source| GenerateError::CreateDir {
        path: dir.to_path_buf(),
        source,
    })
}
