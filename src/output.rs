//! CLI output formatting.
//!
//! Each command has a `format_*` function returning `Vec<String>` for
//! testability and a `print_*` wrapper that writes to stdout. Format
//! functions are pure: no I/O, no side effects.
//!
//! # Output Format
//!
//! ## Generate
//!
//! ```text
//! Seed 1234, 14 files
//!     mock_data/
//!     mock_data/internal_data_0/
//!     mock_data/document_0.txt
//!     ...
//! Error writing image file mock_data/photo_1.jpg: IO error: No space left on device
//!
//! Wrote 13 files (5 text, 2 CSV, 6 image) in mock_data
//! Seed: 1234 (pass --seed 1234 to reproduce)
//! Digest: sha256:9f2c…
//! 1 file failed
//!     mock_data/photo_1.jpg
//! ```
//!
//! ## Check
//!
//! ```text
//! Checked 14 files in mock_data
//! Digest: sha256:9f2c…
//! Problems (2)
//!     document_4.txt: missing
//!     transactions_0.csv: row 7: 3 fields, expected 4
//! ```

use crate::check::CheckReport;
use crate::generate::{GenerateEvent, GenerationReport};

/// Return indentation string: 4 spaces per depth level.
fn indent(depth: usize) -> String {
    "    ".repeat(depth)
}

/// `1 file` / `3 files`.
fn plural(n: usize, word: &str) -> String {
    if n == 1 {
        format!("{n} {word}")
    } else {
        format!("{n} {word}s")
    }
}

// ============================================================================
// Generate
// ============================================================================

/// Format a single generation progress event as display lines.
pub fn format_generate_event(event: &GenerateEvent) -> Vec<String> {
    match event {
        GenerateEvent::Started { seed, files, .. } => {
            vec![format!("Seed {seed}, {}", plural(*files, "file"))]
        }
        GenerateEvent::DirCreated { path } => {
            vec![format!("{}{}/", indent(1), path.display())]
        }
        GenerateEvent::FileWritten { path, .. } => {
            vec![format!("{}{}", indent(1), path.display())]
        }
        GenerateEvent::FileFailed { path, kind, error } => {
            vec![format!(
                "Error writing {kind} file {}: {error}",
                path.display()
            )]
        }
    }
}

/// Format the end-of-run summary.
pub fn format_generation_summary(report: &GenerationReport) -> Vec<String> {
    let mut lines = vec![
        String::new(),
        format!(
            "Wrote {} ({} text, {} CSV, {} image) in {}",
            plural(report.files_written(), "file"),
            report.text_written,
            report.csv_written,
            report.images_written,
            report.output_dir.display()
        ),
        format!(
            "Seed: {} (pass --seed {} to reproduce)",
            report.seed, report.seed
        ),
    ];
    if let Some(digest) = &report.digest {
        lines.push(format!("Digest: sha256:{digest}"));
    }
    if !report.failures.is_empty() {
        lines.push(format!("{} failed", plural(report.failures.len(), "file")));
        for failure in &report.failures {
            lines.push(format!("{}{}", indent(1), failure.path.display()));
        }
    }
    lines
}

/// Print the end-of-run summary to stdout.
pub fn print_generation_summary(report: &GenerationReport) {
    for line in format_generation_summary(report) {
        println!("{}", line);
    }
}

// ============================================================================
// Check
// ============================================================================

/// Format a check report.
pub fn format_check_output(report: &CheckReport) -> Vec<String> {
    let mut lines = vec![
        format!(
            "Checked {} in {}",
            plural(report.files.len(), "file"),
            report.output_dir.display()
        ),
        format!("Digest: sha256:{}", report.digest),
    ];
    if report.is_ok() {
        lines.push("No problems found".to_string());
    } else {
        lines.push(format!("Problems ({})", report.problems.len()));
        for problem in &report.problems {
            lines.push(format!("{}{}: {}", indent(1), problem.path, problem.message));
        }
    }
    lines
}

/// Print a check report to stdout.
pub fn print_check_output(report: &CheckReport) {
    for line in format_check_output(report) {
        println!("{}", line);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::check::{FileEntry, Problem};
    use crate::generate::FileFailure;
    use crate::writer::FileKind;
    use std::path::PathBuf;

    #[test]
    fn started_event_shows_seed_and_count() {
        let lines = format_generate_event(&GenerateEvent::Started {
            output_dir: PathBuf::from("mock_data"),
            seed: 42,
            files: 1,
        });
        assert_eq!(lines, vec!["Seed 42, 1 file"]);
    }

    #[test]
    fn written_and_dir_events_are_indented() {
        let dir = format_generate_event(&GenerateEvent::DirCreated {
            path: PathBuf::from("mock_data/internal_data_0"),
        });
        assert_eq!(dir, vec!["    mock_data/internal_data_0/"]);

        let file = format_generate_event(&GenerateEvent::FileWritten {
            path: PathBuf::from("mock_data/document_0.txt"),
            kind: FileKind::Text,
        });
        assert_eq!(file, vec!["    mock_data/document_0.txt"]);
    }

    #[test]
    fn failed_event_names_kind_and_error() {
        let lines = format_generate_event(&GenerateEvent::FileFailed {
            path: PathBuf::from("mock_data/transactions_0.csv"),
            kind: FileKind::Csv,
            error: "IO error: disk full".into(),
        });
        assert_eq!(
            lines,
            vec!["Error writing CSV file mock_data/transactions_0.csv: IO error: disk full"]
        );
    }

    #[test]
    fn summary_without_failures() {
        let report = GenerationReport {
            output_dir: PathBuf::from("mock_data"),
            seed: 9,
            text_written: 5,
            csv_written: 2,
            images_written: 7,
            failures: Vec::new(),
            digest: Some("ab".into()),
        };
        let lines = format_generation_summary(&report);
        assert_eq!(
            lines,
            vec![
                "",
                "Wrote 14 files (5 text, 2 CSV, 7 image) in mock_data",
                "Seed: 9 (pass --seed 9 to reproduce)",
                "Digest: sha256:ab",
            ]
        );
    }

    #[test]
    fn summary_lists_failures() {
        let report = GenerationReport {
            output_dir: PathBuf::from("mock_data"),
            failures: vec![FileFailure {
                path: PathBuf::from("mock_data/photo_0.jpg"),
                kind: FileKind::Image,
                message: "boom".into(),
            }],
            ..Default::default()
        };
        let lines = format_generation_summary(&report);
        assert!(lines.contains(&"1 file failed".to_string()));
        assert_eq!(lines.last().unwrap(), "    mock_data/photo_0.jpg");
        // No digest line when hashing was skipped
        assert!(!lines.iter().any(|l| l.starts_with("Digest")));
    }

    #[test]
    fn check_output_ok_and_problems() {
        let mut report = CheckReport {
            output_dir: PathBuf::from("mock_data"),
            files: vec![FileEntry {
                path: "document_0.txt".into(),
                bytes: 10,
                sha256: "00".into(),
            }],
            problems: Vec::new(),
            digest: "cd".into(),
        };
        assert_eq!(
            format_check_output(&report),
            vec![
                "Checked 1 file in mock_data",
                "Digest: sha256:cd",
                "No problems found"
            ]
        );

        report.problems.push(Problem {
            path: "document_1.txt".into(),
            message: "missing".into(),
        });
        let lines = format_check_output(&report);
        assert_eq!(lines[2], "Problems (1)");
        assert_eq!(lines[3], "    document_1.txt: missing");
    }
}
