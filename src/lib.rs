//! # mockgen
//!
//! Generates a directory tree of synthetic fixtures (plain-text documents,
//! transaction CSVs, noise images and nested "internal" directories) used
//! as input by the file-encryption pipeline's tests. Every run wipes the
//! output directory and rebuilds it, so tests always start from a known
//! state.
//!
//! # Architecture
//!
//! ```text
//! config     defaults → mockgen.toml → flags   →  GenerationConfig
//! generate   GenerationConfig + RunContext      →  mock_data/ + GenerationReport
//! check      GenerationConfig + mock_data/      →  CheckReport
//! ```
//!
//! Content generation is separated from file I/O. The [`mock`] module turns
//! an RNG into document text, transaction rows and pixel buffers; the
//! [`writer`] module encodes them to disk behind the
//! [`writer::FixtureWriter`] trait, which tests replace with a recording
//! mock.
//!
//! # Module Map
//!
//! | Module | Role |
//! |--------|------|
//! | [`config`] | `mockgen.toml` loading, layering, validation and the stock config |
//! | [`naming`] | Fixture file and directory names |
//! | [`mock`] | Seeded fake content: paragraphs, hacker phrases, transactions, noise |
//! | [`writer`] | Text, CSV, JPEG and PNG encoding behind a mockable trait |
//! | [`generate`] | Reset, directory setup and the parallel file writes |
//! | [`digest`] | SHA-256 over a whole tree, matching the pipeline's source-of-truth hash |
//! | [`check`] | Validates an existing tree against the config |
//! | [`output`] | CLI output formatting |
//!
//! # Design Decisions
//!
//! ## Reproducible Output
//!
//! Each file draws from its own `StdRng` seeded from the run seed and the
//! file's relative path. Output is therefore independent of thread count and
//! scheduling order, and a failing test can be replayed with `--seed`.
//!
//! ## Fatal vs. Per-File Errors
//!
//! Failing to reset the output directory or create a subdirectory ends the
//! run. A single file that cannot be written is reported and the rest of the
//! tree is still produced; the CLI exits with status 2 so CI notices.

pub mod check;
pub mod config;
pub mod digest;
pub mod generate;
pub mod mock;
pub mod naming;
pub mod output;
pub mod writer;

#[cfg(test)]
pub(crate) mod test_helpers;
