//! Content hashes for generated trees.
//!
//! The encryption pipeline establishes a source-of-truth hash of its input
//! directory before encrypting and compares against it after decrypting.
//! [`directory_hash`] computes the same kind of value for a fixture tree so a
//! run can be matched against the pipeline's logs.
//!
//! The hash is SHA-256 over, for every regular file in path order:
//!
//! ```text
//! relative/path/with/forward/slashes  ‖  0x00  ‖  file bytes
//! ```
//!
//! The NUL byte cannot occur in a path, so the path/content boundary is
//! unambiguous.
//!
//! Files that cannot be read contribute their path only.

use sha2::{Digest, Sha256};
use std::io;
use std::path::Path;
use walkdir::WalkDir;

/// SHA-256 of a whole directory tree, as lowercase hex.
pub fn directory_hash(dir: &Path) -> Result<String, walkdir::Error> {
    let mut hasher = Sha256::new();
    for entry in WalkDir::new(dir).sort_by_file_name() {
        let entry = entry?;
        if !entry.file_type().is_file() {
            continue;
        }
        hasher.update(relative_slash_path(dir, entry.path()).as_bytes());
        hasher.update([0u8]);
        match std::fs::read(entry.path()) {
            Ok(bytes) => hasher.update(&bytes),
            Err(e) => log::debug!("skipping unreadable {}: {e}", entry.path().display()),
        }
    }
    Ok(format!("{:x}", hasher.finalize()))
}

/// SHA-256 hash of a file's contents, returned as a hex string.
pub fn file_hash(path: &Path) -> io::Result<String> {
    let bytes = std::fs::read(path)?;
    Ok(format!("{:x}", Sha256::digest(&bytes)))
}

/// `path` below `root`, joined with `/` regardless of platform.
pub fn relative_slash_path(root: &Path, path: &Path) -> String {
    let rel = path.strip_prefix(root).unwrap_or(path);
    rel.components()
        .map(|c| c.as_os_str().to_string_lossy())
        .collect::<Vec<_>>()
        .join("/")
}
