//! Naming conventions for generated fixtures.
//!
//! Every entry in the output tree follows one of these patterns:
//!
//! ```text
//! document_{i}.txt        text document
//! transactions_{i}.csv    transaction table
//! photo_{i}.jpg           JPEG photo
//! internal_data_{i}/      subdirectory
//!     secret_note.md      note (fixed name)
//!     thumb.png           PNG thumbnail (fixed name)
//! ```
//!
//! Generation formats names with the `*_name` helpers; [`parse_entry_name`]
//! maps a top-level name back to its kind and index for validation.

pub const TEXT_PREFIX: &str = "document_";
pub const CSV_PREFIX: &str = "transactions_";
pub const PHOTO_PREFIX: &str = "photo_";
pub const SUBDIR_PREFIX: &str = "internal_data_";

pub const NOTE_NAME: &str = "secret_note.md";
pub const THUMB_NAME: &str = "thumb.png";

pub fn text_name(i: usize) -> String {
    format!("{TEXT_PREFIX}{i}.txt")
}

pub fn csv_name(i: usize) -> String {
    format!("{CSV_PREFIX}{i}.csv")
}

pub fn photo_name(i: usize) -> String {
    format!("{PHOTO_PREFIX}{i}.jpg")
}

pub fn subdir_name(i: usize) -> String {
    format!("{SUBDIR_PREFIX}{i}")
}

/// What a top-level entry name refers to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EntryName {
    Text(usize),
    Csv(usize),
    Photo(usize),
    SubDir(usize),
}

/// Parse a top-level entry name.
///
/// - `"document_3.txt"` → `Some(Text(3))`
/// - `"internal_data_0"` → `Some(SubDir(0))`
/// - `"document_03.txt"` → `None` (indices are never zero-padded)
/// - `"notes.txt"` → `None`
pub fn parse_entry_name(name: &str) -> Option<EntryName> {
    if let Some(i) = indexed(name, TEXT_PREFIX, ".txt") {
        return Some(EntryName::Text(i));
    }
    if let Some(i) = indexed(name, CSV_PREFIX, ".csv") {
        return Some(EntryName::Csv(i));
    }
    if let Some(i) = indexed(name, PHOTO_PREFIX, ".jpg") {
        return Some(EntryName::Photo(i));
    }
    indexed(name, SUBDIR_PREFIX, "").map(EntryName::SubDir)
}

fn indexed(name: &str, prefix: &str, suffix: &str) -> Option<usize> {
    let digits = name.strip_prefix(prefix)?.strip_suffix(suffix)?;
    if digits.is_empty() || !digits.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    // Reject zero padding so each index has exactly one spelling
    if digits.len() > 1 && digits.starts_with('0') {
        return None;
    }
    digits.parse().ok()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn formats_names() {
        assert_eq!(text_name(0), "document_0.txt");
        assert_eq!(csv_name(12), "transactions_12.csv");
        assert_eq!(photo_name(2), "photo_2.jpg");
        assert_eq!(subdir_name(1), "internal_data_1");
    }

    #[test]
    fn parses_formatted_names() {
        assert_eq!(parse_entry_name(&text_name(4)), Some(EntryName::Text(4)));
        assert_eq!(parse_entry_name(&csv_name(0)), Some(EntryName::Csv(0)));
        assert_eq!(parse_entry_name(&photo_name(10)), Some(EntryName::Photo(10)));
        assert_eq!(
            parse_entry_name(&subdir_name(7)),
            Some(EntryName::SubDir(7))
        );
    }

    #[test]
    fn rejects_foreign_names() {
        for name in [
            "notes.txt",
            "document_.txt",
            "document_x.txt",
            "document_03.txt",
            "photo_1.png",
            "internal_data_",
            "internal_data_1a",
            "transactions_-1.csv",
        ] {
            assert_eq!(parse_entry_name(name), None, "{name}");
        }
    }
}
