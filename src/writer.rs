//! Fixture writing backend.
//!
//! The [`FixtureWriter`] trait defines the subdirectories and the three file
//! kinds a run produces: text, CSV and image. [`FsWriter`] writes them to disk; tests substitute a
//! recording mock that can fail chosen paths, which is how the generator's
//! non-fatal error handling is exercised without touching permissions.
//!
//! Each call opens, writes and closes its own file. Handles are released on
//! every exit path by drop; buffered writers are flushed explicitly first so
//! a failed flush surfaces as an error instead of being lost in `Drop`.

use crate::mock::JPEG_QUALITY;
use image::codecs::jpeg::JpegEncoder;
use image::codecs::png::PngEncoder;
use image::{ExtendedColorType, ImageEncoder, ImageFormat, RgbImage};
use std::fmt;
use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum WriteError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),
    #[error("Image encoding failed: {0}")]
    Image(#[from] image::ImageError),
}

/// Kind of file being written, for reporting.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, serde::Serialize)]
#[serde(rename_all = "lowercase")]
pub enum FileKind {
    Text,
    Csv,
    Image,
}

impl fmt::Display for FileKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FileKind::Text => write!(f, "text"),
            FileKind::Csv => write!(f, "CSV"),
            FileKind::Image => write!(f, "image"),
        }
    }
}

/// Pick the encoder for an image path: `.png` is PNG, anything else is JPEG.
pub fn image_format_for(path: &Path) -> ImageFormat {
    let is_png = path
        .extension()
        .and_then(|e| e.to_str())
        .is_some_and(|e| e.eq_ignore_ascii_case("png"));
    if is_png {
        ImageFormat::Png
    } else {
        ImageFormat::Jpeg
    }
}

/// `mkdir -p` with mode 0755 on unix.
pub fn create_dir_all(path: &Path) -> std::io::Result<()> {
    let mut builder = std::fs::DirBuilder::new();
    builder.recursive(true);
    #[cfg(unix)]
    {
        use std::os::unix::fs::DirBuilderExt;
        builder.mode(0o755);
    }
    builder.create(path)
}

/// Backend that persists generated content.
///
/// `Sync` so a single writer can be shared by rayon workers.
pub trait FixtureWriter: Sync {
    /// Create a directory (and missing parents) that later writes go into.
    fn create_dir(&self, path: &Path) -> std::io::Result<()>;

    fn write_text(&self, path: &Path, content: &str) -> Result<(), WriteError>;

    /// Write a header row followed by data rows.
    fn write_csv(&self, path: &Path, header: &[&str], rows: &[[String; 4]])
    -> Result<(), WriteError>;

    /// Encode `img` in the format chosen by [`image_format_for`].
    fn write_image(&self, path: &Path, img: &RgbImage) -> Result<(), WriteError>;
}

/// Writes fixtures to the local filesystem.
#[derive(Debug, Default, Clone, Copy)]
pub struct FsWriter;

impl FsWriter {
    pub fn new() -> Self {
        Self
    }
}

impl FixtureWriter for FsWriter {
    fn create_dir(&self, path: &Path) -> std::io::Result<()> {
        create_dir_all(path)
    }

    fn write_text(&self, path: &Path, content: &str) -> Result<(), WriteError> {
        std::fs::write(path, content)?;
        Ok(())
    }

    fn write_csv(
        &self,
        path: &Path,
        header: &[&str],
        rows: &[[String; 4]],
    ) -> Result<(), WriteError> {
        let mut writer = csv::Writer::from_path(path)?;
        writer.write_record(header)?;
        for row in rows {
            writer.write_record(row)?;
        }
        writer.flush()?;
        Ok(())
    }

    fn write_image(&self, path: &Path, img: &RgbImage) -> Result<(), WriteError> {
        let file = File::create(path)?;
        let mut writer = BufWriter::new(file);
        let (width, height) = img.dimensions();
        match image_format_for(path) {
            ImageFormat::Png => PngEncoder::new(&mut writer).write_image(
                img.as_raw(),
                width,
                height,
                ExtendedColorType::Rgb8,
            )?,
            _ => JpegEncoder::new_with_quality(&mut writer, JPEG_QUALITY).write_image(
                img.as_raw(),
                width,
                height,
                ExtendedColorType::Rgb8,
            )?,
        }
        writer.flush()?;
        Ok(())
    }
}
