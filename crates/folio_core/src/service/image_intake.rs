//! Image reference intake for admin edits.
//!
//! # Responsibility
//! - Accept pasted URLs verbatim.
//! - Convert local image files into embedded `data:` references.
//! - Reject files above the size ceiling before reading them.
//!
//! # Invariants
//! - The ceiling applies here only. `ContentStore` accepts any reference it is
//!   handed, so callers that skip intake can still store oversized data.
//! - A rejected file produces no reference and therefore no mutation.

use base64::engine::general_purpose::STANDARD;
use base64::Engine;
use log::{info, warn};
use once_cell::sync::Lazy;
use regex::Regex;
use std::error::Error;
use std::fmt::{Display, Formatter};
use std::path::{Path, PathBuf};

/// Largest accepted file, in bytes.
pub const MAX_IMAGE_FILE_BYTES: u64 = 800_000;

/// User-facing rejection text for oversized files.
pub const FILE_TOO_LARGE_MESSAGE: &str =
    "File is too large (max 800KB). Please use an external URL or compress the image.";

static DATA_URL_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^data:([A-Za-z0-9.+-]+/[A-Za-z0-9.+-]+)?(;[^,]*)?,").expect("valid data url regex")
});

/// Intake failure.
#[derive(Debug)]
pub enum ImageIntakeError {
    /// File exceeds `MAX_IMAGE_FILE_BYTES`.
    TooLarge { size_bytes: u64, max_bytes: u64 },
    /// File could not be inspected or read.
    Io {
        path: PathBuf,
        source: std::io::Error,
    },
}

impl Display for ImageIntakeError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::TooLarge { .. } => f.write_str(FILE_TOO_LARGE_MESSAGE),
            Self::Io { path, source } => {
                write!(f, "failed to read image `{}`: {source}", path.display())
            }
        }
    }
}

impl Error for ImageIntakeError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::TooLarge { .. } => None,
            Self::Io { source, .. } => Some(source),
        }
    }
}

/// Shape of a stored image reference.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ImageReferenceKind {
    /// No image set.
    Empty,
    /// External URL (or any non-`data:` text), stored verbatim.
    External,
    /// Embedded `data:` payload.
    Embedded,
}

/// Classifies a stored reference.
pub fn classify_reference(value: &str) -> ImageReferenceKind {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        ImageReferenceKind::Empty
    } else if DATA_URL_RE.is_match(trimmed) {
        ImageReferenceKind::Embedded
    } else {
        ImageReferenceKind::External
    }
}

/// Placeholder shown instead of an embedded payload.
pub const EMBEDDED_IMAGE_LABEL: &str = "[embedded image]";

/// Short display form of a stored reference: `None` when unset, the
/// placeholder for embedded payloads, the URL otherwise.
pub fn display_reference(value: &str) -> Option<&str> {
    match classify_reference(value) {
        ImageReferenceKind::Empty => None,
        ImageReferenceKind::Embedded => Some(EMBEDDED_IMAGE_LABEL),
        ImageReferenceKind::External => Some(value),
    }
}

/// Pasted URL input. Stored exactly as given.
pub fn reference_from_url(url: &str) -> String {
    url.to_string()
}

/// Embeds raw image bytes as a base64 `data:` reference.
pub fn reference_from_bytes(bytes: &[u8], mime: &str) -> Result<String, ImageIntakeError> {
    let size_bytes = bytes.len() as u64;
    ensure_within_ceiling(size_bytes)?;
    Ok(format!("data:{mime};base64,{}", STANDARD.encode(bytes)))
}

/// Reads a local image file and embeds it as a `data:` reference.
///
/// The size is checked from file metadata before any content is read.
pub fn reference_from_file(path: impl AsRef<Path>) -> Result<String, ImageIntakeError> {
    let path = path.as_ref();
    let io_error = |source| ImageIntakeError::Io {
        path: path.to_path_buf(),
        source,
    };

    let size_bytes = std::fs::metadata(path).map_err(io_error)?.len();
    ensure_within_ceiling(size_bytes)?;

    let bytes = std::fs::read(path).map_err(io_error)?;
    let reference = reference_from_bytes(&bytes, mime_for_path(path))?;
    info!("event=image_intake module=intake status=ok source=file size_bytes={size_bytes}");
    Ok(reference)
}

/// Guesses an image MIME type from the file extension.
pub fn mime_for_path(path: &Path) -> &'static str {
    let extension = path
        .extension()
        .and_then(|value| value.to_str())
        .map(str::to_ascii_lowercase);
    match extension.as_deref() {
        Some("png") => "image/png",
        Some("jpg" | "jpeg") => "image/jpeg",
        Some("gif") => "image/gif",
        Some("webp") => "image/webp",
        Some("svg") => "image/svg+xml",
        Some("bmp") => "image/bmp",
        Some("ico") => "image/x-icon",
        Some("avif") => "image/avif",
        _ => "application/octet-stream",
    }
}

fn ensure_within_ceiling(size_bytes: u64) -> Result<(), ImageIntakeError> {
    if size_bytes > MAX_IMAGE_FILE_BYTES {
        warn!(
            "event=image_intake module=intake status=rejected error_code=file_too_large size_bytes={size_bytes} max_bytes={MAX_IMAGE_FILE_BYTES}"
        );
        return Err(ImageIntakeError::TooLarge {
            size_bytes,
            max_bytes: MAX_IMAGE_FILE_BYTES,
        });
    }
    Ok(())
}
