//! Crate-level error types.

use std::fmt;

/// Errors produced by the cardview crate.
///
/// Only the I/O edges (articles, options, thumbnails, threads) are fallible.
/// View operations never return errors; their preconditions degrade to
/// no-ops.
#[derive(Debug)]
pub enum CardViewError {
    /// Generic I/O failure.
    Io(std::io::Error),
    /// Failed to spawn a background thread.
    ThreadSpawn(std::io::Error),
    /// TOML options parsing/serialization failure.
    OptionsParse(String),
    /// Article list parsing failure.
    ArticlesParse(String),
    /// A thumbnail could not be fetched from its source.
    ThumbnailFetch {
        /// Location that was requested.
        location: String,
        /// Source-specific failure description.
        reason: String,
    },
    /// Thumbnail bytes could not be decoded as an image.
    ThumbnailDecode(image::ImageError),
    /// A color string was not of the form `#rrggbb`.
    InvalidColor(String),
}

impl fmt::Display for CardViewError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Io(e) => write!(f, "I/O error: {e}"),
            Self::ThreadSpawn(e) => {
                write!(f, "failed to spawn thread: {e}")
            }
            Self::OptionsParse(msg) => {
                write!(f, "options parse error: {msg}")
            }
            Self::ArticlesParse(msg) => {
                write!(f, "article list parse error: {msg}")
            }
            Self::ThumbnailFetch { location, reason } => {
                write!(f, "failed to fetch thumbnail {location}: {reason}")
            }
            Self::ThumbnailDecode(e) => {
                write!(f, "failed to decode thumbnail: {e}")
            }
            Self::InvalidColor(s) => write!(f, "invalid color: {s:?}"),
        }
    }
}

impl std::error::Error for CardViewError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Io(e) | Self::ThreadSpawn(e) => Some(e),
            Self::ThumbnailDecode(e) => Some(e),
            _ => None,
        }
    }
}

impl From<std::io::Error> for CardViewError {
    fn from(e: std::io::Error) -> Self {
        Self::Io(e)
    }
}

impl From<image::ImageError> for CardViewError {
    fn from(e: image::ImageError) -> Self {
        Self::ThumbnailDecode(e)
    }
}
