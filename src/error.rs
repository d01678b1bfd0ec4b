//! Error types for the annotation core

use std::path::PathBuf;

/// Errors surfaced by the canvas model and the record store.
///
/// Missing files are not represented here: loading a record that does not
/// exist yet yields an empty canvas, not an error.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// The persisted annotation record exists but cannot be parsed.
    #[error("malformed annotation record: {0}")]
    MalformedRecord(String),

    /// An erase or text-detection region with zero width or height.
    #[error("selection region is empty")]
    EmptyRegion,

    /// Reading or writing the record file failed.
    #[error("record I/O failed for {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

pub type Result<T, E = Error> = std::result::Result<T, E>;
