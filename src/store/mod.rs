//! Annotation record persistence
//!
//! Manages the files the annotation session reads and writes: the
//! single-line JSON shape record and the flat recent-captures path list.
//! Records are read wholesale and replaced wholesale; there are no
//! incremental writes.

pub mod record;

use std::path::{Path, PathBuf};

use crate::domain::Shape;
use crate::error::{Error, Result};

pub use record::{load_from_text, save_to_text};

/// Maximum entries kept in the recent-captures list
const MAX_RECENT: usize = 20;

/// File-backed store for one annotation record
#[derive(Clone, Debug)]
pub struct RecordStore {
    path: PathBuf,
}

impl RecordStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Load the persisted shapes.
    ///
    /// A file that does not exist yet is "no data yet": returns an empty
    /// list. A file that exists but cannot be read or parsed is fatal.
    pub async fn load(&self) -> Result<Vec<Shape>> {
        let text = match tokio::fs::read_to_string(&self.path).await {
            Ok(text) => text,
            Err(err) if err.kind() == std::io::ErrorKind::NotFound => {
                log::debug!("no annotation record at {}", self.path.display());
                return Ok(Vec::new());
            }
            Err(err) => {
                return Err(Error::Io {
                    path: self.path.clone(),
                    source: err,
                });
            }
        };
        load_from_text(&text)
    }

    /// Replace the record with the given shapes.
    ///
    /// Failures propagate to the caller for a user-visible notification;
    /// the store does not retry.
    pub async fn save(&self, shapes: &[Shape]) -> Result<()> {
        if let Some(parent) = self.path.parent() {
            tokio::fs::create_dir_all(parent)
                .await
                .map_err(|err| Error::Io {
                    path: parent.to_path_buf(),
                    source: err,
                })?;
        }
        let text = save_to_text(shapes);
        tokio::fs::write(&self.path, text)
            .await
            .map_err(|err| Error::Io {
                path: self.path.clone(),
                source: err,
            })?;
        log::info!(
            "saved {} shape(s) to {}",
            shapes.len(),
            self.path.display()
        );
        Ok(())
    }
}

/// Flat-file list of recently captured screenshot paths, newest first
#[derive(Clone, Debug, Default, PartialEq)]
pub struct RecentCaptures {
    entries: Vec<PathBuf>,
}

impl RecentCaptures {
    /// Load the list from disk; a missing file is an empty list
    pub async fn load(path: &Path) -> Result<Self> {
        let text = match tokio::fs::read_to_string(path).await {
            Ok(text) => text,
            Err(err) if err.kind() == std::io::ErrorKind::NotFound => {
                return Ok(Self::default());
            }
            Err(err) => {
                return Err(Error::Io {
                    path: path.to_path_buf(),
                    source: err,
                });
            }
        };
        let entries = text
            .lines()
            .map(str::trim)
            .filter(|line| !line.is_empty())
            .map(PathBuf::from)
            .collect();
        Ok(Self { entries })
    }

    pub fn entries(&self) -> &[PathBuf] {
        &self.entries
    }

    /// Record a capture as the newest entry, deduplicating and capping the
    /// list
    pub fn push(&mut self, capture: PathBuf) {
        self.entries.retain(|existing| existing != &capture);
        self.entries.insert(0, capture);
        self.entries.truncate(MAX_RECENT);
    }

    /// Write the list back to disk, one path per line
    pub async fn save(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            tokio::fs::create_dir_all(parent)
                .await
                .map_err(|err| Error::Io {
                    path: parent.to_path_buf(),
                    source: err,
                })?;
        }
        let mut text = String::new();
        for entry in &self.entries {
            text.push_str(&entry.to_string_lossy());
            text.push('\n');
        }
        tokio::fs::write(path, text).await.map_err(|err| Error::Io {
            path: path.to_path_buf(),
            source: err,
        })
    }
}
