//! Document persistence used by the scanner and the save pipeline.

use crate::error::{Result, WikiError};
use std::io;
use std::path::{Path, PathBuf};
use walkdir::WalkDir;

/// Default document extension (without the dot).
pub const DEFAULT_DOCUMENT_EXTENSION: &str = "md";

/// One entry directly under the corpus root.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CorpusEntry {
    /// File or directory name.
    pub name: String,
    /// Whether the entry is a directory.
    pub is_dir: bool,
}

impl CorpusEntry {
    /// Regular-file entry.
    #[must_use]
    pub fn file(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            is_dir: false,
        }
    }

    /// Directory entry.
    #[must_use]
    pub fn dir(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            is_dir: true,
        }
    }
}

/// Storage collaborator behind the wiki index.
pub trait DocumentStore: Send + Sync {
    /// Entries directly under the corpus root, sorted by name.
    ///
    /// # Errors
    ///
    /// Returns [`WikiError::CorpusUnavailable`] when the root cannot be listed.
    fn list_entries(&self) -> Result<Vec<CorpusEntry>>;

    /// Read a document; `Ok(None)` when it does not exist.
    ///
    /// # Errors
    ///
    /// Returns [`WikiError::ReadDocument`] for any other I/O failure.
    fn read_document(&self, topic: &str) -> Result<Option<String>>;

    /// Create or fully overwrite a document.
    ///
    /// # Errors
    ///
    /// Returns [`WikiError::WriteDocument`] on I/O failure.
    fn write_document(&self, topic: &str, content: &str) -> Result<()>;

    /// Whether a document exists for `topic`.
    fn document_exists(&self, topic: &str) -> bool;

    /// Document extension without the dot.
    fn extension(&self) -> &str;
}

/// Documents stored as `<root>/<topic>.<ext>` files.
#[derive(Debug, Clone)]
pub struct FsDocumentStore {
    root: PathBuf,
    extension: String,
}

impl FsDocumentStore {
    /// Store rooted at `root` using `extension` (leading dot optional).
    #[must_use]
    pub fn new(root: impl Into<PathBuf>, extension: &str) -> Self {
        Self {
            root: root.into(),
            extension: extension.trim_start_matches('.').to_string(),
        }
    }

    /// Corpus root.
    #[must_use]
    pub fn root(&self) -> &Path {
        &self.root
    }

    /// File path backing `topic`.
    #[must_use]
    pub fn document_path(&self, topic: &str) -> PathBuf {
        self.root.join(format!("{topic}.{}", self.extension))
    }

    fn unavailable(&self, source: io::Error) -> WikiError {
        WikiError::CorpusUnavailable {
            root: self.root.clone(),
            source,
        }
    }
}

impl DocumentStore for FsDocumentStore {
    fn list_entries(&self) -> Result<Vec<CorpusEntry>> {
        if !self.root.is_dir() {
            return Err(self.unavailable(io::Error::new(
                io::ErrorKind::NotFound,
                "corpus root is not a directory",
            )));
        }

        let mut entries = Vec::new();
        for entry in WalkDir::new(&self.root)
            .min_depth(1)
            .max_depth(1)
            .follow_links(true)
            .sort_by_file_name()
        {
            let entry = match entry {
                Ok(entry) => entry,
                // Depth 0 means the root listing itself failed.
                Err(err) if err.depth() == 0 => {
                    let source = err
                        .into_io_error()
                        .unwrap_or_else(|| io::Error::other("corpus root walk failed"));
                    return Err(self.unavailable(source));
                }
                Err(err) => {
                    log::warn!("skipping unreadable corpus entry: {err}");
                    continue;
                }
            };
            let Some(name) = entry.file_name().to_str() else {
                log::warn!(
                    "skipping corpus entry with non UTF-8 name: {}",
                    entry.path().display()
                );
                continue;
            };
            entries.push(CorpusEntry {
                name: name.to_string(),
                is_dir: entry.file_type().is_dir(),
            });
        }
        Ok(entries)
    }

    fn read_document(&self, topic: &str) -> Result<Option<String>> {
        match std::fs::read_to_string(self.document_path(topic)) {
            Ok(content) => Ok(Some(content)),
            Err(err) if err.kind() == io::ErrorKind::NotFound => Ok(None),
            Err(source) => Err(WikiError::ReadDocument {
                topic: topic.to_string(),
                source,
            }),
        }
    }

    fn write_document(&self, topic: &str, content: &str) -> Result<()> {
        let path = self.document_path(topic);
        let write_error = |source| WikiError::WriteDocument {
            topic: topic.to_string(),
            source,
        };
        if topic.contains('/')
            && let Some(parent) = path.parent()
        {
            log::debug!("creating directory: {}", parent.display());
            std::fs::create_dir_all(parent).map_err(write_error)?;
        }
        log::debug!("writing to file: {}", path.display());
        std::fs::write(&path, content).map_err(write_error)
    }

    fn document_exists(&self, topic: &str) -> bool {
        self.document_path(topic).is_file()
    }

    fn extension(&self) -> &str {
        &self.extension
    }
}
