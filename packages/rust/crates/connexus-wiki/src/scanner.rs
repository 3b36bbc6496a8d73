//! Corpus enumeration: topics and raw content of every top-level document.

use crate::error::Result;
use crate::store::DocumentStore;

/// One document read during a scan.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScannedDocument {
    /// Filename with the document extension removed.
    pub topic: String,
    /// Full document text.
    pub content: String,
}

/// Scan filters.
#[derive(Debug, Clone, Default)]
pub struct ScanOptions {
    /// Topics left out of the scan (the generated summary page, typically).
    pub excluded_topics: Vec<String>,
}

/// Topic for a corpus filename, if it carries the document extension.
#[must_use]
pub fn topic_from_file_name(name: &str, extension: &str) -> Option<String> {
    let stem = name.strip_suffix(extension)?.strip_suffix('.')?;
    if stem.is_empty() {
        None
    } else {
        Some(stem.to_string())
    }
}

/// Read every document directly under the store root, in filename order.
///
/// Directories and files without the document extension are skipped. A
/// document that fails to read is logged and skipped.
///
/// # Errors
///
/// Fails only when the root itself cannot be enumerated.
pub fn scan_corpus(
    store: &dyn DocumentStore,
    options: &ScanOptions,
) -> Result<Vec<ScannedDocument>> {
    let entries = store.list_entries()?;
    let extension = store.extension();

    let mut documents = Vec::with_capacity(entries.len());
    for entry in entries {
        if entry.is_dir {
            continue;
        }
        let Some(topic) = topic_from_file_name(&entry.name, extension) else {
            continue;
        };
        if options.excluded_topics.iter().any(|excluded| *excluded == topic) {
            log::debug!("scan skips reserved topic: {topic}");
            continue;
        }
        match store.read_document(&topic) {
            Ok(Some(content)) => documents.push(ScannedDocument { topic, content }),
            Ok(None) => log::warn!("document vanished during scan: {}", entry.name),
            Err(err) => log::warn!("skipping document {}: {err}", entry.name),
        }
    }
    Ok(documents)
}
