//! Live wiki index: owns the store, the settings and the published snapshot.
//!
//! Readers clone the current `Arc<WikiSnapshot>` and never observe a build in
//! progress. Rebuilds scan without holding the snapshot lock and publish with a
//! single pointer replacement. A separate mutex serializes rebuilds.

use crate::build::{WikiSnapshot, build_snapshot};
use crate::error::{Result, WikiError};
use crate::link_graph::{
    ChangeReport, LinkGraphStats, TodoIndex, TopicLinks, compile_regex, detect_change,
    render_summary,
};
use crate::runtime_config::WikiRuntimeConfig;
use crate::scanner::{ScanOptions, scan_corpus};
use crate::store::{DocumentStore, FsDocumentStore};
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, LazyLock, Mutex, MutexGuard, PoisonError, RwLock};
use std::time::Instant;

static TOPIC_REGEX: LazyLock<Regex> = LazyLock::new(|| compile_regex(r"^[a-zA-Z0-9/_-]+$"));

/// Whether `topic` is an acceptable page name.
///
/// Letters, digits, `_`, `-` and `/` as a separator between non-empty segments.
#[must_use]
pub fn is_valid_topic(topic: &str) -> bool {
    TOPIC_REGEX.is_match(topic) && !topic.split('/').any(str::is_empty)
}

fn lock_rebuild(lock: &Mutex<()>) -> MutexGuard<'_, ()> {
    lock.lock().unwrap_or_else(PoisonError::into_inner)
}

/// Result of one completed rebuild.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RebuildReport {
    /// Counters of the published snapshot.
    pub stats: LinkGraphStats,
    /// Wall time of scan + build + publish.
    pub elapsed_ms: u128,
    /// Whether the summary page was persisted.
    pub summary_written: bool,
}

/// Result of saving a page.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SaveOutcome {
    /// Saved topic.
    pub topic: String,
    /// Whether the save triggered a full rebuild.
    pub rebuilt: bool,
}

/// The wiki link graph and todo index service.
pub struct WikiEngine {
    config: WikiRuntimeConfig,
    store: Arc<dyn DocumentStore>,
    snapshot: RwLock<Arc<WikiSnapshot>>,
    rebuild_lock: Mutex<()>,
    next_version: AtomicU64,
}

impl std::fmt::Debug for WikiEngine {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("WikiEngine")
            .field("config", &self.config)
            .field("version", &self.snapshot().version())
            .finish_non_exhaustive()
    }
}

impl WikiEngine {
    /// Open the corpus described by `config` on the filesystem and run the startup build.
    ///
    /// # Errors
    ///
    /// Returns [`WikiError::CorpusUnavailable`] when the root cannot be enumerated.
    pub fn open(config: WikiRuntimeConfig) -> Result<Self> {
        let store = FsDocumentStore::new(config.root.clone(), &config.document_extension);
        Self::with_store(config, Arc::new(store))
    }

    /// Run the startup build over an explicit store.
    ///
    /// # Errors
    ///
    /// Returns [`WikiError::CorpusUnavailable`] when the root cannot be enumerated.
    pub fn with_store(config: WikiRuntimeConfig, store: Arc<dyn DocumentStore>) -> Result<Self> {
        let engine = Self {
            config,
            store,
            snapshot: RwLock::new(Arc::new(WikiSnapshot::default())),
            rebuild_lock: Mutex::new(()),
            next_version: AtomicU64::new(1),
        };
        engine.rebuild()?;
        Ok(engine)
    }

    /// Active settings.
    #[must_use]
    pub fn config(&self) -> &WikiRuntimeConfig {
        &self.config
    }

    /// Current published snapshot.
    #[must_use]
    pub fn snapshot(&self) -> Arc<WikiSnapshot> {
        Arc::clone(&self.snapshot.read().unwrap_or_else(PoisonError::into_inner))
    }

    fn publish(&self, next: WikiSnapshot) {
        let next = Arc::new(next);
        let mut current = self.snapshot.write().unwrap_or_else(PoisonError::into_inner);
        *current = next;
    }

    // The generated summary never feeds back into the index.
    fn scan_options(&self) -> ScanOptions {
        ScanOptions {
            excluded_topics: vec![self.config.summary_topic.clone()],
        }
    }

    /// Rescan the corpus, publish a fresh snapshot and regenerate the summary page.
    ///
    /// On failure the previous snapshot stays in effect. A failed summary write
    /// is logged and does not affect the published snapshot.
    ///
    /// # Errors
    ///
    /// Returns [`WikiError::CorpusUnavailable`] when the root cannot be enumerated.
    pub fn rebuild(&self) -> Result<RebuildReport> {
        let _guard = lock_rebuild(&self.rebuild_lock);
        let start = Instant::now();

        let documents = scan_corpus(self.store.as_ref(), &self.scan_options()).inspect_err(|e| {
            log::error!("rebuild aborted, keeping previous snapshot: {e}");
        })?;

        let version = self.next_version.fetch_add(1, Ordering::Relaxed);
        let next = build_snapshot(&documents, &self.config.static_prefix, version);
        let stats = next.stats();
        let summary = render_summary(next.todo_index());
        self.publish(next);

        log::info!(
            "links rebuilt: {} forward, {} reverse, {} todos (version {}, {:?})",
            stats.forward_topics,
            stats.reverse_targets,
            stats.todos,
            stats.version,
            start.elapsed()
        );

        let summary_written = match self
            .store
            .write_document(&self.config.summary_topic, &summary)
        {
            Ok(()) => true,
            Err(e) => {
                log::error!("failed to persist todo summary: {e}");
                false
            }
        };

        Ok(RebuildReport {
            stats,
            elapsed_ms: start.elapsed().as_millis(),
            summary_written,
        })
    }

    /// Change Detector verdict for `content` against the current snapshot, without side effects.
    #[must_use]
    pub fn check_change(&self, topic: &str, content: &str) -> ChangeReport {
        if self.is_reserved_summary(topic) {
            return ChangeReport::default();
        }
        let snapshot = self.snapshot();
        detect_change(
            snapshot.graph(),
            snapshot.todos(),
            topic,
            content,
            &self.config.static_prefix,
        )
    }

    /// React to a saved document: rebuild when its links or todos changed.
    ///
    /// Returns whether a rebuild ran.
    ///
    /// # Errors
    ///
    /// Propagates a failed rebuild; the previous snapshot stays in effect.
    pub fn on_saved(&self, topic: &str, content: &str) -> Result<bool> {
        let report = self.check_change(topic, content);
        log::debug!(
            "change check for '{topic}': links_changed={}, todos_changed={}",
            report.links_changed,
            report.todos_changed
        );
        if !report.requires_rebuild() {
            return Ok(false);
        }
        log::info!("links changed - rebuilding links");
        self.rebuild()?;
        Ok(true)
    }

    /// Persist a page body and run change detection on it.
    ///
    /// Carriage returns are stripped before writing.
    ///
    /// # Errors
    ///
    /// Returns [`WikiError::InvalidTopic`], [`WikiError::WriteDocument`], or a
    /// rebuild failure.
    pub fn save_page(&self, topic: &str, body: &str) -> Result<SaveOutcome> {
        if !is_valid_topic(topic) {
            return Err(WikiError::InvalidTopic(topic.to_string()));
        }
        let body = body.replace('\r', "");
        self.store.write_document(topic, &body)?;
        let rebuilt = self.on_saved(topic, &body)?;
        Ok(SaveOutcome {
            topic: topic.to_string(),
            rebuilt,
        })
    }

    /// Raw page body; `Ok(None)` when the page does not exist yet.
    ///
    /// # Errors
    ///
    /// Returns [`WikiError::InvalidTopic`] or [`WikiError::ReadDocument`].
    pub fn load_page(&self, topic: &str) -> Result<Option<String>> {
        if !is_valid_topic(topic) {
            return Err(WikiError::InvalidTopic(topic.to_string()));
        }
        self.store.read_document(topic)
    }

    /// Whether the document behind `topic` exists.
    #[must_use]
    pub fn page_exists(&self, topic: &str) -> bool {
        is_valid_topic(topic) && self.store.document_exists(topic)
    }

    /// Sorted targets referenced by `topic`.
    #[must_use]
    pub fn outgoing_links(&self, topic: &str) -> Vec<String> {
        self.snapshot().graph().outgoing(topic)
    }

    /// Sorted topics referencing `topic`.
    #[must_use]
    pub fn incoming_links(&self, topic: &str) -> Vec<String> {
        self.snapshot().graph().incoming(topic)
    }

    /// Everything a page view consults for `topic`.
    #[must_use]
    pub fn topic_links(&self, topic: &str) -> TopicLinks {
        let snapshot = self.snapshot();
        TopicLinks {
            topic: topic.to_string(),
            exists: self.page_exists(topic),
            outgoing: snapshot.graph().outgoing(topic),
            incoming: snapshot.graph().incoming(topic),
        }
    }

    /// Scanned topics plus every link target, sorted.
    #[must_use]
    pub fn page_list(&self) -> Vec<String> {
        self.snapshot().page_list()
    }

    /// Priority-grouped todos of the current snapshot.
    #[must_use]
    pub fn todo_index(&self) -> TodoIndex {
        self.snapshot().todo_index().clone()
    }

    /// Summary page body for the current snapshot.
    #[must_use]
    pub fn summary_body(&self) -> String {
        render_summary(self.snapshot().todo_index())
    }

    /// Counters of the current snapshot.
    #[must_use]
    pub fn stats(&self) -> LinkGraphStats {
        self.snapshot().stats()
    }

    fn is_reserved_summary(&self, topic: &str) -> bool {
        topic == self.config.summary_topic
    }
}
