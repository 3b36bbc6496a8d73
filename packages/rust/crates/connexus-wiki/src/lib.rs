//! connexus-wiki - link graph and todo index for a markdown personal wiki.
//!
//! Module layout (leaf to root):
//! - `link_graph`: link/todo extraction, adjacency maps, todo index, change detection
//! - `store`: document persistence behind the `DocumentStore` trait
//! - `scanner`: top-level corpus enumeration
//! - `build`: aggregation of a scan into an immutable `WikiSnapshot`
//! - `engine`: live snapshot publishing, save pipeline and page queries
//! - `runtime_config`: layered YAML/env settings
//!
//! # Examples
//!
//! ```rust
//! use connexus_wiki::link_graph::{extract_page, TodoPriority};
//!
//! let text = "See [beta](B) and [site](https://example.com)\nTODO1: fix footer";
//! let page = extract_page(text, "/static");
//! assert_eq!(page.links, vec!["B".to_string()]);
//! assert_eq!(page.todos[0].priority, TodoPriority::Level(1));
//! assert_eq!(page.todos[0].content, " fix footer");
//! ```

pub mod build;
pub mod engine;
mod error;
pub mod link_graph;
pub mod runtime_config;
pub mod scanner;
pub mod store;

pub use build::{WikiSnapshot, build_snapshot};
pub use engine::{RebuildReport, SaveOutcome, WikiEngine, is_valid_topic};
pub use error::{Result, WikiError};
pub use link_graph::{
    ChangeReport, LinkGraph, LinkGraphStats, LinkMap, OwnedTodo, Todo, TodoGroup, TodoIndex,
    TodoPriority, TodoRegistry, TopicLinks,
};
pub use runtime_config::{WikiRuntimeConfig, resolve_wiki_runtime, resolve_wiki_runtime_with_env};
pub use scanner::{ScanOptions, ScannedDocument, scan_corpus};
pub use store::{CorpusEntry, DocumentStore, FsDocumentStore};
