//! Markdown link graph + todo index primitives.

mod change;
mod graph;
mod models;
mod parser;
mod todos;

pub use change::{ChangeReport, detect_change};
pub use graph::{LinkGraph, LinkMap, invert};
pub use models::{LinkGraphStats, OwnedTodo, Todo, TodoPriority, TopicLinks};
pub(crate) use parser::compile_regex;
pub use parser::{
    DEFAULT_STATIC_PREFIX, ExtractedPage, extract_links, extract_page, extract_todos,
    is_internal_target,
};
pub use todos::{TodoGroup, TodoIndex, TodoRegistry, render_summary};
