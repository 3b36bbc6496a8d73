//! Todo registry, priority-grouped index and summary page rendering.

use super::models::{OwnedTodo, Todo, TodoPriority};
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, HashMap};
use std::fmt::Write as _;

/// Flat registry keyed by todo content.
///
/// Two topics holding textually identical todo content collide: the last
/// insert in scan order owns the entry.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TodoRegistry {
    by_content: HashMap<String, OwnedTodo>,
}

impl TodoRegistry {
    /// Empty registry.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Record `todo` as owned by `topic`, replacing any entry with the same content.
    pub fn insert(&mut self, topic: &str, todo: Todo) {
        self.by_content.insert(
            todo.content.clone(),
            OwnedTodo {
                topic: topic.to_string(),
                todo,
            },
        );
    }

    /// Whether a todo with this content is registered.
    #[must_use]
    pub fn contains_content(&self, content: &str) -> bool {
        self.by_content.contains_key(content)
    }

    /// Owning topic of a todo content, if registered.
    #[must_use]
    pub fn owner(&self, content: &str) -> Option<&str> {
        self.by_content
            .get(content)
            .map(|entry| entry.topic.as_str())
    }

    /// Number of registered entries.
    #[must_use]
    pub fn len(&self) -> usize {
        self.by_content.len()
    }

    /// Whether the registry is empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.by_content.is_empty()
    }

    /// Registered entries, unordered.
    pub fn entries(&self) -> impl Iterator<Item = &OwnedTodo> {
        self.by_content.values()
    }
}

/// Todos sharing one priority, sorted by content.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TodoGroup {
    /// Group priority.
    pub priority: TodoPriority,
    /// Entries sorted alphabetically by content.
    pub items: Vec<OwnedTodo>,
}

/// Priority-grouped view of a registry: ascending levels, `Undefined` last.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TodoIndex {
    groups: Vec<TodoGroup>,
}

impl TodoIndex {
    /// Derive the index from a registry.
    #[must_use]
    pub fn from_registry(registry: &TodoRegistry) -> Self {
        let mut grouped: BTreeMap<TodoPriority, Vec<OwnedTodo>> = BTreeMap::new();
        for entry in registry.entries() {
            grouped
                .entry(entry.todo.priority)
                .or_default()
                .push(entry.clone());
        }
        let groups = grouped
            .into_iter()
            .map(|(priority, mut items)| {
                items.sort_by(|left, right| {
                    left.todo
                        .content
                        .cmp(&right.todo.content)
                        .then_with(|| left.topic.cmp(&right.topic))
                });
                TodoGroup { priority, items }
            })
            .collect();
        Self { groups }
    }

    /// Groups in rendering order.
    #[must_use]
    pub fn groups(&self) -> &[TodoGroup] {
        &self.groups
    }

    /// Total number of todos across groups.
    #[must_use]
    pub fn len(&self) -> usize {
        self.groups.iter().map(|group| group.items.len()).sum()
    }

    /// Whether no todo is indexed.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.groups.is_empty()
    }
}

fn group_heading(priority: TodoPriority) -> String {
    match priority {
        TodoPriority::Level(level) => format!("## Priority {level} ToDo items"),
        TodoPriority::Undefined => "## ToDo items without priority".to_string(),
    }
}

/// Render the generated summary page body.
///
/// One heading per group, then one `- [topic](topic) : content` line per todo.
#[must_use]
pub fn render_summary(index: &TodoIndex) -> String {
    let mut body = String::new();
    for group in index.groups() {
        let _ = writeln!(body, "{}", group_heading(group.priority));
        for entry in &group.items {
            let _ = writeln!(
                body,
                "- [{topic}]({topic}) : {content}",
                topic = entry.topic,
                content = entry.todo.content
            );
        }
    }
    body
}
