use regex::Regex;
use std::sync::LazyLock;

use super::compile_regex;
use crate::link_graph::models::{Todo, TodoPriority};

static TODO_REGEX: LazyLock<Regex> = LazyLock::new(|| compile_regex(r"(?i)TODO([0-9]*):(.*)"));

/// Extract `TODO[<digits>]:<content>` annotations in document order.
///
/// Only ASCII digits form a priority.
/// Content runs to the end of the line and keeps its leading whitespace.
#[must_use]
pub fn extract_todos(content: &str) -> Vec<Todo> {
    TODO_REGEX
        .captures_iter(content)
        .filter_map(|caps| {
            let digits = caps.get(1).map_or("", |m| m.as_str());
            let text = caps.get(2)?.as_str();
            Some(Todo::new(TodoPriority::from_digits(digits), text))
        })
        .collect()
}
