use connexus_wiki::link_graph::{
    DEFAULT_STATIC_PREFIX, Todo, TodoIndex, TodoPriority, TodoRegistry, render_summary,
};
use connexus_wiki::{ScannedDocument, build_snapshot};

#[test]
fn test_todo_index_orders_levels_then_undefined() {
    let mut registry = TodoRegistry::new();
    registry.insert("P", Todo::new(TodoPriority::Level(2), "b"));
    registry.insert("P", Todo::new(TodoPriority::Undefined, "x"));
    registry.insert("P", Todo::new(TodoPriority::Level(1), "a"));
    registry.insert("P", Todo::new(TodoPriority::Level(1), "c"));

    let index = TodoIndex::from_registry(&registry);
    let layout: Vec<(TodoPriority, Vec<&str>)> = index
        .groups()
        .iter()
        .map(|group| {
            (
                group.priority,
                group
                    .items
                    .iter()
                    .map(|item| item.todo.content.as_str())
                    .collect(),
            )
        })
        .collect();

    assert_eq!(
        layout,
        vec![
            (TodoPriority::Level(1), vec!["a", "c"]),
            (TodoPriority::Level(2), vec!["b"]),
            (TodoPriority::Undefined, vec!["x"]),
        ]
    );
    assert_eq!(index.len(), 4);
}

#[test]
fn test_render_summary_format() {
    let mut registry = TodoRegistry::new();
    registry.insert("A", Todo::new(TodoPriority::Level(1), " fix footer"));
    registry.insert("B", Todo::new(TodoPriority::Undefined, " buy milk"));
    registry.insert("C", Todo::new(TodoPriority::Level(1), " add tests"));

    let body = render_summary(&TodoIndex::from_registry(&registry));
    assert_eq!(
        body,
        "## Priority 1 ToDo items\n\
         - [C](C) :  add tests\n\
         - [A](A) :  fix footer\n\
         ## ToDo items without priority\n\
         - [B](B) :  buy milk\n"
    );
}

#[test]
fn test_identical_content_keeps_last_scanned_owner() {
    let documents = vec![
        ScannedDocument {
            topic: "first".to_string(),
            content: "TODO1: same thing\n".to_string(),
        },
        ScannedDocument {
            topic: "second".to_string(),
            content: "TODO3: same thing\n".to_string(),
        },
    ];
    let snapshot = build_snapshot(&documents, DEFAULT_STATIC_PREFIX, 1);

    assert_eq!(snapshot.todos().len(), 1);
    assert_eq!(snapshot.todos().owner(" same thing"), Some("second"));
    let groups = snapshot.todo_index().groups();
    assert_eq!(groups.len(), 1);
    assert_eq!(groups[0].priority, TodoPriority::Level(3));
}

#[test]
fn test_todo_priority_serializes_tagged() -> Result<(), Box<dyn std::error::Error>> {
    let level = serde_json::to_value(TodoPriority::Level(2))?;
    assert_eq!(level, serde_json::json!({"kind": "level", "level": 2}));
    let undefined = serde_json::to_value(TodoPriority::Undefined)?;
    assert_eq!(undefined, serde_json::json!({"kind": "undefined"}));
    Ok(())
}
