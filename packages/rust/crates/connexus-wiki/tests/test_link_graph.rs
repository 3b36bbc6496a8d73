use connexus_wiki::link_graph::{DEFAULT_STATIC_PREFIX, LinkGraph, LinkMap, invert};
use connexus_wiki::{ScannedDocument, build_snapshot};

fn doc(topic: &str, content: &str) -> ScannedDocument {
    ScannedDocument {
        topic: topic.to_string(),
        content: content.to_string(),
    }
}

fn assert_symmetric(graph: &LinkGraph) {
    for (from, to) in graph.forward().pairs() {
        assert!(
            graph.reverse().contains(to, from),
            "missing reverse edge {to} <- {from}"
        );
    }
    for (to, from) in graph.reverse().pairs() {
        assert!(
            graph.forward().contains(from, to),
            "missing forward edge {from} -> {to}"
        );
    }
}

#[test]
fn test_invert_transposes_every_pair() {
    let mut forward = LinkMap::new();
    forward.add("A", "B");
    forward.add("A", "C");
    forward.add("C", "B");

    let reverse = invert(&forward);
    assert_eq!(reverse.links("B"), vec!["A".to_string(), "C".to_string()]);
    assert_eq!(reverse.links("C"), vec!["A".to_string()]);
    assert!(reverse.links("A").is_empty());
    assert_eq!(reverse.edge_count(), forward.edge_count());
}

#[test]
fn test_link_map_add_is_set_semantic() {
    let mut map = LinkMap::new();
    assert!(map.add("A", "B"));
    assert!(!map.add("A", "B"));
    assert_eq!(map.len(), 1);
    assert_eq!(map.edge_count(), 1);
}

#[test]
fn test_build_snapshot_graph_is_symmetric() {
    let documents = vec![
        doc("A", "See [beta](B) and [site](https://x.com)\nTODO1: fix footer"),
        doc("B", "Back to [alpha](A), [alpha again](A), [ghost](Missing)"),
        doc("C", "[pic](/static/c.png) [self](C)"),
    ];
    let snapshot = build_snapshot(&documents, DEFAULT_STATIC_PREFIX, 1);
    let graph = snapshot.graph();

    assert_symmetric(graph);
    assert_eq!(graph.outgoing("A"), vec!["B".to_string()]);
    assert_eq!(graph.outgoing("B"), vec!["A".to_string(), "Missing".to_string()]);
    assert_eq!(graph.incoming("A"), vec!["B".to_string()]);
    assert_eq!(graph.incoming("C"), vec!["C".to_string()]);
    assert_eq!(graph.incoming("Missing"), vec!["B".to_string()]);
    assert!(graph.outgoing("Missing").is_empty());
}

#[test]
fn test_build_snapshot_omits_topics_without_links() {
    let documents = vec![doc("lonely", "no links here"), doc("A", "[b](B)")];
    let snapshot = build_snapshot(&documents, DEFAULT_STATIC_PREFIX, 1);

    assert_eq!(snapshot.graph().forward().keys().collect::<Vec<_>>(), vec!["A"]);
    assert_eq!(snapshot.topics().len(), 2);
    let stats = snapshot.stats();
    assert_eq!(stats.documents, 2);
    assert_eq!(stats.forward_topics, 1);
    assert_eq!(stats.reverse_targets, 1);
    assert_eq!(stats.links, 1);
}

#[test]
fn test_build_snapshot_is_idempotent() {
    let documents = vec![
        doc("A", "[b](B) [c](C)\nTODO2: one"),
        doc("B", "[a](A)\nTODO: two"),
    ];
    let first = build_snapshot(&documents, DEFAULT_STATIC_PREFIX, 1);
    let second = build_snapshot(&documents, DEFAULT_STATIC_PREFIX, 2);

    assert_eq!(first.graph(), second.graph());
    assert_eq!(first.todos(), second.todos());
    assert_eq!(first.todo_index(), second.todo_index());
    assert_eq!(first.version(), 1);
    assert_eq!(second.version(), 2);
}

#[test]
fn test_page_list_includes_link_targets() {
    let documents = vec![doc("A", "[b](B) [ghost](Missing)"), doc("B", "")];
    let snapshot = build_snapshot(&documents, DEFAULT_STATIC_PREFIX, 1);
    assert_eq!(
        snapshot.page_list(),
        vec!["A".to_string(), "B".to_string(), "Missing".to_string()]
    );
}
