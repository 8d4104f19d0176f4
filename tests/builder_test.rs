//! Tests for TreeBuilder using hierarchy fixtures

use std::path::Path;

use rstest::rstest;

use nestopt::domain::{DomainError, HierarchyDocument, NodeRecord, TreeBuilder, TreeNodeConvert};

fn load(name: &str) -> HierarchyDocument {
    let path = Path::new("tests/resources/hierarchies").join(name);
    let content = std::fs::read_to_string(path).unwrap();
    HierarchyDocument::parse(&content).unwrap()
}

// ============================================================
// Structure Tests
// ============================================================

#[test]
fn given_categories_when_building_then_returns_two_trees() {
    let tree = TreeBuilder::new()
        .build_from_document(&load("categories.toml"))
        .unwrap();

    assert_eq!(tree.root_nodes().len(), 2);
    assert_eq!(tree.len(), 10);
    assert_eq!(tree.depth(), 3, "Electronics > Phones > Android");
}

#[test]
fn given_categories_when_getting_leaves_then_returns_document_order() {
    let tree = TreeBuilder::new()
        .build_from_document(&load("categories.toml"))
        .unwrap();

    assert_eq!(tree.leaf_nodes(), vec!["3", "4", "5", "7", "9", "10"]);
}

#[test]
fn given_parent_declared_after_children_when_building_then_keeps_sibling_order() {
    let records = vec![
        NodeRecord::new("b", "B", Some("root")),
        NodeRecord::new("a", "A", Some("root")),
        NodeRecord::new("root", "Root", None),
        NodeRecord::new("c", "C", Some("root")),
    ];

    let tree = TreeBuilder::new().build(&records).unwrap();
    let ids: Vec<&str> = tree.iter().map(|(_, n)| n.data.id.as_str()).collect();

    assert_eq!(ids, vec!["root", "b", "a", "c"]);
}

#[test]
fn given_forest_when_rendering_tree_then_shows_every_node() {
    let tree = TreeBuilder::new()
        .build_from_document(&load("categories.toml"))
        .unwrap();

    let rendered = tree.to_tree_string().to_string();
    assert_eq!(rendered.lines().count(), 11, "dot root plus ten nodes");
    assert!(rendered.contains("Headphones [7]"));
}

// ============================================================
// Validation Tests
// ============================================================

#[test]
fn given_cycle_when_building_then_returns_cycle_detected() {
    let result = TreeBuilder::new().build_from_document(&load("cycle.toml"));

    assert!(
        matches!(result, Err(DomainError::CycleDetected(ref id)) if id == "a"),
        "got {:?}",
        result.err()
    );
}

#[rstest]
#[case::duplicate(
    vec![NodeRecord::new("1", "A", None), NodeRecord::new("1", "B", None)],
    DomainError::DuplicateId("1".into())
)]
#[case::dangling_parent(
    vec![NodeRecord::new("1", "A", None), NodeRecord::new("2", "B", Some("404"))],
    DomainError::UnknownParent { id: "2".into(), parent: "404".into() }
)]
#[case::self_parent(
    vec![NodeRecord::new("1", "A", Some("1"))],
    DomainError::CycleDetected("1".into())
)]
#[case::empty_id(
    vec![NodeRecord::new("1", "A", None), NodeRecord::new("", "B", Some("1"))],
    DomainError::InvalidDocument { message: "node 'B' has an empty id".into() }
)]
#[case::blank_id(
    vec![NodeRecord::new("  ", "A", None)],
    DomainError::InvalidDocument { message: "node 'A' has an empty id".into() }
)]
fn given_invalid_records_when_building_then_rejects(
    #[case] records: Vec<NodeRecord>,
    #[case] expected: DomainError,
) {
    let result = TreeBuilder::new().build(&records);
    assert_eq!(result.err(), Some(expected));
}

#[test]
fn given_document_with_empty_child_id_when_building_then_invalid_document() {
    let doc = HierarchyDocument::parse(
        r#"
[[node]]
id = 1
label = "Root"

[[node]]
id = ""
label = "Nameless"
parent = 1
"#,
    )
    .unwrap();

    let result = TreeBuilder::new().build_from_document(&doc);

    assert!(
        matches!(result, Err(DomainError::InvalidDocument { ref message }) if message.contains("Nameless")),
        "got {:?}",
        result.err()
    );
}

#[test]
fn given_categories_when_summarizing_then_reports_shape() {
    let tree = TreeBuilder::new()
        .build_from_document(&load("categories.toml"))
        .unwrap();

    assert_eq!(
        tree.stats().to_string(),
        "10 nodes, 2 roots, depth 3, 6 leaves"
    );
}

#[test]
fn given_builder_reused_when_building_then_state_is_reset() {
    let mut builder = TreeBuilder::new();
    let first = builder.build_from_document(&load("categories.toml")).unwrap();
    let second = builder.build_from_document(&load("draft.toml")).unwrap();

    assert_eq!(first.len(), 10);
    assert_eq!(second.len(), 3);
}

#[test]
fn given_empty_document_when_building_then_returns_empty_forest() {
    let tree = TreeBuilder::new()
        .build_from_document(&HierarchyDocument::default())
        .unwrap();
    assert!(tree.is_empty());
}
