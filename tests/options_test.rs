//! Option list construction against arena-built hierarchies

use std::collections::HashSet;
use std::path::Path;

use generational_arena::Index;
use rstest::{fixture, rstest};

use nestopt::domain::{
    build_association_options, build_move_options, indented_label, HierarchyDocument,
    HierarchyProvider, NodeRecord, Scope, TreeArena, TreeBuilder,
};
use nestopt::util::testing;

fn build(records: &[(&str, Option<&str>)]) -> TreeArena {
    let records: Vec<NodeRecord> = records
        .iter()
        .map(|(id, parent)| NodeRecord::new(*id, *id, *parent))
        .collect();
    TreeBuilder::new().build(&records).unwrap()
}

fn handles(tree: &TreeArena, ids: &[&str]) -> HashSet<Index> {
    ids.iter()
        .map(|id| tree.find_by_id(id).expect("id in tree"))
        .collect()
}

// A
// ├── B
// └── C
//     ├── D
//     └── E
#[fixture]
fn abcde() -> TreeArena {
    testing::init_test_setup();
    build(&[
        ("A", None),
        ("B", Some("A")),
        ("C", Some("A")),
        ("D", Some("C")),
        ("E", Some("C")),
    ])
}

#[fixture]
fn categories() -> TreeArena {
    testing::init_test_setup();
    let content =
        std::fs::read_to_string(Path::new("tests/resources/hierarchies/categories.toml")).unwrap();
    let doc = HierarchyDocument::parse(&content).unwrap();
    TreeBuilder::new().build_from_document(&doc).unwrap()
}

// ============================================================
// Association options
// ============================================================

#[rstest]
#[case::both_grandchildren_excluded(&["D", "E"], &["", "B"], &[])]
#[case::one_grandchild_excluded(&["D"], &["", "B", "C", "E"], &["C"])]
#[case::nothing_excluded(&[], &["", "B", "C", "D", "E"], &["C"])]
#[case::every_leaf_excluded(&["B", "D", "E"], &[""], &[])]
fn given_subtree_when_excluding_then_lists_surviving_leaves(
    abcde: TreeArena,
    #[case] excluded: &[&str],
    #[case] expected: &[&str],
    #[case] disabled: &[&str],
) {
    let a = abcde.find_by_id("A").unwrap();
    let options = build_association_options(
        &abcde,
        Scope::Subtree(a),
        &handles(&abcde, excluded),
        "Please select...",
    )
    .unwrap();

    assert_eq!(options.values(), expected);
    let expected_disabled: Vec<String> = disabled.iter().map(|s| s.to_string()).collect();
    assert_eq!(
        options.disabled.iter().cloned().collect::<Vec<_>>(),
        expected_disabled
    );
    assert_eq!(options.entries[0].display, "Please select...");
}

#[rstest]
fn given_empty_forest_when_building_association_then_only_prompt(
    #[values("Please select...", "")] prompt: &str,
) {
    let tree = TreeArena::new();
    let options =
        build_association_options(&tree, Scope::Forest, &HashSet::new(), prompt).unwrap();

    assert_eq!(options.entries.len(), 1);
    assert_eq!(options.entries[0].display, prompt);
    assert_eq!(options.entries[0].value, "");
    assert!(options.disabled.is_empty());
}

#[rstest]
#[case(&[])]
#[case(&["3"])]
#[case(&["3", "4"])]
#[case(&["3", "4", "5", "7"])]
#[case(&["9", "10", "5"])]
fn given_any_exclusion_when_building_then_every_entry_is_justified(
    categories: TreeArena,
    #[case] excluded: &[&str],
) {
    let excluded = handles(&categories, excluded);
    let options =
        build_association_options(&categories, Scope::Forest, &excluded, "Pick").unwrap();

    for entry in options.entries.iter().skip(1) {
        let node = categories.find_by_id(&entry.value).unwrap();
        if categories.is_leaf(node) {
            assert!(!excluded.contains(&node), "excluded leaf listed: {}", entry.value);
            assert!(!options.is_disabled(&entry.value));
        } else {
            assert!(options.is_disabled(&entry.value));
            let has_surviving_leaf = categories
                .iter()
                .filter(|(idx, n)| n.children.is_empty() && !excluded.contains(idx))
                .any(|(idx, _)| categories.is_descendant_of(idx, node));
            assert!(has_surviving_leaf, "heading without leaves: {}", entry.value);
        }
    }

    let ids: HashSet<&str> = options.entries.iter().map(|e| e.value.as_str()).collect();
    assert_eq!(ids.len(), options.entries.len(), "node listed twice");
}

#[rstest]
fn given_all_leaves_of_branch_excluded_when_building_then_branch_collapses(
    categories: TreeArena,
) {
    // Phones loses both leaves; Electronics survives through Laptops
    let options = build_association_options(
        &categories,
        Scope::Forest,
        &handles(&categories, &["3", "4"]),
        "Pick",
    )
    .unwrap();
    assert_eq!(options.values(), vec!["", "1", "5", "6", "7", "8", "9", "10"]);

    // No Electronics leaf left: the whole tree disappears, Books stays
    let options = build_association_options(
        &categories,
        Scope::Forest,
        &handles(&categories, &["3", "4", "5", "7"]),
        "Pick",
    )
    .unwrap();
    assert_eq!(options.values(), vec!["", "8", "9", "10"]);
    assert_eq!(options.disabled.iter().collect::<Vec<_>>(), vec!["8"]);
}

#[rstest]
fn given_categories_when_building_then_labels_are_indented_by_level(categories: TreeArena) {
    let options =
        build_association_options(&categories, Scope::Forest, &HashSet::new(), "Pick").unwrap();

    let displays: Vec<&str> = options.entries.iter().map(|e| e.display.as_str()).collect();
    assert_eq!(displays[1], " Electronics");
    assert_eq!(displays[2], "- Phones");
    assert_eq!(displays[3], "-- Android");
}

#[rstest]
fn given_same_exclusions_when_building_twice_then_identical(categories: TreeArena) {
    let excluded = handles(&categories, &["4", "9"]);
    let first = build_association_options(&categories, Scope::Forest, &excluded, "Pick").unwrap();
    let second = build_association_options(&categories, Scope::Forest, &excluded, "Pick").unwrap();
    assert_eq!(first, second);
}

// ============================================================
// Move options
// ============================================================

#[rstest]
fn given_no_mover_when_building_move_options_then_one_entry_per_node(categories: TreeArena) {
    let roots = categories.roots();
    let options = build_move_options(&categories, &roots, None, |n| {
        indented_label(&categories, n, "–")
    });

    assert_eq!(options.len(), categories.len());
    let values: Vec<&str> = options.iter().map(|e| e.value.as_str()).collect();
    assert_eq!(
        values,
        vec!["1", "2", "3", "4", "5", "6", "7", "8", "9", "10"]
    );
    assert_eq!(options[2].display, "–– Android");
}

#[rstest]
fn given_persisted_mover_when_building_move_options_then_skips_own_subtree(
    categories: TreeArena,
) {
    let phones = categories.find_by_id("2").unwrap();
    let roots = categories.roots();
    let options = build_move_options(&categories, &roots, Some(phones), |n| categories.label(n));

    let values: Vec<&str> = options.iter().map(|e| e.value.as_str()).collect();
    assert_eq!(values, vec!["1", "5", "6", "7", "8", "9", "10"]);
}

#[test]
fn given_new_mover_when_building_move_options_then_every_node_is_legal() {
    let content =
        std::fs::read_to_string(Path::new("tests/resources/hierarchies/draft.toml")).unwrap();
    let doc = HierarchyDocument::parse(&content).unwrap();
    let tree = TreeBuilder::new().build_from_document(&doc).unwrap();
    let draft = tree.find_by_id("3").unwrap();
    let roots = tree.roots();

    let with_mover = build_move_options(&tree, &roots, Some(draft), |n| tree.label(n));
    let without = build_move_options(&tree, &roots, None, |n| tree.label(n));

    assert_eq!(with_mover, without);
    assert_eq!(with_mover.len(), 3);
}

#[rstest]
fn given_single_root_when_building_move_options_then_only_that_tree(categories: TreeArena) {
    let books = categories.find_by_id("8").unwrap();
    let options = build_move_options(&categories, &[books], None, |n| categories.label(n));

    let labels: Vec<&str> = options.iter().map(|e| e.display.as_str()).collect();
    assert_eq!(labels, vec!["Books", "Fiction", "Non-fiction"]);
}

#[rstest]
fn given_tree_when_walking_then_child_level_is_parent_level_plus_one(categories: TreeArena) {
    for (idx, node) in categories.iter() {
        match node.parent {
            None => assert_eq!(categories.level(idx), 0),
            Some(parent) => assert_eq!(categories.level(idx), categories.level(parent) + 1),
        }
    }
}
