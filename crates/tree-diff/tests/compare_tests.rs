use pretty_assertions::assert_eq;
use proptest::prelude::*;
use tree_diff::{compare, ChildPath, Difference, DifferenceKind, Side, TreeDiff};
use tree_store::{TraversalOrder, TreeStore};

/// Root -> {A, B}, A -> {C}
fn sample() -> TreeStore {
    let mut store = TreeStore::new();
    store.create_root("Root").unwrap();
    store.add_node("Root", "A").unwrap();
    store.add_node("Root", "B").unwrap();
    store.add_node("A", "C").unwrap();
    store
}

#[test]
fn test_child_count_mismatch() {
    let store = sample();
    let diff = TreeDiff::new(&store, "A", "B").unwrap();

    assert_eq!(diff.count(DifferenceKind::ChildCount), 1);
    assert_eq!(diff.count(DifferenceKind::NameMismatch), 0);
    assert_eq!(
        diff.differences(),
        &[
            Difference::ChildCount {
                path: ChildPath::root(),
                left_name: "A".into(),
                right_name: "B".into(),
                left: 1,
                right: 0,
            },
            Difference::Missing {
                path: ChildPath::from_indices(&[0]),
                side: Side::Right,
                present: "C".into(),
            },
        ]
    );

    insta::assert_snapshot!(diff.messages().join("\n"), @r"
Number of children differs at /: A has 1, B has 0
Missing on right at /0: C
");
}

#[test]
fn test_missing_side_is_reported_from_the_right() {
    let store = sample();
    let diff = TreeDiff::new(&store, "B", "A").unwrap();
    assert_eq!(
        diff.differences().last(),
        Some(&Difference::Missing {
            path: ChildPath::from_indices(&[0]),
            side: Side::Left,
            present: "C".into(),
        })
    );
}

#[test]
fn test_parent_context() {
    let mut store = sample();
    store.add_node("C", "D").unwrap();

    let diff = compare(&store, "C", "B").unwrap();
    assert_eq!(
        diff[0],
        Difference::ParentMismatch {
            left: "A".into(),
            right: "Root".into(),
        }
    );

    let diff = compare(&store, "Root", "B").unwrap();
    assert_eq!(diff[0], Difference::ParentPresence { root: Side::Left });
}

#[test]
fn test_positional_not_by_name() {
    // Root -> {L, R}, L -> {x1, y1}, R -> {y2, x2}
    let mut store = TreeStore::new();
    store.create_root("Root").unwrap();
    store.add_node("Root", "L").unwrap();
    store.add_node("Root", "R").unwrap();
    for (parent, child) in [("L", "x1"), ("L", "y1"), ("R", "y2"), ("R", "x2")] {
        store.add_node(parent, child).unwrap();
    }
    store.add_node("y1", "deep").unwrap();

    let diff = TreeDiff::new(&store, "L", "R").unwrap();
    assert_eq!(diff.count(DifferenceKind::ChildCount), 1);
    assert_eq!(diff.count(DifferenceKind::NameMismatch), 2);
    assert_eq!(diff.count(DifferenceKind::Missing), 1);

    insta::assert_snapshot!(diff.messages().join("\n"), @r"
Name mismatch at /0: x1 vs y2
Name mismatch at /1: y1 vs x2
Number of children differs at /1: y1 has 1, x2 has 0
Missing on right at /1/0: deep
");
}

#[test]
fn test_identical_shapes_with_distinct_names_differ_by_name_only() {
    let mut store = TreeStore::new();
    store.create_root("Root").unwrap();
    store.add_node("Root", "P").unwrap();
    store.add_node("Root", "Q").unwrap();
    store.add_node("P", "p1").unwrap();
    store.add_node("Q", "q1").unwrap();

    let diff = TreeDiff::new(&store, "P", "Q").unwrap();
    assert_eq!(diff.len(), 1);
    assert_eq!(diff.count(DifferenceKind::NameMismatch), 1);
}

proptest! {
    #[test]
    fn prop_self_compare_is_empty(
        parents in prop::collection::vec(any::<usize>(), 0..30),
        pick in any::<usize>(),
    ) {
        let mut store = TreeStore::new();
        store.create_root("n0").unwrap();
        for (i, choice) in parents.iter().enumerate() {
            let child = i + 1;
            store.add_node(&format!("n{}", choice % child), &format!("n{child}")).unwrap();
        }
        let names: Vec<String> = store
            .walk(TraversalOrder::PreOrder)
            .map(|id| store.name(id).unwrap().to_string())
            .collect();
        let name = &names[pick % names.len()];
        prop_assert!(compare(&store, name, name).unwrap().is_empty());
    }
}
