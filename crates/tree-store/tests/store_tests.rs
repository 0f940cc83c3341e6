use pretty_assertions::assert_eq;
use proptest::prelude::*;
use tree_store::{Document, MoveRejection, Node, TraversalOrder, TreeError, TreeStore, MAX_DEPTH};

/// Root -> {A, B}, A -> {C}
fn sample() -> TreeStore {
    let mut store = TreeStore::new();
    store.create_root("Root").unwrap();
    store.add_node("Root", "A").unwrap();
    store.add_node("Root", "B").unwrap();
    store.add_node("A", "C").unwrap();
    store
}

/// Build a tree of `parents.len() + 1` nodes named `n0..`, where node `i`
/// hangs under node `parents[i - 1] % i`.
fn build(parents: &[usize]) -> TreeStore {
    let mut store = TreeStore::new();
    store.create_root("n0").unwrap();
    for (i, choice) in parents.iter().enumerate() {
        let child = i + 1;
        let parent = choice % child;
        store
            .add_node(&format!("n{parent}"), &format!("n{child}"))
            .unwrap();
    }
    store
}

/// A single chain `n0 -> n1 -> ... -> n{depth}`
fn chain(depth: usize) -> TreeStore {
    let mut store = TreeStore::new();
    store.create_root("n0").unwrap();
    for i in 1..=depth {
        store
            .add_node(&format!("n{}", i - 1), &format!("n{i}"))
            .unwrap();
    }
    store
}

fn index_is_consistent(store: &TreeStore) -> bool {
    let reachable: Vec<_> = store.walk(TraversalOrder::PreOrder).collect();
    reachable.len() == store.len()
        && reachable.iter().all(|&id| {
            let name = store.name(id).unwrap();
            store.find_by_name(name) == Some(id)
        })
}

#[test]
fn test_create_root_once() {
    let mut store = TreeStore::new();
    assert!(store.is_empty());
    assert_eq!(store.get_tree(), None);

    store.create_root("Root").unwrap();
    assert_eq!(store.len(), 1);
    assert_eq!(store.get_tree(), Some(Node::leaf("Root")));

    let err = store.create_root("Other").unwrap_err();
    assert_eq!(err, TreeError::AlreadyExists("Root".into()));
    assert_eq!(store.len(), 1);
}

#[test]
fn test_add_preserves_child_order() {
    let mut store = TreeStore::new();
    store.create_root("Root").unwrap();
    for name in ["z", "a", "m"] {
        store.add_node("Root", name).unwrap();
    }
    let tree = store.get_tree().unwrap();
    let names: Vec<_> = tree.children.iter().map(|c| c.name.as_str()).collect();
    assert_eq!(names, ["z", "a", "m"]);
}

#[test]
fn test_add_errors() {
    let mut store = sample();
    assert_eq!(
        store.add_node("Nope", "D").unwrap_err(),
        TreeError::NotFound("Nope".into())
    );
    // Duplicate regardless of which parent is named
    assert_eq!(
        store.add_node("B", "C").unwrap_err(),
        TreeError::DuplicateName("C".into())
    );
    assert_eq!(
        store.add_node("Root", "Root").unwrap_err(),
        TreeError::DuplicateName("Root".into())
    );
    assert_eq!(store, sample());
}

#[test]
fn test_add_on_empty_tree() {
    let mut store = TreeStore::new();
    assert_eq!(
        store.add_node("Root", "A").unwrap_err(),
        TreeError::NotFound("Root".into())
    );
}

#[test]
fn test_delete_subtree() {
    let mut store = sample();
    store.delete_node("A").unwrap();
    assert!(!store.contains("A"));
    assert!(!store.contains("C"));
    assert!(store.contains("B"));
    assert_eq!(store.len(), 2);
    assert_eq!(store.get_tree().unwrap().to_string(), "Root(B)");
}

#[test]
fn test_delete_root_empties_tree() {
    let mut store = sample();
    store.delete_node("Root").unwrap();
    assert!(store.is_empty());
    assert_eq!(store.len(), 0);
    assert_eq!(store.get_tree(), None);

    // A new root may be created afterwards
    store.create_root("Fresh").unwrap();
    assert_eq!(store.len(), 1);
}

#[test]
fn test_delete_missing() {
    let mut store = sample();
    assert_eq!(
        store.delete_node("Z").unwrap_err(),
        TreeError::NotFound("Z".into())
    );
    assert_eq!(store, sample());
}

#[test]
fn test_scenario_move_then_invalid_move() {
    let mut store = sample();

    store.move_node("C", "B").unwrap();
    let tree = store.get_tree().unwrap();
    assert!(tree.find("A").unwrap().is_leaf());
    assert_eq!(tree.find("B").unwrap().children, vec![Node::leaf("C")]);

    let err = store.move_node("B", "C").unwrap_err();
    assert!(matches!(
        err,
        TreeError::InvalidMove {
            reason: MoveRejection::IntoDescendant,
            ..
        }
    ));

    store.delete_node("Root").unwrap();
    assert_eq!(store.get_tree(), None);
}

#[test]
fn test_move_rejections() {
    let mut store = sample();
    assert!(matches!(
        store.move_node("A", "A").unwrap_err(),
        TreeError::InvalidMove {
            reason: MoveRejection::OwnParent,
            ..
        }
    ));
    assert!(matches!(
        store.move_node("Root", "B").unwrap_err(),
        TreeError::InvalidMove {
            reason: MoveRejection::Root,
            ..
        }
    ));
    assert_eq!(
        store.move_node("X", "B").unwrap_err(),
        TreeError::NotFound("X".into())
    );
    assert_eq!(
        store.move_node("A", "X").unwrap_err(),
        TreeError::NotFound("X".into())
    );
    assert_eq!(store, sample());
}

#[test]
fn test_move_appends_as_last_child() {
    let mut store = sample();
    store.add_node("B", "D").unwrap();
    store.move_node("A", "B").unwrap();
    assert_eq!(store.get_tree().unwrap().to_string(), "Root(B(D, A(C)))");
    assert_eq!(store.find_by_name("C").map(|id| store.depth(id)), Some(3));
}

#[test]
fn test_move_under_current_parent_moves_to_end() {
    let mut store = sample();
    store.move_node("A", "Root").unwrap();
    assert_eq!(store.get_tree().unwrap().to_string(), "Root(B, A(C))");
}

#[test]
fn test_add_stops_at_depth_limit() {
    let mut store = chain(MAX_DEPTH);
    let before = store.clone();

    let err = store
        .add_node(&format!("n{MAX_DEPTH}"), "extra")
        .unwrap_err();
    assert_eq!(
        err,
        TreeError::TooDeep {
            node: "extra".into(),
            limit: MAX_DEPTH
        }
    );
    assert_eq!(store, before);
    assert!(!store.contains("extra"));
}

#[test]
fn test_long_chain_stays_walkable() {
    let mut store = TreeStore::new();
    store.create_root("n0").unwrap();
    let added = (1..10_000)
        .take_while(|i| {
            store
                .add_node(&format!("n{}", i - 1), &format!("n{i}"))
                .is_ok()
        })
        .count();

    assert_eq!(added, MAX_DEPTH);
    // Node::depth counts levels, a leaf being 1
    let tree = store.get_tree().unwrap();
    assert_eq!(tree.depth(), MAX_DEPTH + 1);
    assert_eq!(store.walk(TraversalOrder::PostOrder).count(), MAX_DEPTH + 1);
}

#[test]
fn test_deepest_tree_survives_json() {
    let store = chain(MAX_DEPTH);
    for text in [
        store.to_document().to_json_pretty(),
        store.to_document().to_json_string(),
    ] {
        let document = Document::from_json_str(&text).unwrap();
        assert_eq!(TreeStore::from_document(&document).unwrap(), store);
    }
}

#[test]
fn test_move_respects_depth_limit() {
    let mut store = chain(MAX_DEPTH);
    store.add_node("n0", "x").unwrap();
    store.add_node("x", "y").unwrap();
    assert_eq!(store.height(store.find_by_name("x").unwrap()), 1);
    let before = store.clone();

    let deepest_parent = format!("n{}", MAX_DEPTH - 1);
    let err = store.move_node("x", &deepest_parent).unwrap_err();
    assert!(matches!(err, TreeError::TooDeep { .. }));
    assert_eq!(store, before);

    store
        .move_node("x", &format!("n{}", MAX_DEPTH - 2))
        .unwrap();
    assert_eq!(store.depth(store.find_by_name("y").unwrap()), MAX_DEPTH);
}

#[test]
fn test_replace_rejects_too_deep_tree() {
    let mut deep = Node::leaf(format!("n{}", MAX_DEPTH + 1));
    for i in (0..=MAX_DEPTH).rev() {
        deep = Node::with_children(format!("n{i}"), vec![deep]);
    }

    let mut store = chain(2);
    let before = store.clone();
    let err = store.replace(Some(&deep)).unwrap_err();
    assert!(matches!(err, TreeError::MalformedDocument(_)));
    assert_eq!(store, before);
}

proptest! {
    #[test]
    fn prop_index_tracks_reachability(parents in prop::collection::vec(any::<usize>(), 0..40)) {
        let store = build(&parents);
        prop_assert_eq!(store.len(), parents.len() + 1);
        prop_assert!(index_is_consistent(&store));
    }

    #[test]
    fn prop_add_duplicate_fails_for_any_parent(
        parents in prop::collection::vec(any::<usize>(), 0..20),
        existing in any::<usize>(),
        parent in any::<usize>(),
    ) {
        let mut store = build(&parents);
        let count = parents.len() + 1;
        let before = store.clone();
        let err = store
            .add_node(&format!("n{}", parent % count), &format!("n{}", existing % count))
            .unwrap_err();
        prop_assert!(matches!(err, TreeError::DuplicateName(_)));
        prop_assert_eq!(store, before);
    }

    #[test]
    fn prop_delete_removes_exactly_the_subtree(
        parents in prop::collection::vec(any::<usize>(), 1..30),
        victim in any::<usize>(),
    ) {
        let mut store = build(&parents);
        let count = parents.len() + 1;
        // Never the root here, that case empties the tree
        let victim = format!("n{}", 1 + victim % (count - 1));
        let id = store.find_by_name(&victim).unwrap();
        let doomed: Vec<String> = store
            .walk_from(id, TraversalOrder::PreOrder)
            .map(|id| store.name(id).unwrap().to_string())
            .collect();
        let survivors: Vec<String> = store
            .walk(TraversalOrder::PreOrder)
            .map(|id| store.name(id).unwrap().to_string())
            .filter(|name| !doomed.contains(name))
            .collect();

        store.delete_node(&victim).unwrap();

        for name in &doomed {
            prop_assert!(!store.contains(name));
        }
        let remaining: Vec<String> = store
            .walk(TraversalOrder::PreOrder)
            .map(|id| store.name(id).unwrap().to_string())
            .collect();
        prop_assert_eq!(remaining, survivors);
        prop_assert!(index_is_consistent(&store));
    }

    #[test]
    fn prop_move_validity(
        parents in prop::collection::vec(any::<usize>(), 1..30),
        mover in any::<usize>(),
        target in any::<usize>(),
    ) {
        let mut store = build(&parents);
        let count = parents.len() + 1;
        let mover = format!("n{}", 1 + mover % (count - 1));
        let target = format!("n{}", target % count);

        let mover_id = store.find_by_name(&mover).unwrap();
        let target_id = store.find_by_name(&target).unwrap();
        let in_subtree = mover_id == target_id || store.is_ancestor_of(mover_id, target_id);
        let before_subtree = store.subtree(mover_id).unwrap();
        let before = store.clone();

        match store.move_node(&mover, &target) {
            Ok(()) => {
                prop_assert!(!in_subtree);
                prop_assert_eq!(store.parent(mover_id), Some(target_id));
                prop_assert_eq!(store.children(target_id).last(), Some(&mover_id));
                prop_assert_eq!(store.subtree(mover_id).unwrap(), before_subtree);
                prop_assert_eq!(store.len(), before.len());
                prop_assert!(index_is_consistent(&store));
            }
            Err(err) => {
                prop_assert!(in_subtree);
                let is_invalid_move = matches!(err, TreeError::InvalidMove { .. });
                prop_assert!(is_invalid_move);
                prop_assert_eq!(store, before);
            }
        }
    }
}
