use pretty_assertions::assert_eq;
use proptest::prelude::*;
use tree_render::{
    to_drawable, Box2D, Children, Point2D, RenderModel, RenderOptions, Visibility,
};
use tree_store::{Document, Node, TreeStore};

/// Root -> {A, B}, A -> {C}
fn sample() -> Document {
    let mut store = TreeStore::new();
    store.create_root("Root").unwrap();
    store.add_node("Root", "A").unwrap();
    store.add_node("Root", "B").unwrap();
    store.add_node("A", "C").unwrap();
    store.to_document()
}

fn arb_tree() -> impl Strategy<Value = Node> {
    Just(Node::leaf(""))
        .prop_recursive(5, 40, 4, |inner| {
            prop::collection::vec(inner, 0..4).prop_map(|children| Node::with_children("", children))
        })
        .prop_map(|mut root| {
            let mut counter = 0;
            rename(&mut root, &mut counter);
            root
        })
}

fn rename(node: &mut Node, counter: &mut usize) {
    node.name = format!("n{counter}");
    *counter += 1;
    for child in &mut node.children {
        rename(child, counter);
    }
}

#[test]
fn test_build_is_fully_expanded_copy() {
    let doc = sample();
    let model = RenderModel::build(&doc);
    for name in ["Root", "A", "B", "C"] {
        assert_eq!(model.visibility(name), Some(Visibility::Expanded));
    }
    assert_eq!(model.to_document(), doc);
}

#[test]
fn test_empty_document_builds_empty_model() {
    let model = RenderModel::build(&Document::empty());
    assert!(model.is_empty());
    let drawable = to_drawable(&model, &RenderOptions::default().layout());
    assert!(drawable.is_empty());
    assert!(drawable.edges.is_empty());
}

#[test]
fn test_toggle_state_machine() {
    let mut model = RenderModel::build(&sample());

    assert_eq!(model.toggle("A"), Some(Visibility::Collapsed));
    assert_eq!(model.toggle("A"), Some(Visibility::Expanded));
    // Leaves have nothing to collapse
    assert_eq!(model.toggle("C"), Some(Visibility::Expanded));
    assert_eq!(model.toggle("nope"), None);
}

#[test]
fn test_hidden_nodes_stay_addressable() {
    let mut model = RenderModel::build(&sample());
    model.toggle("Root");
    model.toggle("A");
    assert_eq!(model.visibility("A"), Some(Visibility::Collapsed));

    model.toggle("Root");
    let drawable = model.to_drawable(&RenderOptions::default().layout());
    let names: Vec<_> = drawable.nodes.iter().map(|n| n.name.as_str()).collect();
    assert_eq!(names, ["Root", "A", "B"]);
    assert!(drawable.node("A").unwrap().collapsed);
}

#[test]
fn test_toggle_all_collapses_every_internal_node() {
    let doc = sample();
    let model = RenderModel::toggle_all(&doc);
    let root = model.root().unwrap();

    assert!(root.is_collapsed());
    assert!(matches!(root.children, Children::Hidden(_)));
    assert_eq!(model.visibility("A"), Some(Visibility::Collapsed));
    assert_eq!(model.visibility("B"), Some(Visibility::Expanded));
    assert_eq!(model.visibility("C"), Some(Visibility::Expanded));

    let drawable = model.to_drawable(&RenderOptions::default().layout());
    assert_eq!(drawable.nodes.len(), 1);
    assert!(drawable.edges.is_empty());
}

#[test]
fn test_toggle_all_then_expand_all_matches_fresh_build() {
    let doc = sample();
    let mut model = RenderModel::toggle_all(&doc);
    model.expand_everything();
    assert_eq!(model, RenderModel::build(&doc));
    assert_eq!(RenderModel::expand_all(&doc), RenderModel::build(&doc));
}

#[test]
fn test_drawable_edges_and_positions() {
    let model = RenderModel::build(&sample());
    let drawable = to_drawable(&model, &RenderOptions::default().layout());

    let names: Vec<_> = drawable.nodes.iter().map(|n| n.name.as_str()).collect();
    assert_eq!(names, ["Root", "A", "C", "B"]);
    assert_eq!(drawable.edges, vec![(0, 1), (1, 2), (0, 3)]);

    let root = drawable.node("Root").unwrap();
    assert_eq!(root.depth, 0);
    assert_eq!(root.position.y, 50.0);
    assert!(root.has_children);
    assert!(!drawable.node("C").unwrap().has_children);

    let bounds = drawable.bounds().unwrap();
    let surface = Box2D::new(Point2D::new(50.0, 50.0), Point2D::new(750.0, 550.0));
    assert!(surface.contains_inclusive(bounds.min));
    assert!(surface.contains_inclusive(bounds.max));
    assert_eq!(bounds.width(), 700.0);
}

#[test]
fn test_toggling_never_touches_the_store() {
    let mut store = TreeStore::new();
    store.create_root("Root").unwrap();
    store.add_node("Root", "A").unwrap();
    store.add_node("A", "C").unwrap();
    let before = store.clone();

    let mut model = RenderModel::build(&store.to_document());
    model.invert_all();
    model.toggle("A");
    assert_eq!(store, before);
}

#[test]
fn test_drawable_serializes() {
    let model = RenderModel::build(&sample());
    let drawable = model.to_drawable(&RenderOptions::default().layout());
    let value = serde_json::to_value(&drawable).unwrap();
    assert_eq!(value["edges"][0], serde_json::json!([0, 1]));
    assert_eq!(value["nodes"][0]["name"], "Root");
}

proptest! {
    #[test]
    fn prop_expand_is_idempotent_and_restores_build(root in arb_tree()) {
        let doc = Document::new(root);
        let fresh = RenderModel::build(&doc);

        let mut model = RenderModel::toggle_all(&doc);
        model.expand_everything();
        prop_assert_eq!(&model, &fresh);
        model.expand_everything();
        prop_assert_eq!(&model, &fresh);
    }

    #[test]
    fn prop_double_invert_is_identity(root in arb_tree()) {
        let doc = Document::new(root);
        let mut model = RenderModel::build(&doc);
        model.invert_all();
        prop_assert_eq!(model.to_document(), doc.clone());
        model.invert_all();
        prop_assert_eq!(model, RenderModel::build(&doc));
    }

    #[test]
    fn prop_drawable_is_deterministic(root in arb_tree()) {
        let model = RenderModel::build(&Document::new(root.clone()));
        let layout = RenderOptions::default().layout();
        let first = to_drawable(&model, &layout);
        let second = to_drawable(&model, &layout);
        prop_assert_eq!(first.nodes.len(), root.count());
        prop_assert_eq!(first.edges.len(), root.count() - 1);
        prop_assert_eq!(first, second);
    }
}
