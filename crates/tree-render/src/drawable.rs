//! Flattening a mirror into positioned nodes and edges.

use euclid::default::{Box2D, Point2D};
use log::trace;
use serde::{Deserialize, Serialize};

use crate::layout::{Hierarchy, Layout};
use crate::model::{RenderModel, RenderNode};

/// A visible node with its assigned position.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct LaidOutNode {
    /// Pre-order index among the visible nodes, the root being 0.
    pub id: usize,

    /// The node's name.
    pub name: String,

    /// Distance from the root.
    pub depth: usize,

    /// Assigned position.
    pub position: Point2D<f32>,

    /// Whether the node hides children.
    pub collapsed: bool,

    /// Whether the node has children, drawn or not.
    pub has_children: bool,
}

/// Everything needed to draw the visible tree.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct Drawable {
    /// Visible nodes in pre-order.
    pub nodes: Vec<LaidOutNode>,

    /// `(parent_id, child_id)` links between visible nodes.
    pub edges: Vec<(usize, usize)>,
}

impl Drawable {
    /// Returns true if there is nothing to draw.
    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Find a laid-out node by name.
    pub fn node(&self, name: &str) -> Option<&LaidOutNode> {
        self.nodes.iter().find(|node| node.name == name)
    }

    /// The smallest bounds containing every node position.
    pub fn bounds(&self) -> Option<Box2D<f32>> {
        if self.is_empty() {
            return None;
        }
        Some(Box2D::from_points(self.nodes.iter().map(|node| node.position)))
    }
}

fn collect_visible<'a>(node: &'a RenderNode, out: &mut Vec<&'a RenderNode>) {
    out.push(node);
    for child in node.visible_children() {
        collect_visible(child, out);
    }
}

/// Lay out the visible part of `model` and flatten it for drawing.
pub fn to_drawable(model: &RenderModel, layout: &impl Layout) -> Drawable {
    let Some(root) = model.root() else {
        return Drawable::default();
    };

    let hierarchy = Hierarchy::from_visible(root);
    let positions = layout.apply(&hierarchy);

    let mut visible = Vec::with_capacity(hierarchy.len());
    collect_visible(root, &mut visible);

    let nodes: Vec<LaidOutNode> = visible
        .into_iter()
        .zip(hierarchy.nodes())
        .zip(positions)
        .enumerate()
        .map(|(id, ((node, place), position))| LaidOutNode {
            id,
            name: node.name.clone(),
            depth: place.depth,
            position,
            collapsed: node.is_collapsed(),
            has_children: node.has_children(),
        })
        .collect();

    let edges = hierarchy.links();
    trace!("Laid out {} node(s), {} edge(s)", nodes.len(), edges.len());

    Drawable { nodes, edges }
}

impl RenderModel {
    /// Lay out the visible part of this model; see [`to_drawable`].
    pub fn to_drawable(&self, layout: &impl Layout) -> Drawable {
        to_drawable(self, layout)
    }
}
