//! Layout algorithms for positioning the visible nodes of a tree.
//!
//! A layout receives the visible hierarchy as a flat pre-order list and
//! returns one position per node. The only requirement placed on a layout is
//! that it is deterministic for a fixed shape and bounding box.

use euclid::default::{Box2D, Point2D, Size2D};
use serde::{Deserialize, Serialize};

use crate::model::RenderNode;

/// One node of a [`Hierarchy`].
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct HierarchyNode {
    /// Pre-order index of the parent, `None` for the root.
    pub parent: Option<usize>,

    /// Pre-order indices of the children, in child order.
    pub children: Vec<usize>,

    /// Distance from the root (root = 0).
    pub depth: usize,
}

/// The visible part of a mirror, flattened in pre-order.
///
/// Index 0 is the root; every child index is greater than its parent's.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Hierarchy {
    nodes: Vec<HierarchyNode>,
}

impl Hierarchy {
    /// Flatten the visible subtree of `root`. Hidden children are skipped.
    pub fn from_visible(root: &RenderNode) -> Self {
        let mut hierarchy = Self::default();
        hierarchy.push_visible(root, None, 0);
        hierarchy
    }

    fn push_visible(&mut self, node: &RenderNode, parent: Option<usize>, depth: usize) -> usize {
        let index = self.nodes.len();
        self.nodes.push(HierarchyNode {
            parent,
            children: Vec::new(),
            depth,
        });
        for child in node.visible_children() {
            let child_index = self.push_visible(child, Some(index), depth + 1);
            self.nodes[index].children.push(child_index);
        }
        index
    }

    /// Nodes in pre-order.
    pub fn nodes(&self) -> &[HierarchyNode] {
        &self.nodes
    }

    /// Number of nodes.
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    /// Returns true if there are no nodes.
    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Greatest depth of any node.
    pub fn max_depth(&self) -> usize {
        self.nodes.iter().map(|n| n.depth).max().unwrap_or(0)
    }

    /// Parent -> child links in pre-order of the child.
    pub fn links(&self) -> Vec<(usize, usize)> {
        self.nodes
            .iter()
            .enumerate()
            .filter_map(|(index, node)| node.parent.map(|parent| (parent, index)))
            .collect()
    }
}

/// A trait for layout algorithms.
pub trait Layout {
    /// Assign a position to every node, indexed like `hierarchy.nodes()`.
    fn apply(&self, hierarchy: &Hierarchy) -> Vec<Point2D<f32>>;

    /// Calculate the total bounds that would be occupied by the layout.
    fn calculate_bounds(&self, hierarchy: &Hierarchy) -> Option<Box2D<f32>> {
        let points = self.apply(hierarchy);
        (!points.is_empty()).then(|| Box2D::from_points(points))
    }
}

/// The orientation of a tree layout.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TreeLayoutStyle {
    /// Top-to-bottom tree (root at top).
    #[default]
    TopDown,

    /// Left-to-right tree (root at left).
    LeftToRight,

    /// Bottom-to-top tree (root at bottom).
    BottomUp,

    /// Right-to-left tree (root at right).
    RightToLeft,
}

/// Tree layout that fits a hierarchy into a bounding box.
///
/// Leaves are spread evenly across the breadth of the box in pre-order,
/// parents are centred over their first and last child, and levels are
/// spread evenly across its depth.
#[derive(Clone, Debug, PartialEq)]
pub struct TreeLayout {
    /// The style of the tree layout.
    pub style: TreeLayoutStyle,

    /// Size of the box the tree is fitted into.
    pub size: Size2D<f32>,

    /// Top-left corner of that box.
    pub origin: Point2D<f32>,
}

impl Default for TreeLayout {
    fn default() -> Self {
        Self {
            style: TreeLayoutStyle::TopDown,
            size: Size2D::new(700., 500.),
            origin: Point2D::new(50., 50.),
        }
    }
}

impl TreeLayout {
    /// Create a new tree layout with default settings.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the layout style.
    pub fn style(mut self, style: TreeLayoutStyle) -> Self {
        self.style = style;
        self
    }

    /// Set the size of the box.
    pub fn size(mut self, size: Size2D<f32>) -> Self {
        self.size = size;
        self
    }

    /// Set the starting origin.
    pub fn origin(mut self, origin: Point2D<f32>) -> Self {
        self.origin = origin;
        self
    }

    /// Slot of every node along the breadth axis, leaves at whole numbers.
    fn breadth_slots(hierarchy: &Hierarchy) -> (Vec<f32>, usize) {
        let nodes = hierarchy.nodes();
        let mut slots = vec![0.0; nodes.len()];

        let mut leaves = 0;
        for (index, node) in nodes.iter().enumerate() {
            if node.children.is_empty() {
                slots[index] = leaves as f32;
                leaves += 1;
            }
        }

        // Children always follow their parent in pre-order
        for index in (0..nodes.len()).rev() {
            let children = &nodes[index].children;
            if let (Some(&first), Some(&last)) = (children.first(), children.last()) {
                slots[index] = (slots[first] + slots[last]) / 2.0;
            }
        }

        (slots, leaves)
    }
}

impl Layout for TreeLayout {
    fn apply(&self, hierarchy: &Hierarchy) -> Vec<Point2D<f32>> {
        if hierarchy.is_empty() {
            return Vec::new();
        }

        let (slots, leaves) = Self::breadth_slots(hierarchy);
        let max_depth = hierarchy.max_depth();

        let (breadth_extent, depth_extent) = match self.style {
            TreeLayoutStyle::TopDown | TreeLayoutStyle::BottomUp => {
                (self.size.width, self.size.height)
            }
            TreeLayoutStyle::LeftToRight | TreeLayoutStyle::RightToLeft => {
                (self.size.height, self.size.width)
            }
        };

        hierarchy
            .nodes()
            .iter()
            .zip(slots)
            .map(|(node, slot)| {
                let breadth = if leaves > 1 {
                    slot / (leaves - 1) as f32 * breadth_extent
                } else {
                    breadth_extent / 2.0
                };
                let depth = if max_depth > 0 {
                    node.depth as f32 / max_depth as f32 * depth_extent
                } else {
                    0.0
                };

                let (x, y) = match self.style {
                    TreeLayoutStyle::TopDown => (breadth, depth),
                    TreeLayoutStyle::BottomUp => (breadth, depth_extent - depth),
                    TreeLayoutStyle::LeftToRight => (depth, breadth),
                    TreeLayoutStyle::RightToLeft => (depth_extent - depth, breadth),
                };
                Point2D::new(self.origin.x + x, self.origin.y + y)
            })
            .collect()
    }
}
