//! Client-side mirror of the tree with per-node collapse state.
//!
//! A [`RenderModel`] is always built from a [`Document`] copy of the
//! canonical tree and never refers back to the store, so toggling visibility
//! here cannot change canonical state.

use derive_more::Display;
use log::{debug, trace};
use tree_store::{Document, Node};

/// Visibility state of a single mirror node.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Display)]
pub enum Visibility {
    /// Children are shown (the state of every node after a fresh build).
    #[display(fmt = "expanded")]
    Expanded,

    /// Children are kept aside and not drawn.
    #[display(fmt = "collapsed")]
    Collapsed,
}

/// The children of a mirror node, tagged with whether they are drawn.
///
/// Collapsing moves the list into `Hidden` instead of dropping it, so
/// expanding again needs no re-fetch.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Children {
    /// Children are drawn.
    Visible(Vec<RenderNode>),

    /// Children are retained but not drawn.
    Hidden(Vec<RenderNode>),
}

impl Default for Children {
    fn default() -> Self {
        Children::Visible(Vec::new())
    }
}

/// A node of the mirror.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct RenderNode {
    /// The node's name.
    pub name: String,

    /// Children and their visibility.
    pub children: Children,
}

impl RenderNode {
    /// Deep-copy a canonical node, every level expanded.
    pub fn from_node(node: &Node) -> Self {
        Self {
            name: node.name.clone(),
            children: Children::Visible(node.children.iter().map(RenderNode::from_node).collect()),
        }
    }

    /// The node's visibility state.
    pub fn visibility(&self) -> Visibility {
        match self.children {
            Children::Visible(_) => Visibility::Expanded,
            Children::Hidden(_) => Visibility::Collapsed,
        }
    }

    /// Returns true if the node's children are hidden.
    pub fn is_collapsed(&self) -> bool {
        self.visibility() == Visibility::Collapsed
    }

    /// Children that are drawn; empty when collapsed.
    pub fn visible_children(&self) -> &[RenderNode] {
        match &self.children {
            Children::Visible(children) => children,
            Children::Hidden(_) => &[],
        }
    }

    /// All children, drawn or not.
    pub fn all_children(&self) -> &[RenderNode] {
        match &self.children {
            Children::Visible(children) | Children::Hidden(children) => children,
        }
    }

    fn all_children_mut(&mut self) -> &mut Vec<RenderNode> {
        match &mut self.children {
            Children::Visible(children) | Children::Hidden(children) => children,
        }
    }

    /// Returns true if the node has children, drawn or not.
    pub fn has_children(&self) -> bool {
        !self.all_children().is_empty()
    }

    /// Flip this node between expanded and collapsed.
    ///
    /// A leaf has nothing to hide and stays expanded.
    pub fn toggle(&mut self) -> Visibility {
        self.children = match std::mem::take(&mut self.children) {
            Children::Visible(children) if !children.is_empty() => Children::Hidden(children),
            Children::Visible(children) => Children::Visible(children),
            Children::Hidden(children) => Children::Visible(children),
        };
        self.visibility()
    }

    /// Flip every node of this subtree.
    ///
    /// Each node is toggled first, then the recursion continues into
    /// whichever child set is current after that toggle.
    pub fn invert_all(&mut self) {
        self.toggle();
        for child in self.all_children_mut() {
            child.invert_all();
        }
    }

    /// Expand every node of this subtree.
    pub fn expand_all(&mut self) {
        if self.is_collapsed() {
            self.toggle();
        }
        for child in self.all_children_mut() {
            child.expand_all();
        }
    }

    /// Find a node by name anywhere in this subtree, hidden parts included.
    pub fn find_mut(&mut self, name: &str) -> Option<&mut RenderNode> {
        if self.name == name {
            return Some(self);
        }
        self.all_children_mut()
            .iter_mut()
            .find_map(|child| child.find_mut(name))
    }

    /// Find a node by name anywhere in this subtree, hidden parts included.
    pub fn find(&self, name: &str) -> Option<&RenderNode> {
        if self.name == name {
            return Some(self);
        }
        self.all_children().iter().find_map(|child| child.find(name))
    }

    /// The full shape of this subtree as a canonical node, ignoring visibility.
    pub fn to_node(&self) -> Node {
        Node::with_children(
            self.name.clone(),
            self.all_children().iter().map(RenderNode::to_node).collect(),
        )
    }

    /// Count nodes that would be drawn, this one included.
    pub fn visible_count(&self) -> usize {
        1 + self
            .visible_children()
            .iter()
            .map(RenderNode::visible_count)
            .sum::<usize>()
    }
}

/// The client's mirror of the whole tree.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct RenderModel {
    root: Option<RenderNode>,
}

impl RenderModel {
    /// Deep-copy a document into a fresh mirror, all nodes expanded.
    pub fn build(document: &Document) -> Self {
        let root = document.root().map(RenderNode::from_node);
        trace!(
            "Built render model with {} visible node(s)",
            root.as_ref().map_or(0, RenderNode::visible_count)
        );
        Self { root }
    }

    /// Fresh mirror with every node's state inverted.
    ///
    /// Since a fresh build is fully expanded, this collapses every node that
    /// has children.
    pub fn toggle_all(document: &Document) -> Self {
        let mut model = Self::build(document);
        model.invert_all();
        model
    }

    /// Fresh mirror with every hidden child list restored.
    pub fn expand_all(document: &Document) -> Self {
        let mut model = Self::build(document);
        model.expand_everything();
        model
    }

    /// The mirror's root, `None` for the empty tree.
    pub fn root(&self) -> Option<&RenderNode> {
        self.root.as_ref()
    }

    /// Returns true if the mirror holds no tree.
    pub fn is_empty(&self) -> bool {
        self.root.is_none()
    }

    /// Toggle a single node by name.
    ///
    /// Returns the node's new state, or `None` if no node has that name.
    pub fn toggle(&mut self, name: &str) -> Option<Visibility> {
        let node = self.root.as_mut()?.find_mut(name)?;
        let state = node.toggle();
        debug!("Toggled '{}' to {}", name, state);
        Some(state)
    }

    /// Visibility of a node by name.
    pub fn visibility(&self, name: &str) -> Option<Visibility> {
        self.root.as_ref()?.find(name).map(RenderNode::visibility)
    }

    /// Invert the state of every node in place.
    pub fn invert_all(&mut self) {
        if let Some(root) = self.root.as_mut() {
            root.invert_all();
        }
    }

    /// Expand every node in place.
    pub fn expand_everything(&mut self) {
        if let Some(root) = self.root.as_mut() {
            root.expand_all();
        }
    }

    /// The full tree shape mirrored here, as a document.
    pub fn to_document(&self) -> Document {
        Document(self.root.as_ref().map(RenderNode::to_node))
    }
}
