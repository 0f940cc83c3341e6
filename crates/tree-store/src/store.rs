//! The canonical tree and its mutation/query operations

use log::{debug, warn};
use std::collections::HashMap;

use crate::error::{MoveRejection, TreeError};
use crate::node::{Node, NodeId};
use crate::traversal::{TraversalOrder, TreeWalker};

/// Deepest level a node may sit at, the root being level 0
///
/// The document of a tree within this limit nests at most `2 * MAX_DEPTH + 2`
/// JSON levels, which stays under the recursion limit `serde_json` applies
/// when decoding. Recursive walks over a tree are bounded by it too.
pub const MAX_DEPTH: usize = 60;

/// Internal node storage
#[derive(Debug, Clone)]
struct Slot {
    /// The node's name
    name: String,
    /// Parent node ID, `None` for the root
    parent: Option<NodeId>,
    /// Children in insertion order
    children: Vec<NodeId>,
}

/// The canonical, single-rooted tree of uniquely named nodes
///
/// Nodes live in an arena addressed by [`NodeId`]. A name index maps every
/// live name to its id and is kept consistent by every mutation, so lookups by
/// name never walk the tree.
///
/// # Example
///
/// ```
/// use tree_store::TreeStore;
///
/// let mut store = TreeStore::new();
/// store.create_root("Root").unwrap();
/// store.add_node("Root", "A").unwrap();
/// store.add_node("A", "C").unwrap();
/// store.move_node("C", "Root").unwrap();
///
/// let tree = store.get_tree().unwrap();
/// assert_eq!(tree.to_string(), "Root(A, C)");
/// ```
#[derive(Debug, Clone, Default)]
pub struct TreeStore {
    /// Arena storage for nodes, `None` marks a free slot
    slots: Vec<Option<Slot>>,
    /// Free slot indices available for reuse
    free: Vec<usize>,
    /// The root node, `None` while the tree is empty
    root: Option<NodeId>,
    /// Name -> NodeId for every live node
    index: HashMap<String, NodeId>,
}

impl TreeStore {
    /// Create an empty tree
    pub fn new() -> Self {
        Self::default()
    }

    // ------------------------------------------------------------------
    // Queries
    // ------------------------------------------------------------------

    /// The root node, `None` when the tree is empty
    pub fn root(&self) -> Option<NodeId> {
        self.root
    }

    /// Returns true if the tree has no root
    pub fn is_empty(&self) -> bool {
        self.root.is_none()
    }

    /// Number of live nodes
    pub fn len(&self) -> usize {
        self.index.len()
    }

    /// Look a node up by name
    pub fn find_by_name(&self, name: &str) -> Option<NodeId> {
        self.index.get(name).copied()
    }

    /// Returns true if some node carries `name`
    pub fn contains(&self, name: &str) -> bool {
        self.index.contains_key(name)
    }

    fn slot(&self, id: NodeId) -> Option<&Slot> {
        self.slots.get(id.get())?.as_ref()
    }

    fn slot_mut(&mut self, id: NodeId) -> Option<&mut Slot> {
        self.slots.get_mut(id.get())?.as_mut()
    }

    /// Name of a node, `None` for a dead or invalid id
    pub fn name(&self, id: NodeId) -> Option<&str> {
        self.slot(id).map(|slot| slot.name.as_str())
    }

    /// Parent of a node, `None` for the root or an invalid id
    pub fn parent(&self, id: NodeId) -> Option<NodeId> {
        self.slot(id)?.parent
    }

    /// Children of a node in insertion order
    ///
    /// Returns an empty slice for leaves and invalid ids.
    pub fn children(&self, id: NodeId) -> &[NodeId] {
        self.slot(id)
            .map(|slot| slot.children.as_slice())
            .unwrap_or(&[])
    }

    /// Depth of a node (root = 0)
    pub fn depth(&self, id: NodeId) -> usize {
        self.ancestors(id).len()
    }

    /// All ancestors of a node, from parent to root
    pub fn ancestors(&self, id: NodeId) -> Vec<NodeId> {
        let mut ancestors = Vec::new();
        let mut current = self.parent(id);
        while let Some(parent_id) = current {
            ancestors.push(parent_id);
            current = self.parent(parent_id);
        }
        ancestors
    }

    /// Levels below `id` in its subtree (a leaf has height 0)
    pub fn height(&self, id: NodeId) -> usize {
        let base = self.depth(id);
        self.walk_from(id, TraversalOrder::PreOrder)
            .map(|node| self.depth(node) - base)
            .max()
            .unwrap_or(0)
    }

    /// Check if `ancestor` is a strict ancestor of `descendant`
    pub fn is_ancestor_of(&self, ancestor: NodeId, descendant: NodeId) -> bool {
        let mut current = self.parent(descendant);
        while let Some(parent_id) = current {
            if parent_id == ancestor {
                return true;
            }
            current = self.parent(parent_id);
        }
        false
    }

    /// Walk the whole tree in the given order
    pub fn walk(&self, order: TraversalOrder) -> TreeWalker<'_> {
        TreeWalker::new(self, self.root, order)
    }

    /// Walk the subtree rooted at `start`
    pub fn walk_from(&self, start: NodeId, order: TraversalOrder) -> TreeWalker<'_> {
        let start = self.slot(start).map(|_| start);
        TreeWalker::new(self, start, order)
    }

    /// Owned copy of the subtree rooted at `id`
    pub fn subtree(&self, id: NodeId) -> Option<Node> {
        let slot = self.slot(id)?;
        Some(Node {
            name: slot.name.clone(),
            children: slot
                .children
                .iter()
                .filter_map(|&child| self.subtree(child))
                .collect(),
        })
    }

    /// The full current tree, `None` when empty
    ///
    /// The returned value is an independent copy; nothing done to it can
    /// affect the store.
    pub fn get_tree(&self) -> Option<Node> {
        self.root.and_then(|root| self.subtree(root))
    }

    // ------------------------------------------------------------------
    // Mutations
    // ------------------------------------------------------------------

    fn alloc(&mut self, name: &str, parent: Option<NodeId>) -> NodeId {
        let slot = Slot {
            name: name.to_string(),
            parent,
            children: Vec::new(),
        };
        let id = match self.free.pop() {
            Some(index) => {
                self.slots[index] = Some(slot);
                NodeId::new(index)
            }
            None => {
                self.slots.push(Some(slot));
                NodeId::new(self.slots.len() - 1)
            }
        };
        self.index.insert(name.to_string(), id);
        id
    }

    /// Create the root of an empty tree
    pub fn create_root(&mut self, name: &str) -> Result<NodeId, TreeError> {
        if let Some(root) = self.root {
            let existing = self.name(root).unwrap_or_default().to_string();
            warn!("Refusing to create root '{}': '{}' already exists", name, existing);
            return Err(TreeError::AlreadyExists(existing));
        }

        let id = self.alloc(name, None);
        self.root = Some(id);
        debug!("Created root '{}' as {}", name, id);
        Ok(id)
    }

    /// Append a new leaf named `name` as the last child of `parent_name`
    pub fn add_node(&mut self, parent_name: &str, name: &str) -> Result<NodeId, TreeError> {
        let parent = self.find_by_name(parent_name).ok_or_else(|| {
            warn!("Cannot add '{}': parent '{}' not found", name, parent_name);
            TreeError::NotFound(parent_name.to_string())
        })?;

        if self.contains(name) {
            warn!("Cannot add '{}': name already in use", name);
            return Err(TreeError::DuplicateName(name.to_string()));
        }

        if self.depth(parent) >= MAX_DEPTH {
            warn!("Cannot add '{}': '{}' is at the depth limit", name, parent_name);
            return Err(TreeError::TooDeep {
                node: name.to_string(),
                limit: MAX_DEPTH,
            });
        }

        let id = self.alloc(name, Some(parent));
        if let Some(slot) = self.slot_mut(parent) {
            slot.children.push(id);
        }
        debug!("Added '{}' under '{}'", name, parent_name);
        Ok(id)
    }

    /// Remove a node together with its whole subtree
    ///
    /// Deleting the root empties the tree.
    pub fn delete_node(&mut self, name: &str) -> Result<(), TreeError> {
        let id = self.find_by_name(name).ok_or_else(|| {
            warn!("Cannot delete '{}': not found", name);
            TreeError::NotFound(name.to_string())
        })?;

        if Some(id) == self.root {
            debug!("Deleted root '{}', tree is now empty", name);
            self.clear();
            return Ok(());
        }

        let doomed: Vec<NodeId> = self.walk_from(id, TraversalOrder::PostOrder).collect();

        if let Some(parent) = self.parent(id) {
            if let Some(slot) = self.slot_mut(parent) {
                slot.children.retain(|&child| child != id);
            }
        }

        for node in &doomed {
            if let Some(slot) = self.slots[node.get()].take() {
                self.index.remove(&slot.name);
                self.free.push(node.get());
            }
        }

        debug!("Deleted '{}' and {} descendant(s)", name, doomed.len() - 1);
        Ok(())
    }

    /// Reparent `name` (with its subtree) as the last child of `new_parent_name`
    pub fn move_node(&mut self, name: &str, new_parent_name: &str) -> Result<(), TreeError> {
        let id = self
            .find_by_name(name)
            .ok_or_else(|| TreeError::NotFound(name.to_string()))?;
        let new_parent = self
            .find_by_name(new_parent_name)
            .ok_or_else(|| TreeError::NotFound(new_parent_name.to_string()))?;

        let rejection = if id == new_parent {
            Some(MoveRejection::OwnParent)
        } else if Some(id) == self.root {
            Some(MoveRejection::Root)
        } else if self.is_ancestor_of(id, new_parent) {
            Some(MoveRejection::IntoDescendant)
        } else {
            None
        };

        if let Some(reason) = rejection {
            warn!("Rejected move of '{}' under '{}': {}", name, new_parent_name, reason);
            return Err(TreeError::InvalidMove {
                node: name.to_string(),
                new_parent: new_parent_name.to_string(),
                reason,
            });
        }

        if self.depth(new_parent) + 1 + self.height(id) > MAX_DEPTH {
            warn!("Rejected move of '{}' under '{}': too deep", name, new_parent_name);
            return Err(TreeError::TooDeep {
                node: name.to_string(),
                limit: MAX_DEPTH,
            });
        }

        if let Some(old_parent) = self.parent(id) {
            if let Some(slot) = self.slot_mut(old_parent) {
                slot.children.retain(|&child| child != id);
            }
        }
        if let Some(slot) = self.slot_mut(new_parent) {
            slot.children.push(id);
        }
        if let Some(slot) = self.slot_mut(id) {
            slot.parent = Some(new_parent);
        }

        debug!("Moved '{}' under '{}'", name, new_parent_name);
        Ok(())
    }

    /// Drop every node
    pub fn clear(&mut self) {
        self.slots.clear();
        self.free.clear();
        self.index.clear();
        self.root = None;
    }

    /// Replace the whole tree with the given one
    ///
    /// Fails with `MalformedDocument` when `root` repeats a name or is deeper
    /// than [`MAX_DEPTH`]; the store is untouched in that case.
    pub fn replace(&mut self, root: Option<&Node>) -> Result<(), TreeError> {
        let mut fresh = TreeStore::new();
        if let Some(root) = root {
            fresh.insert_subtree(root, None, 0)?;
        }
        *self = fresh;
        Ok(())
    }

    fn insert_subtree(
        &mut self,
        node: &Node,
        parent: Option<NodeId>,
        depth: usize,
    ) -> Result<NodeId, TreeError> {
        if depth > MAX_DEPTH {
            return Err(TreeError::malformed(format!(
                "tree is deeper than {MAX_DEPTH} levels"
            )));
        }
        if self.contains(&node.name) {
            return Err(TreeError::malformed(format!(
                "duplicate node name '{}'",
                node.name
            )));
        }

        let id = self.alloc(&node.name, parent);
        match parent {
            Some(parent) => {
                if let Some(slot) = self.slot_mut(parent) {
                    slot.children.push(id);
                }
            }
            None => self.root = Some(id),
        }

        for child in &node.children {
            self.insert_subtree(child, Some(id), depth + 1)?;
        }
        Ok(id)
    }
}

/// Structural equality: same names in the same shape, regardless of slot ids
impl PartialEq for TreeStore {
    fn eq(&self, other: &Self) -> bool {
        self.get_tree() == other.get_tree()
    }
}

impl Eq for TreeStore {}
