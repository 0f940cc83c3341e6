//! Traversal of a [`TreeStore`] in pre-order, post-order or breadth-first order

use std::collections::{HashSet, VecDeque};

use crate::node::NodeId;
use crate::store::TreeStore;

/// Traversal order for walking the tree
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TraversalOrder {
    /// Visit parent before children (top-down)
    PreOrder,
    /// Visit children before parent (bottom-up)
    PostOrder,
    /// Visit level by level (breadth-first)
    BreadthFirst,
}

/// Iterator for traversing a store in different orders
///
/// Children are always visited in insertion order.
pub struct TreeWalker<'a> {
    store: &'a TreeStore,
    order: TraversalOrder,
    stack: Vec<NodeId>,
    queue: VecDeque<NodeId>,
    visited: HashSet<NodeId>,
}

impl<'a> TreeWalker<'a> {
    /// Create a walker starting from `start`, or an exhausted one for `None`
    pub fn new(store: &'a TreeStore, start: Option<NodeId>, order: TraversalOrder) -> Self {
        let mut stack = Vec::new();
        let mut queue = VecDeque::new();

        if let Some(start) = start {
            match order {
                TraversalOrder::BreadthFirst => queue.push_back(start),
                _ => stack.push(start),
            }
        }

        Self {
            store,
            order,
            stack,
            queue,
            visited: HashSet::new(),
        }
    }

    fn next_preorder(&mut self) -> Option<NodeId> {
        let current = self.stack.pop()?;

        // Add children in reverse order so they're popped in correct order
        for &child in self.store.children(current).iter().rev() {
            self.stack.push(child);
        }

        Some(current)
    }

    fn next_postorder(&mut self) -> Option<NodeId> {
        while let Some(&current) = self.stack.last() {
            if self.visited.contains(&current) {
                self.stack.pop();
                return Some(current);
            }

            self.visited.insert(current);

            for &child in self.store.children(current).iter().rev() {
                self.stack.push(child);
            }
        }
        None
    }

    fn next_breadthfirst(&mut self) -> Option<NodeId> {
        let current = self.queue.pop_front()?;
        self.queue.extend(self.store.children(current).iter().copied());
        Some(current)
    }
}

impl Iterator for TreeWalker<'_> {
    type Item = NodeId;

    fn next(&mut self) -> Option<Self::Item> {
        match self.order {
            TraversalOrder::PreOrder => self.next_preorder(),
            TraversalOrder::PostOrder => self.next_postorder(),
            TraversalOrder::BreadthFirst => self.next_breadthfirst(),
        }
    }
}
