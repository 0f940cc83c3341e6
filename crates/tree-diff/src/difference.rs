use derive_more::Display;
use smallvec::SmallVec;
use std::fmt;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// One of the two subtrees being compared
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Display)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum Side {
    /// The first subtree passed to the comparison
    #[display(fmt = "left")]
    Left,

    /// The second subtree passed to the comparison
    #[display(fmt = "right")]
    Right,
}

impl Side {
    /// The other side
    pub fn opposite(self) -> Self {
        match self {
            Side::Left => Side::Right,
            Side::Right => Side::Left,
        }
    }
}

/// Position of a compared pair relative to the two compared roots
///
/// Each entry is a child index, so `/0/1` is the second child of the first
/// child on both sides. The compared roots themselves sit at `/`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct ChildPath(SmallVec<[usize; 8]>);

impl ChildPath {
    /// The path of the compared roots
    pub fn root() -> Self {
        Self::default()
    }

    /// Build a path from child indices
    pub fn from_indices(indices: &[usize]) -> Self {
        Self(SmallVec::from_slice(indices))
    }

    /// The child indices of this path
    pub fn indices(&self) -> &[usize] {
        &self.0
    }

    /// Number of levels below the compared roots
    pub fn depth(&self) -> usize {
        self.0.len()
    }

    pub(crate) fn push(&mut self, index: usize) {
        self.0.push(index);
    }

    pub(crate) fn pop(&mut self) {
        self.0.pop();
    }

    pub(crate) fn child(&self, index: usize) -> Self {
        let mut path = self.clone();
        path.push(index);
        path
    }
}

impl fmt::Display for ChildPath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.0.is_empty() {
            return write!(f, "/");
        }
        for index in &self.0 {
            write!(f, "/{index}")?;
        }
        Ok(())
    }
}

/// The category of a difference, for counting and filtering
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Display)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum DifferenceKind {
    #[display(fmt = "ParentMismatch")]
    ParentMismatch,
    #[display(fmt = "ParentPresence")]
    ParentPresence,
    #[display(fmt = "ChildCount")]
    ChildCount,
    #[display(fmt = "NameMismatch")]
    NameMismatch,
    #[display(fmt = "Missing")]
    Missing,
}

/// A single structural difference between two subtrees
///
/// The `Display` form is the message shown to the user.
#[derive(Debug, Clone, PartialEq, Eq, Display)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum Difference {
    /// Both compared nodes have parents, with different names
    #[display(fmt = "Different parents: {} vs {}", left, right)]
    ParentMismatch { left: String, right: String },

    /// Exactly one of the compared nodes is the root
    #[display(fmt = "One node has a parent, the other does not ({} is the root)", root)]
    ParentPresence { root: Side },

    /// The pair at `path` has different numbers of children
    #[display(
        fmt = "Number of children differs at {}: {} has {}, {} has {}",
        path,
        left_name,
        left,
        right_name,
        right
    )]
    ChildCount {
        path: ChildPath,
        left_name: String,
        right_name: String,
        left: usize,
        right: usize,
    },

    /// Both sides have a node at `path`, under different names
    #[display(fmt = "Name mismatch at {}: {} vs {}", path, left, right)]
    NameMismatch {
        path: ChildPath,
        left: String,
        right: String,
    },

    /// A node at `path` exists on one side only
    #[display(fmt = "Missing on {} at {}: {}", side, path, present)]
    Missing {
        path: ChildPath,
        /// The side lacking the node
        side: Side,
        /// Name of the node on the side that has it
        present: String,
    },
}

impl Difference {
    /// The category of this difference
    pub fn kind(&self) -> DifferenceKind {
        match self {
            Difference::ParentMismatch { .. } => DifferenceKind::ParentMismatch,
            Difference::ParentPresence { .. } => DifferenceKind::ParentPresence,
            Difference::ChildCount { .. } => DifferenceKind::ChildCount,
            Difference::NameMismatch { .. } => DifferenceKind::NameMismatch,
            Difference::Missing { .. } => DifferenceKind::Missing,
        }
    }

    /// Where in the compared subtrees this difference was found
    ///
    /// Parent differences concern the compared roots and report `/`.
    pub fn path(&self) -> ChildPath {
        match self {
            Difference::ChildCount { path, .. }
            | Difference::NameMismatch { path, .. }
            | Difference::Missing { path, .. } => path.clone(),
            _ => ChildPath::root(),
        }
    }
}
