use derive_more::Display;

/// Why a move request was rejected
#[derive(Debug, Clone, Copy, PartialEq, Eq, Display)]
pub enum MoveRejection {
    /// The node was asked to become its own parent
    #[display(fmt = "a node cannot become its own parent")]
    OwnParent,

    /// The new parent lives inside the subtree being moved
    #[display(fmt = "the new parent is a descendant of the node")]
    IntoDescendant,

    /// The root has no parent to be detached from
    #[display(fmt = "the root node cannot be moved")]
    Root,
}

/// Errors raised by tree mutations, queries and document decoding
///
/// Every variant is a value returned to the caller. A failed operation leaves
/// the tree exactly as it was before the call.
#[derive(Debug, Clone, PartialEq, Eq, Display)]
pub enum TreeError {
    /// A root was requested while the tree already has one
    #[display(fmt = "Root node already exists: {}", _0)]
    AlreadyExists(String),

    /// A referenced node name is absent from the tree
    #[display(fmt = "Node not found: {}", _0)]
    NotFound(String),

    /// A new node would collide with an existing name
    #[display(fmt = "A node named '{}' already exists", _0)]
    DuplicateName(String),

    /// A move would create a cycle or detach the root
    #[display(fmt = "Cannot move '{}' under '{}': {}", node, new_parent, reason)]
    InvalidMove {
        node: String,
        new_parent: String,
        reason: MoveRejection,
    },

    /// A node would sit below the deepest allowed level
    #[display(fmt = "'{}' would be deeper than the {} levels a tree may have", node, limit)]
    TooDeep { node: String, limit: usize },

    /// A document could not be decoded into a valid tree
    #[display(fmt = "Malformed document: {}", _0)]
    MalformedDocument(String),
}

impl std::error::Error for TreeError {}

impl TreeError {
    pub(crate) fn malformed(message: impl Into<String>) -> Self {
        TreeError::MalformedDocument(message.into())
    }
}
