use serde::{Deserialize, Serialize};
use tree_store::Document;

/// A client request, tagged on the wire by its `op` field
///
/// `{"op": "add_node", "parent_name": "Root", "name": "A"}`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "op", rename_all = "snake_case")]
pub enum Request {
    /// Fetch the current tree
    GetTree,

    /// Create the root; the configured root name is used when `name` is absent
    CreateRoot {
        #[serde(default, skip_serializing_if = "Option::is_none")]
        name: Option<String>,
    },

    /// Append a new leaf under an existing node
    AddNode { parent_name: String, name: String },

    /// Delete a node and its subtree
    DeleteNode { node_name: String },

    /// Reparent a node and its subtree
    MoveNode {
        node_name: String,
        new_parent_name: String,
    },

    /// Structurally compare two subtrees
    CompareNodes {
        node_name1: String,
        node_name2: String,
    },

    /// Replace the tree with an uploaded document
    LoadTree { contents: String },

    /// Fetch a downloadable snapshot of the tree
    SaveTree,
}

impl Request {
    /// The wire name of this request
    pub fn op(&self) -> &'static str {
        match self {
            Request::GetTree => "get_tree",
            Request::CreateRoot { .. } => "create_root",
            Request::AddNode { .. } => "add_node",
            Request::DeleteNode { .. } => "delete_node",
            Request::MoveNode { .. } => "move_node",
            Request::CompareNodes { .. } => "compare_nodes",
            Request::LoadTree { .. } => "load_tree",
            Request::SaveTree => "save_tree",
        }
    }

    /// Returns true if this request changes the canonical tree
    pub fn is_mutation(&self) -> bool {
        matches!(
            self,
            Request::CreateRoot { .. }
                | Request::AddNode { .. }
                | Request::DeleteNode { .. }
                | Request::MoveNode { .. }
                | Request::LoadTree { .. }
        )
    }
}

/// A service response
///
/// Untagged on the wire: a tree is sent as its bare document, everything else
/// as a small object keyed by its single field.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Response {
    /// The request failed; the message is meant to be shown verbatim
    Error { error: String },

    /// Result of a comparison, empty when the subtrees match
    Differences { differences: Vec<String> },

    /// A file to hand to the user
    Download { filename: String, contents: String },

    /// An informational message with no payload
    Status { status: String },

    /// The current canonical tree
    Tree(Document),
}

impl Response {
    /// Build an error response from anything displayable
    pub fn error(message: impl ToString) -> Self {
        Response::Error {
            error: message.to_string(),
        }
    }

    /// Returns true if the request failed
    pub fn is_error(&self) -> bool {
        matches!(self, Response::Error { .. })
    }

    /// The tree carried by this response, if any
    pub fn document(&self) -> Option<&Document> {
        match self {
            Response::Tree(document) => Some(document),
            _ => None,
        }
    }
}
