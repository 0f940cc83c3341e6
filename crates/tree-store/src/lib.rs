//! Tree Store
//!
//! The canonical, single-rooted tree of uniquely named nodes together with its
//! portable document format.
//!
//! # Core Concepts
//!
//! - **TreeStore**: arena-backed tree with a name index; owns node lifetime
//! - **Node**: owned value shape of a (sub)tree, `{ name, children }`
//! - **Document**: a whole tree in wire/save form, `{}` when empty
//!
//! # Example
//!
//! ```
//! use tree_store::{Document, TreeStore};
//!
//! let mut store = TreeStore::new();
//! store.create_root("Root").unwrap();
//! store.add_node("Root", "A").unwrap();
//!
//! let json = store.to_document().to_json_string();
//! let reloaded = TreeStore::from_document(&Document::from_json_str(&json).unwrap()).unwrap();
//! assert_eq!(reloaded, store);
//! ```

pub mod document;
mod error;
mod node;
mod store;
mod traversal;

pub use document::{from_document, to_document, Document};
pub use error::{MoveRejection, TreeError};
pub use node::{Node, NodeId};
pub use store::{TreeStore, MAX_DEPTH};
pub use traversal::{TraversalOrder, TreeWalker};

/// Re-export commonly used types
pub mod prelude {
    pub use crate::{Document, Node, NodeId, TraversalOrder, TreeError, TreeStore};
}
