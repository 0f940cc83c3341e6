//! Tree rendering model
//!
//! The client-side mirror of the canonical tree, annotated with per-node
//! expand/collapse state, and the layout step that turns its visible part
//! into positioned nodes and edges.
//!
//! # Core Concepts
//!
//! - **RenderModel**: deep copy of a document, rebuilt after every response
//! - **Children**: `Visible` or `Hidden` child list of a mirror node
//! - **Layout**: algorithms assigning positions to a visible hierarchy
//! - **Drawable**: positioned nodes plus parent/child edges
//!
//! # Example
//!
//! ```
//! use tree_render::prelude::*;
//! use tree_store::{Document, Node};
//!
//! let doc = Document::new(Node::with_children("Root", vec![Node::leaf("A")]));
//! let mut model = RenderModel::build(&doc);
//! model.toggle("Root");
//!
//! let drawable = model.to_drawable(&RenderOptions::default().layout());
//! assert_eq!(drawable.nodes.len(), 1);
//! assert!(drawable.nodes[0].collapsed);
//! ```

mod drawable;
pub mod layout;
mod model;
mod options;

pub use drawable::*;
pub use euclid::default::{Box2D, Point2D, Size2D};
pub use layout::*;
pub use model::*;
pub use options::*;

/// Re-export commonly used types
pub mod prelude {
    pub use crate::drawable::{to_drawable, Drawable, LaidOutNode};
    pub use crate::layout::{Layout, TreeLayout, TreeLayoutStyle};
    pub use crate::model::{RenderModel, Visibility};
    pub use crate::options::RenderOptions;
}
