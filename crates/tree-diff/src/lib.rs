// Structural comparison of subtrees
// This crate computes positional differences between two named subtrees

mod compare;
mod difference;

pub use compare::{compare, TreeDiff};
pub use difference::{ChildPath, Difference, DifferenceKind, Side};
