use tree_store::{NodeId, TreeError, TreeStore};

use crate::difference::{ChildPath, Difference, DifferenceKind, Side};

/// Compare the subtrees rooted at `left` and `right`
///
/// This is a positional structural diff: children are paired by index, not by
/// name, so two subtrees holding the same children in a different order are
/// reported as different. Differences come out in walk order: the parent
/// context of the two nodes first, then pre-order over the paired children.
/// Comparing a node with itself yields no differences.
pub fn compare(store: &TreeStore, left: &str, right: &str) -> Result<Vec<Difference>, TreeError> {
    let left_id = store
        .find_by_name(left)
        .ok_or_else(|| TreeError::NotFound(left.to_string()))?;
    let right_id = store
        .find_by_name(right)
        .ok_or_else(|| TreeError::NotFound(right.to_string()))?;

    let mut differences = Vec::new();
    compare_parents(store, left_id, right_id, &mut differences);

    let mut path = ChildPath::root();
    compare_pair(store, left_id, right_id, &mut path, &mut differences);

    Ok(differences)
}

fn compare_parents(store: &TreeStore, left: NodeId, right: NodeId, out: &mut Vec<Difference>) {
    let name_of = |id| store.name(id).unwrap_or_default().to_string();

    match (store.parent(left), store.parent(right)) {
        (Some(a), Some(b)) if a != b => out.push(Difference::ParentMismatch {
            left: name_of(a),
            right: name_of(b),
        }),
        (Some(_), None) => out.push(Difference::ParentPresence { root: Side::Right }),
        (None, Some(_)) => out.push(Difference::ParentPresence { root: Side::Left }),
        _ => {}
    }
}

fn compare_pair(
    store: &TreeStore,
    left: NodeId,
    right: NodeId,
    path: &mut ChildPath,
    out: &mut Vec<Difference>,
) {
    if left == right {
        return;
    }

    let name_of = |id| store.name(id).unwrap_or_default().to_string();
    let left_children = store.children(left);
    let right_children = store.children(right);

    if left_children.len() != right_children.len() {
        out.push(Difference::ChildCount {
            path: path.clone(),
            left_name: name_of(left),
            right_name: name_of(right),
            left: left_children.len(),
            right: right_children.len(),
        });
    }

    let width = left_children.len().max(right_children.len());
    for i in 0..width {
        match (left_children.get(i), right_children.get(i)) {
            (Some(&l), Some(&r)) => {
                path.push(i);
                if store.name(l) != store.name(r) {
                    out.push(Difference::NameMismatch {
                        path: path.clone(),
                        left: name_of(l),
                        right: name_of(r),
                    });
                }
                compare_pair(store, l, r, path, out);
                path.pop();
            }
            (Some(&l), None) => out.push(Difference::Missing {
                path: path.child(i),
                side: Side::Right,
                present: name_of(l),
            }),
            (None, Some(&r)) => out.push(Difference::Missing {
                path: path.child(i),
                side: Side::Left,
                present: name_of(r),
            }),
            (None, None) => unreachable!("index below the longer child list"),
        }
    }
}

/// The result of comparing two named subtrees
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TreeDiff {
    /// Name of the first compared node
    left: String,

    /// Name of the second compared node
    right: String,

    /// Differences in walk order
    differences: Vec<Difference>,
}

impl TreeDiff {
    /// Compare two named subtrees of `store`
    pub fn new(store: &TreeStore, left: &str, right: &str) -> Result<Self, TreeError> {
        let differences = compare(store, left, right)?;
        Ok(Self {
            left: left.to_string(),
            right: right.to_string(),
            differences,
        })
    }

    /// Name of the first compared node
    pub fn left(&self) -> &str {
        &self.left
    }

    /// Name of the second compared node
    pub fn right(&self) -> &str {
        &self.right
    }

    /// Get the differences
    pub fn differences(&self) -> &[Difference] {
        &self.differences
    }

    /// Consume the diff, returning its differences
    pub fn into_differences(self) -> Vec<Difference> {
        self.differences
    }

    /// Check if the two subtrees differ at all
    pub fn has_changes(&self) -> bool {
        !self.differences.is_empty()
    }

    /// Get the number of differences
    pub fn len(&self) -> usize {
        self.differences.len()
    }

    /// Returns true if no differences were found
    pub fn is_empty(&self) -> bool {
        self.differences.is_empty()
    }

    /// Count differences of a given kind
    pub fn count(&self, kind: DifferenceKind) -> usize {
        self.differences.iter().filter(|d| d.kind() == kind).count()
    }

    /// The user-facing message of every difference, in order
    pub fn messages(&self) -> Vec<String> {
        self.differences.iter().map(ToString::to_string).collect()
    }
}
