//! Tree assembly from flat employee records
//!
//! The directory hands back a flat roster; the tree is rebuilt from it
//! wholesale on every load or save, never patched in place. Assembly is
//! a single pass over the records in input order, so sibling order
//! always tracks the order records arrived in.

use super::record::EmployeeRecord;
use super::types::EmployeeId;
use indexmap::IndexMap;
use rustc_hash::FxHashMap;
use thiserror::Error;
use tracing::{debug, warn};

/// Errors that can occur while assembling a hierarchy
#[derive(Error, Debug, PartialEq, Eq)]
pub enum HierarchyError {
    /// Zero or two-plus records claimed to be the root. The roster is
    /// ambiguous; no partial tree is produced.
    #[error("malformed hierarchy: found {roots} root candidates, expected exactly 1")]
    MalformedHierarchy { roots: usize },

    /// A record's declared supervisor is not present in the snapshot
    #[error("employee {id} references missing supervisor {supervisor}")]
    OrphanedRecord {
        id: EmployeeId,
        supervisor: EmployeeId,
    },

    /// Two records in the snapshot share an id
    #[error("duplicate employee id {0}")]
    DuplicateId(EmployeeId),

    /// Records whose supervisor chain never reaches the root (a
    /// supervision cycle disconnected from the root)
    #[error("{count} records unreachable from the root (supervision cycle)")]
    UnreachableRecords { count: usize },

    /// Lookup of an employee that is not in the tree
    #[error("employee {0} not found in tree")]
    EmployeeNotFound(EmployeeId),
}

pub type HierarchyResult<T> = Result<T, HierarchyError>;

/// A record that was dropped from a lenient build because its
/// supervisor is missing from the snapshot
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Orphan {
    pub id: EmployeeId,
    pub supervisor: EmployeeId,
}

/// An employee with its direct reports attached
///
/// Carries the same fields as [`EmployeeRecord`] plus `children` in
/// flat-input encounter order. There is no parent back-reference;
/// supervisor lookup goes through [`TreeNode::find`] on the root.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TreeNode {
    pub id: EmployeeId,
    pub name: String,
    pub title: String,
    pub rank: i64,
    pub supervisor: Option<EmployeeId>,
    pub children: Vec<TreeNode>,
}

impl TreeNode {
    fn from_record(record: &EmployeeRecord, children: Vec<TreeNode>) -> Self {
        TreeNode {
            id: record.id,
            name: record.name.clone(),
            title: record.title.clone(),
            rank: record.rank,
            supervisor: record.supervisor,
            children,
        }
    }

    /// Detached copy of this node's record fields, suitable as a draft seed
    pub fn record(&self) -> EmployeeRecord {
        EmployeeRecord {
            id: self.id,
            name: self.name.clone(),
            title: self.title.clone(),
            rank: self.rank,
            supervisor: self.supervisor,
        }
    }

    /// True if this employee has no direct reports
    pub fn is_leaf(&self) -> bool {
        self.children.is_empty()
    }

    /// Number of employees in this subtree, self included
    pub fn node_count(&self) -> usize {
        self.iter().count()
    }

    /// Depth-first pre-order walk over this subtree (self before children)
    ///
    /// Iterative with an explicit stack, so traversal depth is not
    /// bounded by the call stack.
    pub fn iter(&self) -> PreOrder<'_> {
        PreOrder { stack: vec![self] }
    }

    /// Find the node with the given id anywhere in this subtree
    pub fn find(&self, id: EmployeeId) -> Option<&TreeNode> {
        self.iter().find(|node| node.id == id)
    }

    /// Flatten this subtree back into records, in pre-order
    ///
    /// Every parent precedes its children, so the result rebuilds into
    /// an isomorphic tree.
    pub fn flatten(&self) -> Vec<EmployeeRecord> {
        self.iter().map(TreeNode::record).collect()
    }

    /// True if the employee exists in this subtree and is a leaf
    ///
    /// Only leaf employees are deletable: destroying a supervisor would
    /// orphan its reports.
    pub fn is_deletable(&self, id: EmployeeId) -> bool {
        self.find(id).is_some_and(TreeNode::is_leaf)
    }
}

/// Iterator for [`TreeNode::iter`]
pub struct PreOrder<'a> {
    stack: Vec<&'a TreeNode>,
}

impl<'a> Iterator for PreOrder<'a> {
    type Item = &'a TreeNode;

    fn next(&mut self) -> Option<Self::Item> {
        let node = self.stack.pop()?;
        // reversed so the leftmost child is visited first
        for child in node.children.iter().rev() {
            self.stack.push(child);
        }
        Some(node)
    }
}

impl<'a> IntoIterator for &'a TreeNode {
    type Item = &'a TreeNode;
    type IntoIter = PreOrder<'a>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

/// Assemble a rooted tree from a flat roster
///
/// Fails loudly on any structural defect: zero or multiple roots,
/// duplicate ids, a supervisor missing from the snapshot, or a
/// supervision cycle. On success the tree contains exactly one node per
/// input record.
pub fn build(records: &[EmployeeRecord]) -> HierarchyResult<TreeNode> {
    let (tree, orphans) = build_inner(records, false)?;
    debug_assert!(orphans.is_empty());
    Ok(tree)
}

/// Assemble a tree, excluding orphaned records instead of failing
///
/// A record whose supervisor is missing from the snapshot is dropped
/// (together with its subtree, which has nothing left to attach to) and
/// reported back so the caller can surface a warning. Structural errors
/// other than orphans remain fatal.
pub fn build_partial(records: &[EmployeeRecord]) -> HierarchyResult<(TreeNode, Vec<Orphan>)> {
    build_inner(records, true)
}

fn build_inner(
    records: &[EmployeeRecord],
    lenient: bool,
) -> HierarchyResult<(TreeNode, Vec<Orphan>)> {
    let mut by_id: IndexMap<EmployeeId, &EmployeeRecord> = IndexMap::with_capacity(records.len());
    for record in records {
        if by_id.insert(record.id, record).is_some() {
            return Err(HierarchyError::DuplicateId(record.id));
        }
    }

    // Single pass in input order: collect each record under its
    // supervisor, so sibling order tracks input order.
    let mut children: FxHashMap<EmployeeId, Vec<EmployeeId>> = FxHashMap::default();
    let mut roots: Vec<EmployeeId> = Vec::new();
    let mut orphans: Vec<Orphan> = Vec::new();

    for record in records {
        match record.supervisor {
            None => roots.push(record.id),
            Some(supervisor) if by_id.contains_key(&supervisor) => {
                children.entry(supervisor).or_default().push(record.id);
            }
            Some(supervisor) => {
                if !lenient {
                    return Err(HierarchyError::OrphanedRecord {
                        id: record.id,
                        supervisor,
                    });
                }
                warn!(
                    id = %record.id,
                    supervisor = %supervisor,
                    "dropping record with missing supervisor"
                );
                orphans.push(Orphan {
                    id: record.id,
                    supervisor,
                });
            }
        }
    }

    let root_id = match roots.as_slice() {
        [root] => *root,
        _ => {
            return Err(HierarchyError::MalformedHierarchy {
                roots: roots.len(),
            })
        }
    };

    let tree = assemble(root_id, &by_id, &children);

    // Anything not reachable from the root and not in a dropped orphan
    // subtree sits on a supervision cycle.
    let dropped = orphans
        .iter()
        .map(|orphan| subtree_size(orphan.id, &children))
        .sum::<usize>();
    let reachable = tree.node_count();
    if reachable + dropped != records.len() {
        return Err(HierarchyError::UnreachableRecords {
            count: records.len() - reachable - dropped,
        });
    }

    debug!(nodes = reachable, orphans = orphans.len(), "hierarchy assembled");
    Ok((tree, orphans))
}

/// Build the owned tree bottom-up with an explicit stack
///
/// Each frame is pushed twice: once to expand its children, once (after
/// every child has been assembled) to collect them into the node.
fn assemble(
    root_id: EmployeeId,
    by_id: &IndexMap<EmployeeId, &EmployeeRecord>,
    children: &FxHashMap<EmployeeId, Vec<EmployeeId>>,
) -> TreeNode {
    let mut built: FxHashMap<EmployeeId, TreeNode> = FxHashMap::default();
    let mut stack: Vec<(EmployeeId, bool)> = vec![(root_id, false)];

    while let Some((id, expanded)) = stack.pop() {
        if expanded {
            let kids = children
                .get(&id)
                .map(|ids| {
                    ids.iter()
                        .map(|child| built.remove(child).expect("child assembled before parent"))
                        .collect()
                })
                .unwrap_or_default();
            built.insert(id, TreeNode::from_record(by_id[&id], kids));
        } else {
            stack.push((id, true));
            for &child in children.get(&id).into_iter().flatten() {
                stack.push((child, false));
            }
        }
    }

    built.remove(&root_id).expect("root assembled last")
}

/// Size of the subtree hanging off `id`, self included
fn subtree_size(id: EmployeeId, children: &FxHashMap<EmployeeId, Vec<EmployeeId>>) -> usize {
    let mut count = 0;
    let mut stack = vec![id];
    while let Some(current) = stack.pop() {
        count += 1;
        stack.extend(children.get(&current).into_iter().flatten().copied());
    }
    count
}
