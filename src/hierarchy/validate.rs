//! Draft validation against the hierarchy ordering invariant
//!
//! The validator is the sole enforcement point for organizational
//! validity: an employee never outranks their supervisor and is never
//! outranked by a direct report (equality means peer status and is
//! legal). It runs synchronously after every field edit and every
//! supervisor reassignment, and gates submission; the backend remains
//! the final authority on the write itself.

use super::record::EmployeeRecord;
use super::tree::TreeNode;
use super::types::EmployeeId;
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

/// Error message for an empty required field
pub const MSG_REQUIRED: &str = "This field is required";
/// Error message when a draft outranks its proposed supervisor
pub const MSG_RANK_ABOVE_SUPERVISOR: &str = "Rank cannot be greater than supervisor's";
/// Error message when a draft is outranked by one of its reports
pub const MSG_RANK_BELOW_CHILDREN: &str = "Rank must be greater than all children";
/// Error message for an absent, zero, or negative rank
pub const MSG_RANK_NOT_POSITIVE: &str = "Rank must be greater than 0";

/// An in-progress, detached copy of an employee under edit
///
/// `id` is `None` while creating a new employee; `rank` is `None` while
/// the form field is empty. The draft is owned by the edit session and
/// discarded on cancel.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Draft {
    pub id: Option<EmployeeId>,
    pub name: String,
    pub title: String,
    pub rank: Option<i64>,
    pub supervisor: Option<EmployeeId>,
}

impl Draft {
    /// Seed a draft from an existing record
    pub fn from_record(record: &EmployeeRecord) -> Self {
        Draft {
            id: Some(record.id),
            name: record.name.clone(),
            title: record.title.clone(),
            rank: Some(record.rank),
            supervisor: record.supervisor,
        }
    }
}

/// Per-field validation outcome for a draft
///
/// `field_errors` always carries the `name`, `title` and `rank` keys in
/// that order; an empty message means the field is clean. `form_valid`
/// is true iff every message is empty.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ValidationResult {
    pub field_errors: IndexMap<String, String>,
    pub form_valid: bool,
}

impl ValidationResult {
    /// The error message for a field, or `""` when the field is clean
    pub fn error_for(&self, field: &str) -> &str {
        self.field_errors.get(field).map_or("", String::as_str)
    }
}

/// Validate a draft against the tree and its proposed supervisor
///
/// Rank checks apply in precedence order, first match wins:
/// 1. the draft outranks the proposed supervisor;
/// 2. the draft is outranked by one of its direct reports (looked up by
///    the draft's id in the tree; a draft without an id has none);
/// 3. the rank is absent, zero, or negative (an absent rank never
///    satisfies the comparisons above, so it always lands here).
///
/// Pure function over the draft; never mutates the tree.
pub fn validate(tree: &TreeNode, draft: &Draft, supervisor: Option<&TreeNode>) -> ValidationResult {
    let mut field_errors = IndexMap::new();
    field_errors.insert("name".to_string(), required(&draft.name).to_string());
    field_errors.insert("title".to_string(), required(&draft.title).to_string());

    let max_child_rank = draft
        .id
        .and_then(|id| tree.find(id))
        .and_then(|node| node.children.iter().map(|child| child.rank).max());
    let rank_error = rank_error(draft.rank, supervisor.map(|s| s.rank), max_child_rank);
    field_errors.insert("rank".to_string(), rank_error.to_string());

    let form_valid = field_errors.values().all(String::is_empty);
    ValidationResult {
        field_errors,
        form_valid,
    }
}

fn required(value: &str) -> &'static str {
    if value.is_empty() {
        MSG_REQUIRED
    } else {
        ""
    }
}

fn rank_error(
    rank: Option<i64>,
    supervisor_rank: Option<i64>,
    max_child_rank: Option<i64>,
) -> &'static str {
    if let (Some(rank), Some(supervisor_rank)) = (rank, supervisor_rank) {
        if rank > supervisor_rank {
            return MSG_RANK_ABOVE_SUPERVISOR;
        }
    }
    if let (Some(rank), Some(max_child_rank)) = (rank, max_child_rank) {
        if rank < max_child_rank {
            return MSG_RANK_BELOW_CHILDREN;
        }
    }
    if rank.is_none_or(|rank| rank <= 0) {
        return MSG_RANK_NOT_POSITIVE;
    }
    ""
}

/// A selectable supervisor entry for the reassignment dropdown
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SupervisorOption {
    pub id: EmployeeId,
    pub name: String,
}

/// Enumerate every employee eligible to supervise a draft at `rank`
///
/// Pre-order walk collecting `{id, name}` for every node ranked at or
/// above `rank`. A node below `rank` is pruned together with its whole
/// subtree: by the ordering invariant none of its descendants outrank
/// it, so the prune is equivalent to a full walk plus filter. The
/// `exclude` node (the employee itself) is pruned the same way, since
/// supervising your own report chain would create a cycle.
pub fn supervisor_candidates(
    tree: &TreeNode,
    rank: i64,
    exclude: Option<EmployeeId>,
) -> Vec<SupervisorOption> {
    let mut options = Vec::new();
    let mut stack = vec![tree];
    while let Some(node) = stack.pop() {
        if node.rank < rank || Some(node.id) == exclude {
            continue; // subtree pruned
        }
        options.push(SupervisorOption {
            id: node.id,
            name: node.name.clone(),
        });
        for child in node.children.iter().rev() {
            stack.push(child);
        }
    }
    options
}
