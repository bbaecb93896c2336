//! Core hierarchy engine
//!
//! This module implements the pure-logic heart of the org chart:
//! - Flat roster -> rooted tree assembly, rebuilt wholesale per load
//! - Rank-invariant validation of drafts before any write
//! - Supervisor-candidate enumeration for the reassignment dropdown

pub mod record;
pub mod tree;
pub mod types;
pub mod validate;

// Re-export main types
pub use record::{EmployeeRecord, EmployeeUpdate, NewEmployee};
pub use tree::{build, build_partial, HierarchyError, HierarchyResult, Orphan, PreOrder, TreeNode};
pub use types::EmployeeId;
pub use validate::{
    supervisor_candidates, validate, Draft, SupervisorOption, ValidationResult,
    MSG_RANK_ABOVE_SUPERVISOR, MSG_RANK_BELOW_CHILDREN, MSG_RANK_NOT_POSITIVE, MSG_REQUIRED,
};
