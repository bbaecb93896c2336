//! Orgtree Hierarchy Engine
//!
//! The pure-logic core of an org-chart admin tool: assemble a rooted
//! tree from the flat employee roster a backend directory returns,
//! validate rank and supervisor changes against the hierarchy ordering
//! invariant, enumerate legal supervisor candidates, and manage a
//! detached draft through an edit session.
//!
//! # Architecture
//!
//! - [`hierarchy`] owns the tree model, assembly, and validation; it is
//!   synchronous and side-effect free, rebuilt wholesale on every load.
//! - [`directory`] is the contract for the external roster service,
//!   the single asynchronous boundary in the system.
//! - [`session`] threads an owned draft through an edit flow, gating
//!   submission on a clean validation result.
//!
//! Rank convention: a numerically greater rank means more authority, so
//! the root carries the highest rank. Equal ranks signify peer status
//! and are legal between supervisor and report.
//!
//! # Example Usage
//!
//! ```rust
//! use orgtree::{build, validate, Draft, EmployeeId, EmployeeRecord};
//!
//! let roster = vec![
//!     EmployeeRecord::new(1u64, "Pat", "CEO", 100, None),
//!     EmployeeRecord::new(2u64, "Alice", "CTO", 90, Some(EmployeeId::new(1))),
//! ];
//! let tree = build(&roster).unwrap();
//! assert_eq!(tree.node_count(), 2);
//!
//! // A draft that outranks its supervisor is rejected before any write.
//! let mut draft = Draft::from_record(&roster[1]);
//! draft.rank = Some(101);
//! let result = validate(&tree, &draft, Some(&tree));
//! assert!(!result.form_valid);
//! assert_eq!(result.error_for("rank"), "Rank cannot be greater than supervisor's");
//! ```

#![warn(clippy::all)]

pub mod directory;
pub mod hierarchy;
pub mod session;

// Re-export main types for convenience
pub use hierarchy::{
    build, build_partial, supervisor_candidates, validate, Draft, EmployeeId, EmployeeRecord,
    EmployeeUpdate, HierarchyError, HierarchyResult, NewEmployee, Orphan, SupervisorOption,
    TreeNode, ValidationResult, MSG_RANK_ABOVE_SUPERVISOR, MSG_RANK_BELOW_CHILDREN,
    MSG_RANK_NOT_POSITIVE, MSG_REQUIRED,
};

pub use directory::{DirectoryError, DirectoryResult, EmployeeDirectory, InMemoryDirectory};

pub use session::{EditSession, SessionError};

/// Version information
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Get version string
pub fn version() -> &'static str {
    VERSION
}
