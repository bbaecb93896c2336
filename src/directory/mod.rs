//! Backend directory contract
//!
//! The roster lives in an external record-oriented service. This core
//! only consumes it through the [`EmployeeDirectory`] trait; the
//! backend call is the single asynchronous boundary in the system.
//! Backend failures are passed through verbatim, never retried and
//! never interpreted here.

use crate::hierarchy::{EmployeeId, EmployeeRecord, EmployeeUpdate, NewEmployee};
use async_trait::async_trait;
use thiserror::Error;

pub mod memory;

pub use memory::InMemoryDirectory;

/// Errors reported by a directory backend
#[derive(Error, Debug)]
pub enum DirectoryError {
    /// The addressed employee does not exist in the directory
    #[error("employee {0} not found")]
    NotFound(EmployeeId),

    /// The directory refused the write (server-side validation)
    #[error("write rejected by directory: {0}")]
    Rejected(String),

    /// Transport or backend failure, surfaced as-is to the caller
    #[error(transparent)]
    Backend(#[from] anyhow::Error),
}

pub type DirectoryResult<T> = Result<T, DirectoryError>;

/// Record-oriented roster service, keyed by employee id
///
/// `update` is a full replace of the mutable fields (`name`, `title`,
/// `rank`, `supervisor`). No ordering guarantee is assumed on `list`.
#[async_trait]
pub trait EmployeeDirectory: Send + Sync {
    /// Full current roster
    async fn list(&self) -> DirectoryResult<Vec<EmployeeRecord>>;

    /// A single employee by id
    async fn get(&self, id: EmployeeId) -> DirectoryResult<EmployeeRecord>;

    /// Create an employee; the directory assigns the id
    async fn create(&self, employee: NewEmployee) -> DirectoryResult<EmployeeRecord>;

    /// Replace an employee's mutable fields
    async fn update(&self, id: EmployeeId, update: EmployeeUpdate)
        -> DirectoryResult<EmployeeRecord>;

    /// Delete an employee
    async fn destroy(&self, id: EmployeeId) -> DirectoryResult<()>;
}
