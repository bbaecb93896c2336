//! Core type definitions for the hierarchy engine

use serde::{Deserialize, Serialize};
use std::fmt;

/// Unique identifier for an employee record
///
/// Assigned by the backend directory on create; serializes as a bare
/// integer to match the directory's wire shape.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, PartialOrd, Ord)]
pub struct EmployeeId(pub u64);

impl EmployeeId {
    pub fn new(id: u64) -> Self {
        EmployeeId(id)
    }

    pub fn as_u64(&self) -> u64 {
        self.0
    }
}

impl fmt::Display for EmployeeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<u64> for EmployeeId {
    fn from(id: u64) -> Self {
        EmployeeId(id)
    }
}
