//! Employee records as exchanged with the backend directory
//!
//! Field names match the directory's JSON wire shape exactly
//! (`id`, `name`, `title`, `rank`, `supervisor`); `supervisor` is
//! `null` for the single root employee.

use super::types::EmployeeId;
use serde::{Deserialize, Serialize};

/// A flat employee record as returned by the directory's `list`/`get`
///
/// `rank` is the numeric authority level; a numerically greater rank
/// means more authority, so the root carries the highest rank in the
/// organization. Ranks are positive (>= 1).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EmployeeRecord {
    /// Unique identifier, assigned by the directory
    pub id: EmployeeId,

    /// Display name
    pub name: String,

    /// Job title
    pub title: String,

    /// Numeric authority level (greater = more authority)
    pub rank: i64,

    /// Direct supervisor; `None` identifies the root
    pub supervisor: Option<EmployeeId>,
}

impl EmployeeRecord {
    pub fn new(
        id: impl Into<EmployeeId>,
        name: impl Into<String>,
        title: impl Into<String>,
        rank: i64,
        supervisor: Option<EmployeeId>,
    ) -> Self {
        EmployeeRecord {
            id: id.into(),
            name: name.into(),
            title: title.into(),
            rank,
            supervisor,
        }
    }

    /// True for the single top-level employee (no supervisor)
    pub fn is_root(&self) -> bool {
        self.supervisor.is_none()
    }
}

/// Payload for the directory's `create` operation: a record without an
/// id (the directory assigns one)
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewEmployee {
    pub name: String,
    pub title: String,
    pub rank: i64,
    pub supervisor: Option<EmployeeId>,
}

/// Payload for the directory's `update` operation: a full replace of
/// the mutable fields
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EmployeeUpdate {
    pub name: String,
    pub title: String,
    pub rank: i64,
    pub supervisor: Option<EmployeeId>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_record_wire_shape() {
        let rec = EmployeeRecord::new(3u64, "Alice", "CTO", 90, Some(EmployeeId::new(1)));
        let json = serde_json::to_string(&rec).unwrap();
        assert_eq!(
            json,
            r#"{"id":3,"name":"Alice","title":"CTO","rank":90,"supervisor":1}"#
        );

        let back: EmployeeRecord = serde_json::from_str(&json).unwrap();
        assert_eq!(back, rec);
    }

    #[test]
    fn test_root_has_null_supervisor() {
        let json = r#"{"id":1,"name":"Pat","title":"CEO","rank":100,"supervisor":null}"#;
        let rec: EmployeeRecord = serde_json::from_str(json).unwrap();
        assert!(rec.is_root());
        assert_eq!(serde_json::to_string(&rec).unwrap(), json);
    }
}
