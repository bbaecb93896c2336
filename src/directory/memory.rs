//! In-memory directory backend
//!
//! Mirrors the production directory's observable semantics so session
//! flows can be exercised end to end without a network: monotonic id
//! assignment, full-replace updates, a server-side rank check on every
//! write, and supervisor nulling on delete. Deleting a supervisor
//! leaves its reports with no supervisor, which is exactly why the UI
//! restricts deletion to leaf employees.

use super::{DirectoryError, DirectoryResult, EmployeeDirectory};
use crate::hierarchy::{EmployeeId, EmployeeRecord, EmployeeUpdate, NewEmployee};
use async_trait::async_trait;
use indexmap::IndexMap;
use tokio::sync::RwLock;

/// Directory backed by an in-memory roster
pub struct InMemoryDirectory {
    state: RwLock<State>,
}

struct State {
    next_id: u64,
    records: IndexMap<EmployeeId, EmployeeRecord>,
}

impl InMemoryDirectory {
    /// Create an empty directory
    pub fn new() -> Self {
        InMemoryDirectory {
            state: RwLock::new(State {
                next_id: 1,
                records: IndexMap::new(),
            }),
        }
    }

    /// Create a directory pre-populated with the given roster
    pub fn seeded(records: impl IntoIterator<Item = EmployeeRecord>) -> Self {
        let records: IndexMap<EmployeeId, EmployeeRecord> =
            records.into_iter().map(|r| (r.id, r)).collect();
        let next_id = records.keys().map(|id| id.as_u64()).max().unwrap_or(0) + 1;
        InMemoryDirectory {
            state: RwLock::new(State { next_id, records }),
        }
    }
}

impl Default for InMemoryDirectory {
    fn default() -> Self {
        Self::new()
    }
}

impl State {
    /// Server-side rank validation, applied to every write
    fn check_rank(&self, rank: i64, supervisor: Option<EmployeeId>) -> DirectoryResult<()> {
        let Some(supervisor) = supervisor else {
            return Ok(());
        };
        let supervisor = self.records.get(&supervisor).ok_or_else(|| {
            DirectoryError::Rejected(format!("supervisor {supervisor} does not exist"))
        })?;
        if rank > supervisor.rank {
            return Err(DirectoryError::Rejected(
                "Supervisor must have a higher rank than the Employee".to_string(),
            ));
        }
        Ok(())
    }
}

#[async_trait]
impl EmployeeDirectory for InMemoryDirectory {
    async fn list(&self) -> DirectoryResult<Vec<EmployeeRecord>> {
        let state = self.state.read().await;
        let mut roster: Vec<EmployeeRecord> = state.records.values().cloned().collect();
        // the production directory lists the roster ordered by rank
        roster.sort_by_key(|record| record.rank);
        Ok(roster)
    }

    async fn get(&self, id: EmployeeId) -> DirectoryResult<EmployeeRecord> {
        let state = self.state.read().await;
        state
            .records
            .get(&id)
            .cloned()
            .ok_or(DirectoryError::NotFound(id))
    }

    async fn create(&self, employee: NewEmployee) -> DirectoryResult<EmployeeRecord> {
        let mut state = self.state.write().await;
        state.check_rank(employee.rank, employee.supervisor)?;
        let id = EmployeeId::new(state.next_id);
        state.next_id += 1;
        let record = EmployeeRecord {
            id,
            name: employee.name,
            title: employee.title,
            rank: employee.rank,
            supervisor: employee.supervisor,
        };
        state.records.insert(id, record.clone());
        Ok(record)
    }

    async fn update(
        &self,
        id: EmployeeId,
        update: EmployeeUpdate,
    ) -> DirectoryResult<EmployeeRecord> {
        let mut state = self.state.write().await;
        if !state.records.contains_key(&id) {
            return Err(DirectoryError::NotFound(id));
        }
        state.check_rank(update.rank, update.supervisor)?;
        let record = EmployeeRecord {
            id,
            name: update.name,
            title: update.title,
            rank: update.rank,
            supervisor: update.supervisor,
        };
        state.records.insert(id, record.clone());
        Ok(record)
    }

    async fn destroy(&self, id: EmployeeId) -> DirectoryResult<()> {
        let mut state = self.state.write().await;
        if state.records.shift_remove(&id).is_none() {
            return Err(DirectoryError::NotFound(id));
        }
        // surviving reports lose their supervisor reference
        for record in state.records.values_mut() {
            if record.supervisor == Some(id) {
                record.supervisor = None;
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn seeded() -> InMemoryDirectory {
        InMemoryDirectory::seeded(vec![
            EmployeeRecord::new(1u64, "Pat", "CEO", 100, None),
            EmployeeRecord::new(2u64, "Alice", "CTO", 90, Some(EmployeeId::new(1))),
        ])
    }

    #[tokio::test]
    async fn test_list_ordered_by_rank() {
        let directory = seeded();
        let roster = directory.list().await.unwrap();
        assert_eq!(roster.len(), 2);
        assert_eq!(roster[0].name, "Alice");
        assert_eq!(roster[1].name, "Pat");
    }

    #[tokio::test]
    async fn test_create_assigns_next_id() {
        let directory = seeded();
        let created = directory
            .create(NewEmployee {
                name: "Bob".to_string(),
                title: "Engineer".to_string(),
                rank: 50,
                supervisor: Some(EmployeeId::new(2)),
            })
            .await
            .unwrap();
        assert_eq!(created.id, EmployeeId::new(3));
        assert_eq!(directory.get(created.id).await.unwrap(), created);
    }

    #[tokio::test]
    async fn test_update_is_full_replace() {
        let directory = seeded();
        let updated = directory
            .update(
                EmployeeId::new(2),
                EmployeeUpdate {
                    name: "Alice B".to_string(),
                    title: "VP Engineering".to_string(),
                    rank: 95,
                    supervisor: Some(EmployeeId::new(1)),
                },
            )
            .await
            .unwrap();
        assert_eq!(updated.rank, 95);
        assert_eq!(directory.get(EmployeeId::new(2)).await.unwrap(), updated);
    }

    #[tokio::test]
    async fn test_rank_above_supervisor_rejected() {
        let directory = seeded();
        let err = directory
            .update(
                EmployeeId::new(2),
                EmployeeUpdate {
                    name: "Alice".to_string(),
                    title: "CTO".to_string(),
                    rank: 101,
                    supervisor: Some(EmployeeId::new(1)),
                },
            )
            .await
            .unwrap_err();
        assert!(matches!(err, DirectoryError::Rejected(_)));
    }

    #[tokio::test]
    async fn test_get_missing_is_not_found() {
        let directory = seeded();
        let err = directory.get(EmployeeId::new(99)).await.unwrap_err();
        assert!(matches!(err, DirectoryError::NotFound(id) if id == EmployeeId::new(99)));
    }

    #[tokio::test]
    async fn test_destroy_nulls_report_supervisors() {
        let directory = seeded();
        directory.destroy(EmployeeId::new(1)).await.unwrap();
        let alice = directory.get(EmployeeId::new(2)).await.unwrap();
        assert_eq!(alice.supervisor, None);
        assert!(matches!(
            directory.destroy(EmployeeId::new(1)).await.unwrap_err(),
            DirectoryError::NotFound(_)
        ));
    }
}
