//! Owned-draft edit sessions
//!
//! Exactly one edit session exists at a time in the UI. The session
//! owns a detached [`Draft`] by value; every field change produces a
//! new draft and re-validates it synchronously, so cancel is simply
//! dropping the session. Submission is gated on a clean validation
//! result and goes through the async directory boundary; a failed
//! submit leaves the draft intact for retry.

use crate::directory::{DirectoryError, EmployeeDirectory};
use crate::hierarchy::{
    supervisor_candidates, validate, Draft, EmployeeId, EmployeeRecord, EmployeeUpdate,
    HierarchyError, HierarchyResult, NewEmployee, SupervisorOption, TreeNode, ValidationResult,
};
use thiserror::Error;
use tracing::debug;

/// Errors from the submission path
#[derive(Error, Debug)]
pub enum SessionError {
    /// The draft still has validation errors; nothing was sent
    #[error("draft has validation errors; submission blocked")]
    Invalid,

    /// The directory refused or failed the write; the draft is kept
    #[error(transparent)]
    Directory(#[from] DirectoryError),
}

/// An editing session over one draft, bound to the currently loaded tree
///
/// The tree is never mutated; after a successful submit the caller
/// reloads the roster and rebuilds it wholesale.
#[derive(Debug)]
pub struct EditSession<'t> {
    tree: &'t TreeNode,
    draft: Draft,
    validation: ValidationResult,
}

impl<'t> EditSession<'t> {
    /// Start editing an existing employee
    pub fn edit(tree: &'t TreeNode, id: EmployeeId) -> HierarchyResult<Self> {
        let node = tree
            .find(id)
            .ok_or(HierarchyError::EmployeeNotFound(id))?;
        Ok(Self::revalidated(tree, Draft::from_record(&node.record())))
    }

    /// Start creating a new employee
    ///
    /// The supervisor defaults to the hierarchy root until the user
    /// picks another candidate; a new employee has no reports, so the
    /// children check never applies.
    pub fn create(tree: &'t TreeNode) -> Self {
        Self::revalidated(
            tree,
            Draft {
                id: None,
                name: String::new(),
                title: String::new(),
                rank: None,
                supervisor: Some(tree.id),
            },
        )
    }

    fn revalidated(tree: &'t TreeNode, draft: Draft) -> Self {
        let supervisor = draft.supervisor.and_then(|id| tree.find(id));
        let validation = validate(tree, &draft, supervisor);
        EditSession {
            tree,
            draft,
            validation,
        }
    }

    /// Replace the draft's name and re-validate
    pub fn with_name(self, name: impl Into<String>) -> Self {
        let mut draft = self.draft;
        draft.name = name.into();
        Self::revalidated(self.tree, draft)
    }

    /// Replace the draft's title and re-validate
    pub fn with_title(self, title: impl Into<String>) -> Self {
        let mut draft = self.draft;
        draft.title = title.into();
        Self::revalidated(self.tree, draft)
    }

    /// Replace the draft's rank and re-validate (`None` = empty field)
    pub fn with_rank(self, rank: Option<i64>) -> Self {
        let mut draft = self.draft;
        draft.rank = rank;
        Self::revalidated(self.tree, draft)
    }

    /// Reassign the draft's supervisor and re-validate
    pub fn with_supervisor(self, supervisor: Option<EmployeeId>) -> Self {
        let mut draft = self.draft;
        draft.supervisor = supervisor;
        Self::revalidated(self.tree, draft)
    }

    /// The draft in its current state
    pub fn draft(&self) -> &Draft {
        &self.draft
    }

    /// Validation result for the current draft
    pub fn validation(&self) -> &ValidationResult {
        &self.validation
    }

    /// True once every field is clean
    pub fn can_submit(&self) -> bool {
        self.validation.form_valid
    }

    /// Candidates for the supervisor dropdown, given the draft's rank
    ///
    /// While the rank field is empty the minimum legal rank is assumed,
    /// so every employee outside the draft's own subtree qualifies.
    pub fn supervisor_options(&self) -> Vec<SupervisorOption> {
        supervisor_candidates(self.tree, self.draft.rank.unwrap_or(1), self.draft.id)
    }

    /// Send the draft through the directory
    ///
    /// Refused locally while the draft is invalid. On directory failure
    /// the error is surfaced verbatim and the session (with its draft)
    /// stays usable for retry. On success the caller is expected to
    /// reload the roster and rebuild the tree.
    pub async fn submit(
        &self,
        directory: &dyn EmployeeDirectory,
    ) -> Result<EmployeeRecord, SessionError> {
        if !self.validation.form_valid {
            return Err(SessionError::Invalid);
        }
        let rank = self.draft.rank.ok_or(SessionError::Invalid)?;

        let saved = match self.draft.id {
            Some(id) => {
                debug!(%id, "submitting employee update");
                directory
                    .update(
                        id,
                        EmployeeUpdate {
                            name: self.draft.name.clone(),
                            title: self.draft.title.clone(),
                            rank,
                            supervisor: self.draft.supervisor,
                        },
                    )
                    .await?
            }
            None => {
                debug!("submitting new employee");
                directory
                    .create(NewEmployee {
                        name: self.draft.name.clone(),
                        title: self.draft.title.clone(),
                        rank,
                        supervisor: self.draft.supervisor,
                    })
                    .await?
            }
        };
        Ok(saved)
    }
}
