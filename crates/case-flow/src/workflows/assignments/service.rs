use std::sync::Arc;

use chrono::Utc;
use tracing::warn;

use crate::workflows::cases::{CaseCategory, RequirementCatalogSet};

use super::domain::{AssignmentKey, AssignmentPatch, StepAssignment};
use super::repository::{
    AssignmentRepository, CaseDirectory, NotificationPublisher, RepositoryError,
    ResponsibleAssignedNotice, UpsertOutcome, NEW_RESPONSIBLE_EVENT,
};

/// Service composing the assignment repository, the record-store directory,
/// and the notification publisher. Step display names come from the
/// requirement catalogs, which share the workflow-step addressing scheme.
pub struct StepAssignmentService<R, D, N> {
    repository: Arc<R>,
    directory: Arc<D>,
    notifications: Arc<N>,
    catalogs: Arc<RequirementCatalogSet>,
}

impl<R, D, N> StepAssignmentService<R, D, N>
where
    R: AssignmentRepository + 'static,
    D: CaseDirectory + 'static,
    N: NotificationPublisher + 'static,
{
    pub fn new(
        repository: Arc<R>,
        directory: Arc<D>,
        notifications: Arc<N>,
        catalogs: Arc<RequirementCatalogSet>,
    ) -> Self {
        Self {
            repository,
            directory,
            notifications,
            catalogs,
        }
    }

    /// Batch read across records, optionally narrowed to one step. No side
    /// effects.
    pub fn read(
        &self,
        module_type: &str,
        record_ids: &[i64],
        step_index: Option<u32>,
    ) -> Result<Vec<StepAssignment>, AssignmentServiceError> {
        let rows = self.repository.fetch(module_type, record_ids, step_index)?;
        Ok(rows)
    }

    /// Create-or-update the assignment for a triple and emit a
    /// responsible-assignment notice when the responsible changed to a new
    /// non-empty value. Notification failures are logged and swallowed;
    /// they never convert a committed write into a failure.
    pub fn upsert(
        &self,
        key: &AssignmentKey,
        patch: AssignmentPatch,
    ) -> Result<StepAssignment, AssignmentServiceError> {
        let outcome = self.repository.upsert(key, &patch, Utc::now())?;

        if let Some(notice) = self.responsible_change_notice(key, &outcome) {
            if let Err(err) = self.notifications.publish(notice) {
                warn!(
                    module_type = %key.module_type,
                    record_id = key.record_id,
                    step_index = key.step_index,
                    error = %err,
                    "responsible-assignment notification dropped"
                );
            }
        }

        Ok(outcome.assignment)
    }

    /// Idempotent removal; reports whether a row existed.
    pub fn delete(&self, key: &AssignmentKey) -> Result<bool, AssignmentServiceError> {
        let existed = self.repository.delete(key)?;
        Ok(existed)
    }

    fn responsible_change_notice(
        &self,
        key: &AssignmentKey,
        outcome: &UpsertOutcome,
    ) -> Option<ResponsibleAssignedNotice> {
        let current = outcome
            .assignment
            .responsible_name
            .as_deref()
            .unwrap_or("")
            .trim();
        if current.is_empty() {
            return None;
        }
        let previous = outcome.previous_responsible.as_deref().unwrap_or("").trim();
        if current == previous {
            return None;
        }

        let case_name = self.case_display_name(key);
        let step_name = self.step_name(&key.module_type, key.step_index);
        let due_note = outcome
            .assignment
            .due_date
            .map(|date| format!(" (prazo {date})"))
            .unwrap_or_default();
        let message = format!(
            "{current} agora é responsável pela etapa \"{step_name}\" do caso {case_name}{due_note}"
        );

        Some(ResponsibleAssignedNotice {
            event_type: NEW_RESPONSIBLE_EVENT,
            module_type: key.module_type.clone(),
            record_id: key.record_id,
            step_index: key.step_index,
            responsible_name: current.to_string(),
            case_name,
            step_name,
            due_date: outcome.assignment.due_date,
            message,
        })
    }

    fn case_display_name(&self, key: &AssignmentKey) -> String {
        match self.directory.display_name(&key.module_type, key.record_id) {
            Ok(Some(name)) => name,
            Ok(None) => format!("registro {}", key.record_id),
            Err(err) => {
                warn!(
                    module_type = %key.module_type,
                    record_id = key.record_id,
                    error = %err,
                    "display-name lookup failed, using record id"
                );
                format!("registro {}", key.record_id)
            }
        }
    }

    fn step_name(&self, module_type: &str, step_index: u32) -> String {
        CaseCategory::parse(module_type)
            .ok()
            .and_then(|category| {
                self.catalogs
                    .steps_for(category)
                    .get(step_index as usize)
                    .copied()
            })
            .map(str::to_string)
            .unwrap_or_else(|| format!("Etapa {}", step_index + 1))
    }
}

/// Error raised by the assignment service. Storage failures surface to the
/// caller as a generic write failure; notification failures never do.
#[derive(Debug, thiserror::Error)]
pub enum AssignmentServiceError {
    #[error(transparent)]
    Repository(#[from] RepositoryError),
}
