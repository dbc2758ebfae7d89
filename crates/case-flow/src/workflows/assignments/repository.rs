use chrono::{DateTime, NaiveDate, Utc};
use serde::Serialize;

use super::domain::{AssignmentKey, AssignmentPatch, StepAssignment};

/// Result of an atomic upsert, carrying what the service needs to decide
/// whether a responsible-assignment notification is due.
#[derive(Debug, Clone)]
pub struct UpsertOutcome {
    pub assignment: StepAssignment,
    pub previous_responsible: Option<String>,
    pub created: bool,
}

/// Storage abstraction for step assignments.
///
/// `upsert` is the only write primitive and must be conditional on the
/// unique triple at the storage layer (insert-or-update in one unit). A
/// separate existence check followed by an insert admits duplicate rows
/// under concurrent requests and is not a conforming implementation.
pub trait AssignmentRepository: Send + Sync {
    fn upsert(
        &self,
        key: &AssignmentKey,
        patch: &AssignmentPatch,
        now: DateTime<Utc>,
    ) -> Result<UpsertOutcome, RepositoryError>;

    /// Batch lookup for list views. `step_index` narrows to one step.
    fn fetch(
        &self,
        module_type: &str,
        record_ids: &[i64],
        step_index: Option<u32>,
    ) -> Result<Vec<StepAssignment>, RepositoryError>;

    /// Removes the row if present. Deleting an absent row is not an error;
    /// the return value reports whether a row existed.
    fn delete(&self, key: &AssignmentKey) -> Result<bool, RepositoryError>;
}

#[derive(Debug, thiserror::Error)]
pub enum RepositoryError {
    #[error("assignment store unavailable: {0}")]
    Unavailable(String),
    #[error("assignment write rejected: {0}")]
    WriteRejected(String),
}

/// Single capability required from the external record store: resolve a
/// case's display name for notification text.
pub trait CaseDirectory: Send + Sync {
    fn display_name(&self, module_type: &str, record_id: i64)
        -> Result<Option<String>, DirectoryError>;
}

#[derive(Debug, thiserror::Error)]
pub enum DirectoryError {
    #[error("record store unavailable: {0}")]
    Unavailable(String),
}

pub const NEW_RESPONSIBLE_EVENT: &str = "new_responsible";

/// Payload handed to the notification collaborator when a step gains a new
/// responsible person. Delivery and templating are external concerns.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ResponsibleAssignedNotice {
    pub event_type: &'static str,
    pub module_type: String,
    pub record_id: i64,
    pub step_index: u32,
    pub responsible_name: String,
    pub case_name: String,
    pub step_name: String,
    pub due_date: Option<NaiveDate>,
    pub message: String,
}

/// Outbound notification hook. Implementations enqueue and return; the
/// assignment write path never waits on delivery.
pub trait NotificationPublisher: Send + Sync {
    fn publish(&self, notice: ResponsibleAssignedNotice) -> Result<(), NotificationError>;
}

#[derive(Debug, thiserror::Error)]
pub enum NotificationError {
    #[error("notification transport unavailable: {0}")]
    Transport(String),
}
