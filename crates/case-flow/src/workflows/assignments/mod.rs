//! Step assignments: responsible person, due date, and completion state
//! per `(module_type, record_id, step_index)` triple.

pub mod domain;
pub mod repository;
pub mod router;
pub mod service;

pub use domain::{AssignmentKey, AssignmentPatch, StepAssignment};
pub use repository::{
    AssignmentRepository, CaseDirectory, DirectoryError, NotificationError,
    NotificationPublisher, RepositoryError, ResponsibleAssignedNotice, UpsertOutcome,
    NEW_RESPONSIBLE_EVENT,
};
pub use router::assignment_router;
pub use service::{AssignmentServiceError, StepAssignmentService};
