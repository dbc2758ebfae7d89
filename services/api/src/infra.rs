use case_flow::workflows::assignments::{
    AssignmentKey, AssignmentPatch, AssignmentRepository, CaseDirectory, DirectoryError,
    NotificationError, NotificationPublisher, RepositoryError, ResponsibleAssignedNotice,
    StepAssignment, UpsertOutcome,
};
use chrono::{DateTime, Utc};
use metrics_exporter_prometheus::PrometheusHandle;
use std::collections::hash_map::Entry;
use std::collections::HashMap;
use std::sync::atomic::AtomicBool;
use std::sync::{Arc, Mutex};

#[derive(Clone)]
pub(crate) struct AppState {
    pub(crate) readiness: Arc<AtomicBool>,
    pub(crate) metrics: Arc<PrometheusHandle>,
}

/// In-memory assignment store. The map entry API performs the conditional
/// insert-or-update under one lock, so the unique-triple invariant holds
/// without a separate existence check.
#[derive(Default, Clone)]
pub(crate) struct InMemoryAssignmentRepository {
    rows: Arc<Mutex<HashMap<AssignmentKey, StepAssignment>>>,
}

impl AssignmentRepository for InMemoryAssignmentRepository {
    fn upsert(
        &self,
        key: &AssignmentKey,
        patch: &AssignmentPatch,
        now: DateTime<Utc>,
    ) -> Result<UpsertOutcome, RepositoryError> {
        let mut guard = self.rows.lock().expect("assignment mutex poisoned");
        let outcome = match guard.entry(key.clone()) {
            Entry::Occupied(mut entry) => {
                let previous_responsible = entry.get().responsible_name.clone();
                entry.get_mut().apply(patch, now);
                UpsertOutcome {
                    assignment: entry.get().clone(),
                    previous_responsible,
                    created: false,
                }
            }
            Entry::Vacant(entry) => {
                let mut row = StepAssignment::new(key, now);
                row.apply(patch, now);
                UpsertOutcome {
                    assignment: entry.insert(row).clone(),
                    previous_responsible: None,
                    created: true,
                }
            }
        };
        Ok(outcome)
    }

    fn fetch(
        &self,
        module_type: &str,
        record_ids: &[i64],
        step_index: Option<u32>,
    ) -> Result<Vec<StepAssignment>, RepositoryError> {
        let guard = self.rows.lock().expect("assignment mutex poisoned");
        let mut rows: Vec<StepAssignment> = guard
            .values()
            .filter(|row| row.module_type == module_type)
            .filter(|row| record_ids.contains(&row.record_id))
            .filter(|row| step_index.map(|index| row.step_index == index).unwrap_or(true))
            .cloned()
            .collect();
        rows.sort_by_key(|row| (row.record_id, row.step_index));
        Ok(rows)
    }

    fn delete(&self, key: &AssignmentKey) -> Result<bool, RepositoryError> {
        let mut guard = self.rows.lock().expect("assignment mutex poisoned");
        Ok(guard.remove(key).is_some())
    }
}

/// Record-store stand-in holding case display names for notification text.
#[derive(Default, Clone)]
pub(crate) struct InMemoryCaseDirectory {
    names: Arc<Mutex<HashMap<(String, i64), String>>>,
}

impl InMemoryCaseDirectory {
    #[allow(dead_code)]
    pub(crate) fn register(&self, module_type: &str, record_id: i64, name: &str) {
        self.names
            .lock()
            .expect("directory mutex poisoned")
            .insert((module_type.to_string(), record_id), name.to_string());
    }
}

impl CaseDirectory for InMemoryCaseDirectory {
    fn display_name(
        &self,
        module_type: &str,
        record_id: i64,
    ) -> Result<Option<String>, DirectoryError> {
        let guard = self.names.lock().expect("directory mutex poisoned");
        Ok(guard.get(&(module_type.to_string(), record_id)).cloned())
    }
}

/// Enqueue-only publisher retaining emitted notices for inspection.
#[derive(Default, Clone)]
pub(crate) struct InMemoryNotificationPublisher {
    notices: Arc<Mutex<Vec<ResponsibleAssignedNotice>>>,
}

impl InMemoryNotificationPublisher {
    #[allow(dead_code)]
    pub(crate) fn notices(&self) -> Vec<ResponsibleAssignedNotice> {
        self.notices
            .lock()
            .expect("notification mutex poisoned")
            .clone()
    }
}

impl NotificationPublisher for InMemoryNotificationPublisher {
    fn publish(&self, notice: ResponsibleAssignedNotice) -> Result<(), NotificationError> {
        self.notices
            .lock()
            .expect("notification mutex poisoned")
            .push(notice);
        Ok(())
    }
}
