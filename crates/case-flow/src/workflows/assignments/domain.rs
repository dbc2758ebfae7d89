use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

/// Natural unique key of a step assignment. At most one row exists per
/// triple; the repository upsert enforces this at the storage layer.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct AssignmentKey {
    pub module_type: String,
    pub record_id: i64,
    pub step_index: u32,
}

impl AssignmentKey {
    pub fn new(module_type: impl Into<String>, record_id: i64, step_index: u32) -> Self {
        Self {
            module_type: module_type.into(),
            record_id,
            step_index,
        }
    }
}

/// Responsible-person, due-date, and completion state attached to one
/// workflow step of one case.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StepAssignment {
    pub module_type: String,
    pub record_id: i64,
    pub step_index: u32,
    pub responsible_name: Option<String>,
    pub due_date: Option<NaiveDate>,
    pub is_done: bool,
    pub completed_at: Option<DateTime<Utc>>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl StepAssignment {
    /// Fresh row for a triple seen for the first time.
    pub fn new(key: &AssignmentKey, now: DateTime<Utc>) -> Self {
        Self {
            module_type: key.module_type.clone(),
            record_id: key.record_id,
            step_index: key.step_index,
            responsible_name: None,
            due_date: None,
            is_done: false,
            completed_at: None,
            created_at: now,
            updated_at: now,
        }
    }

    /// Merge the provided fields into the row. Omitted fields keep their
    /// stored value. `completed_at` is set exactly when `is_done`
    /// transitions to true and cleared when it transitions to false.
    /// Repository implementations apply this inside their atomic upsert.
    pub fn apply(&mut self, patch: &AssignmentPatch, now: DateTime<Utc>) {
        if let Some(name) = &patch.responsible_name {
            self.responsible_name = Some(name.clone());
        }
        if let Some(date) = patch.due_date {
            self.due_date = Some(date);
        }
        if let Some(done) = patch.is_done {
            if done && !self.is_done {
                self.completed_at = Some(now);
            } else if !done {
                self.completed_at = None;
            }
            self.is_done = done;
        }
        self.updated_at = now;
    }
}

/// Partial update payload for an upsert. Absent fields are untouched.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AssignmentPatch {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub responsible_name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub due_date: Option<NaiveDate>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub is_done: Option<bool>,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn key() -> AssignmentKey {
        AssignmentKey::new("work_visa", 41, 0)
    }

    #[test]
    fn apply_merges_only_provided_fields() {
        let now = Utc::now();
        let mut row = StepAssignment::new(&key(), now);
        row.apply(
            &AssignmentPatch {
                responsible_name: Some("Ana".to_string()),
                ..AssignmentPatch::default()
            },
            now,
        );

        let later = now + chrono::Duration::seconds(5);
        row.apply(
            &AssignmentPatch {
                due_date: NaiveDate::from_ymd_opt(2026, 1, 15),
                ..AssignmentPatch::default()
            },
            later,
        );

        assert_eq!(row.responsible_name.as_deref(), Some("Ana"));
        assert_eq!(row.due_date, NaiveDate::from_ymd_opt(2026, 1, 15));
        assert_eq!(row.updated_at, later);
        assert_eq!(row.created_at, now);
    }

    #[test]
    fn done_transition_sets_and_clears_completed_at() {
        let now = Utc::now();
        let mut row = StepAssignment::new(&key(), now);

        row.apply(
            &AssignmentPatch {
                is_done: Some(true),
                ..AssignmentPatch::default()
            },
            now,
        );
        assert_eq!(row.completed_at, Some(now));

        // re-asserting done keeps the original completion instant
        let later = now + chrono::Duration::seconds(30);
        row.apply(
            &AssignmentPatch {
                is_done: Some(true),
                ..AssignmentPatch::default()
            },
            later,
        );
        assert_eq!(row.completed_at, Some(now));

        row.apply(
            &AssignmentPatch {
                is_done: Some(false),
                ..AssignmentPatch::default()
            },
            later,
        );
        assert_eq!(row.completed_at, None);
        assert!(!row.is_done);
    }
}
