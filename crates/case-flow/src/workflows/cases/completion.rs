use std::collections::HashSet;

use serde::Serialize;
use serde_json::Value;

use super::domain::{DocumentSlot, RequirementGroup};

/// Loosely-typed case record as fetched from the external record store.
/// Any field might be a document; the matcher never assumes a schema.
pub type CaseRecord = serde_json::Map<String, Value>;

/// Unsatisfied slots for one workflow step. Steps with no pending slots are
/// omitted from the report.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PendingStep {
    pub step: &'static str,
    pub missing: Vec<DocumentSlot>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CompletionReport {
    pub pending_by_step: Vec<PendingStep>,
    pub missing_count: usize,
    pub total_count: usize,
}

impl CompletionReport {
    pub fn satisfied_count(&self) -> usize {
        self.total_count - self.missing_count
    }

    pub fn pending_for_step(&self, step: &str) -> Option<&PendingStep> {
        self.pending_by_step.iter().find(|entry| entry.step == step)
    }
}

/// Match a case record against the resolved requirement groups.
///
/// Every field of the record is scanned for document-bearing values, each
/// such key is registered under several normalized aliases, and each slot
/// key is tested against that present-set. Duplicate slot keys across
/// groups count separately, matching the catalog's declared structure.
/// Unrecognized value shapes are skipped, never an error.
pub fn compute_completion(groups: &[RequirementGroup], record: &CaseRecord) -> CompletionReport {
    let present = PresentSet::from_record(record);

    let mut pending: Vec<PendingStep> = Vec::new();
    let mut total_count = 0;
    let mut missing_count = 0;

    for group in groups {
        for slot in &group.fields {
            total_count += 1;
            if present.satisfies(slot.key) {
                continue;
            }
            missing_count += 1;
            match pending.iter_mut().find(|entry| entry.step == group.step) {
                Some(entry) => entry.missing.push(*slot),
                None => pending.push(PendingStep {
                    step: group.step,
                    missing: vec![*slot],
                }),
            }
        }
    }

    CompletionReport {
        pending_by_step: pending,
        missing_count,
        total_count,
    }
}

const DOCUMENT_EXTENSIONS: &[&str] = &[
    ".pdf", ".png", ".jpg", ".jpeg", ".webp", ".heic", ".tiff", ".doc", ".docx", ".odt",
];

const STORAGE_MARKERS: &[&str] = &[
    "firebasestorage.googleapis.com",
    "storage.googleapis.com",
    "s3.amazonaws.com",
    "blob.core.windows.net",
];

/// Does this field carry an uploaded document? True when the key names a
/// document ("doc"/"file" substring) or the value itself looks like a
/// stored-object reference. Empty values never count.
pub(crate) fn is_document_bearing(key: &str, value: &Value) -> bool {
    let lowered_key = key.to_lowercase();
    let key_names_document = lowered_key.contains("doc") || lowered_key.contains("file");

    match value {
        Value::String(raw) => {
            let trimmed = raw.trim();
            !trimmed.is_empty() && (key_names_document || looks_like_stored_object(trimmed))
        }
        Value::Number(_) => key_names_document,
        Value::Bool(flag) => key_names_document && *flag,
        Value::Array(items) => key_names_document && !items.is_empty(),
        Value::Object(entries) => key_names_document && !entries.is_empty(),
        Value::Null => false,
    }
}

pub(crate) fn looks_like_stored_object(value: &str) -> bool {
    let lowered = value.to_lowercase();
    if STORAGE_MARKERS.iter().any(|marker| lowered.contains(marker)) {
        return true;
    }
    if DOCUMENT_EXTENSIONS.iter().any(|ext| lowered.ends_with(ext)) {
        return true;
    }
    (lowered.starts_with("http://") || lowered.starts_with("https://"))
        && DOCUMENT_EXTENSIONS.iter().any(|ext| lowered.contains(ext))
}

pub(crate) fn snake_to_camel(key: &str) -> String {
    let mut out = String::with_capacity(key.len());
    let mut upper_next = false;
    for ch in key.chars() {
        if ch == '_' {
            upper_next = true;
        } else if upper_next {
            out.extend(ch.to_uppercase());
            upper_next = false;
        } else {
            out.push(ch);
        }
    }
    out
}

fn strip_doc_suffix(key: &str) -> Option<&str> {
    key.strip_suffix("_doc").or_else(|| key.strip_suffix("Doc"))
}

fn squash(key: &str) -> String {
    key.to_lowercase().replace('_', "")
}

/// Normalized aliases of every document-bearing key in a record. The
/// catalog and the record do not share one naming convention, so each key
/// is registered raw, camel-cased, and with the `_doc`/`Doc` suffix
/// stripped, and membership is tested exact, lower-cased, and with
/// underscores removed.
#[derive(Debug, Default)]
pub(crate) struct PresentSet {
    raw: HashSet<String>,
    lowered: HashSet<String>,
    squashed: HashSet<String>,
}

impl PresentSet {
    pub(crate) fn from_record(record: &CaseRecord) -> Self {
        let mut set = Self::default();
        for (key, value) in record {
            if is_document_bearing(key, value) {
                set.register(key);
            }
        }
        set
    }

    fn register(&mut self, key: &str) {
        self.insert_alias(key);
        let camel = snake_to_camel(key);
        if let Some(stripped) = strip_doc_suffix(&camel) {
            self.insert_alias(stripped);
        }
        self.insert_alias(&camel);
        if let Some(stripped) = strip_doc_suffix(key) {
            self.insert_alias(stripped);
            self.insert_alias(&snake_to_camel(stripped));
        }
    }

    fn insert_alias(&mut self, alias: &str) {
        self.lowered.insert(alias.to_lowercase());
        self.squashed.insert(squash(alias));
        self.raw.insert(alias.to_string());
    }

    /// A slot is satisfied when its key (or the key minus its document
    /// suffix) hits the present-set under any membership test.
    pub(crate) fn satisfies(&self, slot_key: &str) -> bool {
        if self.matches(slot_key) {
            return true;
        }
        strip_doc_suffix(slot_key)
            .map(|stripped| self.matches(stripped))
            .unwrap_or(false)
    }

    fn matches(&self, key: &str) -> bool {
        self.raw.contains(key)
            || self.lowered.contains(&key.to_lowercase())
            || self.squashed.contains(&squash(key))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn doc_and_file_keys_are_document_bearing() {
        assert!(is_document_bearing("passaporteDoc", &json!("uploads/p.pdf")));
        assert!(is_document_bearing("contrato_file", &json!("qualquer valor")));
        assert!(!is_document_bearing("nomeCompleto", &json!("Maria Souza")));
    }

    #[test]
    fn stored_object_references_count_regardless_of_key() {
        assert!(is_document_bearing(
            "comprovante",
            &json!("https://storage.googleapis.com/casos/123/end.png")
        ));
        assert!(is_document_bearing("anexo", &json!("scans/certidao.jpeg")));
        assert!(is_document_bearing(
            "anexo",
            &json!("https://cdn.example.com/docs/peticao.pdf?versao=2")
        ));
        assert!(!is_document_bearing("observacao", &json!("aguardando cliente")));
    }

    #[test]
    fn empty_and_null_values_never_count() {
        assert!(!is_document_bearing("passaporteDoc", &json!("")));
        assert!(!is_document_bearing("passaporteDoc", &json!("   ")));
        assert!(!is_document_bearing("passaporteDoc", &json!(null)));
        assert!(!is_document_bearing("passaporteDoc", &json!(false)));
        assert!(!is_document_bearing("anexosDoc", &json!([])));
    }

    #[test]
    fn snake_keys_convert_to_camel() {
        assert_eq!(snake_to_camel("rnm_mae_doc"), "rnmMaeDoc");
        assert_eq!(snake_to_camel("passaporte"), "passaporte");
        assert_eq!(snake_to_camel("ja_camelCase"), "jaCamelCase");
    }

    #[test]
    fn aliases_absorb_naming_convention_drift() {
        for record_key in ["rnm_mae_doc", "rnmMaeDoc", "rnm_mae", "rnmMae"] {
            let mut record = CaseRecord::new();
            record.insert(record_key.to_string(), json!("uploads/rnm.pdf"));
            let present = PresentSet::from_record(&record);
            assert!(
                present.satisfies("rnmMaeDoc"),
                "record key {record_key} should satisfy slot rnmMaeDoc"
            );
        }
    }

    #[test]
    fn unrelated_keys_do_not_satisfy_slots() {
        let mut record = CaseRecord::new();
        record.insert("cpf_doc".to_string(), json!("uploads/cpf.pdf"));
        let present = PresentSet::from_record(&record);
        assert!(!present.satisfies("rnmMaeDoc"));
        assert!(present.satisfies("cpfDoc"));
    }
}
