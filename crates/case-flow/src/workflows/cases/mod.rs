//! Requirement catalogs, resolution, and document completion matching.

pub mod catalog;
pub mod completion;
pub mod domain;
pub mod resolver;

pub use catalog::{steps, OptionalDossier, RequirementCatalogSet};
pub use completion::{compute_completion, CaseRecord, CompletionReport, PendingStep};
pub use domain::{
    CaseCategory, CaseTypeAttributes, DocumentSlot, RequirementGroup, UnknownCategory,
};
pub use resolver::{resolve, resolve_or_fallback};
