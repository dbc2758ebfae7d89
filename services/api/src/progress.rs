use case_flow::error::AppError;
use case_flow::workflows::cases::{
    compute_completion, resolve_or_fallback, CaseRecord, CaseTypeAttributes, RequirementCatalogSet,
};
use clap::Args;
use std::fs;
use std::path::PathBuf;

#[derive(Args, Debug)]
pub(crate) struct ProgressArgs {
    /// Case category discriminator (e.g. work_visa, civil_action)
    #[arg(long)]
    pub(crate) category: String,
    /// Free-text case subtype, tested by the specialization predicates
    #[arg(long)]
    pub(crate) subtype: Option<String>,
    /// Country attribute of the case
    #[arg(long)]
    pub(crate) country: Option<String>,
    /// Path to a JSON file holding the raw case record
    #[arg(long)]
    pub(crate) record: Option<PathBuf>,
}

pub(crate) fn run_progress(args: ProgressArgs) -> Result<(), AppError> {
    let ProgressArgs {
        category,
        subtype,
        country,
        record,
    } = args;

    let record: CaseRecord = match record {
        Some(path) => {
            let raw = fs::read_to_string(path)?;
            serde_json::from_str(&raw)?
        }
        None => CaseRecord::new(),
    };

    let catalogs = RequirementCatalogSet::standard();
    let attrs = CaseTypeAttributes {
        category: category.clone(),
        subtype,
        country,
    };

    let (groups, fallback_used) = resolve_or_fallback(&catalogs, &attrs);
    let report = compute_completion(&groups, &record);

    println!("Case progress for category '{category}'");
    if fallback_used {
        println!("Category not recognized; using the generic catalog");
    }
    println!(
        "Documents: {}/{} satisfied, {} pending",
        report.satisfied_count(),
        report.total_count,
        report.missing_count
    );

    if report.pending_by_step.is_empty() {
        println!("All required documents are present");
        return Ok(());
    }

    for entry in &report.pending_by_step {
        println!("\n{}", entry.step);
        for slot in &entry.missing {
            println!("  - {} ({})", slot.label, slot.key);
        }
    }

    Ok(())
}
