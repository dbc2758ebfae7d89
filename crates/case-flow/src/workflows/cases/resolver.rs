use super::catalog::{OptionalDossier, RequirementCatalogSet};
use super::domain::{CaseCategory, CaseTypeAttributes, RequirementGroup, UnknownCategory};

/// Resolve the requirement groups applicable to a case.
///
/// The base catalog for the category is selected first. Work-visa cases are
/// further specialized by keyword predicates over the free-text subtype and
/// country attributes: the first matching specialization replaces the base
/// catalog, and optional dossiers whose predicate matches are appended
/// afterwards. Predicates are evaluated independently, so more than one
/// dossier may be appended. Output preserves catalog declaration order.
pub fn resolve(
    catalogs: &RequirementCatalogSet,
    attrs: &CaseTypeAttributes,
) -> Result<Vec<RequirementGroup>, UnknownCategory> {
    let category = CaseCategory::parse(&attrs.category)?;

    let mut groups: Vec<RequirementGroup> = match category {
        CaseCategory::WorkVisa => work_visa_base(catalogs, attrs).to_vec(),
        other => catalogs.base_catalog(other).to_vec(),
    };

    if category == CaseCategory::WorkVisa {
        for dossier in OptionalDossier::ordered() {
            if dossier_applies(dossier, attrs) {
                groups.extend_from_slice(catalogs.optional_groups(dossier));
            }
        }
    }

    Ok(groups)
}

/// Resolve with the generic fallback catalog substituted for unknown
/// categories. Callers rendering the progress panel use this so an
/// unrecognized discriminator never surfaces as an error.
pub fn resolve_or_fallback(
    catalogs: &RequirementCatalogSet,
    attrs: &CaseTypeAttributes,
) -> (Vec<RequirementGroup>, bool) {
    match resolve(catalogs, attrs) {
        Ok(groups) => (groups, false),
        Err(_) => (catalogs.fallback().to_vec(), true),
    }
}

/// Mutually exclusive work-visa specializations; first match wins.
fn work_visa_base<'a>(
    catalogs: &'a RequirementCatalogSet,
    attrs: &CaseTypeAttributes,
) -> &'a [RequirementGroup] {
    if is_brazil_case(attrs) {
        catalogs.brazil_work_visa()
    } else if is_renewal_case(attrs) {
        catalogs.work_visa_renewal()
    } else {
        catalogs.base_catalog(CaseCategory::WorkVisa)
    }
}

fn is_brazil_case(attrs: &CaseTypeAttributes) -> bool {
    contains_any(attrs.country.as_deref(), &["brasil", "brazil"])
        || contains_any(attrs.subtype.as_deref(), &["brasil", "brazil"])
}

fn is_renewal_case(attrs: &CaseTypeAttributes) -> bool {
    contains_any(
        attrs.subtype.as_deref(),
        &["renova", "prorroga", "renewal", "1 ano"],
    )
}

fn dossier_applies(dossier: OptionalDossier, attrs: &CaseTypeAttributes) -> bool {
    let subtype = attrs.subtype.as_deref();
    match dossier {
        OptionalDossier::Investor => contains_any(subtype, &["invest"]),
        OptionalDossier::LaborDispute => contains_any(subtype, &["trabalhista", "labor"]),
        OptionalDossier::PriorResidency => contains_any(subtype, &["residen", "residên"]),
    }
}

fn contains_any(haystack: Option<&str>, needles: &[&str]) -> bool {
    match haystack {
        Some(value) => {
            let lowered = value.to_lowercase();
            needles.iter().any(|needle| lowered.contains(needle))
        }
        None => false,
    }
}
