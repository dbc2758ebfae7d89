use case_flow::workflows::cases::{
    resolve, resolve_or_fallback, steps, CaseCategory, CaseTypeAttributes, RequirementCatalogSet,
};

fn attrs(category: &str, subtype: Option<&str>, country: Option<&str>) -> CaseTypeAttributes {
    CaseTypeAttributes {
        category: category.to_string(),
        subtype: subtype.map(str::to_string),
        country: country.map(str::to_string),
    }
}

#[test]
fn resolution_is_deterministic() {
    let catalogs = RequirementCatalogSet::standard();
    let input = attrs("work_visa", Some("investidor"), Some("Brasil"));

    let first = resolve(&catalogs, &input).expect("resolves");
    let second = resolve(&catalogs, &input).expect("resolves");

    assert_eq!(first, second);
}

#[test]
fn every_category_resolves_to_a_non_empty_catalog() {
    let catalogs = RequirementCatalogSet::standard();
    let discriminators = [
        "work_visa",
        "tourism",
        "civil_action",
        "labor_action",
        "criminal_action",
        "property_sale",
        "nationality_loss",
    ];

    assert_eq!(discriminators.len(), CaseCategory::ordered().len());
    for discriminator in discriminators {
        let groups = resolve(&catalogs, &attrs(discriminator, None, None)).expect("resolves");
        assert!(
            !groups.is_empty(),
            "category {discriminator} should resolve to requirements"
        );
    }
}

#[test]
fn brazil_country_selects_the_brazil_specialization() {
    let catalogs = RequirementCatalogSet::standard();
    let groups = resolve(&catalogs, &attrs("work_visa", None, Some("Brasil"))).expect("resolves");

    assert!((5..=9).contains(&groups.len()));
    assert_eq!(groups.first().map(|g| g.step), Some(steps::CADASTRO));
    assert_eq!(groups.last().map(|g| g.step), Some(steps::FINALIZADO));
    assert!(groups
        .iter()
        .flat_map(|group| group.fields.iter())
        .any(|slot| slot.key == "procuracaoDoc"));
}

#[test]
fn renewal_subtype_selects_the_renewal_specialization() {
    let catalogs = RequirementCatalogSet::standard();
    let groups = resolve(
        &catalogs,
        &attrs("work_visa", Some("Renovação 1 ano"), Some("Portugal")),
    )
    .expect("resolves");

    assert_eq!(groups, catalogs.work_visa_renewal().to_vec());
}

#[test]
fn multiple_optional_dossiers_append_after_the_base_catalog() {
    let catalogs = RequirementCatalogSet::standard();
    let base_len = catalogs.brazil_work_visa().len();
    let groups = resolve(
        &catalogs,
        &attrs(
            "work_visa",
            Some("investidor com residência anterior"),
            Some("Brasil"),
        ),
    )
    .expect("resolves");

    assert_eq!(groups.len(), base_len + 2);
    assert_eq!(groups[..base_len].to_vec(), catalogs.brazil_work_visa().to_vec());
    let appended: Vec<&str> = groups[base_len..].iter().map(|g| g.title).collect();
    assert_eq!(appended, vec!["Dossiê de Investidor", "Residência Anterior"]);
}

#[test]
fn unknown_category_is_recoverable_via_fallback() {
    let catalogs = RequirementCatalogSet::standard();

    assert!(resolve(&catalogs, &attrs("inventario", None, None)).is_err());

    let (groups, fallback_used) = resolve_or_fallback(&catalogs, &attrs("inventario", None, None));
    assert!(fallback_used);
    assert!(!groups.is_empty());
}
