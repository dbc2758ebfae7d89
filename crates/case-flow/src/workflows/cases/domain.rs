use serde::{Deserialize, Serialize};
use std::fmt;

/// Fixed enumeration of case categories handled by the office.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CaseCategory {
    WorkVisa,
    Tourism,
    CivilAction,
    LaborAction,
    CriminalAction,
    PropertySale,
    NationalityLoss,
}

impl CaseCategory {
    pub const fn ordered() -> [Self; 7] {
        [
            Self::WorkVisa,
            Self::Tourism,
            Self::CivilAction,
            Self::LaborAction,
            Self::CriminalAction,
            Self::PropertySale,
            Self::NationalityLoss,
        ]
    }

    pub const fn label(self) -> &'static str {
        match self {
            Self::WorkVisa => "Autorização de Trabalho",
            Self::Tourism => "Visto de Turismo",
            Self::CivilAction => "Ação Cível",
            Self::LaborAction => "Ação Trabalhista",
            Self::CriminalAction => "Ação Criminal",
            Self::PropertySale => "Venda de Imóvel",
            Self::NationalityLoss => "Perda de Nacionalidade",
        }
    }

    /// Parse the free-text category discriminator stored on case records.
    pub fn parse(raw: &str) -> Result<Self, UnknownCategory> {
        match raw.trim().to_ascii_lowercase().as_str() {
            "work_visa" | "work-visa" | "autorizacao_trabalho" => Ok(Self::WorkVisa),
            "tourism" | "turismo" => Ok(Self::Tourism),
            "civil_action" | "civil-action" | "acao_civel" => Ok(Self::CivilAction),
            "labor_action" | "labor-action" | "acao_trabalhista" => Ok(Self::LaborAction),
            "criminal_action" | "criminal-action" | "acao_criminal" => Ok(Self::CriminalAction),
            "property_sale" | "property-sale" | "venda_imovel" => Ok(Self::PropertySale),
            "nationality_loss" | "nationality-loss" | "perda_nacionalidade" => {
                Ok(Self::NationalityLoss)
            }
            other => Err(UnknownCategory(other.to_owned())),
        }
    }
}

/// Type discriminator derived from a case's fields; never persisted on its own.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CaseTypeAttributes {
    pub category: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub subtype: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub country: Option<String>,
}

/// One named requirement for a supporting document. `key` drives matching;
/// `label` is presentation text only.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct DocumentSlot {
    pub key: &'static str,
    pub label: &'static str,
}

/// A named cluster of document slots belonging to one workflow step.
/// Multiple groups may share a step.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RequirementGroup {
    pub title: &'static str,
    pub step: &'static str,
    pub fields: Vec<DocumentSlot>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UnknownCategory(pub String);

impl fmt::Display for UnknownCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "unknown case category '{}'", self.0)
    }
}

impl std::error::Error for UnknownCategory {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_accepts_snake_and_kebab_spellings() {
        assert_eq!(CaseCategory::parse("work_visa"), Ok(CaseCategory::WorkVisa));
        assert_eq!(CaseCategory::parse("work-visa"), Ok(CaseCategory::WorkVisa));
        assert_eq!(
            CaseCategory::parse("  Acao_Trabalhista "),
            Ok(CaseCategory::LaborAction)
        );
    }

    #[test]
    fn parse_rejects_unknown_discriminators() {
        match CaseCategory::parse("divorce") {
            Err(UnknownCategory(raw)) => assert_eq!(raw, "divorce"),
            other => panic!("expected unknown category, got {other:?}"),
        }
    }
}
