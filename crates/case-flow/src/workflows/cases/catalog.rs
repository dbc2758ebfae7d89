use std::collections::HashMap;

use super::domain::{CaseCategory, DocumentSlot, RequirementGroup};

/// Workflow step names shared by the catalogs and the step-assignment
/// addressing scheme. Declaration order here is display order.
pub mod steps {
    pub const CADASTRO: &str = "Cadastro de Documentos";
    pub const PROTOCOLO: &str = "Protocolo do Pedido";
    pub const ANALISE: &str = "Análise do Órgão";
    pub const EMISSAO: &str = "Emissão de Documentos";
    pub const FINALIZADO: &str = "Processo Finalizado";
}

/// Optional requirement dossiers appended on top of a base catalog when the
/// case's subtype matches their predicate. Predicates live in the resolver;
/// the catalog only holds the data.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum OptionalDossier {
    Investor,
    LaborDispute,
    PriorResidency,
}

impl OptionalDossier {
    pub const fn ordered() -> [Self; 3] {
        [Self::Investor, Self::LaborDispute, Self::PriorResidency]
    }
}

/// Immutable set of requirement catalogs, built once at process start and
/// passed by reference wherever requirements are resolved.
#[derive(Debug, Clone)]
pub struct RequirementCatalogSet {
    base: HashMap<CaseCategory, Vec<RequirementGroup>>,
    brazil_work_visa: Vec<RequirementGroup>,
    work_visa_renewal: Vec<RequirementGroup>,
    optional: HashMap<OptionalDossier, Vec<RequirementGroup>>,
    fallback: Vec<RequirementGroup>,
}

impl RequirementCatalogSet {
    pub fn standard() -> Self {
        let mut base = HashMap::new();
        base.insert(CaseCategory::WorkVisa, work_visa_groups());
        base.insert(CaseCategory::Tourism, tourism_groups());
        base.insert(CaseCategory::CivilAction, civil_action_groups());
        base.insert(CaseCategory::LaborAction, labor_action_groups());
        base.insert(CaseCategory::CriminalAction, criminal_action_groups());
        base.insert(CaseCategory::PropertySale, property_sale_groups());
        base.insert(CaseCategory::NationalityLoss, nationality_loss_groups());

        let mut optional = HashMap::new();
        optional.insert(OptionalDossier::Investor, investor_groups());
        optional.insert(OptionalDossier::LaborDispute, labor_dispute_groups());
        optional.insert(OptionalDossier::PriorResidency, prior_residency_groups());

        Self {
            base,
            brazil_work_visa: brazil_work_visa_groups(),
            work_visa_renewal: work_visa_renewal_groups(),
            optional,
            fallback: fallback_groups(),
        }
    }

    pub fn base_catalog(&self, category: CaseCategory) -> &[RequirementGroup] {
        self.base
            .get(&category)
            .map(Vec::as_slice)
            .unwrap_or(&self.fallback)
    }

    pub fn brazil_work_visa(&self) -> &[RequirementGroup] {
        &self.brazil_work_visa
    }

    pub fn work_visa_renewal(&self) -> &[RequirementGroup] {
        &self.work_visa_renewal
    }

    pub fn optional_groups(&self, dossier: OptionalDossier) -> &[RequirementGroup] {
        self.optional
            .get(&dossier)
            .map(Vec::as_slice)
            .unwrap_or_default()
    }

    /// Catalog used when the category discriminator is unrecognized.
    pub fn fallback(&self) -> &[RequirementGroup] {
        &self.fallback
    }

    /// Distinct step names for a category, in catalog declaration order.
    /// Step indexes used by the assignment store address this list.
    pub fn steps_for(&self, category: CaseCategory) -> Vec<&'static str> {
        let mut names: Vec<&'static str> = Vec::new();
        for group in self.base_catalog(category) {
            if !names.contains(&group.step) {
                names.push(group.step);
            }
        }
        names
    }
}

fn group(
    title: &'static str,
    step: &'static str,
    fields: &[(&'static str, &'static str)],
) -> RequirementGroup {
    RequirementGroup {
        title,
        step,
        fields: fields
            .iter()
            .map(|(key, label)| DocumentSlot { key, label })
            .collect(),
    }
}

fn work_visa_groups() -> Vec<RequirementGroup> {
    vec![
        group(
            "Identificação do Requerente",
            steps::CADASTRO,
            &[
                ("passaporteDoc", "Passaporte válido"),
                ("fotoDoc", "Foto 3x4 recente"),
            ],
        ),
        group(
            "Vínculo de Trabalho",
            steps::CADASTRO,
            &[
                ("contratoTrabalhoDoc", "Contrato de trabalho"),
                ("qualificacaoProfissionalDoc", "Comprovante de qualificação profissional"),
            ],
        ),
        group(
            "Protocolo",
            steps::PROTOCOLO,
            &[("protocoloPedidoDoc", "Protocolo do pedido")],
        ),
        group(
            "Encerramento",
            steps::FINALIZADO,
            &[("deferimentoDoc", "Publicação do deferimento")],
        ),
    ]
}

fn brazil_work_visa_groups() -> Vec<RequirementGroup> {
    vec![
        group(
            "Identificação do Requerente",
            steps::CADASTRO,
            &[
                ("passaporteDoc", "Passaporte válido"),
                ("cpfDoc", "CPF"),
                ("fotoDoc", "Foto 3x4 recente"),
                ("comprovanteEnderecoDoc", "Comprovante de endereço"),
            ],
        ),
        group(
            "Documentos da Empresa",
            steps::CADASTRO,
            &[
                ("contratoTrabalhoDoc", "Contrato de trabalho"),
                ("cartaoCnpjDoc", "Cartão CNPJ da empresa"),
                ("gruRecolhimentoDoc", "GRU de recolhimento"),
            ],
        ),
        group(
            "Certidões",
            steps::CADASTRO,
            &[
                ("antecedentesCriminaisDoc", "Certidão de antecedentes criminais"),
                ("certidaoNascimentoDoc", "Certidão de nascimento"),
            ],
        ),
        group(
            "Traduções e Procuração",
            steps::CADASTRO,
            &[
                ("traducaoJuramentadaDoc", "Tradução juramentada"),
                ("procuracaoDoc", "Procuração"),
            ],
        ),
        group(
            "Protocolo no MJSP",
            steps::PROTOCOLO,
            &[("protocoloMjspDoc", "Protocolo no MJSP")],
        ),
        group(
            "Registro e Carteira",
            steps::EMISSAO,
            &[
                ("rnmDoc", "Registro Nacional Migratório"),
                ("crnmDoc", "Carteira de Registro Nacional Migratório"),
            ],
        ),
        group(
            "Encerramento",
            steps::FINALIZADO,
            &[("publicacaoDouDoc", "Publicação no DOU")],
        ),
    ]
}

fn work_visa_renewal_groups() -> Vec<RequirementGroup> {
    vec![
        group(
            "Documentos do Titular",
            steps::CADASTRO,
            &[
                ("passaporteDoc", "Passaporte válido"),
                ("crnmAtualDoc", "CRNM vigente"),
                ("comprovanteEnderecoDoc", "Comprovante de endereço"),
            ],
        ),
        group(
            "Vínculo Vigente",
            steps::CADASTRO,
            &[
                ("contratoVigenteDoc", "Contrato de trabalho vigente"),
                ("gruRecolhimentoDoc", "GRU de recolhimento"),
            ],
        ),
        group(
            "Protocolo da Prorrogação",
            steps::PROTOCOLO,
            &[("protocoloProrrogacaoDoc", "Protocolo da prorrogação")],
        ),
    ]
}

fn tourism_groups() -> Vec<RequirementGroup> {
    vec![
        group(
            "Identificação",
            steps::CADASTRO,
            &[
                ("passaporteDoc", "Passaporte válido"),
                ("fotoDoc", "Foto 3x4 recente"),
                ("comprovanteRendaDoc", "Comprovante de renda"),
            ],
        ),
        group(
            "Viagem",
            steps::CADASTRO,
            &[
                ("passagemDoc", "Passagem de ida e volta"),
                ("reservaHospedagemDoc", "Reserva de hospedagem"),
            ],
        ),
        group(
            "Encerramento",
            steps::FINALIZADO,
            &[("vistoEmitidoDoc", "Visto emitido")],
        ),
    ]
}

fn civil_action_groups() -> Vec<RequirementGroup> {
    vec![
        group(
            "Partes e Representação",
            steps::CADASTRO,
            &[
                ("rgDoc", "RG"),
                ("cpfDoc", "CPF"),
                ("procuracaoDoc", "Procuração"),
            ],
        ),
        group(
            "Provas",
            steps::CADASTRO,
            &[("provasDocumentaisDoc", "Provas documentais")],
        ),
        group(
            "Distribuição",
            steps::PROTOCOLO,
            &[
                ("peticaoInicialDoc", "Petição inicial"),
                ("custasIniciaisDoc", "Comprovante de custas iniciais"),
            ],
        ),
        group(
            "Encerramento",
            steps::FINALIZADO,
            &[("sentencaDoc", "Sentença")],
        ),
    ]
}

fn labor_action_groups() -> Vec<RequirementGroup> {
    vec![
        group(
            "Vínculo Empregatício",
            steps::CADASTRO,
            &[
                ("ctpsDoc", "CTPS"),
                ("contratoTrabalhoDoc", "Contrato de trabalho"),
                ("holeritesDoc", "Holerites"),
            ],
        ),
        group(
            "Rescisão",
            steps::CADASTRO,
            &[("termoRescisaoDoc", "Termo de rescisão")],
        ),
        group(
            "Distribuição",
            steps::PROTOCOLO,
            &[("reclamacaoTrabalhistaDoc", "Reclamação trabalhista")],
        ),
        group(
            "Encerramento",
            steps::FINALIZADO,
            &[("acordoOuSentencaDoc", "Acordo ou sentença")],
        ),
    ]
}

fn criminal_action_groups() -> Vec<RequirementGroup> {
    vec![
        group(
            "Identificação do Réu",
            steps::CADASTRO,
            &[("rgDoc", "RG"), ("cpfDoc", "CPF")],
        ),
        group(
            "Peças do Processo",
            steps::CADASTRO,
            &[
                ("denunciaDoc", "Denúncia"),
                ("procuracaoDoc", "Procuração"),
            ],
        ),
        group(
            "Andamento",
            steps::ANALISE,
            &[("alegacoesFinaisDoc", "Alegações finais")],
        ),
        group(
            "Encerramento",
            steps::FINALIZADO,
            &[("sentencaDoc", "Sentença")],
        ),
    ]
}

fn property_sale_groups() -> Vec<RequirementGroup> {
    vec![
        group(
            "Imóvel",
            steps::CADASTRO,
            &[
                ("matriculaImovelDoc", "Matrícula atualizada do imóvel"),
                ("iptuDoc", "Certidão negativa de IPTU"),
            ],
        ),
        group(
            "Vendedor e Comprador",
            steps::CADASTRO,
            &[
                ("rgVendedorDoc", "RG do vendedor"),
                ("rgCompradorDoc", "RG do comprador"),
                ("certidaoEstadoCivilDoc", "Certidão de estado civil"),
            ],
        ),
        group(
            "Negócio",
            steps::PROTOCOLO,
            &[("contratoCompraVendaDoc", "Contrato de compra e venda")],
        ),
        group(
            "Encerramento",
            steps::FINALIZADO,
            &[("escrituraRegistradaDoc", "Escritura registrada")],
        ),
    ]
}

fn nationality_loss_groups() -> Vec<RequirementGroup> {
    vec![
        group(
            "Identificação",
            steps::CADASTRO,
            &[
                ("passaporteDoc", "Passaporte válido"),
                ("certidaoNascimentoDoc", "Certidão de nascimento"),
            ],
        ),
        group(
            "Nacionalidade Estrangeira",
            steps::CADASTRO,
            &[("naturalizacaoEstrangeiraDoc", "Certificado de naturalização estrangeira")],
        ),
        group(
            "Protocolo",
            steps::PROTOCOLO,
            &[("requerimentoPerdaDoc", "Requerimento de perda")],
        ),
        group(
            "Encerramento",
            steps::FINALIZADO,
            &[("publicacaoDouDoc", "Publicação no DOU")],
        ),
    ]
}

fn investor_groups() -> Vec<RequirementGroup> {
    vec![group(
        "Dossiê de Investidor",
        steps::CADASTRO,
        &[
            ("planoInvestimentoDoc", "Plano de investimento"),
            ("comprovanteCapitalDoc", "Comprovante de integralização de capital"),
        ],
    )]
}

fn labor_dispute_groups() -> Vec<RequirementGroup> {
    vec![group(
        "Contencioso Trabalhista",
        steps::CADASTRO,
        &[
            ("reclamatoriaPreviaDoc", "Reclamatória trabalhista prévia"),
            ("atasAudienciaDoc", "Atas de audiência"),
        ],
    )]
}

fn prior_residency_groups() -> Vec<RequirementGroup> {
    vec![group(
        "Residência Anterior",
        steps::CADASTRO,
        &[
            ("crnmAnteriorDoc", "CRNM anterior"),
            ("comprovanteSaidaDoc", "Comprovante de saída do país"),
        ],
    )]
}

fn fallback_groups() -> Vec<RequirementGroup> {
    vec![
        group(
            "Documentos Básicos",
            steps::CADASTRO,
            &[
                ("rgDoc", "RG"),
                ("cpfDoc", "CPF"),
                ("comprovanteEnderecoDoc", "Comprovante de endereço"),
            ],
        ),
        group(
            "Encerramento",
            steps::FINALIZADO,
            &[("encerramentoDoc", "Termo de encerramento")],
        ),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn every_category_has_a_non_empty_base_catalog() {
        let catalogs = RequirementCatalogSet::standard();
        for category in CaseCategory::ordered() {
            assert!(
                !catalogs.base_catalog(category).is_empty(),
                "category {category:?} should carry requirements"
            );
        }
    }

    #[test]
    fn brazil_work_visa_spans_registration_through_finish() {
        let catalogs = RequirementCatalogSet::standard();
        let groups = catalogs.brazil_work_visa();
        assert!((5..=9).contains(&groups.len()));
        assert_eq!(groups.first().map(|g| g.step), Some(steps::CADASTRO));
        assert_eq!(groups.last().map(|g| g.step), Some(steps::FINALIZADO));
    }

    #[test]
    fn steps_preserve_declaration_order_without_duplicates() {
        let catalogs = RequirementCatalogSet::standard();
        let names = catalogs.steps_for(CaseCategory::CriminalAction);
        assert_eq!(
            names,
            vec![steps::CADASTRO, steps::ANALISE, steps::FINALIZADO]
        );
    }
}
