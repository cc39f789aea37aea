//! Ready-made schemas for common tenant types.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use super::field::{FieldDefinition, FieldType};
use super::schema::{FieldSchema, FieldSchemaDocument, SchemaError};
use crate::domain::foundation::{TenantId, ValidationError};

/// Default schema families.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SchemaTemplate {
    /// Lead qualification for sales assistants.
    Sales,
    /// Patient triage for clinics.
    Medical,
    Generic,
}

impl SchemaTemplate {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Sales => "sales",
            Self::Medical => "medical",
            Self::Generic => "generic",
        }
    }

    /// Document form, so it can be edited before being built.
    pub fn document(&self, tenant_id: &TenantId) -> FieldSchemaDocument {
        FieldSchemaDocument {
            target_name: Some(format!("{}_{}", tenant_id, self.as_str())),
            description: format!("{} capture for {}", self.as_str(), tenant_id),
            fields: self.fields(),
            completion_triggers: Vec::new(),
            auto_capture: true,
        }
    }

    /// Builds the validated schema.
    pub fn build(&self, tenant_id: TenantId) -> Result<FieldSchema, SchemaError> {
        let document = self.document(&tenant_id);
        FieldSchema::from_document(tenant_id, document)
    }

    fn fields(&self) -> Vec<FieldDefinition> {
        match self {
            Self::Sales => vec![
                FieldDefinition::new("tipo_negocio", FieldType::Text)
                    .with_display_name("Tipo de Negócio")
                    .required()
                    .with_triggers(["negócio", "empresa", "trabalho", "atividade", "ramo"]),
                FieldDefinition::new("numero_funcionarios", FieldType::Choice)
                    .with_display_name("Número de Funcionários")
                    .with_choices(["1-5", "6-20", "21-50", "51-100", "100+"])
                    .with_triggers(["funcionários", "colaboradores", "equipe", "pessoas"]),
                FieldDefinition::new("dor_principal", FieldType::Text)
                    .with_display_name("Principal Desafio")
                    .required()
                    .with_triggers(["problema", "dificuldade", "desafio", "precisando"]),
            ],
            Self::Medical => vec![
                FieldDefinition::new("especialidade_interesse", FieldType::Choice)
                    .with_display_name("Especialidade de Interesse")
                    .with_choices([
                        "Cardiologia",
                        "Dermatologia",
                        "Ortopedia",
                        "Pediatria",
                        "Ginecologia",
                        "Neurologia",
                    ])
                    .with_triggers(["especialidade", "médico", "doutor", "especialista"]),
                FieldDefinition::new("tipo_consulta", FieldType::Choice)
                    .with_display_name("Tipo de Consulta")
                    .with_choices(["Primeira consulta", "Retorno", "Exame", "Emergência"])
                    .with_triggers(["consulta", "atendimento", "ver médico"]),
                FieldDefinition::new("sintomas_principais", FieldType::Text)
                    .with_display_name("Sintomas Principais")
                    .with_triggers(["sintoma", "sentindo", "dor", "problema de saúde"]),
            ],
            Self::Generic => vec![FieldDefinition::new("interesse_principal", FieldType::Text)
                .with_display_name("Principal Interesse")
                .required()
                .with_triggers(["interesse", "procurando", "preciso", "quero"])],
        }
    }
}

impl fmt::Display for SchemaTemplate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for SchemaTemplate {
    type Err = ValidationError;

    /// Accepts the English names and the legacy Portuguese ones.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "sales" | "vendas" => Ok(Self::Sales),
            "medical" | "medico" | "médico" => Ok(Self::Medical),
            "generic" => Ok(Self::Generic),
            other => Err(ValidationError::invalid_format(
                "template",
                format!("unknown schema template '{}'", other),
            )),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn tenant() -> TenantId {
        TenantId::new("acme").unwrap()
    }

    #[test]
    fn every_template_builds() {
        for template in [SchemaTemplate::Sales, SchemaTemplate::Medical, SchemaTemplate::Generic] {
            assert!(template.build(tenant()).is_ok(), "template {}", template);
        }
    }

    #[test]
    fn sales_template_requires_business_and_pain() {
        let schema = SchemaTemplate::Sales.build(tenant()).unwrap();
        let required: Vec<_> = schema.required_fields().map(|f| f.name.clone()).collect();
        assert_eq!(required, vec!["tipo_negocio", "dor_principal"]);
        assert_eq!(schema.target_name(), "acme_sales");
    }

    #[test]
    fn medical_template_has_no_required_fields() {
        let schema = SchemaTemplate::Medical.build(tenant()).unwrap();
        assert_eq!(schema.required_fields().count(), 0);
        assert_eq!(schema.len(), 3);
    }

    #[test]
    fn parses_legacy_names() {
        assert_eq!("vendas".parse::<SchemaTemplate>().unwrap(), SchemaTemplate::Sales);
        assert_eq!("medico".parse::<SchemaTemplate>().unwrap(), SchemaTemplate::Medical);
        assert_eq!("Generic".parse::<SchemaTemplate>().unwrap(), SchemaTemplate::Generic);
        assert!("retail".parse::<SchemaTemplate>().is_err());
    }
}
