use chrono::NaiveDate;
use serde::Serialize;

use super::validation::{parse_date, parse_positive_number, ValidationError};

/// Request body for `POST /registros-progresso`.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct NewProgressRecord {
    pub id_meta_semanal: i64,
    pub data_registro: NaiveDate,
    pub quantidade_progresso: f64,
    pub observacao: String,
}

/// Raw progress form fields. `meta_id` is the goal picked from the list.
#[derive(Debug, Clone, Default)]
pub struct ProgressForm {
    pub meta_id: Option<i64>,
    pub data_registro: String,
    pub quantidade_progresso: String,
    pub observacao: String,
}

impl ProgressForm {
    pub fn validate(&self) -> Result<NewProgressRecord, ValidationError> {
        let id_meta_semanal = self
            .meta_id
            .ok_or_else(|| ValidationError::new("idMetaSemanal", "select a weekly goal"))?;

        Ok(NewProgressRecord {
            id_meta_semanal,
            data_registro: parse_date("dataRegistro", &self.data_registro)?,
            quantidade_progresso: parse_positive_number(
                "quantidadeProgresso",
                &self.quantidade_progresso,
            )?,
            observacao: self.observacao.trim().to_string(),
        })
    }
}
