use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use super::validation::{parse_date, parse_id, parse_positive_number, ValidationError};

/// A weekly goal as returned by `GET /metas-semanais`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WeeklyGoal {
    pub id: i64,
    pub id_colaborador: i64,
    #[serde(default)]
    pub nome_colaborador: Option<String>,
    pub id_habito: i64,
    #[serde(default)]
    pub titulo_habito: String,
    #[serde(default)]
    pub semana_inicio: Option<NaiveDate>,
    #[serde(default)]
    pub semana_fim: Option<NaiveDate>,
    pub quantidade_meta: f64,
    #[serde(default)]
    pub status: Option<String>,
}

impl WeeklyGoal {
    /// Label used when picking a goal to record progress against
    pub fn picker_label(&self) -> String {
        format!("{} ({})", self.titulo_habito, self.quantidade_meta)
    }

    pub fn week_display(&self) -> String {
        match (self.semana_inicio, self.semana_fim) {
            (Some(start), Some(end)) => format!("{} to {}", start, end),
            (Some(start), None) => format!("from {}", start),
            (None, Some(end)) => format!("until {}", end),
            (None, None) => "-".to_string(),
        }
    }
}

/// Request body for `POST /metas-semanais`.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct NewWeeklyGoal {
    pub id_colaborador: i64,
    pub id_habito: i64,
    pub semana_inicio: NaiveDate,
    pub semana_fim: NaiveDate,
    pub quantidade_meta: f64,
}

/// Raw weekly goal form fields.
#[derive(Debug, Clone, Default)]
pub struct WeeklyGoalForm {
    pub id_colaborador: String,
    pub id_habito: String,
    pub semana_inicio: String,
    pub semana_fim: String,
    pub quantidade_meta: String,
}

impl WeeklyGoalForm {
    pub fn validate(&self) -> Result<NewWeeklyGoal, ValidationError> {
        Ok(NewWeeklyGoal {
            id_colaborador: parse_id("idColaborador", &self.id_colaborador)?,
            id_habito: parse_id("idHabito", &self.id_habito)?,
            semana_inicio: parse_date("semanaInicio", &self.semana_inicio)?,
            semana_fim: parse_date("semanaFim", &self.semana_fim)?,
            quantidade_meta: parse_positive_number("quantidadeMeta", &self.quantidade_meta)?,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn form() -> WeeklyGoalForm {
        WeeklyGoalForm {
            id_colaborador: "3".to_string(),
            id_habito: "12".to_string(),
            semana_inicio: "2024-06-03".to_string(),
            semana_fim: "2024-06-09".to_string(),
            quantidade_meta: "5".to_string(),
        }
    }

    #[test]
    fn test_parse_goal() {
        let json = r#"{"id": 1, "idColaborador": 3, "nomeColaborador": "Ana", "idHabito": 12,
            "tituloHabito": "Correr", "semanaInicio": "2024-06-03", "semanaFim": "2024-06-09",
            "quantidadeMeta": 5.0, "status": "ATIVA"}"#;
        let goal: WeeklyGoal = serde_json::from_str(json).unwrap();
        assert_eq!(goal.picker_label(), "Correr (5)");
        assert_eq!(goal.week_display(), "2024-06-03 to 2024-06-09");
    }

    #[test]
    fn test_parse_goal_without_dates() {
        let json = r#"{"id": 1, "idColaborador": 3, "idHabito": 12, "tituloHabito": "Correr", "quantidadeMeta": 2.5}"#;
        let goal: WeeklyGoal = serde_json::from_str(json).unwrap();
        assert_eq!(goal.week_display(), "-");
        assert_eq!(goal.status, None);
    }

    #[test]
    fn test_form_to_wire() {
        let goal = form().validate().unwrap();
        assert_eq!(
            serde_json::to_value(&goal).unwrap(),
            serde_json::json!({
                "idColaborador": 3,
                "idHabito": 12,
                "semanaInicio": "2024-06-03",
                "semanaFim": "2024-06-09",
                "quantidadeMeta": 5.0
            })
        );
    }

    #[test]
    fn test_form_rejections() {
        let bad_id = WeeklyGoalForm { id_colaborador: "ana".to_string(), ..form() };
        assert_eq!(bad_id.validate().unwrap_err().field, "idColaborador");

        let bad_habit = WeeklyGoalForm { id_habito: String::new(), ..form() };
        assert_eq!(bad_habit.validate().unwrap_err().field, "idHabito");

        let bad_date = WeeklyGoalForm { semana_fim: "09/06/2024".to_string(), ..form() };
        assert_eq!(bad_date.validate().unwrap_err().field, "semanaFim");

        let bad_qty = WeeklyGoalForm { quantidade_meta: "0".to_string(), ..form() };
        assert_eq!(bad_qty.validate().unwrap_err().field, "quantidadeMeta");
    }
}
