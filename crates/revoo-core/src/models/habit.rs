use serde::{Deserialize, Serialize};
use serde_json::Value;

use super::validation::{parse_positive_int, require_text, ValidationError};

/// Points a habit is worth when the form leaves the field blank
pub const DEFAULT_POINTS: i32 = 1;

/// A habit as returned by `GET /habitos`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Habit {
    pub id: i64,
    pub titulo: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub descricao: Option<String>,
    #[serde(default, skip_serializing_if = "Category::is_absent")]
    pub categoria: Category,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub pontos_base: Option<i32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub ativo: Option<bool>,
}

impl Habit {
    pub fn is_active(&self) -> bool {
        self.ativo.unwrap_or(true)
    }

    pub fn points_display(&self) -> String {
        match self.pontos_base {
            Some(points) => format!("{} pts", points),
            None => "-".to_string(),
        }
    }
}

/// The habit's category, whose shape the backend never pinned down.
///
/// Objects carrying an `id` or `nome` are `Named`; anything else the
/// backend sends is kept verbatim as `Untyped` so nothing is lost on the
/// way back out.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(from = "Option<Value>", into = "Option<Value>")]
pub enum Category {
    #[default]
    Absent,
    Named { id: Option<i64>, nome: Option<String> },
    Untyped(Value),
}

impl Category {
    pub fn is_absent(&self) -> bool {
        matches!(self, Category::Absent)
    }

    /// Human-readable label, if one is known
    pub fn label(&self) -> Option<String> {
        match self {
            Category::Named { nome: Some(nome), .. } => Some(nome.clone()),
            Category::Named { id: Some(id), .. } => Some(format!("#{}", id)),
            Category::Untyped(Value::String(s)) => Some(s.clone()),
            _ => None,
        }
    }
}

impl From<Option<Value>> for Category {
    fn from(value: Option<Value>) -> Self {
        match value {
            None | Some(Value::Null) => Category::Absent,
            Some(Value::Object(map)) if map.contains_key("id") || map.contains_key("nome") => {
                let id = map.get("id").and_then(Value::as_i64);
                let nome = map.get("nome").and_then(Value::as_str).map(str::to_string);
                if id.is_none() && nome.is_none() {
                    Category::Untyped(Value::Object(map))
                } else {
                    Category::Named { id, nome }
                }
            }
            Some(other) => Category::Untyped(other),
        }
    }
}

impl From<Category> for Option<Value> {
    fn from(category: Category) -> Self {
        match category {
            Category::Absent => None,
            Category::Named { id, nome } => {
                let mut map = serde_json::Map::new();
                if let Some(id) = id {
                    map.insert("id".to_string(), Value::from(id));
                }
                if let Some(nome) = nome {
                    map.insert("nome".to_string(), Value::from(nome));
                }
                Some(Value::Object(map))
            }
            Category::Untyped(value) => Some(value),
        }
    }
}

/// Request body for `POST /habitos` and `PUT /habitos/{id}`.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct HabitInput {
    pub titulo: String,
    pub descricao: String,
    pub pontos_base: i32,
    pub ativo: bool,
}

/// Raw habit form fields as typed by the user.
#[derive(Debug, Clone, Default)]
pub struct HabitForm {
    pub titulo: String,
    pub descricao: String,
    pub pontos_base: String,
}

impl HabitForm {
    /// Prefill the form from an existing habit for editing
    pub fn from_habit(habit: &Habit) -> Self {
        Self {
            titulo: habit.titulo.clone(),
            descricao: habit.descricao.clone().unwrap_or_default(),
            pontos_base: habit.pontos_base.unwrap_or(DEFAULT_POINTS).to_string(),
        }
    }

    pub fn validate(&self) -> Result<HabitInput, ValidationError> {
        let titulo = require_text("titulo", &self.titulo)?;
        let pontos_base = if self.pontos_base.trim().is_empty() {
            DEFAULT_POINTS
        } else {
            parse_positive_int("pontosBase", &self.pontos_base)?
        };

        Ok(HabitInput {
            titulo,
            descricao: self.descricao.trim().to_string(),
            pontos_base,
            ativo: true,
        })
    }
}
