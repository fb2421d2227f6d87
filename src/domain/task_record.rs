use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Identifier reported when no catalog entry is a confident match.
pub const MISSING_CATALOG_ID: &str = "Missing";
/// Quantity reported when the conversation gives nothing to compute it from.
pub const MISSING_QUANTITY: &str = "QUANTITÉ MANQUANTE";
/// Room reported when the conversation never names one.
pub const MISSING_ROOM: &str = "PIÈCE NON PRÉCISÉE";

const DEFAULT_QUANTITY_QUESTION: &str =
    "Dimensions non communiquées : quelles sont les mesures de la surface concernée ?";

/// Catalog identifier attached to an extracted task.
///
/// Catalogs are caller JSON, so numeric ids are accepted and kept in their
/// string form.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(from = "Value", into = "String")]
pub enum CatalogMatch {
    Matched(String),
    #[default]
    Missing,
}

impl CatalogMatch {
    pub fn is_missing(&self) -> bool {
        matches!(self, Self::Missing)
    }
}

impl From<Value> for CatalogMatch {
    fn from(raw: Value) -> Self {
        let id = match raw {
            Value::String(id) => id,
            Value::Number(id) => id.to_string(),
            _ => return Self::Missing,
        };

        match id.trim() {
            "" => Self::Missing,
            id if id.eq_ignore_ascii_case(MISSING_CATALOG_ID) => Self::Missing,
            id => Self::Matched(id.to_string()),
        }
    }
}

impl From<CatalogMatch> for String {
    fn from(value: CatalogMatch) -> Self {
        match value {
            CatalogMatch::Matched(id) => id,
            CatalogMatch::Missing => MISSING_CATALOG_ID.to_string(),
        }
    }
}

/// Quantity of work for a task: a measured value, or the reason it could not
/// be determined.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(from = "RawQuantity", into = "RawQuantity")]
pub enum Quantity {
    Numeric(f64),
    Unresolved(String),
}

impl Quantity {
    pub fn as_f64(&self) -> Option<f64> {
        match self {
            Self::Numeric(v) => Some(*v),
            Self::Unresolved(_) => None,
        }
    }

    pub fn is_unresolved(&self) -> bool {
        matches!(self, Self::Unresolved(_))
    }
}

#[derive(Serialize, Deserialize)]
#[serde(untagged)]
enum RawQuantity {
    Number(f64),
    Text(String),
}

impl From<RawQuantity> for Quantity {
    fn from(raw: RawQuantity) -> Self {
        match raw {
            RawQuantity::Number(v) => Self::Numeric(v),
            RawQuantity::Text(text) => {
                let trimmed = text.trim();
                match trimmed.replace(',', ".").parse::<f64>() {
                    Ok(v) if v.is_finite() => Self::Numeric(v),
                    _ => Self::Unresolved(trimmed.to_string()),
                }
            }
        }
    }
}

impl From<Quantity> for RawQuantity {
    fn from(value: Quantity) -> Self {
        match value {
            Quantity::Numeric(v) => Self::Number(v),
            Quantity::Unresolved(_) => Self::Text(MISSING_QUANTITY.to_string()),
        }
    }
}

/// One construction task extracted from a site-visit conversation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TaskRecord {
    pub room_name: String,
    pub task_name: String,
    #[serde(default)]
    pub id: CatalogMatch,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    pub quantity: Quantity,
    pub unit: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub hypotheses: Option<String>,
}

impl TaskRecord {
    /// Applies the sentinel rules the generation step is asked to follow, so
    /// that callers can rely on them even when the model drifts.
    pub fn normalize(mut self) -> Self {
        self.room_name = self.room_name.trim().to_string();
        if self.room_name.is_empty() {
            self.room_name = MISSING_ROOM.to_string();
        }

        self.description = non_blank(self.description);
        self.hypotheses = non_blank(self.hypotheses);

        if let Quantity::Unresolved(reason) = &self.quantity {
            if self.hypotheses.is_none() {
                let question = if reason.is_empty() || reason == MISSING_QUANTITY {
                    DEFAULT_QUANTITY_QUESTION.to_string()
                } else {
                    reason.clone()
                };
                self.hypotheses = Some(question);
            }
        }

        self
    }
}

fn non_blank(value: Option<String>) -> Option<String> {
    value
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}

/// Shape the extraction model is constrained to produce.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ExtractionResult {
    pub tasks: Vec<TaskRecord>,
}

impl ExtractionResult {
    pub fn normalize(self) -> Self {
        Self {
            tasks: self.tasks.into_iter().map(TaskRecord::normalize).collect(),
        }
    }
}
