use serde_json::Value;

#[derive(Debug, thiserror::Error)]
pub enum CatalogError {
    #[error("tasks catalog exceeds {limit} bytes")]
    TooLarge { limit: usize },
    #[error("tasks catalog is not valid JSON: {0}")]
    InvalidJson(String),
}

/// Caller-supplied list of known tasks, forwarded verbatim to the model.
#[derive(Debug, Clone, PartialEq)]
pub struct Catalog(Value);

impl Catalog {
    pub fn empty() -> Self {
        Self(Value::Array(Vec::new()))
    }

    pub fn parse(raw: &str, max_bytes: usize) -> Result<Self, CatalogError> {
        if raw.len() > max_bytes {
            return Err(CatalogError::TooLarge { limit: max_bytes });
        }
        if raw.trim().is_empty() {
            return Ok(Self::empty());
        }
        serde_json::from_str(raw)
            .map(Self)
            .map_err(|e| CatalogError::InvalidJson(e.to_string()))
    }

    pub fn as_value(&self) -> &Value {
        &self.0
    }

    pub fn to_pretty_json(&self) -> String {
        serde_json::to_string_pretty(&self.0).unwrap_or_else(|_| self.0.to_string())
    }
}

impl Default for Catalog {
    fn default() -> Self {
        Self::empty()
    }
}

impl From<Value> for Catalog {
    fn from(value: Value) -> Self {
        Self(value)
    }
}
