use crate::errors::{AppError, AppResult};
use serde::Deserialize;
use serde_json::Value;

/// `{ "columns": [...], "rows": [[...], ...] }`
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ApiTable {
    pub columns: Vec<String>,
    #[serde(default)]
    pub rows: Vec<Vec<Value>>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct StationResponse {
    pub sessions: ApiTable,
}

impl ApiTable {
    pub fn column(&self, name: &str) -> AppResult<usize> {
        self.columns
            .iter()
            .position(|c| c == name)
            .ok_or_else(|| AppError::MissingColumn(name.to_string()))
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Cell as text. Numbers are rendered, nulls are `None`.
    pub fn str_at(&self, row: usize, col: usize) -> Option<String> {
        match self.rows.get(row)?.get(col)? {
            Value::String(s) => Some(s.clone()),
            Value::Number(n) => Some(n.to_string()),
            Value::Bool(b) => Some(b.to_string()),
            _ => None,
        }
    }

    /// Cell as a number. Numeric strings are accepted.
    pub fn f64_at(&self, row: usize, col: usize) -> Option<f64> {
        match self.rows.get(row)?.get(col)? {
            Value::Number(n) => n.as_f64(),
            Value::String(s) => s.trim().parse().ok(),
            _ => None,
        }
    }
}
