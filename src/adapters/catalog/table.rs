//! Message catalog loaded from a JSON table `{ "CODE": "message" }`.
//!
//! Construction fails unless every `ErrorCode` has a non-empty message.

use crate::domain::{DomainError, ErrorCode};
use crate::ports::MessageCatalog;
use std::collections::HashMap;
use std::path::Path;
use tokio::fs;

#[derive(Debug, Clone)]
pub struct TableCatalog {
    locale: String,
    messages: HashMap<ErrorCode, String>,
}

impl TableCatalog {
    /// Parse and validate a table. Unknown, missing and empty entries are all errors.
    pub fn from_json(locale: impl Into<String>, json: &str) -> Result<Self, DomainError> {
        let raw: HashMap<String, String> = serde_json::from_str(json)
            .map_err(|e| DomainError::Catalog(format!("invalid JSON: {}", e)))?;

        let mut messages = HashMap::new();
        let mut unknown = Vec::new();
        for (key, message) in raw {
            match key.parse::<ErrorCode>() {
                Ok(code) => {
                    messages.insert(code, message.trim().to_string());
                }
                Err(_) => unknown.push(key),
            }
        }
        if !unknown.is_empty() {
            unknown.sort();
            return Err(DomainError::Catalog(format!(
                "unknown codes: {}",
                unknown.join(", ")
            )));
        }

        let missing: Vec<&str> = ErrorCode::ALL
            .iter()
            .filter(|code| messages.get(*code).is_none_or(|m| m.is_empty()))
            .map(|code| code.as_str())
            .collect();
        if !missing.is_empty() {
            return Err(DomainError::Catalog(format!(
                "missing messages for: {}",
                missing.join(", ")
            )));
        }

        Ok(Self {
            locale: locale.into(),
            messages,
        })
    }

    /// Load a table from disk.
    pub async fn load(locale: impl Into<String>, path: impl AsRef<Path>) -> Result<Self, DomainError> {
        let path = path.as_ref();
        let json = fs::read_to_string(path)
            .await
            .map_err(|e| DomainError::Catalog(format!("read {}: {}", path.display(), e)))?;
        Self::from_json(locale, &json)
    }
}

impl MessageCatalog for TableCatalog {
    fn locale(&self) -> &str {
        &self.locale
    }

    fn message(&self, code: ErrorCode) -> &str {
        self.messages.get(&code).map(String::as_str).unwrap_or_default()
    }
}
