//! Message catalog adapters. Implement MessageCatalog.

pub mod builtin;
pub mod table;

pub use builtin::{EnglishCatalog, ThaiCatalog};
pub use table::TableCatalog;

use crate::domain::DomainError;
use crate::ports::MessageCatalog;
use std::sync::Arc;

/// Built-in catalog for a locale tag (`th`, `en`).
pub fn builtin_catalog(locale: &str) -> Result<Arc<dyn MessageCatalog>, DomainError> {
    match locale.trim().to_lowercase().as_str() {
        "th" | "th-th" => Ok(Arc::new(ThaiCatalog)),
        "en" | "en-us" | "en-gb" => Ok(Arc::new(EnglishCatalog)),
        other => Err(DomainError::Config(format!(
            "no built-in message catalog for locale '{}'",
            other
        ))),
    }
}
