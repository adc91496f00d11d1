//! The terminal error value handed back to callers of admin operations.
//!
//! An `AdminError` pairs an `ErrorCode` with the context of the failed call.
//! Context is stamped once per failure and never mutated afterwards.

use crate::domain::ErrorCode;
use crate::ports::MessageCatalog;
use chrono::Utc;
use serde::Serialize;
use std::collections::BTreeMap;

/// Scalar value stored in error metadata.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum MetaValue {
    Text(String),
    Int(i64),
    Float(f64),
    Bool(bool),
}

impl From<&str> for MetaValue {
    fn from(value: &str) -> Self {
        Self::Text(value.to_string())
    }
}

impl From<String> for MetaValue {
    fn from(value: String) -> Self {
        Self::Text(value)
    }
}

impl From<i64> for MetaValue {
    fn from(value: i64) -> Self {
        Self::Int(value)
    }
}

impl From<u32> for MetaValue {
    fn from(value: u32) -> Self {
        Self::Int(i64::from(value))
    }
}

impl From<f64> for MetaValue {
    fn from(value: f64) -> Self {
        Self::Float(value)
    }
}

impl From<bool> for MetaValue {
    fn from(value: bool) -> Self {
        Self::Bool(value)
    }
}

/// Call context captured when a failure is classified.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ErrorContext {
    action: String,
    /// Epoch millis at classification time.
    timestamp: i64,
    #[serde(skip_serializing_if = "Option::is_none")]
    order_id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    provider_id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    customer_id: Option<String>,
    metadata: BTreeMap<String, MetaValue>,
}

impl ErrorContext {
    pub fn action(&self) -> &str {
        &self.action
    }

    pub fn timestamp(&self) -> i64 {
        self.timestamp
    }

    pub fn order_id(&self) -> Option<&str> {
        self.order_id.as_deref()
    }

    pub fn provider_id(&self) -> Option<&str> {
        self.provider_id.as_deref()
    }

    pub fn customer_id(&self) -> Option<&str> {
        self.customer_id.as_deref()
    }

    pub fn metadata(&self) -> &BTreeMap<String, MetaValue> {
        &self.metadata
    }

    /// Metadata lookup that returns the value only when it is text.
    pub fn meta_text(&self, key: &str) -> Option<&str> {
        match self.metadata.get(key) {
            Some(MetaValue::Text(s)) => Some(s),
            _ => None,
        }
    }
}

/// Entity ids and metadata known before a call is made.
///
/// An operation builds one seed per invocation; every failure of that
/// invocation is stamped from it.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ContextSeed {
    order_id: Option<String>,
    provider_id: Option<String>,
    customer_id: Option<String>,
    metadata: BTreeMap<String, MetaValue>,
}

impl ContextSeed {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn order_id(mut self, id: impl Into<String>) -> Self {
        self.order_id = Some(id.into());
        self
    }

    pub fn provider_id(mut self, id: impl Into<String>) -> Self {
        self.provider_id = Some(id.into());
        self
    }

    pub fn customer_id(mut self, id: impl Into<String>) -> Self {
        self.customer_id = Some(id.into());
        self
    }

    pub fn meta(mut self, key: impl Into<String>, value: impl Into<MetaValue>) -> Self {
        self.metadata.insert(key.into(), value.into());
        self
    }

    /// Build the immutable context for a failure observed now.
    pub fn stamp(&self, action: &str) -> ErrorContext {
        ErrorContext {
            action: action.to_string(),
            timestamp: Utc::now().timestamp_millis(),
            order_id: self.order_id.clone(),
            provider_id: self.provider_id.clone(),
            customer_id: self.customer_id.clone(),
            metadata: self.metadata.clone(),
        }
    }
}

/// Terminal, user- and operator-facing representation of a failed operation.
#[derive(Debug, Clone, PartialEq, Serialize, thiserror::Error)]
#[error("{code} during {}", .context.action)]
pub struct AdminError {
    code: ErrorCode,
    context: ErrorContext,
    retryable: bool,
}

impl AdminError {
    /// An error that must not be retried.
    pub fn terminal(code: ErrorCode, context: ErrorContext) -> Self {
        Self {
            code,
            context,
            retryable: false,
        }
    }

    /// An error from the transient allow-list; the invoker may try again.
    pub fn transient(code: ErrorCode, context: ErrorContext) -> Self {
        Self {
            code,
            context,
            retryable: true,
        }
    }

    pub fn code(&self) -> ErrorCode {
        self.code
    }

    pub fn context(&self) -> &ErrorContext {
        &self.context
    }

    pub fn is_retryable(&self) -> bool {
        self.retryable
    }

    /// Localized message for end users. Never includes backend text.
    pub fn user_message<'c>(&self, catalog: &'c dyn MessageCatalog) -> &'c str {
        catalog.message(self.code)
    }
}
