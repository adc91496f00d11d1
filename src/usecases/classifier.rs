//! Failure classification.
//!
//! Transport failures are matched against explicit signature allow-lists:
//! permission denial first, then the transient network list. Anything else
//! is `ADMIN_UNKNOWN_ERROR` and is not retried. Business declines go through
//! an ordered pattern->code rule list and are never retried.

use crate::domain::{AdminError, ContextSeed, ErrorCode};
use crate::ports::RawFailure;
use tracing::debug;

/// Metadata key holding the raw backend text of a business decline.
pub const BUSINESS_ERROR_KEY: &str = "businessError";

const PERMISSION_CODES: &[&str] = &["permission-denied"];
const PERMISSION_PHRASES: &[&str] = &["permission denied", "insufficient permission"];

const TRANSIENT_CODES: &[&str] = &[
    "deadline-exceeded",
    "unavailable",
    "timeout",
    "etimedout",
    "econnreset",
    "network-error",
];
const TRANSIENT_PHRASES: &[&str] = &["timeout", "timed out", "connection reset", "network error"];

/// A failed call, as seen by the classifier.
#[derive(Debug, Clone, Copy)]
pub enum Failure<'a> {
    Transport(&'a RawFailure),
    /// The remote operation ran and declined with this text.
    Declined(&'a str),
}

/// Ordered substring rules for business declines, with a fallback code.
///
/// Patterns match case-insensitively; the first matching rule wins.
#[derive(Debug, Clone)]
pub struct BusinessRules {
    rules: Vec<(String, ErrorCode)>,
    fallback: ErrorCode,
}

impl BusinessRules {
    pub fn new(fallback: ErrorCode) -> Self {
        Self {
            rules: Vec::new(),
            fallback,
        }
    }

    pub fn rule(mut self, pattern: &str, code: ErrorCode) -> Self {
        self.rules.push((pattern.to_lowercase(), code));
        self
    }

    pub fn fallback(&self) -> ErrorCode {
        self.fallback
    }

    pub fn resolve(&self, message: &str) -> ErrorCode {
        let lower = message.to_lowercase();
        self.rules
            .iter()
            .find(|(pattern, _)| lower.contains(pattern.as_str()))
            .map(|(_, code)| *code)
            .unwrap_or(self.fallback)
    }
}

/// Maps raw failures into `AdminError`s.
#[derive(Debug, Clone)]
pub struct Classifier {
    permission_codes: Vec<String>,
    permission_phrases: Vec<String>,
    transient_codes: Vec<String>,
    transient_phrases: Vec<String>,
}

impl Default for Classifier {
    fn default() -> Self {
        let owned = |list: &[&str]| list.iter().map(|s| s.to_string()).collect();
        Self {
            permission_codes: owned(PERMISSION_CODES),
            permission_phrases: owned(PERMISSION_PHRASES),
            transient_codes: owned(TRANSIENT_CODES),
            transient_phrases: owned(TRANSIENT_PHRASES),
        }
    }
}

impl Classifier {
    pub fn new() -> Self {
        Self::default()
    }

    /// Extend the transient allow-list with extra transport codes.
    pub fn with_transient_codes<I, S>(mut self, codes: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        self.transient_codes
            .extend(codes.into_iter().map(|c| normalize_code(c.as_ref())));
        self
    }

    pub fn classify(
        &self,
        failure: Failure<'_>,
        action: &str,
        seed: &ContextSeed,
        rules: &BusinessRules,
    ) -> AdminError {
        let error = match failure {
            Failure::Transport(raw) => {
                let code = self.transport_code(raw);
                let context = seed.stamp(action);
                if code == ErrorCode::NetworkTimeout {
                    AdminError::transient(code, context)
                } else {
                    AdminError::terminal(code, context)
                }
            }
            Failure::Declined(message) => {
                let context = seed
                    .clone()
                    .meta(BUSINESS_ERROR_KEY, message)
                    .stamp(action);
                AdminError::terminal(rules.resolve(message), context)
            }
        };
        debug!(
            action,
            code = %error.code(),
            retryable = error.is_retryable(),
            "classified failure"
        );
        error
    }

    fn transport_code(&self, raw: &RawFailure) -> ErrorCode {
        let code = raw.code.as_deref().map(normalize_code);
        let message = raw.message.to_lowercase();
        let matches = |codes: &[String], phrases: &[String]| {
            code.as_ref().is_some_and(|c| codes.contains(c))
                || phrases.iter().any(|p| message.contains(p.as_str()))
        };

        if matches(&self.permission_codes, &self.permission_phrases) {
            ErrorCode::InsufficientAdminPermissions
        } else if matches(&self.transient_codes, &self.transient_phrases) {
            ErrorCode::NetworkTimeout
        } else {
            ErrorCode::AdminUnknownError
        }
    }
}

/// `functions/DEADLINE_EXCEEDED` -> `deadline-exceeded`.
fn normalize_code(code: &str) -> String {
    let tail = code.trim().rsplit('/').next().unwrap_or_default();
    tail.to_lowercase().replace('_', "-")
}
