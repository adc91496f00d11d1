//! Outbound ports. Application calls into the remote admin backend.
//!
//! Implemented by adapters.

use crate::domain::{
    Provider, ReassignOrderRequest, ReassignmentReceipt, ServiceType, SuspendCustomerRequest,
    SuspensionReceipt,
};
use std::fmt;

/// Transport-level failure: the remote procedure did not produce a result.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RawFailure {
    /// Transport or platform code (e.g. `deadline-exceeded`, `ECONNRESET`), if any.
    pub code: Option<String>,
    pub message: String,
}

impl RawFailure {
    pub fn new(code: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            code: Some(code.into()),
            message: message.into(),
        }
    }

    /// Failure with no code, only a message.
    pub fn message(message: impl Into<String>) -> Self {
        Self {
            code: None,
            message: message.into(),
        }
    }
}

impl fmt::Display for RawFailure {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.code {
            Some(code) => write!(f, "[{}] {}", code, self.message),
            None => f.write_str(&self.message),
        }
    }
}

/// Outcome of a remote procedure that did run.
#[derive(Debug, Clone, PartialEq)]
pub enum Reply<T> {
    /// The operation succeeded with a payload.
    Done(T),
    /// The operation ran but declined (`{success: false, error}`).
    Declined(String),
}

/// Result shape every backend procedure returns.
pub type RemoteResult<T> = Result<Reply<T>, RawFailure>;

/// Remote admin backend. Each method is one privileged procedure.
#[async_trait::async_trait]
pub trait AdminBackend: Send + Sync {
    /// Providers of `service_type` currently able to take an order.
    async fn available_providers(&self, service_type: ServiceType)
    -> RemoteResult<Vec<Provider>>;

    /// Move an order to another provider. Not idempotent.
    async fn reassign_order(
        &self,
        request: &ReassignOrderRequest,
    ) -> RemoteResult<ReassignmentReceipt>;

    /// Suspend a customer account. Not idempotent.
    async fn suspend_customer(
        &self,
        request: &SuspendCustomerRequest,
    ) -> RemoteResult<SuspensionReceipt>;
}
