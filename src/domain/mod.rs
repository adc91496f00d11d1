//! Core domain layer. No I/O.
//!
//! Error taxonomy, error values, retry policy and entities live here.

pub mod admin_error;
pub mod entities;
pub mod error_code;
pub mod errors;
pub mod retry;

pub use admin_error::{AdminError, ContextSeed, ErrorContext, MetaValue};
pub use entities::{
    OrderStatus, Provider, ReassignOrderRequest, ReassignmentReceipt, ServiceType,
    SuspendCustomerRequest, SuspensionReceipt,
};
pub use error_code::{ErrorCode, ErrorOrigin, UnknownErrorCode};
pub use errors::DomainError;
pub use retry::{AttemptRecord, RetryPolicy};
