//! Inbound port. UI (adapter) calls into the application.

use crate::domain::DomainError;

/// Input port: console/CLI drives admin operations.
#[async_trait::async_trait]
pub trait InputPort: Send + Sync {
    /// Run the interactive admin loop until the operator quits.
    async fn run(&self) -> Result<(), DomainError>;
}
