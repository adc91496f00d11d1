//! Infrastructure errors outside the operation contract.
//!
//! Operation failures are `AdminError`; this covers config, catalogs and UI.

use thiserror::Error;

#[derive(Error, Debug)]
pub enum DomainError {
    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Message catalog error: {0}")]
    Catalog(String),

    #[error("Console error: {0}")]
    Ui(String),

    /// Operator aborted a prompt (Esc / Ctrl-C).
    #[error("Prompt cancelled")]
    Cancelled,
}
