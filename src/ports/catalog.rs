//! Message catalog port. Resolves error codes to user-facing text.

use crate::domain::ErrorCode;

/// Total mapping from `ErrorCode` to a localized, non-empty message.
pub trait MessageCatalog: Send + Sync {
    /// Locale tag, e.g. `th` or `en`.
    fn locale(&self) -> &str;

    fn message(&self, code: ErrorCode) -> &str;
}
