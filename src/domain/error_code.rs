//! Closed error-code taxonomy for admin operations.
//!
//! Every code belongs to exactly one origin group. Message catalogs must
//! cover all of `ErrorCode::ALL`.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Where a failure originated. Drives nothing at runtime; used by operators
/// and catalogs to group codes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ErrorOrigin {
    ClientValidation,
    Authorization,
    Infrastructure,
    Business,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ErrorCode {
    // client-validation
    InvalidOrderId,
    InvalidProviderId,
    InvalidCustomerId,
    // authorization
    InsufficientAdminPermissions,
    // transient / infrastructure
    NetworkTimeout,
    AdminUnknownError,
    // business
    OrderReassignmentFailed,
    NoAvailableProviders,
    ProviderAlreadyAssigned,
    InvalidOrderStatus,
    AccountSuspensionFailed,
    CustomerAlreadySuspended,
}

impl ErrorCode {
    /// Every member of the taxonomy, in declaration order.
    pub const ALL: [ErrorCode; 12] = [
        ErrorCode::InvalidOrderId,
        ErrorCode::InvalidProviderId,
        ErrorCode::InvalidCustomerId,
        ErrorCode::InsufficientAdminPermissions,
        ErrorCode::NetworkTimeout,
        ErrorCode::AdminUnknownError,
        ErrorCode::OrderReassignmentFailed,
        ErrorCode::NoAvailableProviders,
        ErrorCode::ProviderAlreadyAssigned,
        ErrorCode::InvalidOrderStatus,
        ErrorCode::AccountSuspensionFailed,
        ErrorCode::CustomerAlreadySuspended,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::InvalidOrderId => "INVALID_ORDER_ID",
            Self::InvalidProviderId => "INVALID_PROVIDER_ID",
            Self::InvalidCustomerId => "INVALID_CUSTOMER_ID",
            Self::InsufficientAdminPermissions => "INSUFFICIENT_ADMIN_PERMISSIONS",
            Self::NetworkTimeout => "NETWORK_TIMEOUT",
            Self::AdminUnknownError => "ADMIN_UNKNOWN_ERROR",
            Self::OrderReassignmentFailed => "ORDER_REASSIGNMENT_FAILED",
            Self::NoAvailableProviders => "NO_AVAILABLE_PROVIDERS",
            Self::ProviderAlreadyAssigned => "PROVIDER_ALREADY_ASSIGNED",
            Self::InvalidOrderStatus => "INVALID_ORDER_STATUS",
            Self::AccountSuspensionFailed => "ACCOUNT_SUSPENSION_FAILED",
            Self::CustomerAlreadySuspended => "CUSTOMER_ALREADY_SUSPENDED",
        }
    }

    pub fn origin(&self) -> ErrorOrigin {
        match self {
            Self::InvalidOrderId | Self::InvalidProviderId | Self::InvalidCustomerId => {
                ErrorOrigin::ClientValidation
            }
            Self::InsufficientAdminPermissions => ErrorOrigin::Authorization,
            Self::NetworkTimeout | Self::AdminUnknownError => ErrorOrigin::Infrastructure,
            Self::OrderReassignmentFailed
            | Self::NoAvailableProviders
            | Self::ProviderAlreadyAssigned
            | Self::InvalidOrderStatus
            | Self::AccountSuspensionFailed
            | Self::CustomerAlreadySuspended => ErrorOrigin::Business,
        }
    }
}

impl fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Returned when a string is not the name of any `ErrorCode`.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown error code: {0}")]
pub struct UnknownErrorCode(pub String);

impl FromStr for ErrorCode {
    type Err = UnknownErrorCode;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim();
        Self::ALL
            .iter()
            .copied()
            .find(|code| code.as_str().eq_ignore_ascii_case(wanted))
            .ok_or_else(|| UnknownErrorCode(wanted.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn test_names_are_unique_and_parse_back() {
        let names: HashSet<&str> = ErrorCode::ALL.iter().map(|c| c.as_str()).collect();
        assert_eq!(names.len(), ErrorCode::ALL.len());
        for code in ErrorCode::ALL {
            assert_eq!(code.as_str().parse::<ErrorCode>(), Ok(code));
        }
        assert_eq!(
            " network_timeout ".parse::<ErrorCode>(),
            Ok(ErrorCode::NetworkTimeout)
        );
    }

    #[test]
    fn test_unknown_name_is_rejected() {
        let err = "SOMETHING_ELSE".parse::<ErrorCode>().unwrap_err();
        assert_eq!(err, UnknownErrorCode("SOMETHING_ELSE".to_string()));
    }

    #[test]
    fn test_serde_uses_screaming_snake_names() {
        let json = serde_json::to_string(&ErrorCode::ProviderAlreadyAssigned).unwrap();
        assert_eq!(json, "\"PROVIDER_ALREADY_ASSIGNED\"");
    }

    #[test]
    fn test_origin_groups() {
        assert_eq!(
            ErrorCode::InvalidCustomerId.origin(),
            ErrorOrigin::ClientValidation
        );
        assert_eq!(
            ErrorCode::InsufficientAdminPermissions.origin(),
            ErrorOrigin::Authorization
        );
        assert_eq!(
            ErrorCode::AdminUnknownError.origin(),
            ErrorOrigin::Infrastructure
        );
        assert_eq!(ErrorCode::InvalidOrderStatus.origin(), ErrorOrigin::Business);
    }
}
