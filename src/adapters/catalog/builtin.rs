//! Built-in message catalogs. Exhaustive matches keep them total.

use crate::domain::ErrorCode;
use crate::ports::MessageCatalog;

/// Thai messages, used by the reference deployment.
#[derive(Debug, Default, Clone, Copy)]
pub struct ThaiCatalog;

impl MessageCatalog for ThaiCatalog {
    fn locale(&self) -> &str {
        "th"
    }

    fn message(&self, code: ErrorCode) -> &str {
        match code {
            ErrorCode::InvalidOrderId => "รหัสคำสั่งซื้อไม่ถูกต้อง",
            ErrorCode::InvalidProviderId => "รหัสผู้ให้บริการไม่ถูกต้อง",
            ErrorCode::InvalidCustomerId => "รหัสลูกค้าไม่ถูกต้อง",
            ErrorCode::InsufficientAdminPermissions => {
                "คุณไม่มีสิทธิ์ผู้ดูแลระบบเพียงพอสำหรับการดำเนินการนี้"
            }
            ErrorCode::NetworkTimeout => "การเชื่อมต่อหมดเวลา กรุณาลองใหม่อีกครั้ง",
            ErrorCode::AdminUnknownError => "เกิดข้อผิดพลาดที่ไม่ทราบสาเหตุ กรุณาติดต่อทีมสนับสนุน",
            ErrorCode::OrderReassignmentFailed => "ไม่สามารถเปลี่ยนผู้ให้บริการของคำสั่งซื้อได้",
            ErrorCode::NoAvailableProviders => "ไม่มีผู้ให้บริการที่พร้อมรับงานในขณะนี้",
            ErrorCode::ProviderAlreadyAssigned => "ผู้ให้บริการนี้ได้รับมอบหมายคำสั่งซื้อนี้อยู่แล้ว",
            ErrorCode::InvalidOrderStatus => "สถานะคำสั่งซื้อไม่อนุญาตให้ดำเนินการนี้",
            ErrorCode::AccountSuspensionFailed => "ไม่สามารถระงับบัญชีผู้ใช้ได้",
            ErrorCode::CustomerAlreadySuspended => "บัญชีผู้ใช้นี้ถูกระงับอยู่แล้ว",
        }
    }
}

#[derive(Debug, Default, Clone, Copy)]
pub struct EnglishCatalog;

impl MessageCatalog for EnglishCatalog {
    fn locale(&self) -> &str {
        "en"
    }

    fn message(&self, code: ErrorCode) -> &str {
        match code {
            ErrorCode::InvalidOrderId => "The order ID is invalid.",
            ErrorCode::InvalidProviderId => "The provider ID is invalid.",
            ErrorCode::InvalidCustomerId => "The customer ID is invalid.",
            ErrorCode::InsufficientAdminPermissions => {
                "You do not have sufficient admin permissions for this action."
            }
            ErrorCode::NetworkTimeout => "The connection timed out. Please try again.",
            ErrorCode::AdminUnknownError => "An unexpected error occurred. Please contact support.",
            ErrorCode::OrderReassignmentFailed => "The order could not be reassigned.",
            ErrorCode::NoAvailableProviders => "No providers are available right now.",
            ErrorCode::ProviderAlreadyAssigned => {
                "This provider is already assigned to the order."
            }
            ErrorCode::InvalidOrderStatus => "The order's status does not allow this action.",
            ErrorCode::AccountSuspensionFailed => "The account could not be suspended.",
            ErrorCode::CustomerAlreadySuspended => "This account is already suspended.",
        }
    }
}
