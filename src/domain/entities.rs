//! Domain entities. Pure data structures for the admin surface.
//!
//! No transport types here; backends map their wire formats into these.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Kind of work a provider performs (and an order belongs to).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ServiceType {
    Ride,
    Delivery,
    Shopping,
}

impl ServiceType {
    pub const ALL: [ServiceType; 3] = [Self::Ride, Self::Delivery, Self::Shopping];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Ride => "ride",
            Self::Delivery => "delivery",
            Self::Shopping => "shopping",
        }
    }
}

impl fmt::Display for ServiceType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A service provider (driver, rider, shopper) that can take orders.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Provider {
    pub id: String,
    pub name: String,
    pub service_type: ServiceType,
    #[serde(default)]
    pub rating: Option<f32>,
    #[serde(default)]
    pub active_orders: u32,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum OrderStatus {
    Pending,
    Assigned,
    InProgress,
    Completed,
    Cancelled,
}

impl OrderStatus {
    /// Orders can only move between providers before they finish.
    pub fn allows_reassignment(&self) -> bool {
        matches!(self, Self::Pending | Self::Assigned | Self::InProgress)
    }
}

/// Arguments for moving an order to a different provider.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ReassignOrderRequest {
    pub order_id: String,
    pub new_provider_id: String,
    pub order_type: ServiceType,
    pub reason: String,
    #[serde(default)]
    pub notes: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ReassignmentReceipt {
    pub order_id: String,
    #[serde(default)]
    pub previous_provider_id: Option<String>,
    pub new_provider_id: String,
    /// Epoch millis.
    pub reassigned_at: i64,
}

/// Arguments for suspending a customer account.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SuspendCustomerRequest {
    pub customer_id: String,
    pub reason: String,
    /// `None` suspends until lifted manually.
    #[serde(default)]
    pub duration_days: Option<u32>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SuspensionReceipt {
    pub customer_id: String,
    /// Epoch millis.
    pub suspended_at: i64,
    #[serde(default)]
    pub suspended_until: Option<i64>,
}
