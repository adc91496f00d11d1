//! In-process admin backend. Implements AdminBackend over an in-memory store.
//!
//! Enforces the same business rules the real backend declines with, and can
//! replay scripted transport failures before answering.

use crate::domain::{
    OrderStatus, Provider, ReassignOrderRequest, ReassignmentReceipt, ServiceType,
    SuspendCustomerRequest, SuspensionReceipt,
};
use crate::ports::{AdminBackend, RawFailure, RemoteResult, Reply};
use chrono::Utc;
use std::collections::{HashMap, VecDeque};
use std::sync::{Mutex, PoisonError};
use std::sync::atomic::{AtomicU32, Ordering};
use std::time::Duration;
use tokio::sync::RwLock;
use tracing::debug;

/// Providers with this many active orders are not offered for new work.
const MAX_ACTIVE_ORDERS: u32 = 3;

const DAY_MS: i64 = 24 * 60 * 60 * 1000;

#[derive(Debug, Clone)]
struct OrderRecord {
    order_type: ServiceType,
    status: OrderStatus,
    provider_id: Option<String>,
}

#[derive(Debug, Default)]
struct Store {
    providers: Vec<Provider>,
    orders: HashMap<String, OrderRecord>,
    /// customer_id -> suspended
    customers: HashMap<String, bool>,
}

/// In-memory backend used when no remote backend is configured, and in tests.
#[derive(Debug, Default)]
pub struct InMemoryBackend {
    store: RwLock<Store>,
    faults: Mutex<VecDeque<RawFailure>>,
    calls: AtomicU32,
    delay_ms: u64,
}

impl InMemoryBackend {
    pub fn new() -> Self {
        Self::default()
    }

    /// Simulated network latency per call.
    pub fn with_delay(mut self, delay_ms: u64) -> Self {
        self.delay_ms = delay_ms;
        self
    }

    /// Small demo data set: a few providers per service type, orders, customers.
    pub fn seeded() -> Self {
        let provider = |id: &str, name: &str, kind: ServiceType, active: u32| Provider {
            id: id.to_string(),
            name: name.to_string(),
            service_type: kind,
            rating: Some(4.8),
            active_orders: active,
        };
        let order = |kind: ServiceType, status: OrderStatus, provider: Option<&str>| OrderRecord {
            order_type: kind,
            status,
            provider_id: provider.map(str::to_string),
        };
        let store = Store {
            providers: vec![
                provider("drv-001", "Somchai", ServiceType::Ride, 0),
                provider("drv-002", "Anong", ServiceType::Ride, 3),
                provider("rdr-001", "Kittisak", ServiceType::Delivery, 1),
                provider("shp-001", "Malee", ServiceType::Shopping, 2),
            ],
            orders: HashMap::from([
                (
                    "ord-1001".to_string(),
                    order(ServiceType::Ride, OrderStatus::Assigned, Some("drv-002")),
                ),
                (
                    "ord-1002".to_string(),
                    order(ServiceType::Delivery, OrderStatus::Pending, None),
                ),
                (
                    "ord-1003".to_string(),
                    order(ServiceType::Ride, OrderStatus::Completed, Some("drv-001")),
                ),
            ]),
            customers: HashMap::from([
                ("cus-501".to_string(), false),
                ("cus-502".to_string(), true),
            ]),
        };
        Self {
            store: RwLock::new(store),
            ..Self::default()
        }
    }

    pub async fn add_provider(&self, provider: Provider) {
        self.store.write().await.providers.push(provider);
    }

    pub async fn add_order(
        &self,
        order_id: &str,
        order_type: ServiceType,
        status: OrderStatus,
        provider_id: Option<&str>,
    ) {
        self.store.write().await.orders.insert(
            order_id.to_string(),
            OrderRecord {
                order_type,
                status,
                provider_id: provider_id.map(str::to_string),
            },
        );
    }

    pub async fn add_customer(&self, customer_id: &str, suspended: bool) {
        self.store
            .write()
            .await
            .customers
            .insert(customer_id.to_string(), suspended);
    }

    /// Queue a transport failure; the next call consumes it instead of answering.
    pub fn push_fault(&self, failure: RawFailure) {
        self.faults
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .push_back(failure);
    }

    /// Total procedure calls received, including faulted ones.
    pub fn calls(&self) -> u32 {
        self.calls.load(Ordering::SeqCst)
    }

    pub async fn assigned_provider(&self, order_id: &str) -> Option<String> {
        let store = self.store.read().await;
        store.orders.get(order_id).and_then(|o| o.provider_id.clone())
    }

    pub async fn is_suspended(&self, customer_id: &str) -> bool {
        let store = self.store.read().await;
        store.customers.get(customer_id).copied().unwrap_or(false)
    }

    /// Count the call, simulate latency, and replay a queued fault if any.
    async fn enter(&self, procedure: &str) -> Result<(), RawFailure> {
        let n = self.calls.fetch_add(1, Ordering::SeqCst) + 1;
        if self.delay_ms > 0 {
            tokio::time::sleep(Duration::from_millis(self.delay_ms)).await;
        }
        let fault = self
            .faults
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .pop_front();
        match fault {
            Some(failure) => {
                debug!(procedure, call = n, failure = %failure, "injected transport failure");
                Err(failure)
            }
            None => Ok(()),
        }
    }
}

#[async_trait::async_trait]
impl AdminBackend for InMemoryBackend {
    async fn available_providers(
        &self,
        service_type: ServiceType,
    ) -> RemoteResult<Vec<Provider>> {
        self.enter("getAvailableProviders").await?;
        let store = self.store.read().await;
        let providers = store
            .providers
            .iter()
            .filter(|p| p.service_type == service_type && p.active_orders < MAX_ACTIVE_ORDERS)
            .cloned()
            .collect();
        Ok(Reply::Done(providers))
    }

    async fn reassign_order(
        &self,
        request: &ReassignOrderRequest,
    ) -> RemoteResult<ReassignmentReceipt> {
        self.enter("reassignOrder").await?;
        let mut store = self.store.write().await;

        let Some(order) = store.orders.get(&request.order_id).cloned() else {
            return Ok(Reply::Declined(format!(
                "Order {} not found",
                request.order_id
            )));
        };
        if !order.status.allows_reassignment() {
            return Ok(Reply::Declined(format!(
                "Invalid status for reassignment: {:?}",
                order.status
            )));
        }
        let provider_known = store
            .providers
            .iter()
            .any(|p| p.id == request.new_provider_id && p.service_type == order.order_type);
        if !provider_known {
            return Ok(Reply::Declined(format!(
                "Provider {} cannot serve {} orders",
                request.new_provider_id, order.order_type
            )));
        }
        if order.provider_id.as_deref() == Some(request.new_provider_id.as_str()) {
            return Ok(Reply::Declined(
                "Provider already assigned to this order".to_string(),
            ));
        }

        for provider in store.providers.iter_mut() {
            if Some(&provider.id) == order.provider_id.as_ref() {
                provider.active_orders = provider.active_orders.saturating_sub(1);
            } else if provider.id == request.new_provider_id {
                provider.active_orders += 1;
            }
        }
        if let Some(record) = store.orders.get_mut(&request.order_id) {
            record.provider_id = Some(request.new_provider_id.clone());
            record.status = OrderStatus::Assigned;
        }

        Ok(Reply::Done(ReassignmentReceipt {
            order_id: request.order_id.clone(),
            previous_provider_id: order.provider_id,
            new_provider_id: request.new_provider_id.clone(),
            reassigned_at: Utc::now().timestamp_millis(),
        }))
    }

    async fn suspend_customer(
        &self,
        request: &SuspendCustomerRequest,
    ) -> RemoteResult<SuspensionReceipt> {
        self.enter("suspendCustomer").await?;
        let mut store = self.store.write().await;

        match store.customers.get_mut(&request.customer_id) {
            None => Ok(Reply::Declined(format!(
                "Customer {} not found",
                request.customer_id
            ))),
            Some(true) => Ok(Reply::Declined("Customer already suspended".to_string())),
            Some(suspended) => {
                *suspended = true;
                let now = Utc::now().timestamp_millis();
                Ok(Reply::Done(SuspensionReceipt {
                    customer_id: request.customer_id.clone(),
                    suspended_at: now,
                    suspended_until: request
                        .duration_days
                        .map(|days| now + i64::from(days) * DAY_MS),
                }))
            }
        }
    }
}
