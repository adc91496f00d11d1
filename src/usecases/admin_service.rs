//! Admin operations. Each one is validation + remote call + business rules,
//! run through the resilient invoker.
//!
//! - Pre-validation fails fast without touching the backend
//! - Business declines map through an ordered rule list, never retried
//! - An empty provider list is reported as `NO_AVAILABLE_PROVIDERS` without retry

use crate::domain::{
    AdminError, ContextSeed, ErrorCode, Provider, ReassignOrderRequest, ReassignmentReceipt,
    ServiceType, SuspendCustomerRequest, SuspensionReceipt,
};
use crate::ports::AdminBackend;
use crate::usecases::classifier::BusinessRules;
use crate::usecases::invoker::{Operation, ResilientInvoker};
use std::sync::Arc;
use tracing::info;

pub const LIST_AVAILABLE_PROVIDERS: &str = "list_available_providers";
pub const REASSIGN_ORDER: &str = "reassign_order";
pub const SUSPEND_CUSTOMER: &str = "suspend_customer";

fn is_blank(value: &str) -> bool {
    value.trim().is_empty()
}

/// Order id is checked before provider id.
pub fn validate_reassignment(request: &ReassignOrderRequest) -> Result<(), ErrorCode> {
    if is_blank(&request.order_id) {
        return Err(ErrorCode::InvalidOrderId);
    }
    if is_blank(&request.new_provider_id) {
        return Err(ErrorCode::InvalidProviderId);
    }
    Ok(())
}

pub fn validate_suspension(request: &SuspendCustomerRequest) -> Result<(), ErrorCode> {
    if is_blank(&request.customer_id) {
        return Err(ErrorCode::InvalidCustomerId);
    }
    Ok(())
}

/// Admin operations service.
pub struct AdminService {
    backend: Arc<dyn AdminBackend>,
    invoker: ResilientInvoker,
    providers_rules: BusinessRules,
    reassign_rules: BusinessRules,
    suspend_rules: BusinessRules,
}

impl AdminService {
    pub fn new(backend: Arc<dyn AdminBackend>, invoker: ResilientInvoker) -> Self {
        Self {
            backend,
            invoker,
            providers_rules: BusinessRules::new(ErrorCode::AdminUnknownError),
            reassign_rules: BusinessRules::new(ErrorCode::OrderReassignmentFailed)
                .rule("already assigned", ErrorCode::ProviderAlreadyAssigned)
                .rule("invalid status", ErrorCode::InvalidOrderStatus),
            suspend_rules: BusinessRules::new(ErrorCode::AccountSuspensionFailed)
                .rule("already suspended", ErrorCode::CustomerAlreadySuspended),
        }
    }

    /// Providers of `service_type` able to take work. An empty list is an error.
    pub async fn list_available_providers(
        &self,
        service_type: ServiceType,
    ) -> Result<Vec<Provider>, AdminError> {
        let seed = ContextSeed::new().meta("serviceType", service_type.as_str());
        let op = Operation::new(LIST_AVAILABLE_PROVIDERS, &self.providers_rules, || {
            self.backend.available_providers(service_type)
        })
        .seed(seed.clone());

        let providers = self.invoker.invoke(op).await?;
        if providers.is_empty() {
            info!(service_type = %service_type, "no available providers");
            return Err(AdminError::terminal(
                ErrorCode::NoAvailableProviders,
                seed.stamp(LIST_AVAILABLE_PROVIDERS),
            ));
        }
        info!(
            service_type = %service_type,
            count = providers.len(),
            "listed available providers"
        );
        Ok(providers)
    }

    /// Move an order to another provider.
    ///
    /// Error metadata always echoes `orderType`, `reason` and `notes`.
    pub async fn reassign_order(
        &self,
        request: &ReassignOrderRequest,
    ) -> Result<ReassignmentReceipt, AdminError> {
        let seed = ContextSeed::new()
            .order_id(request.order_id.clone())
            .provider_id(request.new_provider_id.clone())
            .meta("orderType", request.order_type.as_str())
            .meta("reason", request.reason.clone())
            .meta("notes", request.notes.clone().unwrap_or_default());
        let op = Operation::new(REASSIGN_ORDER, &self.reassign_rules, || {
            self.backend.reassign_order(request)
        })
        .seed(seed)
        .validate(move || validate_reassignment(request));

        let receipt = self.invoker.invoke(op).await?;
        info!(
            order_id = %receipt.order_id,
            provider_id = %receipt.new_provider_id,
            previous = receipt.previous_provider_id.as_deref().unwrap_or("-"),
            "order reassigned"
        );
        Ok(receipt)
    }

    /// Suspend a customer account.
    pub async fn suspend_customer(
        &self,
        request: &SuspendCustomerRequest,
    ) -> Result<SuspensionReceipt, AdminError> {
        let mut seed = ContextSeed::new()
            .customer_id(request.customer_id.clone())
            .meta("reason", request.reason.clone());
        if let Some(days) = request.duration_days {
            seed = seed.meta("durationDays", days);
        }
        let op = Operation::new(SUSPEND_CUSTOMER, &self.suspend_rules, || {
            self.backend.suspend_customer(request)
        })
        .seed(seed)
        .validate(move || validate_suspension(request));

        let receipt = self.invoker.invoke(op).await?;
        info!(customer_id = %receipt.customer_id, "customer suspended");
        Ok(receipt)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::backend::InMemoryBackend;
    use crate::adapters::logging::MemoryAttemptSink;
    use crate::domain::{OrderStatus, RetryPolicy};
    use crate::ports::RawFailure;
    use crate::usecases::classifier::{BUSINESS_ERROR_KEY, Classifier};

    struct Harness {
        backend: Arc<InMemoryBackend>,
        sink: Arc<MemoryAttemptSink>,
        service: AdminService,
    }

    fn harness(backend: InMemoryBackend) -> Harness {
        let backend = Arc::new(backend);
        let sink = Arc::new(MemoryAttemptSink::new());
        let invoker = ResilientInvoker::new(
            RetryPolicy::default(),
            Arc::new(Classifier::new()),
            Arc::clone(&sink) as Arc<dyn crate::ports::AttemptSink>,
        );
        let service = AdminService::new(Arc::clone(&backend) as Arc<dyn AdminBackend>, invoker);
        Harness {
            backend,
            sink,
            service,
        }
    }

    fn reassign(order_id: &str, provider_id: &str) -> ReassignOrderRequest {
        ReassignOrderRequest {
            order_id: order_id.to_string(),
            new_provider_id: provider_id.to_string(),
            order_type: ServiceType::Ride,
            reason: "driver unreachable".to_string(),
            notes: Some("customer called twice".to_string()),
        }
    }

    #[tokio::test(start_paused = true)]
    async fn test_empty_order_id_makes_no_call() {
        let h = harness(InMemoryBackend::seeded());
        let err = h
            .service
            .reassign_order(&reassign("", "drv-001"))
            .await
            .unwrap_err();

        assert_eq!(err.code(), ErrorCode::InvalidOrderId);
        assert_eq!(h.backend.calls(), 0);
        let ctx = err.context();
        assert_eq!(ctx.meta_text("orderType"), Some("ride"));
        assert_eq!(ctx.meta_text("reason"), Some("driver unreachable"));
        assert_eq!(ctx.meta_text("notes"), Some("customer called twice"));
    }

    #[tokio::test(start_paused = true)]
    async fn test_order_id_checked_before_provider_id() {
        let h = harness(InMemoryBackend::seeded());
        let err = h.service.reassign_order(&reassign(" ", "")).await.unwrap_err();
        assert_eq!(err.code(), ErrorCode::InvalidOrderId);

        let err = h
            .service
            .reassign_order(&reassign("ord-1001", "  "))
            .await
            .unwrap_err();
        assert_eq!(err.code(), ErrorCode::InvalidProviderId);
        assert_eq!(h.backend.calls(), 0);
    }

    #[tokio::test(start_paused = true)]
    async fn test_empty_provider_list_is_not_retried() {
        let h = harness(InMemoryBackend::new());
        let err = h
            .service
            .list_available_providers(ServiceType::Shopping)
            .await
            .unwrap_err();

        assert_eq!(err.code(), ErrorCode::NoAvailableProviders);
        assert!(!err.is_retryable());
        assert_eq!(h.backend.calls(), 1);
        assert!(h.sink.records().is_empty());
        assert_eq!(err.context().meta_text("serviceType"), Some("shopping"));
    }

    #[tokio::test(start_paused = true)]
    async fn test_timeouts_then_success() {
        let h = harness(InMemoryBackend::seeded());
        h.backend
            .push_fault(RawFailure::new("deadline-exceeded", "timeout"));
        h.backend
            .push_fault(RawFailure::new("deadline-exceeded", "timeout"));

        let providers = h
            .service
            .list_available_providers(ServiceType::Delivery)
            .await
            .unwrap();

        assert_eq!(providers.len(), 1);
        assert_eq!(h.backend.calls(), 3);
        let delays: Vec<u64> = h.sink.records().iter().map(|r| r.delay_ms()).collect();
        assert_eq!(delays, vec![1000, 2000]);
    }

    #[tokio::test(start_paused = true)]
    async fn test_already_assigned_single_call() {
        let h = harness(InMemoryBackend::seeded());
        let err = h
            .service
            .reassign_order(&reassign("ord-1001", "drv-002"))
            .await
            .unwrap_err();

        assert_eq!(err.code(), ErrorCode::ProviderAlreadyAssigned);
        assert_eq!(h.backend.calls(), 1);
        let ctx = err.context();
        assert_eq!(ctx.order_id(), Some("ord-1001"));
        assert_eq!(ctx.provider_id(), Some("drv-002"));
        assert_eq!(
            ctx.meta_text(BUSINESS_ERROR_KEY),
            Some("Provider already assigned to this order")
        );
        assert_eq!(ctx.meta_text("orderType"), Some("ride"));
    }

    #[tokio::test(start_paused = true)]
    async fn test_invalid_status_and_fallback_codes() {
        let h = harness(InMemoryBackend::seeded());
        let err = h
            .service
            .reassign_order(&reassign("ord-1003", "drv-002"))
            .await
            .unwrap_err();
        assert_eq!(err.code(), ErrorCode::InvalidOrderStatus);

        let err = h
            .service
            .reassign_order(&reassign("ord-404", "drv-002"))
            .await
            .unwrap_err();
        assert_eq!(err.code(), ErrorCode::OrderReassignmentFailed);
        assert_eq!(
            err.context().meta_text(BUSINESS_ERROR_KEY),
            Some("Order ord-404 not found")
        );
        assert_eq!(h.backend.calls(), 2);
    }

    #[tokio::test(start_paused = true)]
    async fn test_reassign_success() {
        let h = harness(InMemoryBackend::seeded());
        h.backend
            .add_order("ord-2001", ServiceType::Ride, OrderStatus::Pending, None)
            .await;
        let receipt = h
            .service
            .reassign_order(&reassign("ord-2001", "drv-001"))
            .await
            .unwrap();
        assert_eq!(receipt.previous_provider_id, None);
        assert_eq!(
            h.backend.assigned_provider("ord-2001").await.as_deref(),
            Some("drv-001")
        );
    }

    #[tokio::test(start_paused = true)]
    async fn test_permission_denied_on_mutation() {
        let h = harness(InMemoryBackend::seeded());
        h.backend
            .push_fault(RawFailure::new("permission-denied", "not an admin"));
        let err = h
            .service
            .reassign_order(&reassign("ord-1001", "drv-001"))
            .await
            .unwrap_err();
        assert_eq!(err.code(), ErrorCode::InsufficientAdminPermissions);
        assert_eq!(h.backend.calls(), 1);
        let ctx = err.context();
        assert_eq!(ctx.order_id(), Some("ord-1001"));
        assert_eq!(ctx.meta_text("orderType"), Some("ride"));
        assert_eq!(ctx.meta_text("reason"), Some("driver unreachable"));
        assert_eq!(ctx.meta_text("notes"), Some("customer called twice"));
        // the mutation never ran
        assert_eq!(
            h.backend.assigned_provider("ord-1001").await.as_deref(),
            Some("drv-002")
        );
    }

    #[tokio::test(start_paused = true)]
    async fn test_suspend_customer_paths() {
        let h = harness(InMemoryBackend::seeded());
        let mut request = SuspendCustomerRequest {
            customer_id: String::new(),
            reason: "chargeback fraud".to_string(),
            duration_days: Some(30),
        };
        let err = h.service.suspend_customer(&request).await.unwrap_err();
        assert_eq!(err.code(), ErrorCode::InvalidCustomerId);
        assert_eq!(h.backend.calls(), 0);

        request.customer_id = "cus-501".to_string();
        let receipt = h.service.suspend_customer(&request).await.unwrap();
        assert_eq!(receipt.customer_id, "cus-501");

        let err = h.service.suspend_customer(&request).await.unwrap_err();
        assert_eq!(err.code(), ErrorCode::CustomerAlreadySuspended);
        assert_eq!(
            err.context().metadata().get("durationDays"),
            Some(&crate::domain::MetaValue::Int(30))
        );

        request.customer_id = "cus-999".to_string();
        let err = h.service.suspend_customer(&request).await.unwrap_err();
        assert_eq!(err.code(), ErrorCode::AccountSuspensionFailed);
    }
}
