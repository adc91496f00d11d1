//! Admin panel: the caller-facing surface over AdminService.
//!
//! One CallSite per operation; entry points return the payload or `None`,
//! leaving the error in that operation's slot.

use crate::domain::{
    Provider, ReassignOrderRequest, ReassignmentReceipt, ServiceType, SuspendCustomerRequest,
    SuspensionReceipt,
};
use crate::usecases::admin_service::AdminService;
use crate::usecases::call_site::CallSite;
use std::sync::Arc;

pub struct AdminPanel {
    service: Arc<AdminService>,
    providers: CallSite,
    reassign: CallSite,
    suspend: CallSite,
}

impl AdminPanel {
    pub fn new(service: Arc<AdminService>) -> Self {
        Self {
            service,
            providers: CallSite::new(),
            reassign: CallSite::new(),
            suspend: CallSite::new(),
        }
    }

    pub fn providers_site(&self) -> &CallSite {
        &self.providers
    }

    pub fn reassign_site(&self) -> &CallSite {
        &self.reassign
    }

    pub fn suspend_site(&self) -> &CallSite {
        &self.suspend
    }

    pub async fn list_available_providers(&self, service_type: ServiceType) -> Option<Vec<Provider>> {
        self.providers
            .run(self.service.list_available_providers(service_type))
            .await
    }

    pub async fn reassign_order(&self, request: &ReassignOrderRequest) -> Option<ReassignmentReceipt> {
        self.reassign.run(self.service.reassign_order(request)).await
    }

    pub async fn suspend_customer(
        &self,
        request: &SuspendCustomerRequest,
    ) -> Option<SuspensionReceipt> {
        self.suspend.run(self.service.suspend_customer(request)).await
    }
}
