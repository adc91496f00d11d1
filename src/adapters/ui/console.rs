//! Implements InputPort. Inquire-based admin console.
//!
//! Shows a spinner while an operation is busy and the localized message when
//! it fails; code and context go to the log for operators.

use crate::domain::{DomainError, ReassignOrderRequest, ServiceType, SuspendCustomerRequest};
use crate::ports::{InputPort, MessageCatalog};
use crate::usecases::{AdminPanel, CallSite};
use async_trait::async_trait;
use indicatif::{ProgressBar, ProgressStyle};
use inquire::validator::Validation;
use inquire::{InquireError, Select, Text};
use std::fmt;
use std::future::Future;
use std::sync::Arc;
use std::time::Duration;
use tracing::warn;

#[derive(Debug, Clone, Copy)]
enum MenuItem {
    ListProviders,
    ReassignOrder,
    SuspendCustomer,
    Quit,
}

impl fmt::Display for MenuItem {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::ListProviders => "List available providers",
            Self::ReassignOrder => "Reassign order",
            Self::SuspendCustomer => "Suspend customer account",
            Self::Quit => "Quit",
        })
    }
}

/// Console adapter over the admin panel.
pub struct ConsoleInputPort {
    panel: Arc<AdminPanel>,
    catalog: Arc<dyn MessageCatalog>,
}

impl ConsoleInputPort {
    pub fn new(panel: Arc<AdminPanel>, catalog: Arc<dyn MessageCatalog>) -> Self {
        Self { panel, catalog }
    }

    async fn with_spinner<T>(&self, label: &str, call: impl Future<Output = Option<T>>) -> Option<T> {
        let pb = ProgressBar::new_spinner();
        if let Ok(style) = ProgressStyle::with_template("{spinner} {msg}") {
            pb.set_style(style);
        }
        pb.set_message(label.to_string());
        pb.enable_steady_tick(Duration::from_millis(100));
        let value = call.await;
        pb.finish_and_clear();
        value
    }

    fn report_failure(&self, site: &CallSite) {
        if let Some(err) = site.last_error() {
            println!("✗ {}", err.user_message(self.catalog.as_ref()));
            let context = serde_json::to_string(err.context()).unwrap_or_default();
            warn!(code = %err.code(), context = %context, "admin operation failed");
        }
    }

    async fn list_providers(&self) -> Result<(), DomainError> {
        let service_type = Select::new("Service type", ServiceType::ALL.to_vec())
            .prompt()
            .map_err(ui_error)?;
        let providers = self
            .with_spinner(
                "Fetching providers...",
                self.panel.list_available_providers(service_type),
            )
            .await;
        match providers {
            Some(providers) => {
                for p in providers {
                    let rating = p
                        .rating
                        .map(|r| format!("{:.1}", r))
                        .unwrap_or_else(|| "-".to_string());
                    println!(
                        "  {}  {}  rating {}  active {}",
                        p.id, p.name, rating, p.active_orders
                    );
                }
            }
            None => self.report_failure(self.panel.providers_site()),
        }
        Ok(())
    }

    async fn reassign_order(&self) -> Result<(), DomainError> {
        let order_id = Text::new("Order ID:").prompt().map_err(ui_error)?;
        let order_type = Select::new("Order type", ServiceType::ALL.to_vec())
            .prompt()
            .map_err(ui_error)?;
        let new_provider_id = Text::new("New provider ID:").prompt().map_err(ui_error)?;
        let reason = Text::new("Reason:").prompt().map_err(ui_error)?;
        let notes = Text::new("Notes (optional):").prompt().map_err(ui_error)?;

        let request = ReassignOrderRequest {
            order_id,
            new_provider_id,
            order_type,
            reason,
            notes: Some(notes).filter(|n| !n.trim().is_empty()),
        };
        match self
            .with_spinner("Reassigning order...", self.panel.reassign_order(&request))
            .await
        {
            Some(receipt) => println!(
                "✓ Order {} now assigned to {}",
                receipt.order_id, receipt.new_provider_id
            ),
            None => self.report_failure(self.panel.reassign_site()),
        }
        Ok(())
    }

    async fn suspend_customer(&self) -> Result<(), DomainError> {
        let customer_id = Text::new("Customer ID:").prompt().map_err(ui_error)?;
        let reason = Text::new("Reason:").prompt().map_err(ui_error)?;
        let days = Text::new("Duration in days (empty = indefinite):")
            .with_validator(|input: &str| {
                Ok(match parse_duration_days(input) {
                    Ok(_) => Validation::Valid,
                    Err(msg) => Validation::Invalid(msg.into()),
                })
            })
            .prompt()
            .map_err(ui_error)?;

        let request = SuspendCustomerRequest {
            customer_id,
            reason,
            duration_days: parse_duration_days(&days).map_err(DomainError::Ui)?,
        };
        match self
            .with_spinner("Suspending account...", self.panel.suspend_customer(&request))
            .await
        {
            Some(receipt) => println!("✓ Customer {} suspended", receipt.customer_id),
            None => self.report_failure(self.panel.suspend_site()),
        }
        Ok(())
    }
}

/// Blank means indefinite; anything else must be a positive whole number of days.
fn parse_duration_days(input: &str) -> Result<Option<u32>, String> {
    let input = input.trim();
    if input.is_empty() {
        return Ok(None);
    }
    match input.parse::<u32>() {
        Ok(0) | Err(_) => Err(format!(
            "'{}' is not a positive number of days (leave empty for indefinite)",
            input
        )),
        Ok(days) => Ok(Some(days)),
    }
}

fn ui_error(e: InquireError) -> DomainError {
    match e {
        InquireError::OperationCanceled | InquireError::OperationInterrupted => {
            DomainError::Cancelled
        }
        other => DomainError::Ui(other.to_string()),
    }
}

#[async_trait]
impl InputPort for ConsoleInputPort {
    async fn run(&self) -> Result<(), DomainError> {
        let items = vec![
            MenuItem::ListProviders,
            MenuItem::ReassignOrder,
            MenuItem::SuspendCustomer,
            MenuItem::Quit,
        ];
        loop {
            let choice = match Select::new("Admin action", items.clone()).prompt() {
                Ok(choice) => choice,
                Err(e) => {
                    return match ui_error(e) {
                        DomainError::Cancelled => Ok(()),
                        other => Err(other),
                    };
                }
            };
            let outcome = match choice {
                MenuItem::ListProviders => self.list_providers().await,
                MenuItem::ReassignOrder => self.reassign_order().await,
                MenuItem::SuspendCustomer => self.suspend_customer().await,
                MenuItem::Quit => return Ok(()),
            };
            // Esc inside a form returns to the menu.
            match outcome {
                Ok(()) | Err(DomainError::Cancelled) => {}
                Err(e) => return Err(e),
            }
        }
    }
}
