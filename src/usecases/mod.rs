//! Application use cases. Classification, retry loop, admin operations.

pub mod admin_panel;
pub mod admin_service;
pub mod call_site;
pub mod classifier;
pub mod invoker;

pub use admin_panel::AdminPanel;
pub use admin_service::AdminService;
pub use call_site::{CallSite, CallState};
pub use classifier::{BusinessRules, Classifier, Failure};
pub use invoker::{Operation, ResilientInvoker};
