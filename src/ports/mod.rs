//! Port traits. API boundaries for the hexagon.
//!
//! - Inbound: Called by UI/adapter into the application
//! - Outbound: Called by application into infrastructure

pub mod attempt_sink;
pub mod catalog;
pub mod inbound;
pub mod outbound;

pub use attempt_sink::AttemptSink;
pub use catalog::MessageCatalog;
pub use inbound::InputPort;
pub use outbound::{AdminBackend, RawFailure, RemoteResult, Reply};
