//! Admin backend adapters. Implement AdminBackend.
//!
//! HTTP for deployments, in-memory for local runs and tests.

pub mod http;
pub mod memory;

pub use http::HttpAdminBackend;
pub use memory::InMemoryBackend;
