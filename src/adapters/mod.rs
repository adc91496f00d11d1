//! Infrastructure adapters. Implement outbound ports.
//!
//! Admin backends, message catalogs, attempt sinks, console UI.

pub mod backend;
pub mod catalog;
pub mod logging;
pub mod ui;
