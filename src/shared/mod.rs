//! Cross-cutting concerns.

pub mod config;
