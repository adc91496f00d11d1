//! Console UI adapter.

pub mod console;

pub use console::ConsoleInputPort;
