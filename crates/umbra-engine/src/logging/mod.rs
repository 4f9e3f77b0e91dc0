//! Logging utilities.
//!
//! The engine only talks to the `log` facade. Hosts that want output call
//! [`init_logging`] early; hosts that install their own logger skip it.

mod init;

pub use init::{init_logging, LoggingConfig};
