//! Remote authentication server library.
//!
//! Exposes the HTTP API, configuration, logging, and metrics modules so
//! integration tests can assemble the router without spawning a process.

pub mod api;
pub mod config;
pub mod logging;
pub mod metrics;
