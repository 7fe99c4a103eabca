//! Shared helpers for the client test suites.

pub mod logging;
