//! Integration tests for sloany.
//!
//! Everything runs against the stub query service and transport; no network
//! access is needed.
//!
//! Run with: `cargo test --test integration_tests`

mod integration;
