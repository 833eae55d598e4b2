//! Integration test helpers for Orderdesk.
//!
//! Builds the full application router against an in-memory store, so tests
//! exercise routing, extraction, the query engine, and error mapping without
//! a database or a running server.

#![cfg_attr(not(test), forbid(unsafe_code))]

use std::net::{IpAddr, Ipv4Addr};
use std::sync::Arc;

use axum::Router;
use secrecy::SecretString;

use orderdesk_admin::config::DashboardConfig;
use orderdesk_admin::routes;
use orderdesk_admin::state::AppState;
use orderdesk_admin::store::{MemoryOrderStore, OrderStore};

/// Configuration for tests; never used to open connections.
#[must_use]
pub fn test_config() -> DashboardConfig {
    DashboardConfig {
        database_url: SecretString::from("postgres://unused/test"),
        host: IpAddr::V4(Ipv4Addr::LOCALHOST),
        port: 0,
        sentry_dsn: None,
        sentry_environment: None,
        sentry_sample_rate: 1.0,
        sentry_traces_sample_rate: 1.0,
    }
}

/// Build the application router backed by `store`.
///
/// The caller keeps its own handle on the store to seed documents and to
/// inspect state after requests.
#[must_use]
pub fn test_app(order_store: Arc<MemoryOrderStore>) -> Router {
    let order_store: Arc<dyn OrderStore> = order_store;
    let state = AppState::new(test_config(), order_store);
    routes::routes().with_state(state)
}
