//! HTTP route handlers for the dashboard.
//!
//! # Route Structure
//!
//! ```text
//! GET  /health               - Liveness check
//! GET  /health/ready         - Readiness check (store ping)
//!
//! # Dashboard
//! GET  /                     - Status-bucketed overview page
//!
//! # Orders API
//! GET  /orders?days=N        - Filtered, newest-first order listing
//! POST /orders/{id}/status   - Advance an order to the next status
//! POST /orders/{id}/complete - Flag an order's request as fulfilled
//! ```

use axum::Router;

use crate::state::AppState;

pub mod dashboard;
pub mod orders;

/// Build the application router (health endpoints are added in `main`).
#[must_use]
pub fn routes() -> Router<AppState> {
    Router::new()
        .merge(dashboard::router())
        .merge(orders::router())
}
