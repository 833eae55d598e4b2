//! Orders JSON API handlers.

use axum::{
    Json, Router,
    extract::{Path, Query, State},
    routing::{get, post},
};
use chrono::Local;
use serde::{Deserialize, Serialize};
use tracing::instrument;

use orderdesk_core::{Order, OrderId, OrderStatus, query};

use crate::{error::AppError, state::AppState};

/// Build the orders API router.
#[must_use]
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/orders", get(list))
        .route("/orders/{id}/status", post(update_status))
        .route("/orders/{id}/complete", post(complete))
}

/// Date filter query parameters.
#[derive(Debug, Deserialize)]
pub struct ListQuery {
    /// Relative day offset: 0 = today, 1 = yesterday, -1 or absent = all.
    pub days: Option<i64>,
}

/// Successful listing payload.
#[derive(Debug, Serialize)]
pub struct OrdersResponse {
    pub success: bool,
    pub orders: Vec<Order>,
}

/// Successful mutation payload.
#[derive(Debug, Serialize)]
pub struct AckResponse {
    pub success: bool,
}

/// Order listing, filtered to one day when `days` is given, newest first.
///
/// # Errors
///
/// Returns `AppError::Validation` for day offsets below `-1` and
/// `AppError::Store` if the collection scan fails.
#[instrument(skip(state))]
pub async fn list(
    State(state): State<AppState>,
    Query(params): Query<ListQuery>,
) -> Result<Json<OrdersResponse>, AppError> {
    let orders = state.store().list_all().await?;
    let orders = query::select(orders, params.days, &Local::now())?;

    Ok(Json(OrdersResponse {
        success: true,
        orders,
    }))
}

/// Status update request body.
#[derive(Debug, Deserialize)]
pub struct UpdateStatusRequest {
    pub status: String,
}

/// Advance an order to the next lifecycle status.
///
/// The requested status must be exactly the successor of the order's current
/// status; skipping stages, regressing, and advancing a completed order are
/// all rejected.
///
/// # Errors
///
/// Returns `AppError::Validation` for unknown or non-adjacent target
/// statuses, `AppError::NotFound` for unknown ids, and `AppError::Store`
/// if persistence fails.
#[instrument(skip(state))]
pub async fn update_status(
    State(state): State<AppState>,
    Path(id): Path<String>,
    Json(body): Json<UpdateStatusRequest>,
) -> Result<Json<AckResponse>, AppError> {
    let target: OrderStatus = body.status.parse().map_err(AppError::Validation)?;

    let id = OrderId::new(id);
    let order = state.store().get(&id).await?;

    let Some(expected) = order.status.next() else {
        return Err(AppError::Validation(format!(
            "order {id} is already {} and cannot advance",
            order.status
        )));
    };
    if target != expected {
        return Err(AppError::Validation(format!(
            "cannot move order {id} from {} to {target}; next status is {expected}",
            order.status
        )));
    }

    state.store().update_status(&id, target).await?;
    tracing::info!(order_id = %id, status = %target, "Order status advanced");

    Ok(Json(AckResponse { success: true }))
}

/// Flag an order's request as fulfilled.
///
/// # Errors
///
/// Returns `AppError::NotFound` for unknown ids and `AppError::Store` if
/// persistence fails.
#[instrument(skip(state))]
pub async fn complete(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<AckResponse>, AppError> {
    let id = OrderId::new(id);
    state.store().mark_request_complete(&id).await?;
    tracing::info!(order_id = %id, "Order request marked complete");

    Ok(Json(AckResponse { success: true }))
}
