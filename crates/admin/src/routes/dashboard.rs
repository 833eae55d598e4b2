//! Dashboard page handler.
//!
//! Renders the status-bucketed overview. The page goes through the same
//! `select` + `bucket_by_status` composition as the JSON API, so the two
//! surfaces always agree on filtering and bucketing.

use askama::Template;
use axum::{
    Router,
    extract::{Query, State},
    response::Html,
    routing::get,
};
use chrono::{DateTime, Local, Utc};
use serde::Deserialize;
use tracing::instrument;

use orderdesk_core::{Order, OrderStatus, query};

use crate::{error::AppError, state::AppState};

/// Build the dashboard router.
#[must_use]
pub fn router() -> Router<AppState> {
    Router::new().route("/", get(index))
}

/// Relative day presets offered by the filter tabs.
const DATE_FILTERS: [(&str, i64); 5] = [
    ("All", query::ALL_DAYS),
    ("Today", 0),
    ("Yesterday", 1),
    ("2 Days Ago", 2),
    ("3 Days Ago", 3),
];

/// Date filter query parameters.
#[derive(Debug, Deserialize)]
pub struct DashboardQuery {
    pub days: Option<i64>,
}

/// Date filter tab view for templates.
#[derive(Debug, Clone)]
pub struct DateFilterView {
    pub label: &'static str,
    pub days: i64,
    pub active: bool,
}

/// Order view for templates.
#[derive(Debug, Clone)]
pub struct OrderView {
    pub id: String,
    pub short_id: String,
    pub name: String,
    pub phone: String,
    pub product_name: String,
    pub created_at: String,
    /// Empty for the terminal status - the template renders no button.
    pub action_label: String,
    /// Wire value of the next status, submitted by the advance button.
    pub next_status: String,
}

impl From<&Order> for OrderView {
    fn from(order: &Order) -> Self {
        let info = order.status.info();
        Self {
            id: order.id.to_string(),
            short_id: short_id(order.id.as_str()),
            name: if order.name.is_empty() {
                "Unknown Customer".to_string()
            } else {
                order.name.clone()
            },
            phone: order.phone.clone(),
            product_name: order.product_name.clone(),
            created_at: format_created_at(order.created_at),
            action_label: info.action_label.unwrap_or_default().to_string(),
            next_status: order
                .status
                .next()
                .map(|s| s.to_string())
                .unwrap_or_default(),
        }
    }
}

/// Status bucket card view for templates.
#[derive(Debug, Clone)]
pub struct StatusCardView {
    pub title: &'static str,
    pub count: usize,
    pub orders: Vec<OrderView>,
}

/// Dashboard page template.
#[derive(Template)]
#[template(path = "dashboard/index.html")]
pub struct DashboardTemplate {
    pub filters: Vec<DateFilterView>,
    pub cards: Vec<StatusCardView>,
    pub total: usize,
}

/// Status-bucketed dashboard page.
///
/// # Errors
///
/// Returns `AppError::Validation` for out-of-contract day offsets,
/// `AppError::Store` if the collection scan fails, and `AppError::Internal`
/// if the template does not render.
#[instrument(skip(state))]
pub async fn index(
    State(state): State<AppState>,
    Query(params): Query<DashboardQuery>,
) -> Result<Html<String>, AppError> {
    let orders = state.store().list_all().await?;
    let selected = query::select(orders, params.days, &Local::now())?;
    let total = selected.len();
    let buckets = query::bucket_by_status(selected);

    let cards = OrderStatus::ALL
        .into_iter()
        .map(|status| {
            let orders = buckets.get(status);
            StatusCardView {
                title: status.info().title,
                count: orders.len(),
                orders: orders.iter().map(OrderView::from).collect(),
            }
        })
        .collect();

    let days = params.days.unwrap_or(query::ALL_DAYS);
    let filters = DATE_FILTERS
        .into_iter()
        .map(|(label, filter_days)| DateFilterView {
            label,
            days: filter_days,
            active: filter_days == days,
        })
        .collect();

    let template = DashboardTemplate {
        filters,
        cards,
        total,
    };
    template
        .render()
        .map(Html)
        .map_err(|e| AppError::Internal(format!("template render error: {e}")))
}

// =============================================================================
// Helper Functions
// =============================================================================

/// First characters of a document id for compact display.
fn short_id(id: &str) -> String {
    let mut short: String = id.chars().take(8).collect();
    if id.chars().count() > 8 {
        short.push_str("...");
    }
    short
}

/// Format a creation instant for display, in the server's local timezone.
fn format_created_at(created_at: Option<DateTime<Utc>>) -> String {
    created_at.map_or_else(
        || "Unknown".to_string(),
        |t| t.with_timezone(&Local).format("%b %-d, %Y %H:%M").to_string(),
    )
}

#[cfg(test)]
mod tests {
    use chrono::TimeZone;

    use orderdesk_core::{OrderDocument, OrderId};

    use super::*;

    #[test]
    fn test_short_id_truncates_long_ids() {
        assert_eq!(short_id("abcd"), "abcd");
        assert_eq!(short_id("abcdefgh"), "abcdefgh");
        assert_eq!(short_id("abcdefghijkl"), "abcdefgh...");
    }

    #[test]
    fn test_order_view_placeholders() {
        let order = Order::from_document(OrderId::new("ord-1"), OrderDocument::default());
        let view = OrderView::from(&order);

        assert_eq!(view.name, "Unknown Customer");
        assert_eq!(view.created_at, "Unknown");
        assert_eq!(view.action_label, "Start Processing");
        assert_eq!(view.next_status, "on_track");
    }

    #[test]
    fn test_order_view_terminal_has_no_action() {
        let doc = OrderDocument {
            status: Some("completed".to_string()),
            created_at: Utc.timestamp_opt(1_717_578_000, 0).single(),
            ..OrderDocument::default()
        };
        let order = Order::from_document(OrderId::new("ord-2"), doc);
        let view = OrderView::from(&order);

        assert_eq!(view.action_label, "");
        assert_eq!(view.next_status, "");
        assert_ne!(view.created_at, "Unknown");
    }
}
