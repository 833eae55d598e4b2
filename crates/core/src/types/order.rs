//! Order records and store-boundary normalization.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::{OrderId, OrderStatus};

/// A fully-populated order record.
///
/// Produced from [`OrderDocument`] at the store boundary. Every field is
/// defaulted there, so downstream code never re-checks for absence; the only
/// remaining optional is `created_at`, whose absence has defined semantics
/// in the query engine.
///
/// Serializes with `camelCase` keys and `created_at` as seconds since the
/// epoch, matching the persisted document shape.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Order {
    pub id: OrderId,
    /// Customer display name; empty when the inquiry came in without one.
    pub name: String,
    /// Contact phone number; may be empty.
    pub phone: String,
    pub product_id: String,
    pub product_name: String,
    pub status: OrderStatus,
    /// Creation instant at seconds precision. Orders without one are
    /// excluded from date-filtered views and sort last otherwise.
    #[serde(default, with = "chrono::serde::ts_seconds_option")]
    pub created_at: Option<DateTime<Utc>>,
    #[serde(default)]
    pub request_complete: bool,
}

impl Order {
    /// Normalize a raw document into a fully-populated record.
    ///
    /// Unrecognized status strings coerce to `inquiry`; missing strings
    /// default to empty.
    #[must_use]
    pub fn from_document(id: OrderId, doc: OrderDocument) -> Self {
        Self {
            id,
            name: doc.name.unwrap_or_default(),
            phone: doc.phone.unwrap_or_default(),
            product_id: doc.product_id.unwrap_or_default(),
            product_name: doc.product_name.unwrap_or_default(),
            status: OrderStatus::normalize(doc.status.as_deref()),
            created_at: doc.created_at,
            request_complete: doc.request_complete.unwrap_or_default(),
        }
    }
}

/// Raw persisted shape of an order document.
///
/// Every field is optional and `status` is an arbitrary string; documents
/// written by older clients routinely omit fields. [`Order::from_document`]
/// is the single normalization point.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct OrderDocument {
    pub name: Option<String>,
    pub phone: Option<String>,
    pub product_id: Option<String>,
    pub product_name: Option<String>,
    pub status: Option<String>,
    #[serde(with = "chrono::serde::ts_seconds_option")]
    pub created_at: Option<DateTime<Utc>>,
    pub request_complete: Option<bool>,
}
