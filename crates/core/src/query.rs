//! Day-window filtering, recency sort, and status bucketing.
//!
//! These functions are the single implementation of the day-window rules;
//! every caller - JSON handlers and the rendered dashboard alike - composes
//! them the same way:
//!
//! ```text
//! bucket_by_status(sort_by_recency(filter_by_window(orders, compute_window(days)?)))
//! ```
//!
//! Filtering and sorting are order-preserving and commute; bucketing comes
//! last because it redistributes records across categories.

use chrono::{DateTime, Days, NaiveDate, NaiveTime, TimeDelta, TimeZone, Utc};
use serde::Serialize;
use thiserror::Error;

use crate::types::{Order, OrderStatus};

/// Sentinel day offset meaning "no filter".
pub const ALL_DAYS: i64 = -1;

/// Errors raised for caller contract violations.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum QueryError {
    /// Day offsets are `>= 0`, or [`ALL_DAYS`] to match every record.
    #[error("invalid day offset: {0} (expected -1 or a non-negative number of days)")]
    InvalidDayOffset(i64),
}

/// A half-open one-day instant range `[start, end)`.
///
/// Constructed fresh per query, never persisted.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DayWindow {
    pub start: DateTime<Utc>,
    pub end: DateTime<Utc>,
}

impl DayWindow {
    /// Whether `instant` falls inside the window.
    #[must_use]
    pub fn contains(&self, instant: DateTime<Utc>) -> bool {
        self.start <= instant && instant < self.end
    }
}

/// Translate a relative day offset into a one-day window.
///
/// `days_ago = 0` selects `[midnight today, midnight tomorrow)` in the
/// timezone of `now`. `None` or [`ALL_DAYS`] means no window; callers must
/// then include every record regardless of `created_at`. Any other negative
/// offset is a contract violation, never coerced.
///
/// The upper bound is the next *calendar* midnight rather than
/// `start + 24h`, so windows stay aligned to midnights across DST
/// transitions. `now` is a parameter, never read from the clock here.
///
/// # Errors
///
/// Returns [`QueryError::InvalidDayOffset`] for offsets below [`ALL_DAYS`]
/// or so large the window falls off the calendar.
pub fn compute_window<Tz: TimeZone>(
    days_ago: Option<i64>,
    now: &DateTime<Tz>,
) -> Result<Option<DayWindow>, QueryError> {
    let days = match days_ago {
        None | Some(ALL_DAYS) => return Ok(None),
        Some(days) if days >= 0 => days,
        Some(days) => return Err(QueryError::InvalidDayOffset(days)),
    };

    let day = now
        .date_naive()
        .checked_sub_days(Days::new(days.unsigned_abs()))
        .ok_or(QueryError::InvalidDayOffset(days))?;
    let next_day = day
        .checked_add_days(Days::new(1))
        .ok_or(QueryError::InvalidDayOffset(days))?;

    let tz = now.timezone();
    Ok(Some(DayWindow {
        start: local_midnight(&tz, day),
        end: local_midnight(&tz, next_day),
    }))
}

/// Midnight of `day` in `tz`, as a UTC instant.
///
/// A midnight skipped by a DST transition resolves to the first following
/// hour; an ambiguous midnight resolves to its earlier occurrence.
fn local_midnight<Tz: TimeZone>(tz: &Tz, day: NaiveDate) -> DateTime<Utc> {
    let midnight = day.and_time(NaiveTime::MIN);
    tz.from_local_datetime(&midnight)
        .earliest()
        .or_else(|| tz.from_local_datetime(&(midnight + TimeDelta::hours(1))).earliest())
        .map_or_else(
            || Utc.from_utc_datetime(&midnight),
            |local| local.with_timezone(&Utc),
        )
}

/// Keep the orders whose `created_at` falls inside `window`.
///
/// With no window every order passes unchanged, including those without a
/// timestamp. With a window, timestamp-less orders are dropped.
#[must_use]
pub fn filter_by_window(orders: Vec<Order>, window: Option<&DayWindow>) -> Vec<Order> {
    match window {
        None => orders,
        Some(window) => orders
            .into_iter()
            .filter(|order| order.created_at.is_some_and(|t| window.contains(t)))
            .collect(),
    }
}

/// Sort newest-first.
///
/// Orders without a timestamp sort as if created at the earliest possible
/// instant, i.e. last. The sort is stable: equal timestamps (including two
/// missing ones) keep their input order.
#[must_use]
pub fn sort_by_recency(mut orders: Vec<Order>) -> Vec<Order> {
    orders.sort_by(|a, b| b.created_at.cmp(&a.created_at));
    orders
}

/// Orders partitioned by lifecycle stage.
///
/// All four buckets are always present in serialized output, possibly
/// empty; within a bucket, orders keep the relative order of the input
/// sequence.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct StatusBuckets {
    pub inquiry: Vec<Order>,
    pub on_track: Vec<Order>,
    pub payment_done: Vec<Order>,
    pub completed: Vec<Order>,
}

impl StatusBuckets {
    /// The bucket holding orders with `status`.
    #[must_use]
    pub fn get(&self, status: OrderStatus) -> &[Order] {
        match status {
            OrderStatus::Inquiry => &self.inquiry,
            OrderStatus::OnTrack => &self.on_track,
            OrderStatus::PaymentDone => &self.payment_done,
            OrderStatus::Completed => &self.completed,
        }
    }

    fn get_mut(&mut self, status: OrderStatus) -> &mut Vec<Order> {
        match status {
            OrderStatus::Inquiry => &mut self.inquiry,
            OrderStatus::OnTrack => &mut self.on_track,
            OrderStatus::PaymentDone => &mut self.payment_done,
            OrderStatus::Completed => &mut self.completed,
        }
    }

    /// Total number of orders across all buckets.
    #[must_use]
    pub fn len(&self) -> usize {
        OrderStatus::ALL
            .into_iter()
            .map(|status| self.get(status).len())
            .sum()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// Partition orders into per-status buckets.
///
/// Statuses are already normalized at the store boundary, so every order
/// lands in exactly one of the four fixed buckets.
#[must_use]
pub fn bucket_by_status(orders: Vec<Order>) -> StatusBuckets {
    let mut buckets = StatusBuckets::default();
    for order in orders {
        buckets.get_mut(order.status).push(order);
    }
    buckets
}

/// Filter by day offset and sort newest-first.
///
/// The composition every caller uses before optionally bucketing the
/// result.
///
/// # Errors
///
/// Returns [`QueryError::InvalidDayOffset`] for out-of-contract offsets.
pub fn select<Tz: TimeZone>(
    orders: Vec<Order>,
    days_ago: Option<i64>,
    now: &DateTime<Tz>,
) -> Result<Vec<Order>, QueryError> {
    let window = compute_window(days_ago, now)?;
    Ok(sort_by_recency(filter_by_window(orders, window.as_ref())))
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use chrono::FixedOffset;

    use crate::types::{OrderDocument, OrderId};

    use super::*;

    fn order(id: &str, created_at: Option<DateTime<Utc>>, status: OrderStatus) -> Order {
        Order {
            id: OrderId::new(id),
            name: String::new(),
            phone: String::new(),
            product_id: String::new(),
            product_name: String::new(),
            status,
            created_at,
            request_complete: false,
        }
    }

    fn ids(orders: &[Order]) -> Vec<&str> {
        orders.iter().map(|o| o.id.as_str()).collect()
    }

    fn utc(y: i32, mo: u32, d: u32, h: u32, mi: u32) -> DateTime<Utc> {
        Utc.with_ymd_and_hms(y, mo, d, h, mi, 0).unwrap()
    }

    #[test]
    fn test_compute_window_no_filter() {
        let now = utc(2025, 6, 5, 15, 30);
        assert_eq!(compute_window(None, &now).unwrap(), None);
        assert_eq!(compute_window(Some(ALL_DAYS), &now).unwrap(), None);
    }

    #[test]
    fn test_compute_window_rejects_negative_offsets() {
        let now = utc(2025, 6, 5, 15, 30);
        assert_eq!(
            compute_window(Some(-2), &now),
            Err(QueryError::InvalidDayOffset(-2))
        );
    }

    #[test]
    fn test_compute_window_today_spans_exactly_one_day() {
        let now = utc(2025, 6, 5, 15, 30);
        let window = compute_window(Some(0), &now).unwrap().unwrap();

        assert_eq!(window.start, utc(2025, 6, 5, 0, 0));
        assert_eq!(window.end, utc(2025, 6, 6, 0, 0));
        assert_eq!(window.end - window.start, TimeDelta::days(1));
    }

    #[test]
    fn test_compute_window_counts_back_in_calendar_days() {
        let now = utc(2025, 6, 5, 0, 10);
        let window = compute_window(Some(3), &now).unwrap().unwrap();

        assert_eq!(window.start, utc(2025, 6, 2, 0, 0));
        assert_eq!(window.end, utc(2025, 6, 3, 0, 0));
    }

    #[test]
    fn test_compute_window_uses_midnight_of_the_given_zone() {
        // 01:00 on June 5 in IST is still June 4 in UTC; the window must
        // cover the IST calendar day.
        let ist = FixedOffset::east_opt(5 * 3600 + 1800).unwrap();
        let now = ist.with_ymd_and_hms(2025, 6, 5, 1, 0, 0).unwrap();
        let window = compute_window(Some(0), &now).unwrap().unwrap();

        assert_eq!(window.start, utc(2025, 6, 4, 18, 30));
        assert_eq!(window.end, utc(2025, 6, 5, 18, 30));
        assert!(window.contains(now.with_timezone(&Utc)));
    }

    #[test]
    fn test_window_boundaries_are_half_open() {
        let now = utc(2025, 6, 5, 12, 0);
        let window = compute_window(Some(0), &now).unwrap().unwrap();

        let orders = vec![
            order("at-start", Some(window.start), OrderStatus::Inquiry),
            order("inside", Some(utc(2025, 6, 5, 9, 0)), OrderStatus::Inquiry),
            order("at-end", Some(window.end), OrderStatus::Inquiry),
            order("no-timestamp", None, OrderStatus::Inquiry),
        ];

        let kept = filter_by_window(orders, Some(&window));
        assert_eq!(ids(&kept), vec!["at-start", "inside"]);
    }

    #[test]
    fn test_filter_without_window_is_identity() {
        let orders = vec![
            order("b", Some(utc(2025, 6, 6, 9, 0)), OrderStatus::OnTrack),
            order("a", Some(utc(2025, 6, 5, 9, 0)), OrderStatus::Inquiry),
            order("c", None, OrderStatus::Inquiry),
        ];

        let kept = filter_by_window(orders.clone(), None);
        assert_eq!(kept, orders);
    }

    #[test]
    fn test_sort_by_recency_puts_missing_timestamps_last() {
        let orders = vec![
            order("old", Some(utc(2025, 6, 1, 9, 0)), OrderStatus::Inquiry),
            order("untimed", None, OrderStatus::Inquiry),
            order("new", Some(utc(2025, 6, 5, 9, 0)), OrderStatus::Inquiry),
        ];

        let sorted = sort_by_recency(orders);
        assert_eq!(ids(&sorted), vec!["new", "old", "untimed"]);
    }

    #[test]
    fn test_sort_by_recency_is_stable() {
        let tied = Some(utc(2025, 6, 5, 9, 0));
        let orders = vec![
            order("first", tied, OrderStatus::Inquiry),
            order("second", tied, OrderStatus::Inquiry),
            order("untimed-first", None, OrderStatus::Inquiry),
            order("untimed-second", None, OrderStatus::Inquiry),
        ];

        let sorted = sort_by_recency(orders);
        assert_eq!(
            ids(&sorted),
            vec!["first", "second", "untimed-first", "untimed-second"]
        );
    }

    #[test]
    fn test_bucket_by_status_always_has_all_four_keys() {
        let buckets = bucket_by_status(vec![]);

        assert!(buckets.is_empty());
        let value = serde_json::to_value(&buckets).unwrap();
        for key in ["inquiry", "on_track", "payment_done", "completed"] {
            assert_eq!(value[key], serde_json::json!([]));
        }
    }

    #[test]
    fn test_bucket_by_status_preserves_relative_order() {
        let orders = vec![
            order("i1", None, OrderStatus::Inquiry),
            order("t1", None, OrderStatus::OnTrack),
            order("i2", None, OrderStatus::Inquiry),
            order("c1", None, OrderStatus::Completed),
        ];

        let buckets = bucket_by_status(orders);
        assert_eq!(ids(&buckets.inquiry), vec!["i1", "i2"]);
        assert_eq!(ids(&buckets.on_track), vec!["t1"]);
        assert!(buckets.payment_done.is_empty());
        assert_eq!(ids(&buckets.completed), vec!["c1"]);
        assert_eq!(buckets.len(), 4);
    }

    #[test]
    fn test_out_of_set_statuses_bucket_under_inquiry() {
        let doc = OrderDocument {
            status: Some("escalated".to_string()),
            ..OrderDocument::default()
        };
        let orders = vec![Order::from_document(OrderId::new("weird"), doc)];

        let buckets = bucket_by_status(orders);
        assert_eq!(ids(&buckets.inquiry), vec!["weird"]);
    }

    #[test]
    fn test_select_scenario_today_and_unfiltered() {
        let now = utc(2025, 6, 5, 12, 0);
        let orders = vec![
            order("A", Some(utc(2025, 6, 5, 9, 0)), OrderStatus::Inquiry),
            order("B", Some(utc(2025, 6, 6, 9, 0)), OrderStatus::OnTrack),
            order("C", None, OrderStatus::Inquiry),
        ];

        let today = select(orders.clone(), Some(0), &now).unwrap();
        assert_eq!(ids(&today), vec!["A"]);

        let all = select(orders, Some(ALL_DAYS), &now).unwrap();
        assert_eq!(ids(&all), vec!["B", "A", "C"]);

        let buckets = bucket_by_status(all);
        assert_eq!(ids(&buckets.inquiry), vec!["A", "C"]);
        assert_eq!(ids(&buckets.on_track), vec!["B"]);
        assert!(buckets.payment_done.is_empty());
        assert!(buckets.completed.is_empty());
    }
}
