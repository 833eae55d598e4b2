//! Sample data seeding command.

use chrono::{TimeDelta, Utc};
use uuid::Uuid;

use orderdesk_admin::config::DashboardConfig;
use orderdesk_admin::store::{self, PgOrderStore};
use orderdesk_core::{OrderDocument, OrderId, OrderStatus};

const SAMPLE_PRODUCTS: &[(&str, &str)] = &[
    ("prod-sofa-3s", "Three-Seat Sofa"),
    ("prod-desk-corner", "Corner Desk"),
    ("prod-chair-oak", "Oak Dining Chair"),
    ("prod-shelf-wall", "Wall Shelf"),
    ("prod-table-coffee", "Coffee Table"),
];

const SAMPLE_NAMES: &[&str] = &[
    "Priya Sharma",
    "Daniel Okafor",
    "Mei Lin",
    "Tomas Novak",
    "Sofia Alvarez",
    "Noah Fischer",
    "Amara Diallo",
];

/// Insert `count` sample inquiry documents, spread over the past days.
///
/// # Errors
///
/// Returns an error if configuration loading, connecting, or inserting
/// fails.
pub async fn run(count: u32) -> Result<(), Box<dyn std::error::Error>> {
    let config = DashboardConfig::from_env()?;
    let pool = store::create_pool(&config.database_url).await?;
    let order_store = PgOrderStore::new(pool);

    let now = Utc::now();
    let statuses = OrderStatus::ALL;
    let samples = SAMPLE_PRODUCTS
        .iter()
        .cycle()
        .zip(SAMPLE_NAMES.iter().cycle())
        .zip(statuses.iter().cycle())
        .take(count as usize)
        .enumerate();

    for (i, ((&(product_id, product_name), &name), &status)) in samples {
        let hours_back = 7 * i64::try_from(i).unwrap_or(i64::MAX / 7);
        let doc = OrderDocument {
            name: Some(name.to_string()),
            phone: Some(format!("+1-555-01{:02}", i % 100)),
            product_id: Some(product_id.to_string()),
            product_name: Some(product_name.to_string()),
            status: Some(status.to_string()),
            created_at: Some(now - TimeDelta::hours(hours_back)),
            request_complete: None,
        };

        let id = OrderId::new(Uuid::new_v4().to_string());
        order_store.insert(&id, &doc).await?;
        tracing::debug!(order_id = %id, product = product_name, "Seeded order");
    }

    tracing::info!("Seeded {count} sample orders");
    Ok(())
}
