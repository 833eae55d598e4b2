//! Database migration command.

use orderdesk_admin::config::DashboardConfig;
use orderdesk_admin::store::{self, postgres::MIGRATOR};

/// Run the order collection migrations.
///
/// # Errors
///
/// Returns an error if configuration loading, connecting, or applying a
/// migration fails.
pub async fn run() -> Result<(), Box<dyn std::error::Error>> {
    let config = DashboardConfig::from_env()?;
    let pool = store::create_pool(&config.database_url).await?;

    MIGRATOR.run(&pool).await?;
    tracing::info!("Migrations applied");

    Ok(())
}
