use migration::{Migrator, MigratorTrait};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use crate::{client::AcademyClient, config::Config, error::Error};

/// Install the global `tracing` subscriber, filtered by `RUST_LOG`.
pub fn init_tracing() {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info,academy=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();
}

/// Connect to the database and run migrations
pub async fn connect_to_database(config: &Config) -> Result<AcademyClient, Error> {
    let client = AcademyClient::connect(config.client_options()).await?;

    Migrator::up(client.db(), None).await?;

    tracing::info!("database migrations applied");

    Ok(client)
}
