use academy::{
    config::Config,
    service::{retry::RetryContext, subscription::SubscriptionService},
    startup,
};
use chrono::Utc;

#[tokio::main]
async fn main() {
    dotenvy::dotenv().ok();
    startup::init_tracing();

    let config = match Config::from_env() {
        Ok(config) => config,
        Err(e) => {
            eprintln!("Configuration error: {}", e);
            std::process::exit(1);
        }
    };

    let client = match startup::connect_to_database(&config).await {
        Ok(client) => client,
        Err(e) => {
            tracing::error!(error = %e, "failed to connect to database");
            std::process::exit(1);
        }
    };

    tracing::info!(
        interval_secs = config.expiry_sweep_interval.as_secs(),
        "starting subscription expiry sweep"
    );

    let mut interval = tokio::time::interval(config.expiry_sweep_interval);
    loop {
        tokio::select! {
            _ = interval.tick() => {
                let db = client.db();
                let sweep = RetryContext::new()
                    .execute_with_retry("subscription expiry sweep", || {
                        Box::pin(async move {
                            SubscriptionService::new(db)
                                .expire_due(Utc::now().naive_utc())
                                .await
                        })
                    })
                    .await;

                match sweep {
                    Ok(expired) => tracing::info!(expired, "expiry sweep finished"),
                    Err(e) => tracing::error!(error = %e, "expiry sweep failed"),
                }
            }
            _ = tokio::signal::ctrl_c() => {
                tracing::info!("shutting down");
                break;
            }
        }
    }

    if let Err(e) = client.disconnect().await {
        tracing::error!(error = %e, "failed to close database connections");
    }
}
