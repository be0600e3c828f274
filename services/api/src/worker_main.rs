use std::time::Duration;

use sea_orm::{ConnectOptions, Database};

use campus_api::config::ApiConfig;
use campus_api::infra::worker::NotificationWorker;
use campus_core::tracing::init_tracing;

#[tokio::main]
async fn main() {
    init_tracing();

    let config = ApiConfig::from_env();

    let mut options = ConnectOptions::new(&config.database_url);
    options
        .max_connections(5)
        .acquire_timeout(Duration::from_secs(30))
        .idle_timeout(Duration::from_secs(10));
    let db = Database::connect(options)
        .await
        .expect("failed to connect to database");

    let redis = deadpool_redis::Config::from_url(&config.redis_url)
        .create_pool(Some(deadpool_redis::Runtime::Tokio1))
        .expect("failed to create redis pool");

    let worker = NotificationWorker { db, redis };
    worker.run().await;
}
