use std::time::Duration;

use sea_orm::{ConnectOptions, Database};
use tracing::{error, info};

use campus_api::config::ApiConfig;
use campus_api::router::build_router;
use campus_api::state::AppState;
use campus_api::usecase::deadline::{DeadlineScanUseCase, SystemClock};
use campus_core::tracing::init_tracing;

/// Deadline scan cadence.
const SCAN_INTERVAL: Duration = Duration::from_secs(3600);

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

    let state = AppState {
        db,
        redis,
        jwt_secret: config.jwt_secret,
    };

    // Hourly deadline scan; the use case itself decides whether the
    // reminder or missed window is open.
    let scan_state = state.clone();
    tokio::spawn(async move {
        let mut ticker = tokio::time::interval(SCAN_INTERVAL);
        loop {
            ticker.tick().await;
            let scan = DeadlineScanUseCase {
                users: scan_state.user_repo(),
                logs: scan_state.activity_log_repo(),
                queue: scan_state.notification_queue(),
                clock: SystemClock,
            };
            match scan.execute().await {
                Ok(outcome) => info!(
                    reminders = outcome.reminders,
                    missed = outcome.missed,
                    manager_alerts = outcome.manager_alerts,
                    "deadline scan finished"
                ),
                Err(e) => error!(error = %e, "deadline scan failed"),
            }
        }
    });

    let router = build_router(state);
    let addr = format!("0.0.0.0:{}", config.api_port);
    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .expect("failed to bind");

    info!("api listening on {addr}");
    axum::serve(listener, router).await.expect("server error");
}
