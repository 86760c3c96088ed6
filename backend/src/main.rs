// src/main.rs

use std::sync::Arc;
use std::time::Duration;

use dotenvy::dotenv;
use report_card::config::Config;
use report_card::report::assets::is_readable;
use report_card::report::store::PgReportStore;
use report_card::routes;
use report_card::state::AppState;
use sqlx::postgres::PgPoolOptions;
use tracing_subscriber::{EnvFilter, fmt, layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() {
    // Load .env file (if present)
    dotenv().ok();

    // Load configuration from environment
    let config = Config::from_env();

    let file_appender = tracing_appender::rolling::daily(&config.log_dir, "app.log");
    let (non_blocking, _guard) = tracing_appender::non_blocking(file_appender);
    let env_filter = EnvFilter::new(&config.rust_log);
    let stdout_layer = fmt::layer().with_writer(std::io::stdout).with_target(false);
    let file_layer = fmt::layer().with_writer(non_blocking).with_ansi(false);

    // Initialize Tracing (Logging)
    tracing_subscriber::registry()
        .with(env_filter)
        .with(stdout_layer)
        .with(file_layer)
        .init();

    // Initialize Database Pool with Retry
    let mut retry_count = 0;
    let pool = loop {
        match PgPoolOptions::new()
            .max_connections(5)
            .acquire_timeout(Duration::from_secs(3))
            .connect(&config.database_url)
            .await
        {
            Ok(pool) => break pool,
            Err(e) => {
                retry_count += 1;
                if retry_count > 5 {
                    panic!("Failed to connect to database after 5 retries: {}", e);
                }
                tracing::warn!("Database not ready, retrying in 2s... (Attempt {})", retry_count);
                tokio::time::sleep(Duration::from_secs(2)).await;
            }
        }
    };

    tracing::info!("Database connected...");

    let images = config.image_source();
    match images.logo_candidates().into_iter().find(|p| is_readable(p)) {
        Some(path) => tracing::info!("School logo: {}", path.display()),
        None => tracing::warn!("No school logo found, reports will be printed without one"),
    }

    let state = AppState {
        store: Arc::new(PgReportStore::new(pool)),
        images: Arc::new(images),
        config: config.clone(),
    };

    // Create the Axum application router
    let app = routes::create_router(state);

    let listener = tokio::net::TcpListener::bind(&config.bind_addr)
        .await
        .unwrap_or_else(|e| panic!("Failed to bind {}: {}", config.bind_addr, e));
    tracing::info!("Listening on {}", config.bind_addr);

    // Start the server
    if let Err(e) = axum::serve(listener, app).await {
        tracing::error!("Server error: {}", e);
    }
}
