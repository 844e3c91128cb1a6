// src/main.rs
// DOCUMENTATION: Application entry point
// PURPOSE: Initialize config, database, and start HTTP server

mod config;
mod db;
mod deadline;
mod errors;
mod handlers;
mod models;

use actix_web::{middleware::Logger, web, App, HttpServer};
use anyhow::Context;
use config::Config;
use db::{PostRepository, PostStore};
use std::sync::Arc;
use std::time::Duration;

#[actix_web::main]
async fn main() {
    // 1. Load configuration (.env first, then process environment)
    let config = match Config::from_env() {
        Ok(config) => config,
        Err(e) => {
            // Logging is not set up yet; the level lives in the config itself
            eprintln!("{}", e);
            std::process::exit(1);
        }
    };

    // 2. Initialize logging
    if std::env::var("RUST_LOG").is_err() {
        std::env::set_var("RUST_LOG", &config.log_level);
    }
    env_logger::init();

    if let Err(e) = run(config).await {
        log::error!("{:#}", e);
        std::process::exit(1);
    }
}

async fn run(config: Config) -> anyhow::Result<()> {
    log::info!("Starting posts-service...");
    log::debug!("{:?}", config);

    // 3. Initialize database connection pool
    let db = config::init_db_pool(&config)
        .await
        .context("failed to initialize database pool")?;
    log::info!("Connected to PostgreSQL");

    // 4. Start HTTP server
    let server_addr = config.bind_address();
    let store: Arc<dyn PostStore> = Arc::new(PostRepository::new(db.clone()));
    let shutdown_timeout = config.shutdown_timeout;
    let config_data = web::Data::new(config);
    let store_data = web::Data::from(store);

    let server = HttpServer::new(move || {
        App::new()
            // Application state (post store and config)
            .app_data(store_data.clone())
            .app_data(config_data.clone())
            // Middleware
            .wrap(Logger::default())
            .wrap(actix_web::middleware::Compress::default())
            // Routes
            .configure(handlers::health_config)
            .configure(handlers::posts_config)
    })
    .shutdown_timeout(shutdown_timeout)
    .bind(&server_addr)
    .with_context(|| format!("failed to bind {}", server_addr))?;

    log::info!("Listening on {}", server_addr);

    // Resolves once a termination signal arrives and in-flight requests
    // have drained (or the shutdown timeout elapsed).
    let served = server.run().await;
    log::info!(
        "Shutting down ({} database connections open)",
        db.size()
    );

    let closing = db.close();
    if tokio::time::timeout(Duration::from_secs(shutdown_timeout), closing)
        .await
        .is_err()
    {
        log::warn!("Timed out waiting for database connections to close");
    } else {
        log::info!("Database pool closed");
    }

    served.context("HTTP server error")
}
