use std::sync::Arc;

use actix_cors::Cors;
use actix_web::{http, middleware::NormalizePath, web, App, HttpServer};
use portfolio_api::{
    db::postgres::create_pool,
    graceful_shutdown::shutdown_signal,
    notify::{mailer::WebhookMailer, MessageNotifier, NoopNotifier},
    repositories::{local::LocalStore, record_store::RecordStore, remote::RemoteStore},
    routes::configure_routes,
    settings::{AppConfig, StorageMode},
    AppState,
};

#[actix_web::main]
async fn main() -> std::io::Result<()> {
    tracing_subscriber::fmt::init();

    let config = match AppConfig::new() {
        Ok(cfg) => {
            tracing::info!("Loaded configuration: {:?}", cfg);
            cfg
        }
        Err(e) => {
            tracing::error!("Configuration error: {}", e);
            std::process::exit(1);
        }
    };

    let store: Arc<dyn RecordStore> = match config.storage_mode {
        StorageMode::Remote => {
            let pool = create_pool(&config.database_url)
                .await
                .expect("Failed to create database connection pool");

            sqlx::migrate!("./migrations")
                .run(&pool)
                .await
                .expect("Failed to run database migrations");

            Arc::new(RemoteStore::new(pool))
        }
        StorageMode::Demo => {
            tracing::warn!("Demo storage mode active: records persist to {}", config.demo_data_dir);
            let local = LocalStore::new(&config.demo_data_dir)
                .expect("Failed to open demo data directory");
            Arc::new(local)
        }
    };

    let notifier: Arc<dyn MessageNotifier> = match WebhookMailer::from_config(&config) {
        Some(mailer) => Arc::new(mailer),
        None => {
            tracing::warn!("Mail endpoint not configured, message notifications disabled");
            Arc::new(NoopNotifier)
        }
    };

    let app_state = web::Data::new(AppState::new(&config, store, notifier));

    let server_addr = format!("{}:{}", config.host, config.port);

    tracing::info!(
        "🚀 Starting {} v{} on {} ({} mode)",
        config.name,
        env!("CARGO_PKG_VERSION"),
        server_addr,
        config.storage_mode
    );

    let cors_origins = config.cors_origins();
    let worker_count = config.worker_count;

    let server = HttpServer::new(move || {
        let mut cors = Cors::default()
            .allowed_methods(vec!["GET", "POST", "PUT", "DELETE"])
            .allowed_headers(vec![http::header::AUTHORIZATION, http::header::CONTENT_TYPE])
            .max_age(3600);

        if cors_origins.iter().any(|o| o == "*") {
            cors = cors.allow_any_origin();
        } else {
            for origin in &cors_origins {
                cors = cors.allowed_origin(origin);
            }
        }

        App::new()
            .app_data(app_state.clone())
            .wrap(NormalizePath::trim())
            .wrap(cors)
            .configure(configure_routes)
    })
    .workers(worker_count)
    .bind(server_addr)?
    .run();

    tokio::select! {
        res = server => res,
        _ = shutdown_signal() => Ok(()),
    }
}
