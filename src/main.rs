use std::sync::Arc;

use actix_cors::Cors;
use actix_web::{web, App, HttpResponse, HttpServer};
use anyhow::Context;
use tracing_actix_web::TracingLogger;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use fareledger::config::Config;
use fareledger::middleware::{ApiKeyAuth, RequestId};
use fareledger::modules::billing::controllers::billing_controller;
use fareledger::modules::billing::services::billing_service::BillingService;
use fareledger::modules::directory::controllers::directory_controller;
use fareledger::modules::directory::repositories::directory_repository::DirectoryRepository;
use fareledger::modules::directory::services::directory_service::DirectoryService;
use fareledger::modules::health::controllers::health_controller;
use fareledger::modules::tickets::controllers::ticket_controller;
use fareledger::modules::tickets::repositories::ticket_repository::TicketRepository;
use fareledger::modules::tickets::services::fare_ledger::FareLedgerCalculator;
use fareledger::modules::tickets::services::ticket_service::TicketService;

#[actix_web::main]
async fn main() -> anyhow::Result<()> {
    // Load configuration
    let config = Config::from_env().context("Failed to load configuration")?;
    config.validate().context("Configuration validation failed")?;

    // Initialize tracing
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| {
                format!("fareledger={},actix_web=info", config.app.log_level).into()
            }),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    tracing::info!("Starting fareledger back-office service");
    tracing::info!("Environment: {}", config.app.env);
    tracing::info!("Server binding to: {}", config.server.bind_address());

    // Create database connection pool and apply pending migrations
    let db_pool = config
        .database
        .create_pool()
        .await
        .context("Failed to create database pool")?;

    sqlx::migrate!("./migrations")
        .run(&db_pool)
        .await
        .context("Failed to run database migrations")?;

    tracing::info!(
        "Database pool initialized ({} connections)",
        config.database.max_connections
    );

    // Wire services; the calculator carries the configured ledger rules
    let calculator = FareLedgerCalculator::new(config.ledger.rules());
    let ticket_repo = Arc::new(TicketRepository::new(db_pool.clone()));
    let directory_repo = Arc::new(DirectoryRepository::new(db_pool.clone()));

    let ticket_service = Arc::new(TicketService::new(ticket_repo.clone(), calculator.clone()));
    let billing_service = Arc::new(BillingService::new(ticket_repo.clone(), calculator.clone()));
    let directory_service = Arc::new(DirectoryService::new(directory_repo.clone()));

    // Start HTTP server
    let bind_address = config.server.bind_address();
    let workers = config.server.workers;
    let pool_for_app = db_pool.clone();

    let server = HttpServer::new(move || {
        App::new()
            .app_data(web::Data::new(pool_for_app.clone()))
            .app_data(web::Data::new(ticket_service.clone()))
            .app_data(web::Data::new(billing_service.clone()))
            .app_data(web::Data::new(directory_service.clone()))
            .wrap(ApiKeyAuth::new(pool_for_app.clone()))
            .wrap(RequestId)
            .wrap(TracingLogger::default())
            .wrap(Cors::permissive())
            .configure(health_controller::configure)
            .configure(ticket_controller::configure)
            .configure(directory_controller::configure)
            .configure(billing_controller::configure)
            .route("/", web::get().to(index))
    })
    .workers(workers)
    .bind(&bind_address)?
    .run();

    tracing::info!("Server started at http://{}", bind_address);

    server.await.context("Server terminated unexpectedly")
}

async fn index() -> HttpResponse {
    HttpResponse::Ok().json(serde_json::json!({
        "service": "fareledger back-office service",
        "version": env!("CARGO_PKG_VERSION"),
        "status": "running"
    }))
}
