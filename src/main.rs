use actix_cors::Cors;
use actix_files as fs;
use actix_web::{App, HttpServer, middleware::Logger, web};
use sqlx::sqlite::{SqliteConnectOptions, SqlitePoolOptions};
use std::path::PathBuf;
use std::str::FromStr;
use std::sync::Arc;
use std::time::Duration;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use fakturka::{
  adapters::http::{RequestIdMiddleware, configure_invoice_routes, configure_search_routes},
  application::invoice::{CreateInvoiceUseCase, GetInvoiceDocumentUseCase, ListInvoicesUseCase},
  application::search::SearchJobsUseCase,
  domain::invoice::InvoiceService,
  domain::search::JobSearchClient,
  infrastructure::{
    config::Config, persistence::sqlite::SqliteInvoiceRepository, search::JoobleSearchClient,
    storage::FsDocumentStore,
  },
};

#[actix_web::main]
async fn main() -> std::io::Result<()> {
  // Initialize environment variables from .env file
  dotenvy::dotenv().ok();

  // Initialize tracing subscriber for logging
  tracing_subscriber::registry()
    .with(
      tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| "fakturka=debug,actix_web=info".into()),
    )
    .with(tracing_subscriber::fmt::layer())
    .init();

  tracing::info!("Starting fakturka");

  // Load configuration
  let config = Config::load().expect("Failed to load configuration");
  tracing::info!("Configuration loaded successfully");

  // Set up database connection pool with timeout
  tracing::info!("Connecting to database: {}", config.database.url);

  let connect_options = SqliteConnectOptions::from_str(&config.database.url)
    .map_err(|e| {
      std::io::Error::new(
        std::io::ErrorKind::InvalidInput,
        format!("Invalid database URL: {}", e),
      )
    })?
    .create_if_missing(true);

  let db_pool = tokio::time::timeout(
    Duration::from_secs(config.database.connect_timeout_seconds),
    SqlitePoolOptions::new()
      .max_connections(config.database.max_connections)
      .acquire_timeout(Duration::from_secs(config.database.acquire_timeout_seconds))
      .connect_with(connect_options),
  )
  .await
  .map_err(|_| {
    tracing::error!(
      "Database connection timed out after {} seconds",
      config.database.connect_timeout_seconds
    );
    std::io::Error::new(
      std::io::ErrorKind::TimedOut,
      format!(
        "Database connection timed out after {} seconds",
        config.database.connect_timeout_seconds
      ),
    )
  })?
  .map_err(|e| {
    tracing::error!("Failed to open database: {}", e);
    std::io::Error::other(format!("Database error: {}", e))
  })?;

  tracing::info!("Database connection pool created");

  // Run database migrations
  tracing::info!("Running database migrations");
  sqlx::migrate!("./migrations")
    .run(&db_pool)
    .await
    .expect("Failed to run database migrations");
  tracing::info!("Database migrations completed");

  // Initialize repositories and stores
  let invoice_repo = Arc::new(SqliteInvoiceRepository::new(db_pool.clone()));
  let document_store = Arc::new(FsDocumentStore::new(PathBuf::from(&config.documents.dir)));

  // Initialize domain service
  let invoice_service = Arc::new(InvoiceService::new(invoice_repo, document_store));

  // Initialize invoice use cases
  let create_invoice_use_case = Arc::new(CreateInvoiceUseCase::new(invoice_service.clone()));
  let list_invoices_use_case = Arc::new(ListInvoicesUseCase::new(invoice_service.clone()));
  let get_invoice_document_use_case =
    Arc::new(GetInvoiceDocumentUseCase::new(invoice_service.clone()));

  // Initialize the job-search proxy
  let search_client =
    Arc::new(JoobleSearchClient::new(&config.search)) as Arc<dyn JobSearchClient>;
  let search_jobs_use_case = Arc::new(SearchJobsUseCase::new(search_client));

  let server_host = config.server.host.clone();
  let server_port = config.server.port;

  tracing::info!("Starting HTTP server on {}:{}", server_host, server_port);

  // Create and start the HTTP server
  HttpServer::new(move || {
    App::new()
      // Add request ID middleware
      .wrap(RequestIdMiddleware::new())
      // Add logging middleware
      .wrap(Logger::default())
      // The frontend is served from a different origin during development
      .wrap(Cors::permissive())
      // Configure API routes
      .service(web::scope("/api").configure(|cfg| {
        configure_invoice_routes(
          cfg,
          create_invoice_use_case.clone(),
          list_invoices_use_case.clone(),
          get_invoice_document_use_case.clone(),
        );
        configure_search_routes(cfg, search_jobs_use_case.clone());
      }))
      // Static files (built frontend, if present)
      .service(fs::Files::new("/static", "./static"))
      // Health check endpoint
      .route("/health", web::get().to(health_check))
  })
  .bind((server_host.as_str(), server_port))?
  .run()
  .await
}

/// Health check endpoint
async fn health_check() -> &'static str {
  "OK"
}
