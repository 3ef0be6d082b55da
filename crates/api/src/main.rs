use std::net::SocketAddr;
use std::sync::Arc;

use axum::extract::Request;
use axum::ServiceExt;
use cadastro_core::report::PdfReportGenerator;
use cadastro_db::{CredentialStore, MemoryStore, PgStore, RecordStore};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use cadastro_api::app::build_app;
use cadastro_api::auth::bootstrap_admin;
use cadastro_api::config::{ServerConfig, StoreBackend};
use cadastro_api::state::AppState;

#[tokio::main]
async fn main() {
    dotenvy::dotenv().ok();

    // --- Tracing ---
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "cadastro_api=debug,tower_http=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    // --- Configuration ---
    let config = ServerConfig::from_env();
    tracing::info!(
        host = %config.host,
        port = %config.port,
        backend = ?config.store_backend,
        "Loaded server configuration"
    );

    // --- Record store ---
    let (store, credentials) = connect_store(&config).await;

    // --- Admin bootstrap ---
    if let Some(admin) = &config.admin {
        let created = bootstrap_admin(credentials.as_ref(), &admin.login, &admin.password)
            .await
            .expect("Failed to bootstrap admin account");
        tracing::info!(login = %admin.login, created, "Admin account ensured");
    }

    // --- App ---
    let addr = SocketAddr::new(
        config.host.parse().expect("Invalid HOST address"),
        config.port,
    );
    let state = AppState::new(config, store, credentials, Arc::new(PdfReportGenerator));
    let app = build_app(state);

    // --- Start server ---
    tracing::info!(%addr, "Starting server");
    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .expect("Failed to bind to address");

    axum::serve(listener, ServiceExt::<Request>::into_make_service(app))
        .with_graceful_shutdown(shutdown_signal())
        .await
        .expect("Server error");

    tracing::info!("Graceful shutdown complete");
}

/// Open the configured store. Postgres is health-checked and migrated first.
async fn connect_store(config: &ServerConfig) -> (Arc<dyn RecordStore>, Arc<dyn CredentialStore>) {
    match config.store_backend {
        StoreBackend::Postgres => {
            let database_url = config
                .database_url
                .as_deref()
                .expect("DATABASE_URL must be set");

            let pool = cadastro_db::create_pool(database_url)
                .await
                .expect("Failed to connect to database");
            tracing::info!("Database connection pool created");

            cadastro_db::health_check(&pool)
                .await
                .expect("Database health check failed");

            cadastro_db::run_migrations(&pool)
                .await
                .expect("Failed to run database migrations");
            tracing::info!("Database migrations applied");

            let store = Arc::new(PgStore::new(pool));
            let records: Arc<dyn RecordStore> = store.clone();
            let credentials: Arc<dyn CredentialStore> = store;
            (records, credentials)
        }
        StoreBackend::Memory => {
            tracing::warn!("Using the in-memory store; data is lost on restart");
            let store = Arc::new(MemoryStore::new());
            let records: Arc<dyn RecordStore> = store.clone();
            let credentials: Arc<dyn CredentialStore> = store;
            (records, credentials)
        }
    }
}

/// Wait for SIGINT (Ctrl-C) or, on Unix, SIGTERM.
async fn shutdown_signal() {
    let ctrl_c = async {
        tokio::signal::ctrl_c()
            .await
            .expect("Failed to install Ctrl-C handler");
    };

    #[cfg(unix)]
    let terminate = async {
        tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate())
            .expect("Failed to install SIGTERM handler")
            .recv()
            .await;
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        () = ctrl_c => {
            tracing::info!("Received SIGINT (Ctrl-C), starting graceful shutdown");
        }
        () = terminate => {
            tracing::info!("Received SIGTERM, starting graceful shutdown");
        }
    }
}
