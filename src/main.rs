//!
//! HTTP server for the Courtly facility booking service.
//! Reads configuration from TOML file (~/.config/courtly/config.toml).

use std::sync::Arc;

use chrono::Utc;
use sea_orm_migration::MigratorTrait;
use tokio::sync::Notify;
use tracing::{error, info, warn};

use courtly::application::{
    CatalogService, ExpirySweep, ReservationPolicy, ReservationService,
};
use courtly::auth::{hash_password, JwtConfig};
use courtly::config::AppConfig;
use courtly::domain::{RepositoryProvider, Role, User};
use courtly::infrastructure::database::migrator::Migrator;
use courtly::{
    create_api_router, default_config_path, init_database, DatabaseConfig,
    SeaOrmRepositoryProvider,
};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // ── Load configuration ─────────────────────────────────────
    let config_path = std::env::var("COURTLY_CONFIG")
        .map(std::path::PathBuf::from)
        .unwrap_or_else(|_| default_config_path());
    let app_cfg = match AppConfig::load(&config_path) {
        Ok(cfg) => {
            tracing_subscriber::fmt()
                .with_env_filter(
                    tracing_subscriber::EnvFilter::try_from_default_env()
                        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(&cfg.logging.level)),
                )
                .init();
            info!("Configuration loaded from {}", config_path.display());
            cfg
        }
        Err(e) => {
            tracing_subscriber::fmt()
                .with_env_filter(tracing_subscriber::EnvFilter::new("info"))
                .init();
            error!("Failed to load config: {}. Using defaults.", e);
            AppConfig::default()
        }
    };

    info!("Starting Courtly booking service...");

    // ── Prometheus metrics recorder (must be installed before any metrics calls) ──
    let prometheus_handle = metrics_exporter_prometheus::PrometheusBuilder::new()
        .install_recorder()
        .expect("Failed to install Prometheus metrics recorder");
    info!("Prometheus metrics recorder installed");

    let db_config = DatabaseConfig {
        url: app_cfg.database.url.clone(),
    };
    info!("Database: {}", db_config.url);

    let jwt_config = JwtConfig {
        secret: app_cfg.security.jwt_secret.clone(),
        expiration_hours: app_cfg.security.jwt_expiration_hours,
        issuer: "courtly".to_string(),
    };
    info!(
        "JWT configured with {}h token expiration",
        jwt_config.expiration_hours
    );

    // ── Database ───────────────────────────────────────────────
    let db = match init_database(&db_config).await {
        Ok(db) => db,
        Err(e) => {
            error!("Failed to connect to database: {}", e);
            return Err(e.into());
        }
    };

    info!("Running database migrations...");
    if let Err(e) = Migrator::up(&db, None).await {
        error!("Failed to run migrations: {}", e);
        return Err(e.into());
    }
    info!("Migrations completed");

    let repos: Arc<dyn RepositoryProvider> = Arc::new(SeaOrmRepositoryProvider::new(db.clone()));

    create_default_admin(repos.as_ref(), &app_cfg).await;

    // ── Services ───────────────────────────────────────────────
    let catalog = Arc::new(CatalogService::new(
        repos.clone(),
        app_cfg.booking.slot_window_days,
    ));
    let reservations = Arc::new(ReservationService::new(
        repos.clone(),
        ReservationPolicy {
            require_all_slots: app_cfg.booking.require_all_slots,
        },
    ));

    // Optional background expiry sweep; reads already settle expiry lazily
    let shutdown = Arc::new(Notify::new());
    let sweep_handle = if app_cfg.booking.expiry_sweep_interval_secs > 0 {
        Some(
            ExpirySweep::new(
                reservations.clone(),
                app_cfg.booking.expiry_sweep_interval_secs,
            )
            .start(shutdown.clone()),
        )
    } else {
        None
    };

    // ── HTTP server ────────────────────────────────────────────
    let router = create_api_router(
        repos,
        catalog,
        reservations,
        jwt_config,
        prometheus_handle,
    );

    let addr = app_cfg.server.address();
    let listener = tokio::net::TcpListener::bind(&addr).await?;
    info!("REST API server listening on http://{}", addr);
    info!("Swagger UI available at http://{}/docs/", addr);

    axum::serve(listener, router)
        .with_graceful_shutdown(async {
            let _ = tokio::signal::ctrl_c().await;
            info!("Shutdown signal received");
        })
        .await?;

    shutdown.notify_waiters();
    if let Some(handle) = sweep_handle {
        let _ = handle.await;
    }

    if let Err(e) = db.close().await {
        warn!("Error closing database connection: {}", e);
    } else {
        info!("Database connection closed");
    }

    info!("Courtly shutdown complete");
    Ok(())
}

/// Create the seed admin account when no users exist yet
async fn create_default_admin(repos: &dyn RepositoryProvider, app_cfg: &AppConfig) {
    let users_count = repos.users().count().await.unwrap_or(0);
    if users_count > 0 {
        return;
    }

    info!("Creating default admin user...");

    let password_hash = match hash_password(&app_cfg.admin.password) {
        Ok(hash) => hash,
        Err(e) => {
            error!("Failed to hash admin password: {}", e);
            return;
        }
    };

    let now = Utc::now();
    let admin = User {
        id: uuid::Uuid::new_v4(),
        username: app_cfg.admin.username.clone(),
        fullname: app_cfg.admin.fullname.clone(),
        password_hash,
        role: Role::Admin,
        location: None,
        is_active: true,
        created_at: now,
        updated_at: now,
    };

    match repos.users().save(admin).await {
        Ok(()) => {
            info!("Default admin created: {}", app_cfg.admin.username);
            warn!("Please change the admin password immediately!");
        }
        Err(e) => error!("Failed to create admin user: {}", e),
    }
}
