//! HTTP server initialization and runtime setup.
//!
//! Handles database connections, migrations, service wiring, and the Axum
//! server lifecycle.

use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;

use anyhow::{Context, Result};
use axum::ServiceExt;
use axum::extract::Request;
use sqlx::postgres::PgPoolOptions;

use crate::application::services::{AuthService, LinkService};
use crate::config::Config;
use crate::domain::verifier::IdTokenVerifier;
use crate::infrastructure::google::GoogleTokenVerifier;
use crate::infrastructure::persistence::{PgLinkRepository, PgUserRepository};
use crate::infrastructure::probe::HttpUrlProber;
use crate::routes::app_router;
use crate::state::AppState;

/// Runs the HTTP server with the given configuration.
///
/// Initializes:
/// - PostgreSQL connection pool and migrations
/// - Reachability prober and optional Google token verifier
/// - Application services and shared state
/// - Axum HTTP server
///
/// # Errors
///
/// Returns an error if the database connection, migrations, or server
/// bind fail.
pub async fn run(config: Config) -> Result<()> {
    let pool = PgPoolOptions::new()
        .max_connections(config.db_max_connections)
        .acquire_timeout(Duration::from_secs(config.db_connect_timeout))
        .idle_timeout(Duration::from_secs(config.db_idle_timeout))
        .max_lifetime(Duration::from_secs(config.db_max_lifetime))
        .connect(&config.database_url)
        .await
        .context("Failed to connect to database")?;
    tracing::info!("Connected to database");

    sqlx::migrate!("./migrations")
        .run(&pool)
        .await
        .context("Failed to run migrations")?;

    let pool = Arc::new(pool);
    let link_repository = Arc::new(PgLinkRepository::new(pool.clone()));
    let user_repository = Arc::new(PgUserRepository::new(pool.clone()));

    let prober = Arc::new(
        HttpUrlProber::new(Duration::from_secs(config.probe_timeout_secs))
            .context("Failed to build probe HTTP client")?,
    );

    let verifier: Option<Arc<dyn IdTokenVerifier>> = match &config.google_client_id {
        Some(client_id) => {
            tracing::info!("Google login enabled");
            Some(Arc::new(
                GoogleTokenVerifier::new(client_id.clone())
                    .context("Failed to build Google token verifier")?,
            ))
        }
        None => {
            tracing::info!("Google login disabled (GOOGLE_CLIENT_ID not set)");
            None
        }
    };

    let link_service = Arc::new(LinkService::new(link_repository, prober));
    let auth_service = Arc::new(AuthService::new(
        user_repository,
        verifier,
        config.jwt_secret.clone(),
        bcrypt::DEFAULT_COST,
    ));

    let state = AppState {
        link_service,
        auth_service,
        base_url: config.base_url.clone(),
    };

    let app = app_router(state);

    let addr: SocketAddr = config.listen_addr.parse()?;
    let listener = tokio::net::TcpListener::bind(addr).await?;
    tracing::info!("Listening on http://{addr}");

    axum::serve(
        listener,
        ServiceExt::<Request>::into_make_service(app),
    )
    .await?;

    Ok(())
}
